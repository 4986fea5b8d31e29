//! # Gemini Client
//!
//! [`TextGenerator`] over the Generative Language REST API
//! (`models/{model}:generateContent`). One attempt per call with the configured
//! timeout; every failure is reported as a [`GenerationError`] and never retried.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error, info};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::GeminiConfig;
use crate::domain::{GenerationError, TextGenerator};

const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        if config.api_key.is_none() {
            info!("GEMINI_API_KEY not set; generated analysis is disabled");
        }

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", API_BASE_URL, self.model)
    }

    fn request_body<'a>(system_prompt: &'a str, user_prompt: &'a str) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: system_prompt }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: user_prompt }],
            }],
        }
    }

    /// Concatenated text parts of the first candidate
    fn extract_text(body: &str) -> Result<String, GenerationError> {
        let response: GenerateContentResponse = serde_json::from_str(body)
            .map_err(|e| GenerationError::Transport(format!("invalid response body: {}", e)))?;

        let text: String = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().filter_map(|part| part.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            Err(GenerationError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::NotConfigured)?;

        debug!("Calling {} ({} prompt chars)", self.model, user_prompt.len());
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(system_prompt, user_prompt))
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        if !status.is_success() {
            error!("❌ Generation failed with status {}: {}", status, body);
            return Err(GenerationError::Status(status.as_u16(), body));
        }

        Self::extract_text(&body)
    }
}
