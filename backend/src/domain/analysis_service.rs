//! # Analysis Service
//!
//! Natural-language month analysis and trip cost estimates, produced by an
//! external text generator.
//!
//! The generator sits behind the [`TextGenerator`] trait and reports failures as a
//! [`GenerationError`]. This service never propagates those failures: it logs them
//! and answers with a fixed pt-BR apology instead.
//!
//! ## Concurrency
//!
//! Only one generation request runs at a time. A call that arrives while another is
//! in flight is answered immediately with the apology text
//! (`GenerationError::Busy`) instead of queueing a second paid request.

use async_trait::async_trait;
use chrono::Datelike;
use log::{info, warn};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::domain::models::fuel_entry::ProcessedFuelEntry;

pub const ANALYSIS_SYSTEM_INSTRUCTION: &str = "Você é um assistente especialista em análise de dados automotivos e finanças pessoais. Sua tarefa é analisar os dados de abastecimento de um usuário para um mês específico e fornecer um resumo claro, conciso e útil em português do Brasil. Use um tom amigável e informativo. Formate sua resposta com parágrafos, listas e use a tag <strong> para destaques.";

pub const TRIP_SYSTEM_INSTRUCTION: &str = "Você é um assistente de planejamento de viagens. Sua tarefa é calcular o custo de uma viagem de carro e fornecer dicas úteis. Assuma um preço médio de R$ 5,80 por litro de gasolina para o cálculo.";

pub const ANALYSIS_APOLOGY: &str = "Desculpe, não foi possível completar a análise no momento. Verifique a configuração da API e tente novamente mais tarde.";

pub const TRIP_APOLOGY: &str = "Desculpe, não foi possível completar a estimativa no momento. Verifique a configuração da API e tente novamente mais tarde.";

pub const INVALID_DISTANCE_MESSAGE: &str = "<p>Por favor, insira uma distância válida.</p>";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Text generation is not configured (missing API key)")]
    NotConfigured,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Generation service returned HTTP {0}: {1}")]
    Status(u16, String),

    #[error("Generation service returned no text")]
    EmptyResponse,

    #[error("Another generation request is already in flight")]
    Busy,
}

/// External text generator: one attempt per call, no retries
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GenerationError>;
}

/// Text shown to the user, and whether it came from the generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub text: String,
    pub generated: bool,
}

impl AnalysisOutcome {
    fn generated(text: String) -> Self {
        Self {
            text,
            generated: true,
        }
    }

    fn fallback(text: &str) -> Self {
        Self {
            text: text.to_string(),
            generated: false,
        }
    }
}

/// One fill-up as summarized for the month analysis prompt
#[derive(Debug, Serialize)]
struct DaySummary {
    dia: u32,
    gasto: String,
    media_km_l: String,
    combustivel: &'static str,
}

/// Resets the in-flight flag when the request finishes, even on panic
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct AnalysisService {
    generator: Arc<dyn TextGenerator>,
    in_flight: AtomicBool,
}

impl AnalysisService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Compact JSON summary of the month's fill-ups, in the given order
    pub fn data_summary(entries: &[ProcessedFuelEntry]) -> String {
        let summary: Vec<DaySummary> = entries
            .iter()
            .map(|e| DaySummary {
                dia: e.date.day(),
                gasto: format!("{:.2}", e.total_value),
                media_km_l: format!("{:.1}", e.avg_kmpl),
                combustivel: e.fuel_type.as_str(),
            })
            .collect();

        serde_json::to_string(&summary).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn month_prompt(entries: &[ProcessedFuelEntry], month_name: &str) -> String {
        format!(
            "Aqui estão os dados de abastecimento para {}:\n\n{}\n\nCom base nesses dados, gere uma análise que inclua:\n\
             1. Um breve resumo geral do mês (gasto total, distância percorrida).\n\
             2. O dia em que o gasto com combustível foi maior.\n\
             3. A melhor e a pior média de consumo (km/L) registrada.\n\
             4. Uma dica prática e personalizada para ajudar o usuário a economizar combustível, com base nos padrões observados.",
            month_name,
            Self::data_summary(entries)
        )
    }

    pub fn trip_prompt(distance_km: u64, avg_kmpl: f64) -> String {
        format!(
            "Preciso estimar o custo de uma viagem de {} km. O consumo médio do meu carro é de {:.1} km/L. \
             Com base no preço médio de R$ 5,80 por litro de gasolina, calcule o custo total da viagem. \
             Apresente o resultado de forma clara, incluindo o preço do combustível assumido, os litros necessários e o custo final. \
             Adicione também 2 dicas para uma direção mais econômica durante a viagem. Use a tag <strong> para destaques.",
            distance_km, avg_kmpl
        )
    }

    async fn run(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GenerationError> {
        if self.in_flight.swap(true, Ordering::AcqRel) {
            return Err(GenerationError::Busy);
        }
        let _in_flight = InFlight(&self.in_flight);

        let text = self.generator.generate(system_prompt, user_prompt).await?;
        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(text)
    }

    pub async fn analyze_month(&self, entries: &[ProcessedFuelEntry], month_name: &str) -> AnalysisOutcome {
        info!("🔎 ANALYSIS: month '{}' with {} fill-ups", month_name, entries.len());
        let user_prompt = Self::month_prompt(entries, month_name);

        match self.run(ANALYSIS_SYSTEM_INSTRUCTION, &user_prompt).await {
            Ok(text) => AnalysisOutcome::generated(text),
            Err(e) => {
                warn!("Month analysis unavailable: {}", e);
                AnalysisOutcome::fallback(ANALYSIS_APOLOGY)
            }
        }
    }

    /// A zero distance is rejected without calling the generator
    pub async fn estimate_trip(&self, distance_km: u64, avg_kmpl: f64) -> AnalysisOutcome {
        if distance_km == 0 {
            return AnalysisOutcome::fallback(INVALID_DISTANCE_MESSAGE);
        }

        info!("🔎 ANALYSIS: trip of {} km at {:.1} km/L", distance_km, avg_kmpl);
        let user_prompt = Self::trip_prompt(distance_km, avg_kmpl);

        match self.run(TRIP_SYSTEM_INSTRUCTION, &user_prompt).await {
            Ok(text) => AnalysisOutcome::generated(text),
            Err(e) => {
                warn!("Trip estimate unavailable: {}", e);
                AnalysisOutcome::fallback(TRIP_APOLOGY)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::derivation::derive_for_display;
    use crate::domain::seed::seed_entries;
    use crate::domain::statistics::{filter_by_month, MonthFilter, MonthKey};
    use std::sync::Mutex;
    use tokio::sync::Notify;

    /// Records prompts and answers with a fixed result
    struct ScriptedGenerator {
        reply: Result<String, GenerationError>,
        prompts: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedGenerator {
        fn new(reply: Result<String, GenerationError>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GenerationError> {
            self.prompts
                .lock()
                .unwrap()
                .push((system_prompt.to_string(), user_prompt.to_string()));
            self.reply.clone()
        }
    }

    /// Blocks inside `generate` until released
    struct GatedGenerator {
        started: Notify,
        release: Notify,
    }

    #[async_trait]
    impl TextGenerator for GatedGenerator {
        async fn generate(&self, _: &str, _: &str) -> Result<String, GenerationError> {
            self.started.notify_one();
            self.release.notified().await;
            Ok("<p>ok</p>".to_string())
        }
    }

    fn may_entries() -> Vec<ProcessedFuelEntry> {
        let month = MonthKey::new(2024, 5).unwrap();
        filter_by_month(&derive_for_display(&seed_entries()), MonthFilter::Month(month))
    }

    #[test]
    fn test_data_summary_shape() {
        let summary = AnalysisService::data_summary(&may_entries());
        assert_eq!(
            summary,
            r#"[{"dia":29,"gasto":"273.82","media_km_l":"0.0","combustivel":"GASOLINA"},{"dia":22,"gasto":"50.00","media_km_l":"22.7","combustivel":"GASOLINA"}]"#
        );
    }

    #[tokio::test]
    async fn test_analyze_month_returns_generated_text() {
        let generator = ScriptedGenerator::new(Ok("<p>Resumo</p>".to_string()));
        let service = AnalysisService::new(generator.clone());

        let outcome = service.analyze_month(&may_entries(), "maio").await;
        assert_eq!(outcome, AnalysisOutcome::generated("<p>Resumo</p>".to_string()));

        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, ANALYSIS_SYSTEM_INSTRUCTION);
        assert!(calls[0].1.starts_with("Aqui estão os dados de abastecimento para maio:\n\n[{\"dia\":29"));
        assert!(calls[0].1.contains("\n4. Uma dica prática"));
    }

    #[tokio::test]
    async fn test_generation_failure_becomes_apology() {
        let generator = ScriptedGenerator::new(Err(GenerationError::Status(500, "boom".to_string())));
        let service = AnalysisService::new(generator);

        let outcome = service.analyze_month(&may_entries(), "maio").await;
        assert_eq!(outcome.text, ANALYSIS_APOLOGY);
        assert!(!outcome.generated);

        let outcome = service.estimate_trip(300, 12.5).await;
        assert_eq!(outcome.text, TRIP_APOLOGY);
    }

    #[tokio::test]
    async fn test_blank_generation_becomes_apology() {
        let service = AnalysisService::new(ScriptedGenerator::new(Ok("  ".to_string())));
        assert_eq!(service.estimate_trip(300, 12.5).await.text, TRIP_APOLOGY);
    }

    #[tokio::test]
    async fn test_trip_with_zero_distance_skips_generator() {
        let generator = ScriptedGenerator::new(Ok("never".to_string()));
        let service = AnalysisService::new(generator.clone());

        let outcome = service.estimate_trip(0, 12.5).await;
        assert_eq!(outcome.text, INVALID_DISTANCE_MESSAGE);
        assert!(generator.calls().is_empty());
    }

    #[tokio::test]
    async fn test_trip_prompt_uses_distance_and_efficiency() {
        let generator = ScriptedGenerator::new(Ok("<p>R$ 139,20</p>".to_string()));
        let service = AnalysisService::new(generator.clone());

        service.estimate_trip(300, 12.5).await;
        let calls = generator.calls();
        assert_eq!(calls[0].0, TRIP_SYSTEM_INSTRUCTION);
        assert!(calls[0]
            .1
            .starts_with("Preciso estimar o custo de uma viagem de 300 km. O consumo médio do meu carro é de 12.5 km/L."));
    }

    #[tokio::test]
    async fn test_concurrent_request_is_rejected_while_busy() {
        let generator = Arc::new(GatedGenerator {
            started: Notify::new(),
            release: Notify::new(),
        });
        let service = Arc::new(AnalysisService::new(generator.clone()));

        let first = {
            let service = service.clone();
            tokio::spawn(async move { service.estimate_trip(100, 10.0).await })
        };
        generator.started.notified().await;

        let second = service.estimate_trip(100, 10.0).await;
        assert_eq!(second, AnalysisOutcome::fallback(TRIP_APOLOGY));

        generator.release.notify_one();
        let first = first.await.unwrap();
        assert!(first.generated);

        // the flag is cleared once the first request finishes
        let third = {
            let service = service.clone();
            tokio::spawn(async move { service.estimate_trip(100, 10.0).await })
        };
        generator.started.notified().await;
        generator.release.notify_one();
        assert!(third.await.unwrap().generated);
    }
}
