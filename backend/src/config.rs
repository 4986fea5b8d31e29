//! # Configuration
//!
//! Process configuration read from the environment. An optional `.env` file is
//! loaded by the binary before [`AppConfig::from_env`] runs.
//!
//! Every setting has a default; a malformed value is logged and replaced by that
//! default so a typo never keeps the server from starting.

use log::warn;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use crate::storage::csv::CsvConnection;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_TIMEOUT_SECS: u64 = 30;
const FALLBACK_DATA_DIR: &str = "./fuel-tracker-data";

/// Settings for the text-generation client
#[derive(Debug, Clone, PartialEq)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
    pub gemini: GeminiConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let data_dir = value("FUEL_TRACKER_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(default_data_dir);

        Self {
            data_dir,
            bind_addr: parse_or_default(
                "FUEL_TRACKER_BIND_ADDR",
                value("FUEL_TRACKER_BIND_ADDR"),
                default_bind_addr(),
            ),
            cors_origin: value("FUEL_TRACKER_CORS_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            gemini: GeminiConfig {
                api_key: value("GEMINI_API_KEY"),
                model: value("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
                timeout_secs: parse_or_default(
                    "GEMINI_TIMEOUT_SECS",
                    value("GEMINI_TIMEOUT_SECS"),
                    DEFAULT_GEMINI_TIMEOUT_SECS,
                ),
            },
        }
    }
}

fn default_data_dir() -> PathBuf {
    CsvConnection::default_directory().unwrap_or_else(|e| {
        warn!("{}; using {}", e, FALLBACK_DATA_DIR);
        PathBuf::from(FALLBACK_DATA_DIR)
    })
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn parse_or_default<T: FromStr>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("Ignoring malformed {}='{}', using the default", name, raw);
            default
        }),
    }
}
