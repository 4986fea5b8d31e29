//! # IO Module
//!
//! Interfaces between the domain and the outside world: the REST API consumed by
//! the UI and the outbound client for the text-generation service.

pub mod gemini;
pub mod rest;

pub use gemini::GeminiClient;
