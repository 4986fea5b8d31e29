//! # REST API Interface Layer
//!
//! Provides HTTP REST endpoints for the fuel tracker.
//! This layer handles:
//! - JSON request/response serialization
//! - Translation between `shared` DTOs and domain commands
//! - Error translation from domain to HTTP status codes
//!
//! ## Design Principles
//!
//! - **Domain Separation**: Pure translation layer without business logic
//! - **Request Logging**: Every handler logs its method and path
//! - **Lenient Forms**: Numeric form fields are passed through as text and coerced
//!   by the domain, so malformed numbers never produce a 4xx

pub mod analysis_apis;
pub mod entry_apis;
pub mod error;
pub mod export_apis;
pub mod maintenance_apis;
pub mod mappers;
pub mod stats_apis;

#[cfg(test)]
pub mod test_support;

pub use analysis_apis::*;
pub use entry_apis::*;
pub use export_apis::*;
pub use maintenance_apis::*;
pub use stats_apis::*;
