//! # Domain Module
//!
//! Contains all business logic for the fuel tracker.
//!
//! This module turns a log of fill-ups into trip segments, efficiency figures,
//! monthly statistics and maintenance reminders. It operates independently of
//! any UI framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **derivation**: Orders raw fill-ups and derives segment distance and km/L
//! - **statistics**: Totals and averages, month grouping, month summaries
//! - **maintenance_service**: Due / warning / overdue status per service category
//! - **mileage**: Current odometer reading
//! - **export_service**: CSV export of the raw log
//! - **entry_form**: Lenient coercion of user-entered form values
//! - **fuel_service**: The entry store and every operation on it
//! - **analysis_service**: Generated month analysis and trip estimates
//!
//! ## Business Rules
//!
//! - Fill-ups are ordered by date, then odometer reading
//! - A segment runs from one fill-up to the next; the latest fill-up has none yet
//! - Non-increasing odometer readings yield zero distance, never an error
//! - Efficiency averages only count fill-ups with a known segment
//! - Malformed numbers become zero; a malformed date is rejected

pub mod analysis_service;
pub mod commands;
pub mod derivation;
pub mod entry_form;
pub mod error;
pub mod export_service;
pub mod fuel_service;
pub mod maintenance_service;
pub mod mileage;
pub mod models;
pub mod seed;
pub mod statistics;

pub use analysis_service::{AnalysisOutcome, AnalysisService, GenerationError, TextGenerator};
pub use error::DomainError;
pub use fuel_service::FuelService;
