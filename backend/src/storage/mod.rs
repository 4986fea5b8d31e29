//! # Storage Module
//!
//! Handles data persistence for the fuel tracker.
//!
//! The domain layer only sees the traits in [`traits`]; the file-based
//! implementation in [`csv`] can be swapped out without touching domain logic.
//!
//! ## Current Implementation
//!
//! - **Fill-ups**: `fuel_entries.csv`, rewritten as a whole on every save
//! - **Maintenance**: `maintenance.yaml`
//! - **Writes**: temp file then rename, so a crash never leaves a half-written file

pub mod csv;
pub mod traits;

pub use traits::{Connection, FuelEntryStorage, MaintenanceStorage};
