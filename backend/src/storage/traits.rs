//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::fuel_entry::RawFuelEntry;
use crate::domain::models::maintenance::MaintenanceData;

/// Trait defining the interface for fill-up storage operations
///
/// The store is always read and written as a whole set; there is no per-entry query.
#[async_trait]
pub trait FuelEntryStorage: Send + Sync {
    /// Load every stored fill-up.
    /// Returns `Ok(None)` when nothing has been stored yet.
    async fn load_entries(&self) -> Result<Option<Vec<RawFuelEntry>>>;

    /// Replace the stored fill-ups with the given set
    async fn save_entries(&self, entries: &[RawFuelEntry]) -> Result<()>;
}

/// Trait defining the interface for the maintenance record
#[async_trait]
pub trait MaintenanceStorage: Send + Sync {
    /// Returns `Ok(None)` when no record has been stored yet
    async fn load_maintenance(&self) -> Result<Option<MaintenanceData>>;

    async fn save_maintenance(&self, data: &MaintenanceData) -> Result<()>;
}

/// Trait defining the interface for storage connections
///
/// This trait abstracts away the specific connection type and provides factory
/// methods for creating repositories, so the domain layer works with any storage
/// backend without knowing the implementation details.
pub trait Connection: Send + Sync + Clone {
    type FuelEntryRepository: FuelEntryStorage;
    type MaintenanceRepository: MaintenanceStorage;

    fn create_fuel_entry_repository(&self) -> Self::FuelEntryRepository;

    fn create_maintenance_repository(&self) -> Self::MaintenanceRepository;
}
