//! # File Storage
//!
//! Flat-file storage in a single data directory: fill-ups in a CSV file and the
//! maintenance record in a YAML file.

pub mod connection;
pub mod fuel_entry_repository;
pub mod maintenance_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::CsvConnection;
pub use fuel_entry_repository::FuelEntryRepository;
pub use maintenance_repository::MaintenanceRepository;
