use anyhow::{anyhow, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use crate::storage::csv::fuel_entry_repository::FuelEntryRepository;
use crate::storage::csv::maintenance_repository::MaintenanceRepository;
use crate::storage::traits::Connection;

const ENTRIES_FILE: &str = "fuel_entries.csv";
const MAINTENANCE_FILE: &str = "maintenance.yaml";
const DEFAULT_DIRECTORY_NAME: &str = "Fuel Tracker";

/// CsvConnection manages the data directory and the files inside it
#[derive(Clone, Debug)]
pub struct CsvConnection {
    base_directory: PathBuf,
}

impl CsvConnection {
    /// Create a new CSV connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new CSV connection in the default data directory (~/Documents/Fuel Tracker)
    pub fn new_default() -> Result<Self> {
        Self::new(Self::default_directory()?)
    }

    pub fn default_directory() -> Result<PathBuf> {
        dirs::document_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join(DEFAULT_DIRECTORY_NAME))
            .ok_or_else(|| anyhow!("Could not determine a documents or home directory"))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    pub fn entries_file_path(&self) -> PathBuf {
        self.base_directory.join(ENTRIES_FILE)
    }

    pub fn maintenance_file_path(&self) -> PathBuf {
        self.base_directory.join(MAINTENANCE_FILE)
    }

    /// Replace a file's contents via a temp file and rename
    pub fn write_atomically(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if !self.base_directory.exists() {
            fs::create_dir_all(&self.base_directory)?;
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)?;
        fs::rename(&temp_path, path)?;

        debug!("Wrote {} bytes to {}", contents.len(), path.display());
        Ok(())
    }
}

impl Connection for CsvConnection {
    type FuelEntryRepository = FuelEntryRepository;
    type MaintenanceRepository = MaintenanceRepository;

    fn create_fuel_entry_repository(&self) -> Self::FuelEntryRepository {
        FuelEntryRepository::new(self.clone())
    }

    fn create_maintenance_repository(&self) -> Self::MaintenanceRepository {
        MaintenanceRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;

    #[tokio::test]
    async fn test_new_creates_missing_directory() {
        let env = TestEnvironment::new().await.unwrap();
        let nested = env.base_directory().join("nested").join("data");
        let connection = CsvConnection::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(connection.entries_file_path(), nested.join("fuel_entries.csv"));
        assert_eq!(connection.maintenance_file_path(), nested.join("maintenance.yaml"));
    }

    #[tokio::test]
    async fn test_write_atomically_leaves_no_temp_file() {
        let env = TestEnvironment::new().await.unwrap();
        let path = env.connection.entries_file_path();
        env.connection.write_atomically(&path, b"first").unwrap();
        env.connection.write_atomically(&path, b"second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert!(!path.with_extension("tmp").exists());
    }
}
