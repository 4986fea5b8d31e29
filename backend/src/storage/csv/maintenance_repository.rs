//! # YAML Maintenance Repository
//!
//! Stores the last-service odometer readings in `{data_directory}/maintenance.yaml`.
//!
//! ```yaml
//! oil: 130000
//! tires: 110000
//! engine: 90000
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::fs;

use super::connection::CsvConnection;
use crate::domain::models::maintenance::MaintenanceData;
use crate::storage::traits::MaintenanceStorage;

/// YAML-based maintenance record repository
#[derive(Clone)]
pub struct MaintenanceRepository {
    connection: CsvConnection,
}

impl MaintenanceRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl MaintenanceStorage for MaintenanceRepository {
    async fn load_maintenance(&self) -> Result<Option<MaintenanceData>> {
        let yaml_path = self.connection.maintenance_file_path();
        if !yaml_path.exists() {
            debug!("No maintenance record at {}", yaml_path.display());
            return Ok(None);
        }

        let yaml_content = fs::read_to_string(&yaml_path)?;
        let data: MaintenanceData = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("failed to parse {}", yaml_path.display()))?;

        debug!("Loaded maintenance record: {:?}", data);
        Ok(Some(data))
    }

    async fn save_maintenance(&self, data: &MaintenanceData) -> Result<()> {
        let yaml_path = self.connection.maintenance_file_path();
        let yaml_content = serde_yaml::to_string(data)?;
        self.connection
            .write_atomically(&yaml_path, yaml_content.as_bytes())?;

        info!(
            "Saved maintenance record (oil: {}, tires: {}, engine: {})",
            data.oil, data.tires, data.engine
        );
        Ok(())
    }
}
