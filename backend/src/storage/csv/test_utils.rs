/// Test utilities for storage-backed tests
///
/// Each environment owns a temporary data directory that is removed when the
/// environment is dropped, even if the test panics.
use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::CsvConnection;

/// RAII test environment around a temporary data directory
pub struct TestEnvironment {
    /// Kept alive until drop so the directory is not removed early
    _temp_dir: TempDir,
    pub connection: CsvConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = CsvConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new().await?;
            base_path = env.base_directory().to_path_buf();
            assert!(base_path.exists());
            std::fs::write(base_path.join("fuel_entries.csv"), "id\n")?;
        }

        assert!(!base_path.exists());
        Ok(())
    }
}
