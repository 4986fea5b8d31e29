use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Fuel entry not found: {0}")]
    EntryNotFound(String),

    #[error("No active session; storage is unavailable")]
    SessionInactive,

    #[error("There is no data to export")]
    NothingToExport,
}
