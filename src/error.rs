use thiserror::Error;

/// Errors surfaced by the record-set and changeset operations.
///
/// An absent record is not an error: readers return `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Record already exists: {0}")]
    Conflict(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    /// A key the backend was required to hold is missing. Record lookups
    /// and removals never return this; an absent record is `Ok(None)`.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
