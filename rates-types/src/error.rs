//! Error types for the exchange rates service.

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,
}

/// Upstream rate source errors.
///
/// Any of these aborts the current ingestion cycle only.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Unexpected response status: {0}")]
    Status(u16),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Failure of a whole ingestion cycle.
///
/// Per-record insert failures are not part of this type: they are logged
/// and skipped.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Failed to fetch rates: {0}")]
    Fetch(#[from] SourceError),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("No rate for this currency and date".into()),
            RepoError::Database(e) => AppError::Internal(e),
        }
    }
}
