//! Error types for the remote collaborators and the project store.
//!
//! None of these reach the user: the dispatcher logs them and degrades to a
//! local default.

use std::time::Duration;

/// Failure of a remote adapter call
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error("transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("upstream returned status {0}")]
    Status(u16),
    #[error("no response within {0:?}")]
    Timeout(Duration),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Failure of the project store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("project '{0}' not found")]
    NotFound(String),
    #[error("failed to persist projects: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid project data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Run `fut` with an upper bound on its duration
pub async fn with_timeout<T, F>(limit: Duration, fut: F) -> Result<T, AdapterError>
where
    F: std::future::Future<Output = Result<T, AdapterError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(AdapterError::Timeout(limit)),
    }
}
