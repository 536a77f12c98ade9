//! Error types for exploration operations
//!
//! One taxonomy covers the whole pipeline: range validation, the search and
//! detail calls against the collection API, and per-artwork normalization.
//! Where an error surfaces decides how loud it is: search-step failures end
//! the exploration with a notice, per-artwork failures are skipped.

use thiserror::Error;

use crate::explorer::UserNotice;

/// Result type alias for exploration operations
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Error types for exploration operations
#[derive(Debug, Clone, Error)]
pub enum ExplorerError {
    /// Year range inverted after clamping to the searchable bounds
    #[error("Invalid year range: {min_year} is after {max_year}")]
    InvalidRange { min_year: i32, max_year: i32 },

    /// Operation superseded by a newer exploration or explicitly aborted
    #[error("Cancelled operation: {0}")]
    Cancelled(String),

    /// Collection API answered with a non-success status
    #[error("HTTP status {status} from request to '{url}'")]
    Remote { status: u16, url: String },

    /// Transport, decoding or task failure
    #[error("{0}")]
    Unknown(String),

    /// A single artwork record could not be normalized
    #[error("Malformed resource: {0}")]
    MalformedResource(String),
}

impl From<reqwest::Error> for ExplorerError {
    fn from(error: reqwest::Error) -> Self {
        match (error.status(), error.url()) {
            (Some(status), Some(url)) => ExplorerError::Remote {
                status: status.as_u16(),
                url: url.to_string(),
            },
            _ => ExplorerError::Unknown(format!("Request failed: {error}")),
        }
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(error: serde_json::Error) -> Self {
        ExplorerError::Unknown(format!("Failed to decode response: {error}"))
    }
}

impl From<anyhow::Error> for ExplorerError {
    fn from(error: anyhow::Error) -> Self {
        // Use {:#} to preserve full error chain with context
        ExplorerError::Unknown(format!("{error:#}"))
    }
}

impl ExplorerError {
    /// Check if this is a cancellation rather than a failure
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ExplorerError::Cancelled(_))
    }

    /// Check if error is transient (the user may simply try again)
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ExplorerError::Remote { .. } | ExplorerError::Unknown(_)
        )
    }

    /// Notice shown when this error ends an exploration's search step
    #[must_use]
    pub fn notice(&self) -> UserNotice {
        match self {
            ExplorerError::Cancelled(_) => UserNotice::Cancelled,
            ExplorerError::InvalidRange { .. } | ExplorerError::MalformedResource(_) => {
                UserNotice::None
            }
            ExplorerError::Remote { .. } | ExplorerError::Unknown(_) => {
                UserNotice::TransientError
            }
        }
    }
}
