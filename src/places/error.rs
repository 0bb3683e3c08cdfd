//! Places API-specific error types.

/// Errors that can occur while talking to the places API.
#[derive(Debug, thiserror::Error)]
pub enum PlacesError {
    /// Transport-level failure
    #[error("Places request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-OK status field
    #[error("Places API returned status {status}")]
    ApiStatus { status: String },

    /// Response body could not be interpreted
    #[error("Failed to parse places response: {0}")]
    ParseFailed(String),
}
