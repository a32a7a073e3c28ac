//! Failure taxonomy for calls to the observations API.

/// Result type for upstream fetches.
pub type FetchResult<T> = Result<T, FetchError>;

/// Why a fetch did not produce a batch.
///
/// Errors are `Clone` so in-memory sources can replay the same failure
/// for every matching query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The API answered with a non-2xx status.
    /// Status and body are passed through untouched.
    #[error("iNaturalist API error: {body}")]
    Upstream { status: u16, body: String },

    /// The API could not be reached (DNS, refused connection, timeout).
    #[error("Failed to connect to iNaturalist API: {0}")]
    Unavailable(String),

    /// Anything else, e.g. an undecodable response body.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl FetchError {
    pub fn upstream(status: u16, body: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            body: body.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() || err.is_builder() {
            return FetchError::internal(err.to_string());
        }
        if let Some(status) = err.status() {
            return FetchError::upstream(status.as_u16(), err.to_string());
        }
        // Connect, timeout, request and body errors are all transport failures.
        FetchError::unavailable(err.to_string())
    }
}
