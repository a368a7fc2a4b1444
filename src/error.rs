/// Failures surfaced by the results backend clients.
///
/// Parse failures of individual timestamps or values never show up here; those
/// are recovered inside the normalization functions.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {message}")]
    Network { url: String, message: String },

    #[error("Backend returned HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from {url}: {message}")]
    Body { url: String, message: String },

    #[error("Unexpected response shape from {url}: {source}")]
    Parsing {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Admin authentication failed: {0}")]
    Unauthorized(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ApiError {
    /// Map a ureq failure for `url` into the matching variant.
    pub(crate) fn from_ureq(url: &str, err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => ApiError::Status { url: url.to_string(), status },
            other => ApiError::Network { url: url.to_string(), message: other.to_string() },
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
