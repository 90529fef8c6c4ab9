use thiserror::Error;

/// Fetch failure at a source boundary.
///
/// Any of these aborts the whole run: the pipeline produces no partial
/// report when one backend cannot be read.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network-level failure, including a request exceeding its timeout.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-2xx status.
    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The body did not have the structure this source is expected to return.
    #[error("unexpected payload from {url}: {reason}")]
    Payload { url: String, reason: String },
}

impl FetchError {
    pub(crate) fn payload(url: &str, reason: impl Into<String>) -> Self {
        FetchError::Payload {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// Source fetch result type.
pub type Result<T> = std::result::Result<T, FetchError>;
