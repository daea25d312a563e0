use reelnotes_models::InvalidMovieId;
use thiserror::Error;

/// Why a lookup against the movie source failed
///
/// Callers that only care about "found or not" can treat every variant the
/// same way; the variants exist so the cause can be logged.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("search query is empty")]
    EmptyQuery,

    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("page has no {0}")]
    MissingElement(&'static str),

    #[error("structured data is invalid: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("unsupported duration '{0}'")]
    InvalidDuration(String),

    #[error(transparent)]
    InvalidIdentifier(#[from] InvalidMovieId),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl SourceError {
    pub(crate) fn from_request(url: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            SourceError::Timeout { url: url.to_string() }
        } else {
            SourceError::Request {
                url: url.to_string(),
                source,
            }
        }
    }

    /// True when the page was reached but did not have the expected shape
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            SourceError::MissingElement(_)
                | SourceError::InvalidPayload(_)
                | SourceError::InvalidDuration(_)
                | SourceError::InvalidIdentifier(_)
        )
    }
}
