use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("OMDb returned an error: {0}")]
    Api(String),

    #[error("field '{0}' is missing from the metadata document")]
    MissingField(&'static str),

    #[error("rating '{0}' is not a number")]
    InvalidRating(String),

    #[error("invalid selector '{selector}': {message}")]
    Selector {
        selector: &'static str,
        message: String,
    },

    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl SourceError {
    pub fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        SourceError::Http {
            url: url.into(),
            source,
        }
    }

    /// Network or HTTP-level failure, as opposed to missing or malformed data
    pub fn is_transport(&self) -> bool {
        matches!(self, SourceError::Http { .. } | SourceError::Status { .. })
    }
}
