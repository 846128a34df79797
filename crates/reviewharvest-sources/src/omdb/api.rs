use async_trait::async_trait;
use reqwest::Client;
use reviewharvest_models::MovieMetadata;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::http::{build_http_client, default_user_agent, fetch_text, normalize_base_url, DEFAULT_TIMEOUT};
use crate::traits::MetadataSource;

pub const OMDB_BASE_URL: &str = "http://www.omdbapi.com/";

/// Turn a free-text title into a `+`-joined query token.
///
/// Every run of characters other than ASCII letters, digits, `'` and `-`
/// collapses into a single `+`.
pub fn sanitize_title(title: &str) -> String {
    let mut sanitized = String::with_capacity(title.len());
    let mut in_run = false;
    for c in title.chars() {
        if c.is_ascii_alphanumeric() || c == '\'' || c == '-' {
            sanitized.push(c);
            in_run = false;
        } else if !in_run {
            sanitized.push('+');
            in_run = true;
        }
    }
    sanitized
}

/// OMDb JSON API client
#[derive(Debug, Clone)]
pub struct OmdbSource {
    http: Client,
    base_url: String,
    api_key: String,
}

impl OmdbSource {
    pub fn new(api_key: impl Into<String>) -> Result<Self, SourceError> {
        let http = build_http_client(&default_user_agent(), DEFAULT_TIMEOUT)?;
        Self::with_client(http, OMDB_BASE_URL, api_key)
    }

    pub fn with_client(http: Client, base_url: &str, api_key: impl Into<String>) -> Result<Self, SourceError> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            api_key: api_key.into(),
        })
    }

    pub fn from_settings(
        base_url: &str,
        api_key: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, SourceError> {
        let http = build_http_client(user_agent, timeout)?;
        Self::with_client(http, base_url, api_key)
    }

    /// Point the source at another host, keeping the HTTP client and key
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, SourceError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    pub fn lookup_url(&self, title: &str) -> String {
        format!(
            "{}/?t={}&apikey={}&plot=full&r=json",
            self.base_url,
            sanitize_title(title),
            urlencoding::encode(&self.api_key)
        )
    }

    pub async fn fetch(&self, title: &str) -> Result<MovieMetadata, SourceError> {
        let url = self.lookup_url(title);
        debug!(title = %title, "Looking up movie metadata");

        let body = fetch_text(&self.http, &url).await.map_err(redact_error)?;
        let metadata: MovieMetadata = serde_json::from_str(&body).map_err(|e| SourceError::Decode {
            url: redact_api_key(&url),
            message: e.to_string(),
        })?;

        if metadata.is_error_response() {
            let message = metadata.error.unwrap_or_else(|| "unknown error".to_string());
            warn!(title = %title, error = %message, "OMDb lookup failed");
            return Err(SourceError::Api(message));
        }

        Ok(metadata)
    }
}

#[async_trait]
impl MetadataSource for OmdbSource {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn lookup(&self, title: &str) -> Result<MovieMetadata, SourceError> {
        self.fetch(title).await
    }
}

/// Keep the API key out of error messages and logs
fn redact_error(error: SourceError) -> SourceError {
    match error {
        SourceError::Http { url, mut source } => {
            if let Some(u) = source.url_mut() {
                u.set_query(None);
            }
            SourceError::Http {
                url: redact_api_key(&url),
                source,
            }
        }
        SourceError::Status { url, status } => SourceError::Status {
            url: redact_api_key(&url),
            status,
        },
        other => other,
    }
}

fn redact_api_key(url: &str) -> String {
    match url.find("apikey=") {
        Some(start) => {
            let value_start = start + "apikey=".len();
            let value_end = url[value_start..]
                .find('&')
                .map(|i| value_start + i)
                .unwrap_or(url.len());
            format!("{}***{}", &url[..value_start], &url[value_end..])
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("The Matrix"), "The+Matrix");
        assert_eq!(sanitize_title("rambo"), "rambo");
        assert_eq!(sanitize_title("Schindler's List"), "Schindler's+List");
        assert_eq!(sanitize_title("Spider-Man: Far  From Home"), "Spider-Man+Far+From+Home");
        assert_eq!(sanitize_title("Amélie!"), "Am+lie+");
    }

    #[test]
    fn test_lookup_url() {
        let source = OmdbSource::with_client(Client::new(), OMDB_BASE_URL, "k3y").unwrap();
        assert_eq!(
            source.lookup_url("The Matrix"),
            "http://www.omdbapi.com/?t=The+Matrix&apikey=k3y&plot=full&r=json"
        );
    }

    #[test]
    fn test_redact_api_key() {
        assert_eq!(
            redact_api_key("http://x/?t=A&apikey=secret&plot=full"),
            "http://x/?t=A&apikey=***&plot=full"
        );
        assert_eq!(redact_api_key("http://x/?t=A"), "http://x/?t=A");
    }
}
