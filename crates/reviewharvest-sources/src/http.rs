use reqwest::{Client, Url};
use std::time::Duration;

use crate::error::SourceError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub fn default_user_agent() -> String {
    format!("reviewharvest/{}", env!("CARGO_PKG_VERSION"))
}

pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, SourceError> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(SourceError::Client)
}

/// Validate a base URL and strip trailing slashes so paths can be appended
pub fn normalize_base_url(base_url: &str) -> Result<String, SourceError> {
    let parsed = Url::parse(base_url).map_err(|_| SourceError::InvalidBaseUrl(base_url.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(SourceError::InvalidBaseUrl(base_url.to_string()));
    }
    Ok(base_url.trim_end_matches('/').to_string())
}

/// GET a URL and return the body, treating non-2xx statuses as errors
pub async fn fetch_text(client: &Client, url: &str) -> Result<String, SourceError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SourceError::http(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(SourceError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| SourceError::http(url, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("https://www.imdb.com/").unwrap(), "https://www.imdb.com");
        assert_eq!(normalize_base_url("http://127.0.0.1:8080").unwrap(), "http://127.0.0.1:8080");
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(SourceError::InvalidBaseUrl(_))
        ));
        assert!(normalize_base_url("ftp://example.com").is_err());
    }
}
