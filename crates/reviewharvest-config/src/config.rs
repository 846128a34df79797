use reviewharvest_models::CollisionPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OMDB_BASE_URL: &str = "http://www.omdbapi.com/";
pub const DEFAULT_IMDB_BASE_URL: &str = "https://www.imdb.com";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub imdb: ImdbConfig,
    #[serde(default)]
    pub harvest: HarvestOptions,
}

/// The API key is not part of the config, it lives in credentials.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct OmdbConfig {
    #[serde(default = "default_omdb_base_url")]
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImdbConfig {
    #[serde(default = "default_imdb_base_url")]
    pub base_url: String,
    /// Pages in a row without a new review before the harvest stops
    #[serde(default = "default_max_stalled_pages")]
    pub max_stalled_pages: usize,
    #[serde(default)]
    pub collision_policy: CollisionPolicy,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HarvestOptions {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_separator")]
    pub separator: char,
    /// Results are only written when strictly more reviews than this were collected
    #[serde(default = "default_min_reviews")]
    pub min_reviews: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

fn default_omdb_base_url() -> String {
    DEFAULT_OMDB_BASE_URL.to_string()
}

fn default_imdb_base_url() -> String {
    DEFAULT_IMDB_BASE_URL.to_string()
}

fn default_max_stalled_pages() -> usize {
    5
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("reviewharvest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_limit() -> usize {
    1000
}

fn default_separator() -> char {
    '~'
}

fn default_min_reviews() -> usize {
    200
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_omdb_base_url(),
        }
    }
}

impl Default for ImdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_imdb_base_url(),
            max_stalled_pages: default_max_stalled_pages(),
            collision_policy: CollisionPolicy::default(),
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for HarvestOptions {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            separator: default_separator(),
            min_reviews: default_min_reviews(),
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [("omdb.base_url", &self.omdb.base_url), ("imdb.base_url", &self.imdb.base_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!("{} must be an http(s) URL, got '{}'", name, url));
            }
        }

        if self.imdb.max_stalled_pages == 0 {
            return Err(anyhow::anyhow!("imdb.max_stalled_pages must be at least 1"));
        }

        if self.imdb.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("imdb.timeout_seconds must be at least 1"));
        }

        if !self.harvest.separator.is_ascii() || self.harvest.separator.is_ascii_control() {
            return Err(anyhow::anyhow!(
                "harvest.separator must be a printable ASCII character, got {:?}",
                self.harvest.separator
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_demo_values() {
        let config = Config::default();
        assert_eq!(config.harvest.limit, 1000);
        assert_eq!(config.harvest.separator, '~');
        assert_eq!(config.harvest.min_reviews, 200);
        assert_eq!(config.imdb.collision_policy, CollisionPolicy::KeepFirst);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [harvest]
            limit = 50

            [imdb]
            collision_policy = "overwrite"
            "#,
        )
        .unwrap();

        assert_eq!(config.harvest.limit, 50);
        assert_eq!(config.harvest.separator, '~');
        assert_eq!(config.imdb.collision_policy, CollisionPolicy::Overwrite);
        assert_eq!(config.omdb.base_url, DEFAULT_OMDB_BASE_URL);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.harvest.limit = 25;
        config.imdb.max_stalled_pages = 3;
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert_eq!(loaded.harvest.limit, 25);
        assert_eq!(loaded.imdb.max_stalled_pages, 3);
    }

    #[test]
    fn test_omdb_section_refuses_api_key() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [omdb]
            api_key = "secret"
            "#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("api_key"), "unexpected error: {}", err);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.harvest.limit, 1000);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.imdb.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.imdb.max_stalled_pages = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.harvest.separator = 'é';
        assert!(config.validate().is_err());
    }
}
