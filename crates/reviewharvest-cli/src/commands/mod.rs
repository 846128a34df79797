pub mod config;
pub mod harvest;
pub mod info;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use reviewharvest_config::{Config, CredentialStore, PathManager, OMDB_API_KEY_ENV};
use reviewharvest_sources::{ImdbReviewSource, OmdbSource};
use std::time::Duration;

/// Config, credentials and paths loaded once per command
pub struct Settings {
    pub paths: PathManager,
    pub config: Config,
    pub credentials: CredentialStore,
}

pub fn load_settings() -> Result<Settings> {
    let paths = PathManager::default();

    let config_file = paths.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;

    let credentials_file = paths.credentials_file();
    let mut credentials = CredentialStore::new(credentials_file.clone());
    credentials
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    Ok(Settings {
        paths,
        config,
        credentials,
    })
}

impl Settings {
    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.imdb.timeout_seconds)
    }

    pub fn omdb_api_key(&self, explicit: Option<&str>) -> Result<String> {
        self.credentials
            .resolve_omdb_api_key(explicit)
            .ok_or_else(|| {
                eyre!(
                    "No OMDb API key configured. Pass --api-key, set {} or run 'reviewharvest config omdb'",
                    OMDB_API_KEY_ENV
                )
            })
    }

    pub fn omdb_source(&self, api_key: String) -> Result<OmdbSource> {
        OmdbSource::from_settings(
            &self.config.omdb.base_url,
            api_key,
            &self.config.imdb.user_agent,
            self.timeout(),
        )
        .map_err(|e| eyre!("Failed to create OMDb client: {}", e))
    }

    pub fn imdb_source(&self) -> Result<ImdbReviewSource> {
        let imdb = &self.config.imdb;
        let source = ImdbReviewSource::from_settings(&imdb.base_url, &imdb.user_agent, self.timeout())
            .map_err(|e| eyre!("Failed to create IMDb client: {}", e))?;
        Ok(source
            .with_collision_policy(imdb.collision_policy)
            .with_max_stalled_pages(imdb.max_stalled_pages))
    }
}
