use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the stored OMDb API key
pub const OMDB_API_KEY_ENV: &str = "OMDB_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
struct Credentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    omdb_api_key: Option<String>,
}

/// Secrets kept apart from config.toml so the config can be shared
pub struct CredentialStore {
    path: PathBuf,
    credentials: Credentials,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: Credentials::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the file if present; a missing file leaves the store empty
    pub fn load(&mut self) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        self.credentials =
            toml::from_str(&content).with_context(|| format!("parsing {}", self.path.display()))?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, toml::to_string_pretty(&self.credentials)?)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    pub fn omdb_api_key(&self) -> Option<&str> {
        self.credentials.omdb_api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn set_omdb_api_key(&mut self, api_key: String) {
        self.credentials.omdb_api_key = Some(api_key);
    }

    pub fn clear_omdb_api_key(&mut self) {
        self.credentials.omdb_api_key = None;
    }

    /// Resolve the OMDb key: explicit value, then environment, then stored credentials
    pub fn resolve_omdb_api_key(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| std::env::var(OMDB_API_KEY_ENV).ok().filter(|k| !k.is_empty()))
            .or_else(|| self.omdb_api_key().map(str::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("credentials.toml");

        let mut store = CredentialStore::new(path.clone());
        store.set_omdb_api_key("abc123".to_string());
        store.save().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), r#"omdb_api_key = "abc123""#);

        let mut reloaded = CredentialStore::new(path);
        reloaded.load().unwrap();
        assert_eq!(reloaded.omdb_api_key(), Some("abc123"));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::new(dir.path().join("missing.toml"));
        store.load().unwrap();
        assert!(store.omdb_api_key().is_none());
    }

    #[test]
    fn test_load_rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.toml");
        std::fs::write(&path, "omdb_api_key = [").unwrap();

        let mut store = CredentialStore::new(path);
        assert!(store.load().is_err());
    }

    #[test]
    fn test_explicit_key_wins() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.set_omdb_api_key("stored".to_string());
        assert_eq!(store.resolve_omdb_api_key(Some("flag")), Some("flag".to_string()));

        store.clear_omdb_api_key();
        assert!(store.omdb_api_key().is_none());
    }

    #[test]
    fn test_empty_stored_key_counts_as_unset() {
        let dir = TempDir::new().unwrap();
        let mut store = CredentialStore::new(dir.path().join("credentials.toml"));
        store.set_omdb_api_key(String::new());
        assert!(store.omdb_api_key().is_none());
    }
}
