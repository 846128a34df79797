use anyhow::Result;
use std::path::{Path, PathBuf};

/// Overrides the base directory for config, credentials and logs
pub const HOME_ENV: &str = "REVIEWHARVEST_HOME";

/// Locations of reviewharvest's own files.
///
/// Everything lives under one base directory: `$REVIEWHARVEST_HOME` when set,
/// otherwise `<platform config dir>/reviewharvest`.
#[derive(Debug, Clone)]
pub struct PathManager {
    base: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_base(PathBuf::from(home)));
        }

        let base = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reviewharvest");
        Ok(Self::with_base(base))
    }

    pub fn with_base(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join("config.toml")
    }

    pub fn credentials_file(&self) -> PathBuf {
        self.base.join("credentials.toml")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.base.join("logs")
    }

    /// Default target of `--log-file` when no path is given
    pub fn log_file(&self) -> PathBuf {
        self.log_dir().join("reviewharvest.log")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base)?;
        std::fs::create_dir_all(self.log_dir())?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // No platform config dir (bare containers): keep files next to the working directory
        Self::new().unwrap_or_else(|_| Self::with_base(PathBuf::from(".reviewharvest")))
    }
}
