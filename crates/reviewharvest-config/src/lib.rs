pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, HarvestOptions, ImdbConfig, OmdbConfig, DEFAULT_IMDB_BASE_URL, DEFAULT_OMDB_BASE_URL};
pub use credentials::{CredentialStore, OMDB_API_KEY_ENV};
pub use paths::{PathManager, HOME_ENV};
