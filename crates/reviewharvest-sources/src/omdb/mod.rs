pub mod api;
pub mod client;

pub use api::{sanitize_title, OmdbSource, OMDB_BASE_URL};
pub use client::OmdbClient;
