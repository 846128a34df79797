pub mod parser;
pub mod reviews;

pub use reviews::{ImdbReviewHarvester, ImdbReviewSource, DEFAULT_MAX_STALLED_PAGES, IMDB_BASE_URL};
