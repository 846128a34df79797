pub mod error;
pub mod http;
pub mod imdb;
pub mod omdb;
pub mod outcome;
pub mod progress;
pub mod traits;

pub use error::SourceError;
pub use imdb::{ImdbReviewHarvester, ImdbReviewSource};
pub use omdb::{OmdbClient, OmdbSource};
pub use outcome::{HarvestOutcome, StopReason};
pub use progress::{HarvestStats, HarvestTracker};
pub use traits::{MetadataSource, ReviewSource};
