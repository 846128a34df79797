use async_trait::async_trait;
use reviewharvest_models::MovieMetadata;

use crate::error::SourceError;
use crate::outcome::HarvestOutcome;

/// Resolves a free-text title to a metadata document
#[async_trait]
pub trait MetadataSource: Send + Sync {
    fn source_name(&self) -> &str;

    async fn lookup(&self, title: &str) -> Result<MovieMetadata, SourceError>;
}

/// Collects user reviews for a movie id
#[async_trait]
pub trait ReviewSource: Send + Sync {
    fn source_name(&self) -> &str;

    /// Harvest at most `limit` reviews.
    /// Transport failures end the harvest with partial results rather than an error.
    async fn harvest(&self, movie_id: &str, limit: usize) -> Result<HarvestOutcome, SourceError>;
}
