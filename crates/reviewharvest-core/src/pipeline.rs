use reviewharvest_models::ReviewCollection;
use reviewharvest_sources::{HarvestStats, MetadataSource, ReviewSource, SourceError, StopReason};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::export::{write_reviews, ExportError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not resolve '{title}' to a movie id: {source}")]
    Metadata {
        title: String,
        #[source]
        source: SourceError,
    },

    #[error("review harvest failed: {0}")]
    Harvest(#[source] SourceError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

#[derive(Debug, Clone)]
pub struct HarvestRequest {
    pub title: String,
    /// Skip the metadata lookup when the IMDb id is already known
    pub movie_id: Option<String>,
    pub limit: usize,
    pub output: PathBuf,
    pub separator: char,
    /// Write only when strictly more reviews than this were collected
    pub min_reviews: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HarvestReport {
    pub title: String,
    pub movie_id: String,
    pub collected: usize,
    pub average_rating: Option<f64>,
    pub stop: StopReason,
    pub stats: HarvestStats,
    pub written: Option<PathBuf>,
    #[serde(skip)]
    pub reviews: ReviewCollection,
}

/// Title → movie id → reviews → file
pub struct HarvestPipeline {
    metadata: Box<dyn MetadataSource>,
    reviews: Box<dyn ReviewSource>,
}

impl HarvestPipeline {
    pub fn new(metadata: Box<dyn MetadataSource>, reviews: Box<dyn ReviewSource>) -> Self {
        Self { metadata, reviews }
    }

    pub async fn resolve_movie_id(&self, title: &str) -> Result<String, PipelineError> {
        let to_error = |source| PipelineError::Metadata {
            title: title.to_string(),
            source,
        };

        let metadata = self.metadata.lookup(title).await.map_err(to_error)?;
        let movie_id = metadata
            .imdb_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(SourceError::MissingField("imdbID"))
            .map_err(to_error)?;

        info!(
            title = %title,
            movie_id = %movie_id,
            source = self.metadata.source_name(),
            "Resolved movie id"
        );
        Ok(movie_id)
    }

    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn run(&self, request: &HarvestRequest) -> Result<HarvestReport, PipelineError> {
        let movie_id = match &request.movie_id {
            Some(id) => id.clone(),
            None => self.resolve_movie_id(&request.title).await?,
        };

        let outcome = self
            .reviews
            .harvest(&movie_id, request.limit)
            .await
            .map_err(PipelineError::Harvest)?;

        let collected = outcome.reviews.len();
        let written = if collected > request.min_reviews {
            Some(write_reviews(&outcome.reviews, &request.output, request.separator)?)
        } else {
            warn!(
                movie_id = %movie_id,
                collected = collected,
                min_reviews = request.min_reviews,
                "Not enough reviews collected, skipping file output"
            );
            None
        };

        Ok(HarvestReport {
            title: request.title.clone(),
            movie_id,
            collected,
            average_rating: outcome.reviews.average_rating(),
            stop: outcome.stop,
            stats: outcome.stats,
            written,
            reviews: outcome.reviews,
        })
    }
}
