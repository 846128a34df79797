use async_trait::async_trait;
use reqwest::Client;
use reviewharvest_models::{CollisionPolicy, ReviewCollection, ReviewRecord};
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::SourceError;
use crate::http::{build_http_client, default_user_agent, fetch_text, normalize_base_url, DEFAULT_TIMEOUT};
use crate::imdb::parser::{parse_rating, parse_review_page, ReviewPageSelectors};
use crate::outcome::{HarvestOutcome, StopReason};
use crate::progress::HarvestTracker;
use crate::traits::ReviewSource;

pub const IMDB_BASE_URL: &str = "https://www.imdb.com";

/// Pages in a row that may add no new review before the harvest gives up.
///
/// Pages that add reviews are bounded by the limit, so a harvest fetches at
/// most `limit + max_stalled_pages` pages.
pub const DEFAULT_MAX_STALLED_PAGES: usize = 5;

/// Walks the IMDb `/reviews/_ajax` pagination for any movie id
#[derive(Debug, Clone)]
pub struct ImdbReviewSource {
    http: Client,
    base_url: String,
    policy: CollisionPolicy,
    max_stalled_pages: usize,
}

impl ImdbReviewSource {
    pub fn new() -> Result<Self, SourceError> {
        let http = build_http_client(&default_user_agent(), DEFAULT_TIMEOUT)?;
        Self::with_client(http, IMDB_BASE_URL)
    }

    pub fn with_client(http: Client, base_url: &str) -> Result<Self, SourceError> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
            policy: CollisionPolicy::default(),
            max_stalled_pages: DEFAULT_MAX_STALLED_PAGES,
        })
    }

    /// Build a source from explicit settings (base URL, user agent, timeout)
    pub fn from_settings(base_url: &str, user_agent: &str, timeout: Duration) -> Result<Self, SourceError> {
        let http = build_http_client(user_agent, timeout)?;
        Self::with_client(http, base_url)
    }

    /// Point the source at another host, keeping the HTTP client
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, SourceError> {
        self.base_url = normalize_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_stalled_pages(mut self, max_stalled_pages: usize) -> Self {
        self.max_stalled_pages = max_stalled_pages.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn reviews_url(&self, movie_id: &str, cursor: Option<&str>) -> String {
        match cursor {
            None => format!("{}/title/{}/reviews/_ajax", self.base_url, movie_id),
            Some(key) => format!(
                "{}/title/{}/reviews/_ajax?paginationKey={}",
                self.base_url,
                movie_id,
                urlencoding::encode(key)
            ),
        }
    }

    pub async fn harvest_reviews(&self, movie_id: &str, limit: usize) -> Result<HarvestOutcome, SourceError> {
        let movie_id = movie_id.trim();
        let mut reviews = ReviewCollection::new(self.policy);

        if movie_id.is_empty() {
            warn!("No valid movie ID was provided, skipping review harvest");
            return Ok(HarvestOutcome::empty(reviews, StopReason::EmptyIdentifier));
        }
        if limit == 0 {
            debug!(movie_id = %movie_id, "Limit is 0, nothing to harvest");
            return Ok(HarvestOutcome::empty(reviews, StopReason::LimitReached));
        }

        let selectors = ReviewPageSelectors::new()?;
        let max_stalled_pages = self.max_stalled_pages;
        let mut stalled_pages = 0;
        let mut tracker = HarvestTracker::new(movie_id, limit);
        let mut seen_cursors: HashSet<String> = HashSet::new();
        let mut url = self.reviews_url(movie_id, None);

        let stop = 'pages: loop {
            debug!(url = %url, page = tracker.pages() + 1, "Fetching review page");
            let html = match fetch_text(&self.http, &url).await {
                Ok(html) => html,
                Err(e) => {
                    warn!(movie_id = %movie_id, url = %url, error = %e, "Review page fetch failed, returning partial results");
                    break StopReason::TransportFailure(e.to_string());
                }
            };

            let page = parse_review_page(&selectors, &html);
            tracker.record_page(page.reviews.len());
            let collected_before = reviews.len();

            for parsed in page.reviews {
                if parsed.rating.is_empty() {
                    tracker.record_unrated();
                    continue;
                }
                if reviews.len() >= limit {
                    break 'pages StopReason::LimitReached;
                }

                let rating = match parse_rating(&parsed.rating) {
                    Ok(rating) => rating,
                    Err(e) => {
                        warn!(movie_id = %movie_id, title = %parsed.title, error = %e, "Skipping review with unparseable rating");
                        tracker.record_unparseable();
                        continue;
                    }
                };

                let mut record = ReviewRecord::new(parsed.title, parsed.body, rating);
                if let Some(id) = parsed.review_id {
                    record = record.with_review_id(id);
                }
                let outcome = reviews.insert(record);
                if !outcome.grew() {
                    debug!(movie_id = %movie_id, outcome = ?outcome, "Duplicate review key");
                }
                tracker.record_insert(outcome);
            }

            tracker.log_page(reviews.len());

            if reviews.len() >= limit {
                break StopReason::LimitReached;
            }

            let Some(cursor) = page.cursor else {
                info!(
                    movie_id = %movie_id,
                    "No more pagination keys found, pagination exhausted with {} reviews",
                    reviews.len()
                );
                break StopReason::PaginationExhausted;
            };

            if !seen_cursors.insert(cursor.clone()) {
                warn!(movie_id = %movie_id, cursor = %cursor, "Pagination cursor repeated, stopping");
                break StopReason::CursorRepeated;
            }

            if reviews.len() > collected_before {
                stalled_pages = 0;
            } else {
                stalled_pages += 1;
                if stalled_pages >= max_stalled_pages {
                    warn!(
                        movie_id = %movie_id,
                        max_stalled_pages = max_stalled_pages,
                        "Pages keep coming without new reviews, stopping"
                    );
                    break StopReason::PageCapExceeded { max_stalled_pages };
                }
            }

            url = self.reviews_url(movie_id, Some(&cursor));
        };

        tracker.log_summary(reviews.len(), &stop);

        Ok(HarvestOutcome {
            reviews,
            stop,
            stats: tracker.stats(),
        })
    }
}

#[async_trait]
impl ReviewSource for ImdbReviewSource {
    fn source_name(&self) -> &str {
        "imdb"
    }

    async fn harvest(&self, movie_id: &str, limit: usize) -> Result<HarvestOutcome, SourceError> {
        self.harvest_reviews(movie_id, limit).await
    }
}

/// Review harvester bound to a single movie id
pub struct ImdbReviewHarvester {
    movie_id: String,
    source: ImdbReviewSource,
}

impl ImdbReviewHarvester {
    pub fn new(movie_id: impl Into<String>) -> Result<Self, SourceError> {
        Ok(Self::with_source(movie_id, ImdbReviewSource::new()?))
    }

    pub fn with_source(movie_id: impl Into<String>, source: ImdbReviewSource) -> Self {
        Self {
            movie_id: movie_id.into(),
            source,
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, SourceError> {
        self.source = self.source.with_base_url(base_url)?;
        Ok(self)
    }

    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.source = self.source.with_collision_policy(policy);
        self
    }

    pub fn with_max_stalled_pages(mut self, max_stalled_pages: usize) -> Self {
        self.source = self.source.with_max_stalled_pages(max_stalled_pages);
        self
    }

    pub fn movie_id(&self) -> &str {
        &self.movie_id
    }

    pub async fn harvest(&self, limit: usize) -> Result<HarvestOutcome, SourceError> {
        self.source.harvest_reviews(&self.movie_id, limit).await
    }
}
