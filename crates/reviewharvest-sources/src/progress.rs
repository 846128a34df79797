use reviewharvest_models::InsertOutcome;
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::outcome::StopReason;

/// Counters gathered while walking review pages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HarvestStats {
    pub pages_fetched: usize,
    pub blocks_seen: usize,
    pub inserted: usize,
    pub replaced: usize,
    pub ignored: usize,
    pub rejected: usize,
    pub unrated: usize,
    pub unparseable: usize,
}

impl HarvestStats {
    pub fn duplicates(&self) -> usize {
        self.replaced + self.ignored + self.rejected
    }
}

/// Per-harvest progress tracker.
/// Logs one line per page at debug level and a summary when the loop ends.
pub struct HarvestTracker {
    movie_id: String,
    limit: usize,
    stats: HarvestStats,
    start_time: Instant,
}

impl HarvestTracker {
    pub fn new(movie_id: &str, limit: usize) -> Self {
        info!(movie_id = %movie_id, limit = limit, "Starting IMDb review harvest");
        Self {
            movie_id: movie_id.to_string(),
            limit,
            stats: HarvestStats::default(),
            start_time: Instant::now(),
        }
    }

    pub fn pages(&self) -> usize {
        self.stats.pages_fetched
    }

    pub fn stats(&self) -> HarvestStats {
        self.stats
    }

    pub fn record_page(&mut self, blocks: usize) {
        self.stats.pages_fetched += 1;
        self.stats.blocks_seen += blocks;
    }

    pub fn record_insert(&mut self, outcome: InsertOutcome) {
        match outcome {
            InsertOutcome::Inserted => self.stats.inserted += 1,
            InsertOutcome::Replaced => self.stats.replaced += 1,
            InsertOutcome::Ignored => self.stats.ignored += 1,
            InsertOutcome::Rejected => self.stats.rejected += 1,
        }
    }

    pub fn record_unrated(&mut self) {
        self.stats.unrated += 1;
    }

    pub fn record_unparseable(&mut self) {
        self.stats.unparseable += 1;
    }

    pub fn log_page(&self, collected: usize) {
        debug!(
            movie_id = %self.movie_id,
            page = self.stats.pages_fetched,
            collected = collected,
            limit = self.limit,
            "Processed review page"
        );
    }

    pub fn log_summary(&self, collected: usize, stop: &StopReason) {
        let elapsed = self.start_time.elapsed().as_secs_f64();
        let s = &self.stats;
        if stop.is_partial() || s.unparseable > 0 {
            warn!(
                movie_id = %self.movie_id,
                stop = stop.as_str(),
                "Harvest ended ({}): {} reviews from {} pages in {:.1}s | Duplicates: {} | Unrated: {} | Unparseable: {}",
                stop, collected, s.pages_fetched, elapsed, s.duplicates(), s.unrated, s.unparseable
            );
        } else {
            info!(
                movie_id = %self.movie_id,
                stop = stop.as_str(),
                "Harvest ended ({}): {} reviews from {} pages in {:.1}s | Duplicates: {} | Unrated: {}",
                stop, collected, s.pages_fetched, elapsed, s.duplicates(), s.unrated
            );
        }
    }
}
