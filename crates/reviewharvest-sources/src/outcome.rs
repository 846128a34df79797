use reviewharvest_models::ReviewCollection;
use serde::Serialize;
use std::fmt;

use crate::progress::HarvestStats;

/// Why a harvest stopped fetching pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// The collection reached the requested limit
    LimitReached,
    /// The last page carried no pagination cursor
    PaginationExhausted,
    /// The upstream handed back a cursor it had already served
    CursorRepeated,
    /// Too many pages in a row added no new review
    PageCapExceeded { max_stalled_pages: usize },
    /// A fetch failed; everything collected before it is kept
    TransportFailure(String),
    /// No movie id was given, nothing was fetched
    EmptyIdentifier,
}

impl StopReason {
    /// True when the harvest ended early and the collection may be incomplete
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            StopReason::CursorRepeated
                | StopReason::PageCapExceeded { .. }
                | StopReason::TransportFailure(_)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StopReason::LimitReached => "limit_reached",
            StopReason::PaginationExhausted => "pagination_exhausted",
            StopReason::CursorRepeated => "cursor_repeated",
            StopReason::PageCapExceeded { .. } => "page_cap_exceeded",
            StopReason::TransportFailure(_) => "transport_failure",
            StopReason::EmptyIdentifier => "empty_identifier",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::LimitReached => write!(f, "limit reached"),
            StopReason::PaginationExhausted => write!(f, "pagination exhausted"),
            StopReason::CursorRepeated => write!(f, "pagination cursor repeated"),
            StopReason::PageCapExceeded { max_stalled_pages } => {
                write!(f, "{} pages in a row without new reviews", max_stalled_pages)
            }
            StopReason::TransportFailure(message) => write!(f, "transport failure: {}", message),
            StopReason::EmptyIdentifier => write!(f, "no movie id provided"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HarvestOutcome {
    pub reviews: ReviewCollection,
    pub stop: StopReason,
    pub stats: HarvestStats,
}

impl HarvestOutcome {
    pub fn empty(reviews: ReviewCollection, stop: StopReason) -> Self {
        Self {
            reviews,
            stop,
            stats: HarvestStats::default(),
        }
    }
}
