use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a harvested review inside a collection.
///
/// Reviews that carry a source review id (IMDb `rw…`) are keyed by it.
/// Anything else falls back to the composite `title body` text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReviewKey {
    Id(String),
    Text(String),
}

impl fmt::Display for ReviewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReviewKey::Id(id) => write!(f, "{}", id),
            ReviewKey::Text(text) => write!(f, "{}", text),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>, // IMDb review id, when the markup exposes one
    pub title: String,
    pub body: String,
    pub rating: f64, // Star rating as shown on the page (1-10)
}

impl ReviewRecord {
    pub fn new(title: impl Into<String>, body: impl Into<String>, rating: f64) -> Self {
        Self {
            review_id: None,
            title: title.into(),
            body: body.into(),
            rating,
        }
    }

    pub fn with_review_id(mut self, review_id: impl Into<String>) -> Self {
        let review_id = review_id.into();
        self.review_id = if review_id.is_empty() { None } else { Some(review_id) };
        self
    }

    /// Title and body joined by a single space
    pub fn composite_text(&self) -> String {
        format!("{} {}", self.title, self.body)
    }

    pub fn key(&self) -> ReviewKey {
        match &self.review_id {
            Some(id) => ReviewKey::Id(id.clone()),
            None => ReviewKey::Text(self.composite_text()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_text_joins_with_space() {
        let record = ReviewRecord::new("Great film", "Loved every minute.", 9.0);
        assert_eq!(record.composite_text(), "Great film Loved every minute.");
    }

    #[test]
    fn test_key_prefers_review_id() {
        let record = ReviewRecord::new("Great film", "Loved it", 9.0).with_review_id("rw1234567");
        assert_eq!(record.key(), ReviewKey::Id("rw1234567".to_string()));
    }

    #[test]
    fn test_key_falls_back_to_text() {
        let record = ReviewRecord::new("Great film", "Loved it", 9.0).with_review_id("");
        assert_eq!(record.review_id, None);
        assert_eq!(record.key(), ReviewKey::Text("Great film Loved it".to_string()));
    }
}
