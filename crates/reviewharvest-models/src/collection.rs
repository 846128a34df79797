use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::review::{ReviewKey, ReviewRecord};

/// What happens when a review arrives under a key that is already present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Keep the review seen first, ignore later duplicates
    #[default]
    KeepFirst,
    /// Replace the stored review with the newest one
    Overwrite,
    /// Refuse the duplicate and report it as rejected
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Replaced,
    Ignored,
    Rejected,
}

impl InsertOutcome {
    /// True when the insert added a new key to the collection
    pub fn grew(&self) -> bool {
        matches!(self, InsertOutcome::Inserted)
    }
}

/// Unordered set of harvested reviews, keyed by [`ReviewKey`]
#[derive(Debug, Clone, Default)]
pub struct ReviewCollection {
    policy: CollisionPolicy,
    records: HashMap<ReviewKey, ReviewRecord>,
}

impl ReviewCollection {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self {
            policy,
            records: HashMap::new(),
        }
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    pub fn insert(&mut self, record: ReviewRecord) -> InsertOutcome {
        let key = record.key();
        match (self.records.contains_key(&key), self.policy) {
            (false, _) => {
                self.records.insert(key, record);
                InsertOutcome::Inserted
            }
            (true, CollisionPolicy::Overwrite) => {
                self.records.insert(key, record);
                InsertOutcome::Replaced
            }
            (true, CollisionPolicy::KeepFirst) => InsertOutcome::Ignored,
            (true, CollisionPolicy::Reject) => InsertOutcome::Rejected,
        }
    }

    pub fn get(&self, key: &ReviewKey) -> Option<&ReviewRecord> {
        self.records.get(key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ReviewKey, &ReviewRecord)> {
        self.records.iter()
    }

    pub fn records(&self) -> impl Iterator<Item = &ReviewRecord> {
        self.records.values()
    }

    /// Mean star rating, `None` for an empty collection
    pub fn average_rating(&self) -> Option<f64> {
        if self.records.is_empty() {
            return None;
        }
        let sum: f64 = self.records.values().map(|r| r.rating).sum();
        Some(sum / self.records.len() as f64)
    }
}

impl FromIterator<ReviewRecord> for ReviewCollection {
    fn from_iter<I: IntoIterator<Item = ReviewRecord>>(iter: I) -> Self {
        let mut collection = ReviewCollection::default();
        for record in iter {
            collection.insert(record);
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(title: &str, rating: f64) -> ReviewRecord {
        ReviewRecord::new(title, "same body", rating)
    }

    #[test]
    fn test_keep_first_ignores_duplicate() {
        let mut collection = ReviewCollection::new(CollisionPolicy::KeepFirst);
        assert_eq!(collection.insert(review("A", 8.0)), InsertOutcome::Inserted);
        assert_eq!(collection.insert(review("A", 3.0)), InsertOutcome::Ignored);

        assert_eq!(collection.len(), 1);
        let stored = collection.get(&ReviewKey::Text("A same body".to_string())).unwrap();
        assert_eq!(stored.rating, 8.0);
    }

    #[test]
    fn test_overwrite_replaces_duplicate() {
        let mut collection = ReviewCollection::new(CollisionPolicy::Overwrite);
        collection.insert(review("A", 8.0));
        assert_eq!(collection.insert(review("A", 3.0)), InsertOutcome::Replaced);

        assert_eq!(collection.len(), 1);
        let stored = collection.get(&ReviewKey::Text("A same body".to_string())).unwrap();
        assert_eq!(stored.rating, 3.0);
    }

    #[test]
    fn test_reject_reports_duplicate() {
        let mut collection = ReviewCollection::new(CollisionPolicy::Reject);
        collection.insert(review("A", 8.0));
        let outcome = collection.insert(review("A", 3.0));
        assert_eq!(outcome, InsertOutcome::Rejected);
        assert!(!outcome.grew());
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_same_text_different_ids_are_distinct() {
        let mut collection = ReviewCollection::default();
        collection.insert(review("A", 8.0).with_review_id("rw1"));
        collection.insert(review("A", 8.0).with_review_id("rw2"));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_average_rating() {
        let collection: ReviewCollection = vec![review("A", 8.0), review("B", 6.0)].into_iter().collect();
        assert_eq!(collection.average_rating(), Some(7.0));
        assert_eq!(ReviewCollection::default().average_rating(), None);
    }
}
