//! Retention records and review history.
//!
//! A `RetentionRecord` tracks one learned item's forgetting-curve state:
//! stability (the curve's time constant, in days), difficulty, and an
//! append-only review history. The retention engine returns new stability
//! and difficulty values; the caller decides whether to persist them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EmberError, Result};

/// Outcome rating for a single review, on the 1-4 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewRating {
    /// Total failure to recall (1).
    Forgot,
    /// Recalled with significant effort (2).
    Hard,
    /// Recalled correctly (3).
    Good,
    /// Recalled effortlessly (4).
    Easy,
}

impl ReviewRating {
    /// Get all rating variants in ascending order.
    pub fn all() -> &'static [ReviewRating] {
        &[
            ReviewRating::Forgot,
            ReviewRating::Hard,
            ReviewRating::Good,
            ReviewRating::Easy,
        ]
    }

    /// Numeric value on the 1-4 scale.
    pub fn value(&self) -> u8 {
        match self {
            ReviewRating::Forgot => 1,
            ReviewRating::Hard => 2,
            ReviewRating::Good => 3,
            ReviewRating::Easy => 4,
        }
    }

    /// Parse a numeric rating. Values outside 1-4 are an argument error.
    pub fn from_value(value: u8) -> Result<Self> {
        match value {
            1 => Ok(ReviewRating::Forgot),
            2 => Ok(ReviewRating::Hard),
            3 => Ok(ReviewRating::Good),
            4 => Ok(ReviewRating::Easy),
            _ => Err(EmberError::RatingOutOfRange { value }),
        }
    }
}

/// One review of a retention item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewEvent {
    /// When the review happened.
    pub reviewed_at: DateTime<Utc>,
    /// How the review went.
    pub rating: ReviewRating,
}

impl ReviewEvent {
    /// Create a review event.
    pub fn new(reviewed_at: DateTime<Utc>, rating: ReviewRating) -> Self {
        Self {
            reviewed_at,
            rating,
        }
    }
}

/// Forgetting-curve state for one learned item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionRecord {
    /// Identifier of the learned item.
    pub item_id: String,
    /// When the item was first learned.
    pub created_at: DateTime<Utc>,
    /// Forgetting-curve time constant, in days. Always positive.
    pub stability: f64,
    /// Item difficulty in [0, 1]; higher is harder.
    pub difficulty: f64,
    /// Append-only review history, oldest first.
    #[serde(default)]
    pub reviews: Vec<ReviewEvent>,
}

impl RetentionRecord {
    /// Create a record for a newly learned item.
    pub fn new(
        item_id: impl Into<String>,
        created_at: DateTime<Utc>,
        stability: f64,
        difficulty: f64,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            created_at,
            stability,
            difficulty,
            reviews: Vec::new(),
        }
    }

    /// Append a review event, returning the updated record.
    pub fn with_review(mut self, event: ReviewEvent) -> Self {
        self.reviews.push(event);
        self
    }

    /// Timestamp of the most recent review, or creation time if never
    /// reviewed.
    pub fn last_review_at(&self) -> DateTime<Utc> {
        self.reviews
            .last()
            .map(|r| r.reviewed_at)
            .unwrap_or(self.created_at)
    }

    /// Days elapsed since the last review (fractional).
    pub fn days_since_review(&self, now: DateTime<Utc>) -> f64 {
        (now - self.last_review_at()).num_seconds() as f64 / 86_400.0
    }
}

/// An item's precomputed recall strength, as input for the recommendation
/// engine.
///
/// The recommendation engine never calls the retention engine directly;
/// the caller computes retrievability and hands over these statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewItemStatus {
    /// Identifier of the learned item.
    pub item_id: String,
    /// Current retrievability in [0, 1].
    pub retrievability: f64,
}

impl ReviewItemStatus {
    /// Create a status entry.
    pub fn new(item_id: impl Into<String>, retrievability: f64) -> Self {
        Self {
            item_id: item_id.into(),
            retrievability,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_rating_values() {
        assert_eq!(ReviewRating::Forgot.value(), 1);
        assert_eq!(ReviewRating::Hard.value(), 2);
        assert_eq!(ReviewRating::Good.value(), 3);
        assert_eq!(ReviewRating::Easy.value(), 4);
    }

    #[test]
    fn test_rating_from_value_roundtrip() {
        for &rating in ReviewRating::all() {
            assert_eq!(ReviewRating::from_value(rating.value()).unwrap(), rating);
        }
    }

    #[test]
    fn test_rating_from_value_out_of_range() {
        for value in [0u8, 5, 200] {
            let err = ReviewRating::from_value(value).unwrap_err();
            assert!(err.is_argument_error());
            assert!(matches!(
                err,
                EmberError::RatingOutOfRange { value: v } if v == value
            ));
        }
    }

    #[test]
    fn test_rating_json_roundtrip() {
        for &rating in ReviewRating::all() {
            let json = serde_json::to_string(&rating).unwrap();
            let back: ReviewRating = serde_json::from_str(&json).unwrap();
            assert_eq!(rating, back);
        }
    }

    #[test]
    fn test_last_review_falls_back_to_created() {
        let created = Utc::now() - Duration::days(10);
        let record = RetentionRecord::new("item-1", created, 1.0, 0.5);
        assert_eq!(record.last_review_at(), created);
    }

    #[test]
    fn test_last_review_uses_latest_event() {
        let created = Utc::now() - Duration::days(10);
        let first = created + Duration::days(2);
        let second = created + Duration::days(6);
        let record = RetentionRecord::new("item-1", created, 1.0, 0.5)
            .with_review(ReviewEvent::new(first, ReviewRating::Good))
            .with_review(ReviewEvent::new(second, ReviewRating::Easy));

        assert_eq!(record.last_review_at(), second);
        assert_eq!(record.reviews.len(), 2);
    }

    #[test]
    fn test_days_since_review() {
        let now = Utc::now();
        let record = RetentionRecord::new("item-1", now - Duration::days(3), 2.0, 0.5);
        assert!((record.days_since_review(now) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_record_json_roundtrip() {
        let record = RetentionRecord::new("item-1", Utc::now(), 2.5, 0.4)
            .with_review(ReviewEvent::new(Utc::now(), ReviewRating::Hard));
        let json = serde_json::to_string(&record).unwrap();
        let back: RetentionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, back);
    }

    #[test]
    fn test_record_missing_reviews_field_defaults_empty() {
        let json = r#"{
            "item_id": "item-1",
            "created_at": "2026-01-01T00:00:00Z",
            "stability": 1.0,
            "difficulty": 0.5
        }"#;
        let record: RetentionRecord = serde_json::from_str(json).unwrap();
        assert!(record.reviews.is_empty());
    }
}
