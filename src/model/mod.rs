//! Value records for Ember.
//!
//! Everything here is an immutable value type: engines never mutate a
//! record in place, they return new values and the caller decides what to
//! persist. All types round-trip through JSON (ISO-8601 timestamps).

pub mod activity;
pub mod recommendation;
pub mod review;
pub mod streak;

pub use activity::{AttemptTiming, MasteryLevel, MasteryProgress, QuizSummary, SessionSummary};
pub use recommendation::{generate_recommendation_id, Priority, Recommendation, RecommendationType};
pub use review::{RetentionRecord, ReviewEvent, ReviewItemStatus, ReviewRating};
pub use streak::{HeatmapDay, StreakPeriod, StreakRecord};
