//! Recommendation records emitted by the analysis engine.
//!
//! Recommendations are created fresh on every analysis run; there is no
//! cross-run identity beyond the generated id.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counter for generating unique recommendation IDs within the same day.
static RECOMMENDATION_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Generate a recommendation ID using a process-local counter.
///
/// Format: rec_YYYYMMDD_NNN, zero-padded to three digits and growing
/// past 999 without wrapping. Good enough for within-run uniqueness;
/// recommendations are not persisted across runs.
pub fn generate_recommendation_id(now: DateTime<Utc>) -> String {
    let counter = RECOMMENDATION_COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("rec_{}_{:03}", now.format("%Y%m%d"), counter)
}

/// The kind of action a recommendation suggests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    /// Revisit a specific topic.
    ReviewTopic,
    /// Do more practice sessions overall.
    PracticeMore,
    /// Pace improvements: too much time per question.
    TimeManagement,
    /// Accuracy below the configured threshold.
    Accuracy,
    /// Recurring question skipping.
    SkipPattern,
    /// A weak subject that deserves focused study.
    SubjectFocus,
    /// Streak upkeep and milestones.
    Streak,
    /// Items due for spaced review.
    Retention,
    /// Items at serious risk of being forgotten.
    ReviewDifficult,
    /// Positive reinforcement.
    Encouragement,
}

impl RecommendationType {
    /// Get all type variants.
    pub fn all() -> &'static [RecommendationType] {
        &[
            RecommendationType::ReviewTopic,
            RecommendationType::PracticeMore,
            RecommendationType::TimeManagement,
            RecommendationType::Accuracy,
            RecommendationType::SkipPattern,
            RecommendationType::SubjectFocus,
            RecommendationType::Streak,
            RecommendationType::Retention,
            RecommendationType::ReviewDifficult,
            RecommendationType::Encouragement,
        ]
    }

    /// Get the display name for this type.
    pub fn display_name(&self) -> &'static str {
        match self {
            RecommendationType::ReviewTopic => "Review Topic",
            RecommendationType::PracticeMore => "Practice More",
            RecommendationType::TimeManagement => "Time Management",
            RecommendationType::Accuracy => "Accuracy",
            RecommendationType::SkipPattern => "Skip Pattern",
            RecommendationType::SubjectFocus => "Subject Focus",
            RecommendationType::Streak => "Streak",
            RecommendationType::Retention => "Retention",
            RecommendationType::ReviewDifficult => "Review Difficult",
            RecommendationType::Encouragement => "Encouragement",
        }
    }
}

/// Recommendation urgency, ordered low to critical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Numeric rank, 0 (low) through 3 (critical).
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Low => 0,
            Priority::Medium => 1,
            Priority::High => 2,
            Priority::Critical => 3,
        }
    }

    /// Get the display name for this priority.
    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

/// A single actionable recommendation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Generated identifier (format: rec_YYYYMMDD_NNN).
    pub id: String,
    /// What kind of action this suggests.
    pub kind: RecommendationType,
    /// Short headline.
    pub title: String,
    /// Longer explanation of why this fired.
    pub description: String,
    /// Urgency level.
    pub priority: Priority,
    /// Label for an action button, if the UI wants one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_label: Option<String>,
    /// Topic this recommendation points at, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_topic_id: Option<String>,
    /// When the recommendation was generated.
    pub created_at: DateTime<Utc>,
    /// When the recommendation stops being relevant, if ever.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Free-form supporting data for the rendering layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_data: Option<HashMap<String, serde_json::Value>>,
}

impl Recommendation {
    /// Create a recommendation with the required fields.
    pub fn new(
        kind: RecommendationType,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: generate_recommendation_id(created_at),
            kind,
            title: title.into(),
            description: description.into(),
            priority,
            action_label: None,
            related_topic_id: None,
            created_at,
            expires_at: None,
            related_data: None,
        }
    }

    /// Set the action label.
    pub fn with_action_label(mut self, label: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self
    }

    /// Set the related topic.
    pub fn with_topic(mut self, topic_id: impl Into<String>) -> Self {
        self.related_topic_id = Some(topic_id.into());
        self
    }

    /// Set the expiry timestamp.
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Attach a supporting data value.
    pub fn with_data(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.related_data
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value);
        self
    }
}
