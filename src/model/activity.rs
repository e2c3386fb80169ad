//! Session, quiz, and mastery summary records.
//!
//! These are the pre-aggregated inputs the rendering and persistence layers
//! hand to the engines. Accuracy and skip rates are stored as fractions in
//! [0, 1], times in seconds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Competence level derived from a mastery score.
///
/// Five ordered bands over [0, 1]; lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MasteryLevel {
    /// Score in [0.0, 0.2).
    Novice,
    /// Score in [0.2, 0.4).
    Beginner,
    /// Score in [0.4, 0.6).
    Intermediate,
    /// Score in [0.6, 0.8).
    Advanced,
    /// Score in [0.8, 1.0].
    Expert,
}

impl MasteryLevel {
    /// Get all level variants in ascending order.
    pub fn all() -> &'static [MasteryLevel] {
        &[
            MasteryLevel::Novice,
            MasteryLevel::Beginner,
            MasteryLevel::Intermediate,
            MasteryLevel::Advanced,
            MasteryLevel::Expert,
        ]
    }

    /// Numeric rank, 0 (novice) through 4 (expert).
    pub fn rank(&self) -> u8 {
        match self {
            MasteryLevel::Novice => 0,
            MasteryLevel::Beginner => 1,
            MasteryLevel::Intermediate => 2,
            MasteryLevel::Advanced => 3,
            MasteryLevel::Expert => 4,
        }
    }

    /// Lower score bound of this band (inclusive).
    pub fn lower_bound(&self) -> f64 {
        self.rank() as f64 * 0.2
    }

    /// Look up the level for a score via the fixed threshold table.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            MasteryLevel::Expert
        } else if score >= 0.6 {
            MasteryLevel::Advanced
        } else if score >= 0.4 {
            MasteryLevel::Intermediate
        } else if score >= 0.2 {
            MasteryLevel::Beginner
        } else {
            MasteryLevel::Novice
        }
    }

    /// Get the display name for this level.
    pub fn display_name(&self) -> &'static str {
        match self {
            MasteryLevel::Novice => "Novice",
            MasteryLevel::Beginner => "Beginner",
            MasteryLevel::Intermediate => "Intermediate",
            MasteryLevel::Advanced => "Advanced",
            MasteryLevel::Expert => "Expert",
        }
    }
}

/// Timing data for a single attempt.
///
/// Both fields are required together: time-adjusted credit only makes sense
/// when an expected time exists to compare against. Callers without timing
/// data pass `None` rather than a half-filled pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttemptTiming {
    /// Seconds the learner actually took.
    pub time_taken_seconds: f64,
    /// Seconds the attempt was expected to take.
    pub expected_time_seconds: f64,
}

impl AttemptTiming {
    /// Create a timing pair.
    pub fn new(time_taken_seconds: f64, expected_time_seconds: f64) -> Self {
        Self {
            time_taken_seconds,
            expected_time_seconds,
        }
    }

    /// Ratio of actual to expected time. Returns 0.0 when expected is 0.
    pub fn ratio(&self) -> f64 {
        if self.expected_time_seconds <= 0.0 {
            return 0.0;
        }
        self.time_taken_seconds / self.expected_time_seconds
    }
}

/// Summary of one completed study session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Session identifier.
    pub id: String,
    /// When the session finished.
    pub completed_at: DateTime<Utc>,
    /// Fraction of questions answered correctly, in [0, 1].
    pub accuracy: f64,
    /// Fraction of questions skipped, in [0, 1].
    pub skip_rate: f64,
}

impl SessionSummary {
    /// Create a session summary.
    pub fn new(
        id: impl Into<String>,
        completed_at: DateTime<Utc>,
        accuracy: f64,
        skip_rate: f64,
    ) -> Self {
        Self {
            id: id.into(),
            completed_at,
            accuracy,
            skip_rate,
        }
    }
}

/// Summary of one completed quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSummary {
    /// Quiz identifier.
    pub id: String,
    /// Topic this quiz covered, if any.
    pub topic_id: Option<String>,
    /// When the quiz was taken.
    pub taken_at: DateTime<Utc>,
    /// Fraction answered correctly, in [0, 1].
    pub accuracy: f64,
    /// Number of questions in the quiz.
    pub question_count: u32,
    /// Total time spent, in seconds.
    pub total_time_seconds: f64,
    /// Number of questions skipped.
    pub skipped_count: u32,
}

impl QuizSummary {
    /// Average seconds spent per question. Returns 0.0 for empty quizzes.
    pub fn average_time_per_question(&self) -> f64 {
        if self.question_count == 0 {
            return 0.0;
        }
        self.total_time_seconds / self.question_count as f64
    }

    /// Fraction of questions skipped. Returns 0.0 for empty quizzes.
    pub fn skip_rate(&self) -> f64 {
        if self.question_count == 0 {
            return 0.0;
        }
        self.skipped_count as f64 / self.question_count as f64
    }
}

/// Current mastery standing for one topic.
///
/// The score itself is maintained by the caller via the mastery engine;
/// this record carries the precomputed fields other consumers read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasteryProgress {
    /// Topic identifier.
    pub topic_id: String,
    /// Human-readable topic name.
    pub topic_name: String,
    /// Current mastery score in [0, 1].
    pub score: f64,
    /// Overall accuracy for this topic, in [0, 1].
    pub accuracy: f64,
    /// Total attempts recorded for this topic.
    pub total_attempts: u32,
    /// When the topic was last practiced. None when no attempt exists yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_attempt_at: Option<DateTime<Utc>>,
}

impl MasteryProgress {
    /// Level band for the current score.
    pub fn level(&self) -> MasteryLevel {
        MasteryLevel::from_score(self.score)
    }
}
