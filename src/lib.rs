//! Ember - learning progress calculation engines
//!
//! Ember computes the numbers behind a learning dashboard: per-topic
//! mastery scores, memory retention estimates, daily streaks, and
//! rule-based study recommendations. It is a calculation core: callers
//! feed it recorded history and a clock, and it returns plain data.

pub mod cli;
pub mod config;
pub mod engines;
pub mod error;
pub mod model;
pub mod util;

pub use config::{
    Config, MasteryConfig, RecommendationConfig, RetentionConfig, StreakConfig,
};
pub use error::{EmberError, Result};
pub use model::{
    AttemptTiming, HeatmapDay, MasteryLevel, MasteryProgress, Priority, QuizSummary,
    Recommendation, RecommendationType, RetentionRecord, ReviewEvent, ReviewItemStatus,
    ReviewRating, SessionSummary, StreakPeriod, StreakRecord,
};

// Engines
pub use engines::{
    analyze, analyze_quiz, apply_decay, build_heatmap, current_streak_from_dates,
    days_until_threshold, estimate_attempts_to_target, forgetting_curve, is_streak_valid,
    longest_streak_from_dates, new_difficulty, new_stability, next_review_date,
    prioritize_for_review, record_activity, retrievability, review_schedule, score_after_attempt,
    score_from_batch, summarize, AnalysisInput, RetentionSummary, TargetEstimate,
};

// CLI commands
pub use cli::{
    HeatmapCommand, LearnerData, MasteryCommand, RecommendCommand, RetentionCommand,
    ScheduleCommand, StreakCommand,
};
