//! Calculation engines for Ember.
//!
//! Each engine is a set of pure functions over the data model: mastery
//! scoring, retention modeling, streak tracking, and recommendation
//! analysis. Engines take their config section and an explicit `now`, so
//! every computation is deterministic and testable without a clock.

pub mod mastery;
pub mod recommend;
pub mod retention;
pub mod streak;

pub use mastery::{
    apply_decay, estimate_attempts_to_target, score_after_attempt, score_from_batch,
    TargetEstimate,
};
pub use recommend::{analyze, analyze_quiz, AnalysisInput};
pub use retention::{
    days_until_threshold, forgetting_curve, new_difficulty, new_stability, next_review_date,
    prioritize_for_review, record_retrievability, retrievability, review_schedule, summarize,
    CurvePoint, RetentionSummary, ScheduledReview,
};
pub use streak::{
    build_heatmap, current_streak_from_dates, is_streak_valid, longest_streak_from_dates,
    record_activity,
};
