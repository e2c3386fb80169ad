//! Memory retention modeling for Ember.
//!
//! Models forgetting as exponential decay `R = e^(-t/S)` where `t` is days
//! since the last review and `S` is the item's stability in days. Reviews
//! update stability and difficulty in the spaced-repetition style: success
//! grows stability multiplicatively, failure hard-resets it.
//!
//! Every function is pure. The engine returns new stability/difficulty
//! values and schedules; the caller decides whether to persist them onto
//! its `RetentionRecord`s.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::RetentionConfig;
use crate::error::{EmberError, Result};
use crate::model::{RetentionRecord, ReviewRating};

/// Stability multiplier for a "hard" review.
const HARD_GROWTH_FACTOR: f64 = 1.2;

/// Extra growth multiplier for an "easy" review on top of the configured
/// growth factor.
const EASY_GROWTH_BONUS: f64 = 1.3;

/// Retrievability below this marks an item as critically at risk.
pub const CRITICAL_RETRIEVABILITY: f64 = 0.5;

/// Default cap for `prioritize_for_review`.
pub const DEFAULT_REVIEW_CAP: usize = 20;

/// Recall probability after `days_since_review` days for a given stability.
///
/// Zero or negative elapsed time (never reviewed, or a future timestamp)
/// is treated as perfect recall.
pub fn retrievability(days_since_review: f64, stability: f64) -> f64 {
    if days_since_review <= 0.0 {
        return 1.0;
    }
    (-days_since_review / stability).exp()
}

/// Days until recall probability drops to `threshold`.
///
/// Solves `threshold = e^(-t/S)` for `t`. The threshold must lie strictly
/// within (0, 1): exactly 0 never arrives and exactly 1 is degenerate.
pub fn days_until_threshold(stability: f64, threshold: f64) -> Result<f64> {
    if !(threshold > 0.0 && threshold < 1.0) {
        return Err(EmberError::ThresholdOutOfRange { value: threshold });
    }
    Ok(-stability * threshold.ln())
}

/// When the next review should happen to catch the item at the configured
/// target retention. Rounded to the nearest whole hour.
pub fn next_review_date(
    config: &RetentionConfig,
    last_review: DateTime<Utc>,
    stability: f64,
) -> Result<DateTime<Utc>> {
    let interval_days = days_until_threshold(stability, config.target_retention)?;
    let hours = (interval_days * 24.0).round() as i64;
    Ok(last_review + Duration::hours(hours))
}

/// New stability after a review.
///
/// A total failure discards the current stability and resets to half the
/// initial stability (floored at 0.5 days). Success multiplies stability
/// by a rating-specific growth factor, dampened for difficult items.
pub fn new_stability(
    config: &RetentionConfig,
    current_stability: f64,
    rating: ReviewRating,
    difficulty: f64,
) -> f64 {
    let growth = match rating {
        ReviewRating::Forgot => {
            return (config.initial_stability * 0.5).max(0.5);
        }
        ReviewRating::Hard => HARD_GROWTH_FACTOR,
        ReviewRating::Good => config.stability_growth_factor,
        ReviewRating::Easy => config.stability_growth_factor * EASY_GROWTH_BONUS,
    };

    current_stability * growth * (1.0 - config.difficulty_weight * difficulty)
}

/// New difficulty after a review, clamped to [0, 1].
///
/// Forgetting jumps difficulty to the maximum; hard reviews nudge it up,
/// good and easy reviews ease it down.
pub fn new_difficulty(current_difficulty: f64, rating: ReviewRating) -> f64 {
    let updated = match rating {
        ReviewRating::Forgot => 1.0,
        ReviewRating::Hard => current_difficulty + 0.1,
        ReviewRating::Good => current_difficulty - 0.05,
        ReviewRating::Easy => current_difficulty - 0.1,
    };
    updated.clamp(0.0, 1.0)
}

/// One sample of a forgetting curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Day offset from the last review.
    pub day: f64,
    /// Predicted recall probability at that offset.
    pub retention: f64,
    /// Whether the prediction is still at or above the target retention.
    pub above_target: bool,
}

/// Sample the forgetting curve from t=0 through `days`.
///
/// Sampled uniformly at `1/points_per_day` day resolution; t=0 is always
/// included and always 1.0.
pub fn forgetting_curve(
    config: &RetentionConfig,
    stability: f64,
    days: u32,
    points_per_day: u32,
) -> Vec<CurvePoint> {
    let ppd = points_per_day.max(1);
    let step = 1.0 / ppd as f64;
    let total_points = days * ppd;

    (0..=total_points)
        .map(|i| {
            let day = i as f64 * step;
            let retention = retrievability(day, stability);
            CurvePoint {
                day,
                retention,
                above_target: retention >= config.target_retention,
            }
        })
        .collect()
}

/// One projected review in a planning schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledReview {
    /// Position in the schedule, starting at 1.
    pub review_number: u32,
    /// When the review is projected to happen.
    pub scheduled_at: DateTime<Utc>,
    /// The stability used to compute this review's interval.
    pub stability: f64,
    /// Days since the previous review.
    pub interval_days: f64,
}

/// Project a review schedule for a newly learned item.
///
/// A planning estimate, not a guarantee: every projected review is assumed
/// to be rated "good", with difficulty held at the neutral 0.5.
pub fn review_schedule(
    config: &RetentionConfig,
    start: DateTime<Utc>,
    initial_stability: f64,
    review_count: u32,
) -> Result<Vec<ScheduledReview>> {
    let mut schedule = Vec::with_capacity(review_count as usize);
    let mut stability = initial_stability;
    let mut last_review = start;

    for number in 1..=review_count {
        let interval_days = days_until_threshold(stability, config.target_retention)?;
        let hours = (interval_days * 24.0).round() as i64;
        let scheduled_at = last_review + Duration::hours(hours);

        schedule.push(ScheduledReview {
            review_number: number,
            scheduled_at,
            stability,
            interval_days,
        });

        last_review = scheduled_at;
        stability = new_stability(config, stability, ReviewRating::Good, 0.5);
    }

    Ok(schedule)
}

/// Current recall probability for a record.
pub fn record_retrievability(record: &RetentionRecord, now: DateTime<Utc>) -> f64 {
    retrievability(record.days_since_review(now), record.stability)
}

/// Select the items most in need of review.
///
/// Returns up to `max_items` records sorted ascending by current
/// retrievability, so the weakest memories come first.
pub fn prioritize_for_review(
    records: &[RetentionRecord],
    now: DateTime<Utc>,
    max_items: usize,
) -> Vec<RetentionRecord> {
    let mut scored: Vec<(f64, &RetentionRecord)> = records
        .iter()
        .map(|r| (record_retrievability(r, now), r))
        .collect();

    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    scored
        .into_iter()
        .take(max_items)
        .map(|(_, r)| r.clone())
        .collect()
}

/// Aggregate retention health over a collection of records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetentionSummary {
    /// Number of records summarized.
    pub total: usize,
    /// Mean retrievability across all records.
    pub average_retrievability: f64,
    /// Mean stability across all records, in days.
    pub average_stability: f64,
    /// Records below the configured target retention.
    pub due_count: usize,
    /// Records below the critical 0.5 retrievability mark.
    pub critical_count: usize,
}

/// Summarize retention health. Empty input yields a zeroed summary.
pub fn summarize(
    config: &RetentionConfig,
    records: &[RetentionRecord],
    now: DateTime<Utc>,
) -> RetentionSummary {
    if records.is_empty() {
        return RetentionSummary::default();
    }

    let mut retrievability_sum = 0.0;
    let mut stability_sum = 0.0;
    let mut due_count = 0;
    let mut critical_count = 0;

    for record in records {
        let r = record_retrievability(record, now);
        retrievability_sum += r;
        stability_sum += record.stability;
        if r < config.target_retention {
            due_count += 1;
        }
        if r < CRITICAL_RETRIEVABILITY {
            critical_count += 1;
        }
    }

    let n = records.len() as f64;
    RetentionSummary {
        total: records.len(),
        average_retrievability: retrievability_sum / n,
        average_stability: stability_sum / n,
        due_count,
        critical_count,
    }
}
