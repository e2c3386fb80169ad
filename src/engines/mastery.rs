//! Mastery scoring for Ember.
//!
//! Maintains a running competence estimate per topic from right/wrong
//! attempts. Early attempts use a running simple average; once enough
//! attempts exist the estimate switches to an exponential moving average,
//! optionally time-adjusted for correct answers. Inactivity decays the
//! score multiplicatively down to a residual floor.
//!
//! All functions are pure; the caller holds the topic -> score mapping and
//! passes timestamps explicitly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::MasteryConfig;
use crate::error::{EmberError, Result};
use crate::model::AttemptTiming;

/// Growth base for default batch weights: attempt i gets weight 1.5^i,
/// so recent attempts count more.
pub const BATCH_WEIGHT_BASE: f64 = 1.5;

/// Partial-credit slope for slow-but-correct answers.
const TIME_PENALTY_SLOPE: f64 = 0.3;

/// Floor credit for correct answers slower than twice the expected time.
const TIME_FLOOR_CREDIT: f64 = 0.4;

/// Residual-memory floor: decay never drives a score below this.
const DECAY_FLOOR: f64 = 0.1;

/// Iteration cap for the attempts-to-target simulation.
const TARGET_SIMULATION_CAP: u32 = 100;

/// Result of estimating how many attempts reach a target score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetEstimate {
    /// The current score already meets the target.
    AlreadyMet,
    /// The target exceeds 1.0 and can never be reached.
    Unreachable,
    /// Number of consecutive correct attempts needed.
    Attempts(u32),
    /// Simulation hit the iteration cap without reaching the target.
    NotConverged,
}

/// Update a topic score after one attempt.
///
/// `total_attempts` is the attempt count *including* this attempt. Up to
/// `min_attempts` the score is a running simple average of outcomes; after
/// that it is an EMA weighted by `alpha`. When `timing` is supplied and the
/// attempt was correct, the observation gets partial credit for slow
/// answers instead of a flat 1.0.
///
/// `current_score` is not range-checked; keeping it in [0, 1] is the
/// caller's contract.
pub fn score_after_attempt(
    config: &MasteryConfig,
    current_score: f64,
    was_correct: bool,
    total_attempts: u32,
    timing: Option<AttemptTiming>,
) -> f64 {
    let outcome = if was_correct { 1.0 } else { 0.0 };

    // First attempt: the outcome is the score.
    if total_attempts <= 1 {
        return outcome;
    }

    // Bootstrap phase: running simple average.
    if total_attempts <= config.min_attempts {
        let n = total_attempts as f64;
        return (current_score * (n - 1.0) + outcome) / n;
    }

    let observation = match timing {
        Some(t) if was_correct => timed_observation(t),
        _ => outcome,
    };

    config.alpha * observation + (1.0 - config.alpha) * current_score
}

/// Time-adjusted credit for a correct answer.
///
/// Within expected time: full credit. Up to twice the expected time:
/// linear partial credit. Beyond that: floor credit.
fn timed_observation(timing: AttemptTiming) -> f64 {
    let ratio = timing.ratio();
    if ratio <= 1.0 {
        1.0
    } else if ratio <= 2.0 {
        1.0 - (ratio - 1.0) * TIME_PENALTY_SLOPE
    } else {
        TIME_FLOOR_CREDIT
    }
}

/// Apply inactivity decay to a score.
///
/// Days beyond the `decay_period_days` grace window shrink the score by
/// `decay_factor` per day, clamped to [0.1, 1.0] so a previously learned
/// topic never decays to nothing. Within the grace window the score is
/// returned unchanged.
pub fn apply_decay(
    config: &MasteryConfig,
    current_score: f64,
    last_attempt: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f64 {
    let days_inactive = (now - last_attempt).num_days();
    let overdue_days = days_inactive - config.decay_period_days as i64;

    if overdue_days <= 0 {
        return current_score;
    }

    let decayed = current_score * config.decay_factor.powi(overdue_days as i32);
    decayed.clamp(DECAY_FLOOR, 1.0)
}

/// Score a batch of outcomes with recency weighting.
///
/// Outcomes are ordered oldest first. Default weights grow as
/// `1.5^index`, so later attempts count more. Custom weights must match
/// the outcome count exactly. An empty batch scores 0.0.
pub fn score_from_batch(outcomes: &[bool], weights: Option<&[f64]>) -> Result<f64> {
    if let Some(w) = weights {
        if w.len() != outcomes.len() {
            return Err(EmberError::WeightLengthMismatch {
                expected: outcomes.len(),
                found: w.len(),
            });
        }
    }

    if outcomes.is_empty() {
        return Ok(0.0);
    }

    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;

    for (i, &correct) in outcomes.iter().enumerate() {
        let weight = match weights {
            Some(w) => w[i],
            None => BATCH_WEIGHT_BASE.powi(i as i32),
        };
        if correct {
            weighted_sum += weight;
        }
        weight_total += weight;
    }

    if weight_total == 0.0 {
        return Ok(0.0);
    }

    Ok(weighted_sum / weight_total)
}

/// Estimate how many consecutive correct attempts reach a target score.
///
/// Simulates EMA updates assuming every future attempt is correct. The
/// simulation is capped at 100 iterations; hitting the cap without
/// reaching the target reports `NotConverged` rather than a count.
pub fn estimate_attempts_to_target(
    config: &MasteryConfig,
    current_score: f64,
    target_score: f64,
) -> TargetEstimate {
    if current_score >= target_score {
        return TargetEstimate::AlreadyMet;
    }
    if target_score > 1.0 {
        return TargetEstimate::Unreachable;
    }

    let mut score = current_score;
    for attempt in 1..=TARGET_SIMULATION_CAP {
        score = config.alpha + (1.0 - config.alpha) * score;
        if score >= target_score {
            return TargetEstimate::Attempts(attempt);
        }
    }

    TargetEstimate::NotConverged
}
