//! Daily streak tracking for Ember.
//!
//! A streak counts consecutive calendar days with at least one learning
//! activity. Freezes let a configured number of missed days pass without
//! breaking the chain, and a grace period lets night owls log activity
//! shortly after midnight against the previous day.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};

use crate::config::StreakConfig;
use crate::model::{HeatmapDay, StreakPeriod, StreakRecord};

/// Fold a new activity event into a streak record.
///
/// Both the record's last activity and the event are compared as calendar
/// days. Same-day (and out-of-order) events leave the streak untouched,
/// the next day extends it, a gap within the freeze allowance holds it,
/// and anything longer resets it to 1, archiving the broken run.
pub fn record_activity(
    config: &StreakConfig,
    record: &StreakRecord,
    activity_at: DateTime<Utc>,
) -> StreakRecord {
    let activity_date = activity_at.date_naive();
    let mut updated = record.clone();

    match record.last_activity_date {
        None => {
            updated.current_streak = 1;
            updated.last_activity_date = Some(activity_date);
            updated.total_active_days += 1;
        }
        Some(last) => {
            let days_diff = (activity_date - last).num_days();

            if days_diff <= 0 {
                // Same day or an out-of-order event, nothing to count.
            } else if days_diff == 1 {
                updated.current_streak += 1;
                updated.last_activity_date = Some(activity_date);
                updated.total_active_days += 1;
            } else if days_diff <= 1 + i64::from(config.freeze_days) {
                // Freeze absorbs the gap, the chain holds at its length.
                updated.last_activity_date = Some(activity_date);
                updated.total_active_days += 1;
            } else {
                if record.current_streak > 1 {
                    updated.streak_history.push(StreakPeriod {
                        started_on: last - Duration::days(i64::from(record.current_streak) - 1),
                        ended_on: last,
                        length: record.current_streak,
                    });
                }
                updated.current_streak = 1;
                updated.last_activity_date = Some(activity_date);
                updated.total_active_days += 1;
            }
        }
    }

    updated.longest_streak = updated.longest_streak.max(updated.current_streak);

    let weekday = activity_date.weekday().number_from_monday();
    updated.weekly_activity.insert(weekday, true);
    *updated.monthly_activity.entry(activity_date.day()).or_insert(0) += 1;

    updated
}

/// Whether a streak is still alive at `now`.
///
/// While the clock reads earlier than the grace period, `now` still counts
/// as the previous calendar day. The streak survives as long as the
/// effective day gap fits within one day plus the freeze allowance.
pub fn is_streak_valid(
    config: &StreakConfig,
    last_activity_date: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> bool {
    let Some(last) = last_activity_date else {
        return false;
    };

    let mut effective_today = now.date_naive();
    if now.hour() < config.grace_period_hours {
        effective_today -= Duration::days(1);
    }

    let days_diff = (effective_today - last).num_days();
    days_diff <= 1 + i64::from(config.freeze_days)
}

/// Current streak implied by a raw list of activity dates.
///
/// Strict consecutive counting without freezes: the streak is 0 unless the
/// most recent date is today or yesterday. Duplicates are ignored.
pub fn current_streak_from_dates(dates: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut unique: Vec<NaiveDate> = dates.to_vec();
    unique.sort();
    unique.dedup();

    let Some(&latest) = unique.last() else {
        return 0;
    };
    // Only a run ending today or yesterday counts; stale or future dates
    // mean there is no current streak.
    if !(0..=1).contains(&(today - latest).num_days()) {
        return 0;
    }

    let mut streak = 1;
    for pair in unique.windows(2).rev() {
        if (pair[1] - pair[0]).num_days() == 1 {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

/// Longest consecutive run in a raw list of activity dates.
pub fn longest_streak_from_dates(dates: &[NaiveDate]) -> u32 {
    let mut unique: Vec<NaiveDate> = dates.to_vec();
    unique.sort();
    unique.dedup();

    if unique.is_empty() {
        return 0;
    }

    let mut longest = 1u32;
    let mut run = 1u32;
    for pair in unique.windows(2) {
        if (pair[1] - pair[0]).num_days() == 1 {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 1;
        }
    }
    longest
}

/// Map an activity count to a heatmap intensity bucket (0..=4).
fn intensity_for(count: u32) -> u8 {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=10 => 3,
        _ => 4,
    }
}

/// Build a heatmap for the inclusive date range `from..=to`.
///
/// Emits one entry per calendar day; days missing from `counts` appear
/// with count 0. An inverted range yields an empty heatmap.
pub fn build_heatmap(
    counts: &std::collections::BTreeMap<NaiveDate, u32>,
    from: NaiveDate,
    to: NaiveDate,
) -> Vec<HeatmapDay> {
    let mut days = Vec::new();
    let mut date = from;
    while date <= to {
        let count = counts.get(&date).copied().unwrap_or(0);
        days.push(HeatmapDay {
            date,
            count,
            intensity: intensity_for(count),
        });
        date += Duration::days(1);
    }
    days
}
