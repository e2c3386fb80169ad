//! Streak and activity records.
//!
//! A `StreakRecord` is mutated only by the streak engine's
//! `record_activity`, which returns a new record. Closed streaks are kept
//! as `StreakPeriod` history entries; heatmap rows are derived views and
//! never persisted.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Consecutive-day activity state for one learner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreakRecord {
    /// Length of the active streak, in days.
    pub current_streak: u32,
    /// Longest streak ever recorded.
    pub longest_streak: u32,
    /// Calendar day of the most recent activity.
    pub last_activity_date: Option<NaiveDate>,
    /// Distinct days with any activity.
    pub total_active_days: u32,
    /// ISO weekday (1 = Monday .. 7 = Sunday) -> had activity.
    pub weekly_activity: BTreeMap<u32, bool>,
    /// Day of month (1-31) -> activity count.
    pub monthly_activity: BTreeMap<u32, u32>,
    /// Closed streaks, oldest first.
    pub streak_history: Vec<StreakPeriod>,
}

impl StreakRecord {
    /// Create an empty record for a learner with no activity yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any activity was recorded on the given day.
    pub fn has_activity_on(&self, date: NaiveDate) -> bool {
        self.last_activity_date == Some(date)
    }
}

/// A closed, historical streak.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StreakPeriod {
    /// First day of the streak.
    pub started_on: NaiveDate,
    /// Last day of the streak.
    pub ended_on: NaiveDate,
    /// Streak length in days.
    pub length: u32,
}

/// One day of a derived activity heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeatmapDay {
    /// The calendar day.
    pub date: NaiveDate,
    /// Activity count on that day.
    pub count: u32,
    /// Intensity bucket 0-4.
    pub intensity: u8,
}
