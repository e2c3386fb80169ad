//! Streak command for Ember.
//!
//! Reports the current and longest streak, whether the current streak is
//! still alive, and past streak periods.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::data::LearnerData;
use crate::config::Config;
use crate::engines::streak::is_streak_valid;
use crate::model::StreakPeriod;

/// Options for the streak command.
#[derive(Debug, Clone, Default)]
pub struct StreakOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the streak command.
#[derive(Debug, Clone, Serialize)]
pub struct StreakOutput {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_active_days: u32,
    pub valid: bool,
    pub history: Vec<StreakPeriod>,
}

/// The streak command implementation.
pub struct StreakCommand {
    config: Config,
}

impl StreakCommand {
    /// Create a new streak command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the streak command.
    pub fn run(&self, data: &LearnerData, now: DateTime<Utc>, _options: &StreakOptions) -> StreakOutput {
        let streak = &data.streak;
        let valid = is_streak_valid(&self.config.streak, streak.last_activity_date, now);

        StreakOutput {
            current_streak: streak.current_streak,
            longest_streak: streak.longest_streak,
            total_active_days: streak.total_active_days,
            valid,
            history: streak.streak_history.clone(),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &StreakOutput, options: &StreakOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &StreakOutput) -> String {
        let status = if output.valid { "alive" } else { "broken" };
        let mut out = format!(
            "Current streak: {} days ({})\nLongest streak: {} days\nTotal active days: {}\n",
            output.current_streak, status, output.longest_streak, output.total_active_days,
        );

        if !output.history.is_empty() {
            out.push_str("Past streaks:\n");
            for period in &output.history {
                out.push_str(&format!(
                    "  {} to {} ({} days)\n",
                    period.started_on, period.ended_on, period.length,
                ));
            }
        }
        out
    }
}
