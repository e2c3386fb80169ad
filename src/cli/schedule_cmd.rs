//! Schedule command for Ember.
//!
//! Projects a review schedule for a newly learned item, assuming each
//! review goes well. Useful for showing a learner what the next weeks of
//! spaced repetition look like.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::data::LearnerData;
use crate::config::Config;
use crate::engines::retention::{review_schedule, ScheduledReview};
use crate::error::Result;

/// Options for the schedule command.
#[derive(Debug, Clone)]
pub struct ScheduleOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Starting stability in days.
    pub stability: f64,
    /// Number of reviews to project.
    pub count: u32,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self {
            json: false,
            quiet: false,
            stability: 1.0,
            count: 5,
        }
    }
}

/// Output format for the schedule command.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleOutput {
    pub reviews: Vec<ScheduledReview>,
}

/// The schedule command implementation.
pub struct ScheduleCommand {
    config: Config,
}

impl ScheduleCommand {
    /// Create a new schedule command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the schedule command.
    pub fn run(
        &self,
        _data: &LearnerData,
        now: DateTime<Utc>,
        options: &ScheduleOptions,
    ) -> Result<ScheduleOutput> {
        let reviews = review_schedule(&self.config.retention, now, options.stability, options.count)?;
        Ok(ScheduleOutput { reviews })
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &ScheduleOutput, options: &ScheduleOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &ScheduleOutput) -> String {
        let mut out = String::new();
        for review in &output.reviews {
            out.push_str(&format!(
                "Review {}: {} (interval {:.1}d, stability {:.1}d)\n",
                review.review_number,
                review.scheduled_at.format("%Y-%m-%d %H:%M"),
                review.interval_days,
                review.stability,
            ));
        }
        out
    }
}
