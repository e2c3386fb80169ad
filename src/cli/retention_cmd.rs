//! Retention command for Ember.
//!
//! Summarizes retention health across all review items and lists the
//! items most in need of review, weakest first.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::data::LearnerData;
use crate::config::Config;
use crate::engines::retention::{
    next_review_date, prioritize_for_review, record_retrievability, summarize, RetentionSummary,
    DEFAULT_REVIEW_CAP,
};
use crate::error::Result;

/// Options for the retention command.
#[derive(Debug, Clone, Default)]
pub struct RetentionOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Maximum number of due items to list.
    pub limit: Option<usize>,
}

/// One due item in the prioritized list.
#[derive(Debug, Clone, Serialize)]
pub struct DueItem {
    pub item_id: String,
    pub retrievability: f64,
    pub stability: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<DateTime<Utc>>,
}

/// Output format for the retention command.
#[derive(Debug, Clone, Serialize)]
pub struct RetentionOutput {
    pub summary: RetentionSummary,
    pub due: Vec<DueItem>,
}

/// The retention command implementation.
pub struct RetentionCommand {
    config: Config,
}

impl RetentionCommand {
    /// Create a new retention command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the retention command.
    pub fn run(
        &self,
        data: &LearnerData,
        now: DateTime<Utc>,
        options: &RetentionOptions,
    ) -> Result<RetentionOutput> {
        let retention = &self.config.retention;
        let summary = summarize(retention, &data.retention, now);

        let limit = options.limit.unwrap_or(DEFAULT_REVIEW_CAP);
        let due = prioritize_for_review(&data.retention, now, limit)
            .into_iter()
            .map(|record| {
                let next_review_at =
                    next_review_date(retention, record.last_review_at(), record.stability).ok();
                DueItem {
                    retrievability: record_retrievability(&record, now),
                    stability: record.stability,
                    item_id: record.item_id,
                    next_review_at,
                }
            })
            .collect();

        Ok(RetentionOutput { summary, due })
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &RetentionOutput, options: &RetentionOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &RetentionOutput) -> String {
        if output.summary.total == 0 {
            return "No review items.\n".to_string();
        }

        let mut out = format!(
            "{} items, avg retention {:.0}%, {} due, {} critical\n",
            output.summary.total,
            output.summary.average_retrievability * 100.0,
            output.summary.due_count,
            output.summary.critical_count,
        );

        for item in &output.due {
            out.push_str(&format!(
                "  {:<20} {:>4.0}% (stability {:.1}d)\n",
                item.item_id,
                item.retrievability * 100.0,
                item.stability,
            ));
        }
        out
    }
}
