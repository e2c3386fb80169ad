//! Recommend command for Ember.
//!
//! Runs the full recommendation analysis over the learner's history. The
//! command bridges the retention and recommendation engines: it computes
//! current retrievability for each review item, then hands the statuses to
//! the analyzer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::data::LearnerData;
use crate::config::Config;
use crate::engines::recommend::{analyze, AnalysisInput};
use crate::engines::retention::record_retrievability;
use crate::model::{Recommendation, ReviewItemStatus};

/// Options for the recommend command.
#[derive(Debug, Clone, Default)]
pub struct RecommendOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
}

/// Output format for the recommend command.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendOutput {
    pub recommendations: Vec<Recommendation>,
}

/// The recommend command implementation.
pub struct RecommendCommand {
    config: Config,
}

impl RecommendCommand {
    /// Create a new recommend command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the recommend command.
    pub fn run(
        &self,
        data: &LearnerData,
        now: DateTime<Utc>,
        _options: &RecommendOptions,
    ) -> RecommendOutput {
        let review_items: Vec<ReviewItemStatus> = data
            .retention
            .iter()
            .map(|record| {
                ReviewItemStatus::new(record.item_id.clone(), record_retrievability(record, now))
            })
            .collect();

        let input = AnalysisInput {
            sessions: &data.sessions,
            quizzes: &data.quizzes,
            mastery: &data.mastery,
            review_items: &review_items,
            streak: Some(&data.streak),
        };

        RecommendOutput {
            recommendations: analyze(&self.config.recommendation, input, now),
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &RecommendOutput, options: &RecommendOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &RecommendOutput) -> String {
        if output.recommendations.is_empty() {
            return "Nothing to suggest. Keep it up!\n".to_string();
        }

        let mut out = String::new();
        for rec in &output.recommendations {
            out.push_str(&format!(
                "[{}] {}\n    {}\n",
                rec.priority.display_name(),
                rec.title,
                rec.description,
            ));
        }
        out
    }
}
