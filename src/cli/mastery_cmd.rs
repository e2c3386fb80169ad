//! Mastery command for Ember.
//!
//! Reports per-topic mastery: the stored score, the score after inactivity
//! decay, the level it maps to, and optionally how many correct attempts
//! would reach a target score.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::cli::data::LearnerData;
use crate::config::Config;
use crate::engines::mastery::{apply_decay, estimate_attempts_to_target, TargetEstimate};
use crate::model::MasteryLevel;

/// Options for the mastery command.
#[derive(Debug, Clone, Default)]
pub struct MasteryOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// Only report this topic.
    pub topic: Option<String>,
    /// Estimate attempts needed to reach this score.
    pub target: Option<f64>,
}

/// One topic's mastery report.
#[derive(Debug, Clone, Serialize)]
pub struct TopicMastery {
    pub topic_id: String,
    pub topic_name: String,
    pub score: f64,
    pub decayed_score: f64,
    pub level: MasteryLevel,
    pub accuracy: f64,
    pub total_attempts: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_target: Option<TargetEstimate>,
}

/// Output format for the mastery command.
#[derive(Debug, Clone, Serialize)]
pub struct MasteryOutput {
    pub topics: Vec<TopicMastery>,
}

/// The mastery command implementation.
pub struct MasteryCommand {
    config: Config,
}

impl MasteryCommand {
    /// Create a new mastery command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the mastery command.
    pub fn run(
        &self,
        data: &LearnerData,
        now: DateTime<Utc>,
        options: &MasteryOptions,
    ) -> MasteryOutput {
        let topics = data
            .mastery
            .iter()
            .filter(|m| {
                options
                    .topic
                    .as_deref()
                    .map(|t| m.topic_id == t)
                    .unwrap_or(true)
            })
            .map(|m| {
                let decayed_score = match m.last_attempt_at {
                    Some(last) => apply_decay(&self.config.mastery, m.score, last, now),
                    None => m.score,
                };
                let to_target = options.target.map(|target| {
                    estimate_attempts_to_target(&self.config.mastery, decayed_score, target)
                });

                TopicMastery {
                    topic_id: m.topic_id.clone(),
                    topic_name: m.topic_name.clone(),
                    score: m.score,
                    decayed_score,
                    level: MasteryLevel::from_score(decayed_score),
                    accuracy: m.accuracy,
                    total_attempts: m.total_attempts,
                    to_target,
                }
            })
            .collect();

        MasteryOutput { topics }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &MasteryOutput, options: &MasteryOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &MasteryOutput) -> String {
        if output.topics.is_empty() {
            return "No mastery data.\n".to_string();
        }

        let mut out = String::new();
        for topic in &output.topics {
            out.push_str(&format!(
                "{:<24} {:>5.0}% ({}) {} attempts\n",
                topic.topic_name,
                topic.decayed_score * 100.0,
                topic.level.display_name(),
                topic.total_attempts,
            ));
            if let Some(estimate) = &topic.to_target {
                let line = match estimate {
                    TargetEstimate::AlreadyMet => "  target: already met".to_string(),
                    TargetEstimate::Unreachable => "  target: unreachable".to_string(),
                    TargetEstimate::Attempts(n) => {
                        format!("  target: ~{} correct attempts away", n)
                    }
                    TargetEstimate::NotConverged => "  target: a long way off".to_string(),
                };
                out.push_str(&line);
                out.push('\n');
            }
        }
        out
    }
}
