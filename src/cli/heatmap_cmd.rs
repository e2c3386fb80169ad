//! Heatmap command for Ember.
//!
//! Renders activity counts over a date range as intensity-bucketed rows,
//! GitHub-contribution style but in plain text.

use chrono::NaiveDate;
use serde::Serialize;

use crate::cli::data::LearnerData;
use crate::config::Config;
use crate::engines::streak::build_heatmap;
use crate::model::HeatmapDay;

const INTENSITY_GLYPHS: [char; 5] = ['.', '-', '+', '*', '#'];

/// Options for the heatmap command.
#[derive(Debug, Clone)]
pub struct HeatmapOptions {
    /// Output as JSON.
    pub json: bool,
    /// Suppress output.
    pub quiet: bool,
    /// First day of the range (inclusive).
    pub from: NaiveDate,
    /// Last day of the range (inclusive).
    pub to: NaiveDate,
}

/// Output format for the heatmap command.
#[derive(Debug, Clone, Serialize)]
pub struct HeatmapOutput {
    pub days: Vec<HeatmapDay>,
    pub total_activities: u32,
    pub active_days: usize,
}

/// The heatmap command implementation.
pub struct HeatmapCommand {
    #[allow(dead_code)]
    config: Config,
}

impl HeatmapCommand {
    /// Create a new heatmap command.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the heatmap command.
    pub fn run(&self, data: &LearnerData, options: &HeatmapOptions) -> HeatmapOutput {
        let days = build_heatmap(&data.activity, options.from, options.to);
        let total_activities = days.iter().map(|d| d.count).sum();
        let active_days = days.iter().filter(|d| d.count > 0).count();

        HeatmapOutput {
            days,
            total_activities,
            active_days,
        }
    }

    /// Format output based on options.
    pub fn format_output(&self, output: &HeatmapOutput, options: &HeatmapOptions) -> String {
        if options.quiet {
            return String::new();
        }

        if options.json {
            serde_json::to_string_pretty(output).unwrap_or_else(|_| "{}".to_string())
        } else {
            self.format_human_readable(output)
        }
    }

    fn format_human_readable(&self, output: &HeatmapOutput) -> String {
        let mut out = String::new();
        for day in &output.days {
            let glyph = INTENSITY_GLYPHS[day.intensity.min(4) as usize];
            out.push_str(&format!("{} {} ({})\n", day.date, glyph, day.count));
        }
        out.push_str(&format!(
            "{} activities over {} active days\n",
            output.total_activities, output.active_days,
        ));
        out
    }
}
