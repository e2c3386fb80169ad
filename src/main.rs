//! Ember - learning progress calculation engines
//!
//! CLI entry point.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use ember::cli::{
    HeatmapCommand, LearnerData, MasteryCommand, RecommendCommand, RetentionCommand,
    ScheduleCommand, StreakCommand,
};
use ember::config::{project_learner_data_path, Config};

/// Ember - learning progress calculation engines
#[derive(Parser)]
#[command(name = "ember")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the learner data file (default: .ember/learner.json)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-topic mastery scores and levels
    Mastery {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        /// Only report this topic
        #[arg(long)]
        topic: Option<String>,
        /// Estimate attempts needed to reach this score
        #[arg(long)]
        target: Option<f64>,
    },

    /// Retention summary and prioritized due list
    Retention {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
        /// Maximum number of due items to list
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// Current and longest streak
    Streak {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Activity heatmap over a date range
    Heatmap {
        /// First day of the range (YYYY-MM-DD)
        #[arg(long)]
        from: NaiveDate,
        /// Last day of the range (YYYY-MM-DD)
        #[arg(long)]
        to: NaiveDate,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Projected review schedule for a new item
    Schedule {
        /// Starting stability in days
        #[arg(long, default_value = "1.0")]
        stability: f64,
        /// Number of reviews to project
        #[arg(long, short, default_value = "5")]
        count: u32,
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },

    /// Study recommendations from recent history
    Recommend {
        /// Output as JSON
        #[arg(long, short)]
        json: bool,
        /// Suppress output
        #[arg(long, short)]
        quiet: bool,
    },
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ember error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let cwd = std::env::current_dir()?;
    let data_path = cli
        .data
        .unwrap_or_else(|| project_learner_data_path(&cwd));

    let config = Config::load();
    let data = load_data(&data_path)?;
    let now = Utc::now();

    match cli.command {
        Commands::Mastery {
            json,
            quiet,
            topic,
            target,
        } => {
            use ember::cli::mastery_cmd::MasteryOptions;
            let cmd = MasteryCommand::new(config);
            let options = MasteryOptions {
                json,
                quiet,
                topic,
                target,
            };
            let output = cmd.run(&data, now, &options);
            print_formatted(cmd.format_output(&output, &options));
        }
        Commands::Retention { json, quiet, limit } => {
            use ember::cli::retention_cmd::RetentionOptions;
            let cmd = RetentionCommand::new(config);
            let options = RetentionOptions { json, quiet, limit };
            let output = cmd.run(&data, now, &options)?;
            print_formatted(cmd.format_output(&output, &options));
        }
        Commands::Streak { json, quiet } => {
            use ember::cli::streak_cmd::StreakOptions;
            let cmd = StreakCommand::new(config);
            let options = StreakOptions { json, quiet };
            let output = cmd.run(&data, now, &options);
            print_formatted(cmd.format_output(&output, &options));
        }
        Commands::Heatmap {
            from,
            to,
            json,
            quiet,
        } => {
            use ember::cli::heatmap_cmd::HeatmapOptions;
            let cmd = HeatmapCommand::new(config);
            let options = HeatmapOptions {
                json,
                quiet,
                from,
                to,
            };
            let output = cmd.run(&data, &options);
            print_formatted(cmd.format_output(&output, &options));
        }
        Commands::Schedule {
            stability,
            count,
            json,
            quiet,
        } => {
            use ember::cli::schedule_cmd::ScheduleOptions;
            let cmd = ScheduleCommand::new(config);
            let options = ScheduleOptions {
                json,
                quiet,
                stability,
                count,
            };
            let output = cmd.run(&data, now, &options)?;
            print_formatted(cmd.format_output(&output, &options));
        }
        Commands::Recommend { json, quiet } => {
            use ember::cli::recommend_cmd::RecommendOptions;
            let cmd = RecommendCommand::new(config);
            let options = RecommendOptions { json, quiet };
            let output = cmd.run(&data, now, &options);
            print_formatted(cmd.format_output(&output, &options));
        }
    }

    Ok(())
}

/// Missing data files are fine, the commands just see empty history.
fn load_data(path: &Path) -> Result<LearnerData, Box<dyn std::error::Error>> {
    if path.exists() {
        Ok(LearnerData::load(path)?)
    } else {
        Ok(LearnerData::default())
    }
}

fn print_formatted(formatted: String) {
    if !formatted.is_empty() {
        println!("{}", formatted);
    }
}
