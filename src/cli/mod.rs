//! CLI commands for Ember.
//!
//! Every command reads a learner data file, runs the relevant engines,
//! and prints either human-readable text or JSON.

pub mod data;
pub mod heatmap_cmd;
pub mod mastery_cmd;
pub mod recommend_cmd;
pub mod retention_cmd;
pub mod schedule_cmd;
pub mod streak_cmd;

pub use data::LearnerData;
pub use heatmap_cmd::HeatmapCommand;
pub use mastery_cmd::MasteryCommand;
pub use recommend_cmd::RecommendCommand;
pub use retention_cmd::RetentionCommand;
pub use schedule_cmd::ScheduleCommand;
pub use streak_cmd::StreakCommand;
