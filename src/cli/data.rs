//! Learner data file loading.
//!
//! Every Ember command reads a single JSON export of the learner's history.
//! The file is produced by whatever app records the learning activity;
//! Ember only reads it and never writes it back.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{MasteryProgress, QuizSummary, RetentionRecord, SessionSummary, StreakRecord};
use crate::util::read_to_string_limited;

/// The learner's exported history. Every section is optional in the file;
/// missing sections deserialize as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearnerData {
    /// Completed practice sessions.
    #[serde(default)]
    pub sessions: Vec<SessionSummary>,
    /// Completed quizzes.
    #[serde(default)]
    pub quizzes: Vec<QuizSummary>,
    /// Per-topic mastery state.
    #[serde(default)]
    pub mastery: Vec<MasteryProgress>,
    /// Spaced-repetition item state.
    #[serde(default)]
    pub retention: Vec<RetentionRecord>,
    /// Streak state.
    #[serde(default)]
    pub streak: StreakRecord,
    /// Activity counts per calendar day, for the heatmap.
    #[serde(default)]
    pub activity: BTreeMap<NaiveDate, u32>,
}

impl LearnerData {
    /// Load learner data from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = read_to_string_limited(path)?;
        let data = serde_json::from_str(&content)?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learner.json");
        fs::write(&path, "{}").unwrap();

        let data = LearnerData::load(&path).unwrap();
        assert!(data.sessions.is_empty());
        assert!(data.retention.is_empty());
        assert_eq!(data.streak.current_streak, 0);
    }

    #[test]
    fn test_load_partial_sections() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learner.json");
        fs::write(
            &path,
            r#"{
                "streak": {"current_streak": 4, "longest_streak": 9},
                "activity": {"2026-03-10": 3}
            }"#,
        )
        .unwrap();

        let data = LearnerData::load(&path).unwrap();
        assert_eq!(data.streak.current_streak, 4);
        assert_eq!(data.streak.longest_streak, 9);
        assert_eq!(
            data.activity
                .get(&NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()),
            Some(&3)
        );
    }

    #[test]
    fn test_load_invalid_json_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("learner.json");
        fs::write(&path, "not json").unwrap();

        assert!(LearnerData::load(&path).is_err());
    }

    #[test]
    fn test_load_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(LearnerData::load(&dir.path().join("absent.json")).is_err());
    }
}
