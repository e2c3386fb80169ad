//! Configuration loading for Ember.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.ember/config.toml`)
//! 3. User config (`~/.ember/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. The engines run with the documented
//! defaults when no config exists.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EmberError, Result};
use crate::model::RecommendationType;

/// Main configuration struct for Ember.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Mastery scoring configuration.
    pub mastery: MasteryConfig,
    /// Memory retention configuration.
    pub retention: RetentionConfig,
    /// Streak tracking configuration.
    pub streak: StreakConfig,
    /// Recommendation analysis configuration.
    pub recommendation: RecommendationConfig,
}

/// Mastery scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MasteryConfig {
    /// EMA smoothing weight, in (0, 1]. Higher values chase recent attempts.
    pub alpha: f64,
    /// Below this attempt count a running simple average is used instead of
    /// the EMA.
    pub min_attempts: u32,
    /// Per-period multiplicative decay applied to stale scores.
    pub decay_factor: f64,
    /// Grace period, in days, before inactivity decay begins.
    pub decay_period_days: u32,
}

impl MasteryConfig {
    /// Check if an alpha value is valid (finite, in (0, 1]).
    pub fn is_valid_alpha(value: f64) -> bool {
        value.is_finite() && value > 0.0 && value <= 1.0
    }

    /// Check if a decay factor is valid (finite, in (0, 1]).
    pub fn is_valid_decay_factor(value: f64) -> bool {
        value.is_finite() && value > 0.0 && value <= 1.0
    }
}

impl Default for MasteryConfig {
    fn default() -> Self {
        Self {
            alpha: 0.3,
            min_attempts: 3,
            decay_factor: 0.95,
            decay_period_days: 7,
        }
    }
}

/// Memory retention configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetentionConfig {
    /// Stability assigned to newly learned items, in days.
    pub initial_stability: f64,
    /// Multiplier applied to stability on a "good" review.
    pub stability_growth_factor: f64,
    /// How strongly difficulty dampens stability growth, in [0, 1].
    pub difficulty_weight: f64,
    /// Recall probability at which the next review is scheduled,
    /// strictly within (0, 1).
    pub target_retention: f64,
}

impl RetentionConfig {
    /// Check if a target retention is valid (strictly inside (0, 1)).
    pub fn is_valid_target_retention(value: f64) -> bool {
        value.is_finite() && value > 0.0 && value < 1.0
    }
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            initial_stability: 1.0,
            stability_growth_factor: 2.5,
            difficulty_weight: 0.5,
            target_retention: 0.9,
        }
    }
}

/// Streak tracking configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreakConfig {
    /// Missed days tolerated without breaking a streak.
    pub freeze_days: u32,
    /// Hours past midnight still counted as the previous day.
    pub grace_period_hours: u32,
}

/// Recommendation analysis configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Session accuracy below this triggers the accuracy rule, in [0, 1].
    pub accuracy_threshold: f64,
    /// Skip rate above this triggers the skip-pattern rule, in [0, 1].
    pub skip_threshold: f64,
    /// Average seconds per question above this triggers the
    /// time-management rule.
    pub time_threshold_seconds: f64,
    /// Retrievability below this marks an item as due, in [0, 1].
    pub retention_threshold: f64,
    /// Maximum recommendations returned per analysis run.
    pub max_recommendations: usize,
    /// Minimum sessions (or quizzes) before the full analysis runs.
    pub min_sessions_for_analysis: usize,
    /// Recommendation kinds to generate. Empty means all kinds.
    pub enabled_kinds: Vec<RecommendationType>,
}

impl RecommendationConfig {
    /// Check if a threshold fraction is valid (finite, in [0, 1]).
    pub fn is_valid_fraction(value: f64) -> bool {
        value.is_finite() && (0.0..=1.0).contains(&value)
    }

    /// Whether a recommendation kind should be generated.
    pub fn is_kind_enabled(&self, kind: RecommendationType) -> bool {
        self.enabled_kinds.is_empty() || self.enabled_kinds.contains(&kind)
    }
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            accuracy_threshold: 0.6,
            skip_threshold: 0.3,
            time_threshold_seconds: 60.0,
            retention_threshold: 0.7,
            max_recommendations: 5,
            min_sessions_for_analysis: 3,
            enabled_kinds: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration with the full precedence chain.
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Load user config from `~/.ember/config.toml`.
    fn load_user_config() -> Option<Config> {
        let home = ember_home()?;
        let config_path = home.join("config.toml");
        Self::load_from_file(&config_path).ok()
    }

    /// Load project config from `.ember/config.toml` in the given directory.
    fn load_project_config(cwd: &Path) -> Option<Config> {
        let config_path = cwd.join(".ember").join("config.toml");
        Self::load_from_file(&config_path).ok()
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| EmberError::storage(path, e))?;
        toml::from_str(&content).map_err(|e| EmberError::config(e.to_string()))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // EMBER_ALPHA
        if let Ok(val) = env::var("EMBER_ALPHA") {
            match val.parse::<f64>() {
                Ok(n) if MasteryConfig::is_valid_alpha(n) => self.mastery.alpha = n,
                Ok(n) => tracing::warn!(
                    "invalid EMBER_ALPHA value '{}': must be in (0, 1]; keeping {}",
                    n,
                    self.mastery.alpha
                ),
                Err(_) => tracing::warn!(
                    "invalid EMBER_ALPHA value '{}': expected a decimal number",
                    val
                ),
            }
        }

        // EMBER_TARGET_RETENTION
        if let Ok(val) = env::var("EMBER_TARGET_RETENTION") {
            match val.parse::<f64>() {
                Ok(n) if RetentionConfig::is_valid_target_retention(n) => {
                    self.retention.target_retention = n;
                }
                Ok(n) => tracing::warn!(
                    "invalid EMBER_TARGET_RETENTION value '{}': must be strictly within (0, 1); keeping {}",
                    n,
                    self.retention.target_retention
                ),
                Err(_) => tracing::warn!(
                    "invalid EMBER_TARGET_RETENTION value '{}': expected a decimal number",
                    val
                ),
            }
        }

        // EMBER_FREEZE_DAYS
        if let Ok(val) = env::var("EMBER_FREEZE_DAYS") {
            match val.parse::<u32>() {
                Ok(n) => self.streak.freeze_days = n,
                Err(_) => tracing::warn!(
                    "invalid EMBER_FREEZE_DAYS value '{}': expected a non-negative integer",
                    val
                ),
            }
        }

        // EMBER_GRACE_HOURS
        if let Ok(val) = env::var("EMBER_GRACE_HOURS") {
            match val.parse::<u32>() {
                Ok(n) => self.streak.grace_period_hours = n,
                Err(_) => tracing::warn!(
                    "invalid EMBER_GRACE_HOURS value '{}': expected a non-negative integer",
                    val
                ),
            }
        }

        // EMBER_MAX_RECOMMENDATIONS
        if let Ok(val) = env::var("EMBER_MAX_RECOMMENDATIONS") {
            match val.parse::<usize>() {
                Ok(n) => self.recommendation.max_recommendations = n,
                Err(_) => tracing::warn!(
                    "invalid EMBER_MAX_RECOMMENDATIONS value '{}': expected a positive integer",
                    val
                ),
            }
        }

        // EMBER_ACCURACY_THRESHOLD
        if let Ok(val) = env::var("EMBER_ACCURACY_THRESHOLD") {
            match val.parse::<f64>() {
                Ok(n) if RecommendationConfig::is_valid_fraction(n) => {
                    self.recommendation.accuracy_threshold = n;
                }
                Ok(n) => tracing::warn!(
                    "invalid EMBER_ACCURACY_THRESHOLD value '{}': must be in [0, 1]; keeping {}",
                    n,
                    self.recommendation.accuracy_threshold
                ),
                Err(_) => tracing::warn!(
                    "invalid EMBER_ACCURACY_THRESHOLD value '{}': expected a decimal number",
                    val
                ),
            }
        }
    }

    /// Merge another config into this one.
    ///
    /// The `other` config takes precedence. Field-by-field merging: a field
    /// is taken from `other` only when it differs from the default, which
    /// enables additive layering of the precedence chain. A config cannot
    /// explicitly set a value *back* to the default to mask a lower layer.
    fn merge(mut self, other: Config) -> Self {
        let d = MasteryConfig::default();
        if other.mastery.alpha != d.alpha {
            self.mastery.alpha = other.mastery.alpha;
        }
        if other.mastery.min_attempts != d.min_attempts {
            self.mastery.min_attempts = other.mastery.min_attempts;
        }
        if other.mastery.decay_factor != d.decay_factor {
            self.mastery.decay_factor = other.mastery.decay_factor;
        }
        if other.mastery.decay_period_days != d.decay_period_days {
            self.mastery.decay_period_days = other.mastery.decay_period_days;
        }

        let d = RetentionConfig::default();
        if other.retention.initial_stability != d.initial_stability {
            self.retention.initial_stability = other.retention.initial_stability;
        }
        if other.retention.stability_growth_factor != d.stability_growth_factor {
            self.retention.stability_growth_factor = other.retention.stability_growth_factor;
        }
        if other.retention.difficulty_weight != d.difficulty_weight {
            self.retention.difficulty_weight = other.retention.difficulty_weight;
        }
        if other.retention.target_retention != d.target_retention {
            self.retention.target_retention = other.retention.target_retention;
        }

        let d = StreakConfig::default();
        if other.streak.freeze_days != d.freeze_days {
            self.streak.freeze_days = other.streak.freeze_days;
        }
        if other.streak.grace_period_hours != d.grace_period_hours {
            self.streak.grace_period_hours = other.streak.grace_period_hours;
        }

        let d = RecommendationConfig::default();
        if other.recommendation.accuracy_threshold != d.accuracy_threshold {
            self.recommendation.accuracy_threshold = other.recommendation.accuracy_threshold;
        }
        if other.recommendation.skip_threshold != d.skip_threshold {
            self.recommendation.skip_threshold = other.recommendation.skip_threshold;
        }
        if other.recommendation.time_threshold_seconds != d.time_threshold_seconds {
            self.recommendation.time_threshold_seconds =
                other.recommendation.time_threshold_seconds;
        }
        if other.recommendation.retention_threshold != d.retention_threshold {
            self.recommendation.retention_threshold = other.recommendation.retention_threshold;
        }
        if other.recommendation.max_recommendations != d.max_recommendations {
            self.recommendation.max_recommendations = other.recommendation.max_recommendations;
        }
        if other.recommendation.min_sessions_for_analysis != d.min_sessions_for_analysis {
            self.recommendation.min_sessions_for_analysis =
                other.recommendation.min_sessions_for_analysis;
        }
        if other.recommendation.enabled_kinds != d.enabled_kinds {
            self.recommendation.enabled_kinds = other.recommendation.enabled_kinds;
        }

        self
    }
}

/// Get the Ember home directory.
///
/// Checks the `EMBER_HOME` environment variable first, then falls back to
/// `~/.ember`. An empty or relative `EMBER_HOME` is ignored.
pub fn ember_home() -> Option<PathBuf> {
    if let Ok(home) = env::var("EMBER_HOME") {
        if !home.trim().is_empty() {
            let path = PathBuf::from(&home);
            if path.is_absolute() {
                return Some(path);
            }
            tracing::warn!("ignoring relative EMBER_HOME '{}'", home);
        }
    }

    dirs::home_dir().map(|h| h.join(".ember"))
}

/// Get the project-level Ember directory: `<cwd>/.ember`.
pub fn project_ember_dir(cwd: &Path) -> PathBuf {
    cwd.join(".ember")
}

/// Get the default learner data file path: `<cwd>/.ember/learner.json`.
pub fn project_learner_data_path(cwd: &Path) -> PathBuf {
    project_ember_dir(cwd).join("learner.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.mastery.alpha, 0.3);
        assert_eq!(config.mastery.min_attempts, 3);
        assert_eq!(config.mastery.decay_factor, 0.95);
        assert_eq!(config.mastery.decay_period_days, 7);
        assert_eq!(config.retention.initial_stability, 1.0);
        assert_eq!(config.retention.stability_growth_factor, 2.5);
        assert_eq!(config.retention.difficulty_weight, 0.5);
        assert_eq!(config.retention.target_retention, 0.9);
        assert_eq!(config.streak.freeze_days, 0);
        assert_eq!(config.streak.grace_period_hours, 0);
        assert_eq!(config.recommendation.max_recommendations, 5);
        assert_eq!(config.recommendation.min_sessions_for_analysis, 3);
        assert!(config.recommendation.enabled_kinds.is_empty());
    }

    #[test]
    fn test_is_valid_alpha() {
        assert!(MasteryConfig::is_valid_alpha(0.3));
        assert!(MasteryConfig::is_valid_alpha(1.0));
        assert!(!MasteryConfig::is_valid_alpha(0.0));
        assert!(!MasteryConfig::is_valid_alpha(1.1));
        assert!(!MasteryConfig::is_valid_alpha(f64::NAN));
    }

    #[test]
    fn test_is_valid_target_retention() {
        assert!(RetentionConfig::is_valid_target_retention(0.9));
        assert!(!RetentionConfig::is_valid_target_retention(0.0));
        assert!(!RetentionConfig::is_valid_target_retention(1.0));
        assert!(!RetentionConfig::is_valid_target_retention(f64::INFINITY));
    }

    #[test]
    fn test_is_kind_enabled_empty_means_all() {
        let config = RecommendationConfig::default();
        for &kind in RecommendationType::all() {
            assert!(config.is_kind_enabled(kind));
        }
    }

    #[test]
    fn test_is_kind_enabled_filtered() {
        let config = RecommendationConfig {
            enabled_kinds: vec![RecommendationType::Streak],
            ..Default::default()
        };
        assert!(config.is_kind_enabled(RecommendationType::Streak));
        assert!(!config.is_kind_enabled(RecommendationType::Accuracy));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[mastery]
alpha = 0.5

[streak]
freeze_days = 2
"#,
        )
        .unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.mastery.alpha, 0.5);
        assert_eq!(config.streak.freeze_days, 2);
        // Unspecified sections keep defaults
        assert_eq!(config.retention.target_retention, 0.9);
    }

    #[test]
    fn test_load_from_file_invalid_toml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "not [valid toml").unwrap();

        let result = Config::load_from_file(&path);
        assert!(matches!(result, Err(EmberError::Config { .. })));
    }

    #[test]
    fn test_load_from_file_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.toml");
        assert!(Config::load_from_file(&path).is_err());
    }

    #[test]
    fn test_merge_takes_non_default_fields() {
        let base = Config::default();
        let overlay = Config {
            mastery: MasteryConfig {
                alpha: 0.6,
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(overlay);
        assert_eq!(merged.mastery.alpha, 0.6);
        assert_eq!(merged.mastery.min_attempts, 3);
    }

    #[test]
    fn test_merge_layering() {
        let user = Config {
            streak: StreakConfig {
                freeze_days: 1,
                grace_period_hours: 3,
            },
            ..Default::default()
        };
        let project = Config {
            streak: StreakConfig {
                freeze_days: 2,
                grace_period_hours: 0,
            },
            ..Default::default()
        };

        // Project layer overrides freeze_days, leaves default grace alone
        let merged = Config::default().merge(user).merge(project);
        assert_eq!(merged.streak.freeze_days, 2);
        assert_eq!(merged.streak.grace_period_hours, 3);
    }

    #[test]
    #[serial]
    fn test_env_override_alpha() {
        env::set_var("EMBER_ALPHA", "0.7");
        let mut config = Config::default();
        config.apply_env_overrides();
        env::remove_var("EMBER_ALPHA");

        assert_eq!(config.mastery.alpha, 0.7);
    }

    #[test]
    #[serial]
    fn test_env_override_invalid_alpha_ignored() {
        env::set_var("EMBER_ALPHA", "2.5");
        let mut config = Config::default();
        config.apply_env_overrides();
        env::remove_var("EMBER_ALPHA");

        assert_eq!(config.mastery.alpha, 0.3);
    }

    #[test]
    #[serial]
    fn test_env_override_freeze_days() {
        env::set_var("EMBER_FREEZE_DAYS", "3");
        let mut config = Config::default();
        config.apply_env_overrides();
        env::remove_var("EMBER_FREEZE_DAYS");

        assert_eq!(config.streak.freeze_days, 3);
    }

    #[test]
    #[serial]
    fn test_ember_home_with_env() {
        env::set_var("EMBER_HOME", "/tmp/ember-test-home");
        let home = ember_home().unwrap();
        env::remove_var("EMBER_HOME");

        assert_eq!(home, PathBuf::from("/tmp/ember-test-home"));
    }

    #[test]
    #[serial]
    fn test_ember_home_fallback() {
        env::remove_var("EMBER_HOME");
        let home = ember_home();
        if let Some(path) = home {
            assert!(path.ends_with(".ember"));
        }
    }

    #[test]
    #[serial]
    fn test_ember_home_relative_env_ignored() {
        env::set_var("EMBER_HOME", "relative/path");
        let home = ember_home();
        env::remove_var("EMBER_HOME");

        if let Some(path) = home {
            assert!(path.ends_with(".ember"));
        }
    }

    #[test]
    fn test_project_paths() {
        let cwd = Path::new("/work/project");
        assert_eq!(
            project_learner_data_path(cwd),
            PathBuf::from("/work/project/.ember/learner.json")
        );
    }

    #[test]
    #[serial]
    fn test_load_from_cwd_project_config() {
        let temp = TempDir::new().unwrap();
        let ember_dir = temp.path().join(".ember");
        fs::create_dir_all(&ember_dir).unwrap();
        fs::write(
            ember_dir.join("config.toml"),
            "[recommendation]\nmax_recommendations = 10\n",
        )
        .unwrap();

        // Point the user layer somewhere empty so it doesn't interfere
        env::set_var("EMBER_HOME", temp.path().join("no-user-config").as_os_str());
        let config = Config::load_from_cwd(temp.path());
        env::remove_var("EMBER_HOME");

        assert_eq!(config.recommendation.max_recommendations, 10);
    }

    #[test]
    fn test_config_toml_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let back: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, back);
    }
}
