//! Unified error types for Ember.
//!
//! The engines themselves surface only argument errors: domain violations
//! at the call site (mismatched batch weights, a review rating outside 1-4,
//! a retention threshold outside the open interval (0,1)). Degenerate data
//! (empty collections, zero denominators) is never an error; every engine
//! resolves it to a documented default.
//!
//! The CLI and config layers add storage, config, and data-file errors on
//! top of the engine set.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Ember operations.
#[derive(Error, Debug)]
pub enum EmberError {
    /// Batch scoring weights do not match the outcome count.
    #[error("weights length mismatch: {expected} outcomes but {found} weights")]
    WeightLengthMismatch { expected: usize, found: usize },

    /// Review rating outside the 1-4 scale.
    #[error("review rating out of range: {value} (expected 1-4)")]
    RatingOutOfRange { value: u8 },

    /// Retention threshold outside the open interval (0, 1).
    #[error("retention threshold out of range: {value} (expected 0 < t < 1)")]
    ThresholdOutOfRange { value: f64 },

    /// I/O errors from data or config file operations.
    #[error("storage error at {path}: {source}")]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration loading errors.
    #[error("config error: {message}")]
    Config { message: String },

    /// Learner data file parsing errors.
    #[error("data error: {message}")]
    Data { message: String },
}

/// A specialized Result type for Ember operations.
pub type Result<T> = std::result::Result<T, EmberError>;

impl EmberError {
    /// Create a storage error from an I/O error.
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Create a config error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a data error.
    pub fn data(message: impl Into<String>) -> Self {
        Self::Data {
            message: message.into(),
        }
    }

    /// Whether this error is a precondition violation at the call site.
    ///
    /// Argument errors should be fixed by the caller, not caught and
    /// retried; storage/config/data errors are runtime conditions.
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::WeightLengthMismatch { .. }
                | Self::RatingOutOfRange { .. }
                | Self::ThresholdOutOfRange { .. }
        )
    }
}

impl From<io::Error> for EmberError {
    fn from(err: io::Error) -> Self {
        Self::Storage {
            path: PathBuf::new(),
            source: err,
        }
    }
}

impl From<serde_json::Error> for EmberError {
    fn from(err: serde_json::Error) -> Self {
        Self::Data {
            message: err.to_string(),
        }
    }
}
