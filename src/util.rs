//! Utility functions for Ember.

use std::fs;
use std::path::Path;

use crate::error::{EmberError, Result};

/// Maximum file size that can be read into memory (10 MB).
///
/// Learner data files are small in normal use; the limit guards against
/// accidentally pointing Ember at the wrong file.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

/// Read a file into a string with size limit protection.
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be read (doesn't exist, permission denied, etc.)
/// * The file exceeds `MAX_FILE_SIZE`
pub fn read_to_string_limited(path: &Path) -> Result<String> {
    let metadata = fs::metadata(path).map_err(|e| EmberError::storage(path, e))?;

    let size = metadata.len();
    if size > MAX_FILE_SIZE {
        return Err(EmberError::data(format!(
            "File {} is too large ({} bytes, max {} bytes)",
            path.display(),
            size,
            MAX_FILE_SIZE
        )));
    }

    fs::read_to_string(path).map_err(|e| EmberError::storage(path, e))
}
