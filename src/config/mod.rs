//! Configuration files.
//!
//! - `settings`: tool settings from `.leancrypt.toml`
//! - `lean`: the Lean CLI `lean.json`, source of the working organization

pub mod lean;
pub mod settings;

pub use lean::LeanConfig;
pub use settings::Settings;

use std::path::{Path, PathBuf};

/// Walk up from `start` looking for a file named `file_name`.
///
/// Returns the first match, or `None` once the filesystem root is reached.
pub fn find_upwards(start: &Path, file_name: &str) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(file_name);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}
