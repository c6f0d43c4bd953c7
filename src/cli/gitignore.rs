//! Shared `.gitignore` patching logic.
//!
//! Used by `keygen` so generated key files stay out of version control.

use std::fs;
use std::path::Path;

use crate::cli::output;

/// Append `entry` to `.gitignore` if not already present.
///
/// Creates the file if it doesn't exist. Write errors are ignored.
pub fn patch_gitignore(dir: &Path, entry: &str) {
    let gitignore_path = dir.join(".gitignore");
    let entry = entry.replace('\\', "/");
    let entry = entry.as_str();

    let existing = fs::read_to_string(&gitignore_path).unwrap_or_default();

    if existing.lines().any(|line| line.trim() == entry) {
        return;
    }

    let separator = if existing.ends_with('\n') || existing.is_empty() {
        ""
    } else {
        "\n"
    };

    if fs::write(&gitignore_path, format!("{existing}{separator}{entry}\n")).is_ok() {
        output::info(&format!("Added '{entry}' to .gitignore"));
    }
}
