//! Source file discovery and I/O.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::crypto::keyfile::normalize_newlines;
use crate::errors::{LeanCryptError, Result};

/// A project file and its text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Read a file as UTF-8 text with newlines normalized to `\n`.
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| LeanCryptError::source_file("read", path, e))?;
        let text = String::from_utf8(bytes).map_err(|_| {
            let invalid = io::Error::new(io::ErrorKind::InvalidData, "not valid UTF-8 text");
            LeanCryptError::source_file("read", path, invalid)
        })?;

        Ok(Self::new(path, normalize_newlines(&text)))
    }

    /// Path for error messages.
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }
}

/// Collect the source files below `directory`, sorted by path.
pub fn discover_source_files(directory: &Path, settings: &Settings) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect(directory, settings, &mut files)?;
    files.sort();
    Ok(files)
}

fn collect(directory: &Path, settings: &Settings, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(directory).map_err(|e| LeanCryptError::source_file("list", directory, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| LeanCryptError::source_file("list", directory, e))?;
        let path = entry.path();
        // Symlinked directories are not followed.
        let file_type = entry
            .file_type()
            .map_err(|e| LeanCryptError::source_file("inspect", &path, e))?;

        if file_type.is_dir() {
            let skip = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| settings.is_excluded_directory(n));
            if !skip {
                collect(&path, settings, files)?;
            }
            continue;
        }

        let is_source = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| settings.is_source_extension(e));
        if is_source {
            files.push(path);
        }
    }
    Ok(())
}

/// Read every path into a `SourceFile`, in order.
pub fn load_source_files(paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
    paths.iter().map(|p| SourceFile::read(p)).collect()
}

/// Write `contents[i]` to `files[i]`, in order, stopping at the first error.
pub fn write_source_files(files: &[SourceFile], contents: &[String]) -> Result<()> {
    debug_assert_eq!(files.len(), contents.len());
    for (file, content) in files.iter().zip(contents) {
        fs::write(&file.path, content)
            .map_err(|e| LeanCryptError::source_file("write", &file.path, e))?;
    }
    Ok(())
}
