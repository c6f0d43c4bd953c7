use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{LeanCryptError, Result};

/// Tool configuration, loaded from `.leancrypt.toml`.
///
/// Every field has a sensible default so leancrypt works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File extensions (without the dot) treated as project source files.
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,

    /// Directory names skipped while collecting source files.
    #[serde(default = "default_excluded_directories")]
    pub excluded_directories: Vec<String>,

    /// Organization id to use instead of the one in `lean.json`.
    #[serde(default)]
    pub organization_id: Option<String>,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_source_extensions() -> Vec<String> {
    ["py", "cs", "ipynb"].map(String::from).to_vec()
}

fn default_excluded_directories() -> Vec<String> {
    [
        "bin",
        "obj",
        ".ipynb_checkpoints",
        "backtests",
        "live",
        "optimizations",
    ]
    .map(String::from)
    .to_vec()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_extensions: default_source_extensions(),
            excluded_directories: default_excluded_directories(),
            organization_id: None,
        }
    }
}

impl Settings {
    /// Name of the config file we look for.
    pub const FILE_NAME: &'static str = ".leancrypt.toml";

    /// Load settings from `<dir>/.leancrypt.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(dir: &Path) -> Result<Self> {
        Self::load_file(&dir.join(Self::FILE_NAME))
    }

    /// Load settings from the nearest `.leancrypt.toml` at or above `start`.
    pub fn discover(start: &Path) -> Result<Self> {
        match Self::locate(start) {
            Some(path) => Self::load_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Path of the nearest `.leancrypt.toml` at or above `start`.
    pub fn locate(start: &Path) -> Option<PathBuf> {
        super::find_upwards(start, Self::FILE_NAME)
    }

    fn load_file(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            LeanCryptError::Config(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Whether `extension` (without the dot) marks a source file.
    pub fn is_source_extension(&self, extension: &str) -> bool {
        self.source_extensions
            .iter()
            .any(|e| e.trim_start_matches('.') == extension)
    }

    /// Whether a directory called `name` is skipped during discovery.
    pub fn is_excluded_directory(&self, name: &str) -> bool {
        self.excluded_directories.iter().any(|d| d == name)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
