//! The Lean CLI configuration file (`lean.json`).
//!
//! Only the working organization is read from it. The file is JSON with
//! `//` and `/* */` comments allowed, so comments are stripped first.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::errors::{LeanCryptError, Result};

/// File name of the Lean CLI configuration.
pub const LEAN_CONFIG_FILE_NAME: &str = "lean.json";

/// Parsed `lean.json`.
#[derive(Debug, Clone)]
pub struct LeanConfig {
    path: PathBuf,
    values: Map<String, Value>,
}

impl LeanConfig {
    /// Find the closest `lean.json` at or above `start`.
    pub fn locate(start: &Path) -> Option<PathBuf> {
        super::find_upwards(start, LEAN_CONFIG_FILE_NAME)
    }

    /// Read and parse the Lean config at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let values = parse_commented_json(&content).map_err(|e| {
            LeanCryptError::Config(format!("Failed to parse {}: {e}", path.display()))
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The working organization id.
    ///
    /// `job-organization-id` wins; `organization-id` is the older key.
    pub fn organization_id(&self) -> Option<String> {
        ["job-organization-id", "organization-id"]
            .iter()
            .find_map(|key| match self.values.get(*key) {
                Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                _ => None,
            })
    }
}

fn block_comment() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)/\*.*?\*/").expect("valid block comment regex"))
}

/// Parse JSON that may contain comments into an object.
pub fn parse_commented_json(content: &str) -> std::result::Result<Map<String, Value>, String> {
    let without_blocks = block_comment().replace_all(content, "");
    let stripped: Vec<&str> = without_blocks.lines().map(strip_line_comment).collect();
    let cleaned = stripped.join("\n");

    if cleaned.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("expected a JSON object".into()),
        Err(e) => Err(e.to_string()),
    }
}

/// Cut a line at the first `//` that is not inside a string literal.
fn strip_line_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
        } else if b == b'"' {
            in_string = true;
        } else if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            return &line[..i];
        }
    }
    line
}
