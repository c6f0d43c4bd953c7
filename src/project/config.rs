//! Per-project configuration (`<project>/config.json`).
//!
//! The file is a flat JSON object shared with other Lean tooling, so keys
//! this crate does not own are loaded and written back untouched. Saves go
//! through a temp file and a rename.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::{LeanCryptError, Result};

/// File name of the project configuration.
pub const PROJECT_CONFIG_FILE_NAME: &str = "config.json";

pub const ENCRYPTED_KEY: &str = "encrypted";
pub const ENCRYPTION_KEY_PATH_KEY: &str = "encryption-key-path";
pub const ENCRYPTION_KEY_ID_KEY: &str = "encryption-key-id";

/// Encryption-related view of a project's configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectEncryptionState {
    pub encrypted: bool,
    pub encryption_key_path: Option<PathBuf>,
    /// MD5 of the key file the project was encrypted with.
    pub encryption_key_id: Option<String>,
}

/// JSON-backed configuration of a single project.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    path: PathBuf,
    data: Map<String, Value>,
}

impl ProjectConfig {
    /// Load `<project_dir>/config.json`; a missing or empty file is an
    /// empty configuration.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(PROJECT_CONFIG_FILE_NAME);

        let data = if path.is_file() {
            let content = fs::read_to_string(&path)?;
            if content.trim().is_empty() {
                Map::new()
            } else {
                match serde_json::from_str::<Value>(&content) {
                    Ok(Value::Object(map)) => map,
                    Ok(_) => {
                        return Err(LeanCryptError::Config(format!(
                            "{} must contain a JSON object",
                            path.display()
                        )))
                    }
                    Err(e) => {
                        return Err(LeanCryptError::Config(format!(
                            "Failed to parse {}: {e}",
                            path.display()
                        )))
                    }
                }
            }
        } else {
            Map::new()
        };

        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Boolean value of `key`, or `default` when unset or not a bool.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.data.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// String value of `key`, if set to a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(Value::as_str)
    }

    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Assign `value` to `key` and save.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        self.data.insert(key.to_string(), value.into());
        self.save()
    }

    /// Remove `key` and save.
    pub fn delete(&mut self, key: &str) -> Result<()> {
        self.data.remove(key);
        self.save()
    }

    /// Typed view of the encryption fields.
    pub fn encryption_state(&self) -> ProjectEncryptionState {
        ProjectEncryptionState {
            encrypted: self.get_bool(ENCRYPTED_KEY, false),
            encryption_key_path: self
                .get_str(ENCRYPTION_KEY_PATH_KEY)
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            encryption_key_id: self
                .get_str(ENCRYPTION_KEY_ID_KEY)
                .filter(|id| !id.is_empty())
                .map(str::to_string),
        }
    }

    /// Record that every source file is now encrypted with `key_path`.
    ///
    /// All three fields are written in a single save.
    pub fn mark_encrypted(&mut self, key_path: &Path, key_id: &str) -> Result<()> {
        self.data.insert(ENCRYPTED_KEY.into(), Value::Bool(true));
        self.data.insert(
            ENCRYPTION_KEY_PATH_KEY.into(),
            Value::String(key_path.to_string_lossy().into_owned()),
        );
        self.data
            .insert(ENCRYPTION_KEY_ID_KEY.into(), Value::String(key_id.to_string()));
        self.save()
    }

    /// Record that every source file is plaintext again and forget the key.
    pub fn mark_decrypted(&mut self) -> Result<()> {
        self.data.insert(ENCRYPTED_KEY.into(), Value::Bool(false));
        self.data.remove(ENCRYPTION_KEY_PATH_KEY);
        self.data.remove(ENCRYPTION_KEY_ID_KEY);
        self.save()
    }

    fn save(&self) -> Result<()> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.data
            .serialize(&mut serializer)
            .map_err(|e| LeanCryptError::Serialization(format!("project config: {e}")))?;
        buf.push(b'\n');

        // Atomic write: temp file next to the target, then rename.
        let parent = self.path.parent().unwrap_or(Path::new("."));
        let tmp_path = parent.join(format!(".{PROJECT_CONFIG_FILE_NAME}.tmp"));

        fs::write(&tmp_path, &buf)?;
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }
}
