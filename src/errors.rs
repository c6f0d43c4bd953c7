use std::path::{Path, PathBuf};
use thiserror::Error;

/// All errors that can occur in leancrypt.
#[derive(Debug, Error)]
pub enum LeanCryptError {
    // --- Key errors ---
    #[error("No encryption key was provided, please provide one using --key")]
    MissingKey,

    #[error("Registered encryption key {registered} is different from the one provided {provided}")]
    KeyMismatch { registered: String, provided: String },

    #[error("Given encryption key is not registered with the cloud")]
    KeyNotRegistered,

    #[error("Key file error: {0}")]
    Keyfile(String),

    // --- Cipher errors ---
    #[error("Failed to {action} file {file}: {source}")]
    CipherFailure {
        action: &'static str,
        file: String,
        #[source]
        source: Box<LeanCryptError>,
    },

    #[error("Decryption failed: wrong key or corrupted content")]
    DecryptionFailed,

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Project errors ---
    #[error("Failed to {action} file {}: {source}", .path.display())]
    SourceFile {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Project not found at {0}")]
    ProjectNotFound(PathBuf),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    #[error(
        "The working organization could not be determined. \
         Pass --organization, set LEAN_ORGANIZATION_ID or run inside a Lean CLI folder"
    )]
    OrganizationNotFound,

    // --- CLI errors ---
    #[error("{0}")]
    InvalidFlags(String),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl LeanCryptError {
    /// Attach the source file path to an I/O failure.
    pub fn source_file(action: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::SourceFile {
            action,
            path: path.to_path_buf(),
            source,
        }
    }

    /// Wrap a per-file failure so the user sees which file aborted the batch.
    pub fn cipher_failure(action: &'static str, file: impl Into<String>, source: Self) -> Self {
        Self::CipherFailure {
            action,
            file: file.into(),
            source: Box::new(source),
        }
    }
}

/// Convenience type alias for leancrypt results.
pub type Result<T> = std::result::Result<T, LeanCryptError>;
