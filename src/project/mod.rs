//! Local Lean projects: configuration, source files, and encryption.
//!
//! This module provides:
//! - `ProjectConfig` and `ProjectEncryptionState` (`config`)
//! - source file discovery, reading and writing (`source_files`)
//! - the encrypt/decrypt orchestration over a project's files (`cipher`)

pub mod cipher;
pub mod config;
pub mod source_files;

// Re-export the most commonly used items.
pub use cipher::{
    decrypt_project, encrypt_project, resolve_key_path, transform_project_files,
    validate_key_state, ActionType, ProjectContext,
};
pub use config::{ProjectConfig, ProjectEncryptionState, PROJECT_CONFIG_FILE_NAME};
pub use source_files::{discover_source_files, load_source_files, write_source_files, SourceFile};
