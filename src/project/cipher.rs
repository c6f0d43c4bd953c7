//! Project-level encryption and decryption.
//!
//! These functions are pure transforms over in-memory file contents: they
//! never write files and never touch the project configuration. The caller
//! writes the returned contents back and only then flips the persisted
//! state, so the state always describes a fully completed batch.
//!
//! Per project the state is `Plaintext` or `Encrypted`. Encrypting an
//! encrypted project (or decrypting a plaintext one) still runs the key
//! guard but returns the contents unchanged. One key and one IV are derived
//! per call and shared by every file; the IV reuse under CBC is inherent to
//! the stored format.

use std::path::{Path, PathBuf};

use crate::crypto::keyfile::{hash_keyfile, key_ids_match};
use crate::crypto::{decrypt_content, encrypt_content, KeyMaterial};
use crate::errors::{LeanCryptError, Result};
use crate::organization::OrganizationResolver;

use super::config::{ProjectConfig, ProjectEncryptionState};
use super::source_files::SourceFile;

/// Which way a batch of files is transformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionType {
    Encrypt,
    Decrypt,
}

impl ActionType {
    /// Lowercase verb for messages.
    pub fn verb(self) -> &'static str {
        match self {
            Self::Encrypt => "encrypt",
            Self::Decrypt => "decrypt",
        }
    }

    /// Whether a project in `encrypted` state is already where this action
    /// would take it.
    pub fn is_noop_for(self, encrypted: bool) -> bool {
        match self {
            Self::Encrypt => encrypted,
            Self::Decrypt => !encrypted,
        }
    }
}

/// What the orchestration functions need from their caller.
pub struct ProjectContext<'a> {
    pub config: &'a ProjectConfig,
    pub organizations: &'a dyn OrganizationResolver,
}

impl<'a> ProjectContext<'a> {
    pub fn new(config: &'a ProjectConfig, organizations: &'a dyn OrganizationResolver) -> Self {
        Self {
            config,
            organizations,
        }
    }
}

/// Pick the key file for an operation.
///
/// With neither a provided nor a registered key this is `MissingKey`; with
/// both and they differ it is `KeyMismatch`.
pub fn resolve_key_path(provided: Option<&Path>, registered: Option<&Path>) -> Result<PathBuf> {
    match (provided, registered) {
        (None, None) => Err(LeanCryptError::MissingKey),
        (Some(provided), None) => Ok(provided.to_path_buf()),
        (None, Some(registered)) => Ok(registered.to_path_buf()),
        (Some(provided), Some(registered)) => {
            if same_key_path(registered, provided) {
                Ok(registered.to_path_buf())
            } else {
                Err(key_path_mismatch(registered, provided))
            }
        }
    }
}

/// Check `key_path` against the key registered in `state`.
///
/// The path must match the registered path, and when a key id is recorded
/// and the file is readable its MD5 must match too.
pub fn validate_key_state(state: &ProjectEncryptionState, key_path: &Path) -> Result<()> {
    if let Some(registered) = &state.encryption_key_path {
        if !same_key_path(registered, key_path) {
            return Err(key_path_mismatch(registered, key_path));
        }
    }

    if let Some(expected_id) = &state.encryption_key_id {
        if key_path.is_file() {
            let actual_id = hash_keyfile(key_path)?;
            if !key_ids_match(&actual_id, expected_id) {
                return Err(LeanCryptError::KeyMismatch {
                    registered: format!("with id {expected_id}"),
                    provided: format!("{} (id {actual_id})", key_path.display()),
                });
            }
        }
    }

    Ok(())
}

/// Encrypt every file of a project and return the framed contents, one per
/// input file, in order.
pub fn encrypt_project(
    ctx: &ProjectContext<'_>,
    files: &[SourceFile],
    key_path: &Path,
) -> Result<Vec<String>> {
    transform_project_files(ctx, files, key_path, ActionType::Encrypt)
}

/// Decrypt every file of a project and return the plaintext contents, one
/// per input file, in order.
pub fn decrypt_project(
    ctx: &ProjectContext<'_>,
    files: &[SourceFile],
    key_path: &Path,
) -> Result<Vec<String>> {
    transform_project_files(ctx, files, key_path, ActionType::Decrypt)
}

/// Run `action` over `files`, aborting on the first failing file.
pub fn transform_project_files(
    ctx: &ProjectContext<'_>,
    files: &[SourceFile],
    key_path: &Path,
    action: ActionType,
) -> Result<Vec<String>> {
    let state = ctx.config.encryption_state();
    validate_key_state(&state, key_path)?;

    if action.is_noop_for(state.encrypted) {
        return Ok(files.iter().map(|f| f.content.clone()).collect());
    }

    let organization_id = ctx.organizations.try_get_working_organization_id()?;
    let material = KeyMaterial::from_keyfile(key_path, &organization_id)?;

    files
        .iter()
        .map(|file| {
            transform_content(&material, &file.content, action)
                .map_err(|e| LeanCryptError::cipher_failure(action.verb(), file.display_name(), e))
        })
        .collect()
}

/// Apply `action` to a single piece of content.
pub(crate) fn transform_content(
    material: &KeyMaterial,
    content: &str,
    action: ActionType,
) -> Result<String> {
    match action {
        ActionType::Encrypt => encrypt_content(material, content),
        ActionType::Decrypt => decrypt_content(material, content),
    }
}

/// Two key paths name the same key if they are equal as written or resolve
/// to the same file.
pub fn same_key_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn key_path_mismatch(registered: &Path, provided: &Path) -> LeanCryptError {
    LeanCryptError::KeyMismatch {
        registered: registered.display().to_string(),
        provided: provided.display().to_string(),
    }
}
