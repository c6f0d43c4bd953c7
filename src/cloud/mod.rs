//! Encryption of cloud project files.
//!
//! Same protocol as local projects, but the state comes from the cloud
//! project's own `encrypted` flag and `encryptionKey.id` instead of the
//! local `config.json`, and the files are in-memory records.

pub mod types;
pub mod validation;

pub use types::{CloudDocument, CloudFile, CloudProject, ProjectEncryptionKey, RegisteredKey};
pub use validation::{
    validate_key_and_encryption_state_for_cloud_project, validate_key_registered,
    validate_push_pull_flags, CloudStateCheck, EncryptionKeyRegistry,
};

use std::path::Path;

use crate::crypto::keyfile::{hash_keyfile, key_ids_match};
use crate::crypto::KeyMaterial;
use crate::errors::{LeanCryptError, Result};
use crate::project::cipher::transform_content;
use crate::project::ActionType;

/// Encrypt the content of every file of a plaintext cloud project.
///
/// Files of an already encrypted project are returned unchanged, unless the
/// project's registered key differs from `key_path`.
pub fn encrypt_cloud_files(
    project: &CloudProject,
    files: Vec<CloudFile>,
    key_path: &Path,
    organization_id: &str,
) -> Result<Vec<CloudFile>> {
    transform_cloud_files(project, files, key_path, organization_id, ActionType::Encrypt)
}

/// Decrypt the content of every file of an encrypted cloud project.
///
/// Files of a plaintext project are returned unchanged.
pub fn decrypt_cloud_files(
    project: &CloudProject,
    files: Vec<CloudFile>,
    key_path: &Path,
    organization_id: &str,
) -> Result<Vec<CloudFile>> {
    transform_cloud_files(project, files, key_path, organization_id, ActionType::Decrypt)
}

/// Run `action` over the content of `files`, aborting on the first failure.
pub fn transform_cloud_files(
    project: &CloudProject,
    mut files: Vec<CloudFile>,
    key_path: &Path,
    organization_id: &str,
    action: ActionType,
) -> Result<Vec<CloudFile>> {
    check_registered_key(project, key_path)?;

    if action.is_noop_for(project.is_encrypted()) {
        return Ok(files);
    }

    let material = KeyMaterial::from_keyfile(key_path, organization_id)?;
    for file in &mut files {
        file.content = transform_content(&material, &file.content, action)
            .map_err(|e| LeanCryptError::cipher_failure(action.verb(), file.name.clone(), e))?;
    }
    Ok(files)
}

/// Fail if the cloud project is encrypted with a key other than `key_path`.
fn check_registered_key(project: &CloudProject, key_path: &Path) -> Result<()> {
    if !project.is_encrypted() {
        return Ok(());
    }
    let Some(registered) = &project.encryption_key else {
        return Ok(());
    };

    let provided_id = hash_keyfile(key_path)?;
    if key_ids_match(&provided_id, &registered.id) {
        Ok(())
    } else {
        Err(LeanCryptError::KeyMismatch {
            registered: format!("{} (id {})", registered.name, registered.id),
            provided: format!("{} (id {provided_id})", key_path.display()),
        })
    }
}

/// Update the cloud project's encryption fields after `action` succeeded.
///
/// A pass-through leaves the fields alone: the files were not touched by
/// `key`, so it must not be recorded as their key.
pub fn apply_encryption_state(
    project: &mut CloudProject,
    action: ActionType,
    key: Option<ProjectEncryptionKey>,
) {
    if action.is_noop_for(project.is_encrypted()) {
        return;
    }

    match action {
        ActionType::Encrypt => {
            project.encrypted = Some(true);
            if key.is_some() {
                project.encryption_key = key;
            }
        }
        ActionType::Decrypt => {
            project.encrypted = Some(false);
            project.encryption_key = None;
        }
    }
}
