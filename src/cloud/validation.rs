//! Consistency checks run before pushing to or pulling from the cloud.

use std::path::Path;

use crate::crypto::keyfile::{hash_keyfile, key_ids_match};
use crate::errors::{LeanCryptError, Result};
use crate::project::ActionType;

use super::types::{CloudProject, RegisteredKey};

/// Source of the encryption keys registered with an organization.
pub trait EncryptionKeyRegistry {
    fn registered_keys(&self, organization_id: &str) -> Result<Vec<RegisteredKey>>;
}

/// A fixed list of keys, e.g. read from a cloud document.
impl EncryptionKeyRegistry for Vec<RegisteredKey> {
    fn registered_keys(&self, _organization_id: &str) -> Result<Vec<RegisteredKey>> {
        Ok(self.clone())
    }
}

/// Outcome of comparing a cloud project with its local counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudStateCheck {
    Consistent,
    /// Encryption states differ and no key was given; the side being
    /// written wins.
    ForceOverwrite,
}

/// Interpret the `--encrypt` / `--decrypt` / `--key` combination.
///
/// Returns the requested action, or `None` when neither flag is set.
pub fn validate_push_pull_flags(
    encrypt: bool,
    decrypt: bool,
    key: Option<&Path>,
) -> Result<Option<ActionType>> {
    if encrypt && decrypt {
        return Err(LeanCryptError::InvalidFlags(
            "Cannot encrypt and decrypt at the same time.".into(),
        ));
    }
    if key.is_none() && (encrypt || decrypt) {
        return Err(LeanCryptError::InvalidFlags(
            "Encryption key is required when encrypting or decrypting.".into(),
        ));
    }
    if key.is_some() && !encrypt && !decrypt {
        return Err(LeanCryptError::InvalidFlags(
            "Encryption key can only be specified when encrypting or decrypting.".into(),
        ));
    }

    Ok(match (encrypt, decrypt) {
        (true, _) => Some(ActionType::Encrypt),
        (_, true) => Some(ActionType::Decrypt),
        _ => None,
    })
}

/// Fail unless the key file at `key_path` is registered with the
/// organization.
pub fn validate_key_registered(
    key_path: &Path,
    organization_id: &str,
    registry: &dyn EncryptionKeyRegistry,
) -> Result<()> {
    let key_id = hash_keyfile(key_path)?;
    let registered = registry.registered_keys(organization_id)?;

    if registered.iter().any(|k| key_ids_match(&key_id, &k.hash)) {
        Ok(())
    } else {
        Err(LeanCryptError::KeyNotRegistered)
    }
}

/// Compare a cloud project's encryption with the local project's.
///
/// - No explicit key: the locally registered key must hash to the cloud
///   key id; differing encryption states are a `ForceOverwrite`.
/// - Explicit key: it must hash to the cloud key id.
pub fn validate_key_and_encryption_state_for_cloud_project(
    project: &CloudProject,
    local_encrypted: bool,
    key: Option<&Path>,
    local_key: Option<&Path>,
) -> Result<CloudStateCheck> {
    let cloud_key = project.encryption_key.as_ref();

    match key {
        None => {
            if let (Some(cloud_key), Some(local_key)) = (cloud_key, local_key) {
                if local_key.is_file() && !key_ids_match(&hash_keyfile(local_key)?, &cloud_key.id)
                {
                    return Err(LeanCryptError::KeyMismatch {
                        registered: format!("cloud project key {}", cloud_key.name),
                        provided: format!("local project key {}", local_key.display()),
                    });
                }
            }
            if project.is_encrypted() != local_encrypted {
                return Ok(CloudStateCheck::ForceOverwrite);
            }
        }
        Some(key) => {
            if let Some(cloud_key) = cloud_key {
                let key_id = hash_keyfile(key)?;
                if !key_ids_match(&key_id, &cloud_key.id) {
                    return Err(LeanCryptError::KeyMismatch {
                        registered: format!("cloud project key hash {}", cloud_key.id),
                        provided: format!("local project key hash {key_id}"),
                    });
                }
            }
        }
    }

    Ok(CloudStateCheck::Consistent)
}
