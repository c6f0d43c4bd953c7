//! Key files.
//!
//! A key file is a text file whose whole content is the project passphrase.
//! Its MD5 hex digest doubles as the key id the cloud stores, which lets us
//! detect a wrong key without ever persisting the passphrase itself.

use std::fs;
use std::path::Path;

use md5::{Digest, Md5};
use rand::distr::{Alphanumeric, SampleString};
use zeroize::Zeroizing;

use crate::errors::{LeanCryptError, Result};

/// Length of a generated passphrase in characters.
pub const GENERATED_PASSPHRASE_LEN: usize = 96;

/// Read a key file as text.
///
/// Line endings are normalized the way text-mode reads normalize them, so
/// `\r\n` and lone `\r` both become `\n` before hashing or derivation.
pub fn load_keyfile(path: &Path) -> Result<Zeroizing<String>> {
    if !path.is_file() {
        return Err(LeanCryptError::Keyfile(format!(
            "key file not found at {}",
            path.display()
        )));
    }

    let raw = Zeroizing::new(
        fs::read(path)
            .map_err(|e| LeanCryptError::Keyfile(format!("failed to read key file: {e}")))?,
    );
    let text = std::str::from_utf8(&raw).map_err(|_| {
        LeanCryptError::Keyfile(format!("key file {} is not valid UTF-8", path.display()))
    })?;

    Ok(Zeroizing::new(normalize_newlines(text)))
}

/// MD5 hex digest of key file text.
pub fn hash_keyfile_content(content: &str) -> String {
    hex::encode(Md5::digest(content.as_bytes()))
}

/// Read the key file at `path` and return its key id.
pub fn hash_keyfile(path: &Path) -> Result<String> {
    let content = load_keyfile(path)?;
    Ok(hash_keyfile_content(&content))
}

/// Check whether `actual` and `expected` key ids are equal.
pub fn key_ids_match(actual: &str, expected: &str) -> bool {
    use subtle::ConstantTimeEq;

    actual.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Generate a random alphanumeric passphrase and write it to `path`.
///
/// Refuses to overwrite unless `overwrite` is set. The file is written
/// owner-only on Unix.
pub fn generate_keyfile(path: &Path, overwrite: bool) -> Result<String> {
    if path.exists() && !overwrite {
        return Err(LeanCryptError::Keyfile(format!(
            "key file already exists at {}",
            path.display()
        )));
    }

    let passphrase = Zeroizing::new(
        Alphanumeric.sample_string(&mut rand::rng(), GENERATED_PASSPHRASE_LEN),
    );

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                LeanCryptError::Keyfile(format!("cannot create key file directory: {e}"))
            })?;
        }
    }

    fs::write(path, passphrase.as_bytes())
        .map_err(|e| LeanCryptError::Keyfile(format!("failed to write key file: {e}")))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perms).map_err(|e| {
            LeanCryptError::Keyfile(format!("failed to set key file permissions: {e}"))
        })?;
    }

    Ok(hash_keyfile_content(&passphrase))
}

/// Translate `\r\n` and lone `\r` into `\n`.
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
