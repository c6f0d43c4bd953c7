//! Project key and IV derivation.
//!
//! The key is PBKDF2-HMAC-SHA256 over the key file text, salted with the
//! organization id. The IV is taken from the MD5 of the same text, so a
//! given (key file, organization) pair always yields the same pair and
//! every file in a project shares one IV under CBC. Both values travel as
//! base64 text and are decoded once, right before the cipher runs.
//!
//! Byte layout that previously encrypted projects depend on:
//! - key: base64 of the 32-char lowercase hex of the 16-byte PBKDF2 output,
//!   so the cipher key is those 32 ASCII bytes (AES-256).
//! - IV: base64 of the first 16 chars of the MD5 hex digest.

use std::fmt;
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::crypto::keyfile::{hash_keyfile_content, load_keyfile};
use crate::errors::{LeanCryptError, Result};

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Length of the raw PBKDF2 output in bytes.
pub const DERIVED_KEY_LEN: usize = 16;

/// Number of MD5 hex characters used as the IV.
const IV_HEX_LEN: usize = 16;

/// Base64-encoded key and IV derived from one key file and organization.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial {
    encoded_key: String,
    encoded_iv: String,
}

impl KeyMaterial {
    /// Derive key material from passphrase text and an organization id.
    pub fn derive(passphrase: &str, organization_id: &str) -> Self {
        Self {
            encoded_key: derive_project_key(passphrase, organization_id),
            encoded_iv: derive_project_iv(passphrase),
        }
    }

    /// Read the key file at `path` and derive key material from it.
    pub fn from_keyfile(path: &Path, organization_id: &str) -> Result<Self> {
        let passphrase = load_keyfile(path)?;
        Ok(Self::derive(&passphrase, organization_id))
    }

    pub fn encoded_key(&self) -> &str {
        &self.encoded_key
    }

    pub fn encoded_iv(&self) -> &str {
        &self.encoded_iv
    }

    /// Decode the key into the raw bytes handed to the cipher.
    pub fn key_bytes(&self) -> Result<Zeroizing<Vec<u8>>> {
        BASE64
            .decode(&self.encoded_key)
            .map(Zeroizing::new)
            .map_err(|e| LeanCryptError::KeyDerivationFailed(format!("invalid encoded key: {e}")))
    }

    /// Decode the IV into the raw bytes handed to the cipher.
    pub fn iv_bytes(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(&self.encoded_iv)
            .map_err(|e| LeanCryptError::KeyDerivationFailed(format!("invalid encoded IV: {e}")))
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("encoded_key", &"<redacted>")
            .field("encoded_iv", &self.encoded_iv)
            .finish()
    }
}

/// Derive the base64-encoded project key.
pub fn derive_project_key(passphrase: &str, organization_id: &str) -> String {
    let mut derived = [0u8; DERIVED_KEY_LEN];
    pbkdf2::pbkdf2_hmac::<Sha256>(
        passphrase.as_bytes(),
        organization_id.as_bytes(),
        PBKDF2_ITERATIONS,
        &mut derived,
    );

    let hex_key = Zeroizing::new(hex::encode(derived));
    derived.zeroize();
    BASE64.encode(hex_key.as_bytes())
}

/// Derive the base64-encoded project IV.
pub fn derive_project_iv(passphrase: &str) -> String {
    let digest = hash_keyfile_content(passphrase);
    BASE64.encode(&digest.as_bytes()[..IV_HEX_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_key_matches_known_value() {
        let key = derive_project_key("my-passphrase", "org-42");
        assert_eq!(key, "MTM1OGE3MGY1ZWZlMTNkOTU0NGI1ZmJmYzk3ZDY3NjQ=");
    }

    #[test]
    fn project_iv_matches_known_value() {
        assert_eq!(derive_project_iv("my-passphrase"), "MmEzY2IwYmQxMzMwNzYwMg==");
    }

    #[test]
    fn decoded_key_is_hex_text() {
        let material = KeyMaterial::derive("my-passphrase", "org-42");
        let key = material.key_bytes().unwrap();
        assert_eq!(key.as_slice(), b"1358a70f5efe13d9544b5fbfc97d6764");
        assert_eq!(material.iv_bytes().unwrap(), b"2a3cb0bd13307602");
    }

    #[test]
    fn organization_changes_key_but_not_iv() {
        let a = KeyMaterial::derive("my-passphrase", "org-42");
        let b = KeyMaterial::derive("my-passphrase", "org-43");
        assert_ne!(a.encoded_key(), b.encoded_key());
        assert_eq!(a.encoded_iv(), b.encoded_iv());
    }

    #[test]
    fn debug_output_redacts_key() {
        let material = KeyMaterial::derive("my-passphrase", "org-42");
        let debug = format!("{material:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains(material.encoded_key()));
    }
}
