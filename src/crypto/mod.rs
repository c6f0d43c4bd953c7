//! Cryptographic primitives for project encryption.
//!
//! This module provides:
//! - PBKDF2 key and MD5-based IV derivation (`kdf`)
//! - AES-CBC encryption with PKCS7 padding (`encryption`)
//! - base64 line-wrapped framing of ciphertext (`framing`)
//! - key file loading, hashing and generation (`keyfile`)

pub mod encryption;
pub mod framing;
pub mod kdf;
pub mod keyfile;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt_content, decrypt_content, KeyMaterial, ...};
pub use encryption::{decrypt, encrypt};
pub use framing::{frame, normalize_line_endings, unframe};
pub use kdf::{derive_project_iv, derive_project_key, KeyMaterial};
pub use keyfile::{generate_keyfile, hash_keyfile, hash_keyfile_content, load_keyfile};

use crate::errors::{LeanCryptError, Result};

/// Encrypt one file's plaintext and return its framed text form.
pub fn encrypt_content(material: &KeyMaterial, plaintext: &str) -> Result<String> {
    let key = material.key_bytes()?;
    let iv = material.iv_bytes()?;
    let ciphertext = encrypt(&key, &iv, plaintext.as_bytes())?;
    Ok(frame(&ciphertext))
}

/// Decrypt one file's framed text back to `\n`-terminated plaintext.
pub fn decrypt_content(material: &KeyMaterial, framed: &str) -> Result<String> {
    let key = material.key_bytes()?;
    let iv = material.iv_bytes()?;
    let ciphertext = unframe(framed)?;
    let plaintext = decrypt(&key, &iv, &ciphertext)?;
    let text = String::from_utf8(plaintext).map_err(|_| LeanCryptError::DecryptionFailed)?;
    Ok(normalize_line_endings(&text))
}
