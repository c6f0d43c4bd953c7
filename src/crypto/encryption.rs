//! AES-CBC with PKCS7 padding.
//!
//! No framing is added here: `encrypt` returns the bare ciphertext and
//! `decrypt` expects it back. The key is the 32-byte ASCII form produced
//! by `KeyMaterial::key_bytes`, which selects AES-256.

use aes::Aes256;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::errors::{LeanCryptError, Result};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Pad `plaintext` with PKCS7 and encrypt it under `key` and `iv`.
pub fn encrypt(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256CbcEnc::new_from_slices(key, iv).map_err(|e| {
        LeanCryptError::EncryptionFailed(format!("invalid key or IV length: {e}"))
    })?;

    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt `ciphertext` and strip its PKCS7 padding.
///
/// Every failure (bad length, bad padding, wrong key) maps to the same
/// `DecryptionFailed` error.
pub fn decrypt(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(LeanCryptError::DecryptionFailed);
    }

    let cipher =
        Aes256CbcDec::new_from_slices(key, iv).map_err(|_| LeanCryptError::DecryptionFailed)?;

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| LeanCryptError::DecryptionFailed)
}
