//! Text framing for encrypted file content.
//!
//! Ciphertext is stored as base64 hard-wrapped at 80 columns, the same
//! layout the cloud platform keeps for encrypted files.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::errors::{LeanCryptError, Result};

/// Maximum line width of framed content.
pub const LINE_WIDTH: usize = 80;

/// Base64-encode `ciphertext` and wrap it into lines of at most 80 chars.
pub fn frame(ciphertext: &[u8]) -> String {
    let encoded = BASE64.encode(ciphertext);
    let mut framed = String::with_capacity(encoded.len() + encoded.len() / LINE_WIDTH);

    // base64 output is ASCII, so byte chunks are char chunks.
    for (i, chunk) in encoded.as_bytes().chunks(LINE_WIDTH).enumerate() {
        if i > 0 {
            framed.push('\n');
        }
        framed.push_str(std::str::from_utf8(chunk).unwrap_or_default());
    }
    framed
}

/// Strip line breaks and surrounding whitespace, then base64-decode.
pub fn unframe(text: &str) -> Result<Vec<u8>> {
    let joined: String = text
        .trim()
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect();

    BASE64
        .decode(joined.as_bytes())
        .map_err(|_| LeanCryptError::DecryptionFailed)
}

/// Convert Windows line endings in restored plaintext to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}
