//! Integration tests for the leancrypt crypto module.

use leancrypt::crypto::framing::LINE_WIDTH;
use leancrypt::crypto::{
    decrypt_content, derive_project_iv, derive_project_key, encrypt_content, frame,
    hash_keyfile_content, unframe, KeyMaterial,
};
use leancrypt::errors::LeanCryptError;

const PASSPHRASE: &str = "my-passphrase";
const ORGANIZATION: &str = "org-42";

fn material() -> KeyMaterial {
    KeyMaterial::derive(PASSPHRASE, ORGANIZATION)
}

// ---------------------------------------------------------------------------
// Known answers
// ---------------------------------------------------------------------------

#[test]
fn derivation_matches_known_values() {
    assert_eq!(
        derive_project_key(PASSPHRASE, ORGANIZATION),
        "MTM1OGE3MGY1ZWZlMTNkOTU0NGI1ZmJmYzk3ZDY3NjQ="
    );
    assert_eq!(derive_project_iv(PASSPHRASE), "MmEzY2IwYmQxMzMwNzYwMg==");
    assert_eq!(
        hash_keyfile_content(PASSPHRASE),
        "2a3cb0bd13307602839697c1872e07a3"
    );
}

#[test]
fn short_file_encrypts_to_known_ciphertext() {
    let m = material();
    assert_eq!(
        encrypt_content(&m, "print(1)\n").unwrap(),
        "uPwAaX61t8ErlPX1lwKrEw=="
    );
    assert_eq!(
        encrypt_content(&m, "print(2)\n").unwrap(),
        "aooPh31ryZgn7iOu3HgzlQ=="
    );
}

#[test]
fn long_file_is_wrapped_at_line_width() {
    let plaintext = "x".repeat(100);
    let framed = encrypt_content(&material(), &plaintext).unwrap();

    assert_eq!(
        framed,
        "qilFYO9tDkFaG9XVGG1qWcN5KxrGikItyoe4LiNwctQLhfuMbvxytHhcMw3regubIVX7S0dcHKrQn/sn\n\
         IcoU7gcNg0YVJJvKri047Yb/MJrlDnG740/aGfnNvgJ+NG1gxfnnSsADHzRtfSqGlx7TCQ=="
    );
    assert_eq!(decrypt_content(&material(), &framed).unwrap(), plaintext);
}

// ---------------------------------------------------------------------------
// Round trips and determinism
// ---------------------------------------------------------------------------

#[test]
fn decrypt_restores_known_ciphertext() {
    let m = material();
    assert_eq!(
        decrypt_content(&m, "uPwAaX61t8ErlPX1lwKrEw==").unwrap(),
        "print(1)\n"
    );
}

#[test]
fn encryption_is_deterministic() {
    let source = "class Algo(QCAlgorithm):\n    pass\n";
    let a = encrypt_content(&material(), source).unwrap();
    let b = encrypt_content(&KeyMaterial::derive(PASSPHRASE, ORGANIZATION), source).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_file_roundtrips() {
    let m = material();
    let framed = encrypt_content(&m, "").unwrap();
    assert!(!framed.is_empty());
    assert_eq!(decrypt_content(&m, &framed).unwrap(), "");
}

#[test]
fn unicode_content_roundtrips() {
    let m = material();
    let source = "# Größe → 価格\nprint('ü')\n";
    let framed = encrypt_content(&m, source).unwrap();
    assert_eq!(decrypt_content(&m, &framed).unwrap(), source);
}

#[test]
fn crlf_plaintext_comes_back_with_lf() {
    let m = material();
    let framed = encrypt_content(&m, "a = 1\r\nb = 2\r\n").unwrap();
    assert_eq!(decrypt_content(&m, &framed).unwrap(), "a = 1\nb = 2\n");
}

#[test]
fn framed_lines_never_exceed_line_width() {
    let ciphertext = vec![7u8; 1000];
    let framed = frame(&ciphertext);
    let lines: Vec<&str> = framed.split('\n').collect();

    assert!(lines.len() > 1);
    for line in &lines[..lines.len() - 1] {
        assert_eq!(line.len(), LINE_WIDTH);
    }
    assert!(lines.last().unwrap().len() <= LINE_WIDTH);
    assert_eq!(unframe(&framed).unwrap(), ciphertext);
}

#[test]
fn unframe_accepts_crlf_wrapped_input() {
    let framed = frame(&[1u8; 120]).replace('\n', "\r\n");
    assert_eq!(unframe(&framed).unwrap(), vec![1u8; 120]);
}

// ---------------------------------------------------------------------------
// Failure modes
// ---------------------------------------------------------------------------

#[test]
fn decrypting_plaintext_fails() {
    let result = decrypt_content(&material(), "print(1)\n");
    assert!(matches!(result, Err(LeanCryptError::DecryptionFailed)));
}

#[test]
fn decrypting_truncated_ciphertext_fails() {
    let framed = encrypt_content(&material(), &"y".repeat(64)).unwrap();
    let truncated = &framed[..framed.len() - 8];
    assert!(decrypt_content(&material(), truncated).is_err());
}

#[test]
fn other_organization_does_not_recover_plaintext() {
    let framed = encrypt_content(&material(), "print(1)\n").unwrap();
    let other = KeyMaterial::derive(PASSPHRASE, "org-43");
    let recovered = decrypt_content(&other, &framed);
    assert!(recovered.map_or(true, |text| text != "print(1)\n"));
}
