//! Integration tests for cloud project encryption and validation.

use std::fs;
use std::path::PathBuf;

use leancrypt::cloud::{
    apply_encryption_state, decrypt_cloud_files, encrypt_cloud_files, validate_key_and_encryption_state_for_cloud_project,
    validate_key_registered, CloudDocument, CloudFile, CloudStateCheck, ProjectEncryptionKey,
    RegisteredKey,
};
use leancrypt::errors::LeanCryptError;
use leancrypt::project::ActionType;
use tempfile::TempDir;

const KEY_ID: &str = "2a3cb0bd13307602839697c1872e07a3";

fn key_file(dir: &TempDir, name: &str, passphrase: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, passphrase).unwrap();
    path
}

fn document(json: &str) -> CloudDocument {
    serde_json::from_str(json).unwrap()
}

fn plaintext_document() -> CloudDocument {
    document(
        r#"{
            "project": { "projectId": 3, "name": "Alpha", "encrypted": false },
            "files": [
                { "name": "main.py", "content": "print(1)\n" },
                { "name": "util.py", "content": "print(2)\n" }
            ]
        }"#,
    )
}

fn encrypted_document(key_id: &str) -> CloudDocument {
    document(&format!(
        r#"{{
            "project": {{
                "projectId": 3, "name": "Alpha", "encrypted": true,
                "encryptionKey": {{ "id": "{key_id}", "name": "team key" }}
            }},
            "files": [ {{ "name": "main.py", "content": "uPwAaX61t8ErlPX1lwKrEw==" }} ]
        }}"#
    ))
}

#[test]
fn encrypts_plaintext_cloud_files() {
    let dir = TempDir::new().unwrap();
    let key = key_file(&dir, "key.txt", "my-passphrase");
    let doc = plaintext_document();

    let files = encrypt_cloud_files(&doc.project, doc.files.clone(), &key, "org-42").unwrap();
    assert_eq!(files[0].content, "uPwAaX61t8ErlPX1lwKrEw==");
    assert_eq!(files[1].content, "aooPh31ryZgn7iOu3HgzlQ==");
    assert_eq!(files[0].name, "main.py");
}

#[test]
fn decrypts_encrypted_cloud_files() {
    let dir = TempDir::new().unwrap();
    let key = key_file(&dir, "key.txt", "my-passphrase");
    let doc = encrypted_document(KEY_ID);

    let files = decrypt_cloud_files(&doc.project, doc.files.clone(), &key, "org-42").unwrap();
    assert_eq!(files, vec![CloudFile::new("main.py", "print(1)\n")]);
}

#[test]
fn encrypted_project_passes_through_on_encrypt() {
    let dir = TempDir::new().unwrap();
    let key = key_file(&dir, "key.txt", "my-passphrase");
    let doc = encrypted_document(KEY_ID);

    let files = encrypt_cloud_files(&doc.project, doc.files.clone(), &key, "org-42").unwrap();
    assert_eq!(files, doc.files);
}

#[test]
fn decrypt_with_other_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let key = key_file(&dir, "other.txt", "another-passphrase");
    let doc = encrypted_document(KEY_ID);

    let result = decrypt_cloud_files(&doc.project, doc.files.clone(), &key, "org-42");
    assert!(matches!(result, Err(LeanCryptError::KeyMismatch { .. })));
}

#[test]
fn encrypt_with_other_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let key = key_file(&dir, "other.txt", "another-passphrase");
    let doc = encrypted_document(KEY_ID);

    let result = encrypt_cloud_files(&doc.project, doc.files.clone(), &key, "org-42");
    match result {
        Err(LeanCryptError::KeyMismatch {
            registered,
            provided,
        }) => {
            assert!(registered.contains(KEY_ID));
            assert!(provided.contains("other.txt"));
        }
        other => panic!("expected a key mismatch, got {other:?}"),
    }
}

#[test]
fn keyless_encrypted_project_is_not_relabelled() {
    let dir = TempDir::new().unwrap();
    let key = key_file(&dir, "key.txt", "my-passphrase");
    let mut doc = document(
        r#"{
            "project": { "projectId": 3, "name": "Alpha", "encrypted": true },
            "files": [ { "name": "main.py", "content": "ciphertext from an unknown key" } ]
        }"#,
    );

    let files = encrypt_cloud_files(&doc.project, doc.files.clone(), &key, "org-42").unwrap();
    assert_eq!(files, doc.files);

    apply_encryption_state(
        &mut doc.project,
        ActionType::Encrypt,
        Some(ProjectEncryptionKey {
            id: KEY_ID.into(),
            name: "key.txt".into(),
        }),
    );
    assert!(doc.project.is_encrypted());
    assert!(doc.project.encryption_key.is_none());
}

#[test]
fn registered_key_is_accepted() {
    let dir = TempDir::new().unwrap();
    let key = key_file(&dir, "key.txt", "my-passphrase");
    let keys = vec![
        RegisteredKey {
            hash: "0".repeat(32),
            name: "old".into(),
        },
        RegisteredKey {
            hash: KEY_ID.into(),
            name: "team key".into(),
        },
    ];

    validate_key_registered(&key, "org-42", &keys).unwrap();
}

#[test]
fn unregistered_key_is_rejected() {
    let dir = TempDir::new().unwrap();
    let key = key_file(&dir, "key.txt", "my-passphrase");
    let keys: Vec<RegisteredKey> = Vec::new();

    let result = validate_key_registered(&key, "org-42", &keys);
    assert!(matches!(result, Err(LeanCryptError::KeyNotRegistered)));
}

#[test]
fn differing_state_without_key_is_force_overwrite() {
    let doc = plaintext_document();
    let check =
        validate_key_and_encryption_state_for_cloud_project(&doc.project, true, None, None)
            .unwrap();
    assert_eq!(check, CloudStateCheck::ForceOverwrite);
}

#[test]
fn matching_state_is_consistent() {
    let doc = plaintext_document();
    let check =
        validate_key_and_encryption_state_for_cloud_project(&doc.project, false, None, None)
            .unwrap();
    assert_eq!(check, CloudStateCheck::Consistent);
}

#[test]
fn local_key_must_match_cloud_key() {
    let dir = TempDir::new().unwrap();
    let local = key_file(&dir, "local.txt", "another-passphrase");
    let doc = encrypted_document(KEY_ID);

    let result =
        validate_key_and_encryption_state_for_cloud_project(&doc.project, true, None, Some(local.as_path()));
    assert!(matches!(result, Err(LeanCryptError::KeyMismatch { .. })));
}

#[test]
fn explicit_key_must_match_cloud_key() {
    let dir = TempDir::new().unwrap();
    let good = key_file(&dir, "key.txt", "my-passphrase");
    let bad = key_file(&dir, "bad.txt", "another-passphrase");
    let doc = encrypted_document(KEY_ID);

    let check = validate_key_and_encryption_state_for_cloud_project(
        &doc.project,
        false,
        Some(good.as_path()),
        None,
    )
    .unwrap();
    assert_eq!(check, CloudStateCheck::Consistent);

    let result =
        validate_key_and_encryption_state_for_cloud_project(&doc.project, false, Some(bad.as_path()), None);
    assert!(matches!(result, Err(LeanCryptError::KeyMismatch { .. })));
}

#[test]
fn encryption_key_serializes_camel_case() {
    let mut doc = plaintext_document();
    doc.project.encryption_key = Some(ProjectEncryptionKey {
        id: KEY_ID.into(),
        name: "team key".into(),
    });
    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["project"]["encryptionKey"]["id"], KEY_ID);
    assert_eq!(value["project"]["projectId"], 3);
}
