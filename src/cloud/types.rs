//! Cloud project records as they appear in the cloud API's JSON.
//!
//! Field names follow the API (camelCase). Unknown fields are kept in
//! `extra` so a document can be transformed and written back intact.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The key a cloud project is encrypted with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEncryptionKey {
    /// MD5 of the key file.
    pub id: String,
    pub name: String,
}

/// A project as reported by the cloud.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudProject {
    pub project_id: i64,
    pub name: String,
    #[serde(default)]
    pub encrypted: Option<bool>,
    #[serde(default)]
    pub encryption_key: Option<ProjectEncryptionKey>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CloudProject {
    pub fn is_encrypted(&self) -> bool {
        self.encrypted.unwrap_or(false)
    }

    /// Id of the registered encryption key, if any.
    pub fn encryption_key_id(&self) -> Option<&str> {
        self.encryption_key.as_ref().map(|k| k.id.as_str())
    }
}

/// A single file of a cloud project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudFile {
    pub name: String,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CloudFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            extra: Map::new(),
        }
    }
}

/// An encryption key registered with an organization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredKey {
    pub hash: String,
    pub name: String,
}

/// A project, its files, and optionally the organization's registered
/// keys, as exchanged by the `cloud` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudDocument {
    pub project: CloudProject,
    #[serde(default)]
    pub files: Vec<CloudFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<RegisteredKey>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_shaped_project() {
        let json = r#"{
            "projectId": 7,
            "organizationId": "abc",
            "name": "Alpha",
            "encrypted": true,
            "encryptionKey": { "id": "d41d8cd98f00b204e9800998ecf8427e", "name": "team key" }
        }"#;
        let project: CloudProject = serde_json::from_str(json).unwrap();
        assert!(project.is_encrypted());
        assert_eq!(
            project.encryption_key_id(),
            Some("d41d8cd98f00b204e9800998ecf8427e")
        );
        assert_eq!(project.extra["organizationId"], "abc");
    }

    #[test]
    fn null_encryption_fields_mean_plaintext() {
        let json = r#"{ "projectId": 1, "name": "B", "encrypted": null, "encryptionKey": null }"#;
        let project: CloudProject = serde_json::from_str(json).unwrap();
        assert!(!project.is_encrypted());
        assert!(project.encryption_key_id().is_none());
    }

    #[test]
    fn unknown_fields_survive_roundtrip() {
        let json = r#"{"project":{"projectId":1,"name":"B","leanVersionId":42},
                       "files":[{"name":"main.py","content":"x","modified":"2024-01-01"}]}"#;
        let doc: CloudDocument = serde_json::from_str(json).unwrap();
        let out = serde_json::to_value(&doc).unwrap();
        assert_eq!(out["project"]["leanVersionId"], 42);
        assert_eq!(out["files"][0]["modified"], "2024-01-01");
        assert!(out.get("keys").is_none());
    }
}
