//! `leancrypt cloud`: encrypt or decrypt the files of a cloud project
//! document.
//!
//! The document is the JSON the cloud API returns for a project and its
//! files, optionally with the organization's registered keys:
//!
//! ```json
//! { "project": { "projectId": 1, "name": "Alpha", "encrypted": false },
//!   "files": [ { "name": "main.py", "content": "..." } ],
//!   "keys": [ { "hash": "<md5>", "name": "team key" } ] }
//! ```

use std::fs;
use std::path::Path;

use crate::cli::output;
use crate::cli::{absolute_path, organization_manager, project_dir, Cli};
use crate::cloud::{
    apply_encryption_state, transform_cloud_files,
    validate_key_and_encryption_state_for_cloud_project, validate_key_registered,
    validate_push_pull_flags, CloudDocument, CloudStateCheck, ProjectEncryptionKey,
};
use crate::config::Settings;
use crate::crypto::keyfile::{hash_keyfile, key_ids_match};
use crate::errors::{LeanCryptError, Result};
use crate::organization::OrganizationResolver;
use crate::project::{ActionType, ProjectConfig};

/// Arguments of the `cloud` command.
pub struct CloudArgs<'a> {
    pub document: &'a Path,
    pub encrypt: bool,
    pub decrypt: bool,
    pub key: Option<&'a Path>,
    pub project: Option<&'a Path>,
    pub output: Option<&'a Path>,
}

/// Execute the `cloud` command.
pub fn execute(cli: &Cli, args: &CloudArgs<'_>) -> Result<()> {
    let action = validate_push_pull_flags(args.encrypt, args.decrypt, args.key)?;
    let key = args.key.map(absolute_path).transpose()?;

    let contents = fs::read_to_string(args.document)?;
    let mut document: CloudDocument = serde_json::from_str(&contents).map_err(|e| {
        LeanCryptError::Serialization(format!(
            "invalid cloud document {}: {e}",
            args.document.display()
        ))
    })?;

    if let Some(project) = args.project {
        let project_dir = project_dir(project)?;
        let state = ProjectConfig::load(&project_dir)?.encryption_state();
        let check = validate_key_and_encryption_state_for_cloud_project(
            &document.project,
            state.encrypted,
            key.as_deref(),
            state.encryption_key_path.as_deref(),
        )?;
        if check == CloudStateCheck::ForceOverwrite {
            output::debug(&format!(
                "Encryption state of {} differs from the cloud project, it will be overwritten",
                project_dir.display()
            ));
        }
    }

    if let (Some(action), Some(key_path)) = (action, key.as_deref()) {
        let start = match args.document.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => std::env::current_dir()?,
        };
        let settings = Settings::discover(&start)?;
        let organization_id = organization_manager(cli, &start, &settings)
            .try_get_working_organization_id()?;

        if let Some(keys) = &document.keys {
            validate_key_registered(key_path, &organization_id, keys)?;
        }

        let key_id = hash_keyfile(key_path)?;
        let key_name = document
            .keys
            .iter()
            .flatten()
            .find(|k| key_ids_match(&key_id, &k.hash))
            .map(|k| k.name.clone())
            .or_else(|| key_path.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_else(|| key_id.clone());

        let pass_through = action.is_noop_for(document.project.is_encrypted());
        let files = std::mem::take(&mut document.files);
        document.files =
            transform_cloud_files(&document.project, files, key_path, &organization_id, action)?;

        let registered = match action {
            ActionType::Encrypt => Some(ProjectEncryptionKey {
                id: key_id,
                name: key_name,
            }),
            ActionType::Decrypt => None,
        };
        apply_encryption_state(&mut document.project, action, registered);
        if pass_through {
            output::debug("Cloud project is already in the requested state, files left as is");
        } else {
            output::debug(&format!(
                "{}ed {} cloud file(s)",
                action.verb(),
                document.files.len()
            ));
        }
    }

    let json = serde_json::to_string_pretty(&document)
        .map_err(|e| LeanCryptError::Serialization(format!("JSON serialization: {e}")))?;

    match args.output {
        Some(path) => {
            fs::write(path, format!("{json}\n"))?;
            output::success(&format!("Cloud document written to {}", path.display()));
        }
        None => println!("{json}"),
    }

    Ok(())
}
