//! Shared flow of `encrypt` and `decrypt` over a local project.

use std::path::Path;

use crate::cli::output;
use crate::cli::{absolute_path, organization_manager, project_dir, Cli};
use crate::config::Settings;
use crate::crypto::keyfile::hash_keyfile;
use crate::errors::Result;
use crate::project::{
    discover_source_files, load_source_files, resolve_key_path, transform_project_files,
    validate_key_state, write_source_files, ActionType, ProjectConfig, ProjectContext,
};

/// Transform every source file of `project` and persist the new state.
///
/// Files are written only after every file transformed successfully, and
/// the configuration is saved only after every file was written.
pub(super) fn execute(
    cli: &Cli,
    project: &Path,
    key: Option<&Path>,
    action: ActionType,
) -> Result<()> {
    let project_dir = project_dir(project)?;
    let settings = Settings::discover(&project_dir)?;
    let mut config = ProjectConfig::load(&project_dir)?;
    let state = config.encryption_state();

    let provided = key.map(absolute_path).transpose()?;
    let key_path = resolve_key_path(provided.as_deref(), state.encryption_key_path.as_deref())?;
    output::debug(&format!("Using key file {}", key_path.display()));

    if action.is_noop_for(state.encrypted) {
        validate_key_state(&state, &key_path)?;
        output::success(&format!(
            "Project {} is already {}ed",
            project_dir.display(),
            action.verb()
        ));
        return Ok(());
    }

    let paths = discover_source_files(&project_dir, &settings)?;
    output::debug(&format!("Found {} source file(s)", paths.len()));
    let files = load_source_files(&paths)?;

    let organizations = organization_manager(cli, &project_dir, &settings);
    let ctx = ProjectContext::new(&config, &organizations);
    let contents = transform_project_files(&ctx, &files, &key_path, action)?;

    // Must not fail after the files are written.
    let key_id = hash_keyfile(&key_path)?;

    write_source_files(&files, &contents)?;
    for file in &files {
        output::debug(&format!("{}ed {}", action.verb(), file.display_name()));
    }

    match action {
        ActionType::Encrypt => config.mark_encrypted(&key_path, &key_id)?,
        ActionType::Decrypt => config.mark_decrypted()?,
    }

    output::success(&format!(
        "Successfully {}ed project {} ({} file(s))",
        action.verb(),
        project_dir.display(),
        files.len()
    ));
    Ok(())
}
