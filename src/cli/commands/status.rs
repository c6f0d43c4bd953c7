//! `leancrypt status`: show the encryption state of a local project.

use std::path::Path;

use crate::cli::output::{self, StatusRow};
use crate::cli::{organization_manager, project_dir, Cli};
use crate::config::Settings;
use crate::errors::Result;
use crate::organization::OrganizationResolver;
use crate::project::{discover_source_files, ProjectConfig};

/// Execute the `status` command.
pub fn execute(cli: &Cli, project: &Path) -> Result<()> {
    let project_dir = project_dir(project)?;
    let settings = Settings::discover(&project_dir)?;
    let config = ProjectConfig::load(&project_dir)?;
    let state = config.encryption_state();
    let files = discover_source_files(&project_dir, &settings)?;

    let organization = organization_manager(cli, &project_dir, &settings)
        .try_get_working_organization_id()
        .unwrap_or_else(|_| "(unknown)".into());

    let or_none = |value: Option<String>| value.unwrap_or_else(|| "(none)".into());

    let rows = [
        StatusRow {
            label: "Project",
            value: project_dir.display().to_string(),
        },
        StatusRow {
            label: "Encrypted",
            value: if state.encrypted { "yes" } else { "no" }.into(),
        },
        StatusRow {
            label: "Key path",
            value: or_none(
                state
                    .encryption_key_path
                    .map(|p| p.display().to_string()),
            ),
        },
        StatusRow {
            label: "Key id",
            value: or_none(state.encryption_key_id),
        },
        StatusRow {
            label: "Source files",
            value: files.len().to_string(),
        },
        StatusRow {
            label: "Organization",
            value: organization,
        },
    ];

    output::print_status_table(&rows);
    Ok(())
}
