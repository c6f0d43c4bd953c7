//! `leancrypt keygen`: generate a new random key file.

use std::path::Path;

use dialoguer::Confirm;

use crate::cli::gitignore::patch_gitignore;
use crate::cli::{absolute_path, output};
use crate::crypto::keyfile::generate_keyfile;
use crate::errors::{LeanCryptError, Result};

/// Execute the `keygen` command.
pub fn execute(path: &Path, force: bool) -> Result<()> {
    let path = absolute_path(path)?;

    let mut overwrite = force;
    if path.exists() && !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "{} already exists. Overwrite it? Anything encrypted with it becomes unreadable",
                path.display()
            ))
            .default(false)
            .interact()
            .map_err(|e| LeanCryptError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            return Err(LeanCryptError::UserCancelled);
        }
        overwrite = true;
    }

    let key_id = generate_keyfile(&path, overwrite)?;

    output::success(&format!("Key file generated at {}", path.display()));
    output::info(&format!("Key id: {key_id}"));
    output::warning("Keep this file secret! Anyone with it can decrypt your projects.");

    // Only patch .gitignore when the key lives inside the working directory.
    let cwd = std::env::current_dir()?;
    if let Ok(relative) = path.strip_prefix(&cwd) {
        patch_gitignore(&cwd, &relative.to_string_lossy());
    } else {
        output::tip("Store the key file outside version control.");
    }

    Ok(())
}
