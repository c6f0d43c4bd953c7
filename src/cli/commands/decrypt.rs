//! `leancrypt decrypt`: decrypt a local project in place.
//!
//! Without `--key` the key registered in the project's `config.json` is used.

use std::path::Path;

use crate::cli::Cli;
use crate::errors::Result;
use crate::project::ActionType;

/// Execute the `decrypt` command.
pub fn execute(cli: &Cli, project: &Path, key: Option<&Path>) -> Result<()> {
    super::transform::execute(cli, project, key, ActionType::Decrypt)
}
