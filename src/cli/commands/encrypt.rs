//! `leancrypt encrypt`: encrypt a local project in place.

use std::path::Path;

use crate::cli::Cli;
use crate::errors::Result;
use crate::project::ActionType;

/// Execute the `encrypt` command.
pub fn execute(cli: &Cli, project: &Path, key: Option<&Path>) -> Result<()> {
    super::transform::execute(cli, project, key, ActionType::Encrypt)
}
