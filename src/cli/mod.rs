//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod gitignore;
pub mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use clap_complete::Shell;

use crate::config::{LeanConfig, Settings};
use crate::errors::{LeanCryptError, Result};
use crate::organization::OrganizationManager;

/// leancrypt CLI: encrypt and decrypt Lean project source files.
#[derive(Parser)]
#[command(
    name = "leancrypt",
    about = "Encrypt and decrypt Lean algorithmic-trading projects",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Organization id used as the key-derivation salt (default: from lean.json)
    #[arg(long, env = "LEAN_ORGANIZATION_ID", global = true)]
    pub organization: Option<String>,

    /// Print debug messages
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Encrypt a local project with a key file
    Encrypt {
        /// Project directory
        project: PathBuf,
        /// Path to the encryption key to use (default: the project's registered key)
        #[arg(long)]
        key: Option<PathBuf>,
    },

    /// Decrypt a local project with its key file
    Decrypt {
        /// Project directory
        project: PathBuf,
        /// Path to the decryption key to use (default: the project's registered key)
        #[arg(long)]
        key: Option<PathBuf>,
    },

    /// Show the encryption state of a local project
    Status {
        /// Project directory
        project: PathBuf,
    },

    /// Generate a new random key file
    Keygen {
        /// Where to write the key file
        path: PathBuf,
        /// Overwrite an existing file without asking
        #[arg(short, long)]
        force: bool,
    },

    /// Encrypt or decrypt the files of a cloud project document (JSON)
    Cloud {
        /// Cloud document with `project`, `files` and optional `keys`
        document: PathBuf,
        /// Encrypt the files
        #[arg(long)]
        encrypt: bool,
        /// Decrypt the files
        #[arg(long)]
        decrypt: bool,
        /// Path to the encryption key to use
        #[arg(long)]
        key: Option<PathBuf>,
        /// Local counterpart of the cloud project, checked for consistency
        #[arg(long)]
        project: Option<PathBuf>,
        /// Output file path (prints to stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Make `path` absolute, resolving symlinks and `..` when it exists.
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.exists() {
        return Ok(path.canonicalize()?);
    }
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

/// Resolve a project argument to an existing directory.
pub fn project_dir(project: &Path) -> Result<PathBuf> {
    if !project.is_dir() {
        return Err(LeanCryptError::ProjectNotFound(project.to_path_buf()));
    }
    absolute_path(project)
}

/// Build the organization resolver for a command running against `start`.
///
/// Order: `--organization` / `LEAN_ORGANIZATION_ID`, the settings
/// override, then the nearest `lean.json`.
pub fn organization_manager(cli: &Cli, start: &Path, settings: &Settings) -> OrganizationManager {
    let lean_config = LeanConfig::locate(start).or_else(|| {
        std::env::current_dir()
            .ok()
            .and_then(|cwd| LeanConfig::locate(&cwd))
    });
    if let Some(path) = &lean_config {
        output::debug(&format!("Using Lean config {}", path.display()));
    }

    OrganizationManager::new(
        cli.organization.clone(),
        settings.organization_id.clone(),
        lean_config,
    )
}
