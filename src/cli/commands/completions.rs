//! `leancrypt completions`: print a shell completion script.
//!
//!   leancrypt completions bash > ~/.local/share/bash-completion/completions/leancrypt
//!   leancrypt completions zsh > "${fpath[1]}/_leancrypt"

use std::io::{self, Write};

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut stdout = io::stdout().lock();
    write_completions(shell, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Render the completion script for `shell` into `out`.
fn write_completions(shell: Shell, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, out);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Commands;

    fn script(shell: Shell) -> String {
        let mut buf = Vec::new();
        write_completions(shell, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn shell_argument_parses_known_names() {
        let cli = Cli::try_parse_from(["leancrypt", "completions", "zsh"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions { shell: Shell::Zsh }
        ));
    }

    #[test]
    fn shell_argument_rejects_unknown_names() {
        assert!(Cli::try_parse_from(["leancrypt", "completions", "csh"]).is_err());
    }

    #[test]
    fn scripts_cover_every_subcommand() {
        let bash = script(Shell::Bash);
        for sub in ["encrypt", "decrypt", "status", "keygen", "cloud"] {
            assert!(bash.contains(sub), "bash script misses {sub}");
        }
    }

    #[test]
    fn fish_script_names_the_binary() {
        assert!(script(Shell::Fish).contains("complete -c leancrypt"));
    }
}
