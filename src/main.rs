use clap::Parser;
use leancrypt::cli::commands::cloud::CloudArgs;
use leancrypt::cli::{output, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    output::set_verbose(cli.verbose);

    let result = match cli.command {
        Commands::Encrypt {
            ref project,
            ref key,
        } => leancrypt::cli::commands::encrypt::execute(&cli, project, key.as_deref()),
        Commands::Decrypt {
            ref project,
            ref key,
        } => leancrypt::cli::commands::decrypt::execute(&cli, project, key.as_deref()),
        Commands::Status { ref project } => leancrypt::cli::commands::status::execute(&cli, project),
        Commands::Keygen { ref path, force } => {
            leancrypt::cli::commands::keygen::execute(path, force)
        }
        Commands::Cloud {
            ref document,
            encrypt,
            decrypt,
            ref key,
            ref project,
            output: ref output_path,
        } => leancrypt::cli::commands::cloud::execute(
            &cli,
            &CloudArgs {
                document,
                encrypt,
                decrypt,
                key: key.as_deref(),
                project: project.as_deref(),
                output: output_path.as_deref(),
            },
        ),
        Commands::Completions { shell } => leancrypt::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
