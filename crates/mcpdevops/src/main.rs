mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{Cli, Commands, LogsCommands};
use commands::Overrides;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let overrides = Overrides {
        api_url: cli.api_url,
        downloads_dir: cli.downloads_dir,
    };

    let result = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => commands::serve::run(overrides),
        Commands::Logs(logs_cmd) => match logs_cmd {
            LogsCommands::Download { repository, id } => {
                commands::logs::download(&overrides, repository, id)
            }
            LogsCommands::Read { dir } => commands::logs::read(&overrides, dir),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout carries MCP frames and command output.
fn setup_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("mcpdevops=debug,mcpdevops_github=debug,mcpdevops_mcp=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
