//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "mcpdevops")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory workflow logs are extracted into
    #[arg(long, global = true, env = "MCPDEVOPS_DOWNLOADS_DIR")]
    pub downloads_dir: Option<PathBuf>,

    /// GitHub API base URL
    #[arg(long, global = true, env = "MCPDEVOPS_API_URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve MCP tools over stdio
    Serve,

    /// Workflow log management
    #[command(subcommand)]
    Logs(LogsCommands),
}

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Download and extract the logs of a workflow run
    Download {
        /// Repository name
        repository: String,

        /// Workflow run id
        id: u64,
    },

    /// Print every file of a downloaded log directory as JSON
    Read {
        /// Directory under the downloads root (e.g. "log_123")
        dir: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_serve() {
        let cli = Cli::try_parse_from(["mcpdevops"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_logs_download_requires_numeric_id() {
        assert!(Cli::try_parse_from(["mcpdevops", "logs", "download", "repo", "abc"]).is_err());

        let cli = Cli::try_parse_from(["mcpdevops", "logs", "download", "repo", "42"]).unwrap();
        match cli.command {
            Some(Commands::Logs(LogsCommands::Download { repository, id })) => {
                assert_eq!(repository, "repo");
                assert_eq!(id, 42);
            }
            _ => panic!("expected logs download"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "mcpdevops",
            "logs",
            "read",
            "log_1",
            "--downloads-dir",
            "/tmp/logs",
            "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.downloads_dir, Some(PathBuf::from("/tmp/logs")));
    }
}
