use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use tracing_subscriber::{fmt, EnvFilter};

use crate::cmd;

#[derive(Parser)]
#[command(version, disable_version_flag = true, about = "Typed navigation and metadata configuration for documentation sites")]
struct Cli {
    /// Print version
    #[arg(short = 'V', long, action = clap::builder::ArgAction::Version)]
    version: (),

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Create a new documentation site configuration
    Init {
        /// Site directory name
        name: Option<String>,
    },
    /// Validate the site configuration
    Check {
        /// Also check that every link resolves to a page in this directory
        #[arg(short = 'c', long)]
        content: Option<PathBuf>,
        /// Report problems as warnings instead of failing
        #[arg(long)]
        warn: bool,
    },
    /// Show the top navigation entries
    Nav,
    /// Show the sidebar groups shown on a page
    Sidebar {
        /// Page path, e.g. /2.x/installation
        path: String,
        /// Content directory used to derive labels of bare entries
        #[arg(short = 'c', long)]
        content: Option<PathBuf>,
    },
    /// Render the document head and plugin options of a page
    Head {
        /// Page path, e.g. /2.x/installation
        path: String,
        /// Content directory used for page titles and timestamps
        #[arg(short = 'c', long)]
        content: Option<PathBuf>,
    },
    /// Rewrite the configuration in canonical form
    Fmt {
        /// Only report whether the file is formatted
        #[arg(long)]
        check: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_target(verbose)
        .without_time()
        .init();
}

pub async fn start() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { name } => cmd::init(name.as_deref()).await,
        Commands::Check { content, warn } => cmd::check(content.as_deref(), warn).await,
        Commands::Nav => cmd::nav().await,
        Commands::Sidebar { path, content } => cmd::sidebar(&path, content.as_deref()).await,
        Commands::Head { path, content } => cmd::head(&path, content.as_deref()).await,
        Commands::Fmt { check } => cmd::fmt(check).await,
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_sidebar_arguments() {
        let cli = Cli::try_parse_from(["docsite", "sidebar", "/2.x/", "--content", "docs"]).unwrap();
        match cli.command {
            Commands::Sidebar { path, content } => {
                assert_eq!(path, "/2.x/");
                assert_eq!(content, Some(PathBuf::from("docs")));
            }
            _ => panic!("expected the sidebar command"),
        }
    }

    #[test]
    fn verbose_flag_is_global() {
        let cli = Cli::try_parse_from(["docsite", "check", "-v", "--warn"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Check { warn: true, .. }));
    }
}
