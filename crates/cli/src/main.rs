//! qnav CLI - questions navigation bar driver

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod cmd;
mod system_config;

/// qnav - drive the questions navigation bar from the terminal
#[derive(Parser)]
#[command(name = "qnav")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Debounce search input read line by line from stdin
    Search {
        /// Override the configured debounce delay (milliseconds)
        #[arg(long, allow_negative_numbers = true)]
        delay_ms: Option<i64>,
    },
    /// List sort/filter options
    Filters {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show navigation state for a section
    Nav {
        /// Section title as it appears in the route (slug form)
        section: String,
        /// TOML file listing known sections
        #[arg(long)]
        sections: Option<PathBuf>,
        /// Treat the user as signed in
        #[arg(long)]
        signed_in: bool,
        /// Require login before asking a question (overrides config)
        #[arg(long)]
        redirect_to_login: bool,
        /// Filter value to apply (e.g. week)
        #[arg(long)]
        filter: Option<String>,
        /// Page path the login flow returns to (overrides config)
        #[arg(long)]
        base_url: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// View and edit configuration
    Config {
        /// List all configuration values
        #[arg(long)]
        list: bool,
        /// Get a single value
        #[arg(long, value_name = "KEY")]
        get: Option<String>,
        /// Set a value
        #[arg(long, num_args = 2, value_names = ["KEY", "VALUE"])]
        set: Option<Vec<String>>,
        /// Show config file path
        #[arg(long)]
        path: bool,
        /// Create the config file if missing (with --path)
        #[arg(long)]
        create: bool,
        /// Print an example configuration
        #[arg(long)]
        example: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search { delay_ms } => cmd::search::run(delay_ms).await,
        Commands::Filters { json } => cmd::filters::run(json).await,
        Commands::Nav { section, sections, signed_in, redirect_to_login, filter, base_url, json } => {
            cmd::nav::run(cmd::nav::NavArgs {
                section,
                sections,
                signed_in,
                redirect_to_login,
                filter,
                base_url,
                json,
            })
            .await
        }
        Commands::Config { list, get, set, path, create, example } => {
            if list {
                cmd::config::run_list().await
            } else if let Some(key) = get {
                cmd::config::run_get(&key).await
            } else if let Some(pair) = set {
                cmd::config::run_set(&pair[0], &pair[1]).await
            } else if path {
                cmd::config::run_path(create).await
            } else if example {
                cmd::config::run_example().await
            } else {
                cmd::config::run_list().await
            }
        }
    }
}
