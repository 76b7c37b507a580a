//! docweave CLI — the main entry point.
//!
//! Commands:
//! - `expand` — Expand placeholders in a message and print the result
//! - `fetch`  — Resolve a single locator and print the fetched document

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "docweave",
    about = "docweave — inline reference expansion for LLM chat messages",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand placeholders in a message
    Expand {
        /// The message to expand
        message: Option<String>,

        /// Read the message from a file instead
        #[arg(short, long, conflicts_with = "message")]
        prompt_file: Option<PathBuf>,
    },

    /// Resolve a single locator and print the document
    Fetch {
        /// The source URL or path
        source: String,

        /// Loader options (`key=value;key=value`)
        #[arg(long)]
        options: Option<String>,

        /// Write the document to a file instead of stdout
        #[arg(short, long)]
        output_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Expand {
            message,
            prompt_file,
        } => commands::expand::run(message, prompt_file).await?,
        Commands::Fetch {
            source,
            options,
            output_file,
        } => commands::fetch::run(source, options, output_file).await?,
    }

    Ok(())
}
