//! file-picker - open a native file dialog from the command line
//!
//! # Usage
//!
//! Pick one file starting in the current directory:
//! ```bash
//! file-picker open
//! ```
//!
//! Pick several Markdown files with a specific tool:
//! ```bash
//! file-picker open ~/notes --multiple --filter '*.md' --tool zenity
//! ```
//!
//! See which tools are installed:
//! ```bash
//! file-picker tools
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::debug;

use unix_file_picker::{DialogConfig, DialogOptions, DialogResult, FileDialog, Registry};

#[derive(Parser)]
#[command(name = "file-picker")]
#[command(version, about = "Open a native file selection dialog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a file dialog and print the selected paths
    Open {
        /// Starting directory (defaults to current directory)
        directory: Option<PathBuf>,

        /// Allow selecting several files
        #[arg(short, long)]
        multiple: bool,

        /// Dialog title
        #[arg(short, long)]
        title: Option<String>,

        /// File pattern filter, e.g. '*.txt' (repeatable)
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Try this tool first
        #[arg(long, env = "FILE_PICKER_TOOL")]
        tool: Option<String>,

        /// Give up after this many seconds
        #[arg(long, env = "FILE_PICKER_TIMEOUT_SECS")]
        timeout: Option<u64>,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List dialog tools available on this system
    Tools {
        /// Show every supported tool, installed or not
        #[arg(long)]
        all: bool,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays a clean list of paths
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    match cli.command {
        Commands::Open {
            directory,
            multiple,
            title,
            filters,
            tool,
            timeout,
            format,
        } => {
            let options = DialogOptions {
                multiple,
                title,
                file_types: filters,
            };
            let canceled = cmd_open(directory, options, tool, timeout, format).await?;
            if canceled {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Tools { all, format } => cmd_tools(all, format).await,
    }
}

/// Open a dialog; returns true if the user canceled
async fn cmd_open(
    directory: Option<PathBuf>,
    options: DialogOptions,
    tool: Option<String>,
    timeout: Option<u64>,
    format: Format,
) -> Result<bool> {
    let mut config = DialogConfig::from_env()?;
    if tool.is_some() {
        config.preferred_tool = tool;
    }
    if timeout.is_some() {
        config.timeout_secs = timeout.filter(|secs| *secs > 0);
    }
    debug!("Config: {:?}", config);

    let dialog = FileDialog::new(Registry::builtin(), config)?;
    let result = dialog.open(directory.as_deref(), &options).await?;

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        Format::Text => {
            for path in result.paths() {
                println!("{}", path.display());
            }
        }
    }

    Ok(matches!(result, DialogResult::Canceled))
}

/// List installed (or all) dialog tools
async fn cmd_tools(all: bool, format: Format) -> Result<()> {
    let registry = Registry::builtin();
    let names = if all {
        registry.names()
    } else {
        registry.available().await
    };

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&names)?),
        Format::Text => {
            if names.is_empty() {
                eprintln!(
                    "No dialog tools found. Install one of: {}",
                    registry.names().join(", ")
                );
            }
            for name in names {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
