//! recordb CLI
//!
//! Adds employees to record files and lists them.
//!
//! # Commands
//!
//! - `add` - Prompt for an employee and append it to a file
//! - `list` - Print every employee in a file

mod commands;

use clap::{Parser, Subcommand};
use commands::list::OutputFormat;
use recordb_core::{CodecKind, ReadFailurePolicy, RecordStore, StoreConfig};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// recordb command-line record tools.
#[derive(Parser)]
#[command(name = "recordb")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// File format (native, text, wire)
    #[arg(global = true, long, default_value = "wire")]
    format: CodecKind,

    /// Fail instead of starting over when an existing file cannot be read
    #[arg(global = true, long)]
    strict_read: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for an employee and append it to a file
    Add {
        /// Record file, created if missing
        file: PathBuf,
    },

    /// Print every employee in a file
    List {
        /// Record file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },

    /// Show version information
    Version,
}

impl Cli {
    fn store_config(&self) -> StoreConfig {
        let policy = if self.strict_read {
            ReadFailurePolicy::Fail
        } else {
            ReadFailurePolicy::StartEmpty
        };
        StoreConfig::new().codec(self.format).read_failure(policy)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = RecordStore::new(cli.store_config());

    match cli.command {
        Commands::Add { file } => {
            commands::add::run(&store, &file)?;
        }
        Commands::List { file, output } => {
            commands::list::run(&store, &file, output)?;
        }
        Commands::Version => {
            println!("recordb CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("recordb core v{}", recordb_core::VERSION);
        }
    }

    Ok(())
}
