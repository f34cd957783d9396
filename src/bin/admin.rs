//! Nutrilog Admin CLI
//!
//! Inspection tool for the raw key-value store. It operates on the
//! persistence layer directly and bypasses the stores' in-memory caches;
//! after a wipe, any running store instance is stale until restarted.
//!
//! # Usage
//!
//! ```bash
//! nutrilog-admin list
//! nutrilog-admin wipe --yes
//! ```
//!
//! # Environment Variables
//!
//! - `NUTRILOG_DATA_DIR`: Directory holding the persisted JSON documents
//! - `NUTRILOG_CONFIG`: Path to config file (default: ~/.config/nutrilog/config.yaml)

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use nutrilog::config::Config;
use nutrilog::storage::{FileStorage, Storage};

// ============================================================================
// CLI Structure
// ============================================================================

#[derive(Parser)]
#[command(name = "nutrilog-admin")]
#[command(version)]
#[command(about = "Nutrilog raw storage inspection tool")]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum Format {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List every persisted key with its raw JSON value
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Delete every persisted key
    Wipe {
        /// Confirm the destructive wipe
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.clone())?;
    let storage = FileStorage::new(config.data_dir.clone());

    match cli.command {
        Commands::List { format } => list(&storage, format).await,
        Commands::Wipe { yes } => wipe(&storage, yes).await,
    }
}

// ============================================================================
// Commands
// ============================================================================

async fn list(storage: &FileStorage, format: Format) -> Result<(), Box<dyn std::error::Error>> {
    let keys = storage.keys().await?;

    match format {
        Format::Json => {
            let mut out = serde_json::Map::new();
            for key in keys {
                let value = storage.load(&key).await?.unwrap_or(serde_json::Value::Null);
                out.insert(key, value);
            }
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Text => {
            if keys.is_empty() {
                println!("Storage is empty ({}).", storage.data_dir().display());
                return Ok(());
            }
            for key in keys {
                let value = storage.load(&key).await?.unwrap_or(serde_json::Value::Null);
                println!("── {} ──", key);
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
        }
    }
    Ok(())
}

async fn wipe(storage: &FileStorage, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !yes {
        return Err("Refusing to wipe without --yes".into());
    }

    let count = storage.keys().await?.len();
    storage.clear().await?;
    println!("Removed {} key(s) from {}.", count, storage.data_dir().display());
    Ok(())
}
