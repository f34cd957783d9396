use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use nutrilog::commands::{
    self, AddCommand, ConfigCommand, DayCommand, FavCommand, HistoryCommand, NotesCommand,
    ResetCommand, SupplementCommand, ThemeCommand, TodayCommand,
};
use nutrilog::config::Config;
use nutrilog::storage::{FileStorage, Storage};
use nutrilog::store::HistoryLog;

#[derive(Parser)]
#[command(name = "nutrilog")]
#[command(version)]
#[command(about = "A personal nutrition tracking CLI", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's totals and supplement status
    Today(TodayCommand),

    /// Add calories, protein, or a favourite to today
    Add(AddCommand),

    /// Toggle today's supplement flags
    Supplement(SupplementCommand),

    /// Reset today's record to zero
    Reset(ResetCommand),

    /// Show or edit the record for an arbitrary date
    Day(DayCommand),

    /// Browse or clear the history log
    History(HistoryCommand),

    /// Manage favourite food presets
    Fav(FavCommand),

    /// Daily food note
    Notes(NotesCommand),

    /// Show or change the colour theme preference
    Theme(ThemeCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.clone())?;
    let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(config.data_dir.clone()));

    // Launch-time policy: drop the history log once the day rolls over.
    let history = HistoryLog::new(Arc::clone(&storage));
    commands::clear_history_on_new_day(&history).await;

    match cli.command {
        Some(Commands::Today(cmd)) => cmd.run(storage).await?,
        Some(Commands::Add(cmd)) => cmd.run(storage, &history).await?,
        Some(Commands::Supplement(cmd)) => cmd.run(storage).await?,
        Some(Commands::Reset(cmd)) => cmd.run(storage).await?,
        Some(Commands::Day(cmd)) => cmd.run(storage).await?,
        Some(Commands::History(cmd)) => cmd.run(&history).await?,
        Some(Commands::Fav(cmd)) => cmd.run(storage).await?,
        Some(Commands::Notes(cmd)) => cmd.run(storage).await?,
        Some(Commands::Theme(cmd)) => cmd.run(storage).await?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
