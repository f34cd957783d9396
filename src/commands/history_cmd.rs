use chrono::DateTime;
use clap::{Args, Subcommand};

use super::{parse_date_arg, OutputFormat};
use crate::models::HistoryEntry;
use crate::numfmt::format_decimal_comma;
use crate::store::HistoryLog;

#[derive(Args)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub command: Option<HistorySubcommand>,

    /// Show a single date (YYYY-MM-DD) instead of the full log
    #[arg(long, short)]
    date: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Subcommand)]
pub enum HistorySubcommand {
    /// Clear the whole history log
    Clear {
        /// Skip the confirmation step
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

impl HistoryCommand {
    pub async fn run(&self, history: &HistoryLog) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(HistorySubcommand::Clear { yes }) = &self.command {
            if !*yes {
                println!("This will clear the whole history log. Re-run with --yes to confirm.");
                return Ok(());
            }
            history.clear().await;
            println!("History cleared.");
            return Ok(());
        }

        match &self.date {
            Some(date) => {
                let date = parse_date_arg(date)?;
                let entries = history.entries_for(date).await;
                match self.format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                    OutputFormat::Text => {
                        if entries.is_empty() {
                            println!("No entries for {}.", date);
                        }
                        for entry in &entries {
                            print_entry(entry);
                        }
                    }
                }
            }
            None => {
                let log = history.history().await;
                match self.format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&log)?),
                    OutputFormat::Text => {
                        if log.is_empty() {
                            println!("No history yet.");
                        }
                        for (date_key, entries) in &log {
                            println!("{}", date_key);
                            for entry in entries {
                                print_entry(entry);
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

fn print_entry(entry: &HistoryEntry) {
    let time = DateTime::parse_from_rfc3339(&entry.timestamp)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|_| entry.timestamp.clone());

    let mut parts = Vec::new();
    if let Some(calories) = entry.data.calories() {
        parts.push(format!("+{} kcal", calories));
    }
    if let Some(protein) = entry.data.protein() {
        parts.push(format!("+{} g protein", format_decimal_comma(protein)));
    }
    let mut line = format!("  {}  {:9} {}", time, entry.kind.to_string(), parts.join(", "));
    if let Some(name) = entry.data.food_name() {
        line.push_str(&format!(" ({})", name));
    }
    println!("{}", line);
}
