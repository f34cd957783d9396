use clap::{Args, Subcommand};
use std::sync::Arc;

use super::{parse_date_arg, print_record, OutputFormat};
use crate::models::RecordPatch;
use crate::numfmt::{format_decimal_comma, round2};
use crate::storage::Storage;
use crate::store::LedgerStore;

#[derive(Args)]
pub struct DayCommand {
    #[command(subcommand)]
    pub command: DaySubcommand,
}

#[derive(Subcommand)]
pub enum DaySubcommand {
    /// Show the record for a date
    Show {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Edit fields of the record for a date; unset fields keep their value
    Set {
        /// Date (YYYY-MM-DD)
        date: String,

        /// Total calories for the day
        #[arg(long)]
        calories: Option<u32>,

        /// Total protein grams for the day
        #[arg(long)]
        protein: Option<f64>,

        /// Creatine taken
        #[arg(long)]
        creatine: Option<bool>,

        /// Fish oil taken
        #[arg(long)]
        fish_oil: Option<bool>,
    },

    /// List every date with an explicit record
    List,
}

impl DayCommand {
    pub async fn run(&self, storage: Arc<dyn Storage>) -> Result<(), Box<dyn std::error::Error>> {
        let ledger = LedgerStore::new(storage);
        ledger.loaded().await;

        match &self.command {
            DaySubcommand::Show { date, format } => {
                let date = parse_date_arg(date)?;
                let record = ledger.record_for(date);
                match format {
                    OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
                    OutputFormat::Text => {
                        println!("{}", date.format("%A, %b %-d"));
                        print_record(&record);
                    }
                }
            }

            DaySubcommand::Set {
                date,
                calories,
                protein,
                creatine,
                fish_oil,
            } => {
                let date = parse_date_arg(date)?;
                let patch = RecordPatch {
                    calories: *calories,
                    protein: protein.map(round2),
                    creatine: *creatine,
                    fish_oil: *fish_oil,
                };
                if patch.is_empty() {
                    println!("Nothing to change.");
                } else {
                    ledger.update_for(date, patch);
                    ledger.flush().await;
                    println!("Updated {}.", date);
                    print_record(&ledger.record_for(date));
                }
            }

            DaySubcommand::List => {
                let all = ledger.all();
                if all.is_empty() {
                    println!("No records yet.");
                }
                for (date_key, record) in &all {
                    println!(
                        "{}  {} kcal, {} g protein",
                        date_key,
                        record.calories,
                        format_decimal_comma(record.protein)
                    );
                }
            }
        }
        Ok(())
    }
}
