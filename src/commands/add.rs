use clap::{Args, Subcommand};
use std::sync::Arc;

use crate::models::{EntryData, EntryKind, RecordPatch};
use crate::numfmt::{format_decimal_comma, parse_decimal_input, round2};
use crate::storage::Storage;
use crate::store::{HistoryLog, LedgerStore};

#[derive(Args)]
pub struct AddCommand {
    #[command(subcommand)]
    pub command: AddSubcommand,
}

#[derive(Subcommand)]
pub enum AddSubcommand {
    /// Add calories to today's total
    Calories {
        /// Amount in kcal
        amount: String,
    },

    /// Add protein grams to today's total (comma or dot decimals)
    Protein {
        /// Amount in grams
        amount: String,
    },

    /// Add a favourite preset to today's totals
    Favourite {
        /// Favourite id (see `nutrilog fav list`)
        id: u64,

        /// Multiplier applied to the preset, e.g. 1,5 portions
        #[arg(long, short, default_value = "1")]
        times: String,
    },
}

impl AddCommand {
    pub async fn run(
        &self,
        storage: Arc<dyn Storage>,
        history: &HistoryLog,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let ledger = LedgerStore::new(Arc::clone(&storage));
        ledger.loaded().await;

        match &self.command {
            AddSubcommand::Calories { amount } => {
                // Invalid or negative input coerces to zero; zero is a no-op.
                let amount = parse_decimal_input(amount).trunc() as u32;
                if amount == 0 {
                    println!("Nothing to add.");
                } else {
                    let today = ledger.today_record();
                    ledger.update_today(RecordPatch::new().with_calories(today.calories + amount));
                    history
                        .add_entry(EntryKind::Calories, EntryData::Calories { calories: amount })
                        .await;
                    println!(
                        "Added {} kcal. Today: {} kcal.",
                        amount,
                        ledger.today_record().calories
                    );
                }
            }

            AddSubcommand::Protein { amount } => {
                let amount = round2(parse_decimal_input(amount));
                if amount == 0.0 {
                    println!("Nothing to add.");
                } else {
                    let today = ledger.today_record();
                    ledger
                        .update_today(RecordPatch::new().with_protein(round2(today.protein + amount)));
                    history
                        .add_entry(EntryKind::Protein, EntryData::Protein { protein: amount })
                        .await;
                    println!(
                        "Added {} g protein. Today: {} g.",
                        format_decimal_comma(amount),
                        format_decimal_comma(ledger.today_record().protein)
                    );
                }
            }

            AddSubcommand::Favourite { id, times } => {
                let favourites = crate::store::FavouritesStore::load(Arc::clone(&storage)).await;
                let item = favourites
                    .get(*id)
                    .ok_or_else(|| format!("Favourite not found: {}", id))?;

                let multiplier = parse_decimal_input(times);
                let calories = (item.calories as f64 * multiplier).round().max(0.0) as u32;
                let protein = round2((item.protein * multiplier).max(0.0));

                if calories == 0 && protein == 0.0 {
                    println!("Nothing to add.");
                } else {
                    let today = ledger.today_record();
                    ledger.update_today(
                        RecordPatch::new()
                            .with_calories(today.calories + calories)
                            .with_protein(round2(today.protein + protein)),
                    );
                    history
                        .add_entry(
                            EntryKind::Favourite,
                            EntryData::Favourite {
                                calories,
                                protein,
                                food_name: item.name.clone(),
                            },
                        )
                        .await;
                    println!(
                        "{} × {} added to today.",
                        item.name,
                        format_decimal_comma(multiplier)
                    );
                }
            }
        }

        ledger.flush().await;
        Ok(())
    }
}
