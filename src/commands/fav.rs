use clap::{Args, Subcommand, ValueEnum};
use std::sync::Arc;

use crate::numfmt::{format_decimal_comma, parse_decimal_input, round2};
use crate::storage::Storage;
use crate::store::{FavouritesStore, SortMode};

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum SortArg {
    /// Newest first
    #[default]
    Recent,
    /// Case-insensitive by name
    Alpha,
}

impl From<SortArg> for SortMode {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Recent => SortMode::Recent,
            SortArg::Alpha => SortMode::Alpha,
        }
    }
}

#[derive(Args)]
pub struct FavCommand {
    #[command(subcommand)]
    pub command: FavSubcommand,
}

#[derive(Subcommand)]
pub enum FavSubcommand {
    /// List favourite presets
    List {
        /// Sort order
        #[arg(long, short, value_enum, default_value = "recent")]
        sort: SortArg,
    },

    /// Add a favourite preset
    Add {
        /// Food name
        name: String,

        /// Calories per portion, kcal
        #[arg(long)]
        calories: String,

        /// Protein per portion, grams (comma or dot decimals)
        #[arg(long, default_value = "0")]
        protein: String,
    },

    /// Remove a favourite preset by id
    Remove {
        /// Favourite id
        id: u64,
    },
}

impl FavCommand {
    pub async fn run(&self, storage: Arc<dyn Storage>) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            FavSubcommand::List { sort } => {
                let favourites = FavouritesStore::load(storage).await;
                for item in favourites.sorted((*sort).into()) {
                    println!(
                        "{:3}  {}  ({} kcal, {} g protein)",
                        item.id,
                        item.name,
                        item.calories,
                        format_decimal_comma(item.protein)
                    );
                }
            }

            FavSubcommand::Add {
                name,
                calories,
                protein,
            } => {
                // Blank names never reach the store.
                let name = name.trim();
                if name.is_empty() {
                    return Err("Please enter a food name.".into());
                }
                let calories = parse_decimal_input(calories).trunc() as u32;
                let protein = round2(parse_decimal_input(protein));

                let favourites = FavouritesStore::load(storage).await;
                let item = favourites.add(name, calories, protein).await;
                println!("Added favourite #{}: {}", item.id, item);
            }

            FavSubcommand::Remove { id } => {
                let favourites = FavouritesStore::load(storage).await;
                if favourites.remove(*id).await {
                    println!("Removed favourite #{}.", id);
                } else {
                    return Err(format!("Favourite not found: {}", id).into());
                }
            }
        }
        Ok(())
    }
}
