use clap::{Args, ValueEnum};
use std::sync::Arc;

use crate::models::RecordPatch;
use crate::storage::Storage;
use crate::store::LedgerStore;

#[derive(Clone, Copy, ValueEnum)]
pub enum Supplement {
    Creatine,
    FishOil,
}

impl Supplement {
    fn label(&self) -> &'static str {
        match self {
            Supplement::Creatine => "Creatine",
            Supplement::FishOil => "Fish oil",
        }
    }
}

#[derive(Args)]
pub struct SupplementCommand {
    /// Which supplement to update
    #[arg(value_enum)]
    supplement: Supplement,

    /// Mark as taken instead of toggling
    #[arg(long, conflicts_with = "not_taken")]
    taken: bool,

    /// Mark as not taken instead of toggling
    #[arg(long)]
    not_taken: bool,
}

impl SupplementCommand {
    pub async fn run(&self, storage: Arc<dyn Storage>) -> Result<(), Box<dyn std::error::Error>> {
        let ledger = LedgerStore::new(storage);
        ledger.loaded().await;

        let today = ledger.today_record();
        let current = match self.supplement {
            Supplement::Creatine => today.creatine,
            Supplement::FishOil => today.fish_oil,
        };
        let new_value = if self.taken {
            true
        } else if self.not_taken {
            false
        } else {
            !current
        };

        let patch = match self.supplement {
            Supplement::Creatine => RecordPatch::new().with_creatine(new_value),
            Supplement::FishOil => RecordPatch::new().with_fish_oil(new_value),
        };
        ledger.update_today(patch);
        ledger.flush().await;

        println!(
            "{} marked {} for today.",
            self.supplement.label(),
            if new_value { "taken" } else { "not taken" }
        );
        Ok(())
    }
}
