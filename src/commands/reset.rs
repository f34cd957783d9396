use clap::Args;
use std::sync::Arc;

use crate::models::RecordPatch;
use crate::storage::Storage;
use crate::store::LedgerStore;

#[derive(Args)]
pub struct ResetCommand {
    /// Skip the confirmation step
    #[arg(long, short = 'y')]
    yes: bool,
}

impl ResetCommand {
    pub async fn run(&self, storage: Arc<dyn Storage>) -> Result<(), Box<dyn std::error::Error>> {
        if !self.yes {
            println!("This will clear today's nutrition data (calories, protein, supplements).");
            println!("Re-run with --yes to confirm.");
            return Ok(());
        }

        let ledger = LedgerStore::new(storage);
        ledger.loaded().await;
        // The date-key entry persists with zeroed fields.
        ledger.update_today(RecordPatch::reset());
        ledger.flush().await;

        println!("Today's record reset.");
        Ok(())
    }
}
