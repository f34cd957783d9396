use clap::Args;
use std::sync::Arc;

use super::{print_record, OutputFormat};
use crate::datekey::today;
use crate::storage::Storage;
use crate::store::LedgerStore;

#[derive(Args)]
pub struct TodayCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl TodayCommand {
    pub async fn run(&self, storage: Arc<dyn Storage>) -> Result<(), Box<dyn std::error::Error>> {
        let ledger = LedgerStore::new(storage);
        ledger.loaded().await;

        let record = ledger.today_record();
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
            OutputFormat::Text => {
                println!("{}", today().format("%A, %b %-d"));
                print_record(&record);
            }
        }
        Ok(())
    }
}
