use clap::{Args, Subcommand};
use std::sync::Arc;

use crate::storage::Storage;
use crate::store::NotesStore;

#[derive(Args)]
pub struct NotesCommand {
    #[command(subcommand)]
    pub command: Option<NotesSubcommand>,
}

#[derive(Subcommand)]
pub enum NotesSubcommand {
    /// Show today's note
    Show,

    /// Replace today's note
    Set {
        /// Note text
        text: String,
    },
}

impl NotesCommand {
    pub async fn run(&self, storage: Arc<dyn Storage>) -> Result<(), Box<dyn std::error::Error>> {
        let notes = NotesStore::new(storage);

        match &self.command {
            Some(NotesSubcommand::Set { text }) => {
                let saved = notes.save_today(text.clone()).await;
                println!(
                    "Note saved for {}.",
                    saved.display_date.as_deref().unwrap_or("today")
                );
            }
            Some(NotesSubcommand::Show) | None => match notes.load_today().await {
                Some(saved) => {
                    println!("{}", saved.text);
                    if let Some(date) = saved.display_date.as_deref() {
                        println!("(saved {})", date);
                    }
                }
                None => println!("No note for today."),
            },
        }
        Ok(())
    }
}
