use clap::{Args, Subcommand};
use std::sync::Arc;
use tracing::warn;

use crate::storage::{Storage, THEME_PREFERENCE_KEY};

#[derive(Args)]
pub struct ThemeCommand {
    #[command(subcommand)]
    pub command: Option<ThemeSubcommand>,
}

#[derive(Subcommand)]
pub enum ThemeSubcommand {
    /// Show the active theme
    Show,
    /// Switch between dark and light
    Toggle,
    /// Use the dark theme
    Dark,
    /// Use the light theme
    Light,
}

impl ThemeCommand {
    pub async fn run(&self, storage: Arc<dyn Storage>) -> Result<(), Box<dyn std::error::Error>> {
        // The stored flag is true for dark mode; missing or unreadable
        // means the light default.
        let dark = match storage.load(THEME_PREFERENCE_KEY).await {
            Ok(Some(value)) => value.as_bool().unwrap_or(false),
            Ok(None) => false,
            Err(e) => {
                warn!(key = THEME_PREFERENCE_KEY, error = %e, "failed to load theme preference");
                false
            }
        };

        let new_dark = match self.command.as_ref().unwrap_or(&ThemeSubcommand::Show) {
            ThemeSubcommand::Show => {
                println!("Theme: {}", if dark { "dark" } else { "light" });
                return Ok(());
            }
            ThemeSubcommand::Toggle => !dark,
            ThemeSubcommand::Dark => true,
            ThemeSubcommand::Light => false,
        };

        if let Err(e) = storage
            .save(THEME_PREFERENCE_KEY, serde_json::json!(new_dark))
            .await
        {
            warn!(key = THEME_PREFERENCE_KEY, error = %e, "failed to persist theme preference");
        }
        println!("Theme: {}", if new_dark { "dark" } else { "light" });
        Ok(())
    }
}
