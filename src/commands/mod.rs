//! CLI command implementations.

mod add;
mod config_cmd;
mod day;
mod fav;
mod history_cmd;
mod notes_cmd;
mod reset;
mod supplement;
mod theme;
mod today;

pub use add::AddCommand;
pub use config_cmd::ConfigCommand;
pub use day::DayCommand;
pub use fav::FavCommand;
pub use history_cmd::HistoryCommand;
pub use notes_cmd::NotesCommand;
pub use reset::ResetCommand;
pub use supplement::SupplementCommand;
pub use theme::ThemeCommand;
pub use today::TodayCommand;

use chrono::NaiveDate;
use clap::ValueEnum;

use crate::datekey::{parse_date_key, today_key};
use crate::models::DailyRecord;
use crate::numfmt::format_decimal_comma;
use crate::store::HistoryLog;

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parses a CLI date argument in canonical date-key form.
pub(crate) fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date_key(s).ok_or_else(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Renders one daily record as the standard text block.
pub(crate) fn print_record(record: &DailyRecord) {
    println!("  Calories: {} kcal", record.calories);
    println!("  Protein:  {} g", format_decimal_comma(record.protein));
    println!(
        "  Creatine: {}",
        if record.creatine { "taken" } else { "not taken" }
    );
    println!(
        "  Fish oil: {}",
        if record.fish_oil { "taken" } else { "not taken" }
    );
}

/// Launch-time policy: the history log only ever spans the current day.
/// When the most recently written bucket is not from today, the whole log
/// is cleared. The trigger condition lives here in the composing layer;
/// the history component only exposes `clear`.
pub async fn clear_history_on_new_day(history: &HistoryLog) {
    let log = history.history().await;
    if let Some(last) = log.keys().next_back() {
        if *last != today_key() {
            history.clear().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datekey::today;
    use crate::models::{EntryData, EntryKind};
    use crate::storage::{MemoryStorage, Storage, NUTRITION_HISTORY_KEY};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_stale_history_is_cleared_at_launch() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .insert(
                NUTRITION_HISTORY_KEY,
                json!({"2020-01-01": [{"id": "t", "type": "calories", "timestamp": "t", "data": {"calories": 1}}]}),
            )
            .await;
        let history = HistoryLog::new(Arc::clone(&storage) as Arc<dyn Storage>);

        clear_history_on_new_day(&history).await;
        assert!(history.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_todays_history_survives_launch() {
        let storage = Arc::new(MemoryStorage::new());
        let history = HistoryLog::new(Arc::clone(&storage) as Arc<dyn Storage>);
        history
            .add_entry(EntryKind::Calories, EntryData::Calories { calories: 100 })
            .await;

        clear_history_on_new_day(&history).await;
        assert_eq!(history.entries_for(today()).await.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_history_launch_is_noop() {
        let storage = Arc::new(MemoryStorage::new());
        let history = HistoryLog::new(Arc::clone(&storage) as Arc<dyn Storage>);

        clear_history_on_new_day(&history).await;
        // No empty mapping is written for a log that never existed.
        assert!(storage.get(NUTRITION_HISTORY_KEY).await.is_none());
    }

    #[test]
    fn test_parse_date_arg() {
        assert!(parse_date_arg("2025-10-02").is_ok());
        assert!(parse_date_arg("02.10.2025").is_err());
    }
}
