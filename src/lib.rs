//! Nutrilog Core Library
//!
//! Local-first nutrition tracking: a day-keyed ledger of calories, protein
//! and supplement flags, an append-only history log of manual additions,
//! a list of favourite food presets and a daily food note, all persisted
//! as JSON documents in a small key-value store.

pub mod commands;
pub mod config;
pub mod datekey;
pub mod models;
pub mod numfmt;
pub mod storage;
pub mod store;

pub use models::{DailyRecord, EntryData, EntryKind, FavouriteItem, FoodNotes, HistoryEntry, RecordPatch};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{FavouritesStore, HistoryLog, LedgerEvent, LedgerStore, NotesStore, SortMode};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
