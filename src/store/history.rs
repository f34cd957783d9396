//! Append-only history of manual additions, bucketed by date-key.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use tokio::sync::Mutex;
use tracing::warn;

use crate::datekey::date_key;
use crate::models::{EntryData, EntryKind, HistoryEntry};
use crate::storage::{Storage, NUTRITION_HISTORY_KEY};

/// The full persisted log, date-key to insertion-ordered entries.
pub type History = BTreeMap<String, Vec<HistoryEntry>>;

/// Append-only record of every explicit manual addition.
///
/// Entries are never mutated or removed individually; the only bulk
/// operation is the full clear. Each append is a read-modify-write of the
/// whole persisted mapping, serialized through an internal mutex so two
/// interleaved appends cannot lose an entry.
pub struct HistoryLog {
    storage: Arc<dyn Storage>,
    write_lock: Mutex<()>,
}

impl HistoryLog {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// Appends an entry stamped with the current local time, bucketed under
    /// that time's date-key. Never fails; on persistence failure the entry
    /// is logged and dropped with the session.
    pub async fn add_entry(&self, kind: EntryKind, data: EntryData) -> HistoryEntry {
        let _guard = self.write_lock.lock().await;

        let now = Local::now();
        let entry = HistoryEntry::new(kind, data, now);
        let bucket = date_key(now.date_naive());

        let mut history = self.load_all().await;
        history.entry(bucket).or_default().push(entry.clone());
        self.save_all(&history).await;

        entry
    }

    /// Full date-key → entries mapping, empty when nothing is persisted.
    pub async fn history(&self) -> History {
        self.load_all().await
    }

    /// Entries for one date, empty when the bucket is absent.
    pub async fn entries_for(&self, date: NaiveDate) -> Vec<HistoryEntry> {
        self.load_all()
            .await
            .remove(&date_key(date))
            .unwrap_or_default()
    }

    /// Replaces the persisted log with an empty mapping. When to call this
    /// (day rollover) is the caller's policy, never this component's.
    pub async fn clear(&self) {
        let _guard = self.write_lock.lock().await;
        self.save_all(&History::new()).await;
    }

    async fn load_all(&self) -> History {
        match self.storage.load(NUTRITION_HISTORY_KEY).await {
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(history) => history,
                Err(e) => {
                    warn!(key = NUTRITION_HISTORY_KEY, error = %e, "stored history is malformed, treating as empty");
                    History::new()
                }
            },
            Ok(None) => History::new(),
            Err(e) => {
                warn!(key = NUTRITION_HISTORY_KEY, error = %e, "failed to load history");
                History::new()
            }
        }
    }

    async fn save_all(&self, history: &History) {
        match serde_json::to_value(history) {
            Ok(value) => {
                if let Err(e) = self.storage.save(NUTRITION_HISTORY_KEY, value).await {
                    warn!(key = NUTRITION_HISTORY_KEY, error = %e, "failed to persist history");
                }
            }
            Err(e) => warn!(key = NUTRITION_HISTORY_KEY, error = %e, "failed to encode history"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datekey::today;
    use crate::storage::MemoryStorage;
    use std::collections::HashSet;

    fn test_log() -> (HistoryLog, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let log = HistoryLog::new(Arc::clone(&storage) as Arc<dyn Storage>);
        (log, storage)
    }

    #[tokio::test]
    async fn test_add_then_read_back() {
        let (log, _storage) = test_log();
        log.add_entry(EntryKind::Protein, EntryData::Protein { protein: 12.5 })
            .await;

        let entries = log.entries_for(today()).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, EntryKind::Protein);
        assert_eq!(entries[0].data.protein(), Some(12.5));
    }

    #[tokio::test]
    async fn test_entry_bucket_matches_timestamp_date() {
        let (log, _storage) = test_log();
        let entry = log
            .add_entry(EntryKind::Calories, EntryData::Calories { calories: 250 })
            .await;

        let history = log.history().await;
        let (bucket, entries) = history.iter().next().unwrap();
        assert!(entry.timestamp.starts_with(bucket.as_str()));
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_sequential_appends_keep_every_entry() {
        let (log, _storage) = test_log();
        for i in 0..5u32 {
            log.add_entry(EntryKind::Calories, EntryData::Calories { calories: 100 + i })
                .await;
        }

        let entries = log.entries_for(today()).await;
        assert_eq!(entries.len(), 5);

        let ids: HashSet<_> = entries.iter().map(|e| e.id.clone()).collect();
        assert_eq!(ids.len(), 5, "ids are distinct");

        let amounts: Vec<_> = entries.iter().filter_map(|e| e.data.calories()).collect();
        assert_eq!(amounts, vec![100, 101, 102, 103, 104], "insertion order kept");
    }

    #[tokio::test]
    async fn test_concurrent_appends_do_not_lose_entries() {
        let (log, _storage) = test_log();
        tokio::join!(
            log.add_entry(EntryKind::Calories, EntryData::Calories { calories: 1 }),
            log.add_entry(EntryKind::Protein, EntryData::Protein { protein: 2.0 }),
            log.add_entry(
                EntryKind::Favourite,
                EntryData::Favourite {
                    calories: 100,
                    protein: 2.0,
                    food_name: "Banana".to_string()
                }
            ),
        );

        assert_eq!(log.entries_for(today()).await.len(), 3);
    }

    #[tokio::test]
    async fn test_clear_replaces_with_empty_mapping() {
        let (log, storage) = test_log();
        log.add_entry(EntryKind::Calories, EntryData::Calories { calories: 50 })
            .await;
        log.clear().await;

        assert!(log.history().await.is_empty());
        // The empty mapping is written through, not just forgotten.
        assert_eq!(
            storage.get(NUTRITION_HISTORY_KEY).await,
            Some(serde_json::json!({}))
        );
    }

    #[tokio::test]
    async fn test_missing_bucket_is_empty() {
        let (log, _storage) = test_log();
        let date = NaiveDate::from_ymd_opt(1999, 1, 1).unwrap();
        assert!(log.entries_for(date).await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_stored_history_treated_as_empty() {
        let (log, storage) = test_log();
        storage
            .insert(NUTRITION_HISTORY_KEY, serde_json::json!("not a mapping"))
            .await;

        assert!(log.history().await.is_empty());
        // The next append self-heals the persisted shape.
        log.add_entry(EntryKind::Calories, EntryData::Calories { calories: 10 })
            .await;
        assert_eq!(log.entries_for(today()).await.len(), 1);
    }
}
