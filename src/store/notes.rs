//! Daily food note, valid for the current calendar day only.

use std::sync::Arc;

use tracing::warn;

use crate::datekey::{display_date, today, today_key};
use crate::models::FoodNotes;
use crate::storage::{Storage, FOOD_NOTES_KEY};

/// Owner of the single persisted note under `foodNotes`.
pub struct NotesStore {
    storage: Arc<dyn Storage>,
}

impl NotesStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Returns the stored note when it was written today. A note from an
    /// earlier day is stale: the cleared shape is written back and `None`
    /// is returned.
    pub async fn load_today(&self) -> Option<FoodNotes> {
        let stored = match self.storage.load(FOOD_NOTES_KEY).await {
            Ok(Some(value)) => match serde_json::from_value::<FoodNotes>(value) {
                Ok(notes) => Some(notes),
                Err(e) => {
                    warn!(key = FOOD_NOTES_KEY, error = %e, "stored note is malformed");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key = FOOD_NOTES_KEY, error = %e, "failed to load note");
                None
            }
        };

        match stored {
            Some(notes) if notes.date_key.as_deref() == Some(today_key().as_str()) => Some(notes),
            Some(_) => {
                self.save(&FoodNotes::default()).await;
                None
            }
            None => None,
        }
    }

    /// Persists `text` stamped with today's date-key and display date.
    pub async fn save_today(&self, text: impl Into<String>) -> FoodNotes {
        let notes = FoodNotes {
            text: text.into(),
            date_key: Some(today_key()),
            display_date: Some(display_date(today())),
        };
        self.save(&notes).await;
        notes
    }

    async fn save(&self, notes: &FoodNotes) {
        match serde_json::to_value(notes) {
            Ok(value) => {
                if let Err(e) = self.storage.save(FOOD_NOTES_KEY, value).await {
                    warn!(key = FOOD_NOTES_KEY, error = %e, "failed to persist note");
                }
            }
            Err(e) => warn!(key = FOOD_NOTES_KEY, error = %e, "failed to encode note"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn test_store() -> (NotesStore, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let store = NotesStore::new(Arc::clone(&storage) as Arc<dyn Storage>);
        (store, storage)
    }

    #[tokio::test]
    async fn test_saved_note_loads_back_same_day() {
        let (store, _storage) = test_store();
        store.save_today("chicken and rice").await;

        let notes = store.load_today().await.unwrap();
        assert_eq!(notes.text, "chicken and rice");
        assert_eq!(notes.date_key.as_deref(), Some(today_key().as_str()));
        assert_eq!(
            notes.display_date.as_deref(),
            Some(display_date(today()).as_str())
        );
    }

    #[tokio::test]
    async fn test_stale_note_is_cleared() {
        let (store, storage) = test_store();
        storage
            .insert(
                FOOD_NOTES_KEY,
                json!({"text": "old note", "dateKey": "2020-01-01", "displayDate": "1.1.2020"}),
            )
            .await;

        assert!(store.load_today().await.is_none());

        // Cleared shape was written through.
        let persisted: FoodNotes =
            serde_json::from_value(storage.get(FOOD_NOTES_KEY).await.unwrap()).unwrap();
        assert!(persisted.is_cleared());
    }

    #[tokio::test]
    async fn test_no_note_is_none_without_write() {
        let (store, storage) = test_store();
        assert!(store.load_today().await.is_none());
        assert!(storage.get(FOOD_NOTES_KEY).await.is_none());
    }
}
