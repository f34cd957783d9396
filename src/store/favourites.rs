//! Persisted list of reusable food presets.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::models::FavouriteItem;
use crate::storage::{Storage, FAVOURITES_KEY};

/// Presentation order for the favourites list, recomputed on demand and
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Newest first, assuming a larger id means newer.
    #[default]
    Recent,
    /// Case-insensitive by name.
    Alpha,
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortMode::Recent => write!(f, "recent"),
            SortMode::Alpha => write!(f, "alpha"),
        }
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "recent" => Ok(SortMode::Recent),
            "alpha" => Ok(SortMode::Alpha),
            _ => Err(format!(
                "Invalid sort mode '{}'. Valid options: recent, alpha",
                s
            )),
        }
    }
}

fn default_favourites() -> Vec<FavouriteItem> {
    vec![
        FavouriteItem::new(1, "Banana", 100, 2.0),
        FavouriteItem::new(2, "Greek Yogurt", 150, 15.0),
        FavouriteItem::new(3, "Chicken Breast", 200, 30.0),
        FavouriteItem::new(4, "Oatmeal", 300, 10.0),
    ]
}

/// Persisted list of food presets.
///
/// Loading is part of construction; the first run seeds the default set and
/// persists it immediately so subsequent loads read the seeded list.
/// Mutations apply in memory first, then write the full list through;
/// persistence failures are logged and never surfaced.
pub struct FavouritesStore {
    storage: Arc<dyn Storage>,
    items: Mutex<Vec<FavouriteItem>>,
}

impl FavouritesStore {
    pub async fn load(storage: Arc<dyn Storage>) -> Self {
        let (items, seed) = match storage.load(FAVOURITES_KEY).await {
            Ok(Some(value)) => match serde_json::from_value::<Vec<FavouriteItem>>(value) {
                Ok(items) => (items, false),
                Err(e) => {
                    warn!(key = FAVOURITES_KEY, error = %e, "stored favourites are malformed, reseeding defaults");
                    (default_favourites(), true)
                }
            },
            Ok(None) => {
                info!(key = FAVOURITES_KEY, "no favourites stored, seeding defaults");
                (default_favourites(), true)
            }
            // Transient read failure: fall back to defaults for this session
            // but do not overwrite whatever is actually persisted.
            Err(e) => {
                warn!(key = FAVOURITES_KEY, error = %e, "failed to load favourites");
                (default_favourites(), false)
            }
        };

        let store = Self {
            storage,
            items: Mutex::new(items),
        };
        if seed {
            store.persist().await;
        }
        store
    }

    /// Items in insertion order.
    pub fn all(&self) -> Vec<FavouriteItem> {
        self.lock_items().clone()
    }

    pub fn get(&self, id: u64) -> Option<FavouriteItem> {
        self.lock_items().iter().find(|item| item.id == id).cloned()
    }

    /// Pure sorted view; the underlying list keeps insertion order.
    pub fn sorted(&self, mode: SortMode) -> Vec<FavouriteItem> {
        let mut items = self.all();
        match mode {
            SortMode::Alpha => {
                items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
            SortMode::Recent => items.sort_by(|a, b| b.id.cmp(&a.id)),
        }
        items
    }

    /// Adds a preset under the next id: `max(existing) + 1`, or 1 for an
    /// empty list. The caller validates the name; blank names are rejected
    /// at the input boundary before this store is reached.
    pub async fn add(&self, name: impl Into<String>, calories: u32, protein: f64) -> FavouriteItem {
        let item = {
            let mut items = self.lock_items();
            let id = items.iter().map(|item| item.id).max().map_or(1, |max| max + 1);
            let item = FavouriteItem::new(id, name, calories, protein);
            items.push(item.clone());
            item
        };
        self.persist().await;
        item
    }

    /// Removes a preset by id, reporting whether anything was removed.
    pub async fn remove(&self, id: u64) -> bool {
        let removed = {
            let mut items = self.lock_items();
            let before = items.len();
            items.retain(|item| item.id != id);
            items.len() != before
        };
        if removed {
            self.persist().await;
        }
        removed
    }

    async fn persist(&self) {
        let items = self.all();
        match serde_json::to_value(&items) {
            Ok(value) => {
                if let Err(e) = self.storage.save(FAVOURITES_KEY, value).await {
                    warn!(key = FAVOURITES_KEY, error = %e, "failed to persist favourites");
                }
            }
            Err(e) => warn!(key = FAVOURITES_KEY, error = %e, "failed to encode favourites"),
        }
    }

    fn lock_items(&self) -> MutexGuard<'_, Vec<FavouriteItem>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
