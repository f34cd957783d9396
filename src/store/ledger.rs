//! Day-keyed nutrition ledger.
//!
//! The in-memory mapping is a cache over the persisted copy, which is the
//! durable source of truth. Construction spawns the initial load; updates
//! issued while that load is in flight are applied optimistically and also
//! queued, then replayed in call order over the loaded base so nothing is
//! lost or clobbered when the load resolves.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::datekey::{date_key, today};
use crate::models::{DailyRecord, RecordPatch};
use crate::storage::{Storage, NUTRITION_DATA_KEY};

/// The full persisted mapping, date-key to daily record.
pub type Ledger = BTreeMap<String, DailyRecord>;

/// Change notification delivered to [`LedgerStore::subscribe`] receivers.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    /// A patch was applied to the given date-key.
    Updated { date_key: String },
    /// The initial load resolved and queued updates were merged.
    Loaded,
}

enum LoadPhase {
    /// Initial load in flight; updates queue here in call order.
    Loading { pending: Vec<(String, RecordPatch)> },
    Loaded,
}

struct LedgerState {
    data: Ledger,
    phase: LoadPhase,
}

/// Owner of the date-key → [`DailyRecord`] mapping.
///
/// Reads are pure lookups into the in-memory mapping and behave identically
/// in any load phase. Updates mutate the mapping synchronously; the durable
/// write is detached and its completion is not observable by the caller —
/// only the in-memory effect is. Construct one instance per process and
/// share it.
pub struct LedgerStore {
    storage: Arc<dyn Storage>,
    state: Mutex<LedgerState>,
    loaded_rx: watch::Receiver<bool>,
    events: broadcast::Sender<LedgerEvent>,
    writes: Mutex<Vec<JoinHandle<()>>>,
}

impl LedgerStore {
    /// Creates the store and spawns the initial load of the persisted
    /// ledger. Must be called from within a Tokio runtime.
    pub fn new(storage: Arc<dyn Storage>) -> Arc<Self> {
        let (loaded_tx, loaded_rx) = watch::channel(false);
        let (events, _) = broadcast::channel(64);

        let store = Arc::new(Self {
            storage,
            state: Mutex::new(LedgerState {
                data: Ledger::new(),
                phase: LoadPhase::Loading {
                    pending: Vec::new(),
                },
            }),
            loaded_rx,
            events,
            writes: Mutex::new(Vec::new()),
        });

        let task = Arc::clone(&store);
        tokio::spawn(async move {
            task.run_initial_load().await;
            let _ = loaded_tx.send(true);
        });

        store
    }

    /// Record for today's date-key, default when absent.
    pub fn today_record(&self) -> DailyRecord {
        self.record_for(today())
    }

    /// Lookup-with-default for an arbitrary date. A date never written
    /// yields the default record, before and after the load completes.
    pub fn record_for(&self, date: NaiveDate) -> DailyRecord {
        let key = date_key(date);
        self.lock_state().data.get(&key).cloned().unwrap_or_default()
    }

    /// Snapshot of every date-key with an explicit record.
    pub fn all(&self) -> Ledger {
        self.lock_state().data.clone()
    }

    /// Merges `patch` into today's record.
    pub fn update_today(&self, patch: RecordPatch) {
        self.update_for(today(), patch)
    }

    /// Merges `patch` field-by-field into the record for `date`, creating
    /// it from defaults if absent. The in-memory change is visible as soon
    /// as this returns; persistence is fire-and-forget.
    pub fn update_for(&self, date: NaiveDate, patch: RecordPatch) {
        let key = date_key(date);

        let snapshot = {
            let mut state = self.lock_state();
            patch.apply_to(state.data.entry(key.clone()).or_default());
            match &mut state.phase {
                LoadPhase::Loading { pending } => {
                    // Queued verbatim, not deduplicated: later patches for
                    // the same date may touch different fields and must each
                    // replay in order.
                    pending.push((key.clone(), patch));
                    None
                }
                LoadPhase::Loaded => Some(state.data.clone()),
            }
        };

        if let Some(snapshot) = snapshot {
            self.spawn_persist(snapshot);
        }
        let _ = self.events.send(LedgerEvent::Updated { date_key: key });
    }

    /// Resolves once the initial load has completed and queued updates have
    /// been merged and persisted. Callers that skip this simply see the
    /// optimistic in-memory view.
    pub async fn loaded(&self) {
        let mut rx = self.loaded_rx.clone();
        let _ = rx.wait_for(|loaded| *loaded).await;
    }

    /// Awaits every detached write issued so far. The CLI calls this before
    /// process exit; long-lived callers never need to.
    pub async fn flush(&self) {
        let handles: Vec<_> = std::mem::take(&mut *self.lock_writes());
        futures::future::join_all(handles).await;
    }

    /// Change notifications for this store instance. Replaces the old
    /// module-global event bus with an explicit subscription seam.
    pub fn subscribe(&self) -> broadcast::Receiver<LedgerEvent> {
        self.events.subscribe()
    }

    async fn run_initial_load(&self) {
        let base = match self.storage.load(NUTRITION_DATA_KEY).await {
            Ok(Some(value)) => match serde_json::from_value::<Ledger>(value) {
                Ok(ledger) => ledger,
                Err(e) => {
                    warn!(key = NUTRITION_DATA_KEY, error = %e, "stored ledger is malformed, starting empty");
                    Ledger::new()
                }
            },
            Ok(None) => Ledger::new(),
            Err(e) => {
                warn!(key = NUTRITION_DATA_KEY, error = %e, "failed to load ledger, starting empty");
                Ledger::new()
            }
        };

        let snapshot = {
            let mut state = self.lock_state();
            let pending = match std::mem::replace(&mut state.phase, LoadPhase::Loaded) {
                LoadPhase::Loading { pending } => pending,
                LoadPhase::Loaded => Vec::new(),
            };
            debug!(
                days = base.len(),
                queued = pending.len(),
                "initial ledger load resolved"
            );

            let mut merged = base;
            let replayed = !pending.is_empty();
            for (key, patch) in pending {
                patch.apply_to(merged.entry(key).or_default());
            }
            state.data = merged;
            replayed.then(|| state.data.clone())
        };

        // Everything queued during the load lands as one combined write.
        // With an empty queue the merged result already equals the
        // persisted copy, so there is nothing to write back.
        if let Some(snapshot) = snapshot {
            write_snapshot(self.storage.as_ref(), &snapshot).await;
        }
        let _ = self.events.send(LedgerEvent::Loaded);
    }

    fn spawn_persist(&self, snapshot: Ledger) {
        let storage = Arc::clone(&self.storage);
        let handle = tokio::spawn(async move {
            write_snapshot(storage.as_ref(), &snapshot).await;
        });
        self.lock_writes().push(handle);
    }

    fn lock_state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_writes(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Persists the full mapping; failures are logged, never surfaced. The
/// in-memory mapping stays correct regardless, and the next successful
/// write carries the current snapshot forward.
async fn write_snapshot(storage: &dyn Storage, snapshot: &Ledger) {
    match serde_json::to_value(snapshot) {
        Ok(value) => {
            if let Err(e) = storage.save(NUTRITION_DATA_KEY, value).await {
                warn!(key = NUTRITION_DATA_KEY, error = %e, "failed to persist ledger");
            }
        }
        Err(e) => warn!(key = NUTRITION_DATA_KEY, error = %e, "failed to encode ledger"),
    }
}
