//! Stores composing the persistence layer into application state.
//!
//! Each store instance owns its in-memory state exclusively; the
//! application constructs one instance per persisted key and shares it.

mod favourites;
mod history;
mod ledger;
mod notes;

pub use favourites::{FavouritesStore, SortMode};
pub use history::{History, HistoryLog};
pub use ledger::{Ledger, LedgerEvent, LedgerStore};
pub use notes::NotesStore;
