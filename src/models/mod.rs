mod daily_record;
mod favourite;
mod food_notes;
mod history_entry;

pub use daily_record::{DailyRecord, RecordPatch};
pub use favourite::FavouriteItem;
pub use food_notes::FoodNotes;
pub use history_entry::{EntryData, EntryKind, HistoryEntry};
