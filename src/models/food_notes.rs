use serde::{Deserialize, Serialize};

/// The single persisted daily food note.
///
/// The default value is the cleared shape written when a stored note goes
/// stale (its date-key no longer matches today).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodNotes {
    pub text: String,
    /// Date-key the note was saved on; `None` once cleared.
    pub date_key: Option<String>,
    /// Short display form of the saved date, e.g. `2.10.2025`.
    pub display_date: Option<String>,
}

impl FoodNotes {
    pub fn is_cleared(&self) -> bool {
        self.text.is_empty() && self.date_key.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_cleared_shape() {
        let notes = FoodNotes::default();
        assert!(notes.is_cleared());
        let json = serde_json::to_value(&notes).unwrap();
        assert_eq!(json["text"], "");
        assert_eq!(json["dateKey"], serde_json::Value::Null);
        assert_eq!(json["displayDate"], serde_json::Value::Null);
    }

    #[test]
    fn test_notes_json_roundtrip() {
        let notes = FoodNotes {
            text: "chicken and rice for lunch".to_string(),
            date_key: Some("2025-10-02".to_string()),
            display_date: Some("2.10.2025".to_string()),
        };
        let json = serde_json::to_value(&notes).unwrap();
        assert_eq!(json["dateKey"], "2025-10-02");

        let parsed: FoodNotes = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, notes);
        assert!(!parsed.is_cleared());
    }
}
