use chrono::{DateTime, Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What kind of manual addition a history entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Calories,
    Protein,
    Favourite,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Calories => write!(f, "calories"),
            EntryKind::Protein => write!(f, "protein"),
            EntryKind::Favourite => write!(f, "favourite"),
        }
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "calories" => Ok(EntryKind::Calories),
            "protein" => Ok(EntryKind::Protein),
            "favourite" => Ok(EntryKind::Favourite),
            _ => Err(format!(
                "Invalid entry kind '{}'. Valid options: calories, protein, favourite",
                s
            )),
        }
    }
}

/// Variant payload of a history entry.
///
/// Serialized untagged so the stored shape stays `{calories}`, `{protein}`
/// or `{calories, protein, foodName}` as older app versions wrote it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryData {
    Favourite {
        calories: u32,
        protein: f64,
        #[serde(rename = "foodName")]
        food_name: String,
    },
    Calories {
        calories: u32,
    },
    Protein {
        protein: f64,
    },
}

impl EntryData {
    pub fn calories(&self) -> Option<u32> {
        match self {
            EntryData::Calories { calories } | EntryData::Favourite { calories, .. } => {
                Some(*calories)
            }
            EntryData::Protein { .. } => None,
        }
    }

    pub fn protein(&self) -> Option<f64> {
        match self {
            EntryData::Protein { protein } | EntryData::Favourite { protein, .. } => Some(*protein),
            EntryData::Calories { .. } => None,
        }
    }

    pub fn food_name(&self) -> Option<&str> {
        match self {
            EntryData::Favourite { food_name, .. } => Some(food_name),
            _ => None,
        }
    }
}

/// One immutable record of a manual addition.
///
/// The creation timestamp doubles as the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// ISO-8601 creation time.
    pub timestamp: String,
    pub data: EntryData,
}

impl HistoryEntry {
    pub fn new(kind: EntryKind, data: EntryData, at: DateTime<Local>) -> Self {
        let timestamp = at.to_rfc3339_opts(SecondsFormat::Micros, true);
        Self {
            id: timestamp.clone(),
            kind,
            timestamp,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 10, 2, 14, 5, 6).unwrap()
    }

    #[test]
    fn test_entry_kind_display_and_parse() {
        assert_eq!(format!("{}", EntryKind::Calories), "calories");
        assert_eq!(EntryKind::from_str("FAVOURITE").unwrap(), EntryKind::Favourite);
        assert!(EntryKind::from_str("snack").is_err());
    }

    #[test]
    fn test_entry_id_equals_timestamp() {
        let entry = HistoryEntry::new(
            EntryKind::Calories,
            EntryData::Calories { calories: 250 },
            fixed_time(),
        );
        assert_eq!(entry.id, entry.timestamp);
        assert!(entry.timestamp.starts_with("2025-10-02T14:05:06"));
    }

    #[test]
    fn test_calories_payload_shape() {
        let data = EntryData::Calories { calories: 250 };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json, serde_json::json!({"calories": 250}));

        let parsed: EntryData = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, data);
    }

    #[test]
    fn test_favourite_payload_uses_food_name_key() {
        let data = EntryData::Favourite {
            calories: 200,
            protein: 30.0,
            food_name: "Chicken Breast".to_string(),
        };
        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["foodName"], "Chicken Breast");

        let parsed: EntryData = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.food_name(), Some("Chicken Breast"));
        assert_eq!(parsed.calories(), Some(200));
        assert_eq!(parsed.protein(), Some(30.0));
    }

    #[test]
    fn test_protein_payload_distinguished_from_calories() {
        let parsed: EntryData = serde_json::from_str(r#"{"protein": 12.5}"#).unwrap();
        assert_eq!(parsed, EntryData::Protein { protein: 12.5 });
        assert_eq!(parsed.calories(), None);
    }

    #[test]
    fn test_entry_json_roundtrip() {
        let entry = HistoryEntry::new(
            EntryKind::Protein,
            EntryData::Protein { protein: 12.5 },
            fixed_time(),
        );
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains(r#""type":"protein""#));

        let parsed: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entry);
    }
}
