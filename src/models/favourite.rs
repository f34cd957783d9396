use serde::{Deserialize, Serialize};
use std::fmt;

use crate::numfmt::format_decimal_comma;

/// A reusable food preset.
///
/// Ids are unique and assigned monotonically; names may repeat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavouriteItem {
    pub id: u64,
    pub name: String,
    pub calories: u32,
    pub protein: f64,
}

impl FavouriteItem {
    pub fn new(id: u64, name: impl Into<String>, calories: u32, protein: f64) -> Self {
        Self {
            id,
            name: name.into(),
            calories,
            protein,
        }
    }
}

impl fmt::Display for FavouriteItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} kcal, {} g protein)",
            self.name,
            self.calories,
            format_decimal_comma(self.protein)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favourite_new() {
        let item = FavouriteItem::new(3, "Chicken Breast", 200, 30.0);
        assert_eq!(item.id, 3);
        assert_eq!(item.name, "Chicken Breast");
        assert_eq!(item.calories, 200);
        assert_eq!(item.protein, 30.0);
    }

    #[test]
    fn test_favourite_display() {
        let item = FavouriteItem::new(2, "Greek Yogurt", 150, 15.5);
        assert_eq!(format!("{}", item), "Greek Yogurt (150 kcal, 15,5 g protein)");
    }

    #[test]
    fn test_favourite_json_roundtrip() {
        let item = FavouriteItem::new(1, "Banana", 100, 2.0);
        let json = serde_json::to_string(&item).unwrap();
        let parsed: FavouriteItem = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, item);
    }
}
