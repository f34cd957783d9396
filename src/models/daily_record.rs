use serde::{Deserialize, Serialize};

/// One calendar day's cumulative nutrition totals and supplement flags.
///
/// A missing date-key means the implicit default record; records are never
/// deleted, resetting a day writes the default values back under its key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyRecord {
    /// Cumulative calories added that day, kcal.
    pub calories: u32,
    /// Cumulative protein, grams, tracked to two decimal places.
    pub protein: f64,
    /// Whether creatine was marked taken.
    pub creatine: bool,
    /// Whether fish oil was marked taken.
    pub fish_oil: bool,
}

/// Field-by-field partial update merged over an existing [`DailyRecord`].
///
/// Fields left as `None` keep the record's current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordPatch {
    pub calories: Option<u32>,
    pub protein: Option<f64>,
    pub creatine: Option<bool>,
    pub fish_oil: Option<bool>,
}

impl RecordPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calories(mut self, calories: u32) -> Self {
        self.calories = Some(calories);
        self
    }

    pub fn with_protein(mut self, protein: f64) -> Self {
        self.protein = Some(protein);
        self
    }

    pub fn with_creatine(mut self, creatine: bool) -> Self {
        self.creatine = Some(creatine);
        self
    }

    pub fn with_fish_oil(mut self, fish_oil: bool) -> Self {
        self.fish_oil = Some(fish_oil);
        self
    }

    /// Patch that returns every field to its default, the day-reset shape.
    pub fn reset() -> Self {
        Self {
            calories: Some(0),
            protein: Some(0.0),
            creatine: Some(false),
            fish_oil: Some(false),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.protein.is_none()
            && self.creatine.is_none()
            && self.fish_oil.is_none()
    }

    /// Merges this patch into `record`, overriding only the fields set.
    pub fn apply_to(&self, record: &mut DailyRecord) {
        if let Some(calories) = self.calories {
            record.calories = calories;
        }
        if let Some(protein) = self.protein {
            record.protein = protein;
        }
        if let Some(creatine) = self.creatine {
            record.creatine = creatine;
        }
        if let Some(fish_oil) = self.fish_oil {
            record.fish_oil = fish_oil;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_all_zero() {
        let record = DailyRecord::default();
        assert_eq!(record.calories, 0);
        assert_eq!(record.protein, 0.0);
        assert!(!record.creatine);
        assert!(!record.fish_oil);
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let mut record = DailyRecord {
            calories: 500,
            protein: 20.0,
            creatine: true,
            fish_oil: false,
        };
        RecordPatch::new().with_protein(32.5).apply_to(&mut record);

        assert_eq!(record.calories, 500);
        assert_eq!(record.protein, 32.5);
        assert!(record.creatine);
        assert!(!record.fish_oil);
    }

    #[test]
    fn test_reset_patch_restores_defaults() {
        let mut record = DailyRecord {
            calories: 1800,
            protein: 95.25,
            creatine: true,
            fish_oil: true,
        };
        RecordPatch::reset().apply_to(&mut record);
        assert_eq!(record, DailyRecord::default());
    }

    #[test]
    fn test_empty_patch_is_noop() {
        let mut record = DailyRecord {
            calories: 100,
            protein: 5.0,
            creatine: false,
            fish_oil: true,
        };
        let before = record.clone();
        let patch = RecordPatch::new();
        assert!(patch.is_empty());
        patch.apply_to(&mut record);
        assert_eq!(record, before);
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = DailyRecord {
            calories: 250,
            protein: 12.5,
            creatine: false,
            fish_oil: true,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["calories"], 250);
        assert_eq!(json["protein"], 12.5);
        assert_eq!(json["fishOil"], true);
        assert!(json.get("fish_oil").is_none());

        let parsed: DailyRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_record_deserializes_missing_fields_as_defaults() {
        let parsed: DailyRecord = serde_json::from_str(r#"{"calories": 75}"#).unwrap();
        assert_eq!(parsed.calories, 75);
        assert_eq!(parsed.protein, 0.0);
        assert!(!parsed.fish_oil);
    }
}
