//! Date-key helpers.
//!
//! Every store buckets data by the canonical `YYYY-MM-DD` key for the local
//! calendar day. All formatting goes through this module; mixing formats
//! breaks bucket lookups.

use chrono::{Datelike, Local, NaiveDate};

/// Canonical date-key format, e.g. `2025-10-02`.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Formats a date as its canonical date-key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Today's date-key.
pub fn today_key() -> String {
    date_key(today())
}

/// Parses a canonical date-key back into a date.
pub fn parse_date_key(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_KEY_FORMAT).ok()
}

/// Short display form used by the notes view, e.g. `2.10.2025`.
pub fn display_date(date: NaiveDate) -> String {
    format!("{}.{}.{}", date.day(), date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_key_zero_pads() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(date_key(date), "2025-03-07");
    }

    #[test]
    fn test_date_key_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(parse_date_key(&date_key(date)), Some(date));
    }

    #[test]
    fn test_parse_date_key_rejects_other_formats() {
        assert!(parse_date_key("07-03-2025").is_none());
        assert!(parse_date_key("2025/03/07").is_none());
        assert!(parse_date_key("").is_none());
    }

    #[test]
    fn test_display_date_has_no_padding() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
        assert_eq!(display_date(date), "2.10.2025");
    }

    #[test]
    fn test_today_key_matches_today() {
        assert_eq!(today_key(), date_key(today()));
    }
}
