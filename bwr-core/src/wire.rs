//! Lenient serde helpers for API payloads.
//!
//! The data service serializes `Decimal` columns as strings and some
//! collections as `null`, so numbers and lists are decoded permissively.

use bwr_utils::numbers::parse_lenient;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// A required number that may arrive as a JSON number or numeric string.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => {
            parse_lenient(&s).ok_or_else(|| D::Error::custom(format!("not a number: {:?}", s)))
        }
    }
}

/// An optional number; `null`, blanks and unparsable strings become `None`.
pub fn optional_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(s)) => parse_lenient(&s),
        None => None,
    })
}

/// Treat an explicit `null` like a missing field.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse an RFC 3339 timestamp, a naive "YYYY-MM-DDTHH:MM:SS" (assumed UTC)
/// or a bare date.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

pub fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_timestamp(&s).ok_or_else(|| D::Error::custom(format!("invalid timestamp: {:?}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(deserialize_with = "number")]
        required: f64,
        #[serde(default, deserialize_with = "optional_number")]
        optional: Option<f64>,
        #[serde(default, deserialize_with = "null_as_default")]
        list: Vec<u32>,
    }

    #[test]
    fn test_numbers_accept_strings_and_nulls() {
        let sample: Sample =
            serde_json::from_str(r#"{"required": "42.5", "optional": null, "list": null}"#)
                .unwrap();
        assert_eq!(sample.required, 42.5);
        assert_eq!(sample.optional, None);
        assert!(sample.list.is_empty());

        let sample: Sample = serde_json::from_str(r#"{"required": 7, "optional": "1.25"}"#).unwrap();
        assert_eq!(sample.required, 7.0);
        assert_eq!(sample.optional, Some(1.25));
    }

    #[test]
    fn test_required_number_rejects_garbage() {
        assert!(serde_json::from_str::<Sample>(r#"{"required": "abc"}"#).is_err());
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = Utc.with_ymd_and_hms(2024, 7, 15, 8, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2024-07-15T08:00:00Z"), Some(expected));
        assert_eq!(parse_timestamp("2024-07-15T11:00:00+03:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-07-15T08:00:00"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-07-15"),
            Some(Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap())
        );
        assert_eq!(parse_timestamp("15.07.2024"), None);
    }
}
