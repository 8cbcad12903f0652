//! Lenient calendar-date parsing.
//!
//! Form-style clients send an empty string for "no date". These helpers treat
//! `null`, a missing value, and a blank string alike as an absent date.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, de};

/// Date format accepted on input (ISO-8601 calendar date).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an optional date, treating a blank string as absent.
///
/// # Errors
///
/// Returns an error if the non-blank input is not a `YYYY-MM-DD` date.
pub fn parse_optional_date(raw: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map(Some)
}

/// Serde helper for `Option<NaiveDate>` fields that may arrive as `""`.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_optional_date")]`.
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        None => Ok(None),
        Some(raw) => parse_optional_date(&raw).map_err(de::Error::custom),
    }
}

/// Serde helper for patch fields: absent keeps the value, `null`/`""` clears it.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_date_patch")]`
/// on an `Option<Option<NaiveDate>>` field.
pub fn deserialize_date_patch<'de, D>(
    deserializer: D,
) -> Result<Option<Option<NaiveDate>>, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_optional_date(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Form {
        #[serde(default, deserialize_with = "deserialize_optional_date")]
        due_date: Option<NaiveDate>,
    }

    #[derive(Debug, Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "deserialize_date_patch")]
        due_date: Option<Option<NaiveDate>>,
    }

    #[rstest]
    #[case("", None)]
    #[case("   ", None)]
    #[case("2026-03-01", NaiveDate::from_ymd_opt(2026, 3, 1))]
    #[case(" 2026-12-31 ", NaiveDate::from_ymd_opt(2026, 12, 31))]
    fn test_parse_optional_date(#[case] raw: &str, #[case] expected: Option<NaiveDate>) {
        assert_eq!(parse_optional_date(raw).unwrap(), expected);
    }

    #[test]
    fn test_parse_optional_date_rejects_garbage() {
        assert!(parse_optional_date("next tuesday").is_err());
        assert!(parse_optional_date("2026-02-30").is_err());
    }

    #[test]
    fn test_deserialize_blank_and_null_as_none() {
        let form: Form = serde_json::from_str(r#"{"due_date": ""}"#).unwrap();
        assert_eq!(form.due_date, None);

        let form: Form = serde_json::from_str(r#"{"due_date": null}"#).unwrap();
        assert_eq!(form.due_date, None);

        let form: Form = serde_json::from_str("{}").unwrap();
        assert_eq!(form.due_date, None);
    }

    #[test]
    fn test_deserialize_date() {
        let form: Form = serde_json::from_str(r#"{"due_date": "2026-01-15"}"#).unwrap();
        assert_eq!(form.due_date, NaiveDate::from_ymd_opt(2026, 1, 15));
    }

    #[test]
    fn test_deserialize_invalid_date_fails() {
        assert!(serde_json::from_str::<Form>(r#"{"due_date": "15/01/2026"}"#).is_err());
    }

    #[test]
    fn test_date_patch_semantics() {
        let patch: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(patch.due_date, None);

        let patch: Patch = serde_json::from_str(r#"{"due_date": ""}"#).unwrap();
        assert_eq!(patch.due_date, Some(None));

        let patch: Patch = serde_json::from_str(r#"{"due_date": null}"#).unwrap();
        assert_eq!(patch.due_date, Some(None));

        let patch: Patch = serde_json::from_str(r#"{"due_date": "2026-06-30"}"#).unwrap();
        assert_eq!(patch.due_date, Some(NaiveDate::from_ymd_opt(2026, 6, 30)));
    }
}
