//! Serde helpers for legacy JSON documents
//!
//! The data files were written by hand-edited tools over the years, so some
//! fields show up as `null` or as empty strings. These helpers keep a single
//! bad field from making a whole collection unreadable.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serializer};

/// Deserialize bool that treats null as false
pub fn bool_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(false))
}

/// Deserialize a string that treats null as empty
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}

/// Optional value parsed with `FromStr`, where null or a blank string means `None`
///
/// Form posts send `""` for "not selected"; an unknown non-blank value is
/// still an error.
pub fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// `HH:MM:SS` time that tolerates null, empty, or malformed values (→ `None`)
pub mod lenient_time {
    use super::*;

    const FORMAT: &str = "%H:%M:%S";

    pub fn serialize<S>(time: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => s.serialize_str(&t.format(FORMAT).to_string()),
            None => s.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|s| NaiveTime::parse_from_str(s.trim(), FORMAT).ok()))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    struct Stamp {
        #[serde(default, with = "lenient_time")]
        at: Option<NaiveTime>,
        #[serde(default, deserialize_with = "bool_false")]
        flag: bool,
    }

    #[test]
    fn test_lenient_time_parses_valid_value() {
        let stamp: Stamp = serde_json::from_str(r#"{"at":"08:15:30","flag":true}"#).unwrap();
        assert_eq!(stamp.at, NaiveTime::from_hms_opt(8, 15, 30));
        assert!(stamp.flag);
    }

    #[test]
    fn test_lenient_time_accepts_garbage() {
        let stamp: Stamp = serde_json::from_str(r#"{"at":"","flag":null}"#).unwrap();
        assert!(stamp.at.is_none());
        assert!(!stamp.flag);

        let stamp: Stamp = serde_json::from_str(r#"{"at":"noon"}"#).unwrap();
        assert!(stamp.at.is_none());
    }

    #[test]
    fn test_lenient_time_serializes_hms() {
        let stamp = Stamp {
            at: NaiveTime::from_hms_opt(16, 0, 0),
            flag: false,
        };
        let json = serde_json::to_string(&stamp).unwrap();
        assert!(json.contains("\"16:00:00\""));
    }
}
