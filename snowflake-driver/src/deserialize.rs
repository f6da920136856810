use std::str::FromStr;

use crate::{DeserializeError, Row};

/// For custom data parsing,
/// ex. you want to convert the retrieved data (strings) to enums
///
/// Data in cells are not their type, they are simply strings that need to be converted.
pub trait DeserializeFromStr: Sized {
    type Error: Into<anyhow::Error>;
    fn deserialize_from_str(value: &str) -> Result<Self, Self::Error>;
    /// Value used for a NULL cell or a missing column, `None` when that is an error.
    fn deserialize_null() -> Option<Self> {
        None
    }
}

/// Reads `column` from `row` into `T`.
pub fn deserialize_cell<T: DeserializeFromStr>(
    row: &Row<'_>,
    column: &'static str,
) -> Result<T, DeserializeError> {
    match row.get(column) {
        Some(value) => T::deserialize_from_str(value).map_err(|error| DeserializeError::Column {
            column,
            value: Some(value.to_string()),
            error: error.into(),
        }),
        None => T::deserialize_null().ok_or(DeserializeError::Null { column }),
    }
}

/// Reads `column` from `row` as JSON, a NULL cell is read as JSON `null`.
pub fn deserialize_json_cell<T: serde::de::DeserializeOwned>(
    row: &Row<'_>,
    column: &'static str,
) -> Result<T, DeserializeError> {
    serde_json::from_str(row.get(column).unwrap_or("null"))
        .map_err(|error| DeserializeError::Json { column, error })
}

impl<T: DeserializeFromStr> DeserializeFromStr for Option<T> {
    type Error = T::Error;
    fn deserialize_from_str(value: &str) -> Result<Self, Self::Error> {
        T::deserialize_from_str(value).map(Some)
    }
    fn deserialize_null() -> Option<Self> {
        Some(None)
    }
}

/// SHOW output spells booleans in several ways depending on the command.
impl DeserializeFromStr for bool {
    type Error = anyhow::Error;
    fn deserialize_from_str(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "true" | "t" | "y" | "yes" | "on" | "1" => Ok(true),
            "false" | "f" | "n" | "no" | "off" | "0" | "" => Ok(false),
            other => Err(anyhow::anyhow!("`{other}` is not a boolean")),
        }
    }
}

impl DeserializeFromStr for chrono::NaiveDate {
    type Error = chrono::ParseError;

    fn deserialize_from_str(s: &str) -> Result<Self, Self::Error> {
        chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
    }
}

/// Accepts the SQL API's epoch form (`seconds.fraction`, optionally followed by a
/// timezone offset in minutes) as well as RFC 3339 and `YYYY-MM-DD HH:MM:SS.fff ±zzzz`.
impl DeserializeFromStr for chrono::DateTime<chrono::Utc> {
    type Error = anyhow::Error;

    fn deserialize_from_str(value: &str) -> Result<Self, Self::Error> {
        let value = value.trim();
        let epoch = value.split_whitespace().next().unwrap_or_default();
        if let Ok(seconds) = epoch.parse::<f64>() {
            let whole = seconds.trunc() as i64;
            let nanos = ((seconds - seconds.trunc()) * 1_000_000_000f64).round() as u32;
            return chrono::DateTime::from_timestamp(whole, nanos.min(999_999_999))
                .ok_or_else(|| anyhow::anyhow!("timestamp `{value}` is out of range"));
        }
        chrono::DateTime::parse_from_rfc3339(value)
            .or_else(|_| chrono::DateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f %z"))
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(Into::into)
    }
}

macro_rules! impl_deserialize_from_str {
    ($ty: ty) => {
        impl DeserializeFromStr for $ty {
            type Error = <$ty as FromStr>::Err;
            fn deserialize_from_str(value: &str) -> Result<Self, Self::Error> {
                <$ty>::from_str(value.trim())
            }
        }
    };
}

impl_deserialize_from_str!(usize);
impl_deserialize_from_str!(u8);
impl_deserialize_from_str!(u16);
impl_deserialize_from_str!(u32);
impl_deserialize_from_str!(u64);
impl_deserialize_from_str!(i16);
impl_deserialize_from_str!(i32);
impl_deserialize_from_str!(i64);
impl_deserialize_from_str!(f32);
impl_deserialize_from_str!(f64);

impl DeserializeFromStr for String {
    type Error = std::convert::Infallible;
    fn deserialize_from_str(value: &str) -> Result<Self, Self::Error> {
        Ok(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Datelike, Timelike};

    #[test]
    fn booleans_from_show_output() {
        assert!(bool::deserialize_from_str("true").unwrap());
        assert!(bool::deserialize_from_str("Y").unwrap());
        assert!(!bool::deserialize_from_str("N").unwrap());
        assert!(!bool::deserialize_from_str("false").unwrap());
        assert!(bool::deserialize_from_str("maybe").is_err());
    }

    #[test]
    fn timestamps_from_epoch_and_text() {
        let epoch =
            chrono::DateTime::<chrono::Utc>::deserialize_from_str("1700000000.500000000 1440")
                .unwrap();
        assert_eq!(epoch.timestamp(), 1_700_000_000);
        assert_eq!(epoch.timestamp_subsec_millis(), 500);

        let text = chrono::DateTime::<chrono::Utc>::deserialize_from_str(
            "2023-11-14 14:13:20.000 -0800",
        )
        .unwrap();
        assert_eq!(text.hour(), 22);
        assert_eq!(text.day(), 14);

        assert!(chrono::DateTime::<chrono::Utc>::deserialize_from_str("yesterday").is_err());
    }

    #[test]
    fn numbers_tolerate_padding() {
        assert_eq!(i32::deserialize_from_str(" 42 ").unwrap(), 42);
        assert_eq!(f64::deserialize_from_str("100.00").unwrap(), 100.0);
        assert!(i32::deserialize_from_str("4.2").is_err());
    }
}
