//! `MM/DD/YYYY` handling shared by the input files and the persisted artifacts.
//!
//! Two renderings exist in the notification schedule: reminder dates are
//! zero-padded (`01/15/2020`) while the qualifying birthday is not (`1/1/2020`).

use crate::utils::error::{ReminderError, Result};
use chrono::{Datelike, NaiveDate};

pub const US_DATE_FORMAT: &str = "%m/%d/%Y";

/// Parses `MM/DD/YYYY`; one-digit month and day are accepted.
pub fn parse_us_date(value: &str) -> Result<NaiveDate> {
    let invalid = |reason: &str| ReminderError::InvalidDateError {
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = value.trim().split('/').collect();
    let [month, day, year] = parts.as_slice() else {
        return Err(invalid("expected MM/DD/YYYY"));
    };

    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| invalid("month is not a number"))?;
    let day: u32 = day.trim().parse().map_err(|_| invalid("day is not a number"))?;
    let year: i32 = year
        .trim()
        .parse()
        .map_err(|_| invalid("year is not a number"))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| invalid("no such calendar day"))
}

pub fn format_padded(date: NaiveDate) -> String {
    date.format(US_DATE_FORMAT).to_string()
}

pub fn format_unpadded(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

pub mod padded {
    use super::{format_padded, parse_us_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_padded(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_us_date(&raw).map_err(serde::de::Error::custom)
    }
}

pub mod unpadded {
    use super::{format_unpadded, parse_us_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_unpadded(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_us_date(&raw).map_err(serde::de::Error::custom)
    }
}

pub mod padded_option {
    use super::{format_padded, parse_us_date};
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serializer.serialize_some(&format_padded(*date)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|raw| parse_us_date(&raw).map_err(serde::de::Error::custom))
            .transpose()
    }
}
