use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const KEY_FORMAT: &str = "%Y%m%d";
const ISO_FORMAT: &str = "%Y-%m-%d";

/// Canonical identifier for one calendar day, rendered as `YYYYMMDD`.
///
/// Time-of-day never participates: two instants on the same calendar day
/// always produce the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date key '{input}': expected YYYYMMDD or YYYY-MM-DD")]
pub struct DateKeyError {
    pub input: String,
}

impl DateKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Truncates an instant to its calendar day in the instant's own timezone.
    pub fn from_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.date_naive())
    }

    pub fn today() -> Self {
        Self::from_datetime(&Local::now())
    }

    /// Accepts both the compact key form and the ISO form a date picker emits.
    pub fn parse(input: &str) -> Result<Self, DateKeyError> {
        let trimmed = input.trim();
        let format = if trimmed.contains('-') { ISO_FORMAT } else { KEY_FORMAT };

        NaiveDate::parse_from_str(trimmed, format)
            .map(Self)
            .map_err(|_| DateKeyError {
                input: input.to_string(),
            })
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `YYYY-MM-DD`, the form shown next to the puzzle heading.
    pub fn iso_label(&self) -> String {
        self.0.format(ISO_FORMAT).to_string()
    }

    pub fn is_today(&self) -> bool {
        *self == Self::today()
    }

    /// Days after `latest` collapse onto `latest`.
    pub fn clamp_to(self, latest: DateKey) -> Self {
        self.min(latest)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
