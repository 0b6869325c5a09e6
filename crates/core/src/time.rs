//! # Wall-clock time model
//!
//! Availability and bookings are expressed in naive local wall-clock time.
//! [`WallTime`] is an `HH:MM` value on the 24-hour clock, stored as minutes
//! since midnight so ordering and arithmetic are plain integer operations.

use std::{fmt, str::FromStr};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Minutes in one day; a `WallTime` is always strictly below this.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A time of day in `HH:MM` form. Defaults to midnight.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WallTime(u16);

/// Returned when a string is not a strict `HH:MM` time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidWallTime(pub String);

impl fmt::Display for InvalidWallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid HH:MM time: {:?}", self.0)
    }
}

impl std::error::Error for InvalidWallTime {}

impl WallTime {
    /// Builds a time from an hour (0-23) and a minute (0-59).
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(u16::from(hour) * 60 + u16::from(minute)))
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Strict parse: two digits, a colon, two digits; hour 00-23, minute 00-59.
    pub fn parse(s: &str) -> Result<Self, InvalidWallTime> {
        let bytes = s.as_bytes();
        let invalid = || InvalidWallTime(s.to_string());

        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(invalid());
        }
        let digit = |b: u8| b.is_ascii_digit().then(|| b - b'0');
        let (h1, h2, m1, m2) = match (
            digit(bytes[0]),
            digit(bytes[1]),
            digit(bytes[3]),
            digit(bytes[4]),
        ) {
            (Some(h1), Some(h2), Some(m1), Some(m2)) => (h1, h2, m1, m2),
            _ => return Err(invalid()),
        };

        Self::from_hm(h1 * 10 + h2, m1 * 10 + m2).ok_or_else(invalid)
    }
}

impl fmt::Display for WallTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for WallTime {
    type Err = InvalidWallTime;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for WallTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for WallTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        WallTime::parse(&raw).map_err(de::Error::custom)
    }
}

/// Day of week with Sunday as 0, matching the stored `day_of_week` column.
pub fn day_of_week(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// Parses a `YYYY-MM-DD` string that must also name a real calendar date.
///
/// The shape is checked byte by byte first because chrono's `%m`/`%d`
/// accept unpadded fields.
pub fn parse_calendar_date(s: &str) -> Option<NaiveDate> {
    if !has_date_shape(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// True when `s` has the `YYYY-MM-DD` shape, whether or not the date exists.
pub fn has_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
