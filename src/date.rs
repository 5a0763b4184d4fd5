//! Six-character MRZ dates.

use crate::error::{MrzError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::debug;

/// A `YYMMDD` date as printed in an MRZ.
///
/// Components that could not be read are stored as `-1`. The original text,
/// when the date was decoded, is kept so that [`MrzDate::to_mrz`] reproduces
/// partially unknown dates such as `80<<<<` exactly. Equality, ordering and
/// hashing consider only year, month and day.
#[derive(Debug, Clone)]
pub struct MrzDate {
    year: i32,
    month: i32,
    day: i32,
    raw: Option<String>,
    valid: bool,
}

impl MrzDate {
    /// Create a date from its components.
    #[must_use]
    pub fn new(year: i32, month: i32, day: i32) -> Self {
        MrzDate {
            year,
            month,
            day,
            raw: None,
            valid: check(year, month, day),
        }
    }

    /// Create a date that remembers the MRZ text it was read from.
    #[must_use]
    pub fn with_raw(year: i32, month: i32, day: i32, raw: impl Into<String>) -> Self {
        MrzDate {
            raw: Some(raw.into()),
            ..MrzDate::new(year, month, day)
        }
    }

    /// Read a date from its six MRZ characters.
    ///
    /// A two-character component that is not numeric becomes `-1`, which
    /// makes the date invalid without failing.
    ///
    /// # Errors
    ///
    /// Returns [`MrzError::InvalidArgument`] if `text` is not six characters long.
    ///
    /// # Examples
    ///
    /// ```
    /// use mrzc::MrzDate;
    ///
    /// let date = MrzDate::from_mrz("740812").unwrap();
    /// assert_eq!((date.year(), date.month(), date.day()), (74, 8, 12));
    /// assert!(!MrzDate::from_mrz("74<<12").unwrap().is_valid());
    /// ```
    pub fn from_mrz(text: &str) -> Result<Self> {
        if text.chars().count() != 6 || !text.is_ascii() {
            return Err(MrzError::InvalidArgument(format!(
                "MRZ date must be six characters: '{text}'"
            )));
        }
        let year = component(text, 0, "year");
        let month = component(text, 2, "month");
        let day = component(text, 4, "day");
        Ok(MrzDate::with_raw(year, month, day, text))
    }

    /// Two-digit year, or `-1` if unreadable.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month 1-12, or `-1` if unreadable.
    #[must_use]
    pub fn month(&self) -> i32 {
        self.month
    }

    /// Day 1-31, or `-1` if unreadable.
    #[must_use]
    pub fn day(&self) -> i32 {
        self.day
    }

    /// The MRZ text this date was decoded from, if any.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Whether every component is within range.
    ///
    /// Only ranges are checked; 31 February counts as valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// The six MRZ characters for this date.
    #[must_use]
    pub fn to_mrz(&self) -> String {
        match &self.raw {
            Some(raw) => raw.clone(),
            None => format!("{:02}{:02}{:02}", self.year, self.month, self.day),
        }
    }

    /// Expand the two-digit year to four digits.
    ///
    /// The century is chosen so that the result is at most five years after
    /// `reference_year`; birth dates and expiry dates both fit that window.
    /// Returns `None` when the year is unreadable.
    ///
    /// ```
    /// use mrzc::MrzDate;
    ///
    /// assert_eq!(MrzDate::new(74, 8, 12).full_year(2026), Some(1974));
    /// assert_eq!(MrzDate::new(30, 1, 1).full_year(2026), Some(2030));
    /// assert_eq!(MrzDate::new(32, 1, 1).full_year(2026), Some(1932));
    /// ```
    #[must_use]
    pub fn full_year(&self, reference_year: i32) -> Option<i32> {
        if !(0..=99).contains(&self.year) {
            return None;
        }
        let candidate = reference_year - reference_year.rem_euclid(100) + self.year;
        if candidate > reference_year + 5 {
            Some(candidate - 100)
        } else {
            Some(candidate)
        }
    }

    fn key(&self) -> i64 {
        i64::from(self.year) * 10_000 + i64::from(self.month) * 100 + i64::from(self.day)
    }
}

fn component(text: &str, start: usize, label: &str) -> i32 {
    let part = &text[start..start + 2];
    if part.bytes().all(|b| b.is_ascii_digit()) {
        part.parse().unwrap_or(-1)
    } else {
        debug!(date = text, component = label, "Failed to parse MRZ date component");
        -1
    }
}

fn check(year: i32, month: i32, day: i32) -> bool {
    if !(0..=99).contains(&year) {
        debug!(year, "Invalid year value");
        return false;
    }
    if !(1..=12).contains(&month) {
        debug!(month, "Invalid month value");
        return false;
    }
    if !(1..=31).contains(&day) {
        debug!(day, "Invalid day value");
        return false;
    }
    true
}

impl PartialEq for MrzDate {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for MrzDate {}

impl Hash for MrzDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl PartialOrd for MrzDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MrzDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

impl fmt::Display for MrzDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.day, self.month, self.year)
    }
}

impl Serialize for MrzDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_mrz())
    }
}

impl<'de> Deserialize<'de> for MrzDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        MrzDate::from_mrz(&text).map_err(serde::de::Error::custom)
    }
}
