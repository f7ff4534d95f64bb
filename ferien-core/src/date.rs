//! Canonical `YYYY-MM-DD` dates.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{FerienError, FerienResult};

const ISO_FORMAT: &str = "%Y-%m-%d";

/// A calendar day in canonical ISO form.
///
/// Equality, hashing and ordering all work on the string, so range checks are
/// plain lexicographic comparisons. That matches calendar order because the
/// year is always four digits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IsoDate {
    text: String,
    date: NaiveDate,
}

impl IsoDate {
    /// Parse a date that must already be in canonical form.
    pub fn parse(s: &str) -> FerienResult<Self> {
        let date = NaiveDate::parse_from_str(s, ISO_FORMAT).map_err(|_| {
            FerienError::InvalidDate(format!("'{s}' is not a YYYY-MM-DD date"))
        })?;
        let iso = Self::from_naive(date)?;

        // chrono accepts "2025-6-5"; only the padded form is canonical
        if iso.text != s {
            return Err(FerienError::InvalidDate(format!(
                "'{s}' is not in canonical form (expected '{}')",
                iso.text
            )));
        }

        Ok(iso)
    }

    pub fn from_naive(date: NaiveDate) -> FerienResult<Self> {
        if !(0..=9999).contains(&date.year()) {
            return Err(FerienError::InvalidDate(format!(
                "year {} has no four-digit form",
                date.year()
            )));
        }

        Ok(IsoDate {
            text: date.format(ISO_FORMAT).to_string(),
            date,
        })
    }

    /// Build a date from a zero-based month and a one-based day.
    ///
    /// Days that do not exist in the month are rejected instead of rolling
    /// over into the next month.
    pub fn from_ymd(year: i32, month0: u32, day: u32) -> FerienResult<Self> {
        if month0 > 11 {
            return Err(FerienError::InvalidDate(format!(
                "month index {month0} is outside 0..=11"
            )));
        }

        let date = NaiveDate::from_ymd_opt(year, month0 + 1, day).ok_or_else(|| {
            FerienError::InvalidDate(format!("{year}-{:02}-{day:02} does not exist", month0 + 1))
        })?;

        Self::from_naive(date)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn naive(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Zero-based month index.
    pub fn month0(&self) -> u32 {
        self.date.month0()
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Weekday ordinal, 0 = Sunday .. 6 = Saturday.
    pub fn weekday(&self) -> u8 {
        self.date.weekday().num_days_from_sunday() as u8
    }

    /// The following calendar day, if it is still representable.
    pub fn succ(&self) -> Option<Self> {
        self.date
            .succ_opt()
            .and_then(|next| Self::from_naive(next).ok())
    }
}

/// Number of days in a zero-based month, leap years included.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month0 + 1, 1);
    let next = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)
    };

    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}

impl PartialEq for IsoDate {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for IsoDate {}

impl Hash for IsoDate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl PartialOrd for IsoDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IsoDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.text.cmp(&other.text)
    }
}

impl Borrow<str> for IsoDate {
    fn borrow(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for IsoDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for IsoDate {
    type Err = FerienError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IsoDate {
    type Error = FerienError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<IsoDate> for String {
    fn from(date: IsoDate) -> Self {
        date.text
    }
}
