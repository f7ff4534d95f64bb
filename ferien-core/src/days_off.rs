//! Recurring weekly days off.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FerienError, FerienResult};

const WEEKDAY_LABELS: [&str; 7] = ["So", "Mo", "Di", "Mi", "Do", "Fr", "Sa"];

/// A set of weekday ordinals (0 = Sunday .. 6 = Saturday).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct WeekdaySet(u8);

impl WeekdaySet {
    pub const EMPTY: WeekdaySet = WeekdaySet(0);

    pub fn from_days(days: &[u8]) -> FerienResult<Self> {
        let mut bits = 0u8;
        for &day in days {
            if day > 6 {
                return Err(FerienError::Config(format!(
                    "weekday {day} is outside 0 (Sunday) ..= 6 (Saturday)"
                )));
            }
            bits |= 1 << day;
        }
        Ok(WeekdaySet(bits))
    }

    /// Parse a comma separated list such as `"1,3"`. Empty input is the empty set.
    pub fn parse_list(list: &str) -> FerienResult<Self> {
        let days = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u8>()
                    .map_err(|_| FerienError::Config(format!("'{s}' is not a weekday number")))
            })
            .collect::<FerienResult<Vec<u8>>>()?;

        Self::from_days(&days)
    }

    pub fn contains(self, weekday: u8) -> bool {
        weekday <= 6 && self.0 & (1 << weekday) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn days(self) -> Vec<u8> {
        (0..7).filter(|&d| self.contains(d)).collect()
    }
}

impl TryFrom<Vec<u8>> for WeekdaySet {
    type Error = FerienError;

    fn try_from(days: Vec<u8>) -> Result<Self, Self::Error> {
        Self::from_days(&days)
    }
}

impl From<WeekdaySet> for Vec<u8> {
    fn from(set: WeekdaySet) -> Self {
        set.days()
    }
}

impl fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Monday first, Sunday last
        let labels: Vec<&str> = [1u8, 2, 3, 4, 5, 6, 0]
            .into_iter()
            .filter(|&d| self.contains(d))
            .map(|d| WEEKDAY_LABELS[d as usize])
            .collect();

        if labels.is_empty() {
            write!(f, "-")
        } else {
            write!(f, "{}", labels.join(", "))
        }
    }
}

/// Explicit engine configuration: each parent's structurally free weekdays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSettings {
    #[serde(default)]
    pub p1_days_off: WeekdaySet,
    #[serde(default)]
    pub p2_days_off: WeekdaySet,
}

impl CoverageSettings {
    pub fn new(p1_days_off: WeekdaySet, p2_days_off: WeekdaySet) -> Self {
        CoverageSettings {
            p1_days_off,
            p2_days_off,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_days_rejects_out_of_range() {
        assert!(WeekdaySet::from_days(&[7]).is_err());
        let set = WeekdaySet::from_days(&[0, 3, 3]).unwrap();
        assert_eq!(set.days(), vec![0, 3]);
    }

    #[test]
    fn test_parse_list() {
        assert_eq!(WeekdaySet::parse_list("").unwrap(), WeekdaySet::EMPTY);
        assert_eq!(WeekdaySet::parse_list(" 1, 5 ").unwrap().days(), vec![1, 5]);
        assert!(WeekdaySet::parse_list("mo").is_err());
    }

    #[test]
    fn test_display_monday_first() {
        let set = WeekdaySet::from_days(&[0, 3]).unwrap();
        assert_eq!(set.to_string(), "Mi, So");
        assert_eq!(WeekdaySet::EMPTY.to_string(), "-");
    }

    #[test]
    fn test_serde_as_list() {
        let settings: CoverageSettings = serde_json::from_str(r#"{"p1DaysOff":[3]}"#).unwrap();
        assert!(settings.p1_days_off.contains(3));
        assert!(settings.p2_days_off.is_empty());
        assert!(serde_json::from_str::<WeekdaySet>("[9]").is_err());
    }
}
