//! Public and school holiday types.

use serde::{Deserialize, Serialize};

use crate::date::IsoDate;

/// A statutory holiday on a single date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    pub date: IsoDate,
    pub name: String,
}

/// School holidays, inclusive on both ends.
///
/// A range may start or end outside the year it was fetched for
/// (Christmas break).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolHolidayRange {
    pub start: IsoDate,
    pub end: IsoDate,
    pub name: String,
}

impl SchoolHolidayRange {
    pub fn contains(&self, date: &IsoDate) -> bool {
        self.start <= *date && *date <= self.end
    }
}

/// Everything the holiday provider knows about one year.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    pub public: Vec<PublicHoliday>,
    pub school: Vec<SchoolHolidayRange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: &str, end: &str) -> SchoolHolidayRange {
        SchoolHolidayRange {
            start: IsoDate::parse(start).unwrap(),
            end: IsoDate::parse(end).unwrap(),
            name: "Weihnachtsferien".to_string(),
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let r = range("2024-12-23", "2025-01-03");
        assert!(r.contains(&IsoDate::parse("2024-12-23").unwrap()));
        assert!(r.contains(&IsoDate::parse("2025-01-01").unwrap()));
        assert!(r.contains(&IsoDate::parse("2025-01-03").unwrap()));
        assert!(!r.contains(&IsoDate::parse("2025-01-04").unwrap()));
        assert!(!r.contains(&IsoDate::parse("2024-12-22").unwrap()));
    }

    #[test]
    fn test_calendar_json_shape() {
        let json = r#"{
            "public": [{"date": "2025-01-01", "name": "Neujahr"}],
            "school": [{"start": "2025-08-01", "end": "2025-09-15", "name": "Sommerferien"}]
        }"#;
        let calendar: HolidayCalendar = serde_json::from_str(json).unwrap();
        assert_eq!(calendar.public[0].name, "Neujahr");
        assert_eq!(calendar.school[0].end.as_str(), "2025-09-15");
    }
}
