//! Built-in school holiday table for Bavaria.

use crate::date::IsoDate;
use crate::error::{FerienError, FerienResult};
use crate::holiday::SchoolHolidayRange;
use crate::holidays::SchoolHolidaySource;

type Row = (&'static str, &'static str, &'static str);

const SCHOOL_2025: [Row; 7] = [
    ("2024-12-23", "2025-01-03", "Weihnachtsferien"),
    ("2025-03-03", "2025-03-07", "Frühjahrsferien"),
    ("2025-04-14", "2025-04-25", "Osterferien"),
    ("2025-06-10", "2025-06-20", "Pfingstferien"),
    ("2025-08-01", "2025-09-15", "Sommerferien"),
    ("2025-11-03", "2025-11-07", "Herbstferien"),
    ("2025-12-22", "2026-01-05", "Weihnachtsferien"),
];

const SCHOOL_2026: [Row; 7] = [
    ("2025-12-22", "2026-01-05", "Weihnachtsferien"),
    ("2026-02-16", "2026-02-20", "Frühjahrsferien"),
    ("2026-03-30", "2026-04-10", "Osterferien"),
    ("2026-05-26", "2026-06-05", "Pfingstferien"),
    ("2026-08-03", "2026-09-14", "Sommerferien"),
    ("2026-11-02", "2026-11-06", "Herbstferien"),
    ("2026-12-23", "2027-01-08", "Weihnachtsferien"),
];

/// School holidays known at build time. Unknown years yield an empty list.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticSchoolHolidays;

impl StaticSchoolHolidays {
    pub fn for_year(&self, year: i32) -> FerienResult<Vec<SchoolHolidayRange>> {
        let rows: &[Row] = match year {
            2025 => &SCHOOL_2025,
            2026 => &SCHOOL_2026,
            _ => &[],
        };

        rows.iter()
            .map(|&(start, end, name)| {
                Ok(SchoolHolidayRange {
                    start: IsoDate::parse(start)?,
                    end: IsoDate::parse(end)?,
                    name: name.to_string(),
                })
            })
            .collect::<FerienResult<Vec<_>>>()
            .map_err(|e: FerienError| FerienError::Config(format!("built-in table: {e}")))
    }
}

impl SchoolHolidaySource for StaticSchoolHolidays {
    async fn school_holidays(&self, year: i32) -> FerienResult<Vec<SchoolHolidayRange>> {
        self.for_year(year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_years() {
        let table = StaticSchoolHolidays;
        let y2025 = table.for_year(2025).unwrap();
        assert_eq!(y2025.len(), 7);
        assert_eq!(y2025[4].name, "Sommerferien");
        assert_eq!(y2025[0].start.as_str(), "2024-12-23");
        assert_eq!(table.for_year(2026).unwrap().len(), 7);
    }

    #[test]
    fn test_unknown_year_is_empty() {
        assert!(StaticSchoolHolidays.for_year(1999).unwrap().is_empty());
    }

    #[test]
    fn test_ranges_are_well_formed() {
        for year in [2025, 2026] {
            for range in StaticSchoolHolidays.for_year(year).unwrap() {
                assert!(range.start <= range.end, "{} in {year}", range.name);
            }
        }
    }
}
