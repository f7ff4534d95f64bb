//! Rule-based public holidays for Bavaria. Works offline for any year.

use chrono::{Duration, NaiveDate};

use crate::date::IsoDate;
use crate::holiday::PublicHoliday;

/// Statutory holidays observed state-wide in Bavaria.
///
/// Fixed dates:
/// * Neujahr (Jan 1)
/// * Heilige Drei Könige (Jan 6)
/// * Tag der Arbeit (May 1)
/// * Mariä Himmelfahrt (Aug 15)
/// * Tag der Deutschen Einheit (Oct 3)
/// * Allerheiligen (Nov 1)
/// * 1. and 2. Weihnachtstag (Dec 25, Dec 26)
///
/// Relative to Easter Sunday (es):
/// * Karfreitag (es-2)
/// * Ostermontag (es+1)
/// * Christi Himmelfahrt (es+39)
/// * Pfingstmontag (es+50)
/// * Fronleichnam (es+60)
///
/// Heiligabend (Dec 24) and Silvester (Dec 31) are bank holidays, not
/// statutory ones, and are not listed. Holiday libraries that include them
/// treat both as non-working days; here they are ordinary workdays, so
/// inside the Weihnachtsferien they count towards the required coverage.
#[derive(Debug, Clone, Copy, Default)]
pub struct BavarianPublicHolidays;

const FIXED: [(u32, u32, &str); 8] = [
    (1, 1, "Neujahr"),
    (1, 6, "Heilige Drei Könige"),
    (5, 1, "Tag der Arbeit"),
    (8, 15, "Mariä Himmelfahrt"),
    (10, 3, "Tag der Deutschen Einheit"),
    (11, 1, "Allerheiligen"),
    (12, 25, "1. Weihnachtstag"),
    (12, 26, "2. Weihnachtstag"),
];

const EASTER_RELATIVE: [(i64, &str); 5] = [
    (-2, "Karfreitag"),
    (1, "Ostermontag"),
    (39, "Christi Himmelfahrt"),
    (50, "Pfingstmontag"),
    (60, "Fronleichnam"),
];

impl BavarianPublicHolidays {
    /// Holidays of `year`, sorted by date.
    pub fn for_year(&self, year: i32) -> Vec<PublicHoliday> {
        let fixed = FIXED
            .iter()
            .filter_map(|&(m, d, name)| NaiveDate::from_ymd_opt(year, m, d).map(|date| (date, name)));

        let movable = easter_sunday(year).into_iter().flat_map(|easter| {
            EASTER_RELATIVE
                .iter()
                .map(move |&(offset, name)| (easter + Duration::days(offset), name))
        });

        let mut holidays: Vec<PublicHoliday> = fixed
            .chain(movable)
            .filter_map(|(date, name)| {
                IsoDate::from_naive(date).ok().map(|date| PublicHoliday {
                    date,
                    name: name.to_string(),
                })
            })
            .collect();

        holidays.sort_by(|a, b| a.date.cmp(&b.date));
        holidays
    }
}

/// Easter Sunday in the Gregorian calendar (anonymous computus).
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find<'a>(holidays: &'a [PublicHoliday], name: &str) -> &'a str {
        holidays
            .iter()
            .find(|h| h.name == name)
            .map(|h| h.date.as_str())
            .unwrap()
    }

    #[test]
    fn test_easter_dates() {
        assert_eq!(easter_sunday(2024), NaiveDate::from_ymd_opt(2024, 3, 31));
        assert_eq!(easter_sunday(2025), NaiveDate::from_ymd_opt(2025, 4, 20));
        assert_eq!(easter_sunday(2026), NaiveDate::from_ymd_opt(2026, 4, 5));
        assert_eq!(easter_sunday(2038), NaiveDate::from_ymd_opt(2038, 4, 25));
    }

    #[test]
    fn test_bavaria_2025() {
        let holidays = BavarianPublicHolidays.for_year(2025);
        assert_eq!(holidays.len(), 13);
        assert_eq!(find(&holidays, "Karfreitag"), "2025-04-18");
        assert_eq!(find(&holidays, "Ostermontag"), "2025-04-21");
        assert_eq!(find(&holidays, "Christi Himmelfahrt"), "2025-05-29");
        assert_eq!(find(&holidays, "Pfingstmontag"), "2025-06-09");
        assert_eq!(find(&holidays, "Fronleichnam"), "2025-06-19");
        assert_eq!(find(&holidays, "Mariä Himmelfahrt"), "2025-08-15");
    }

    #[test]
    fn test_bank_holidays_are_workdays() {
        let holidays = BavarianPublicHolidays.for_year(2025);
        assert!(!holidays.iter().any(|h| h.date.as_str() == "2025-12-24"));
        assert!(!holidays.iter().any(|h| h.date.as_str() == "2025-12-31"));
    }

    #[test]
    fn test_sorted_by_date() {
        let holidays = BavarianPublicHolidays.for_year(2026);
        assert!(holidays.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(holidays.first().unwrap().name, "Neujahr");
        assert_eq!(holidays.last().unwrap().name, "2. Weihnachtstag");
    }
}
