//! Day classification and coverage statistics.
//!
//! Given the holidays of a year, the vacation assignments and both parents'
//! recurring days off, every day is classified into a [`DayStatus`]. The
//! statuses aggregate into per-year totals ([`YearStats`]) and per-month
//! coverage ([`MonthCoverage`]).
//!
//! A day *requires coverage* when it is a school holiday that is neither a
//! weekend nor a public holiday. It is *covered* by any assignment or by
//! either parent's recurring day off. A day that requires coverage and is
//! not covered is *unattended*.

use std::collections::HashMap;

use serde::Serialize;

use crate::date::{IsoDate, days_in_month};
use crate::days_off::CoverageSettings;
use crate::error::FerienResult;
use crate::holiday::{HolidayCalendar, SchoolHolidayRange};
use crate::vacation::Assignments;

/// Full classification of one date. Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStatus {
    pub date: IsoDate,
    pub weekday: u8,
    pub is_weekend: bool,
    pub is_public_holiday: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_holiday_name: Option<String>,
    pub is_school_holiday: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_holiday_name: Option<String>,
    pub has_p1: bool,
    pub has_p2: bool,
    pub has_care: bool,
    pub is_p1_free: bool,
    pub is_p2_free: bool,
    pub is_unattended: bool,
}

impl DayStatus {
    /// Neither weekend nor public holiday.
    pub fn is_net_day(&self) -> bool {
        !self.is_weekend && !self.is_public_holiday
    }

    pub fn requires_coverage(&self) -> bool {
        self.is_school_holiday && self.is_net_day()
    }

    pub fn is_covered(&self) -> bool {
        self.has_p1 || self.has_p2 || self.has_care || self.is_p1_free || self.is_p2_free
    }
}

/// Aggregate counts for one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearStats {
    /// Days tagged P1 or BOTH, weekends and holidays included.
    pub p1_total: u32,
    pub p2_total: u32,
    pub care_total: u32,
    /// Vacation spent by parent 1: assigned net days.
    pub p1_net: u32,
    pub p2_net: u32,
    pub total_net_holiday_days: u32,
    pub unattended_count: u32,
}

/// Coverage of the days that need it within one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthCoverage {
    pub required_days: u32,
    pub covered_days: u32,
}

impl MonthCoverage {
    pub fn is_fully_covered(&self) -> bool {
        self.covered_days >= self.required_days
    }

    pub fn unattended_days(&self) -> u32 {
        self.required_days.saturating_sub(self.covered_days)
    }
}

/// Year totals together with the monthly breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageSummary {
    pub year: i32,
    pub stats: YearStats,
    pub months: [MonthCoverage; 12],
}

/// Classifier for one year over a fixed snapshot of inputs.
///
/// Public holidays are indexed by date on construction; assignment lookups go
/// through the [`Assignments`] index. Nothing here performs I/O or mutates its
/// inputs, so engines for different years can run in parallel.
pub struct CoverageEngine<'a> {
    year: i32,
    public: HashMap<&'a str, &'a str>,
    school: &'a [SchoolHolidayRange],
    assignments: &'a Assignments,
    settings: CoverageSettings,
}

impl<'a> CoverageEngine<'a> {
    pub fn new(
        year: i32,
        holidays: &'a HolidayCalendar,
        assignments: &'a Assignments,
        settings: CoverageSettings,
    ) -> Self {
        let public = holidays
            .public
            .iter()
            .map(|h| (h.date.as_str(), h.name.as_str()))
            .collect();

        CoverageEngine {
            year,
            public,
            school: &holidays.school,
            assignments,
            settings,
        }
    }

    /// Classify a day of this engine's year. `month0` is 0..=11.
    pub fn classify_day(&self, month0: u32, day: u32) -> FerienResult<DayStatus> {
        let date = IsoDate::from_ymd(self.year, month0, day)?;
        Ok(self.classify(&date))
    }

    /// Classify any date against this engine's inputs.
    pub fn classify(&self, date: &IsoDate) -> DayStatus {
        let weekday = date.weekday();
        let is_weekend = weekday == 0 || weekday == 6;

        let public_holiday_name = self.public.get(date.as_str()).map(|name| name.to_string());
        let is_public_holiday = public_holiday_name.is_some();

        let school_holiday_name = self
            .school
            .iter()
            .find(|range| range.contains(date))
            .map(|range| range.name.clone());
        let is_school_holiday = school_holiday_name.is_some();

        let assignee = self.assignments.get(date.as_str());
        let has_p1 = assignee.is_some_and(|a| a.has_p1());
        let has_p2 = assignee.is_some_and(|a| a.has_p2());
        let has_care = assignee.is_some_and(|a| a.has_care());

        // Free days apply whether or not the day is assigned
        let is_p1_free = self.settings.p1_days_off.contains(weekday);
        let is_p2_free = self.settings.p2_days_off.contains(weekday);

        let is_unattended = is_school_holiday
            && !is_weekend
            && !is_public_holiday
            && !has_p1
            && !has_p2
            && !has_care
            && !is_p1_free
            && !is_p2_free;

        DayStatus {
            date: date.clone(),
            weekday,
            is_weekend,
            is_public_holiday,
            public_holiday_name,
            is_school_holiday,
            school_holiday_name,
            has_p1,
            has_p2,
            has_care,
            is_p1_free,
            is_p2_free,
            is_unattended,
        }
    }

    /// Every day of the year in order, leap days included.
    pub fn days(&self) -> impl Iterator<Item = DayStatus> + '_ {
        let year = self.year;
        (0..12u32)
            .flat_map(move |m| (1..=days_in_month(year, m)).map(move |d| (m, d)))
            .filter_map(move |(m, d)| IsoDate::from_ymd(year, m, d).ok())
            .map(move |date| self.classify(&date))
    }

    /// Days of one month in order.
    pub fn month_days(&self, month0: u32) -> FerienResult<Vec<DayStatus>> {
        (1..=days_in_month(self.year, month0).max(1))
            .map(|d| self.classify_day(month0, d))
            .collect()
    }

    pub fn unattended_days(&self) -> Vec<DayStatus> {
        self.days().filter(|d| d.is_unattended).collect()
    }

    pub fn compute_year_stats(&self) -> YearStats {
        self.summary().stats
    }

    pub fn compute_month_coverage(&self) -> [MonthCoverage; 12] {
        self.summary().months
    }

    /// Single pass over the year producing both the totals and the months.
    pub fn summary(&self) -> CoverageSummary {
        let mut stats = YearStats::default();
        let mut months = [MonthCoverage::default(); 12];

        for day in self.days() {
            if day.has_p1 {
                stats.p1_total += 1;
            }
            if day.has_p2 {
                stats.p2_total += 1;
            }
            if day.has_care {
                stats.care_total += 1;
            }

            if day.is_net_day() {
                if day.has_p1 {
                    stats.p1_net += 1;
                }
                if day.has_p2 {
                    stats.p2_net += 1;
                }
            }

            if day.requires_coverage() {
                let month = &mut months[day.date.month0() as usize];
                stats.total_net_holiday_days += 1;
                month.required_days += 1;

                if day.is_covered() {
                    month.covered_days += 1;
                } else {
                    stats.unattended_count += 1;
                }
            }
        }

        CoverageSummary {
            year: self.year,
            stats,
            months,
        }
    }
}

/// Classify one day without keeping an engine around.
pub fn classify_day(
    year: i32,
    month0: u32,
    day: u32,
    holidays: &HolidayCalendar,
    assignments: &Assignments,
    settings: CoverageSettings,
) -> FerienResult<DayStatus> {
    CoverageEngine::new(year, holidays, assignments, settings).classify_day(month0, day)
}

pub fn compute_year_stats(
    year: i32,
    holidays: &HolidayCalendar,
    assignments: &Assignments,
    settings: CoverageSettings,
) -> YearStats {
    CoverageEngine::new(year, holidays, assignments, settings).compute_year_stats()
}

pub fn compute_month_coverage(
    year: i32,
    holidays: &HolidayCalendar,
    assignments: &Assignments,
    settings: CoverageSettings,
) -> [MonthCoverage; 12] {
    CoverageEngine::new(year, holidays, assignments, settings).compute_month_coverage()
}
