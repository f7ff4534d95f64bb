//! TUI rendering for planner types.
//!
//! Extension traits that add colored terminal rendering to ferien-core types
//! using owo_colors.

use ferien_core::{
    Assignee, DayStatus, MonthCoverage, PublicHoliday, SchoolHolidayRange, YearStats,
};
use owo_colors::OwoColorize;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Display names of the two parents.
#[derive(Debug, Clone)]
pub struct Names {
    pub p1: String,
    pub p2: String,
}

impl Names {
    pub fn assignee(&self, assignee: Assignee) -> String {
        match assignee {
            Assignee::P1 => self.p1.clone(),
            Assignee::P2 => self.p2.clone(),
            Assignee::Both => format!("{} + {}", self.p1, self.p2),
            Assignee::Care => "Care".to_string(),
        }
    }

    pub fn assignment(&self, assignee: Option<Assignee>) -> String {
        match assignee {
            Some(a) => self.assignee(a),
            None => "nobody".to_string(),
        }
    }
}

pub fn month_label(month0: usize) -> &'static str {
    MONTH_LABELS.get(month0).copied().unwrap_or("???")
}

/// One line of the month view.
pub struct DayLine<'a> {
    pub day: &'a DayStatus,
    pub names: &'a Names,
}

impl Render for DayLine<'_> {
    fn render(&self) -> String {
        let day = self.day;
        let date = day.date.naive().format("%a %d.%m.").to_string();

        let marker = if day.is_unattended {
            "✗".red().to_string()
        } else if day.requires_coverage() {
            "✓".green().to_string()
        } else {
            " ".to_string()
        };

        let mut tags = Vec::new();
        if let Some(name) = &day.public_holiday_name {
            tags.push(name.magenta().to_string());
        }
        if let Some(name) = &day.school_holiday_name {
            tags.push(name.blue().to_string());
        }
        if day.has_p1 {
            tags.push(self.names.p1.green().to_string());
        }
        if day.has_p2 {
            tags.push(self.names.p2.green().to_string());
        }
        if day.has_care {
            tags.push("Care".cyan().to_string());
        }
        if day.is_p1_free {
            tags.push(format!("{} free", self.names.p1).dimmed().to_string());
        }
        if day.is_p2_free {
            tags.push(format!("{} free", self.names.p2).dimmed().to_string());
        }

        let date = if day.is_weekend || day.is_public_holiday {
            date.dimmed().to_string()
        } else {
            date
        };

        format!("{marker} {date}  {}", tags.join(" "))
            .trim_end()
            .to_string()
    }
}

impl Render for MonthCoverage {
    fn render(&self) -> String {
        let ratio = format!("{}/{}", self.covered_days, self.required_days);
        if self.required_days == 0 {
            ratio.dimmed().to_string()
        } else if self.is_fully_covered() {
            ratio.green().to_string()
        } else {
            format!("{} {}", ratio.yellow(), format!("({} open)", self.unattended_days()).red())
        }
    }
}

impl Render for PublicHoliday {
    fn render(&self) -> String {
        format!("{}  {}", self.date.to_string().dimmed(), self.name)
    }
}

impl Render for SchoolHolidayRange {
    fn render(&self) -> String {
        format!(
            "{} .. {}  {}",
            self.start.to_string().dimmed(),
            self.end.to_string().dimmed(),
            self.name.blue()
        )
    }
}

/// Year totals, one line per fact.
pub fn render_year_stats(stats: &YearStats, names: &Names) -> Vec<String> {
    let unattended = if stats.unattended_count == 0 {
        "0".green().to_string()
    } else {
        stats.unattended_count.red().to_string()
    };

    vec![
        format!(
            "{}: {} days, {} workdays of allowance",
            names.p1.bold(),
            stats.p1_total,
            stats.p1_net
        ),
        format!(
            "{}: {} days, {} workdays of allowance",
            names.p2.bold(),
            stats.p2_total,
            stats.p2_net
        ),
        format!("{}: {} days", "Care".bold(), stats.care_total),
        format!(
            "School holiday workdays: {}, unattended: {}",
            stats.total_net_holiday_days, unattended
        ),
    ]
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferien_core::{
        Assignments, CoverageEngine, CoverageSettings, HolidayCalendar, IsoDate,
    };

    fn names() -> Names {
        Names {
            p1: "Papa".to_string(),
            p2: "Mama".to_string(),
        }
    }

    fn summer() -> HolidayCalendar {
        HolidayCalendar {
            public: vec![PublicHoliday {
                date: IsoDate::parse("2025-08-15").unwrap(),
                name: "Mariä Himmelfahrt".to_string(),
            }],
            school: vec![SchoolHolidayRange {
                start: IsoDate::parse("2025-08-01").unwrap(),
                end: IsoDate::parse("2025-09-15").unwrap(),
                name: "Sommerferien".to_string(),
            }],
        }
    }

    #[test]
    fn test_day_line_shows_holidays_and_assignees() {
        let holidays = summer();
        let mut assignments = Assignments::new();
        assignments.set(IsoDate::parse("2025-08-04").unwrap(), Some(Assignee::Both));
        let engine = CoverageEngine::new(2025, &holidays, &assignments, CoverageSettings::default());
        let names = names();

        let day = engine.classify_day(7, 4).unwrap();
        let line = DayLine { day: &day, names: &names }.render();
        assert!(line.contains("Sommerferien"));
        assert!(line.contains("Papa"));
        assert!(line.contains("Mama"));
        assert!(line.contains('✓'));

        let gap = engine.classify_day(7, 5).unwrap();
        assert!(DayLine { day: &gap, names: &names }.render().contains('✗'));

        let holiday = engine.classify_day(7, 15).unwrap();
        let line = DayLine { day: &holiday, names: &names }.render();
        assert!(line.contains("Mariä Himmelfahrt"));
        assert!(!line.contains('✗'));
    }

    #[test]
    fn test_allowance_counts_workdays_outside_school_holidays() {
        let holidays = HolidayCalendar::default();
        let mut assignments = Assignments::new();
        assignments.set(IsoDate::parse("2025-10-08").unwrap(), Some(Assignee::P1));
        assignments.set(IsoDate::parse("2025-10-11").unwrap(), Some(Assignee::P1));
        let stats = CoverageEngine::new(2025, &holidays, &assignments, CoverageSettings::default())
            .compute_year_stats();

        let lines = render_year_stats(&stats, &names());
        assert!(lines[0].contains("2 days, 1 workdays of allowance"));
        assert!(lines[3].contains("School holiday workdays: 0"));
    }

    #[test]
    fn test_month_coverage_shows_open_days() {
        let month = MonthCoverage {
            required_days: 20,
            covered_days: 17,
        };
        let text = month.render();
        assert!(text.contains("17/20"));
        assert!(text.contains("3 open"));
    }

    #[test]
    fn test_names() {
        let names = names();
        assert_eq!(names.assignee(Assignee::Both), "Papa + Mama");
        assert_eq!(names.assignment(None), "nobody");
        assert_eq!(month_label(7), "Aug");
        assert_eq!(pluralize("day", 1), "day");
        assert_eq!(pluralize("day", 3), "days");
    }
}
