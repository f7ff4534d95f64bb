//! Range assignment: turning a date span and an assignee into per-date writes.

use serde::Serialize;

use crate::assignee::Assignee;
use crate::date::IsoDate;
use crate::error::{FerienError, FerienResult};
use crate::vacation::{Assignments, DateWrite};

/// An inclusive, ascending span of dates. Iterating it is restartable.
///
/// Only [`compute_range_dates`] builds one, so `start <= end` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    start: IsoDate,
    end: IsoDate,
}

impl DateSpan {
    pub fn start(&self) -> &IsoDate {
        &self.start
    }

    pub fn end(&self) -> &IsoDate {
        &self.end
    }

    pub fn iter(&self) -> DateSpanIter {
        DateSpanIter {
            next: Some(self.start.clone()),
            end: self.end.clone(),
        }
    }

    /// Number of days in the span, at least 1.
    pub fn day_count(&self) -> usize {
        let days = (self.end.naive() - self.start.naive()).num_days();
        usize::try_from(days).map_or(1, |d| d + 1)
    }
}

impl<'a> IntoIterator for &'a DateSpan {
    type Item = IsoDate;
    type IntoIter = DateSpanIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct DateSpanIter {
    next: Option<IsoDate>,
    end: IsoDate,
}

impl Iterator for DateSpanIter {
    type Item = IsoDate;

    fn next(&mut self) -> Option<IsoDate> {
        let current = self.next.take()?;
        if current > self.end {
            return None;
        }
        if current < self.end {
            self.next = current.succ();
        }
        Some(current)
    }
}

/// Validate both ends and order them so that `start <= end`.
pub fn compute_range_dates(start: &str, end: &str) -> FerienResult<DateSpan> {
    let start = IsoDate::parse(start).map_err(|e| FerienError::InvalidRange(e.to_string()))?;
    let end = IsoDate::parse(end).map_err(|e| FerienError::InvalidRange(e.to_string()))?;

    Ok(if start <= end {
        DateSpan { start, end }
    } else {
        DateSpan {
            start: end,
            end: start,
        }
    })
}

/// Resulting state after assigning every date of `dates` to `assignee`.
/// Dates outside the span keep their assignment.
pub fn apply_range_assignment(
    current: &Assignments,
    dates: &DateSpan,
    assignee: Assignee,
) -> Assignments {
    let mut next = current.clone();
    for date in dates {
        next.set(date, Some(assignee));
    }
    next
}

/// A locally applied change that has not been confirmed by the store yet.
///
/// Keeps the prior state so a failed write can be rolled back verbatim, and
/// the prior per-date tags so a confirmed write can later be undone.
#[derive(Debug, Clone)]
pub struct OptimisticUpdate {
    previous: Assignments,
    applied: Assignments,
    touched: Vec<DateWrite>,
}

impl OptimisticUpdate {
    pub fn range(current: &Assignments, dates: &DateSpan, assignee: Assignee) -> Self {
        let touched = dates
            .iter()
            .map(|date| DateWrite {
                assignee: current.get(date.as_str()),
                date,
            })
            .collect();

        OptimisticUpdate {
            previous: current.clone(),
            applied: apply_range_assignment(current, dates, assignee),
            touched,
        }
    }

    pub fn point(current: &Assignments, date: IsoDate, assignee: Option<Assignee>) -> Self {
        let mut applied = current.clone();
        let prior = applied.set(date.clone(), assignee);

        OptimisticUpdate {
            previous: current.clone(),
            applied,
            touched: vec![DateWrite {
                date,
                assignee: prior,
            }],
        }
    }

    /// State to show while the write is in flight.
    pub fn applied(&self) -> &Assignments {
        &self.applied
    }

    /// Write failed: restore exactly what was there before.
    pub fn rollback(self) -> Assignments {
        self.previous
    }

    /// Writes that restore the prior tag of every touched date.
    pub fn undo_writes(&self) -> &[DateWrite] {
        &self.touched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vacation::VacationRecord;

    fn as_strings(span: &DateSpan) -> Vec<String> {
        span.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_range_is_inclusive_and_ascending() {
        let span = compute_range_dates("2025-06-05", "2025-06-10").unwrap();
        assert_eq!(
            as_strings(&span),
            vec![
                "2025-06-05",
                "2025-06-06",
                "2025-06-07",
                "2025-06-08",
                "2025-06-09",
                "2025-06-10"
            ]
        );
        assert_eq!(span.day_count(), 6);
    }

    #[test]
    fn test_range_swaps_reversed_input() {
        let forward = compute_range_dates("2025-06-05", "2025-06-10").unwrap();
        let backward = compute_range_dates("2025-06-10", "2025-06-05").unwrap();
        assert_eq!(forward, backward);
        assert_eq!(backward.start().as_str(), "2025-06-05");
        assert_eq!(backward.end().as_str(), "2025-06-10");
        assert_eq!(backward.day_count(), 6);
        assert_eq!(as_strings(&forward), as_strings(&backward));
    }

    #[test]
    fn test_single_day_range() {
        let span = compute_range_dates("2025-02-28", "2025-02-28").unwrap();
        assert_eq!(as_strings(&span), vec!["2025-02-28"]);
        assert_eq!(span.day_count(), 1);
    }

    #[test]
    fn test_range_crosses_month_and_year() {
        let span = compute_range_dates("2025-12-30", "2026-01-02").unwrap();
        assert_eq!(
            as_strings(&span),
            vec!["2025-12-30", "2025-12-31", "2026-01-01", "2026-01-02"]
        );
    }

    #[test]
    fn test_iteration_restarts() {
        let span = compute_range_dates("2025-03-01", "2025-03-03").unwrap();
        assert_eq!(span.iter().count(), 3);
        assert_eq!(span.iter().count(), 3);
    }

    #[test]
    fn test_invalid_range_input() {
        let err = compute_range_dates("2025-13-01", "2025-06-01").unwrap_err();
        assert!(matches!(err, FerienError::InvalidRange(_)));
        assert!(compute_range_dates("2025-06-01", "tomorrow").is_err());
    }

    #[test]
    fn test_apply_overwrites_inside_and_keeps_outside() {
        let current: Assignments = vec![
            VacationRecord {
                date: IsoDate::parse("2025-06-04").unwrap(),
                assignee: Assignee::P2,
            },
            VacationRecord {
                date: IsoDate::parse("2025-06-06").unwrap(),
                assignee: Assignee::Care,
            },
        ]
        .into_iter()
        .collect();

        let span = compute_range_dates("2025-06-05", "2025-06-07").unwrap();
        let next = apply_range_assignment(&current, &span, Assignee::P1);

        assert_eq!(next.get("2025-06-04"), Some(Assignee::P2));
        assert_eq!(next.get("2025-06-05"), Some(Assignee::P1));
        assert_eq!(next.get("2025-06-06"), Some(Assignee::P1));
        assert_eq!(next.get("2025-06-07"), Some(Assignee::P1));
        assert_eq!(next.len(), 4);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let span = compute_range_dates("2025-08-01", "2025-08-10").unwrap();
        let once = apply_range_assignment(&Assignments::new(), &span, Assignee::Both);
        let twice = apply_range_assignment(&once, &span, Assignee::Both);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_optimistic_rollback_restores_previous() {
        let mut current = Assignments::new();
        current.set(IsoDate::parse("2025-08-02").unwrap(), Some(Assignee::P2));

        let span = compute_range_dates("2025-08-01", "2025-08-03").unwrap();
        let update = OptimisticUpdate::range(&current, &span, Assignee::P1);
        assert_eq!(update.applied().get("2025-08-02"), Some(Assignee::P1));

        let undo = update.undo_writes();
        assert_eq!(undo.len(), 3);
        assert_eq!(undo[0].assignee, None);
        assert_eq!(undo[1].assignee, Some(Assignee::P2));

        assert_eq!(update.rollback(), current);
    }

    #[test]
    fn test_optimistic_point_delete() {
        let mut current = Assignments::new();
        let date = IsoDate::parse("2025-08-02").unwrap();
        current.set(date.clone(), Some(Assignee::Care));

        let update = OptimisticUpdate::point(&current, date, None);
        assert!(update.applied().is_empty());
        assert_eq!(update.undo_writes()[0].assignee, Some(Assignee::Care));
    }
}
