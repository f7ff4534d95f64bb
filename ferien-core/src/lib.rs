//! Core types for the Ferienplaner.
//!
//! This crate provides everything the server and CLI share:
//! - `coverage`: day classification and year/month statistics
//! - `range`: range normalisation, assignment merge and optimistic updates
//! - `holidays`: public holiday rules and school holiday sources
//! - `store`: the vacation store and its file-backed implementation

pub mod assignee;
pub mod config;
pub mod coverage;
pub mod date;
pub mod days_off;
pub mod error;
pub mod holiday;
pub mod holidays;
pub mod range;
pub mod store;
pub mod vacation;

pub use assignee::{Assignee, next_on_click};
pub use coverage::{CoverageEngine, CoverageSummary, DayStatus, MonthCoverage, YearStats};
pub use date::IsoDate;
pub use days_off::{CoverageSettings, WeekdaySet};
pub use error::{FerienError, FerienResult};
pub use holiday::{HolidayCalendar, PublicHoliday, SchoolHolidayRange};
pub use range::{DateSpan, OptimisticUpdate, apply_range_assignment, compute_range_dates};
pub use vacation::{Assignments, DateWrite, VacationRecord};
