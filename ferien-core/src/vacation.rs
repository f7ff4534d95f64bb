//! Vacation assignments keyed by date.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::assignee::Assignee;
use crate::date::IsoDate;

/// One persisted assignment, as exchanged with the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRecord {
    pub date: IsoDate,
    #[serde(rename = "userId", alias = "assignee")]
    pub assignee: Assignee,
}

/// A single-date write. `None` deletes the assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWrite {
    pub date: IsoDate,
    #[serde(rename = "userId")]
    pub assignee: Option<Assignee>,
}

/// Date -> assignee index with constant-time lookup.
///
/// Build it once per change of the assignment set and share it across all
/// classifications of a year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignments {
    by_date: HashMap<IsoDate, Assignee>,
}

impl Assignments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a VacationRecord>) -> Self {
        let by_date = records
            .into_iter()
            .map(|r| (r.date.clone(), r.assignee))
            .collect();

        Assignments { by_date }
    }

    pub fn get(&self, date: &str) -> Option<Assignee> {
        self.by_date.get(date).copied()
    }

    /// Upsert or delete one date. Returns the previous tag.
    pub fn set(&mut self, date: IsoDate, assignee: Option<Assignee>) -> Option<Assignee> {
        match assignee {
            Some(a) => self.by_date.insert(date, a),
            None => self.by_date.remove(date.as_str()),
        }
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}

impl FromIterator<VacationRecord> for Assignments {
    fn from_iter<T: IntoIterator<Item = VacationRecord>>(iter: T) -> Self {
        let by_date = iter.into_iter().map(|r| (r.date, r.assignee)).collect();
        Assignments { by_date }
    }
}
