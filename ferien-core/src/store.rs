//! Persistent vacation assignments.
//!
//! Point writes and range writes are last-write-wins. A range write is applied
//! to a copy of the state and persisted in one atomic file replacement, so a
//! failure leaves the previous state untouched.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assignee::Assignee;
use crate::date::IsoDate;
use crate::error::{FerienError, FerienResult};
use crate::range::DateSpan;
use crate::vacation::{Assignments, DateWrite, VacationRecord};

/// Keyed store mapping a date to its assignee.
pub trait VacationStore: Send {
    /// All assignments, sorted by date.
    fn list_all(&self) -> FerienResult<Vec<VacationRecord>>;

    /// Upsert, or delete when `assignee` is `None`. Returns the previous tag.
    fn set_one(
        &mut self,
        date: &IsoDate,
        assignee: Option<Assignee>,
    ) -> FerienResult<Option<Assignee>>;

    /// Upsert every date of `span`, all or nothing. Returns the previous tag
    /// of every touched date, in date order.
    fn set_range(&mut self, span: &DateSpan, assignee: Assignee) -> FerienResult<Vec<DateWrite>>;

    fn assignments(&self) -> FerienResult<Assignments> {
        Ok(self.list_all()?.into_iter().collect())
    }
}

/// Non-persistent store, for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<IsoDate, Assignee>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VacationStore for MemoryStore {
    fn list_all(&self) -> FerienResult<Vec<VacationRecord>> {
        Ok(self
            .entries
            .iter()
            .map(|(date, assignee)| VacationRecord {
                date: date.clone(),
                assignee: *assignee,
            })
            .collect())
    }

    fn set_one(
        &mut self,
        date: &IsoDate,
        assignee: Option<Assignee>,
    ) -> FerienResult<Option<Assignee>> {
        Ok(match assignee {
            Some(a) => self.entries.insert(date.clone(), a),
            None => self.entries.remove(date),
        })
    }

    fn set_range(&mut self, span: &DateSpan, assignee: Assignee) -> FerienResult<Vec<DateWrite>> {
        Ok(span
            .iter()
            .map(|date| DateWrite {
                assignee: self.entries.insert(date.clone(), assignee),
                date,
            })
            .collect())
    }
}

/// Row as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredVacation {
    date: IsoDate,
    user_id: Assignee,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreFile {
    #[serde(default)]
    vacations: Vec<StoredVacation>,
}

/// Store backed by a single JSON document.
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<IsoDate, StoredVacation>,
}

impl JsonFileStore {
    /// Open the store at `path`, starting empty if the file does not exist.
    pub fn open(path: impl Into<PathBuf>) -> FerienResult<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let file: StoreFile = serde_json::from_str(&content).map_err(|e| {
                FerienError::Store(format!("Could not parse {}: {e}", path.display()))
            })?;
            file.vacations
                .into_iter()
                .map(|v| (v.date.clone(), v))
                .collect()
        } else {
            BTreeMap::new()
        };

        Ok(JsonFileStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn upsert(
        entries: &mut BTreeMap<IsoDate, StoredVacation>,
        date: &IsoDate,
        assignee: Assignee,
        now: DateTime<Utc>,
    ) -> Option<Assignee> {
        match entries.get_mut(date) {
            Some(existing) => {
                let prior = existing.user_id;
                existing.user_id = assignee;
                existing.updated_at = now;
                Some(prior)
            }
            None => {
                entries.insert(
                    date.clone(),
                    StoredVacation {
                        date: date.clone(),
                        user_id: assignee,
                        created_at: now,
                        updated_at: now,
                    },
                );
                None
            }
        }
    }

    /// Write `entries` to a temporary file next to the store and rename it
    /// over the old file.
    fn persist(&self, entries: &BTreeMap<IsoDate, StoredVacation>) -> FerienResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let file = StoreFile {
            vacations: entries.values().cloned().collect(),
        };
        let content = serde_json::to_string_pretty(&file)
            .map_err(|e| FerienError::Serialization(e.to_string()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| {
            FerienError::Store(format!(
                "Could not replace {}: {}",
                self.path.display(),
                e.error
            ))
        })?;

        Ok(())
    }
}

impl VacationStore for JsonFileStore {
    fn list_all(&self) -> FerienResult<Vec<VacationRecord>> {
        Ok(self
            .entries
            .values()
            .map(|v| VacationRecord {
                date: v.date.clone(),
                assignee: v.user_id,
            })
            .collect())
    }

    fn set_one(
        &mut self,
        date: &IsoDate,
        assignee: Option<Assignee>,
    ) -> FerienResult<Option<Assignee>> {
        let mut next = self.entries.clone();
        let prior = match assignee {
            Some(a) => Self::upsert(&mut next, date, a, Utc::now()),
            None => next.remove(date).map(|v| v.user_id),
        };

        self.persist(&next)?;
        self.entries = next;

        info!(%date, assignee = ?assignee, "Vacation updated");
        Ok(prior)
    }

    fn set_range(&mut self, span: &DateSpan, assignee: Assignee) -> FerienResult<Vec<DateWrite>> {
        let now = Utc::now();
        let mut next = self.entries.clone();

        let previous = span
            .iter()
            .map(|date| DateWrite {
                assignee: Self::upsert(&mut next, &date, assignee, now),
                date,
            })
            .collect();

        self.persist(&next)?;
        self.entries = next;

        info!(start = %span.start(), end = %span.end(), %assignee, "Vacation range updated");
        Ok(previous)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::compute_range_dates;

    fn date(s: &str) -> IsoDate {
        IsoDate::parse(s).unwrap()
    }

    #[test]
    fn test_memory_store_point_and_range() {
        let mut store = MemoryStore::new();
        store.set_one(&date("2025-08-05"), Some(Assignee::P2)).unwrap();

        let span = compute_range_dates("2025-08-04", "2025-08-06").unwrap();
        let previous = store.set_range(&span, Assignee::P1).unwrap();
        assert_eq!(previous[1].assignee, Some(Assignee::P2));
        assert_eq!(store.list_all().unwrap().len(), 3);

        assert_eq!(store.set_one(&date("2025-08-05"), None).unwrap(), Some(Assignee::P1));
        assert_eq!(store.assignments().unwrap().get("2025-08-05"), None);
    }

    #[test]
    fn test_json_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vacations.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        assert!(store.list_all().unwrap().is_empty());

        let span = compute_range_dates("2025-08-08", "2025-08-04").unwrap();
        store.set_range(&span, Assignee::Both).unwrap();
        store.set_one(&date("2025-08-06"), None).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        let dates: Vec<String> = reopened
            .list_all()
            .unwrap()
            .into_iter()
            .map(|r| r.date.to_string())
            .collect();
        assert_eq!(dates, vec!["2025-08-04", "2025-08-05", "2025-08-07", "2025-08-08"]);
    }

    #[test]
    fn test_json_store_keeps_created_at_on_update() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vacations.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set_one(&date("2025-03-03"), Some(Assignee::P1)).unwrap();
        let created = store.entries[&date("2025-03-03")].created_at;

        let prior = store.set_one(&date("2025-03-03"), Some(Assignee::Care)).unwrap();
        assert_eq!(prior, Some(Assignee::P1));

        let entry = &store.entries[&date("2025-03-03")];
        assert_eq!(entry.created_at, created);
        assert!(entry.updated_at >= created);
        assert_eq!(entry.user_id, Assignee::Care);
    }

    #[test]
    fn test_json_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vacations.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(JsonFileStore::open(&path), Err(FerienError::Store(_))));
    }

    #[test]
    fn test_failed_range_write_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let blocked = dir.path().join("blocker");
        std::fs::write(&blocked, "").unwrap();

        // parent "directory" is a regular file, so persisting fails
        let mut store = JsonFileStore::open(blocked.join("vacations.json")).unwrap();
        let span = compute_range_dates("2025-08-01", "2025-08-03").unwrap();

        assert!(store.set_range(&span, Assignee::P1).is_err());
        assert!(store.list_all().unwrap().is_empty());
    }
}
