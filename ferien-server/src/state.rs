use std::sync::Arc;

use anyhow::{Context, Result};
use ferien_core::CoverageSettings;
use ferien_core::config::PlannerConfig;
use ferien_core::holidays::{BavarianSchoolHolidays, HolidayService, bavarian_school_holidays};
use ferien_core::store::{JsonFileStore, VacationStore};
use tokio::sync::Mutex;
use tracing::info;

pub type SharedStore = Arc<Mutex<Box<dyn VacationStore>>>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Writes are serialized by this lock; last write wins.
    pub store: SharedStore,
    pub holidays: Arc<HolidayService<BavarianSchoolHolidays>>,
    /// Days off used when a request does not specify its own
    pub settings: CoverageSettings,
}

impl AppState {
    pub fn new(
        store: Box<dyn VacationStore>,
        school: BavarianSchoolHolidays,
        settings: CoverageSettings,
    ) -> Self {
        AppState {
            store: Arc::new(Mutex::new(store)),
            holidays: Arc::new(HolidayService::new(school)),
            settings,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let path = config.data_path();
        let store = JsonFileStore::open(&path)
            .with_context(|| format!("Failed to open vacation store {}", path.display()))?;
        info!(
            path = %store.path().display(),
            records = store.list_all()?.len(),
            "Vacation store opened"
        );

        let school = bavarian_school_holidays(&config.school_api_url, config.fetch_timeout());

        Ok(Self::new(
            Box::new(store),
            school,
            config.coverage_settings()?,
        ))
    }
}
