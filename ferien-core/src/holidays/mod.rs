//! Holiday calendar provider.
//!
//! Public holidays are computed locally and are always available. School
//! holidays come from a [`SchoolHolidaySource`]; the live API is wrapped in a
//! [`FallbackSource`] over the built-in table, and [`HolidayService`] turns
//! any remaining failure into an empty school-holiday list so classification
//! keeps working. Only answers from the live source are cached; fallback
//! answers are retried on the next request.

mod ferien_api;
mod public;
mod static_table;

pub use ferien_api::{DEFAULT_API_URL, FerienApiSource};
pub use public::{BavarianPublicHolidays, easter_sunday};
pub use static_table::StaticSchoolHolidays;

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::FerienResult;
use crate::holiday::{HolidayCalendar, SchoolHolidayRange};

/// School holidays of a year and whether a fallback had to answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fetched {
    pub ranges: Vec<SchoolHolidayRange>,
    pub degraded: bool,
}

/// Anything that can list the school holidays relevant to a year.
pub trait SchoolHolidaySource: Send + Sync {
    fn school_holidays(
        &self,
        year: i32,
    ) -> impl Future<Output = FerienResult<Vec<SchoolHolidayRange>>> + Send;

    /// Like `school_holidays`, but tells whether the answer is a stand-in.
    fn fetch(&self, year: i32) -> impl Future<Output = FerienResult<Fetched>> + Send {
        async move {
            Ok(Fetched {
                ranges: self.school_holidays(year).await?,
                degraded: false,
            })
        }
    }
}

/// Uses `secondary` whenever `primary` fails.
pub struct FallbackSource<P, S> {
    primary: P,
    secondary: S,
}

impl<P, S> FallbackSource<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        FallbackSource { primary, secondary }
    }
}

impl<P: SchoolHolidaySource, S: SchoolHolidaySource> SchoolHolidaySource for FallbackSource<P, S> {
    async fn school_holidays(&self, year: i32) -> FerienResult<Vec<SchoolHolidayRange>> {
        Ok(self.fetch(year).await?.ranges)
    }

    async fn fetch(&self, year: i32) -> FerienResult<Fetched> {
        match self.primary.fetch(year).await {
            Ok(fetched) => Ok(fetched),
            Err(e) => {
                warn!(year, error = %e, "School holiday fetch failed, using fallback");
                let mut fetched = self.secondary.fetch(year).await?;
                fetched.degraded = true;
                Ok(fetched)
            }
        }
    }
}

/// Live API with the built-in table as fallback.
pub type BavarianSchoolHolidays = FallbackSource<FerienApiSource, StaticSchoolHolidays>;

pub fn bavarian_school_holidays(api_url: &str, timeout: Duration) -> BavarianSchoolHolidays {
    FallbackSource::new(FerienApiSource::new(api_url, timeout), StaticSchoolHolidays)
}

/// Answers `GetHolidays(year)` and caches each year once the live source answered.
pub struct HolidayService<S> {
    public: BavarianPublicHolidays,
    school: S,
    cache: RwLock<HashMap<i32, HolidayCalendar>>,
}

impl<S: SchoolHolidaySource> HolidayService<S> {
    pub fn new(school: S) -> Self {
        HolidayService {
            public: BavarianPublicHolidays,
            school,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Public and school holidays of `year`. Never fails: a school source
    /// error degrades to an empty school list. Neither that nor a fallback
    /// answer is cached.
    pub async fn get_holidays(&self, year: i32) -> HolidayCalendar {
        if let Some(cached) = self.cache.read().await.get(&year) {
            debug!(year, "Holiday cache hit");
            return cached.clone();
        }

        let public = self.public.for_year(year);

        match self.school.fetch(year).await {
            Ok(Fetched {
                ranges,
                degraded: false,
            }) => {
                let calendar = HolidayCalendar {
                    public,
                    school: ranges,
                };
                self.cache.write().await.insert(year, calendar.clone());
                calendar
            }
            Ok(Fetched { ranges, .. }) => HolidayCalendar {
                public,
                school: ranges,
            },
            Err(e) => {
                warn!(year, error = %e, "No school holidays available");
                HolidayCalendar {
                    public,
                    school: Vec::new(),
                }
            }
        }
    }
}
