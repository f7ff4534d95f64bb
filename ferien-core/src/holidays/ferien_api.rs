//! School holidays fetched from ferien-api.de.

use std::time::Duration;

use serde::Deserialize;

use crate::date::IsoDate;
use crate::error::{FerienError, FerienResult};
use crate::holiday::SchoolHolidayRange;
use crate::holidays::SchoolHolidaySource;

pub const DEFAULT_API_URL: &str = "https://ferien-api.de/api/v1/holidays/DE-BY";

/// Entry as returned by the API. Dates come as ISO timestamps.
#[derive(Debug, Deserialize)]
struct ApiHoliday {
    start: String,
    end: String,
    name: String,
}

pub struct FerienApiSource {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl FerienApiSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        FerienApiSource {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }

    fn unavailable(year: i32, reason: impl ToString) -> FerienError {
        FerienError::HolidaySourceUnavailable {
            year,
            reason: reason.to_string(),
        }
    }
}

impl SchoolHolidaySource for FerienApiSource {
    async fn school_holidays(&self, year: i32) -> FerienResult<Vec<SchoolHolidayRange>> {
        let url = format!("{}/{}", self.base_url, year);

        let resp = self
            .http
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| Self::unavailable(year, e))?;

        if !resp.status().is_success() {
            return Err(Self::unavailable(year, format!("HTTP {}", resp.status())));
        }

        let entries: Vec<ApiHoliday> = resp.json().await.map_err(|e| Self::unavailable(year, e))?;

        entries
            .into_iter()
            .map(|h| {
                Ok(SchoolHolidayRange {
                    start: date_part(&h.start)?,
                    end: date_part(&h.end)?,
                    name: h.name,
                })
            })
            .collect::<FerienResult<Vec<_>>>()
            .map_err(|e| Self::unavailable(year, e))
    }
}

/// `"2025-08-01T00:00Z"` -> `2025-08-01`
fn date_part(timestamp: &str) -> FerienResult<IsoDate> {
    let date = timestamp.split('T').next().unwrap_or(timestamp);
    IsoDate::parse(date)
}
