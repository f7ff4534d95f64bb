//! Holiday calendar endpoint

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use chrono::Datelike;
use ferien_core::HolidayCalendar;
use serde::Deserialize;

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/holidays", get(get_holidays))
}

#[derive(Deserialize)]
pub struct YearQuery {
    pub year: Option<i32>,
}

impl YearQuery {
    /// Requested year, or the current local year.
    pub fn year_or_current(&self) -> Result<i32, AppError> {
        match self.year {
            Some(year) if !(1..=9999).contains(&year) => {
                Err(AppError::bad_request(format!("Year {year} is out of range")))
            }
            Some(year) => Ok(year),
            None => Ok(chrono::Local::now().year()),
        }
    }
}

/// GET /api/holidays?year=Y - Public and school holidays
async fn get_holidays(
    State(state): State<AppState>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Result<Json<HolidayCalendar>, AppError> {
    let Query(query) = query.map_err(|e| AppError::bad_request(e.body_text()))?;
    let year = query.year_or_current()?;

    Ok(Json(state.holidays.get_holidays(year).await))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use ferien_core::CoverageSettings;

    use crate::routes::app;
    use crate::routes::test_support::{call, state};

    #[tokio::test]
    async fn test_holidays_fall_back_to_builtin_table() {
        let app = app(state(CoverageSettings::default()));

        let (status, body) = call(&app, "GET", "/api/holidays?year=2025", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["public"].as_array().unwrap().len(), 13);
        assert_eq!(body["school"].as_array().unwrap().len(), 7);
        assert_eq!(body["school"][1]["start"], "2025-03-03");
        assert_eq!(body["public"][0]["name"], "Neujahr");
    }

    #[tokio::test]
    async fn test_bad_year_is_rejected() {
        let app = app(state(CoverageSettings::default()));

        let (status, body) = call(&app, "GET", "/api/holidays?year=abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, _) = call(&app, "GET", "/api/holidays?year=12000", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
