//! Coverage statistics endpoint

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    routing::get,
};
use ferien_core::{CoverageEngine, CoverageSettings, CoverageSummary, WeekdaySet};
use serde::Deserialize;

use crate::routes::AppError;
use crate::routes::holidays::YearQuery;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/stats", get(get_stats))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub year: Option<i32>,
    /// Comma separated weekday ordinals, e.g. `1,3`
    pub p1_days_off: Option<String>,
    pub p2_days_off: Option<String>,
}

fn days_off(param: Option<&str>, default: WeekdaySet) -> Result<WeekdaySet, AppError> {
    match param {
        Some(list) => WeekdaySet::parse_list(list).map_err(|e| AppError::bad_request(e.to_string())),
        None => Ok(default),
    }
}

/// GET /api/stats?year=Y - Year totals and per-month coverage
async fn get_stats(
    State(state): State<AppState>,
    query: Result<Query<StatsQuery>, QueryRejection>,
) -> Result<Json<CoverageSummary>, AppError> {
    let Query(query) = query.map_err(|e| AppError::bad_request(e.body_text()))?;
    let year = YearQuery { year: query.year }.year_or_current()?;

    let settings = CoverageSettings::new(
        days_off(query.p1_days_off.as_deref(), state.settings.p1_days_off)?,
        days_off(query.p2_days_off.as_deref(), state.settings.p2_days_off)?,
    );

    let assignments = state.store.lock().await.assignments()?;
    let holidays = state.holidays.get_holidays(year).await;

    let summary = CoverageEngine::new(year, &holidays, &assignments, settings).summary();
    Ok(Json(summary))
}
