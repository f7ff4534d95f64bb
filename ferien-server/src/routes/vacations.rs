//! Vacation assignment endpoints

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::{get, post},
};
use ferien_core::{Assignee, DateWrite, IsoDate, VacationRecord, compute_range_dates};
use serde::{Deserialize, Deserializer, Serialize};

use crate::routes::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/vacations", get(list_vacations).post(set_vacation))
        .route("/api/vacations/range", post(set_range))
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// GET /api/vacations - All assignments, sorted by date
async fn list_vacations(
    State(state): State<AppState>,
) -> Result<Json<Vec<VacationRecord>>, AppError> {
    let store = state.store.lock().await;
    Ok(Json(store.list_all()?))
}

/// Request body for a single-day write. `userId: null` deletes; a missing
/// `userId` is rejected.
#[derive(Deserialize)]
pub struct SetVacationRequest {
    pub date: Option<String>,
    #[serde(rename = "userId", default, deserialize_with = "present")]
    pub user_id: Option<Option<Assignee>>,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent key (`None`).
fn present<'de, D>(deserializer: D) -> Result<Option<Option<Assignee>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Assignee>::deserialize(deserializer).map(Some)
}

/// POST /api/vacations - Upsert or delete one day
async fn set_vacation(
    State(state): State<AppState>,
    payload: Result<Json<SetVacationRequest>, JsonRejection>,
) -> Result<Json<SuccessResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    let (Some(date), Some(assignee)) = (req.date, req.user_id) else {
        return Err(AppError::bad_request("date and userId are required"));
    };
    let date = IsoDate::parse(&date)?;

    state.store.lock().await.set_one(&date, assignee)?;

    Ok(Json(SuccessResponse { success: true }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetRangeRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub user_id: Option<Assignee>,
}

#[derive(Serialize)]
pub struct SetRangeResponse {
    pub success: bool,
    /// Prior assignment of every touched date, for undo
    pub previous: Vec<DateWrite>,
}

/// POST /api/vacations/range - Assign every day of a range, atomically
async fn set_range(
    State(state): State<AppState>,
    payload: Result<Json<SetRangeRequest>, JsonRejection>,
) -> Result<Json<SetRangeResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::bad_request(e.body_text()))?;
    let (Some(start), Some(end), Some(assignee)) = (req.start_date, req.end_date, req.user_id)
    else {
        return Err(AppError::bad_request(
            "startDate, endDate, and userId are required",
        ));
    };

    let span = compute_range_dates(&start, &end)?;
    let previous = state.store.lock().await.set_range(&span, assignee)?;

    Ok(Json(SetRangeResponse {
        success: true,
        previous,
    }))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use ferien_core::CoverageSettings;
    use serde_json::json;

    use crate::routes::app;
    use crate::routes::test_support::{call, state};

    #[tokio::test]
    async fn test_set_list_and_delete() {
        let app = app(state(CoverageSettings::default()));

        let (status, body) = call(
            &app,
            "POST",
            "/api/vacations",
            Some(json!({"date": "2025-08-04", "userId": "both"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": true}));

        let (_, list) = call(&app, "GET", "/api/vacations", None).await;
        assert_eq!(list, json!([{"date": "2025-08-04", "userId": "both"}]));

        call(
            &app,
            "POST",
            "/api/vacations",
            Some(json!({"date": "2025-08-04", "userId": null})),
        )
        .await;
        let (_, list) = call(&app, "GET", "/api/vacations", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_invalid_date_is_bad_request() {
        let app = app(state(CoverageSettings::default()));

        let (status, body) = call(
            &app,
            "POST",
            "/api/vacations",
            Some(json!({"date": "2025-02-30", "userId": "p1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("2025-02-30"));

        let (status, _) = call(&app, "POST", "/api/vacations", Some(json!({"userId": "p1"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(
            &app,
            "POST",
            "/api/vacations",
            Some(json!({"date": "2025-08-04", "userId": "grandma"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_missing_user_id_keeps_the_day() {
        let app = app(state(CoverageSettings::default()));
        call(
            &app,
            "POST",
            "/api/vacations",
            Some(json!({"date": "2025-08-04", "userId": "p2"})),
        )
        .await;

        let (status, body) = call(
            &app,
            "POST",
            "/api/vacations",
            Some(json!({"date": "2025-08-04"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "date and userId are required");

        let (_, list) = call(&app, "GET", "/api/vacations", None).await;
        assert_eq!(list, json!([{"date": "2025-08-04", "userId": "p2"}]));
    }

    #[tokio::test]
    async fn test_range_normalises_order_and_reports_previous() {
        let app = app(state(CoverageSettings::default()));

        call(
            &app,
            "POST",
            "/api/vacations",
            Some(json!({"date": "2025-06-06", "userId": "care"})),
        )
        .await;

        let (status, body) = call(
            &app,
            "POST",
            "/api/vacations/range",
            Some(json!({"startDate": "2025-06-07", "endDate": "2025-06-05", "userId": "p2"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["previous"],
            json!([
                {"date": "2025-06-05", "userId": null},
                {"date": "2025-06-06", "userId": "care"},
                {"date": "2025-06-07", "userId": null}
            ])
        );

        let (_, list) = call(&app, "GET", "/api/vacations", None).await;
        assert_eq!(list.as_array().unwrap().len(), 3);
        assert!(list.as_array().unwrap().iter().all(|r| r["userId"] == "p2"));
    }

    #[tokio::test]
    async fn test_range_requires_all_fields() {
        let app = app(state(CoverageSettings::default()));

        let (status, body) = call(
            &app,
            "POST",
            "/api/vacations/range",
            Some(json!({"startDate": "2025-06-07", "userId": "p2"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "startDate, endDate, and userId are required");

        let (status, _) = call(
            &app,
            "POST",
            "/api/vacations/range",
            Some(json!({"startDate": "2025-06-07", "endDate": "06/09/2025", "userId": "p2"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
