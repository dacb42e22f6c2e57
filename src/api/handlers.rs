//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use super::AppState;
use super::types::{ErrorResponse, PeriodRecord, StateResponse, TrajectoryQuery};

/// Returns scenario, summary, steady state, and latest period record.
///
/// `GET /state` → 200 + `StateResponse` JSON
pub async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    Json(StateResponse {
        scenario: state.scenario,
        summary: state.summary.clone(),
        steady_state: state.steady_state,
        latest_period: state.periods.last().map(PeriodRecord::from),
    })
}

/// Returns period records, optionally filtered by period range.
///
/// `GET /trajectory` → 200 + `Vec<PeriodRecord>` JSON
/// `GET /trajectory?from=N&to=M` → filtered range (inclusive)
/// `GET /trajectory?from=10&to=5` → 400 + `ErrorResponse`
pub async fn get_trajectory(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TrajectoryQuery>,
) -> impl IntoResponse {
    let from = query.from.unwrap_or(0);
    let to = query.to.unwrap_or(usize::MAX);

    if from > to {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("`from` ({from}) must be <= `to` ({to})"),
            }),
        ));
    }

    let records: Vec<PeriodRecord> = state
        .periods
        .iter()
        .filter(|r| r.period >= from && r.period <= to)
        .map(PeriodRecord::from)
        .collect();

    Ok(Json(records))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    use super::*;
    use crate::api::router;
    use crate::config::ScenarioConfig;

    fn make_test_state() -> Arc<AppState> {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.horizon = 24;
        let scenario = cfg.build().unwrap();
        let out = scenario.run().unwrap();
        Arc::new(AppState::new(scenario, out))
    }

    async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
        let app = router(make_test_state());
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn state_returns_200() {
        let (status, json) = get_json("/state").await;
        assert_eq!(status, StatusCode::OK);
        assert!(json.get("scenario").is_some());
        assert!(json.get("summary").is_some());
        assert!(json["steady_state"].get("capital").is_some());
        assert_eq!(json["latest_period"]["period"], 23);
    }

    #[tokio::test]
    async fn trajectory_returns_all_periods() {
        let (status, json) = get_json("/trajectory").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(22));
    }

    #[tokio::test]
    async fn trajectory_range_query() {
        let (status, json) = get_json("/trajectory?from=5&to=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json.as_array().map(Vec::len), Some(6)); // periods 5..=10
        assert_eq!(json[0]["period"], 5);
        assert_eq!(json[5]["period"], 10);
    }

    #[tokio::test]
    async fn trajectory_invalid_range_returns_400() {
        let (status, json) = get_json("/trajectory?from=10&to=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json.get("error").is_some());
    }
}
