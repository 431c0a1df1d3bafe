//! REST surface: read/write access to the kernel via the command inbox
//! and snapshot outbox. Handlers never touch kernel state directly.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::json;

use swarmfire_core::commands::ExternalCommand;
use swarmfire_core::enums::KernelPhase;
use swarmfire_core::error::EngineError;
use swarmfire_core::state::{DroneView, FireSummary, MetricsSnapshot, WorldSnapshot};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/simulation/state", get(simulation_state))
        .route("/api/v1/simulation/start", post(start_simulation))
        .route("/api/v1/simulation/stop", post(stop_simulation))
        .route("/api/v1/drones", get(list_drones))
        .route("/api/v1/drones/:id", get(get_drone))
        .route("/api/v1/fire/ignite", post(ignite))
        .route("/api/v1/fire/suppress", post(suppress))
        .route("/api/v1/fire/state", get(fire_state))
        .route("/api/v1/metrics", get(metrics))
        .with_state(state)
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn simulation_state(State(state): State<AppState>) -> Json<WorldSnapshot> {
    Json(state.latest_snapshot())
}

async fn start_simulation(State(state): State<AppState>) -> impl IntoResponse {
    if state.latest_snapshot().phase == KernelPhase::Running {
        return (StatusCode::CONFLICT, Json(json!({ "error": "simulation already running" }))).into_response();
    }
    match state.send_command(ExternalCommand::Start) {
        Ok(()) => (StatusCode::OK, Json(json!({}))).into_response(),
        Err(err) => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": err }))).into_response(),
    }
}

async fn stop_simulation(State(state): State<AppState>) -> impl IntoResponse {
    match state.send_command(ExternalCommand::Stop) {
        Ok(()) => (StatusCode::OK, Json(json!({}))).into_response(),
        Err(err) => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": err }))).into_response(),
    }
}

async fn list_drones(State(state): State<AppState>) -> Json<Vec<DroneView>> {
    Json(state.latest_snapshot().drones)
}

async fn get_drone(State(state): State<AppState>, Path(id): Path<u32>) -> impl IntoResponse {
    match state.latest_snapshot().drones.into_iter().find(|d| d.id == id) {
        Some(drone) => (StatusCode::OK, Json(drone)).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({ "error": format!("unknown drone id {id}") }))).into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct IgnitePayload {
    x: f64,
    y: f64,
    intensity: f64,
}

async fn ignite(State(state): State<AppState>, Json(payload): Json<IgnitePayload>) -> impl IntoResponse {
    if !(0.0..=1.0).contains(&payload.intensity) {
        return (StatusCode::BAD_REQUEST, Json(json!({ "error": "intensity must be within [0, 1]" }))).into_response();
    }
    if !state.world_bounds().contains(payload.x, payload.y) {
        let err = EngineError::OutOfBounds { x: payload.x, y: payload.y };
        return (engine_error_status(&err), Json(json!({ "error": err.to_string() }))).into_response();
    }
    match state.send_command(ExternalCommand::Ignite { x: payload.x, y: payload.y, intensity: payload.intensity }) {
        Ok(()) => (StatusCode::OK, Json(json!({ "ok": true }))).into_response(),
        Err(err) => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": err }))).into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct SuppressPayload {
    x: f64,
    y: f64,
    strength: f64,
}

#[derive(Debug, Serialize)]
struct SuppressResponse {
    ok: bool,
    cells_affected: u32,
}

async fn suppress(State(state): State<AppState>, Json(payload): Json<SuppressPayload>) -> impl IntoResponse {
    if !state.world_bounds().contains(payload.x, payload.y) {
        let err = EngineError::OutOfBounds { x: payload.x, y: payload.y };
        return (engine_error_status(&err), Json(json!({ "error": err.to_string() }))).into_response();
    }
    match state.send_command(ExternalCommand::Suppress { x: payload.x, y: payload.y, strength: payload.strength }) {
        Ok(()) => (StatusCode::OK, Json(SuppressResponse { ok: true, cells_affected: 1 })).into_response(),
        Err(err) => (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": err }))).into_response(),
    }
}

#[derive(Debug, Serialize)]
struct FireStateResponse {
    summary: FireSummary,
    burning_cells: Vec<swarmfire_core::state::BurningCell>,
}

async fn fire_state(State(state): State<AppState>) -> Json<FireStateResponse> {
    let snapshot = state.latest_snapshot();
    Json(FireStateResponse { summary: snapshot.fire, burning_cells: snapshot.burning_cells })
}

async fn metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.latest_snapshot().metrics)
}

/// Maps a recoverable engine error to its REST 4xx-class response.
fn engine_error_status(err: &EngineError) -> StatusCode {
    match err {
        EngineError::UnknownDrone(_) => StatusCode::NOT_FOUND,
        EngineError::DuplicateDrone(_) => StatusCode::CONFLICT,
        EngineError::OutOfBounds { .. } => StatusCode::BAD_REQUEST,
        EngineError::RejectedCommand(_) => StatusCode::BAD_REQUEST,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WorldBounds;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::mpsc;
    use tokio::sync::watch;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let (tx, _rx) = mpsc::channel();
        let (_snap_tx, snap_rx) = watch::channel(WorldSnapshot::default());
        AppState::new(tx, snap_rx, WorldBounds { width_m: 1000.0, height_m: 1000.0 })
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = router(test_state());
        let response =
            app.oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn ignite_rejects_invalid_intensity() {
        let app = router(test_state());
        let body = Body::from(serde_json::to_vec(&json!({"x": 1.0, "y": 1.0, "intensity": 2.0})).unwrap());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/fire/ignite")
                    .header("content-type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn ignite_rejects_out_of_bounds_coordinates() {
        let app = router(test_state());
        let body = Body::from(serde_json::to_vec(&json!({"x": 5000.0, "y": 5000.0, "intensity": 0.5})).unwrap());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/fire/ignite")
                    .header("content-type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_drone_returns_404() {
        let app = router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/api/v1/drones/999").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
