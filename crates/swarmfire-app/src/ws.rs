//! Streaming surface: a WebSocket endpoint that pushes a state update
//! whenever the published snapshot changes in an observable way —
//! approximated as the tick counter advancing and at least one drone's
//! pose/state or the fire summary differing from the last pushed value.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tokio::sync::watch;

use swarmfire_core::state::WorldSnapshot;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new().route("/ws/state", get(upgrade)).with_state(state)
}

async fn upgrade(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| stream_state(socket, state.subscribe()))
}

async fn stream_state(mut socket: WebSocket, mut rx: watch::Receiver<WorldSnapshot>) {
    let mut last_pushed: Option<WorldSnapshot> = None;

    loop {
        if rx.changed().await.is_err() {
            break;
        }
        let snapshot = rx.borrow().clone();
        if !observably_changed(last_pushed.as_ref(), &snapshot) {
            continue;
        }

        let payload = json!({
            "type": "state_update",
            "timestamp": snapshot.time.elapsed_secs,
            "state": snapshot,
        });
        let text = match serde_json::to_string(&payload) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(%err, "failed to serialize state_update payload");
                continue;
            }
        };
        if socket.send(Message::Text(text)).await.is_err() {
            break;
        }
        last_pushed = Some(snapshot);
    }
}

fn observably_changed(previous: Option<&WorldSnapshot>, current: &WorldSnapshot) -> bool {
    let Some(previous) = previous else { return true };
    if previous.time.tick >= current.time.tick {
        return false;
    }
    if previous.fire != current.fire {
        return true;
    }
    if previous.drones.len() != current.drones.len() {
        return true;
    }
    previous
        .drones
        .iter()
        .zip(current.drones.iter())
        .any(|(a, b)| a.pose != b.pose || a.state != b.state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarmfire_core::enums::VehicleState;
    use swarmfire_core::state::DroneView;

    fn snapshot(tick: u64, pose_x: f64, state: VehicleState) -> WorldSnapshot {
        let mut snap = WorldSnapshot::default();
        snap.time.tick = tick;
        snap.drones = vec![DroneView { id: 0, state, ..Default::default() }];
        snap.drones[0].pose.x = pose_x;
        snap
    }

    #[test]
    fn first_snapshot_is_always_observable() {
        assert!(observably_changed(None, &snapshot(1, 0.0, VehicleState::Idle)));
    }

    #[test]
    fn unchanged_tick_is_not_observable() {
        let a = snapshot(5, 10.0, VehicleState::Search);
        let b = snapshot(5, 10.0, VehicleState::Search);
        assert!(!observably_changed(Some(&a), &b));
    }

    #[test]
    fn moved_pose_is_observable() {
        let a = snapshot(5, 10.0, VehicleState::Search);
        let b = snapshot(6, 11.0, VehicleState::Search);
        assert!(observably_changed(Some(&a), &b));
    }

    #[test]
    fn state_change_is_observable_even_at_same_pose() {
        let a = snapshot(5, 10.0, VehicleState::Search);
        let b = snapshot(6, 10.0, VehicleState::Suppress);
        assert!(observably_changed(Some(&a), &b));
    }
}
