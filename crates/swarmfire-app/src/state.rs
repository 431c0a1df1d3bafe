//! Application state shared across REST and WebSocket handlers — a thin
//! handle onto the kernel thread's command inbox and snapshot outbox.
//! Handlers never touch kernel state directly.

use std::sync::{mpsc, Arc, Mutex};

use swarmfire_core::commands::ExternalCommand;
use swarmfire_core::state::WorldSnapshot;
use tokio::sync::watch;

/// World extent in meters, derived once from the fire grid's config at
/// startup. Lets REST handlers reject out-of-bounds coordinates before
/// ever reaching the kernel, since the command inbox is fire-and-forget
/// and can't hand a synchronous `EngineError` back to the caller.
#[derive(Debug, Clone, Copy)]
pub struct WorldBounds {
    pub width_m: f64,
    pub height_m: f64,
}

impl WorldBounds {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..self.width_m).contains(&x) && (0.0..self.height_m).contains(&y)
    }
}

#[derive(Clone)]
pub struct AppState {
    command_tx: Arc<Mutex<mpsc::Sender<ExternalCommand>>>,
    snapshot_rx: watch::Receiver<WorldSnapshot>,
    world_bounds: WorldBounds,
}

impl AppState {
    pub fn new(
        command_tx: mpsc::Sender<ExternalCommand>,
        snapshot_rx: watch::Receiver<WorldSnapshot>,
        world_bounds: WorldBounds,
    ) -> Self {
        Self { command_tx: Arc::new(Mutex::new(command_tx)), snapshot_rx, world_bounds }
    }

    pub fn world_bounds(&self) -> WorldBounds {
        self.world_bounds
    }

    /// Forward a command to the kernel inbox. Fails only if the kernel
    /// thread has already shut down.
    pub fn send_command(&self, cmd: ExternalCommand) -> Result<(), String> {
        self.command_tx
            .lock()
            .map_err(|e| e.to_string())?
            .send(cmd)
            .map_err(|_| "kernel thread is no longer running".to_string())
    }

    /// The latest published snapshot, by value.
    pub fn latest_snapshot(&self) -> WorldSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Clone of the outbox receiver, for the streaming surface to watch
    /// independently of REST reads.
    pub fn subscribe(&self) -> watch::Receiver<WorldSnapshot> {
        self.snapshot_rx.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> WorldBounds {
        WorldBounds { width_m: 1000.0, height_m: 1000.0 }
    }

    #[test]
    fn send_command_reaches_the_receiver() {
        let (tx, rx) = mpsc::channel();
        let (_snap_tx, snap_rx) = watch::channel(WorldSnapshot::default());
        let state = AppState::new(tx, snap_rx, bounds());
        state.send_command(ExternalCommand::Start).unwrap();
        assert!(matches!(rx.try_recv().unwrap(), ExternalCommand::Start));
    }

    #[test]
    fn latest_snapshot_reflects_last_publish() {
        let (tx, _rx) = mpsc::channel();
        let (snap_tx, snap_rx) = watch::channel(WorldSnapshot::default());
        let state = AppState::new(tx, snap_rx, bounds());
        let mut snapshot = WorldSnapshot::default();
        snapshot.time.tick = 42;
        snap_tx.send(snapshot).unwrap();
        assert_eq!(state.latest_snapshot().time.tick, 42);
    }

    #[test]
    fn world_bounds_rejects_negative_and_out_of_range_coordinates() {
        let b = bounds();
        assert!(b.contains(0.0, 0.0));
        assert!(!b.contains(-1.0, 10.0));
        assert!(!b.contains(10.0, 1000.0));
    }
}
