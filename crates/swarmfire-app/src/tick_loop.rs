//! Kernel thread — runs the tick orchestrator on its own OS thread at a
//! fixed rate, draining the command inbox before each tick and publishing
//! the resulting snapshot to the watch channel every tick.
//!
//! The orchestrator is created inside this thread because ownership is
//! cleaner that way: nothing outside this module ever holds a reference
//! to kernel state.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use swarmfire_core::commands::ExternalCommand;
use swarmfire_core::config::Config;
use swarmfire_core::error::EngineError;
use swarmfire_core::state::WorldSnapshot;
use swarmfire_sim::TickOrchestrator;
use tokio::sync::watch;

/// Spawns the kernel thread. Returns the command sender and a snapshot
/// receiver; the REST and WS surfaces clone their own handles from these.
pub fn spawn(config: Config) -> Result<(mpsc::Sender<ExternalCommand>, watch::Receiver<WorldSnapshot>), EngineError> {
    let mut orchestrator = TickOrchestrator::new(config)?;
    let (cmd_tx, cmd_rx) = mpsc::channel::<ExternalCommand>();
    let (snap_tx, snap_rx) = watch::channel(WorldSnapshot::default());

    std::thread::Builder::new()
        .name("swarmfire-kernel".into())
        .spawn(move || run_kernel_thread(&mut orchestrator, cmd_rx, snap_tx))
        .expect("failed to spawn kernel thread");

    Ok((cmd_tx, snap_rx))
}

/// The kernel loop. Runs until a shutdown command arrives, the inbox
/// disconnects, or every snapshot receiver has been dropped.
fn run_kernel_thread(
    orchestrator: &mut TickOrchestrator,
    cmd_rx: mpsc::Receiver<ExternalCommand>,
    snap_tx: watch::Sender<WorldSnapshot>,
) {
    tracing::info!(seed = orchestrator.config().sim.seed, "kernel thread starting");
    let mut next_tick = Instant::now();

    loop {
        loop {
            match cmd_rx.try_recv() {
                Ok(ExternalCommand::Shutdown) => {
                    tracing::info!("shutdown command received, draining to tick boundary");
                    let _ = orchestrator.apply_command(ExternalCommand::Shutdown);
                    match orchestrator.tick() {
                        Ok(snapshot) => {
                            let _ = snap_tx.send(snapshot);
                            tracing::info!("kernel thread stopped");
                        }
                        Err(fault) => {
                            tracing::error!(%fault, "kernel fault on shutdown tick");
                            std::process::exit(2);
                        }
                    }
                    return;
                }
                Ok(cmd) => {
                    if let Err(err) = orchestrator.apply_command(cmd) {
                        tracing::warn!(%err, "external command rejected");
                    }
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::info!("command channel disconnected, kernel thread stopping");
                    return;
                }
            }
        }

        let snapshot = match orchestrator.tick() {
            Ok(snapshot) => snapshot,
            Err(fault) => {
                tracing::error!(%fault, "kernel invariant violated, stopping kernel thread");
                std::process::exit(2);
            }
        };
        if snap_tx.send(snapshot).is_err() {
            tracing::info!("no snapshot receivers left, kernel thread stopping");
            return;
        }

        let tick_duration = Duration::from_secs_f64(orchestrator.config().sim.dt_s.max(1e-6));
        next_tick += tick_duration;
        let now = Instant::now();
        if next_tick > now {
            std::thread::sleep(next_tick - now);
        } else if now - next_tick > tick_duration * 4 {
            // fell too far behind, reset rather than spiral trying to catch up
            next_tick = now;
        }
    }
}
