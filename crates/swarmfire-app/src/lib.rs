//! Application layer for the wildfire containment swarm simulator.
//!
//! Wires the kernel thread to an async REST + WebSocket surface. The
//! kernel itself never depends on tokio or axum; this crate is the only
//! place those two worlds meet.

pub mod config_loader;
pub mod routes;
pub mod state;
pub mod tick_loop;
pub mod ws;

pub use swarmfire_core as core;
