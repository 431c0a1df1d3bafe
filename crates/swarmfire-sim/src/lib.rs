//! Simulation kernel for the wildfire containment swarm.
//!
//! Owns the hecs ECS world of drone entities, the fire grid, and the RF
//! channel table. Runs the fixed six-step tick and produces
//! `WorldSnapshot`s for the application layer.

pub mod agent;
pub mod engine;
pub mod messaging;
pub mod metrics;
pub mod orchestrator;
pub mod systems;
pub mod world_setup;

pub use swarmfire_core as core;
pub use orchestrator::TickOrchestrator;
