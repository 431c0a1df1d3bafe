//! External commands delivered to the kernel through the command inbox.
//!
//! Commands are validated and applied at the next tick boundary: the
//! inbox is drained fully before any kernel work runs.

use serde::{Deserialize, Serialize};

/// Partial override of the fields that can be changed without restarting
/// the kernel. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub detm_eta0: Option<f64>,
    pub detm_lambda: Option<f64>,
    pub rtl_threshold_percent: Option<f64>,
}

/// All external commands accepted by the kernel's inbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ExternalCommand {
    /// Start advancing the simulation.
    Start,
    /// Stop advancing the simulation; the world state is retained.
    Stop,
    /// Ignite a cell at world coordinates (meters).
    Ignite { x: f64, y: f64, intensity: f64 },
    /// Apply a suppression pulse at world coordinates (meters).
    Suppress { x: f64, y: f64, strength: f64 },
    /// Register a new drone with an initial pose.
    RegisterDrone { id: u32, x: f64, y: f64, z: f64 },
    /// Apply a hot-reloadable config override at the next tick boundary.
    UpdateConfig(ConfigUpdate),
    /// Drain the current tick and shut the kernel thread down (exit 0).
    Shutdown,
}
