//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// A vehicle's role in the swarm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Leader,
    Follower,
}

/// Per-vehicle behavior state machine state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum VehicleState {
    #[default]
    Idle,
    Takeoff,
    Search,
    Formation,
    Suppress,
    ReturnToLaunch,
    Land,
}

/// Message payload kind, carried by `Message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    Telemetry,
    FireDetection,
    Suppression,
    Command,
}

/// Alert severity for the alert queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertLevel {
    Info,
    Warning,
    Critical,
}

/// Distance norm used by the ETM trigger rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EtmNorm {
    #[default]
    L2,
    LInfinity,
}

/// Overall kernel lifecycle phase, driven by start/stop commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KernelPhase {
    #[default]
    Stopped,
    Running,
}
