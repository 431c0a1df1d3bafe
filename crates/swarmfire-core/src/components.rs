//! ECS components for hecs drone entities.
//!
//! Components are plain data structs with no methods. The physics engine
//! owns the world and is the only thing that mutates these; vehicle agents
//! only read them through a `WorldView`.

use serde::{Deserialize, Serialize};

use crate::types::Pose;

/// Stable vehicle id, unique positive integer, attached to every drone
/// entity so a query can report which drone it came from without a
/// separate id -> entity reverse lookup at every call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DroneId(pub u32);

/// Battery charge, percent of capacity. Monotone non-increasing absent a
/// reset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Battery {
    pub percent: f64,
}

/// Suppressant payload remaining. Monotone non-increasing absent a reset.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Payload {
    pub remaining: f64,
    pub max: f64,
}

/// Odometer for the current tick, meters flown. Reset and refilled by the
/// movement step; consumed by the energy step.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FlightDistance {
    pub meters_this_tick: f64,
}

/// Dock/launch pose a vehicle returns to on RTL and departs from on
/// takeoff.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DockPose(pub Pose);
