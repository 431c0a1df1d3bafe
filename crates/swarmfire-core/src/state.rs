//! World snapshot — the complete visible state broadcast after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::Alert;
use crate::types::{Pose, SimTime};

/// Complete world state broadcast over the streaming surface after each
/// tick and returned by the snapshot REST endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub time: SimTime,
    pub phase: KernelPhase,
    pub drones: Vec<DroneView>,
    pub fire: FireSummary,
    pub burning_cells: Vec<BurningCell>,
    pub metrics: MetricsSnapshot,
    pub alerts: Vec<Alert>,
}

/// One currently-burning grid cell, in world coordinates, for the
/// fire-state REST endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BurningCell {
    pub x: f64,
    pub y: f64,
    pub intensity: f64,
}

/// Per-drone view exposed to the streaming surface.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DroneView {
    pub id: u32,
    pub role: Role,
    pub state: VehicleState,
    pub pose: Pose,
    pub battery_percent: f64,
    pub payload_remaining: f64,
}

/// Aggregate fire-grid status, cheap enough to compute every tick without
/// shipping the full cell grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FireSummary {
    pub burning_cells: u32,
    pub burned_out_cells: u32,
    pub total_intensity: f64,
    pub contained: bool,
}

/// Rolling metrics snapshot, backed by the `METRICS_HISTORY_TICKS`-deep
/// history the aggregator keeps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub messages_sent: u64,
    pub messages_suppressed: u64,
    pub messages_dropped: u64,
    pub suppression_events: u64,
    pub drones_rtl: u32,
    pub drones_landed: u32,
    pub area_contained_fraction: f64,
}
