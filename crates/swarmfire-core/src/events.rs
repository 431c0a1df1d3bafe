//! Events surfaced from the kernel for the streaming surface and alert queue.

use serde::{Deserialize, Serialize};

pub use crate::enums::AlertLevel;

/// Notable per-tick occurrences, folded into `MetricsSnapshot` counters and
/// also used to decide whether the streaming surface should push.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A vehicle's ETM controller emitted a telemetry broadcast.
    TelemetrySent { drone_id: u32 },
    /// A vehicle's ETM controller suppressed a would-be broadcast.
    TelemetrySuppressed { drone_id: u32 },
    /// A message was dropped by the channel model (packet loss or range gate).
    PacketDropped { sender_id: u32, receiver_id: u32 },
    /// A vehicle detected fire within sensor range.
    FireDetected { drone_id: u32, x: f64, y: f64, intensity: f64 },
    /// A suppression pulse was applied.
    SuppressionApplied { drone_id: u32, x: f64, y: f64, cells_affected: u32 },
    /// A vehicle transitioned to RETURN_TO_LAUNCH.
    ReturnToLaunchTriggered { drone_id: u32 },
    /// An observer's collision-risk query returned a non-empty alert set.
    CollisionRiskRaised { observer_id: u32, neighbor_id: u32, separation_m: f64 },
}

/// Alert for the streaming surface's alert queue, mirroring how the
/// rolling `MetricsSnapshot` reports aggregate counts while this reports
/// discrete, human-readable occurrences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
    pub tick: u64,
}
