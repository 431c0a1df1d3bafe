//! Snapshot system: builds a complete WorldSnapshot from engine + agent
//! state. Read-only — never mutates anything it's handed.

use swarmfire_core::events::Alert;
use swarmfire_core::state::{BurningCell, DroneView, FireSummary, MetricsSnapshot, WorldSnapshot};
use swarmfire_core::enums::KernelPhase;
use swarmfire_core::types::SimTime;

use crate::agent::VehicleAgent;
use crate::engine::PhysicsEngine;

pub fn build_snapshot(
    engine: &PhysicsEngine,
    agents: &std::collections::BTreeMap<u32, VehicleAgent>,
    time: SimTime,
    phase: KernelPhase,
    metrics: MetricsSnapshot,
    alerts: Vec<Alert>,
) -> WorldSnapshot {
    WorldSnapshot {
        time,
        phase,
        drones: build_drones(engine, agents),
        fire: build_fire_summary(engine),
        burning_cells: engine
            .burning_cells()
            .into_iter()
            .map(|(x, y, intensity)| BurningCell { x, y, intensity })
            .collect(),
        metrics,
        alerts,
    }
}

fn build_drones(engine: &PhysicsEngine, agents: &std::collections::BTreeMap<u32, VehicleAgent>) -> Vec<DroneView> {
    agents
        .values()
        .filter_map(|agent| {
            let pose = engine.pose(agent.id).ok()?;
            let battery_percent = engine.battery(agent.id).ok()?;
            let payload_remaining = engine.payload(agent.id).ok()?;
            Some(DroneView {
                id: agent.id,
                role: agent.role,
                state: agent.state,
                pose,
                battery_percent,
                payload_remaining,
            })
        })
        .collect()
}

fn build_fire_summary(engine: &PhysicsEngine) -> FireSummary {
    let summary = engine.fire_summary();
    FireSummary {
        burning_cells: summary.burning_count,
        burned_out_cells: engine.fire_burned_out_count(),
        total_intensity: engine.fire_total_intensity(),
        contained: summary.burning_count == 0 && engine.fire_burned_out_count() > 0,
    }
}
