//! Drone spawn factory: registers leaders and followers with the physics
//! engine and builds the matching per-vehicle agent side table.

use std::collections::BTreeMap;

use swarmfire_core::config::Config;
use swarmfire_core::enums::Role;
use swarmfire_core::error::EngineError;
use swarmfire_core::types::Pose;

use crate::agent::VehicleAgent;
use crate::engine::PhysicsEngine;

/// Spawn `swarm.num_leaders` + `swarm.num_followers` drones, docked in a
/// line along the grid's southern edge, and build their agent side table.
pub fn setup_swarm(
    engine: &mut PhysicsEngine,
    config: &Config,
) -> Result<BTreeMap<u32, VehicleAgent>, EngineError> {
    let mut agents = BTreeMap::new();
    let total = config.swarm.num_leaders + config.swarm.num_followers;
    let spacing = config.fire.cell_size_m.max(1.0) * 2.0;

    for i in 0..total {
        let role = if i < config.swarm.num_leaders { Role::Leader } else { Role::Follower };
        let dock_pose = Pose::new(spacing * i as f64, 0.0, 0.0);

        engine.register_drone(i, dock_pose, 100.0, config.agent.payload_max)?;

        agents.insert(
            i,
            VehicleAgent::new(
                i,
                role,
                dock_pose,
                config.sim.seed,
                config.swarm.detm_eta0,
                config.swarm.detm_lambda,
                Default::default(),
                config.observer.max_age_s,
                config.observer.min_separation_m,
            ),
        );
    }

    Ok(agents)
}
