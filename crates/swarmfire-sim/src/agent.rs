//! VehicleAgent: the per-vehicle side-table entry the tick orchestrator
//! hands each vehicle's decentralized control logic.
//!
//! The physics engine owns canonical pose/battery/payload; this struct
//! owns everything a vehicle agent itself owns per the ownership split —
//! its ETM state, its observer, and its exploration RNG.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use swarmfire_agent::etm::EtmController;
use swarmfire_agent::observer::Observer;
use swarmfire_agent::search::{seed_for_drone, SearchPolicy};
use swarmfire_core::enums::{EtmNorm, Role, VehicleState};
use swarmfire_core::types::Pose;

pub struct VehicleAgent {
    pub id: u32,
    pub role: Role,
    pub dock_pose: Pose,
    pub state: VehicleState,
    pub state_entered_at: u64,
    pub etm: EtmController,
    pub observer: Observer,
    pub search: SearchPolicy,
}

impl VehicleAgent {
    pub fn new(
        id: u32,
        role: Role,
        dock_pose: Pose,
        config_seed: u64,
        etm_eta0: f64,
        etm_lambda: f64,
        etm_norm: EtmNorm,
        observer_max_age_s: f64,
        observer_min_separation_m: f64,
    ) -> Self {
        Self {
            id,
            role,
            dock_pose,
            state: VehicleState::Idle,
            state_entered_at: 0,
            etm: EtmController::new(etm_eta0, etm_lambda, etm_norm),
            observer: Observer::new(observer_max_age_s, observer_min_separation_m),
            search: SearchPolicy::new(ChaCha8Rng::seed_from_u64(seed_for_drone(config_seed, id))),
        }
    }

    pub fn transition_to(&mut self, state: VehicleState, tick: u64) {
        if state != self.state {
            self.state = state;
            self.state_entered_at = tick;
        }
    }
}
