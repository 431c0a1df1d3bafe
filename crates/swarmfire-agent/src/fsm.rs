//! Per-vehicle behavior finite state machine.
//!
//! A pure function that computes the next `VehicleState` from the current
//! one and a situation snapshot. No ECS dependency — operates on plain
//! data so the tick orchestrator can call it once per vehicle per tick.

use swarmfire_core::constants::FIRE_EPSILON;
use swarmfire_core::enums::VehicleState;

/// Input to the vehicle FSM for a single tick.
pub struct VehicleContext {
    pub state: VehicleState,
    pub battery_percent: f64,
    pub payload_remaining: f64,
    pub rtl_threshold_percent: f64,
    pub altitude_m: f64,
    pub takeoff_altitude_m: f64,
    pub takeoff_requested: bool,
    /// Local fire intensity sampled at the vehicle's current position.
    pub local_fire_intensity: f64,
    /// True if a fire was detected within sensor radius this tick.
    pub fire_detected_in_range: bool,
    pub within_landing_radius: bool,
    pub on_ground: bool,
}

impl VehicleContext {
    fn battery_critical(&self) -> bool {
        self.battery_percent <= self.rtl_threshold_percent || self.payload_remaining <= 0.0
    }
}

/// Evaluate one tick of the FSM. Returns the state the vehicle should be
/// in after this tick; the caller is responsible for any side effects
/// (suppression application, payload decrement) tied to the *current*
/// state before calling this.
pub fn evaluate(ctx: &VehicleContext) -> VehicleState {
    // RTL is a hard precondition: any state drops straight to RTL once the
    // battery or payload guard trips, overriding the state's own table.
    if matches!(
        ctx.state,
        VehicleState::Takeoff | VehicleState::Search | VehicleState::Formation | VehicleState::Suppress
    ) && ctx.battery_critical()
    {
        return VehicleState::ReturnToLaunch;
    }

    match ctx.state {
        VehicleState::Idle => {
            if ctx.takeoff_requested && ctx.battery_percent > ctx.rtl_threshold_percent {
                VehicleState::Takeoff
            } else {
                VehicleState::Idle
            }
        }
        VehicleState::Takeoff => {
            if ctx.altitude_m >= ctx.takeoff_altitude_m {
                VehicleState::Search
            } else {
                VehicleState::Takeoff
            }
        }
        VehicleState::Search => {
            if ctx.fire_detected_in_range && ctx.payload_remaining > 0.0 {
                VehicleState::Suppress
            } else {
                VehicleState::Search
            }
        }
        VehicleState::Formation => VehicleState::Formation,
        VehicleState::Suppress => {
            if ctx.local_fire_intensity < FIRE_EPSILON || ctx.payload_remaining <= 0.0 {
                if ctx.payload_remaining > 0.0 {
                    VehicleState::Search
                } else {
                    VehicleState::ReturnToLaunch
                }
            } else {
                VehicleState::Suppress
            }
        }
        VehicleState::ReturnToLaunch => {
            if ctx.within_landing_radius {
                VehicleState::Land
            } else {
                VehicleState::ReturnToLaunch
            }
        }
        VehicleState::Land => {
            if ctx.on_ground {
                VehicleState::Idle
            } else {
                VehicleState::Land
            }
        }
    }
}

/// Whether a sampled fire intensity clears the detection threshold. The
/// actual detection draw (probability `min(1, intensity)`) happens where
/// the exploration RNG lives, in the orchestrator.
pub fn is_detectable(intensity: f64, detection_threshold: f64) -> bool {
    intensity > detection_threshold
}
