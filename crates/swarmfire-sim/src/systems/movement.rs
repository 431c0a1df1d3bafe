//! Per-vehicle motion: computes the next pose from the current state and a
//! situation snapshot, then integrates it. Pure function, no ECS query —
//! the orchestrator supplies the inputs (it owns both the world and the
//! per-vehicle agent side table this needs).

use swarmfire_agent::search::SearchPolicy;
use swarmfire_core::constants::{LANDING_DESCENT_RATE_MPS, RTL_SPEED_MPS, TAKEOFF_CLIMB_RATE_MPS};
use swarmfire_core::enums::VehicleState;
use swarmfire_core::types::{Pose, Velocity};

/// Inputs a single vehicle's motion depends on for one tick.
pub struct MotionContext<'a> {
    pub state: VehicleState,
    pub pose: Pose,
    pub dock_pose: Pose,
    pub dt: f64,
    pub takeoff_altitude_m: f64,
    pub search_speed_mps: f64,
    pub search: &'a mut SearchPolicy,
}

/// Next `(pose, velocity, distance_flown_m)` for one vehicle, given its
/// current state. `distance_flown_m` feeds the energy step.
pub fn compute_motion(ctx: MotionContext) -> (Pose, Velocity, f64) {
    match ctx.state {
        VehicleState::Idle | VehicleState::Formation => (ctx.pose, Velocity::default(), 0.0),

        VehicleState::Takeoff => {
            let climb = (TAKEOFF_CLIMB_RATE_MPS * ctx.dt).min((ctx.takeoff_altitude_m - ctx.pose.z).max(0.0));
            let velocity = Velocity::new(0.0, 0.0, TAKEOFF_CLIMB_RATE_MPS);
            let pose = Pose::new(ctx.pose.x, ctx.pose.y, ctx.pose.z + climb);
            (pose, velocity, climb)
        }

        VehicleState::Search => {
            let (heading, step_len) = ctx.search.next_step();
            let speed = ctx.search_speed_mps.min(step_len / ctx.dt.max(1e-9));
            let velocity = Velocity::new(speed * heading.sin(), speed * heading.cos(), 0.0);
            let pose = ctx.pose + velocity * ctx.dt;
            (pose, velocity, speed * ctx.dt)
        }

        VehicleState::Suppress => (ctx.pose, Velocity::default(), 0.0),

        VehicleState::ReturnToLaunch => {
            let to_dock = Pose::new(ctx.dock_pose.x, ctx.dock_pose.y, ctx.pose.z);
            let remaining = ctx.pose.horizontal_distance_to(&to_dock);
            if remaining < 1e-6 {
                (ctx.pose, Velocity::default(), 0.0)
            } else {
                let travel = (RTL_SPEED_MPS * ctx.dt).min(remaining);
                let frac = travel / remaining;
                let velocity = Velocity::new(
                    (to_dock.x - ctx.pose.x) / ctx.dt.max(1e-9) * frac,
                    (to_dock.y - ctx.pose.y) / ctx.dt.max(1e-9) * frac,
                    0.0,
                );
                let pose = Pose::new(
                    ctx.pose.x + (to_dock.x - ctx.pose.x) * frac,
                    ctx.pose.y + (to_dock.y - ctx.pose.y) * frac,
                    ctx.pose.z,
                );
                (pose, velocity, travel)
            }
        }

        VehicleState::Land => {
            let descent = (LANDING_DESCENT_RATE_MPS * ctx.dt).min(ctx.pose.z.max(0.0));
            let velocity = Velocity::new(0.0, 0.0, -LANDING_DESCENT_RATE_MPS);
            let pose = Pose::new(ctx.dock_pose.x, ctx.dock_pose.y, (ctx.pose.z - descent).max(0.0));
            (pose, velocity, descent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn policy() -> SearchPolicy {
        SearchPolicy::new(ChaCha8Rng::seed_from_u64(7))
    }

    #[test]
    fn idle_vehicle_does_not_move() {
        let mut p = policy();
        let (pose, vel, dist) = compute_motion(MotionContext {
            state: VehicleState::Idle,
            pose: Pose::new(1.0, 2.0, 0.0),
            dock_pose: Pose::new(1.0, 2.0, 0.0),
            dt: 0.1,
            takeoff_altitude_m: 50.0,
            search_speed_mps: 8.0,
            search: &mut p,
        });
        assert_eq!(pose, Pose::new(1.0, 2.0, 0.0));
        assert_eq!(vel, Velocity::default());
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn takeoff_climbs_and_clamps_at_target_altitude() {
        let mut p = policy();
        let (pose, _, _) = compute_motion(MotionContext {
            state: VehicleState::Takeoff,
            pose: Pose::new(0.0, 0.0, 49.5),
            dock_pose: Pose::new(0.0, 0.0, 0.0),
            dt: 1.0,
            takeoff_altitude_m: 50.0,
            search_speed_mps: 8.0,
            search: &mut p,
        });
        assert!((pose.z - 50.0).abs() < 1e-9);
    }

    #[test]
    fn rtl_heads_toward_dock_and_stops_on_arrival() {
        let mut p = policy();
        let (pose, _, dist) = compute_motion(MotionContext {
            state: VehicleState::ReturnToLaunch,
            pose: Pose::new(0.0, 0.0, 50.0),
            dock_pose: Pose::new(0.0, 0.0, 0.0),
            dt: 0.1,
            takeoff_altitude_m: 50.0,
            search_speed_mps: 8.0,
            search: &mut p,
        });
        assert_eq!(pose, Pose::new(0.0, 0.0, 50.0));
        assert_eq!(dist, 0.0);
    }

    #[test]
    fn land_descends_toward_ground_and_snaps_to_dock_xy() {
        let mut p = policy();
        let (pose, _, _) = compute_motion(MotionContext {
            state: VehicleState::Land,
            pose: Pose::new(3.0, 4.0, 0.5),
            dock_pose: Pose::new(0.0, 0.0, 0.0),
            dt: 1.0,
            takeoff_altitude_m: 50.0,
            search_speed_mps: 8.0,
            search: &mut p,
        });
        assert_eq!(pose, Pose::new(0.0, 0.0, 0.0));
    }
}
