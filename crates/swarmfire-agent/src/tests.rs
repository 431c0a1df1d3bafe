#[cfg(test)]
mod tests {
    use swarmfire_core::enums::{EtmNorm, VehicleState};
    use swarmfire_core::types::{Pose, Velocity};

    use crate::etm::EtmController;
    use crate::fsm::{evaluate, VehicleContext};
    use crate::observer::Observer;

    fn idle_ctx() -> VehicleContext {
        VehicleContext {
            state: VehicleState::Idle,
            battery_percent: 100.0,
            payload_remaining: 20.0,
            rtl_threshold_percent: 20.0,
            altitude_m: 0.0,
            takeoff_altitude_m: 50.0,
            takeoff_requested: false,
            local_fire_intensity: 0.0,
            fire_detected_in_range: false,
            within_landing_radius: false,
            on_ground: true,
        }
    }

    #[test]
    fn idle_stays_idle_without_takeoff_request() {
        let ctx = idle_ctx();
        assert_eq!(evaluate(&ctx), VehicleState::Idle);
    }

    #[test]
    fn idle_refuses_takeoff_below_rtl_threshold() {
        let mut ctx = idle_ctx();
        ctx.takeoff_requested = true;
        ctx.battery_percent = 10.0;
        assert_eq!(evaluate(&ctx), VehicleState::Idle);
    }

    #[test]
    fn full_mission_happy_path() {
        let mut ctx = idle_ctx();
        ctx.takeoff_requested = true;
        assert_eq!(evaluate(&ctx), VehicleState::Takeoff);

        ctx.state = VehicleState::Takeoff;
        ctx.altitude_m = 25.0;
        assert_eq!(evaluate(&ctx), VehicleState::Takeoff);
        ctx.altitude_m = 50.0;
        assert_eq!(evaluate(&ctx), VehicleState::Search);

        ctx.state = VehicleState::Search;
        ctx.fire_detected_in_range = true;
        assert_eq!(evaluate(&ctx), VehicleState::Suppress);

        ctx.state = VehicleState::Suppress;
        ctx.local_fire_intensity = 0.5;
        assert_eq!(evaluate(&ctx), VehicleState::Suppress);
        ctx.local_fire_intensity = 0.0;
        assert_eq!(evaluate(&ctx), VehicleState::Search);

        ctx.state = VehicleState::ReturnToLaunch;
        ctx.within_landing_radius = true;
        assert_eq!(evaluate(&ctx), VehicleState::Land);

        ctx.state = VehicleState::Land;
        ctx.on_ground = true;
        assert_eq!(evaluate(&ctx), VehicleState::Idle);
    }

    #[test]
    fn low_battery_forces_rtl_from_any_active_state() {
        for state in [
            VehicleState::Takeoff,
            VehicleState::Search,
            VehicleState::Formation,
            VehicleState::Suppress,
        ] {
            let mut ctx = idle_ctx();
            ctx.state = state;
            ctx.battery_percent = 15.0;
            assert_eq!(evaluate(&ctx), VehicleState::ReturnToLaunch, "state {state:?} should force RTL");
        }
    }

    #[test]
    fn empty_payload_forces_rtl_from_suppress() {
        let mut ctx = idle_ctx();
        ctx.state = VehicleState::Suppress;
        ctx.payload_remaining = 0.0;
        assert_eq!(evaluate(&ctx), VehicleState::ReturnToLaunch);
    }

    /// ETM never transmits on an unbounded growth path, and the first
    /// observation is always a transmission.
    #[test]
    fn etm_always_transmits_first_observation() {
        let mut etm = EtmController::new(1.0, 0.5, EtmNorm::L2);
        assert!(etm.should_transmit(Pose::new(0.0, 0.0, 0.0), 0.0));
        assert_eq!(etm.total_transmissions(), 1);
    }

    /// A stationary vehicle repeatedly sampled at the same pose suppresses
    /// every subsequent tick, since the error term is always zero.
    #[test]
    fn etm_suppresses_a_stationary_vehicle() {
        let mut etm = EtmController::new(1.0, 0.5, EtmNorm::L2);
        assert!(etm.should_transmit(Pose::new(5.0, 5.0, 0.0), 0.0));
        for t in 1..20 {
            assert!(!etm.should_transmit(Pose::new(5.0, 5.0, 0.0), t as f64 * 0.1));
        }
        assert_eq!(etm.total_suppressed(), 19);
    }

    /// A vehicle moving fast enough eventually re-triggers even though the
    /// threshold is decaying toward its floor, since the decaying
    /// threshold only ever shrinks the gap a moving vehicle must close.
    #[test]
    fn etm_eventually_retriggers_for_a_moving_vehicle() {
        let mut etm = EtmController::new(1.0, 0.5, EtmNorm::L2);
        assert!(etm.should_transmit(Pose::new(0.0, 0.0, 0.0), 0.0));
        let mut retriggered = false;
        for i in 1..50 {
            let t = i as f64 * 0.1;
            let pose = Pose::new(0.05 * i as f64, 0.0, 0.0);
            if etm.should_transmit(pose, t) {
                retriggered = true;
                break;
            }
        }
        assert!(retriggered, "a moving vehicle should eventually cross the decaying threshold");
    }

    #[test]
    fn etm_threshold_floors_at_eta_min() {
        let etm = EtmController::new(1.0, 0.5, EtmNorm::L2);
        let decayed = etm.threshold(1000.0);
        assert!((decayed - swarmfire_core::constants::ETM_ETA_MIN).abs() < 1e-12);
    }

    /// Two vehicles converging head-on: A at (0,0,10) heading +x at 3 m/s,
    /// B at (20,0,10) heading -x at 3 m/s. Only the initial telemetry
    /// exchange happens at t=0; A's observer must predict B's closing
    /// position and raise a collision alert once predicted separation
    /// drops below the 10 m minimum, between t=2.8s and t=3.2s.
    #[test]
    fn observer_predicts_closing_collision() {
        let mut observer = Observer::new(0.5, 10.0);
        observer.observe(2, Pose::new(20.0, 0.0, 10.0), Velocity::new(-3.0, 0.0, 0.0), 0.0);

        let self_pose = Pose::new(0.0, 0.0, 10.0);
        let mut trigger_time = None;
        let mut t = 0.0;
        while t <= 5.0 {
            let risks = observer.collision_risks(self_pose, t);
            if !risks.is_empty() {
                trigger_time = Some(t);
                break;
            }
            t += 0.01;
        }

        let trigger = trigger_time.expect("collision alert should fire within the simulated window");
        assert!(trigger >= 2.8 && trigger <= 3.2, "alert fired at t={trigger}, expected in [2.8, 3.2]");
    }

    #[test]
    fn observer_confidence_decays_and_floors_to_zero_past_max_age() {
        let mut observer = Observer::new(0.5, 10.0);
        observer.observe(1, Pose::new(0.0, 0.0, 0.0), Velocity::new(0.0, 0.0, 0.0), 0.0);

        let at_zero = observer.predict(1, 0.0).unwrap();
        assert!((at_zero.confidence - 1.0).abs() < 1e-9);

        let at_max = observer.predict(1, 0.5).unwrap();
        assert!((at_max.confidence - 0.2).abs() < 1e-9);

        let stale = observer.predict(1, 1.0).unwrap();
        assert_eq!(stale.confidence, 0.0);
    }

    #[test]
    fn observer_missing_neighbor_returns_none_never_panics() {
        let observer = Observer::new(0.5, 10.0);
        assert!(observer.predict(99, 1.0).is_none());
        assert!(observer.collision_risks(Pose::new(0.0, 0.0, 0.0), 1.0).is_empty());
    }
}
