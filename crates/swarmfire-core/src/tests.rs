#[cfg(test)]
mod tests {
    use crate::commands::{ConfigUpdate, ExternalCommand};
    use crate::enums::*;
    use crate::events::{Alert, SimEvent};
    use crate::state::WorldSnapshot;
    use crate::types::{Pose, SimTime, Velocity};

    /// Verify the lifecycle/role/state enums round-trip through serde_json.
    #[test]
    fn test_role_serde() {
        for v in [Role::Leader, Role::Follower] {
            let json = serde_json::to_string(&v).unwrap();
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_vehicle_state_serde() {
        let variants = vec![
            VehicleState::Idle,
            VehicleState::Takeoff,
            VehicleState::Search,
            VehicleState::Formation,
            VehicleState::Suppress,
            VehicleState::ReturnToLaunch,
            VehicleState::Land,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: VehicleState = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_etm_norm_serde_is_snake_case() {
        let json = serde_json::to_string(&EtmNorm::LInfinity).unwrap();
        assert_eq!(json, "\"l_infinity\"");
        let back: EtmNorm = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EtmNorm::LInfinity);
    }

    /// Verify ExternalCommand round-trips through serde (tagged union).
    #[test]
    fn test_external_command_serde() {
        let commands = vec![
            ExternalCommand::Start,
            ExternalCommand::Stop,
            ExternalCommand::Ignite { x: 10.0, y: 20.0, intensity: 0.5 },
            ExternalCommand::Suppress { x: 10.0, y: 20.0, strength: 0.8 },
            ExternalCommand::RegisterDrone { id: 1, x: 0.0, y: 0.0, z: 0.0 },
            ExternalCommand::UpdateConfig(ConfigUpdate {
                detm_eta0: Some(2.0),
                detm_lambda: None,
                rtl_threshold_percent: None,
            }),
            ExternalCommand::Shutdown,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: ExternalCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    /// Verify SimEvent round-trips through serde.
    #[test]
    fn test_sim_event_serde() {
        let events = vec![
            SimEvent::TelemetrySent { drone_id: 3 },
            SimEvent::FireDetected { drone_id: 3, x: 1.0, y: 2.0, intensity: 0.4 },
            SimEvent::CollisionRiskRaised {
                observer_id: 1,
                neighbor_id: 2,
                separation_m: 4.0,
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let _back: SimEvent = serde_json::from_str(&json).unwrap();
        }
    }

    /// Verify Alert round-trips through serde.
    #[test]
    fn test_alert_serde() {
        let alert = Alert {
            level: AlertLevel::Critical,
            message: "drone 4 below RTL threshold".to_string(),
            tick: 1000,
        };
        let json = serde_json::to_string(&alert).unwrap();
        let back: Alert = serde_json::from_str(&json).unwrap();
        assert_eq!(alert.message, back.message);
        assert_eq!(alert.tick, back.tick);
    }

    /// Verify WorldSnapshot can be serialized to JSON.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = WorldSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
        assert!(
            json.len() < 1024,
            "empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_pose_distance() {
        let a = Pose::new(0.0, 0.0, 0.0);
        let b = Pose::new(3.0, 4.0, 0.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
        assert!((a.horizontal_distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_pose_bearing() {
        let origin = Pose::new(0.0, 0.0, 0.0);

        let north = Pose::new(0.0, 100.0, 0.0);
        assert!((origin.bearing_to(&north) - 0.0).abs() < 1e-10);

        let east = Pose::new(100.0, 0.0, 0.0);
        let expected_east = std::f64::consts::FRAC_PI_2;
        assert!(
            (origin.bearing_to(&east) - expected_east).abs() < 1e-10,
            "east bearing should be PI/2, got {}",
            origin.bearing_to(&east)
        );
    }

    #[test]
    fn test_velocity_speed() {
        let v = Velocity::new(3.0, 4.0, 0.0);
        assert!((v.speed() - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_velocity_heading() {
        let north = Velocity::new(0.0, 10.0, 0.0);
        assert!((north.heading() - 0.0).abs() < 1e-10);

        let east = Velocity::new(10.0, 0.0, 0.0);
        let expected = std::f64::consts::FRAC_PI_2;
        assert!((east.heading() - expected).abs() < 1e-10);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        assert_eq!(time.tick, 0);
        assert_eq!(time.elapsed_secs, 0.0);

        for _ in 0..30 {
            time.advance(0.1);
        }
        assert_eq!(time.tick, 30);
        assert!((time.elapsed_secs - 3.0).abs() < 1e-10);
    }
}
