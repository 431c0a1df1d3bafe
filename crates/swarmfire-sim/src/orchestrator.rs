//! Tick orchestrator: runs the fixed six-step tick in order and produces a
//! `WorldSnapshot`. Owns every piece of mutable state in the kernel.

use std::collections::BTreeMap;

use swarmfire_agent::fsm::{self, VehicleContext};
use swarmfire_core::commands::ExternalCommand;
use swarmfire_core::config::Config;
use swarmfire_core::constants::HOVER_DRAIN_PERCENT_PER_SEC;
use swarmfire_core::enums::{KernelPhase, MessageKind, VehicleState};
use swarmfire_core::error::{EngineError, KernelFault};
use swarmfire_core::events::{Alert, AlertLevel};
use swarmfire_core::state::WorldSnapshot;
use swarmfire_core::types::SimTime;

use crate::agent::VehicleAgent;
use crate::engine::PhysicsEngine;
use crate::messaging::{Message, MessageBus, Payload};
use crate::metrics::{MetricsAggregator, TickCounters};
use crate::systems::{movement, snapshot};
use crate::world_setup;

pub struct TickOrchestrator {
    config: Config,
    engine: PhysicsEngine,
    agents: BTreeMap<u32, VehicleAgent>,
    bus: MessageBus,
    metrics: MetricsAggregator,
    time: SimTime,
    phase: KernelPhase,
}

impl TickOrchestrator {
    pub fn new(config: Config) -> Result<Self, EngineError> {
        let mut engine = PhysicsEngine::new(&config);
        let agents = world_setup::setup_swarm(&mut engine, &config)?;
        Ok(Self {
            config,
            engine,
            agents,
            bus: MessageBus::new(),
            metrics: MetricsAggregator::new(),
            time: SimTime::default(),
            phase: KernelPhase::Stopped,
        })
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn phase(&self) -> KernelPhase {
        self.phase
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Apply one external command immediately. Commands are drained from
    /// the inbox and applied before the next tick runs.
    pub fn apply_command(&mut self, cmd: ExternalCommand) -> Result<(), EngineError> {
        match cmd {
            ExternalCommand::Start => self.phase = KernelPhase::Running,
            ExternalCommand::Stop | ExternalCommand::Shutdown => self.phase = KernelPhase::Stopped,
            ExternalCommand::Ignite { x, y, intensity } => {
                self.engine.ignite(x, y, intensity, self.time.tick)?;
            }
            ExternalCommand::Suppress { x, y, strength } => {
                self.engine.apply_suppression(x, y, strength)?;
            }
            ExternalCommand::RegisterDrone { id, x, y, z } => {
                let pose = swarmfire_core::types::Pose::new(x, y, z);
                self.engine.register_drone(id, pose, 100.0, self.config.agent.payload_max)?;
                self.agents.insert(
                    id,
                    VehicleAgent::new(
                        id,
                        Default::default(),
                        pose,
                        self.config.sim.seed,
                        self.config.swarm.detm_eta0,
                        self.config.swarm.detm_lambda,
                        Default::default(),
                        self.config.observer.max_age_s,
                        self.config.observer.min_separation_m,
                    ),
                );
            }
            ExternalCommand::UpdateConfig(update) => {
                self.config.apply_update(&update);
                for agent in self.agents.values_mut() {
                    if let Some(eta0) = update.detm_eta0 {
                        agent.etm.set_eta0(eta0);
                    }
                    if let Some(lambda) = update.detm_lambda {
                        agent.etm.set_lambda(lambda);
                    }
                }
            }
        }
        Ok(())
    }

    /// Run one tick: fire, vehicle control, channel, messaging, energy,
    /// metrics, in that fixed order. Returns the resulting snapshot
    /// regardless of `phase` (a stopped kernel still reports state).
    /// `Err` means a kernel invariant broke; the caller should stop
    /// ticking rather than publish a snapshot built on corrupted state.
    pub fn tick(&mut self) -> Result<WorldSnapshot, KernelFault> {
        if self.phase != KernelPhase::Running {
            return Ok(self.build_snapshot(Vec::new()));
        }

        let dt = self.config.sim.dt_s;
        self.time.advance(dt);
        let now = self.time.elapsed_secs;
        let tick = self.time.tick;

        let mut counters = TickCounters::default();
        let mut alerts = Vec::new();

        // 1. Fire step.
        self.engine.step_fire(dt, tick);

        // 2. Vehicle control step.
        let ids: Vec<u32> = self.agents.keys().copied().collect();
        for id in &ids {
            self.run_vehicle_control(*id, now, dt, &mut counters, &mut alerts);
        }

        // 3. Channel update.
        self.engine.update_channel(now);

        // 4. Messaging step.
        self.run_messaging_step(now, &mut counters);

        // 5. Energy step.
        for id in &ids {
            self.run_energy_step(*id, dt);
        }

        // Collision-risk alerts, from each vehicle's own observer.
        for id in &ids {
            self.raise_collision_alerts(*id, now, &mut alerts);
        }

        counters.drones_rtl = self.agents.values().filter(|a| a.state == VehicleState::ReturnToLaunch).count() as u32;
        counters.drones_landed = self
            .agents
            .values()
            .filter(|a| a.state == VehicleState::Idle && a.state_entered_at == tick)
            .count() as u32;
        let total_cells = (self.config.fire.grid_width * self.config.fire.grid_height).max(1) as f64;
        counters.area_contained_fraction = self.engine.fire_burned_out_count() as f64 / total_cells;

        let total_intensity = self.engine.fire_total_intensity();
        if total_intensity < 0.0 {
            return Err(KernelFault::FireGridCorrupted(format!(
                "total fire intensity went negative: {total_intensity}"
            )));
        }

        // 6. Metrics snapshot.
        let metrics = self.metrics.record(counters);

        Ok(self.build_snapshot_with(metrics, alerts))
    }

    fn run_vehicle_control(&mut self, id: u32, now: f64, dt: f64, counters: &mut TickCounters, alerts: &mut Vec<Alert>) {
        let Ok(pose) = self.engine.pose(id) else { return };
        let Ok(battery_percent) = self.engine.battery(id) else { return };
        let Ok(payload_remaining) = self.engine.payload(id) else { return };
        let Some(agent) = self.agents.get_mut(&id) else { return };
        let dock_pose = agent.dock_pose;

        let local_fire_intensity = self.engine.sample_intensity(pose.x, pose.y);
        let detectable = fsm::is_detectable(local_fire_intensity, self.config.agent.detection_threshold);
        let fire_detected_in_range = detectable && agent.search.roll_detection(local_fire_intensity);

        let ctx = VehicleContext {
            state: agent.state,
            battery_percent,
            payload_remaining,
            rtl_threshold_percent: self.config.swarm.rtl_threshold_percent,
            altitude_m: pose.z,
            takeoff_altitude_m: self.config.agent.takeoff_altitude_m,
            takeoff_requested: true,
            local_fire_intensity,
            fire_detected_in_range,
            within_landing_radius: pose.horizontal_distance_to(&dock_pose) <= self.config.agent.landing_radius_m,
            on_ground: pose.z <= 0.0,
        };
        let previous_state = agent.state;
        let next_state = fsm::evaluate(&ctx);
        agent.transition_to(next_state, self.time.tick);

        let (new_pose, new_velocity, distance) = movement::compute_motion(movement::MotionContext {
            state: agent.state,
            pose,
            dock_pose,
            dt,
            takeoff_altitude_m: self.config.agent.takeoff_altitude_m,
            search_speed_mps: self.config.agent.search_speed_mps,
            search: &mut agent.search,
        });
        let _ = self.engine.set_pose(id, new_pose);
        let _ = self.engine.set_velocity(id, new_velocity);
        let _ = self.engine.set_flight_distance(id, distance);

        if agent.state == VehicleState::Suppress {
            let _ = self.engine.apply_suppression(new_pose.x, new_pose.y, self.config.agent.suppression_strength);
            let _ = self.engine.drain_payload(id, self.config.agent.suppression_strength * dt);
            counters.suppression_events += 1;
        }

        if next_state == VehicleState::ReturnToLaunch && previous_state != VehicleState::ReturnToLaunch {
            alerts.push(Alert {
                level: AlertLevel::Warning,
                message: format!("drone {id} returning to launch"),
                tick: self.time.tick,
            });
        }

        if fire_detected_in_range {
            self.queue_broadcast(
                id,
                now,
                MessageKind::FireDetection,
                Payload::FireDetection { x: new_pose.x, y: new_pose.y, intensity: local_fire_intensity },
                counters,
            );
        }
    }

    fn run_messaging_step(&mut self, now: f64, counters: &mut TickCounters) {
        for id in self.agents.keys().copied().collect::<Vec<_>>() {
            let Ok(pose) = self.engine.pose(id) else { continue };
            let Ok(velocity) = self.engine.velocity(id) else { continue };
            let should_transmit = self
                .agents
                .get_mut(&id)
                .map(|agent| agent.etm.should_transmit(pose, now))
                .unwrap_or(false);

            if should_transmit {
                counters.messages_sent += 1;
                self.queue_broadcast(id, now, MessageKind::Telemetry, Payload::Telemetry { pose, velocity }, counters);
            } else {
                counters.messages_suppressed += 1;
            }
        }

        let delivered = self.bus.drain_deliverable(now);
        for message in delivered {
            if let Payload::Telemetry { pose, velocity } = message.payload {
                if let Some(receiver) = self.agents.get_mut(&message.receiver_id) {
                    receiver.observer.observe(message.sender_id, pose, velocity, message.deliver_time);
                }
            }
        }
    }

    fn queue_broadcast(
        &mut self,
        sender_id: u32,
        now: f64,
        kind: MessageKind,
        payload: Payload,
        counters: &mut TickCounters,
    ) {
        let receiver_ids: Vec<u32> = self.agents.keys().copied().filter(|&id| id != sender_id).collect();
        for receiver_id in receiver_ids {
            if self.engine.roll_packet_loss(sender_id, receiver_id) {
                counters.messages_dropped += 1;
                continue;
            }
            let latency = self.engine.link_latency_s(sender_id, receiver_id).unwrap_or(0.0);
            self.bus.push(Message {
                sender_id,
                receiver_id,
                send_time: now,
                deliver_time: now + latency,
                kind,
                payload: payload.clone(),
            });
        }
    }

    fn run_energy_step(&mut self, id: u32, dt: f64) {
        let Ok(pose) = self.engine.pose(id) else { return };
        let Ok(distance) = self.engine.flight_distance_this_tick(id) else { return };

        let flight_drain_percent =
            distance * self.config.swarm.energy_drain_per_meter / self.config.swarm.battery_capacity_mah * 100.0;
        let hover_drain_percent = if distance < 1e-9 && pose.z > 0.0 { HOVER_DRAIN_PERCENT_PER_SEC * dt } else { 0.0 };
        let _ = self.engine.drain_battery(id, flight_drain_percent + hover_drain_percent);
    }

    fn raise_collision_alerts(&mut self, id: u32, now: f64, alerts: &mut Vec<Alert>) {
        let Ok(pose) = self.engine.pose(id) else { return };
        let Some(agent) = self.agents.get(&id) else { return };
        for (neighbor_id, prediction) in agent.observer.collision_risks(pose, now) {
            alerts.push(Alert {
                level: AlertLevel::Critical,
                message: format!("drone {id} within separation threshold of drone {neighbor_id}"),
                tick: self.time.tick,
            });
            let _ = prediction;
        }
    }

    fn build_snapshot(&self, alerts: Vec<Alert>) -> WorldSnapshot {
        snapshot::build_snapshot(&self.engine, &self.agents, self.time, self.phase, self.metrics.latest(), alerts)
    }

    fn build_snapshot_with(&self, metrics: swarmfire_core::state::MetricsSnapshot, alerts: Vec<Alert>) -> WorldSnapshot {
        snapshot::build_snapshot(&self.engine, &self.agents, self.time, self.phase, metrics, alerts)
    }
}
