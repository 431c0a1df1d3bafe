//! Physics engine — the authoritative world container.
//!
//! Owns the hecs world of drone entities, the fire grid, and the channel
//! table. The single source of truth every vehicle agent reads through;
//! agents never hold a mutable reference to it, only narrow typed
//! operations routed through the tick orchestrator.

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use swarmfire_channel::ChannelTable;
use swarmfire_core::components::{Battery, DockPose, DroneId, FlightDistance, Payload};
use swarmfire_core::config::Config;
use swarmfire_core::error::EngineError;
use swarmfire_core::types::{Pose, Velocity};
use swarmfire_fire::{FireGrid, FireSummary, Wind};

/// Owns world state. `step_fire`/`update_channel` are the only two
/// operations that advance randomness; both are driven by the tick
/// orchestrator in the order the per-tick contract requires.
pub struct PhysicsEngine {
    world: World,
    fire: FireGrid,
    channel: ChannelTable,
    wind: Wind,
    fire_rng: ChaCha8Rng,
    spread_rate_mpm: f64,
    suppression_effectiveness: f64,
    by_id: std::collections::HashMap<u32, Entity>,
}

impl PhysicsEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            world: World::new(),
            fire: FireGrid::new(config.fire.grid_width, config.fire.grid_height, config.fire.cell_size_m, 1.0),
            channel: ChannelTable::new(
                config.sim.seed.wrapping_add(1),
                config.channel.path_loss_exponent,
                config.channel.max_broadcast_range_m,
            ),
            wind: Wind::calm(),
            fire_rng: ChaCha8Rng::seed_from_u64(config.sim.seed),
            spread_rate_mpm: config.fire.spread_rate_mpm,
            suppression_effectiveness: config.fire.suppression_effectiveness,
            by_id: std::collections::HashMap::new(),
        }
    }

    pub fn set_wind(&mut self, wind: Wind) {
        self.wind = wind;
    }

    pub fn register_drone(
        &mut self,
        id: u32,
        pose: Pose,
        battery_capacity_percent: f64,
        payload_max: f64,
    ) -> Result<Entity, EngineError> {
        if self.by_id.contains_key(&id) {
            return Err(EngineError::DuplicateDrone(id));
        }
        let entity = self.world.spawn((
            DroneId(id),
            pose,
            Velocity::default(),
            Battery { percent: battery_capacity_percent },
            Payload { remaining: payload_max, max: payload_max },
            FlightDistance::default(),
            DockPose(pose),
        ));
        self.by_id.insert(id, entity);
        Ok(entity)
    }

    fn entity_of(&self, id: u32) -> Result<Entity, EngineError> {
        self.by_id.get(&id).copied().ok_or(EngineError::UnknownDrone(id))
    }

    pub fn drone_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.by_id.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn pose(&self, id: u32) -> Result<Pose, EngineError> {
        let e = self.entity_of(id)?;
        self.world.get::<&Pose>(e).map(|p| *p).map_err(|_| EngineError::UnknownDrone(id))
    }

    pub fn velocity(&self, id: u32) -> Result<Velocity, EngineError> {
        let e = self.entity_of(id)?;
        self.world.get::<&Velocity>(e).map(|v| *v).map_err(|_| EngineError::UnknownDrone(id))
    }

    pub fn battery(&self, id: u32) -> Result<f64, EngineError> {
        let e = self.entity_of(id)?;
        self.world.get::<&Battery>(e).map(|b| b.percent).map_err(|_| EngineError::UnknownDrone(id))
    }

    pub fn payload(&self, id: u32) -> Result<f64, EngineError> {
        let e = self.entity_of(id)?;
        self.world.get::<&Payload>(e).map(|p| p.remaining).map_err(|_| EngineError::UnknownDrone(id))
    }

    pub fn dock_pose(&self, id: u32) -> Result<Pose, EngineError> {
        let e = self.entity_of(id)?;
        self.world.get::<&DockPose>(e).map(|d| d.0).map_err(|_| EngineError::UnknownDrone(id))
    }

    pub fn set_pose(&mut self, id: u32, pose: Pose) -> Result<(), EngineError> {
        let e = self.entity_of(id)?;
        *self.world.get::<&mut Pose>(e).map_err(|_| EngineError::UnknownDrone(id))? = pose;
        Ok(())
    }

    pub fn set_velocity(&mut self, id: u32, velocity: Velocity) -> Result<(), EngineError> {
        let e = self.entity_of(id)?;
        *self.world.get::<&mut Velocity>(e).map_err(|_| EngineError::UnknownDrone(id))? = velocity;
        Ok(())
    }

    pub fn set_flight_distance(&mut self, id: u32, meters: f64) -> Result<(), EngineError> {
        let e = self.entity_of(id)?;
        self.world.get::<&mut FlightDistance>(e).map_err(|_| EngineError::UnknownDrone(id))?.meters_this_tick = meters;
        Ok(())
    }

    pub fn drain_battery(&mut self, id: u32, percent: f64) -> Result<(), EngineError> {
        let e = self.entity_of(id)?;
        let mut b = self.world.get::<&mut Battery>(e).map_err(|_| EngineError::UnknownDrone(id))?;
        b.percent = (b.percent - percent).max(0.0);
        Ok(())
    }

    pub fn drain_payload(&mut self, id: u32, amount: f64) -> Result<(), EngineError> {
        let e = self.entity_of(id)?;
        let mut p = self.world.get::<&mut Payload>(e).map_err(|_| EngineError::UnknownDrone(id))?;
        p.remaining = (p.remaining - amount).max(0.0);
        Ok(())
    }

    /// Meters flown during the current tick, as recorded by the movement
    /// step. The accurate per-tick figure — unlike a `velocity * dt`
    /// recompute, it isn't skewed by the altitude-clamped takeoff tick.
    pub fn flight_distance_this_tick(&self, id: u32) -> Result<f64, EngineError> {
        let e = self.entity_of(id)?;
        self.world
            .get::<&FlightDistance>(e)
            .map(|f| f.meters_this_tick)
            .map_err(|_| EngineError::UnknownDrone(id))
    }

    pub fn sample_intensity(&self, x_m: f64, y_m: f64) -> f64 {
        self.fire.sample_intensity(x_m, y_m)
    }

    pub fn ignite(&mut self, x_m: f64, y_m: f64, intensity: f64, tick: u64) -> Result<(), EngineError> {
        self.fire.ignite(x_m, y_m, intensity, tick)
    }

    pub fn apply_suppression(&mut self, x_m: f64, y_m: f64, strength: f64) -> Result<(), EngineError> {
        self.fire.apply_suppression(x_m, y_m, strength)
    }

    pub fn fire_summary(&self) -> FireSummary {
        self.fire.summary()
    }

    pub fn fire_burned_out_count(&self) -> u32 {
        self.fire.burned_out_count()
    }

    pub fn fire_total_intensity(&self) -> f64 {
        self.fire.total_intensity()
    }

    /// Currently burning cells, in world coordinates, for the fire-state
    /// REST endpoint. Row-major order.
    pub fn burning_cells(&self) -> Vec<(f64, f64, f64)> {
        let cell_size = self.fire.cell_size_m();
        self.fire
            .iter_burning()
            .map(|(gx, gy, intensity)| (gx as f64 * cell_size, gy as f64 * cell_size, intensity))
            .collect()
    }

    /// Advance the fire grid one step, per the tick order's fire step.
    pub fn step_fire(&mut self, dt: f64, tick: u64) {
        swarmfire_fire::spread::step(
            &mut self.fire,
            &self.wind,
            dt,
            self.spread_rate_mpm,
            self.suppression_effectiveness,
            tick,
            &mut self.fire_rng,
        );
    }

    /// Recompute every directed link's RSSI/latency/loss, per the tick
    /// order's channel-update step.
    pub fn update_channel(&mut self, now_s: f64) {
        let ids = self.drone_ids();
        for &i in &ids {
            let Ok(pose_i) = self.pose(i) else { continue };
            for &j in &ids {
                if i == j {
                    continue;
                }
                let Ok(pose_j) = self.pose(j) else { continue };
                let distance = pose_i.distance_to(&pose_j);
                self.channel.update(i, j, distance, now_s);
            }
        }
    }

    /// Latest RSSI for a directed link, a pure read with no RNG side
    /// effect. `UnknownDrone` if the link was never updated. A drone's
    /// link to itself is the sentinel max (+inf), never gated on an
    /// `update_channel` pass.
    pub fn rssi(&self, sender_id: u32, receiver_id: u32) -> Result<f64, EngineError> {
        self.channel.rssi(sender_id, receiver_id)
    }

    pub fn link_packet_loss_prob(&self, sender_id: u32, receiver_id: u32) -> Option<f64> {
        self.channel.link(sender_id, receiver_id).map(|l| l.packet_loss_prob)
    }

    pub fn link_latency_s(&self, sender_id: u32, receiver_id: u32) -> Option<f64> {
        if sender_id == receiver_id {
            return Some(0.0);
        }
        self.channel.link(sender_id, receiver_id).map(|l| l.latency_s)
    }

    pub fn roll_packet_loss(&mut self, sender_id: u32, receiver_id: u32) -> bool {
        self.channel.roll_packet_loss(sender_id, receiver_id)
    }
}
