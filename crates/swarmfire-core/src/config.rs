//! Hierarchical configuration, loaded from TOML at startup and partially
//! hot-reloadable via [`crate::commands::ConfigUpdate`].

use serde::{Deserialize, Serialize};

use crate::commands::ConfigUpdate;
use crate::constants::*;

/// Top-level configuration tree. Each section mirrors a constants group;
/// a missing TOML table falls back to that group's defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sim: SimConfig,
    pub swarm: SwarmConfig,
    pub fire: FireConfig,
    pub channel: ChannelConfig,
    pub observer: ObserverConfig,
    pub agent: AgentConfig,
    pub server: ServerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sim: SimConfig::default(),
            swarm: SwarmConfig::default(),
            fire: FireConfig::default(),
            channel: ChannelConfig::default(),
            observer: ObserverConfig::default(),
            agent: AgentConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Apply a hot-reloadable override at a tick boundary. Fields left
    /// `None` are left unchanged.
    pub fn apply_update(&mut self, update: &ConfigUpdate) {
        if let Some(eta0) = update.detm_eta0 {
            self.swarm.detm_eta0 = eta0;
        }
        if let Some(lambda) = update.detm_lambda {
            self.swarm.detm_lambda = lambda;
        }
        if let Some(pct) = update.rtl_threshold_percent {
            self.swarm.rtl_threshold_percent = pct;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub dt_s: f64,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { dt_s: DEFAULT_DT, seed: DEFAULT_SEED }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmConfig {
    pub num_leaders: u32,
    pub num_followers: u32,
    pub detm_eta0: f64,
    pub detm_lambda: f64,
    pub battery_capacity_mah: f64,
    pub energy_drain_per_meter: f64,
    pub rtl_threshold_percent: f64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            num_leaders: DEFAULT_NUM_LEADERS,
            num_followers: DEFAULT_NUM_FOLLOWERS,
            detm_eta0: DEFAULT_ETM_ETA0,
            detm_lambda: DEFAULT_ETM_LAMBDA,
            battery_capacity_mah: DEFAULT_BATTERY_CAPACITY_MAH,
            energy_drain_per_meter: DEFAULT_ENERGY_DRAIN_PER_METER,
            rtl_threshold_percent: DEFAULT_RTL_THRESHOLD_PERCENT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub cell_size_m: f64,
    pub spread_rate_mpm: f64,
    pub suppression_effectiveness: f64,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            cell_size_m: DEFAULT_CELL_SIZE_M,
            spread_rate_mpm: DEFAULT_SPREAD_RATE_MPM,
            suppression_effectiveness: DEFAULT_SUPPRESSION_EFFECTIVENESS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    pub path_loss_exponent: f64,
    pub rice_k_factor: f64,
    pub max_broadcast_range_m: f64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            path_loss_exponent: DEFAULT_PATH_LOSS_EXPONENT,
            rice_k_factor: DEFAULT_RICE_K_FACTOR,
            max_broadcast_range_m: DEFAULT_MAX_BROADCAST_RANGE_M,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    pub max_age_s: f64,
    pub min_separation_m: f64,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            max_age_s: DEFAULT_OBSERVER_MAX_AGE_S,
            min_separation_m: DEFAULT_MIN_SEPARATION_M,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub payload_max: f64,
    pub detection_threshold: f64,
    pub suppression_strength: f64,
    pub sensor_radius_m: f64,
    pub takeoff_altitude_m: f64,
    pub landing_radius_m: f64,
    pub search_speed_mps: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            payload_max: DEFAULT_PAYLOAD_MAX,
            detection_threshold: DEFAULT_DETECTION_THRESHOLD,
            suppression_strength: DEFAULT_SUPPRESSION_STRENGTH,
            sensor_radius_m: DEFAULT_SENSOR_RADIUS_M,
            takeoff_altitude_m: DEFAULT_TAKEOFF_ALTITUDE_M,
            landing_radius_m: DEFAULT_LANDING_RADIUS_M,
            search_speed_mps: DEFAULT_SEARCH_SPEED_MPS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub rest_port: u16,
    pub ws_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { rest_port: 8080, ws_port: 8081 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let cfg = Config::default();
        let text = toml::to_string(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(back.sim.seed, cfg.sim.seed);
        assert_eq!(back.swarm.num_leaders, cfg.swarm.num_leaders);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let text = "[swarm]\nnum_leaders = 5\n";
        let cfg: Config = toml::from_str(text).unwrap();
        assert_eq!(cfg.swarm.num_leaders, 5);
        assert_eq!(cfg.swarm.num_followers, DEFAULT_NUM_FOLLOWERS);
        assert_eq!(cfg.fire.grid_width, DEFAULT_GRID_WIDTH);
    }

    #[test]
    fn apply_update_overrides_only_present_fields() {
        let mut cfg = Config::default();
        let original_lambda = cfg.swarm.detm_lambda;
        cfg.apply_update(&ConfigUpdate {
            detm_eta0: Some(3.5),
            detm_lambda: None,
            rtl_threshold_percent: None,
        });
        assert_eq!(cfg.swarm.detm_eta0, 3.5);
        assert_eq!(cfg.swarm.detm_lambda, original_lambda);
    }
}
