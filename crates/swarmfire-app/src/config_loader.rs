//! Config file loading: reads a TOML file from disk, falls back to
//! built-in defaults if the file is absent, and validates the parsed
//! value before the kernel ever starts.

use std::path::Path;

use swarmfire_core::config::Config;
use swarmfire_core::error::ConfigError;

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let config = match std::fs::read_to_string(path) {
        Ok(text) => toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Config::default()
        }
        Err(source) => {
            return Err(ConfigError::Io { path: path.display().to_string(), source });
        }
    };

    validate(&config)?;
    Ok(config)
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.sim.dt_s <= 0.0 {
        return Err(ConfigError::Invalid("sim.dt_s must be positive".into()));
    }
    if config.swarm.num_leaders + config.swarm.num_followers == 0 {
        return Err(ConfigError::Invalid("swarm must have at least one vehicle".into()));
    }
    if config.swarm.battery_capacity_mah <= 0.0 {
        return Err(ConfigError::Invalid("swarm.battery_capacity_mah must be positive".into()));
    }
    if !(0.0..=100.0).contains(&config.swarm.rtl_threshold_percent) {
        return Err(ConfigError::Invalid("swarm.rtl_threshold_percent must be within [0, 100]".into()));
    }
    if config.fire.grid_width == 0 || config.fire.grid_height == 0 {
        return Err(ConfigError::Invalid("fire grid dimensions must be non-zero".into()));
    }
    if config.fire.cell_size_m <= 0.0 {
        return Err(ConfigError::Invalid("fire.cell_size_m must be positive".into()));
    }
    if config.channel.max_broadcast_range_m <= 0.0 {
        return Err(ConfigError::Invalid("channel.max_broadcast_range_m must be positive".into()));
    }
    Ok(())
}
