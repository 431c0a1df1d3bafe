//! Simulation constants and default tuning parameters.
//!
//! These mirror the defaults in the configuration table; a loaded `Config`
//! overrides any of them per-field. Code that needs a value should read it
//! off the `Config` it was handed, not reach for these constants directly,
//! except in tests and in `Config::default()` itself.

// --- Tick ---

/// Default tick duration (seconds). `sim.dt_s`.
pub const DEFAULT_DT: f64 = 0.1;

/// Default master RNG seed. `sim.seed`.
pub const DEFAULT_SEED: u64 = 0;

// --- Swarm composition ---

pub const DEFAULT_NUM_LEADERS: u32 = 3;
pub const DEFAULT_NUM_FOLLOWERS: u32 = 10;

// --- ETM ---

/// Initial threshold (meters). `swarm.detm_eta0`.
pub const DEFAULT_ETM_ETA0: f64 = 1.0;
/// Decay rate (1/s). `swarm.detm_lambda`.
pub const DEFAULT_ETM_LAMBDA: f64 = 0.5;
/// Threshold floor (meters) — prevents underflow in long silences.
pub const ETM_ETA_MIN: f64 = 0.01;

// --- Battery ---

pub const DEFAULT_BATTERY_CAPACITY_MAH: f64 = 5000.0;
/// mWh per meter flown.
pub const DEFAULT_ENERGY_DRAIN_PER_METER: f64 = 0.08;
pub const DEFAULT_RTL_THRESHOLD_PERCENT: f64 = 20.0;
/// Hover drain, percent of full battery per second, when not moving.
pub const HOVER_DRAIN_PERCENT_PER_SEC: f64 = 0.01;

// --- Fire grid ---

pub const DEFAULT_GRID_WIDTH: usize = 100;
pub const DEFAULT_GRID_HEIGHT: usize = 100;
pub const DEFAULT_CELL_SIZE_M: f64 = 10.0;
/// Base spread rate, m/min. Converted to m/s at use site (/60).
pub const DEFAULT_SPREAD_RATE_MPM: f64 = 30.0;
pub const DEFAULT_SUPPRESSION_EFFECTIVENESS: f64 = 0.9;
/// Below this intensity a cell is considered not burning.
pub const FIRE_EPSILON: f64 = 0.01;
/// Intensity below which a neighbor is still eligible to ignite.
pub const IGNITION_THRESHOLD: f64 = 0.1;
/// Wind alignment factor `k` in `wind_factor = 1 + k*cos(theta)`.
pub const WIND_K: f64 = 1.0;
pub const WIND_FACTOR_MIN: f64 = 0.25;
pub const WIND_FACTOR_MAX: f64 = 2.0;
/// Per-step ignition probability scale.
pub const IGNITION_PROB_SCALE: f64 = 0.3;
/// Intensity transfer fraction on ignition.
pub const IGNITION_INTENSITY_FACTOR: f64 = 0.8;
/// Burndown intensity decay base (per second).
pub const BURNDOWN_DECAY_BASE: f64 = 0.95;
/// Burndown fuel consumption rate.
pub const BURNDOWN_FUEL_RATE: f64 = 0.01;

// --- RF channel ---

/// Reference path loss at `d0` (dBm).
pub const DEFAULT_PATH_LOSS_REF_DBM: f64 = -40.0;
/// Path loss exponent `n`. `channel.path_loss_exponent`.
pub const DEFAULT_PATH_LOSS_EXPONENT: f64 = 3.0;
/// Reference distance (meters).
pub const PATH_LOSS_REF_DISTANCE_M: f64 = 1.0;
/// Rician K-factor. `channel.rice_k_factor`.
pub const DEFAULT_RICE_K_FACTOR: f64 = 8.0;
/// Fading std-dev (dB) corresponding to the default K-factor.
pub const FADING_SIGMA_DB: f64 = 2.0;
/// Reference RSSI for latency computation (dBm).
pub const LATENCY_REF_RSSI_DBM: f64 = -60.0;
pub const LATENCY_BASE_S: f64 = 0.005;
pub const LATENCY_PER_DB_S: f64 = 0.0005;
/// Range gate. `channel.max_broadcast_range_m`.
pub const DEFAULT_MAX_BROADCAST_RANGE_M: f64 = 100.0;

// --- Observer ---

/// Maximum age before a neighbor estimate stops extrapolating (seconds).
pub const DEFAULT_OBSERVER_MAX_AGE_S: f64 = 0.5;
/// Minimum vehicle separation for a collision-risk alert (meters).
pub const DEFAULT_MIN_SEPARATION_M: f64 = 10.0;

// --- Agent / mission ---

pub const DEFAULT_PAYLOAD_MAX: f64 = 20.0;
/// Fire-detection probability-sampling threshold.
pub const DEFAULT_DETECTION_THRESHOLD: f64 = 0.1;
/// Suppression strength applied per tick while in SUPPRESS.
pub const DEFAULT_SUPPRESSION_STRENGTH: f64 = 0.5;
/// Sensor radius for fire detection while searching (meters).
pub const DEFAULT_SENSOR_RADIUS_M: f64 = 15.0;
/// Target takeoff altitude (meters).
pub const DEFAULT_TAKEOFF_ALTITUDE_M: f64 = 50.0;
/// Landing radius around the dock (meters).
pub const DEFAULT_LANDING_RADIUS_M: f64 = 5.0;
/// Lévy search step speed (m/s).
pub const DEFAULT_SEARCH_SPEED_MPS: f64 = 8.0;
/// Vertical climb rate during TAKEOFF (m/s).
pub const TAKEOFF_CLIMB_RATE_MPS: f64 = 2.0;
/// Vertical descent rate during LAND (m/s).
pub const LANDING_DESCENT_RATE_MPS: f64 = 1.5;
/// Horizontal cruise speed while returning to launch (m/s).
pub const RTL_SPEED_MPS: f64 = 10.0;
/// Mantegna-method stability parameter `alpha`.
pub const LEVY_ALPHA: f64 = 1.5;
/// Minimum Lévy step length (meters), clamps degenerate samples.
pub const LEVY_STEP_MIN_M: f64 = 1.0;
/// Maximum Lévy step length (meters), clamps the heavy tail.
pub const LEVY_STEP_MAX_M: f64 = 200.0;

// --- Metrics ---

/// Rolling metrics history length, in ticks (~30s at default dt).
pub const METRICS_HISTORY_TICKS: usize = 300;

// --- External flight-controller assignment ---

pub const FLIGHT_CONTROLLER_BASE_PORT: u16 = 14550;
pub const FLIGHT_CONTROLLER_PORT_STRIDE: u16 = 10;
