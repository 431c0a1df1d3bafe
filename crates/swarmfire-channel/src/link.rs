//! Per-link signal calculation: path loss, fading, loss probability, latency.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

use swarmfire_core::constants::{
    FADING_SIGMA_DB, LATENCY_BASE_S, LATENCY_PER_DB_S, LATENCY_REF_RSSI_DBM,
    PATH_LOSS_REF_DISTANCE_M,
};

/// A directed radio link's most recently computed state. Created lazily
/// by the owning [`crate::table::ChannelTable`] on first update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RFLink {
    pub rssi_dbm: f64,
    pub latency_s: f64,
    pub packet_loss_prob: f64,
    pub last_updated_time: f64,
}

/// Log-distance path loss in dBm. Higher (less negative) is a stronger
/// signal. `path_loss_ref_dbm` is `PL0`, `exponent` is `n`.
pub fn path_loss_dbm(distance_m: f64, path_loss_ref_dbm: f64, exponent: f64) -> f64 {
    let d = distance_m.max(PATH_LOSS_REF_DISTANCE_M);
    path_loss_ref_dbm - 10.0 * exponent * (d / PATH_LOSS_REF_DISTANCE_M).log10()
}

/// Draw a single small-scale fading sample in dB from the link's
/// Rician-like Gaussian approximation. Consumes one draw from `rng`.
pub fn sample_fading_db(rng: &mut impl Rng) -> f64 {
    let normal = Normal::new(0.0, FADING_SIGMA_DB).expect("fixed, valid sigma");
    normal.sample(rng)
}

/// Packet loss probability as a function of RSSI. `p = exp(-(rssi+100)/10)`,
/// clamped to `[0,1]`.
pub fn packet_loss_prob(rssi_dbm: f64) -> f64 {
    let p = (-(rssi_dbm + 100.0).max(0.0) / 10.0).exp();
    p.clamp(0.0, 1.0)
}

/// Message latency in seconds given the resulting RSSI.
pub fn latency_s(rssi_dbm: f64) -> f64 {
    LATENCY_BASE_S + (LATENCY_REF_RSSI_DBM - rssi_dbm).max(0.0) * LATENCY_PER_DB_S
}

/// Compute a link's full state for one `update()` call. `rng` is the
/// channel's dedicated fading generator, distinct from the fire RNG, and
/// is advanced exactly once.
pub fn compute_link(
    distance_m: f64,
    path_loss_ref_dbm: f64,
    exponent: f64,
    max_broadcast_range_m: f64,
    now_s: f64,
    rng: &mut impl Rng,
) -> RFLink {
    let pathloss_rssi = path_loss_dbm(distance_m, path_loss_ref_dbm, exponent);
    let fade_db = sample_fading_db(rng);
    let rssi_dbm = pathloss_rssi + fade_db;

    let mut packet_loss_prob = packet_loss_prob(rssi_dbm);
    if distance_m > max_broadcast_range_m {
        packet_loss_prob = 1.0;
    }

    RFLink {
        rssi_dbm,
        latency_s: latency_s(rssi_dbm),
        packet_loss_prob,
        last_updated_time: now_s,
    }
}
