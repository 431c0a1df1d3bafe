//! ChannelTable: owns every directed link and the channel's fading RNG.

use std::collections::HashMap;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use swarmfire_core::constants::DEFAULT_PATH_LOSS_REF_DBM;
use swarmfire_core::error::EngineError;

use crate::link::{self, RFLink};

/// Owns every directed `(sender_id, receiver_id)` link plus the single
/// fading generator shared by every `update()` call. Reading a link's
/// RSSI never advances this generator; only `update()` does.
pub struct ChannelTable {
    links: HashMap<(u32, u32), RFLink>,
    fading_rng: ChaCha8Rng,
    path_loss_exponent: f64,
    max_broadcast_range_m: f64,
}

impl ChannelTable {
    pub fn new(seed: u64, path_loss_exponent: f64, max_broadcast_range_m: f64) -> Self {
        Self {
            links: HashMap::new(),
            fading_rng: ChaCha8Rng::seed_from_u64(seed),
            path_loss_exponent,
            max_broadcast_range_m,
        }
    }

    /// Recompute the `sender -> receiver` link for the given distance,
    /// consuming one fading draw and caching the result.
    pub fn update(&mut self, sender_id: u32, receiver_id: u32, distance_m: f64, now_s: f64) -> RFLink {
        let computed = link::compute_link(
            distance_m,
            DEFAULT_PATH_LOSS_REF_DBM,
            self.path_loss_exponent,
            self.max_broadcast_range_m,
            now_s,
            &mut self.fading_rng,
        );
        self.links.insert((sender_id, receiver_id), computed);
        computed
    }

    /// Latest cached RSSI for a directed link. Does not mutate RNG state;
    /// returns `UnknownDrone` if the link has never been updated. A
    /// drone's link to itself is the sentinel max (+inf): there's no
    /// medium to attenuate across, so it never needs an `update()` call.
    pub fn rssi(&self, sender_id: u32, receiver_id: u32) -> Result<f64, EngineError> {
        if sender_id == receiver_id {
            return Ok(f64::INFINITY);
        }
        self.links
            .get(&(sender_id, receiver_id))
            .map(|l| l.rssi_dbm)
            .ok_or(EngineError::UnknownDrone(receiver_id))
    }

    pub fn link(&self, sender_id: u32, receiver_id: u32) -> Option<&RFLink> {
        self.links.get(&(sender_id, receiver_id))
    }

    /// Draw whether a packet on this link is lost, using the cached
    /// `packet_loss_prob` and consuming one draw from the channel RNG.
    /// An unupdated link is treated as total loss.
    pub fn roll_packet_loss(&mut self, sender_id: u32, receiver_id: u32) -> bool {
        use rand::Rng;
        let p = self.links.get(&(sender_id, receiver_id)).map(|l| l.packet_loss_prob).unwrap_or(1.0);
        self.fading_rng.gen_range(0.0..1.0) < p
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}
