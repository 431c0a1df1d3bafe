//! Distributed neighbor observer: constant-velocity prediction with
//! decaying confidence, used to raise collision-risk alerts.

use std::collections::HashMap;

use swarmfire_core::types::{Pose, Velocity};

/// A single neighbor's most recently received telemetry.
#[derive(Debug, Clone, Copy)]
struct NeighborEstimate {
    last_known_pose: Pose,
    last_known_velocity: Velocity,
    last_update_time: f64,
}

/// Predicted state of a neighbor at query time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub predicted_pose: Pose,
    pub confidence: f64,
}

/// One vehicle's table of neighbor estimates. Owned by the vehicle, never
/// shared; each vehicle's observer only ever sees the messages delivered
/// to it over the channel model.
#[derive(Debug, Clone, Default)]
pub struct Observer {
    estimates: HashMap<u32, NeighborEstimate>,
    max_age_s: f64,
    min_separation_m: f64,
}

impl Observer {
    pub fn new(max_age_s: f64, min_separation_m: f64) -> Self {
        Self { estimates: HashMap::new(), max_age_s, min_separation_m }
    }

    /// Record telemetry received from `neighbor_id` at `t_recv`,
    /// overwriting any prior entry.
    pub fn observe(&mut self, neighbor_id: u32, pose: Pose, velocity: Velocity, t_recv: f64) {
        self.estimates.insert(
            neighbor_id,
            NeighborEstimate { last_known_pose: pose, last_known_velocity: velocity, last_update_time: t_recv },
        );
    }

    /// Constant-velocity prediction for `neighbor_id` at `t_query`. `None`
    /// if the neighbor has never been observed.
    pub fn predict(&self, neighbor_id: u32, t_query: f64) -> Option<Prediction> {
        let est = self.estimates.get(&neighbor_id)?;
        let age = t_query - est.last_update_time;
        if age > self.max_age_s {
            return Some(Prediction { predicted_pose: est.last_known_pose, confidence: 0.0 });
        }
        let predicted_pose = est.last_known_pose + est.last_known_velocity * age;
        let confidence = 1.0 - 0.8 * (age / self.max_age_s).min(1.0);
        Some(Prediction { predicted_pose, confidence })
    }

    /// Neighbors predicted to be within `min_separation_m` of `self_pose`
    /// at `t_query`, with non-zero confidence. Never panics on a missing
    /// or stale neighbor; returns an empty vector instead.
    pub fn collision_risks(&self, self_pose: Pose, t_query: f64) -> Vec<(u32, Prediction)> {
        let mut risks: Vec<(u32, Prediction)> = self
            .estimates
            .keys()
            .filter_map(|&id| {
                let pred = self.predict(id, t_query)?;
                if pred.confidence > 0.0 && self_pose.distance_to(&pred.predicted_pose) < self.min_separation_m {
                    Some((id, pred))
                } else {
                    None
                }
            })
            .collect();
        risks.sort_by_key(|(id, _)| *id);
        risks
    }
}
