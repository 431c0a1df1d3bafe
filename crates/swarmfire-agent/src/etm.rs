//! Event-triggered messaging controller: decides, per vehicle per tick,
//! whether a telemetry broadcast is worth the airtime.

use swarmfire_core::constants::ETM_ETA_MIN;
use swarmfire_core::enums::EtmNorm;
use swarmfire_core::types::Pose;

/// Per-vehicle ETM state. `eta0`/`lambda` are read from config at
/// construction and may be overridden later via `ConfigUpdate`.
#[derive(Debug, Clone)]
pub struct EtmController {
    eta0: f64,
    lambda: f64,
    norm: EtmNorm,
    pose_at_last_tx: Option<Pose>,
    last_tx_time: f64,
    total_transmissions: u64,
    total_suppressed: u64,
}

impl EtmController {
    pub fn new(eta0: f64, lambda: f64, norm: EtmNorm) -> Self {
        Self {
            eta0,
            lambda,
            norm,
            pose_at_last_tx: None,
            last_tx_time: 0.0,
            total_transmissions: 0,
            total_suppressed: 0,
        }
    }

    pub fn set_eta0(&mut self, eta0: f64) {
        self.eta0 = eta0;
    }

    pub fn set_lambda(&mut self, lambda: f64) {
        self.lambda = lambda;
    }

    /// Decaying trigger threshold for a silence of `dt_since_last_tx`
    /// seconds. Floored at `ETM_ETA_MIN` to avoid underflow in long
    /// silences.
    pub fn threshold(&self, dt_since_last_tx: f64) -> f64 {
        (self.eta0 * (-self.lambda * dt_since_last_tx).exp()).max(ETM_ETA_MIN)
    }

    /// Decide whether to transmit at `pose_now`/`now`. Updates internal
    /// state (and counters) as a side effect of the decision.
    pub fn should_transmit(&mut self, pose_now: Pose, now: f64) -> bool {
        let transmit = match self.pose_at_last_tx {
            None => true,
            Some(last_pose) => {
                let e = match self.norm {
                    EtmNorm::L2 => last_pose.distance_to(&pose_now),
                    EtmNorm::LInfinity => last_pose.chebyshev_distance_to(&pose_now),
                };
                let dt = now - self.last_tx_time;
                e > self.threshold(dt)
            }
        };

        if transmit {
            self.pose_at_last_tx = Some(pose_now);
            self.last_tx_time = now;
            self.total_transmissions += 1;
        } else {
            self.total_suppressed += 1;
        }
        transmit
    }

    pub fn total_transmissions(&self) -> u64 {
        self.total_transmissions
    }

    pub fn total_suppressed(&self) -> u64 {
        self.total_suppressed
    }
}
