//! Rolling metrics aggregation: per-tick counters folded into a bounded
//! history, with the latest tick's snapshot served to the streaming
//! surface and the REST metrics endpoint.

use std::collections::VecDeque;

use swarmfire_core::constants::METRICS_HISTORY_TICKS;
use swarmfire_core::state::MetricsSnapshot;

/// Per-tick counters accumulated by the orchestrator as it runs a tick,
/// then folded into a [`MetricsSnapshot`] at the metrics-snapshot step.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickCounters {
    pub messages_sent: u64,
    pub messages_suppressed: u64,
    pub messages_dropped: u64,
    pub suppression_events: u64,
    pub drones_rtl: u32,
    pub drones_landed: u32,
    pub area_contained_fraction: f64,
}

/// Bounded rolling history of [`MetricsSnapshot`]s, capped at
/// `METRICS_HISTORY_TICKS`.
#[derive(Default)]
pub struct MetricsAggregator {
    history: VecDeque<MetricsSnapshot>,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self { history: VecDeque::with_capacity(METRICS_HISTORY_TICKS) }
    }

    pub fn record(&mut self, counters: TickCounters) -> MetricsSnapshot {
        let snapshot = MetricsSnapshot {
            messages_sent: counters.messages_sent,
            messages_suppressed: counters.messages_suppressed,
            messages_dropped: counters.messages_dropped,
            suppression_events: counters.suppression_events,
            drones_rtl: counters.drones_rtl,
            drones_landed: counters.drones_landed,
            area_contained_fraction: counters.area_contained_fraction,
        };
        if self.history.len() == METRICS_HISTORY_TICKS {
            self.history.pop_front();
        }
        self.history.push_back(snapshot.clone());
        snapshot
    }

    pub fn latest(&self) -> MetricsSnapshot {
        self.history.back().cloned().unwrap_or_default()
    }

    pub fn history(&self) -> impl Iterator<Item = &MetricsSnapshot> {
        self.history.iter()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
