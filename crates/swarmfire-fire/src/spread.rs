//! One cellular-automaton step: spread, pending suppressions, burndown.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use swarmfire_core::constants::{IGNITION_INTENSITY_FACTOR, IGNITION_PROB_SCALE, IGNITION_THRESHOLD, WIND_FACTOR_MAX, WIND_FACTOR_MIN, WIND_K};

use crate::grid::FireGrid;
use crate::wind::Wind;

const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

/// Advance the grid by one step of `dt` seconds: spread to flammable
/// neighbors, apply any pending suppression pulses, then burn down.
/// `spread_rate_mpm` is the configured base spread rate in meters/minute.
/// Draws are consumed from `rng` in row-major cell order so replays with
/// the same seed reproduce the same fire.
pub fn step(
    grid: &mut FireGrid,
    wind: &Wind,
    dt: f64,
    spread_rate_mpm: f64,
    suppression_effectiveness: f64,
    tick: u64,
    rng: &mut ChaCha8Rng,
) {
    let base_rate_mps = spread_rate_mpm / 60.0;
    let burning = grid.burning_snapshot();
    let mut ignitions: Vec<(usize, usize, f64)> = Vec::new();

    for (cx, cy, intensity) in burning {
        for (dx, dy) in NEIGHBOR_OFFSETS {
            let nx = cx as isize + dx;
            let ny = cy as isize + dy;
            if nx < 0 || ny < 0 {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            let Some(neighbor) = grid.cell(nx, ny) else { continue };
            if neighbor.fuel_density <= 0.0 || neighbor.intensity >= IGNITION_THRESHOLD {
                continue;
            }

            let theta_nc = (dy as f64).atan2(dx as f64);
            let wind_factor = (1.0 + WIND_K * (theta_nc - wind.heading_rad).cos())
                .clamp(WIND_FACTOR_MIN, WIND_FACTOR_MAX);
            let spread_cells_per_step = base_rate_mps * wind_factor * dt / grid.cell_size_m();
            let dist = dx.unsigned_abs().max(dy.unsigned_abs()) as f64;
            let distance_factor = (spread_cells_per_step - dist + 1.0).clamp(0.0, 1.0);
            let p_ignite = intensity * distance_factor * neighbor.fuel_density * IGNITION_PROB_SCALE;

            let draw: f64 = rng.gen_range(0.0..1.0);
            if draw < p_ignite {
                ignitions.push((nx, ny, (intensity * IGNITION_INTENSITY_FACTOR).min(1.0)));
            }
        }
    }

    for (gx, gy, intensity) in ignitions {
        grid.apply_ignition(gx, gy, intensity, tick);
    }

    let pending = grid.drain_pending_suppressions();
    grid.apply_pending_suppressions(pending, suppression_effectiveness);

    grid.apply_burndown(dt);
}
