//! Uniform wind field applied across the fire grid.

use serde::{Deserialize, Serialize};

/// 2-D wind vector: speed in m/s and heading in radians (0 = +x axis,
/// counter-clockwise), applied uniformly across every cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    pub speed_mps: f64,
    pub heading_rad: f64,
}

impl Wind {
    pub fn new(speed_mps: f64, heading_rad: f64) -> Self {
        Self { speed_mps, heading_rad }
    }

    pub fn calm() -> Self {
        Self::default()
    }
}
