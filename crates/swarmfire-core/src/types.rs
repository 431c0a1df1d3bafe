//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 3D pose in simulation space (meters, Cartesian).
/// x = East, y = North, z = Up (altitude).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// 3D velocity in simulation space (m/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Simulation time tracking. `dt` is carried alongside rather than derived
/// from a global tick rate constant, since `sim.dt_s` is configurable.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// 3D Euclidean distance to another pose, in meters (the ETM's default
    /// L2 trigger norm).
    pub fn distance_to(&self, other: &Pose) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Horizontal (2D) distance to another pose, in meters.
    pub fn horizontal_distance_to(&self, other: &Pose) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Chebyshev (L-infinity) distance — the ETM's alternate trigger norm.
    pub fn chebyshev_distance_to(&self, other: &Pose) -> f64 {
        let dx = (other.x - self.x).abs();
        let dy = (other.y - self.y).abs();
        let dz = (other.z - self.z).abs();
        dx.max(dy).max(dz)
    }

    /// Bearing to another pose in radians (0 = North, clockwise).
    pub fn bearing_to(&self, other: &Pose) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.atan2(dy).rem_euclid(std::f64::consts::TAU)
    }
}

impl std::ops::Add<Velocity> for Pose {
    type Output = Pose;
    fn add(self, v: Velocity) -> Pose {
        Pose::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl std::ops::Mul<f64> for Velocity {
    type Output = Velocity;
    fn mul(self, scalar: f64) -> Velocity {
        Velocity::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Speed magnitude (m/s).
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Heading in radians (0 = North, clockwise).
    pub fn heading(&self) -> f64 {
        self.x.atan2(self.y).rem_euclid(std::f64::consts::TAU)
    }
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = Pose::new(0.0, 0.0, 0.0);
        let b = Pose::new(3.0, 4.0, 0.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
    }

    #[test]
    fn chebyshev_picks_max_axis() {
        let a = Pose::new(0.0, 0.0, 0.0);
        let b = Pose::new(1.0, 5.0, -2.0);
        assert_eq!(a.chebyshev_distance_to(&b), 5.0);
    }

    #[test]
    fn sim_time_advances() {
        let mut t = SimTime::default();
        t.advance(0.1);
        t.advance(0.1);
        assert_eq!(t.tick, 2);
        assert!((t.elapsed_secs - 0.2).abs() < 1e-9);
    }
}
