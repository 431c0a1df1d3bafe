//! Lévy-flight search policy via the Mantegna method.
//!
//! Each vehicle's exploration RNG is distinct from every engine RNG and
//! seeded from `(config_seed, drone_id)`, so replaying a scenario with
//! the same seed reproduces the same search paths.

use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal, Uniform};

use swarmfire_core::constants::{LEVY_ALPHA, LEVY_STEP_MAX_M, LEVY_STEP_MIN_M};

/// Seed a per-drone exploration RNG from the run seed and the drone id.
/// Distinct drones never share a stream even at seed 0.
pub fn seed_for_drone(config_seed: u64, drone_id: u32) -> u64 {
    config_seed ^ (drone_id as u64).wrapping_mul(0x9E3779B97F4A7C15)
}

/// One Mantegna-method Lévy step: uniformly random heading, step length
/// drawn from the heavy-tailed Lévy distribution (stability `alpha`),
/// clamped to `[LEVY_STEP_MIN_M, LEVY_STEP_MAX_M]` against degenerate and
/// runaway samples.
pub struct SearchPolicy {
    rng: ChaCha8Rng,
}

impl SearchPolicy {
    pub fn new(rng: ChaCha8Rng) -> Self {
        Self { rng }
    }

    /// Draw the next `(heading_rad, step_len_m)` pair.
    pub fn next_step(&mut self) -> (f64, f64) {
        let heading = Uniform::new(0.0, std::f64::consts::TAU).sample(&mut self.rng);
        let step_len = mantegna_levy_step(LEVY_ALPHA, &mut self.rng).clamp(LEVY_STEP_MIN_M, LEVY_STEP_MAX_M);
        (heading, step_len)
    }

    /// Draw whether a fire of the given intensity is detected this tick,
    /// with detection probability `min(1, intensity)`.
    pub fn roll_detection(&mut self, intensity: f64) -> bool {
        let draw: f64 = Uniform::new(0.0, 1.0).sample(&mut self.rng);
        draw < intensity.min(1.0)
    }
}

/// Draw a single Lévy-stable step length via the Mantegna (1994) method:
/// `step = u / |v|^(1/alpha)`, with `u ~ N(0, sigma_u^2)`, `v ~ N(0, 1)`,
/// and `sigma_u` chosen from the Gamma-function ratio that makes the
/// resulting distribution Lévy-stable with stability `alpha`.
fn mantegna_levy_step(alpha: f64, rng: &mut ChaCha8Rng) -> f64 {
    let sigma_u = {
        let num = gamma(1.0 + alpha) * (std::f64::consts::PI * alpha / 2.0).sin();
        let den = gamma((1.0 + alpha) / 2.0) * alpha * 2f64.powf((alpha - 1.0) / 2.0);
        (num / den).powf(1.0 / alpha)
    };
    let u = Normal::new(0.0, sigma_u).expect("sigma_u > 0 for alpha in (0,2)").sample(rng);
    let v: f64 = Normal::new(0.0, 1.0).expect("valid").sample(rng);
    (u / v.abs().powf(1.0 / alpha)).abs()
}

/// Lanczos approximation of the Gamma function, accurate to double
/// precision for the positive arguments this module ever calls it with.
fn gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFICIENTS: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_13,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        std::f64::consts::PI / ((std::f64::consts::PI * x).sin() * gamma(1.0 - x))
    } else {
        let x = x - 1.0;
        let mut a = COEFFICIENTS[0];
        let t = x + G + 0.5;
        for (i, c) in COEFFICIENTS.iter().enumerate().skip(1) {
            a += c / (x + i as f64);
        }
        (2.0 * std::f64::consts::PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * a
    }
}
