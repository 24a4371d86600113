//! Named probability distributions behind one shared random engine.
//!
//! The engine draws lifespans and spawn gaps from gamma distributions, sizes
//! and speeds from log-normals, opacity and birth position from betas, and
//! steering noise from a zero-mean normal. Each sampler is configured once,
//! at construction, from the *observed* mean and deviation it should
//! reproduce; this module converts those moments into the shape parameters
//! `rand_distr` actually takes. Invalid moments are rejected here so the
//! per-frame draw paths never have to check for degenerate values.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Beta, Distribution, Gamma, LogNormal, Normal};
use std::f64::consts::TAU;
use std::fmt;

use crate::constants::*;

/// Rejected distribution parameterization. Only ever produced while building
/// a [`Samplers`] bundle; a constructed bundle cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerError {
    sampler: &'static str,
    reason: &'static str,
}

impl fmt::Display for SamplerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} sampler: {}", self.sampler, self.reason)
    }
}

impl std::error::Error for SamplerError {}

impl SamplerError {
    fn new(sampler: &'static str, reason: &'static str) -> Self {
        Self { sampler, reason }
    }
}

/// Gamma distribution matching an observed mean and standard deviation.
///
/// `shape = (mean/dev)^2`, `scale = dev^2/mean`; both moments must be
/// strictly positive.
fn gamma_from_moments(name: &'static str, mean: f64, dev: f64) -> Result<Gamma<f64>, SamplerError> {
    if !(mean > 0.0) {
        return Err(SamplerError::new(name, "mean must be strictly positive"));
    }
    if !(dev > 0.0) {
        return Err(SamplerError::new(name, "deviation must be strictly positive"));
    }
    let shape = (mean / dev).powi(2);
    let scale = dev * dev / mean;
    Gamma::new(shape, scale).map_err(|_| SamplerError::new(name, "gamma parameters out of range"))
}

/// Log-normal distribution matching an observed mean and standard deviation.
fn log_normal_from_moments(
    name: &'static str,
    mean: f64,
    dev: f64,
) -> Result<LogNormal<f64>, SamplerError> {
    if !(mean > 0.0) {
        return Err(SamplerError::new(name, "mean must be strictly positive"));
    }
    if !(dev > 0.0) {
        return Err(SamplerError::new(name, "deviation must be strictly positive"));
    }
    let sigma_sq = (1.0 + (dev / mean).powi(2)).ln();
    let mu = mean.ln() - sigma_sq / 2.0;
    LogNormal::new(mu, sigma_sq.sqrt())
        .map_err(|_| SamplerError::new(name, "log-normal parameters out of range"))
}

/// Beta distribution matching an observed mean and standard deviation.
///
/// Requires `mean` in `(0, 1)` and `dev^2 < mean * (1 - mean)`, otherwise no
/// beta has those moments.
fn beta_from_moments(name: &'static str, mean: f64, dev: f64) -> Result<Beta<f64>, SamplerError> {
    if !(mean > 0.0 && mean < 1.0) {
        return Err(SamplerError::new(name, "mean must lie strictly inside (0, 1)"));
    }
    if !(dev > 0.0) {
        return Err(SamplerError::new(name, "deviation must be strictly positive"));
    }
    let nu = mean * (1.0 - mean) / (dev * dev) - 1.0;
    if !(nu > 0.0) {
        return Err(SamplerError::new(name, "deviation too large for a beta with this mean"));
    }
    Beta::new(mean * nu, (1.0 - mean) * nu)
        .map_err(|_| SamplerError::new(name, "beta parameters out of range"))
}

/// One independent draw per call, for every distribution the engine needs.
///
/// The bundle owns the random engine; there is no ambient RNG. Thread it
/// explicitly into whatever constructs or advances particles, and use
/// [`Samplers::seeded`] to make a whole run reproducible in tests.
pub struct Samplers {
    rng: SmallRng,
    life: Gamma<f64>,
    spawn_gap: Gamma<f64>,
    size: LogNormal<f64>,
    alpha: Beta<f64>,
    position: Beta<f64>,
    steer: Normal<f64>,
    speed: LogNormal<f64>,
    acceleration: Gamma<f64>,
}

impl Samplers {
    /// Build the bundle with an entropy-seeded engine.
    pub fn new() -> Result<Self, SamplerError> {
        Self::with_rng(SmallRng::from_entropy())
    }

    /// Build the bundle with a deterministic engine.
    pub fn seeded(seed: u64) -> Result<Self, SamplerError> {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Result<Self, SamplerError> {
        Ok(Self {
            rng,
            life: gamma_from_moments("life", LIFE_EXPECTANCY_MS, LIFE_DEVIATION_MS)?,
            spawn_gap: gamma_from_moments("spawn gap", SPAWN_MEAN_MS, SPAWN_DEVIATION_MS)?,
            size: log_normal_from_moments("size", SIZE_MEAN, SIZE_DEVIATION)?,
            alpha: beta_from_moments("alpha", ALPHA_MEAN, ALPHA_DEVIATION)?,
            position: beta_from_moments("position", POSITION_MEAN, POSITION_DEVIATION)?,
            steer: Normal::new(0.0, STEER_DEVIATION_RAD)
                .map_err(|_| SamplerError::new("steer", "deviation must be finite"))?,
            speed: log_normal_from_moments("speed", SPEED_MEAN, SPEED_DEVIATION)?,
            acceleration: gamma_from_moments(
                "acceleration",
                ACCELERATION_MEAN,
                ACCELERATION_DEVIATION,
            )?,
        })
    }

    /// Uniform draw in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform heading in `[0, 2π)`.
    pub fn angle(&mut self) -> f64 {
        TAU * self.rng.gen::<f64>()
    }

    /// Lifespan in milliseconds.
    pub fn life(&mut self) -> f64 {
        self.life.sample(&mut self.rng)
    }

    /// Gap until the next birth, in milliseconds.
    pub fn spawn_gap(&mut self) -> f64 {
        self.spawn_gap.sample(&mut self.rng)
    }

    /// Radius scale factor, as a fraction of the reference length.
    pub fn size(&mut self) -> f64 {
        self.size.sample(&mut self.rng)
    }

    /// Opacity in `[0, 1]`.
    pub fn alpha(&mut self) -> f64 {
        self.alpha.sample(&mut self.rng)
    }

    /// Birth coordinate for one axis, center-biased in `(0, 1)`.
    pub fn position(&mut self) -> f64 {
        self.position.sample(&mut self.rng)
    }

    /// Zero-mean angular perturbation in radians.
    pub fn steer(&mut self) -> f64 {
        self.steer.sample(&mut self.rng)
    }

    /// Speed in normalized units per millisecond.
    pub fn speed(&mut self) -> f64 {
        self.speed.sample(&mut self.rng)
    }

    /// Multiplicative speed perturbation; strictly positive, tight around 1.
    pub fn acceleration(&mut self) -> f64 {
        self.acceleration.sample(&mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moments(draws: &[f64]) -> (f64, f64) {
        let n = draws.len() as f64;
        let mean = draws.iter().sum::<f64>() / n;
        let var = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / n;
        (mean, var.sqrt())
    }

    #[test]
    fn gamma_moment_matching_reproduces_the_requested_moments() {
        let mut samplers = Samplers::seeded(1).unwrap();
        let draws: Vec<f64> = (0..20_000).map(|_| samplers.life()).collect();
        let (mean, dev) = moments(&draws);
        assert!(
            (mean - LIFE_EXPECTANCY_MS).abs() < 0.02 * LIFE_EXPECTANCY_MS,
            "sample mean {mean} too far from {LIFE_EXPECTANCY_MS}"
        );
        assert!(
            (dev - LIFE_DEVIATION_MS).abs() < 0.05 * LIFE_DEVIATION_MS,
            "sample deviation {dev} too far from {LIFE_DEVIATION_MS}"
        );
    }

    #[test]
    fn log_normal_moment_matching_reproduces_the_requested_moments() {
        let mut samplers = Samplers::seeded(2).unwrap();
        let draws: Vec<f64> = (0..20_000).map(|_| samplers.size()).collect();
        let (mean, dev) = moments(&draws);
        assert!((mean - SIZE_MEAN).abs() < 0.02 * SIZE_MEAN);
        assert!((dev - SIZE_DEVIATION).abs() < 0.06 * SIZE_DEVIATION);
    }

    #[test]
    fn beta_moment_matching_reproduces_the_requested_moments() {
        let mut samplers = Samplers::seeded(3).unwrap();
        let draws: Vec<f64> = (0..20_000).map(|_| samplers.position()).collect();
        let (mean, dev) = moments(&draws);
        assert!((mean - POSITION_MEAN).abs() < 0.02);
        assert!((dev - POSITION_DEVIATION).abs() < 0.02);
    }

    #[test]
    fn supports_are_bounded_and_positive() {
        let mut samplers = Samplers::seeded(4).unwrap();
        for _ in 0..10_000 {
            let alpha = samplers.alpha();
            assert!((0.0..=1.0).contains(&alpha));
            let position = samplers.position();
            assert!((0.0..=1.0).contains(&position));
            assert!(samplers.speed() > 0.0);
            let angle = samplers.angle();
            assert!((0.0..TAU).contains(&angle));
        }
    }

    #[test]
    fn acceleration_noise_is_positive_finite_and_tight_around_unity() {
        // Extreme parameterization: mean 1 with deviation 1e-4 puts the
        // gamma shape near 1e8. Draws must stay finite and close to 1.
        let mut samplers = Samplers::seeded(5).unwrap();
        let draws: Vec<f64> = (0..10_000).map(|_| samplers.acceleration()).collect();
        for draw in &draws {
            assert!(draw.is_finite() && *draw > 0.0);
            assert!((*draw - 1.0).abs() < 10.0 * ACCELERATION_DEVIATION);
        }
        let (mean, _) = moments(&draws);
        assert!((mean - 1.0).abs() < 1e-5);
    }

    #[test]
    fn steering_noise_is_zero_mean_at_tiny_scale() {
        let mut samplers = Samplers::seeded(6).unwrap();
        let draws: Vec<f64> = (0..20_000).map(|_| samplers.steer()).collect();
        let (mean, dev) = moments(&draws);
        assert!(mean.abs() < 5.0 * STEER_DEVIATION_RAD / (draws.len() as f64).sqrt());
        assert!((dev - STEER_DEVIATION_RAD).abs() < 0.05 * STEER_DEVIATION_RAD);
    }

    #[test]
    fn degenerate_moments_are_rejected_at_configuration_time() {
        assert!(gamma_from_moments("g", 0.0, 1.0).is_err());
        assert!(gamma_from_moments("g", 1.0, 0.0).is_err());
        assert!(gamma_from_moments("g", 1.0, f64::NAN).is_err());
        assert!(log_normal_from_moments("l", -1.0, 0.1).is_err());
        assert!(beta_from_moments("b", 1.2, 0.1).is_err());
        // No beta has deviation^2 >= mean * (1 - mean).
        assert!(beta_from_moments("b", 0.5, 0.5).is_err());
    }

    #[test]
    fn seeded_bundles_replay_identically() {
        let mut a = Samplers::seeded(99).unwrap();
        let mut b = Samplers::seeded(99).unwrap();
        for _ in 0..100 {
            assert_eq!(a.life(), b.life());
            assert_eq!(a.steer(), b.steer());
            assert_eq!(a.unit(), b.unit());
        }
    }
}
