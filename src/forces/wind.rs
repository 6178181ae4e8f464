use crate::config::WindConfig;
use crate::forces::{ForceContext, ForceGenerator};
use crate::math::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Stochastic wind: a bounded random walk. The accumulated force persists between ticks
/// and every sample nudges it, then clamps it back into `[-max_magnitude, max_magnitude]`.
#[derive(Debug, Clone)]
pub struct Wind<R = ChaCha8Rng> {
    rng: R,
    accumulated: Vec3,
    pub strength: f64,
    pub rate_of_change: f64,
    pub max_magnitude: f64,
}

impl Wind<ChaCha8Rng> {
    pub fn from_seed(config: &WindConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Wind<R> {
    pub fn with_rng(config: &WindConfig, rng: R) -> Self {
        Self {
            rng,
            accumulated: Vec3::zero(),
            strength: config.strength,
            rate_of_change: config.rate_of_change,
            max_magnitude: config.max_magnitude,
        }
    }

    pub fn accumulated(&self) -> Vec3 {
        self.accumulated
    }

    fn perturbation(&mut self) -> Vec3 {
        let range = 0.1 * self.rate_of_change * self.strength;
        if range <= 0.0 {
            return Vec3::zero();
        }
        Vec3::new(
            self.rng.gen_range(-range..=range),
            self.rng.gen_range(-range..=range),
            self.rng.gen_range(-range..=range),
        )
    }
}

impl<R: Rng> ForceGenerator for Wind<R> {
    fn name(&self) -> &'static str {
        "wind"
    }

    fn sample_force(&mut self, _ctx: &ForceContext) -> Vec3 {
        let drift = self.perturbation();
        self.accumulated = (self.accumulated + drift).clamp(-self.max_magnitude, self.max_magnitude);
        self.accumulated
    }
}
