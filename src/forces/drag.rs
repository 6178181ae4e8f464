use crate::config::DragConfig;
use crate::forces::{ForceContext, ForceGenerator};
use crate::math::Vec3;

/// Quadratic drag, applied per axis and always opposing the velocity on that axis.
///
/// `F_i = -sign(v_i) * 0.5 * rho * v_i^2 * Cd * A * scaling`
#[derive(Debug, Clone, PartialEq)]
pub struct Drag {
    pub enabled: bool,
    pub air_density: f64,
    pub scaling: f64,
}

impl Drag {
    pub fn new(config: &DragConfig) -> Self {
        Self {
            enabled: config.enabled,
            air_density: config.air_density,
            scaling: config.scaling,
        }
    }

    /// Unsigned drag magnitude on each axis.
    pub fn magnitude(&self, velocity: Vec3, area: f64, drag_coefficient: f64) -> Vec3 {
        let gain = 0.5 * self.air_density * drag_coefficient * area * self.scaling;
        velocity.component_mul(&velocity) * gain
    }

    pub fn force(&self, velocity: Vec3, area: f64, drag_coefficient: f64) -> Vec3 {
        if !self.enabled {
            return Vec3::zero();
        }
        -velocity
            .signum()
            .component_mul(&self.magnitude(velocity, area, drag_coefficient))
    }
}

impl Default for Drag {
    fn default() -> Self {
        Self::new(&DragConfig::default())
    }
}

impl ForceGenerator for Drag {
    fn name(&self) -> &'static str {
        "drag"
    }

    fn sample_force(&mut self, ctx: &ForceContext) -> Vec3 {
        self.force(ctx.velocity, ctx.cross_sectional_area, ctx.drag_coefficient)
    }
}
