use crate::math::Vec3;

pub trait Integrator {
    /// Advances `(position, velocity)` by `dt` under a constant `acceleration`.
    fn integrate(&self, position: Vec3, velocity: Vec3, acceleration: Vec3, dt: f64) -> (Vec3, Vec3);
}

/// Symplectic Euler: velocity first, then position from the updated velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl SemiImplicitEuler {
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for SemiImplicitEuler {
    fn integrate(&self, position: Vec3, velocity: Vec3, acceleration: Vec3, dt: f64) -> (Vec3, Vec3) {
        let velocity = velocity + acceleration * dt;
        let position = position + velocity * dt;
        (position, velocity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_position_uses_updated_velocity() {
        let (position, velocity) =
            SemiImplicitEuler.integrate(Vec3::zero(), Vec3::zero(), Vec3::new(2.0, 0.0, 0.0), 0.5);

        assert_relative_eq!(velocity.x, 1.0);
        // Forward Euler would leave position at zero after the first step.
        assert_relative_eq!(position.x, 0.5);
    }

    #[test]
    fn test_closed_form_recurrence() {
        let a = 3.0;
        let dt = 1.0 / 60.0;
        let n = 120;

        let mut position = Vec3::zero();
        let mut velocity = Vec3::zero();
        for _ in 0..n {
            (position, velocity) =
                SemiImplicitEuler.integrate(position, velocity, Vec3::new(0.0, a, 0.0), dt);
        }

        let n = n as f64;
        assert_relative_eq!(velocity.y, a * n * dt, epsilon = 1e-9);
        assert_relative_eq!(position.y, a * dt * dt * n * (n + 1.0) / 2.0, epsilon = 1e-9);
    }
}
