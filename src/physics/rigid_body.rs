use crate::config::UavConfig;
use crate::error::ConfigError;
use crate::math::Vec3;
use crate::physics::Integrator;
use serde::{Deserialize, Serialize};

/// The simulated vehicle. Mass is validated once and cannot change afterwards, so force
/// application never divides by a non-positive value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigidBodyState {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Derived from the net force on every tick; overwritten, never accumulated.
    pub acceleration: Vec3,
    /// Yaw placeholder. Not read by the force or integration code.
    pub heading: f64,
    mass: f64,
    cross_sectional_area: f64,
    drag_coefficient: f64,
}

/// Read-only copy of the body handed to presentation code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    pub heading: f64,
}

impl RigidBodyState {
    pub fn new(config: &UavConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            position: Vec3::zero(),
            velocity: Vec3::zero(),
            acceleration: Vec3::zero(),
            heading: 0.0,
            mass: config.mass,
            cross_sectional_area: config.cross_sectional_area,
            drag_coefficient: config.drag_coefficient,
        })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn cross_sectional_area(&self) -> f64 {
        self.cross_sectional_area
    }

    pub fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }

    pub fn apply_force(&mut self, net_force: Vec3) {
        self.acceleration = net_force / self.mass;
    }

    pub fn integrate_step(&mut self, integrator: &impl Integrator, dt: f64) {
        let (position, velocity) =
            integrator.integrate(self.position, self.velocity, self.acceleration, dt);
        self.position = position;
        self.velocity = velocity;
    }

    pub fn snapshot(&self) -> BodySnapshot {
        BodySnapshot {
            position: self.position,
            velocity: self.velocity,
            acceleration: self.acceleration,
            heading: self.heading,
        }
    }
}
