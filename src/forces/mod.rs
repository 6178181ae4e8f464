pub mod control;
pub mod drag;
pub mod wind;

pub use control::{AxisIntent, Control, ControlInput};
pub use drag::Drag;
pub use wind::Wind;

use crate::math::Vec3;

/// Everything a generator may read when it is sampled. Built once per tick, before
/// any generator runs, so every generator sees the same body state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceContext {
    pub tick: u64,
    pub velocity: Vec3,
    pub cross_sectional_area: f64,
    pub drag_coefficient: f64,
}

/// A source of force in newtons, world frame. Sampled exactly once per tick.
pub trait ForceGenerator {
    fn name(&self) -> &'static str;

    fn sample_force(&mut self, ctx: &ForceContext) -> Vec3;
}
