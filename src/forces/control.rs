use crate::forces::{ForceContext, ForceGenerator};
use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// Operator intent on a single axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisIntent {
    Negative,
    #[default]
    Neutral,
    Positive,
}

impl AxisIntent {
    /// Combines a pair of opposing keys. Holding both cancels out.
    pub fn from_keys(positive: bool, negative: bool) -> Self {
        match (positive, negative) {
            (true, false) => AxisIntent::Positive,
            (false, true) => AxisIntent::Negative,
            _ => AxisIntent::Neutral,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            AxisIntent::Negative => -1.0,
            AxisIntent::Neutral => 0.0,
            AxisIntent::Positive => 1.0,
        }
    }
}

/// One input snapshot: strafe (x), vertical (y) and forward (z) intent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlInput {
    pub strafe: AxisIntent,
    pub vertical: AxisIntent,
    pub forward: AxisIntent,
}

impl ControlInput {
    pub fn new(strafe: AxisIntent, vertical: AxisIntent, forward: AxisIntent) -> Self {
        Self {
            strafe,
            vertical,
            forward,
        }
    }

    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn direction(&self) -> Vec3 {
        Vec3::new(
            self.strafe.as_f64(),
            self.vertical.as_f64(),
            self.forward.as_f64(),
        )
    }
}

/// Operator thrust. Holds the latest input snapshot; it never polls a device itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Control {
    pub engine_strength: Vec3,
    input: ControlInput,
}

impl Control {
    pub fn new(engine_strength: Vec3) -> Self {
        Self {
            engine_strength,
            input: ControlInput::neutral(),
        }
    }

    pub fn set_input(&mut self, input: ControlInput) {
        self.input = input;
    }

    pub fn clear(&mut self) {
        self.input = ControlInput::neutral();
    }

    pub fn input(&self) -> ControlInput {
        self.input
    }

    pub fn force(&self) -> Vec3 {
        self.input.direction().component_mul(&self.engine_strength)
    }
}

impl ForceGenerator for Control {
    fn name(&self) -> &'static str {
        "control"
    }

    fn sample_force(&mut self, _ctx: &ForceContext) -> Vec3 {
        self.force()
    }
}
