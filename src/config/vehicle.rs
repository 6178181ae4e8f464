use crate::config::check_non_negative;
use crate::error::ConfigError;
use crate::math::{Vec3, AIR_DENSITY_SEA_LEVEL};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindConfig {
    pub strength: f64,
    pub rate_of_change: f64,
    pub max_magnitude: f64,
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            strength: 10.0,
            rate_of_change: 0.1,
            max_magnitude: 1.0,
        }
    }
}

impl WindConfig {
    pub fn calm() -> Self {
        Self {
            strength: 0.0,
            rate_of_change: 0.0,
            max_magnitude: 0.0,
        }
    }

    /// Half-width of the uniform per-tick perturbation.
    pub fn perturbation_range(&self) -> f64 {
        0.1 * self.rate_of_change * self.strength
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    pub enabled: bool,
    pub air_density: f64,
    /// Calibration gain that makes drag noticeable at toy velocities. Not a physical constant.
    pub scaling: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            air_density: AIR_DENSITY_SEA_LEVEL,
            scaling: 50_000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UavConfig {
    pub name: String,
    pub mass: f64,
    pub cross_sectional_area: f64,
    pub drag_coefficient: f64,
    pub wind: WindConfig,
    pub drag: DragConfig,
    /// Thrust in newtons per axis: strafe, vertical, forward.
    pub engine_strength: [f64; 3],
}

impl Default for UavConfig {
    fn default() -> Self {
        Self::quadcopter()
    }
}

impl UavConfig {
    pub fn quadcopter() -> Self {
        Self {
            name: "Quadcopter".to_string(),
            mass: 1.0,
            cross_sectional_area: 0.1,
            drag_coefficient: 1.2,
            wind: WindConfig::default(),
            drag: DragConfig::default(),
            engine_strength: [1000.0, 1300.0, 1000.0],
        }
    }

    /// Same airframe with the drag term switched off.
    pub fn drag_free() -> Self {
        Self {
            name: "Quadcopter (no drag)".to_string(),
            drag: DragConfig {
                enabled: false,
                ..DragConfig::default()
            },
            ..Self::quadcopter()
        }
    }

    pub fn engine_strength(&self) -> Vec3 {
        Vec3::from(self.engine_strength)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.mass.is_finite() && self.mass > 0.0) {
            return Err(ConfigError::NonPositiveMass(self.mass));
        }
        check_non_negative("cross_sectional_area", self.cross_sectional_area)?;
        check_non_negative("drag_coefficient", self.drag_coefficient)?;
        check_non_negative("wind.strength", self.wind.strength)?;
        check_non_negative("wind.rate_of_change", self.wind.rate_of_change)?;
        check_non_negative("wind.max_magnitude", self.wind.max_magnitude)?;
        let width = 2.0 * self.wind.perturbation_range();
        if !width.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "wind",
                reason: format!(
                    "perturbation width overflows (strength {}, rate_of_change {})",
                    self.wind.strength, self.wind.rate_of_change
                ),
            });
        }
        check_non_negative("drag.air_density", self.drag.air_density)?;
        check_non_negative("drag.scaling", self.drag.scaling)?;
        Ok(())
    }
}
