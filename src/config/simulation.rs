use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// How the per-second net force is turned into a per-tick velocity change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceScaling {
    /// Net force is divided by the tick rate before it reaches the body, and the body
    /// then integrates with `dt = 1 / tick_rate`.
    #[default]
    PerTick,
    /// Net force reaches the body unscaled and is integrated with `dt = 1 / tick_rate`.
    PerSecond,
}

/// What the control generator does on a tick with no fresh input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputLossPolicy {
    #[default]
    HoldLast,
    Zero,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub tick_rate: u32,
    /// `None` runs until cancelled.
    pub max_ticks: Option<u64>,
    pub real_time: bool,
    pub seed: u64,
    pub force_scaling: ForceScaling,
    pub input_loss: InputLossPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            max_ticks: None,
            real_time: false,
            seed: 42,
            force_scaling: ForceScaling::PerTick,
            input_loss: InputLossPolicy::HoldLast,
        }
    }
}

impl SimulationConfig {
    pub fn interactive() -> Self {
        Self {
            real_time: true,
            ..Self::default()
        }
    }

    pub fn headless(ticks: u64) -> Self {
        Self {
            max_ticks: Some(ticks),
            real_time: false,
            ..Self::default()
        }
    }

    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::ZeroTickRate);
        }
        Ok(())
    }
}
