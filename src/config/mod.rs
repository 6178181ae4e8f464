pub mod simulation;
pub mod vehicle;

pub use simulation::{ForceScaling, InputLossPolicy, SimulationConfig};
pub use vehicle::{DragConfig, UavConfig, WindConfig};

use crate::error::{ConfigError, SimError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Full run configuration. Immutable once a scheduler has been built from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub uav: UavConfig,
}

impl Config {
    pub fn new(simulation: SimulationConfig, uav: UavConfig) -> Self {
        Self { simulation, uav }
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, SimError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulation.validate()?;
        self.uav.validate()
    }
}

/// Non-negative and finite, or the named parameter is rejected.
pub(crate) fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = Config::from_yaml_str(
            "simulation:\n  tick_rate: 30\nuav:\n  mass: 2.5\n  drag:\n    enabled: false\n",
        )
        .unwrap();

        assert_eq!(config.simulation.tick_rate, 30);
        assert_eq!(config.uav.mass, 2.5);
        assert!(!config.uav.drag.enabled);
        assert_eq!(config.uav.drag.scaling, DragConfig::default().scaling);
        assert_eq!(config.uav.engine_strength, [1000.0, 1300.0, 1000.0]);
    }

    #[test]
    fn test_yaml_rejects_invalid_values() {
        let err = Config::from_yaml_str("uav:\n  mass: 0.0\n").unwrap_err();
        assert!(matches!(
            err,
            SimError::Config(ConfigError::NonPositiveMass(m)) if m == 0.0
        ));

        let err = Config::from_yaml_str("simulation:\n  tick_rate: 0\n").unwrap_err();
        assert!(matches!(err, SimError::Config(ConfigError::ZeroTickRate)));
    }

    #[test]
    fn test_yaml_syntax_error() {
        let err = Config::from_yaml_str("simulation: [unterminated").unwrap_err();
        assert!(matches!(err, SimError::Yaml(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "simulation:\n  seed: 7\n  force_scaling: per_second").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.force_scaling, ForceScaling::PerSecond);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
