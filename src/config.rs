//! Configuration system for the Wa-Tor simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use crate::error::ConfigError;
use crate::neighbourhood::Neighbourhood;
use crate::world::Rules;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub world: WorldConfig,
    #[serde(default)]
    pub population: PopulationConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Grid dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Number of columns
    pub width: usize,
    /// Number of rows
    pub height: usize,
}

/// Initial placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Prey scattered by `initialize`
    pub initial_prey: usize,
    /// Predators scattered by `initialize`
    pub initial_predators: usize,
}

/// Breeding, starvation and movement rules
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Age at which prey reproduce
    pub prey_reproduction_age: u32,
    /// Age at which predators reproduce
    pub predator_reproduction_age: u32,
    /// Ticks without a kill a predator survives
    pub predator_starvation_age: u32,
    /// Jitter fraction for offspring counters (0.0 - 1.0)
    pub age_variance: f64,
    /// `neumann` or `moore`
    pub neighbourhood: Neighbourhood,
}

/// Logging and statistics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Ticks between stats snapshots
    pub stats_interval: u64,
    /// Maximum snapshots kept in history
    pub history_window: usize,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 160,
            height: 120,
        }
    }
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            initial_prey: 5000,
            initial_predators: 1000,
        }
    }
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            prey_reproduction_age: 10,
            predator_reproduction_age: 25,
            predator_starvation_age: 10,
            age_variance: 0.5,
            neighbourhood: Neighbourhood::VonNeumann,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 10,
            history_window: 500,
            log_level: "info".to_string(),
        }
    }
}

impl RulesConfig {
    pub fn to_rules(&self) -> Rules {
        Rules {
            prey_reproduction_age: self.prey_reproduction_age,
            predator_reproduction_age: self.predator_reproduction_age,
            predator_starvation_age: self.predator_starvation_age,
            age_variance: self.age_variance,
            neighbourhood: self.neighbourhood,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.world.width == 0 || self.world.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.world.width,
                height: self.world.height,
            });
        }
        self.rules.to_rules().validate()?;
        if self.logging.stats_interval == 0 {
            return Err(ConfigError::Invalid("stats_interval must be > 0".to_string()));
        }
        if self.logging.history_window == 0 {
            return Err(ConfigError::Invalid("history_window must be > 0".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.rules.neighbourhood = Neighbourhood::Moore;
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("moore"));

        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.world.width, loaded.world.width);
        assert_eq!(loaded.rules.neighbourhood, Neighbourhood::Moore);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = "world:\n  width: 40\n  height: 30\nrules:\n  neighbourhood: moore\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.world.width, 40);
        assert_eq!(config.rules.neighbourhood, Neighbourhood::Moore);
        assert_eq!(config.rules.prey_reproduction_age, 10);
        assert_eq!(config.population.initial_prey, 5000);
        assert_eq!(config.logging.log_level, "info");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.world.width = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDimensions { .. })
        ));

        let mut config = Config::default();
        config.rules.age_variance = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::InvalidAgeVariance(_))));
    }

    #[test]
    fn test_unknown_neighbourhood_and_negative_age_fail_to_parse() {
        let yaml = "world:\n  width: 4\n  height: 4\nrules:\n  neighbourhood: hex\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());

        let yaml = "world:\n  width: 4\n  height: 4\nrules:\n  prey_reproduction_age: -3\n";
        assert!(serde_yaml::from_str::<Config>(yaml).is_err());
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wator.yaml");

        let mut config = Config::default();
        config.population.initial_predators = 42;
        config.save(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.population.initial_predators, 42);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = Config::from_file("/nonexistent/wator.yaml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
