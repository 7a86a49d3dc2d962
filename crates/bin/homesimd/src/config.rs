//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `homesim.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Simulation loop settings.
    pub simulation: SimulationSettings,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Simulation loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Scenario activated on startup.
    pub scenario: String,
    /// Seconds between simulation ticks.
    pub tick_interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `homesim.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("homesim.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HOMESIM_SCENARIO") {
            self.simulation.scenario = val;
        }
        if let Ok(val) = std::env::var("HOMESIM_TICK_INTERVAL") {
            if let Ok(secs) = val.parse() {
                self.simulation.tick_interval_secs = secs;
            }
        }
        if let Ok(val) = std::env::var("HOMESIM_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.simulation.scenario.is_empty() {
            return Err(ConfigError::Validation(
                "startup scenario must not be empty".to_string(),
            ));
        }
        if self.simulation.tick_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "tick interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            scenario: "Normal Day".to_string(),
            tick_interval_secs: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "homesimd=info,homesim=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.simulation.scenario, "Normal Day");
        assert_eq!(config.simulation.tick_interval_secs, 5);
        assert_eq!(config.logging.filter, "homesimd=info,homesim=info");
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.simulation.tick_interval_secs, 5);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [simulation]
            scenario = 'Away Mode'
            tick_interval_secs = 1

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.simulation.scenario, "Away Mode");
        assert_eq!(config.simulation.tick_interval_secs, 1);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [simulation]
            tick_interval_secs = 10
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.simulation.tick_interval_secs, 10);
        assert_eq!(config.simulation.scenario, "Normal Day");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.simulation.tick_interval_secs, 5);
    }

    #[test]
    fn should_reject_zero_tick_interval() {
        let mut config = Config::default();
        config.simulation.tick_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_scenario() {
        let mut config = Config::default();
        config.simulation.scenario = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
