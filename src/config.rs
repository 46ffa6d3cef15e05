//! Configuration for the breeding service.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parameters: SimulationParameters,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Environment and breeding parameters for one simulation run.
///
/// Read-only inputs to the evaluator and the breeding engine. Serialized
/// camelCase, matching the browser-side simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationParameters {
    /// Target population size
    pub population_size: u32,
    /// Probability that a trait or weight mutates, in [0, 1]
    pub mutation_rate: f64,
    /// Probability that crossover (vs. single-parent copy) is used, in [0, 1]
    pub crossover_rate: f64,
    /// Fraction of the tank with food available, in [0, 1]
    pub food_availability: f64,
    /// Fraction of the tank patrolled by predators, in [0, 1]
    pub predator_density: f64,
    /// Water temperature in degrees Celsius
    pub water_temperature: i32,
}

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind the HTTP server to
    pub listen_addr: String,
    /// Directory served under /static
    pub static_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            parameters: SimulationParameters::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            population_size: 10,
            mutation_rate: 0.01,
            crossover_rate: 0.7,
            food_availability: 0.5,
            predator_density: 0.2,
            water_temperature: 20,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            static_dir: "static".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        self.parameters.validate()?;
        if self.server.listen_addr.is_empty() {
            return Err("listen_addr must not be empty".to_string());
        }
        Ok(())
    }
}

impl SimulationParameters {
    /// Validate parameter ranges
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size == 0 {
            return Err("population_size must be > 0".to_string());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be between 0 and 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err("crossover_rate must be between 0 and 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.food_availability) {
            return Err("food_availability must be between 0 and 1".to_string());
        }
        if !(0.0..=1.0).contains(&self.predator_density) {
            return Err("predator_density must be between 0 and 1".to_string());
        }
        Ok(())
    }
}
