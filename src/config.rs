//! Configuration system for the evolution simulator.
//!
//! Supports YAML configuration files with sensible defaults. The default
//! configuration also carries the classic four-habitat seed world.

use crate::organism::SurvivalPolicy;
use crate::traits::Food;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub limits: TraitLimits,
    #[serde(default)]
    pub defaults: TraitDefaults,
    pub habitats: Vec<HabitatConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Breeding and survival rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Chance (percent, 0-100) that a conception inserts one random gene
    pub mutation_rate: u32,
    /// Genes that can be inserted by a mutation
    pub mutation_alphabet: String,
    /// Rule used to decide whether an organism can live in a habitat
    pub survival_policy: SurvivalPolicy,
    /// Minimum score (out of 3) for the scored policy
    pub survival_threshold: u8,
    /// Breed habitats on the rayon pool
    pub parallel_breeding: bool,
    /// Random seed; a fresh one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Bounds that every trait mutation clamps to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitLimits {
    pub min_temp: i32,
    pub max_temp: i32,
    pub min_water: i32,
    pub max_water: i32,
    pub max_birth: i32,
    pub max_life: i32,
}

/// Starting values for traits not inherited from a parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitDefaults {
    pub food_needed: i32,
    /// Only used by founders; newborns inherit the mother's birth rate
    pub birth_rate: i32,
    pub life_span: i32,
}

/// One habitat of the seed world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HabitatConfig {
    pub name: String,
    pub temperature: i32,
    pub water: i32,
    pub foods: Vec<Food>,
    #[serde(default)]
    pub founders: Vec<FounderConfig>,
}

/// An organism placed in a habitat before the first generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FounderConfig {
    pub genome: String,
    pub temp_tolerance: i32,
    pub water_need: i32,
    pub diet: Vec<Food>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_rate: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub life_span: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_needed: Option<i32>,
}

/// Logging and statistics configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Generations between stats history snapshots
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            limits: TraitLimits::default(),
            defaults: TraitDefaults::default(),
            habitats: default_habitats(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 10,
            mutation_alphabet: "abcd".to_string(),
            survival_policy: SurvivalPolicy::Scored,
            survival_threshold: 2,
            parallel_breeding: true,
            seed: None,
        }
    }
}

impl Default for TraitLimits {
    fn default() -> Self {
        Self {
            min_temp: 3,
            max_temp: 5,
            min_water: 1,
            max_water: 4,
            max_birth: 3,
            max_life: 8,
        }
    }
}

impl Default for TraitDefaults {
    fn default() -> Self {
        Self {
            food_needed: 1,
            birth_rate: 1,
            life_span: 4,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 1,
            log_level: "warn".to_string(),
        }
    }
}

impl FounderConfig {
    fn new(genome: &str, temp_tolerance: i32, water_need: i32, diet: &[Food]) -> Self {
        Self {
            genome: genome.to_string(),
            temp_tolerance,
            water_need,
            diet: diet.to_vec(),
            birth_rate: None,
            life_span: None,
            food_needed: None,
        }
    }
}

/// Forest, Plains, Desert and Jungle, with the forest pair as the only founders.
fn default_habitats() -> Vec<HabitatConfig> {
    use Food::*;

    vec![
        HabitatConfig {
            name: "Forest".to_string(),
            temperature: 3,
            water: 3,
            foods: vec![Leaves, Seeds],
            founders: vec![
                FounderConfig::new("ab", 3, 3, &[Leaves]),
                FounderConfig::new("bc", 3, 3, &[Leaves]),
            ],
        },
        HabitatConfig {
            name: "Plains".to_string(),
            temperature: 4,
            water: 2,
            foods: vec![Grass, Seeds],
            founders: Vec::new(),
        },
        HabitatConfig {
            name: "Desert".to_string(),
            temperature: 5,
            water: 1,
            foods: vec![Grass, Seeds],
            founders: Vec::new(),
        },
        HabitatConfig {
            name: "Jungle".to_string(),
            temperature: 5,
            water: 4,
            foods: vec![Leaves, Seeds, Fruit],
            founders: Vec::new(),
        },
    ]
}

impl Config {
    /// Default world with an Adam and Eve pair seeded in every habitat
    pub fn with_all_founders() -> Self {
        use Food::*;

        let mut config = Self::default();
        for habitat in &mut config.habitats {
            habitat.founders = match habitat.name.as_str() {
                "Forest" => vec![
                    FounderConfig::new("ab", 3, 3, &[Leaves]),
                    FounderConfig::new("bc", 3, 3, &[Leaves]),
                ],
                "Plains" => vec![
                    FounderConfig::new("da", 4, 2, &[Grass]),
                    FounderConfig::new("bc", 4, 2, &[Grass]),
                ],
                "Desert" => vec![
                    FounderConfig::new("ba", 5, 1, &[Seeds]),
                    FounderConfig::new("ad", 5, 1, &[Seeds]),
                ],
                "Jungle" => vec![
                    FounderConfig::new("ab", 5, 4, &[Fruit]),
                    FounderConfig::new("cd", 5, 4, &[Fruit]),
                ],
                _ => Vec::new(),
            };
        }
        config
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        let sim = &self.simulation;
        let limits = &self.limits;

        if sim.mutation_rate > 100 {
            return Err("mutation_rate must be between 0 and 100".to_string());
        }
        if sim.mutation_alphabet.is_empty() {
            return Err("mutation_alphabet must not be empty".to_string());
        }
        if !(1..=3).contains(&sim.survival_threshold) {
            return Err("survival_threshold must be between 1 and 3".to_string());
        }
        if limits.min_temp > limits.max_temp {
            return Err("min_temp cannot exceed max_temp".to_string());
        }
        if limits.min_water > limits.max_water {
            return Err("min_water cannot exceed max_water".to_string());
        }
        if limits.max_birth < 1 || limits.max_life < 1 {
            return Err("max_birth and max_life must be >= 1".to_string());
        }
        if self.habitats.is_empty() {
            return Err("at least one habitat is required".to_string());
        }

        let mut names = HashSet::new();
        for habitat in &self.habitats {
            if !names.insert(habitat.name.as_str()) {
                return Err(format!("duplicate habitat name: {}", habitat.name));
            }
            for founder in &habitat.founders {
                self.validate_founder(founder)
                    .map_err(|e| format!("{}: founder {:?}: {}", habitat.name, founder.genome, e))?;
            }
        }
        Ok(())
    }

    fn validate_founder(&self, founder: &FounderConfig) -> Result<(), String> {
        let limits = &self.limits;

        if !(limits.min_temp..=limits.max_temp).contains(&founder.temp_tolerance) {
            return Err("temp_tolerance out of range".to_string());
        }
        if !(limits.min_water..=limits.max_water).contains(&founder.water_need) {
            return Err("water_need out of range".to_string());
        }
        if founder.diet.is_empty() {
            return Err("diet must not be empty".to_string());
        }
        let birth_rate = founder.birth_rate.unwrap_or(self.defaults.birth_rate);
        if !(1..=limits.max_birth).contains(&birth_rate) {
            return Err("birth_rate out of range".to_string());
        }
        let life_span = founder.life_span.unwrap_or(self.defaults.life_span);
        if !(1..=limits.max_life).contains(&life_span) {
            return Err("life_span out of range".to_string());
        }
        Ok(())
    }
}

/// Errors that can occur while loading or saving a configuration
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Yaml(e) => write!(f, "YAML error: {}", e),
            Self::Invalid(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Yaml(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert!(Config::with_all_founders().validate().is_ok());
    }

    #[test]
    fn test_default_world_layout() {
        let config = Config::default();
        let names: Vec<_> = config.habitats.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["Forest", "Plains", "Desert", "Jungle"]);

        let founders: usize = config.habitats.iter().map(|h| h.founders.len()).sum();
        assert_eq!(founders, 2);
        assert_eq!(Config::with_all_founders().habitats[3].founders[1].genome, "cd");
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::with_all_founders();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.limits, loaded.limits);
        assert_eq!(loaded.habitats.len(), 4);
        assert_eq!(loaded.habitats[0].foods, vec![Food::Leaves, Food::Seeds]);
        assert_eq!(loaded.simulation.survival_policy, SurvivalPolicy::Scored);
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("evosim.yaml");

        let mut config = Config::default();
        config.simulation.survival_policy = SurvivalPolicy::Strict;
        config.simulation.seed = Some(7);
        config.save(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.simulation.survival_policy, SurvivalPolicy::Strict);
        assert_eq!(loaded.simulation.seed, Some(7));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut config = Config::default();
        config.simulation.mutation_rate = 101;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.limits.min_temp = 6;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.habitats[1].name = "Forest".to_string();
        assert!(config.validate().unwrap_err().contains("duplicate"));

        let mut config = Config::default();
        config.habitats[0].founders[0].diet.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.habitats.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_file_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "simulation: [").unwrap();

        match Config::from_file(&path) {
            Err(ConfigError::Yaml(_)) => {}
            other => panic!("expected YAML error, got {:?}", other.map(|_| ())),
        }
    }
}
