//! Configuration types for the simulation.

use crate::{Error, Result, Species, SpeciesTraits};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// Largest grid side whose cell count still fits the grid index
pub const MAX_DIMENSION: i32 = 46_340;

/// Grid configuration parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Side length of the square toroidal grid
    pub dimension: i32,
    /// Per-cell, per-generation probability that grass appears (0.0 to 1.0)
    pub grass_rate: f64,
    /// Whether the grid starts fully covered in grass
    pub initial_grass: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dimension: 65,
            grass_rate: 0.035,
            initial_grass: true,
        }
    }
}

/// Per-species population and constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesConfig {
    /// Animals spawned at random positions when the run starts
    pub initial_population: usize,
    pub max_offspring: u32,
    pub starvation_threshold: u32,
    pub reproduction_threshold: u32,
}

impl SpeciesConfig {
    pub fn for_species(species: Species) -> Self {
        let traits = species.default_traits();
        Self {
            initial_population: species.default_initial_population(),
            max_offspring: traits.max_offspring,
            starvation_threshold: traits.starvation_threshold,
            reproduction_threshold: traits.reproduction_threshold,
        }
    }

    pub fn traits(&self) -> SpeciesTraits {
        SpeciesTraits {
            max_offspring: self.max_offspring,
            starvation_threshold: self.starvation_threshold,
            reproduction_threshold: self.reproduction_threshold,
        }
    }

    fn validate(&self, species: Species) -> Result<()> {
        if self.starvation_threshold == 0 {
            return Err(Error::invalid_config(
                format!("{}.starvation_threshold", section(species)),
                "must be positive",
            ));
        }
        if self.reproduction_threshold == 0 {
            return Err(Error::invalid_config(
                format!("{}.reproduction_threshold", section(species)),
                "must be positive",
            ));
        }
        Ok(())
    }
}

/// A species section as written in a config file; absent fields keep the species defaults
#[derive(Debug, Deserialize)]
struct SpeciesOverrides {
    initial_population: Option<usize>,
    max_offspring: Option<u32>,
    starvation_threshold: Option<u32>,
    reproduction_threshold: Option<u32>,
}

impl SpeciesOverrides {
    fn apply(self, species: Species) -> SpeciesConfig {
        let defaults = SpeciesConfig::for_species(species);
        SpeciesConfig {
            initial_population: self.initial_population.unwrap_or(defaults.initial_population),
            max_offspring: self.max_offspring.unwrap_or(defaults.max_offspring),
            starvation_threshold: self
                .starvation_threshold
                .unwrap_or(defaults.starvation_threshold),
            reproduction_threshold: self
                .reproduction_threshold
                .unwrap_or(defaults.reproduction_threshold),
        }
    }
}

fn rabbit_section<'de, D>(deserializer: D) -> std::result::Result<SpeciesConfig, D::Error>
where
    D: Deserializer<'de>,
{
    SpeciesOverrides::deserialize(deserializer).map(|o| o.apply(Species::Rabbit))
}

fn fox_section<'de, D>(deserializer: D) -> std::result::Result<SpeciesConfig, D::Error>
where
    D: Deserializer<'de>,
{
    SpeciesOverrides::deserialize(deserializer).map(|o| o.apply(Species::Fox))
}

fn section(species: Species) -> &'static str {
    match species {
        Species::Rabbit => "rabbits",
        Species::Fox => "foxes",
    }
}

/// Complete configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Generations run by a batch execution
    pub generations: u64,
    pub grid: GridConfig,
    #[serde(deserialize_with = "rabbit_section")]
    pub rabbits: SpeciesConfig,
    #[serde(deserialize_with = "fox_section")]
    pub foxes: SpeciesConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            generations: 150,
            grid: GridConfig::default(),
            rabbits: SpeciesConfig::for_species(Species::Rabbit),
            foxes: SpeciesConfig::for_species(Species::Fox),
        }
    }
}

impl SimConfig {
    pub fn species(&self, species: Species) -> &SpeciesConfig {
        match species {
            Species::Rabbit => &self.rabbits,
            Species::Fox => &self.foxes,
        }
    }

    pub fn species_mut(&mut self, species: Species) -> &mut SpeciesConfig {
        match species {
            Species::Rabbit => &mut self.rabbits,
            Species::Fox => &mut self.foxes,
        }
    }

    /// Reject any parameter that would make the run ill-defined
    pub fn validate(&self) -> Result<()> {
        if self.grid.dimension <= 0 {
            return Err(Error::invalid_config(
                "grid.dimension",
                format!("must be positive, got {}", self.grid.dimension),
            ));
        }
        if self.grid.dimension > MAX_DIMENSION {
            return Err(Error::invalid_config(
                "grid.dimension",
                format!(
                    "must be at most {}, got {}",
                    MAX_DIMENSION, self.grid.dimension
                ),
            ));
        }

        let rate = self.grid.grass_rate;
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            return Err(Error::invalid_config(
                "grid.grass_rate",
                format!("must be within [0, 1], got {}", rate),
            ));
        }

        for species in Species::all() {
            self.species(species).validate(species)?;
        }

        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "Loaded configuration file");
        Self::from_json_str(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let config = SimConfig::default();
        assert_eq!(config.grid.dimension, 65);
        assert_eq!(config.grid.grass_rate, 0.035);
        assert!(config.grid.initial_grass);
        assert_eq!(config.generations, 150);
        assert_eq!(config.rabbits.initial_population, 50);
        assert_eq!(config.foxes.initial_population, 35);
        assert_eq!(config.foxes.traits(), Species::Fox.default_traits());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_dimension() {
        let mut config = SimConfig::default();
        config.grid.dimension = 0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.parameter(), Some("grid.dimension"));

        config.grid.dimension = -4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_dimension() {
        let mut config = SimConfig::default();
        config.grid.dimension = MAX_DIMENSION;
        assert!(config.validate().is_ok());

        config.grid.dimension = MAX_DIMENSION + 1;
        let err = config.validate().unwrap_err();
        assert_eq!(err.parameter(), Some("grid.dimension"));

        config.grid.dimension = i32::MAX;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_dimension_cell_count_fits_index() {
        let cells = MAX_DIMENSION as i64 * MAX_DIMENSION as i64;
        assert!(cells <= i32::MAX as i64);
        let next = (MAX_DIMENSION as i64 + 1).pow(2);
        assert!(next > i32::MAX as i64);
    }

    #[test]
    fn test_rejects_out_of_range_grass_rate() {
        for rate in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let mut config = SimConfig::default();
            config.grid.grass_rate = rate;
            let err = config.validate().unwrap_err();
            assert_eq!(err.parameter(), Some("grid.grass_rate"));
        }

        let mut config = SimConfig::default();
        config.grid.grass_rate = 1.0;
        assert!(config.validate().is_ok());
        config.grid.grass_rate = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_thresholds() {
        let mut config = SimConfig::default();
        config.foxes.starvation_threshold = 0;
        assert_eq!(
            config.validate().unwrap_err().parameter(),
            Some("foxes.starvation_threshold")
        );

        let mut config = SimConfig::default();
        config.rabbits.reproduction_threshold = 0;
        assert_eq!(
            config.validate().unwrap_err().parameter(),
            Some("rabbits.reproduction_threshold")
        );
    }

    #[test]
    fn test_zero_offspring_is_allowed() {
        let mut config = SimConfig::default();
        config.species_mut(Species::Rabbit).max_offspring = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config = SimConfig::from_json_str(r#"{ "seed": 7, "grid": { "dimension": 20 } }"#)
            .unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.grid.dimension, 20);
        assert_eq!(config.grid.grass_rate, 0.035);
        assert_eq!(config.rabbits, SpeciesConfig::for_species(Species::Rabbit));
    }

    #[test]
    fn test_partial_species_section() {
        let config = SimConfig::from_json_str(
            r#"{ "foxes": { "initial_population": 10 }, "rabbits": { "max_offspring": 4 } }"#,
        )
        .unwrap();

        assert_eq!(config.foxes.initial_population, 10);
        assert_eq!(config.foxes.traits(), Species::Fox.default_traits());
        assert_eq!(config.rabbits.initial_population, 50);
        assert_eq!(config.rabbits.max_offspring, 4);
        assert_eq!(config.rabbits.starvation_threshold, 3);
    }

    #[test]
    fn test_json_is_validated() {
        let err = SimConfig::from_json_str(r#"{ "grid": { "dimension": 0 } }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));

        let err = SimConfig::from_json_str(
            r#"{ "rabbits": { "initial_population": -3, "max_offspring": 1,
                 "starvation_threshold": 3, "reproduction_threshold": 2 } }"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = SimConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SimConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }
}
