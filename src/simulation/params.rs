use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ParamsFileError};
use super::predator::PredatorType;
use super::prey::CreatureType;
use super::selection::SelectionMethod;

/// Smallest population that always leaves two distinct parents after a capture.
pub const MIN_CREATURES: usize = 3;

/// Simulation parameters, fixed at world construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Params {
    /// `true` for a reflective box, `false` for a torus.
    pub bounded: bool,
    /// Prey population size.
    pub num_creatures: usize,
    /// Number of angular sensors per agent.
    pub num_eyes: usize,
    /// Distance a prey moves per step.
    pub creature_speed: f32,
    /// Distance the predator moves per step (base value in advanced mode).
    pub predator_speed: f32,
    /// Prey body diameter; also the capture distance of a simple predator.
    pub creature_diameter: f32,
    /// Parent selection policy.
    pub selection_method: SelectionMethod,
    /// Blend weight between the two uniforms of rank selection.
    pub randomness_factor: f32,
    /// Individuals sampled per tournament.
    pub tournament_size: usize,
    /// Fixed or self-evolving predator.
    pub predator_type: PredatorType,
    /// Plain or extended prey genome.
    pub creature_type: CreatureType,
    /// Steps between predator self-mutation events (advanced mode).
    pub evolution_threshold: u64,
    /// Per-gene mutation probability of the predator genome.
    pub predator_mutation_rate: f32,
    /// Extra trait genes carried by extended prey.
    pub extended_traits: usize,
    /// Cap on selection resampling before falling back to a deterministic pick.
    pub max_resample_attempts: usize,
    /// Captures kept in the rolling reproduction statistics.
    pub stats_history: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            bounded: false,
            num_creatures: 50,
            num_eyes: 8,
            creature_speed: 0.01,
            predator_speed: 0.015,
            creature_diameter: 0.015,
            selection_method: SelectionMethod::Random,
            randomness_factor: 0.2,
            tournament_size: 3,
            predator_type: PredatorType::Simple,
            creature_type: CreatureType::Simple,
            evolution_threshold: 500,
            predator_mutation_rate: 0.2,
            extended_traits: 2,
            max_resample_attempts: 64,
            stats_history: 100,
        }
    }
}

impl Params {
    /// Length of a prey genotype for the configured creature type.
    pub fn genotype_length(&self) -> usize {
        let base = self.num_eyes * self.num_eyes;
        match self.creature_type {
            CreatureType::Simple => base,
            CreatureType::Extended => base + self.extended_traits,
        }
    }

    /// Checks every construction constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_creatures < MIN_CREATURES {
            return Err(ConfigError::TooFewCreatures {
                min: MIN_CREATURES,
                actual: self.num_creatures,
            });
        }
        if self.num_eyes == 0 {
            return Err(ConfigError::NoEyes);
        }
        for (field, value) in [
            ("creature_speed", self.creature_speed),
            ("predator_speed", self.predator_speed),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::Negative { field, value });
            }
        }
        if !(self.creature_diameter > 0.0 && self.creature_diameter.is_finite()) {
            return Err(ConfigError::NonPositive {
                field: "creature_diameter",
                value: self.creature_diameter,
            });
        }
        if !(0.0..=1.0).contains(&self.randomness_factor) {
            return Err(ConfigError::RandomnessFactor(self.randomness_factor));
        }
        if self.selection_method == SelectionMethod::Tournament
            && !(2..=self.num_creatures).contains(&self.tournament_size)
        {
            return Err(ConfigError::TournamentSize {
                size: self.tournament_size,
                population: self.num_creatures,
            });
        }
        if self.predator_type == PredatorType::Advanced {
            if self.evolution_threshold == 0 {
                return Err(ConfigError::EvolutionThreshold);
            }
            if !(0.0..=1.0).contains(&self.predator_mutation_rate) {
                return Err(ConfigError::MutationRate {
                    field: "predator_mutation_rate",
                    value: self.predator_mutation_rate,
                });
            }
        }
        if self.max_resample_attempts == 0 {
            return Err(ConfigError::ResampleAttempts);
        }
        Ok(())
    }

    /// Loads and validates parameters from a JSON file. Missing fields take
    /// their default values.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ParamsFileError> {
        let json = std::fs::read_to_string(path)?;
        let params: Params = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }
}
