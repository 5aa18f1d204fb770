//! Error types for world construction, parameter loading, and parent selection.

use thiserror::Error;

/// Invalid construction parameters. Raised by [`super::params::Params::validate`]
/// before any agent is created.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Reproduction needs two distinct survivors besides the caught creature.
    #[error("num_creatures must be at least {min}, got {actual}")]
    TooFewCreatures {
        /// Smallest accepted population.
        min: usize,
        /// Requested population.
        actual: usize,
    },
    /// At least one angular sensor is required.
    #[error("num_eyes must be at least 1")]
    NoEyes,
    /// Selection method string did not match `random`, `rank` or `tournament`.
    #[error("unknown selection method: {0:?}")]
    UnknownSelectionMethod(String),
    /// Tournament size outside `[2, num_creatures]`.
    #[error("tournament_size must be in [2, {population}], got {size}")]
    TournamentSize {
        /// Requested tournament size.
        size: usize,
        /// Population size.
        population: usize,
    },
    /// Rank-selection blend factor outside `[0, 1]`.
    #[error("randomness_factor must be in [0, 1], got {0}")]
    RandomnessFactor(f32),
    /// A size that must be strictly positive.
    #[error("{field} must be positive, got {value}")]
    NonPositive {
        /// Parameter name.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
    /// A speed that must not be negative.
    #[error("{field} must not be negative, got {value}")]
    Negative {
        /// Parameter name.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
    /// The predator must evolve at a positive step interval.
    #[error("evolution_threshold must be at least 1")]
    EvolutionThreshold,
    /// A probability outside `[0, 1]`.
    #[error("{field} must be in [0, 1], got {value}")]
    MutationRate {
        /// Parameter name.
        field: &'static str,
        /// Offending value.
        value: f32,
    },
    /// Bounded resampling needs at least one attempt.
    #[error("max_resample_attempts must be at least 1")]
    ResampleAttempts,
}

/// Failure to load parameters from disk.
#[derive(Debug, Error)]
pub enum ParamsFileError {
    /// The file could not be read.
    #[error("failed to read params file: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid params JSON.
    #[error("failed to parse params file: {0}")]
    Json(#[from] serde_json::Error),
    /// The file parsed but describes an invalid world.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// The selector could not produce two distinct eligible parents.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SelectionError {
    /// Fewer eligible individuals than parents requested.
    #[error("population too small for selection: {eligible} eligible, {needed} needed")]
    PopulationTooSmall {
        /// Individuals that are not excluded.
        eligible: usize,
        /// Distinct parents required.
        needed: usize,
    },
    /// Reproduction was requested before the predator picked a target.
    #[error("no caught creature: the predator has not scanned yet")]
    NoTarget,
}
