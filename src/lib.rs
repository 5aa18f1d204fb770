//! # EvoFlock - Predator/Prey Flocking Through Evolution
//!
//! A population of prey creatures is chased by a single predator in a unit
//! world. Each creature steers with a genome that maps what its eyes see to a
//! heading change. Whenever the predator catches a creature, that creature is
//! rebuilt from two surviving parents by crossover and mutation. Over many
//! steps the population evolves evasive, flock-like behavior with no fitness
//! function beyond "not being caught".
//!
//! ## Features
//!
//! - Angular eye-bucket sensing of peers and the predator
//! - Reflective box or toroidal world
//! - Random, rank, and tournament parent selection
//! - Extended prey genomes carrying speed and size traits
//! - A self-evolving predator with a mutation log
//! - Read-only snapshots for rendering
//!
//! ## Core Modules
//!
//! - [`simulation::world`] - Per-step pipeline and reproduction
//! - [`simulation::prey`] - Prey behavior and genome operators
//! - [`simulation::predator`] - Pursuit, capture, and self-evolution
//! - [`simulation::selection`] - Parent selection policies
//! - [`simulation::sensing`] - Eye-bucket sensing model

/// Core simulation logic and data structures.
pub mod simulation {
    /// Position, heading, and motion shared by every agent.
    pub mod agent;
    /// Error types for construction, loading, and selection.
    pub mod error;
    /// Genome crossover and mutation operators.
    pub mod genome;
    /// Degree trigonometry, wrapping, topology, and random draws.
    pub mod geometric_utils;
    /// Trait for entities that own an agent and move.
    ///
    /// The [`locatable::Locatable`] trait is implemented by [`prey::Prey`] and
    /// [`predator::Predator`].
    pub mod locatable;
    /// Simulation parameters.
    pub mod params;
    /// The predator and its optional self-evolution.
    pub mod predator;
    /// Prey creatures.
    pub mod prey;
    /// Capture statistics tracking.
    pub mod reproduction;
    /// Parent selection policies.
    pub mod selection;
    /// Angular eye-bucket sensing.
    pub mod sensing;
    /// Read-only views for presentation layers.
    pub mod snapshot;
    /// KD-tree neighbour queries for collisions.
    pub mod spatial;
    /// The world controller.
    pub mod world;
}
