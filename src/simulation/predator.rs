//! The predator: nearest-prey pursuit, capture detection, and optional self-evolution.
//!
//! An advanced predator carries a three-gene genome (speed, size, eye count).
//! Every `evolution_threshold` steps it recombines two of its past mutations,
//! mutates itself, and logs the change. Captures are credited to the latest
//! log entry, which makes catches the fitness of each logged mutation.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::agent::Agent;
use super::genome;
use super::geometric_utils::{self, Topology, map_gene};
use super::locatable::Locatable;
use super::params::Params;
use super::selection::Selector;
use super::sensing::{self, Sense, SenseContext};

/// Genes in the advanced predator genome.
pub const PREDATOR_GENES: usize = 3;
/// Log entries required before the predator recombines past mutations.
pub const MIN_LOG_FOR_CROSSOVER: usize = 5;
/// Eye-count range of the advanced predator's third gene.
pub const PREDATOR_EYE_RANGE: (usize, usize) = (4, 12);

/// Fixed or self-evolving predator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredatorType {
    /// Constant speed and size.
    #[default]
    Simple,
    /// Periodically mutates its own speed, size, and eye-count genes.
    Advanced,
}

/// One self-mutation of the predator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MutationLogEntry {
    /// Genome before mutation.
    pub original: Array1<f32>,
    /// Genome after mutation.
    pub mutated: Array1<f32>,
    /// Step at which the mutation happened.
    pub timestep: u64,
    /// Captures made while this mutation was the latest.
    pub creatures_caught: u64,
}

/// Nearest prey found by the predator's scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Index into the world's creature collection.
    pub index: usize,
    /// Distance under the world topology.
    pub distance: f32,
    /// Bearing from the predator in degrees.
    pub bearing: f32,
}

/// What the predator does with its turn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredatorAction {
    /// The target is within reach and gets replaced.
    Capture {
        /// Index of the caught prey.
        prey: usize,
    },
    /// The predator spends the step evolving itself.
    Evolve,
    /// The predator turns to the bearing and moves.
    Pursue {
        /// Heading towards the target.
        bearing: f32,
    },
}

/// The single predator of the world.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Predator {
    /// Shared motion state. `size` is the capture distance.
    pub agent: Agent,
    /// Fixed or self-evolving.
    pub predator_type: PredatorType,
    /// Speed, size, and eye-count genes in `[-1, 1]`.
    pub genotype: Array1<f32>,
    /// Every self-mutation in order.
    pub mutation_log: Vec<MutationLogEntry>,
    /// Steps between self-mutations.
    pub evolution_threshold: u64,
    /// Per-gene mutation probability.
    pub mutation_rate: f32,
    /// Captures since the last self-mutation.
    pub creatures_caught: u64,
    /// Captures over the whole run.
    pub total_caught: u64,
    /// Eye count encoded by the genome. Metadata only: sensing keeps `num_eyes` eyes.
    pub eye_count: usize,
    /// Result of the latest nearest-prey scan.
    pub target: Option<Target>,
    base_speed: f32,
    base_size: f32,
}

impl Predator {
    /// Creates a predator at a random position. The genome starts at zero,
    /// which maps exactly onto the base speed and size.
    pub fn new(rng: &mut impl Rng, params: &Params) -> Self {
        let agent = Agent::new_random(
            rng,
            params.predator_speed,
            params.creature_diameter,
            params.num_eyes,
        );
        let mut predator = Self {
            agent,
            predator_type: params.predator_type,
            genotype: Array1::zeros(PREDATOR_GENES),
            mutation_log: Vec::new(),
            evolution_threshold: params.evolution_threshold,
            mutation_rate: params.predator_mutation_rate,
            creatures_caught: 0,
            total_caught: 0,
            eye_count: params.num_eyes,
            target: None,
            base_speed: params.predator_speed,
            base_size: params.creature_diameter,
        };
        predator.apply_traits();
        predator
    }

    /// Returns `true` for the self-evolving variant.
    pub fn is_advanced(&self) -> bool {
        self.predator_type == PredatorType::Advanced
    }

    /// Scans every prey and returns the nearest one, or `None` for an empty slice.
    pub fn find_nearest(&self, prey: &[[f32; 2]], topology: &Topology) -> Option<Target> {
        let mut nearest: Option<Target> = None;
        for (index, p) in prey.iter().enumerate() {
            let (dx, dy) = topology.displacement(self.agent.x(), self.agent.y(), p[0], p[1]);
            let distance = dx.hypot(dy);
            if nearest.is_none_or(|n| distance < n.distance) {
                nearest = Some(Target {
                    index,
                    distance,
                    bearing: geometric_utils::bearing(dx, dy),
                });
            }
        }
        nearest
    }

    /// Decides the turn for a freshly scanned target.
    ///
    /// Capture wins when the target is closer than the predator's size.
    /// Otherwise an advanced predator evolves on positive multiples of its
    /// threshold, and pursues on every other step.
    pub fn decide(&self, target: &Target, timesteps: u64) -> PredatorAction {
        if target.distance < self.agent.size {
            PredatorAction::Capture { prey: target.index }
        } else if self.is_advanced() && timesteps > 0 && timesteps % self.evolution_threshold == 0
        {
            PredatorAction::Evolve
        } else {
            PredatorAction::Pursue {
                bearing: target.bearing,
            }
        }
    }

    /// Counts a capture and credits it to the latest logged mutation.
    pub fn record_capture(&mut self) {
        self.creatures_caught += 1;
        self.total_caught += 1;
        if self.is_advanced() {
            if let Some(latest) = self.mutation_log.last_mut() {
                latest.creatures_caught += 1;
            }
        }
    }

    /// Turns to `bearing` and moves one step.
    pub fn pursue(&mut self, bearing: f32, topology: &Topology, rng: &mut impl Rng) {
        self.agent.heading = geometric_utils::normalize_heading(bearing);
        self.update_position(topology, rng);
    }

    /// Runs one self-evolution event: log crossover when enough mutations are
    /// logged, then self-mutation, then resets the capture counter.
    pub fn evolve(&mut self, selector: &Selector, timestep: u64, rng: &mut impl Rng) {
        let recombined = self.crossover_from_log(selector, rng);
        let original = self.genotype.clone();
        self.self_mutate(timestep, rng);
        self.creatures_caught = 0;

        info!(
            timestep,
            recombined,
            original = ?original.to_vec(),
            mutated = ?self.genotype.to_vec(),
            speed = self.agent.speed,
            size = self.agent.size,
            eyes = self.eye_count,
            log_len = self.mutation_log.len(),
            "predator evolved"
        );
    }

    /// Replaces the genome with a crossover of two logged mutations, picked by
    /// `selector` with their catch counts as fitness. Returns `false` when the
    /// log is too short.
    pub fn crossover_from_log(&mut self, selector: &Selector, rng: &mut impl Rng) -> bool {
        if self.mutation_log.len() < MIN_LOG_FOR_CROSSOVER {
            return false;
        }
        let fitness: Vec<u64> = self
            .mutation_log
            .iter()
            .map(|entry| entry.creatures_caught)
            .collect();
        let Ok((a, b)) = selector.select_parents(&fitness, None, rng) else {
            return false;
        };
        let (child, _) = genome::crossover(
            &self.mutation_log[a].mutated,
            &self.mutation_log[b].mutated,
            rng,
        );
        self.genotype = child;
        self.apply_traits();
        true
    }

    /// Mutates each gene with probability `mutation_rate` and appends a log entry.
    pub fn self_mutate(&mut self, timestep: u64, rng: &mut impl Rng) {
        let original = self.genotype.clone();
        genome::mutate(&mut self.genotype, f64::from(self.mutation_rate), rng);
        self.apply_traits();
        self.mutation_log.push(MutationLogEntry {
            original,
            mutated: self.genotype.clone(),
            timestep,
            creatures_caught: 0,
        });
    }

    fn apply_traits(&mut self) {
        if !self.is_advanced() {
            return;
        }
        self.agent.speed = map_gene(self.genotype[0], 0.5 * self.base_speed, 1.5 * self.base_speed);
        self.agent.size = map_gene(self.genotype[1], 0.5 * self.base_size, 1.5 * self.base_size);
        let (lo, hi) = PREDATOR_EYE_RANGE;
        self.eye_count = map_gene(self.genotype[2], lo as f32, hi as f32).round() as usize;
    }
}

impl Locatable for Predator {
    fn agent(&self) -> &Agent {
        &self.agent
    }

    fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }
}

impl Sense for Predator {
    fn update_eyes(&mut self, ctx: &SenseContext<'_>, _self_index: Option<usize>) {
        sensing::count_into_eyes(&mut self.agent, &ctx.topology, ctx.prey, None);
    }
}
