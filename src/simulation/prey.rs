//! Prey behavior: sensing response, collisions, ageing, and reproduction operators.
//!
//! A prey's genotype holds one row of `num_eyes` weights per predator
//! direction. The row picked by `predator_in_eye` turns peer counts into a
//! heading change. Extended prey carry extra trait genes after those rows.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::genome::{self, PREY_MUTATION_RATE};
use super::geometric_utils::{self, Topology, map_gene};
use super::locatable::Locatable;
use super::params::Params;
use super::sensing::{self, Sense, SenseContext};

/// Prey genome layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatureType {
    /// `num_eyes²` steering weights.
    #[default]
    Simple,
    /// Steering weights followed by speed and size trait genes.
    Extended,
}

/// Position, size and index of a prey at collision time.
#[derive(Debug, Clone, Copy)]
pub struct Body {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
    /// Diameter.
    pub size: f32,
}

/// A prey creature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prey {
    /// Shared motion state.
    pub agent: Agent,
    /// Steering weights (plus trait genes for extended prey).
    pub genotype: Array1<f32>,
    /// Eye that held the predator during the last sensing pass.
    pub predator_in_eye: usize,
    /// Steps survived since the last respawn.
    pub lifespan: u64,
    /// Genome layout.
    pub creature_type: CreatureType,
    base_speed: f32,
    base_size: f32,
}

impl Prey {
    /// Creates a prey with a random genome, position, and heading.
    pub fn new_random(rng: &mut impl Rng, params: &Params) -> Self {
        let agent = Agent::new_random(
            rng,
            params.creature_speed,
            params.creature_diameter,
            params.num_eyes,
        );
        let genotype = genome::random_genome(rng, params.genotype_length());
        let mut prey = Self {
            agent,
            genotype,
            predator_in_eye: 0,
            lifespan: 0,
            creature_type: params.creature_type,
            base_speed: params.creature_speed,
            base_size: params.creature_diameter,
        };
        prey.apply_traits();
        prey
    }

    fn num_eyes(&self) -> usize {
        self.agent.eyes.len()
    }

    /// Turns by the genome response to the current eye counts.
    pub fn update_heading(&mut self) {
        let n = self.num_eyes();
        let row = self.predator_in_eye * n;
        let response: f32 = self
            .agent
            .eyes
            .iter()
            .enumerate()
            .map(|(i, &count)| self.genotype[row + i] * count as f32)
            .sum();
        self.agent.heading = geometric_utils::normalize_heading(self.agent.heading + response);
    }

    /// Pushes this prey out of every overlapping neighbour.
    ///
    /// `bodies` are the post-movement positions of the whole population and
    /// `neighbours` the candidate indices to test. Only this prey's position
    /// changes. Coincident pairs get a small Gaussian jitter instead of a push.
    pub fn resolve_collisions(
        &mut self,
        self_index: usize,
        bodies: &[Body],
        neighbours: &[usize],
        topology: &Topology,
        rng: &mut impl Rng,
    ) {
        let me = bodies[self_index];
        let mut push_x = 0.0;
        let mut push_y = 0.0;

        for &j in neighbours {
            if j == self_index {
                continue;
            }
            let other = bodies[j];
            let min_distance = (me.size + other.size) / 2.0;
            let (dx, dy) = topology.displacement(me.x, me.y, other.x, other.y);
            let distance = dx.hypot(dy);
            if distance >= min_distance {
                continue;
            }
            if distance == 0.0 {
                push_x += geometric_utils::random_gaussian(rng, min_distance * 0.1);
                push_y += geometric_utils::random_gaussian(rng, min_distance * 0.1);
            } else {
                let overlap = min_distance - distance;
                push_x -= dx / distance * overlap;
                push_y -= dy / distance * overlap;
            }
        }

        if push_x != 0.0 || push_y != 0.0 {
            self.agent.pos[0] += push_x;
            self.agent.pos[1] += push_y;
            topology.contain(&mut self.agent.pos);
        }
    }

    /// Counts one more survived step.
    pub fn update_lifespan(&mut self) {
        self.lifespan += 1;
    }

    /// Overwrites the genome with a single-point crossover of two parents.
    ///
    /// Simple prey cut uniformly in `[1, len]`. Extended prey first flip a
    /// fair coin for the main parent whose length bounds the cut. Returns the cut.
    ///
    /// # Panics
    ///
    /// Panics if a parent genome length differs from this prey's.
    pub fn crossover(
        &mut self,
        parent_a: &Array1<f32>,
        parent_b: &Array1<f32>,
        rng: &mut impl Rng,
    ) -> usize {
        assert_eq!(
            parent_a.len(),
            self.genotype.len(),
            "parent genome length must match the offspring"
        );
        let main_len = match self.creature_type {
            CreatureType::Simple => parent_a.len(),
            CreatureType::Extended => {
                if rng.random_bool(0.5) {
                    parent_a.len()
                } else {
                    parent_b.len()
                }
            }
        };
        let cut = genome::random_cut(rng, main_len);
        self.genotype = genome::crossover_at(parent_a, parent_b, cut);
        self.apply_traits();
        cut
    }

    /// Replaces each gene with probability 0.1 by a fresh value in `[-1, 1]`.
    pub fn mutate(&mut self, rng: &mut impl Rng) -> usize {
        let replaced = genome::mutate(&mut self.genotype, PREY_MUTATION_RATE, rng);
        self.apply_traits();
        replaced
    }

    /// Places the prey at a random position and heading with zero lifespan.
    pub fn respawn(&mut self, rng: &mut impl Rng) {
        self.agent.randomize_position_and_heading(rng);
        self.lifespan = 0;
    }

    /// Trait genes of an extended prey, empty for simple prey.
    pub fn trait_genes(&self) -> &[f32] {
        let start = self.num_eyes() * self.num_eyes();
        match self.creature_type {
            CreatureType::Simple => &[],
            CreatureType::Extended => {
                let genes = self.genotype.as_slice().unwrap_or_default();
                &genes[start.min(genes.len())..]
            }
        }
    }

    fn apply_traits(&mut self) {
        let traits = self.trait_genes();
        let speed = traits
            .first()
            .map_or(self.base_speed, |&g| map_gene(g, 0.5 * self.base_speed, 1.5 * self.base_speed));
        let size = traits
            .get(1)
            .map_or(self.base_size, |&g| map_gene(g, 0.5 * self.base_size, 1.5 * self.base_size));
        self.agent.speed = speed;
        self.agent.size = size;
    }
}

impl Locatable for Prey {
    fn agent(&self) -> &Agent {
        &self.agent
    }

    fn agent_mut(&mut self) -> &mut Agent {
        &mut self.agent
    }
}

impl Sense for Prey {
    fn update_eyes(&mut self, ctx: &SenseContext<'_>, self_index: Option<usize>) {
        self.predator_in_eye =
            sensing::which_eye(&self.agent, &ctx.topology, ctx.predator[0], ctx.predator[1]);
        sensing::count_into_eyes(&mut self.agent, &ctx.topology, ctx.prey, self_index);
    }
}
