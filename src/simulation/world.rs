//! The world controller: one predator chasing an evolving prey population.
//!
//! A step runs in a fixed order across the whole population:
//! - prey sense the pre-step world and turn (parallel, read-only input)
//! - prey move, resolve collisions, and age (serial, draws randomness)
//! - the predator scans for the nearest prey and captures, evolves, or pursues
//!
//! A caught prey is never removed. Its slot is overwritten with a child of two
//! selected survivors and respawned at a random position.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, error, trace};

use super::error::{ConfigError, SelectionError};
use super::geometric_utils::Topology;
use super::locatable::Locatable;
use super::params::Params;
use super::predator::{Predator, PredatorAction};
use super::prey::{Body, Prey};
use super::reproduction::ReproductionStats;
use super::selection::Selector;
use super::sensing::{Sense, SenseContext};
use super::snapshot::{AgentView, Role, WorldSnapshot};
use super::spatial::SpatialIndex;

/// The complete simulation state.
#[derive(Debug, Clone)]
pub struct World {
    params: Params,
    topology: Topology,
    selector: Selector,
    creatures: Vec<Prey>,
    predator: Predator,
    closest_prey: Option<usize>,
    timesteps: u64,
    reproductions: u64,
    stats: ReproductionStats,
    rng: ChaCha8Rng,
}

impl World {
    /// Creates a world seeded from the thread-local random source.
    pub fn new(params: Params) -> Result<Self, ConfigError> {
        let rng = ChaCha8Rng::from_rng(&mut rand::rng());
        Self::with_rng(params, rng)
    }

    /// Creates a reproducible world from a fixed seed.
    pub fn with_seed(params: Params, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(params, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Creates a world drawing all randomness from `rng`.
    pub fn with_rng(params: Params, mut rng: ChaCha8Rng) -> Result<Self, ConfigError> {
        params.validate()?;

        let creatures = (0..params.num_creatures)
            .map(|_| Prey::new_random(&mut rng, &params))
            .collect();
        let predator = Predator::new(&mut rng, &params);

        Ok(Self {
            topology: Topology {
                bounded: params.bounded,
            },
            selector: Selector::from_params(&params),
            stats: ReproductionStats::new(params.stats_history),
            params,
            creatures,
            predator,
            closest_prey: None,
            timesteps: 0,
            reproductions: 0,
            rng,
        })
    }

    /// Advances the simulation by one full step.
    pub fn advance_step(&mut self) {
        self.update_prey();
        self.update_predator();
        self.timesteps += 1;
        trace!(
            timesteps = self.timesteps,
            reproductions = self.reproductions,
            "step complete"
        );
    }

    /// Advances the simulation by `steps` steps.
    pub fn advance_steps(&mut self, steps: u64) {
        for _ in 0..steps {
            self.advance_step();
        }
    }

    fn prey_positions(&self) -> Vec<[f32; 2]> {
        self.creatures
            .iter()
            .map(|c| [c.agent.x(), c.agent.y()])
            .collect()
    }

    fn update_prey(&mut self) {
        let positions = self.prey_positions();
        let ctx = SenseContext {
            topology: self.topology,
            predator: [self.predator.agent.x(), self.predator.agent.y()],
            prey: &positions,
        };

        // parallel phase: each prey reads only the pre-step snapshot
        self.creatures
            .par_iter_mut()
            .enumerate()
            .for_each(|(i, prey)| {
                prey.update_eyes(&ctx, Some(i));
                prey.update_heading();
            });

        for prey in &mut self.creatures {
            prey.update_position(&self.topology, &mut self.rng);
        }

        self.resolve_collisions();

        for prey in &mut self.creatures {
            prey.update_lifespan();
        }
    }

    fn resolve_collisions(&mut self) {
        let bodies: Vec<Body> = self
            .creatures
            .iter()
            .map(|c| Body {
                x: c.agent.x(),
                y: c.agent.y(),
                size: c.agent.size,
            })
            .collect();
        let points: Vec<[f32; 2]> = bodies.iter().map(|b| [b.x, b.y]).collect();
        let index = match SpatialIndex::build(&points, &self.topology) {
            Ok(index) => index,
            Err(err) => {
                error!(?err, timestep = self.timesteps, "collision index could not be built");
                return;
            }
        };
        let reach = bodies.iter().map(|b| b.size).fold(0.0, f32::max);

        for (i, prey) in self.creatures.iter_mut().enumerate() {
            let neighbours = index.within(points[i], reach);
            prey.resolve_collisions(i, &bodies, &neighbours, &self.topology, &mut self.rng);
        }
    }

    fn update_predator(&mut self) {
        let positions = self.prey_positions();
        let ctx = SenseContext {
            topology: self.topology,
            predator: [self.predator.agent.x(), self.predator.agent.y()],
            prey: &positions,
        };
        self.predator.update_eyes(&ctx, None);

        let Some(target) = self.predator.find_nearest(&positions, &self.topology) else {
            return;
        };
        self.predator.target = Some(target);
        self.closest_prey = Some(target.index);

        match self.predator.decide(&target, self.timesteps) {
            PredatorAction::Capture { .. } => {
                if let Err(err) = self.create_new_creature() {
                    error!(%err, "capture could not be turned into a reproduction");
                }
                self.predator.record_capture();
            }
            PredatorAction::Evolve => {
                self.predator
                    .evolve(&self.selector, self.timesteps, &mut self.rng);
            }
            PredatorAction::Pursue { bearing } => {
                self.predator.pursue(bearing, &self.topology, &mut self.rng);
            }
        }
    }

    /// Picks two distinct surviving parents, neither being `caught`.
    pub fn select_parents(&mut self, caught: usize) -> Result<(usize, usize), SelectionError> {
        let fitness: Vec<u64> = self.creatures.iter().map(|c| c.lifespan).collect();
        self.selector
            .select_parents(&fitness, Some(caught), &mut self.rng)
    }

    /// Replaces the prey nearest the predator with offspring of two selected
    /// parents, then respawns it at a random position. Returns its index.
    pub fn create_new_creature(&mut self) -> Result<usize, SelectionError> {
        let caught = self.closest_prey.ok_or(SelectionError::NoTarget)?;
        let (a, b) = self.select_parents(caught)?;

        let parent_a = self.creatures[a].genotype.clone();
        let parent_b = self.creatures[b].genotype.clone();
        let prey = &mut self.creatures[caught];
        let lifespan = prey.lifespan;

        let cut = prey.crossover(&parent_a, &parent_b, &mut self.rng);
        let mutated = prey.mutate(&mut self.rng);
        prey.respawn(&mut self.rng);

        self.reproductions += 1;
        self.stats.record_capture(lifespan);

        debug!(
            timestep = self.timesteps,
            caught,
            lifespan,
            parent_a = a,
            parent_b = b,
            cut,
            mutated,
            reproductions = self.reproductions,
            "prey caught and replaced"
        );
        Ok(caught)
    }

    /// Read-only view of every agent, predator last.
    pub fn snapshot(&self) -> WorldSnapshot {
        let mut agents: Vec<AgentView> = self
            .creatures
            .iter()
            .map(|c| view(c, Role::Prey))
            .collect();
        agents.push(view(&self.predator, Role::Predator));

        WorldSnapshot {
            timesteps: self.timesteps,
            reproductions: self.reproductions,
            closest_prey: self.closest_prey,
            agents,
        }
    }

    /// Construction parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// World topology.
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// The prey population in stable index order.
    pub fn creatures(&self) -> &[Prey] {
        &self.creatures
    }

    /// Mutable access to the prey, for scenario setup.
    pub fn creatures_mut(&mut self) -> &mut [Prey] {
        &mut self.creatures
    }

    /// The predator.
    pub fn predator(&self) -> &Predator {
        &self.predator
    }

    /// Mutable access to the predator, for scenario setup.
    pub fn predator_mut(&mut self) -> &mut Predator {
        &mut self.predator
    }

    /// Index of the prey nearest the predator at its last scan.
    pub fn closest_prey(&self) -> Option<usize> {
        self.closest_prey
    }

    /// Completed steps.
    pub fn timesteps(&self) -> u64 {
        self.timesteps
    }

    /// Prey replaced so far.
    pub fn reproductions(&self) -> u64 {
        self.reproductions
    }

    /// Capture statistics.
    pub fn stats(&self) -> &ReproductionStats {
        &self.stats
    }
}

fn view(entity: &impl Locatable, role: Role) -> AgentView {
    let agent = entity.agent();
    let pos = entity.pos();
    AgentView {
        x: pos[0],
        y: pos[1],
        heading: agent.heading,
        size: agent.size,
        role,
    }
}
