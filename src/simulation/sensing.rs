//! Angular sensing: maps relative positions onto eye buckets.
//!
//! Each agent splits its surroundings into `num_eyes` equal slices measured
//! from its own heading. Sensing counts how many agents fall in each slice.

use super::agent::Agent;
use super::geometric_utils::{self, Topology};

/// Everything an agent may look at during the sensing phase.
///
/// Positions are a copy of the pre-step world so every agent senses the same
/// state regardless of update order.
pub struct SenseContext<'a> {
    /// World topology.
    pub topology: Topology,
    /// Predator position.
    pub predator: [f32; 2],
    /// Prey positions, indexed like the world's creature collection.
    pub prey: &'a [[f32; 2]],
}

/// Trait for agents that refresh their eye counts from a [`SenseContext`].
pub trait Sense {
    /// Recomputes the eye-count vector.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The pre-step world as seen by this agent
    /// * `self_index` - This agent's index in `ctx.prey`, if it is a prey
    fn update_eyes(&mut self, ctx: &SenseContext<'_>, self_index: Option<usize>);
}

/// Returns the eye index in `[0, observer.eyes.len())` that sees `(target_x, target_y)`.
///
/// The observer must have at least one eye.
pub fn which_eye(observer: &Agent, topology: &Topology, target_x: f32, target_y: f32) -> usize {
    let num_eyes = observer.eyes.len();
    let (dx, dy) = topology.displacement(observer.x(), observer.y(), target_x, target_y);
    let angle = geometric_utils::normalize_heading((-dy).atan2(dx).to_degrees() - observer.heading);
    let eye = (angle * num_eyes as f32 / 360.0).floor() as usize;
    eye.min(num_eyes - 1)
}

/// Zeroes `observer.eyes` and counts every target except `skip`.
pub fn count_into_eyes(
    observer: &mut Agent,
    topology: &Topology,
    targets: &[[f32; 2]],
    skip: Option<usize>,
) {
    observer.eyes.fill(0);
    for (i, target) in targets.iter().enumerate() {
        if Some(i) == skip {
            continue;
        }
        let eye = which_eye(observer, topology, target[0], target[1]);
        observer.eyes[eye] += 1;
    }
}
