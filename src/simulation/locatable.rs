//! Trait for entities that own an [`Agent`] and move through the world.
//!
//! Prey and the predator share motion through this trait instead of an
//! inheritance chain.

use ndarray::Array1;
use rand::Rng;

use super::agent::Agent;
use super::geometric_utils::Topology;

/// Any type holding an [`Agent`]:
/// - exposes its position and heading
/// - can be advanced one step along its heading
pub trait Locatable {
    /// Returns the underlying agent state.
    fn agent(&self) -> &Agent;

    /// Returns the underlying agent state mutably.
    fn agent_mut(&mut self) -> &mut Agent;

    /// Returns a reference to the entity's position.
    fn pos(&self) -> &Array1<f32> {
        &self.agent().pos
    }

    /// Moves the entity one step along its heading.
    fn update_position(&mut self, topology: &Topology, rng: &mut impl Rng)
    where
        Self: Sized,
    {
        self.agent_mut().update_position(topology, rng);
    }
}
