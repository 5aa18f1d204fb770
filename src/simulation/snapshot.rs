//! Read-only view of the world for presentation layers.

use serde::{Deserialize, Serialize};

/// Which kind of agent a view describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A creature.
    Prey,
    /// The predator.
    Predator,
}

/// Everything needed to draw one agent, without genome or internals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    /// Horizontal coordinate in `[0, 1]`.
    pub x: f32,
    /// Vertical coordinate in `[0, 1]`, growing downwards.
    pub y: f32,
    /// Heading in degrees.
    pub heading: f32,
    /// Diameter.
    pub size: f32,
    /// Prey or predator.
    pub role: Role,
}

/// One frame of the world: counters plus a view per agent, predator last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    /// Completed steps.
    pub timesteps: u64,
    /// Prey replaced so far.
    pub reproductions: u64,
    /// Index of the prey nearest the predator, once it has scanned.
    pub closest_prey: Option<usize>,
    /// Prey views in collection order, followed by the predator.
    pub agents: Vec<AgentView>,
}
