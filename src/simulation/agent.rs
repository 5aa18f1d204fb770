//! State shared by prey and predator: position, heading, speed, size, and eyes.

use ndarray::Array1;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometric_utils::{self, Topology};

/// Position and motion state of one agent in the unit square.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Position `(x, y)`, each coordinate in `[0, 1]`.
    pub pos: Array1<f32>,
    /// Heading in degrees, `[0, 360)`. `0` points along `+x`, `90` towards `y = 0`.
    pub heading: f32,
    /// Distance travelled per step.
    pub speed: f32,
    /// Body diameter.
    pub size: f32,
    /// Per-sensor counts from the last sensing pass.
    pub eyes: Vec<u32>,
}

impl Agent {
    /// Creates an agent at a uniformly random position and heading.
    pub fn new_random(rng: &mut impl Rng, speed: f32, size: f32, num_eyes: usize) -> Self {
        let mut agent = Self {
            pos: Array1::zeros(2),
            heading: 0.0,
            speed,
            size,
            eyes: vec![0; num_eyes],
        };
        agent.randomize_position_and_heading(rng);
        agent
    }

    /// Horizontal coordinate.
    pub fn x(&self) -> f32 {
        self.pos[0]
    }

    /// Vertical coordinate (grows downwards).
    pub fn y(&self) -> f32 {
        self.pos[1]
    }

    /// Moves the agent to `(x, y)`.
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.pos[0] = x;
        self.pos[1] = y;
    }

    /// Draws a fresh uniform position in `[0, 1)²` and heading in `[0, 360)`.
    pub fn randomize_position_and_heading(&mut self, rng: &mut impl Rng) {
        self.pos[0] = geometric_utils::random_float(rng, 1.0);
        self.pos[1] = geometric_utils::random_float(rng, 1.0);
        self.heading = geometric_utils::normalize_heading(geometric_utils::random_float(rng, 360.0));
    }

    /// Advances one step along the current heading.
    ///
    /// On the torus the position wraps. In the bounded box the position is
    /// clamped and the heading is redrawn from the half-plane facing back in.
    pub fn update_position(&mut self, topology: &Topology, rng: &mut impl Rng) {
        self.pos[0] += geometric_utils::cos_deg(self.heading) * self.speed;
        self.pos[1] -= geometric_utils::sin_deg(self.heading) * self.speed;
        self.contain(topology, rng);
    }

    /// Puts the agent back inside the world, deflecting off walls when bounded.
    pub fn contain(&mut self, topology: &Topology, rng: &mut impl Rng) {
        let (x_edge, y_edge) = topology.contain(&mut self.pos);
        if let Some((start, width)) = geometric_utils::inward_headings(x_edge, y_edge) {
            self.heading =
                geometric_utils::normalize_heading(start + geometric_utils::random_float(rng, width));
        }
    }
}
