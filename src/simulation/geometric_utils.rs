//! Geometric and random-draw helpers shared by every agent.
//!
//! Angles are in degrees throughout the simulation. Positions live in the
//! unit square, so wrap helpers work on a period of 1.

use ndarray::Array1;
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Cosine of an angle given in degrees.
pub fn cos_deg(h: f32) -> f32 {
    h.to_radians().cos()
}

/// Sine of an angle given in degrees.
pub fn sin_deg(h: f32) -> f32 {
    h.to_radians().sin()
}

/// Normalizes a heading into `[0, 360)`.
///
/// `rem_euclid` can round tiny negative inputs up to exactly `360.0`, which is
/// folded back to `0.0`.
pub fn normalize_heading(h: f32) -> f32 {
    let wrapped = h.rem_euclid(360.0);
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Wraps a single displacement component into `[-0.5, 0.5]`.
///
/// This is the shortest signed path between two coordinates on a unit torus.
pub fn wrap_delta(d: f32) -> f32 {
    if d < -0.5 {
        d + 1.0
    } else if d > 0.5 {
        d - 1.0
    } else {
        d
    }
}

/// Wraps a position vector around the unit box (toroidal topology).
///
/// # Arguments
///
/// * `v` - Mutable position vector to wrap
pub fn wrap_around_mut(v: &mut Array1<f32>) {
    v[0] = v[0].rem_euclid(1.0);
    v[1] = v[1].rem_euclid(1.0);
}

/// Bearing in degrees from a displacement, using the screen convention (y grows downwards).
pub fn bearing(dx: f32, dy: f32) -> f32 {
    normalize_heading((-dy).atan2(dx).to_degrees())
}

/// Uniform draw in `[0, d)`.
pub fn random_float(rng: &mut impl Rng, d: f32) -> f32 {
    rng.random::<f32>() * d
}

/// Gaussian draw with mean 0 and standard deviation `sd`.
///
/// A non-positive or non-finite `sd` yields `0.0`.
pub fn random_gaussian(rng: &mut impl Rng, sd: f32) -> f32 {
    match Normal::new(0.0, sd) {
        Ok(normal) if sd > 0.0 => normal.sample(rng),
        _ => 0.0,
    }
}

/// Uniform value in `[-1, 1]`: a magnitude in `[0, 1)` with a fair sign flip.
pub fn random_signed_unit(rng: &mut impl Rng) -> f32 {
    let magnitude = rng.random::<f32>();
    if rng.random_bool(0.5) {
        -magnitude
    } else {
        magnitude
    }
}

/// Linearly maps a gene in `[-1, 1]` onto `[lo, hi]`, clamping out-of-range genes.
pub fn map_gene(gene: f32, lo: f32, hi: f32) -> f32 {
    let t = (gene.clamp(-1.0, 1.0) + 1.0) / 2.0;
    lo + t * (hi - lo)
}

/// World topology: a reflective unit box or a unit torus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Topology {
    /// `true` for the reflective box, `false` for the torus.
    pub bounded: bool,
}

impl Topology {
    /// Signed displacement from `(from_x, from_y)` to `(to_x, to_y)`.
    ///
    /// On the torus each component takes the shortest path around the world.
    pub fn displacement(&self, from_x: f32, from_y: f32, to_x: f32, to_y: f32) -> (f32, f32) {
        let dx = to_x - from_x;
        let dy = to_y - from_y;
        if self.bounded {
            (dx, dy)
        } else {
            (wrap_delta(dx), wrap_delta(dy))
        }
    }

    /// Euclidean distance under this topology.
    pub fn distance(&self, from_x: f32, from_y: f32, to_x: f32, to_y: f32) -> f32 {
        let (dx, dy) = self.displacement(from_x, from_y, to_x, to_y);
        dx.hypot(dy)
    }

    /// Brings a position back into the world after it was moved.
    ///
    /// Returns which box edges were hit; always `(None, None)` on the torus.
    pub fn contain(&self, v: &mut Array1<f32>) -> (Option<Edge>, Option<Edge>) {
        if !self.bounded {
            wrap_around_mut(v);
            return (None, None);
        }
        let x_edge = clamp_axis(&mut v[0], Edge::Left, Edge::Right);
        let y_edge = clamp_axis(&mut v[1], Edge::Top, Edge::Bottom);
        (x_edge, y_edge)
    }
}

/// A wall of the bounded world. `Top` is `y = 0` (screen convention).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// `x = 0`
    Left,
    /// `x = 1`
    Right,
    /// `y = 0`
    Top,
    /// `y = 1`
    Bottom,
}

fn clamp_axis(c: &mut f32, low: Edge, high: Edge) -> Option<Edge> {
    if *c < 0.0 {
        *c = 0.0;
        Some(low)
    } else if *c > 1.0 {
        *c = 1.0;
        Some(high)
    } else {
        None
    }
}

/// Heading range `(start, width)` in degrees that points back into the world
/// after touching the given walls.
pub fn inward_headings(x_edge: Option<Edge>, y_edge: Option<Edge>) -> Option<(f32, f32)> {
    let range = match (x_edge, y_edge) {
        (None, None) => return None,
        (Some(Edge::Left), None) => (270.0, 180.0),
        (Some(Edge::Right), None) => (90.0, 180.0),
        (None, Some(Edge::Top)) => (180.0, 180.0),
        (None, Some(Edge::Bottom)) => (0.0, 180.0),
        // corners: the quadrant facing inwards from both walls
        (Some(Edge::Left), Some(Edge::Top)) => (270.0, 90.0),
        (Some(Edge::Left), Some(Edge::Bottom)) => (0.0, 90.0),
        (Some(Edge::Right), Some(Edge::Top)) => (180.0, 90.0),
        (Some(Edge::Right), Some(Edge::Bottom)) => (90.0, 90.0),
        _ => unreachable!("x walls are Left/Right and y walls are Top/Bottom"),
    };
    Some(range)
}
