//! Spatial indexing for collision neighbour queries.
//!
//! Wraps a KD-tree over prey positions. On the torus every prey is inserted at
//! its nine periodic images, so plain Euclidean queries see wrapped distances.

use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};
use tracing::warn;

use super::geometric_utils::Topology;

/// Type alias for the 2D KD-tree used for neighbour queries.
pub type Tree2D = KdTree<f32, usize, [f32; 2]>;

const IMAGE_OFFSETS: [f32; 3] = [-1.0, 0.0, 1.0];

/// KD-tree over one snapshot of prey positions.
pub struct SpatialIndex {
    tree: Tree2D,
}

impl SpatialIndex {
    /// Builds an index over `points` for the given topology.
    ///
    /// Points with non-finite coordinates are skipped with a warning and take
    /// no part in neighbour queries.
    pub fn build(points: &[[f32; 2]], topology: &Topology) -> Result<Self, KdTreeError> {
        let mut tree = KdTree::new(2);
        for (i, p) in points.iter().enumerate() {
            if !(p[0].is_finite() && p[1].is_finite()) {
                warn!(index = i, x = p[0], y = p[1], "skipping non-finite position in spatial index");
                continue;
            }
            if topology.bounded {
                tree.add(*p, i)?;
                continue;
            }
            for ox in IMAGE_OFFSETS {
                for oy in IMAGE_OFFSETS {
                    tree.add([p[0] + ox, p[1] + oy], i)?;
                }
            }
        }
        Ok(Self { tree })
    }

    /// Indices of all points within `radius` of `pos`, ascending and without duplicates.
    pub fn within(&self, pos: [f32; 2], radius: f32) -> Vec<usize> {
        let mut found: Vec<usize> = self
            .tree
            .within(&pos, radius.powi(2), &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(_, &idx)| idx)
            .collect();
        found.sort_unstable();
        found.dedup();
        found
    }

    /// Number of stored points, including periodic images.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Returns `true` if the index holds no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
