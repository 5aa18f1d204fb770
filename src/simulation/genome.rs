//! Genome operators shared by prey and predator.
//!
//! A genome is a fixed-length vector of real weights in `[-1, 1]`. Operators
//! never change its length.

use ndarray::Array1;
use rand::Rng;

use super::geometric_utils::random_signed_unit;

/// Per-gene mutation probability for prey.
pub const PREY_MUTATION_RATE: f64 = 0.1;

/// Creates a genome with every gene uniform in `[-1, 1]`.
pub fn random_genome(rng: &mut impl Rng, len: usize) -> Array1<f32> {
    Array1::from_shape_fn(len, |_| random_signed_unit(rng))
}

/// Draws a cut index uniformly in `[1, len]`.
pub fn random_cut(rng: &mut impl Rng, len: usize) -> usize {
    rng.random_range(1..=len)
}

/// Single-point crossover at a fixed cut.
///
/// Genes before `cut` come from `parent_a`, genes at and after it from `parent_b`.
///
/// # Panics
///
/// Panics if the parents differ in length or `cut` exceeds it.
pub fn crossover_at(parent_a: &Array1<f32>, parent_b: &Array1<f32>, cut: usize) -> Array1<f32> {
    assert_eq!(
        parent_a.len(),
        parent_b.len(),
        "crossover parents must have equal genome lengths"
    );
    assert!(cut <= parent_a.len(), "cut {cut} beyond genome length {}", parent_a.len());
    Array1::from_shape_fn(parent_a.len(), |i| if i < cut { parent_a[i] } else { parent_b[i] })
}

/// Single-point crossover with a random cut. Returns the child and the cut used.
pub fn crossover(
    parent_a: &Array1<f32>,
    parent_b: &Array1<f32>,
    rng: &mut impl Rng,
) -> (Array1<f32>, usize) {
    let cut = random_cut(rng, parent_a.len());
    (crossover_at(parent_a, parent_b, cut), cut)
}

/// Replaces each gene, independently with probability `rate`, by a fresh
/// uniform value in `[-1, 1]`. Returns the number of genes replaced.
pub fn mutate(genome: &mut Array1<f32>, rate: f64, rng: &mut impl Rng) -> usize {
    let mut replaced = 0;
    for gene in genome.iter_mut() {
        if rng.random_bool(rate) {
            *gene = random_signed_unit(rng);
            replaced += 1;
        }
    }
    replaced
}
