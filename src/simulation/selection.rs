//! Parent selection policies.
//!
//! Selection works on a plain fitness slice so the same policies pick prey
//! parents (fitness = lifespan) and predator log parents (fitness = catches).

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{ConfigError, SelectionError};
use super::params::Params;

/// How reproduction parents are chosen from the survivors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum SelectionMethod {
    /// Uniform over all survivors.
    #[default]
    Random,
    /// Linear rank weights with a blended random variate.
    Rank,
    /// Best of a random sample without replacement.
    Tournament,
}

impl FromStr for SelectionMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "rank" => Ok(Self::Rank),
            "tournament" => Ok(Self::Tournament),
            _ => Err(ConfigError::UnknownSelectionMethod(s.to_owned())),
        }
    }
}

impl TryFrom<String> for SelectionMethod {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Random => "random",
            Self::Rank => "rank",
            Self::Tournament => "tournament",
        };
        f.write_str(name)
    }
}

/// A configured selection policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selector {
    /// Policy.
    pub method: SelectionMethod,
    /// Rank-selection blend factor in `[0, 1]`.
    pub randomness_factor: f32,
    /// Tournament sample size, clamped to the eligible individuals at draw time.
    pub tournament_size: usize,
    /// Rank draws attempted before falling back to the best eligible individual.
    pub max_attempts: usize,
}

impl Selector {
    /// Builds the selector described by the world parameters.
    pub fn from_params(params: &Params) -> Self {
        Self {
            method: params.selection_method,
            randomness_factor: params.randomness_factor,
            tournament_size: params.tournament_size,
            max_attempts: params.max_resample_attempts,
        }
    }

    /// Picks two distinct parent indices, neither equal to `excluded`.
    ///
    /// # Arguments
    ///
    /// * `fitness` - Fitness per individual; higher is better
    /// * `excluded` - The individual being replaced, if any
    /// * `rng` - Random source
    pub fn select_parents(
        &self,
        fitness: &[u64],
        excluded: Option<usize>,
        rng: &mut impl Rng,
    ) -> Result<(usize, usize), SelectionError> {
        let excluded = excluded.filter(|&e| e < fitness.len());
        let eligible = fitness.len() - usize::from(excluded.is_some());
        if eligible < 2 {
            return Err(SelectionError::PopulationTooSmall {
                eligible,
                needed: 2,
            });
        }

        let ranked = rank_order(fitness);
        let first = self.select_one(fitness, &ranked, [excluded, None], rng);
        let second = self.select_one(fitness, &ranked, [excluded, Some(first)], rng);
        Ok((first, second))
    }

    fn select_one(
        &self,
        fitness: &[u64],
        ranked: &[usize],
        exclude: [Option<usize>; 2],
        rng: &mut impl Rng,
    ) -> usize {
        let is_excluded = |i: usize| exclude.contains(&Some(i));

        match self.method {
            SelectionMethod::Random => {
                let eligible = eligible_indices(fitness.len(), is_excluded);
                eligible[rng.random_range(0..eligible.len())]
            }
            SelectionMethod::Tournament => {
                let eligible = eligible_indices(fitness.len(), is_excluded);
                self.draw_tournament(fitness, &eligible, rng)
            }
            SelectionMethod::Rank => {
                for _ in 0..self.max_attempts {
                    let candidate = self.draw_rank(ranked, rng);
                    if !is_excluded(candidate) {
                        return candidate;
                    }
                }

                warn!(
                    method = %self.method,
                    attempts = self.max_attempts,
                    "selection resampling exhausted, taking best eligible individual"
                );
                ranked
                    .iter()
                    .copied()
                    .find(|&i| !is_excluded(i))
                    .unwrap_or_default()
            }
        }
    }

    fn draw_rank(&self, ranked: &[usize], rng: &mut impl Rng) -> usize {
        let n = ranked.len();
        let total = (n * (n + 1) / 2) as f32;
        let eps = self.randomness_factor;
        let r = rng.random::<f32>() * (1.0 - eps) + eps * rng.random::<f32>();

        let mut cumulative = 0.0;
        for (rank, &individual) in ranked.iter().enumerate() {
            cumulative += (n - rank) as f32 / total;
            if cumulative > r {
                return individual;
            }
        }
        ranked[n - 1]
    }

    /// Best of `tournament_size` individuals sampled without replacement
    /// from `eligible`. Ties go to the first one drawn.
    fn draw_tournament(&self, fitness: &[u64], eligible: &[usize], rng: &mut impl Rng) -> usize {
        let size = self.tournament_size.clamp(1, eligible.len());
        let mut best: Option<usize> = None;
        for slot in index::sample(rng, eligible.len(), size) {
            let i = eligible[slot];
            if best.is_none_or(|b| fitness[i] > fitness[b]) {
                best = Some(i);
            }
        }
        best.unwrap_or_default()
    }
}

fn eligible_indices(len: usize, is_excluded: impl Fn(usize) -> bool) -> Vec<usize> {
    (0..len).filter(|&i| !is_excluded(i)).collect()
}

/// Indices sorted by fitness, highest first; ties keep index order.
pub fn rank_order(fitness: &[u64]) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..fitness.len()).collect();
    ranked.sort_by(|&a, &b| fitness[b].cmp(&fitness[a]));
    ranked
}
