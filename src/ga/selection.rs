//! Tournament selection.
//!
//! Tournaments draw a small uniform sample of distinct population indices
//! with Floyd's algorithm (O(k) draws, no population shuffle) and compare
//! the cached makespans of the sampled individuals.
//!
//! # Reference
//! Bentley & Floyd (1987), "Programming Pearls: A Sample of Brilliance"

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{Solution, Time};

/// Draws `k` distinct indices from `0..total` uniformly at random.
///
/// `k` is clamped to `total`. The indices come back in draw order.
pub fn floyd_sample<R: Rng>(total: usize, k: usize, rng: &mut R) -> Vec<usize> {
    let k = k.min(total);
    let mut sample = Vec::with_capacity(k);
    for j in (total - k)..total {
        let t = rng.random_range(0..=j);
        if sample.contains(&t) {
            sample.push(j);
        } else {
            sample.push(t);
        }
    }
    sample
}

/// Tournament sizes for parent and victim selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentSelector {
    /// Sample size when picking the two parents (default: 4).
    pub best_size: usize,
    /// Sample size when picking a replacement victim (default: 3).
    pub worst_size: usize,
}

impl Default for TournamentSelector {
    fn default() -> Self {
        Self {
            best_size: 4,
            worst_size: 3,
        }
    }
}

impl TournamentSelector {
    pub fn new(best_size: usize, worst_size: usize) -> Self {
        Self {
            best_size,
            worst_size,
        }
    }

    /// Indices of the best and second-best individual of a tournament.
    ///
    /// The two indices always differ. Returns `None` when the population
    /// has fewer than two individuals.
    pub fn select_best<R: Rng>(
        &self,
        population: &[Solution<'_>],
        rng: &mut R,
    ) -> Option<(usize, usize)> {
        if population.len() < 2 {
            return None;
        }
        let sample = floyd_sample(population.len(), self.best_size.max(2), rng);

        let mut best: Option<(usize, Time)> = None;
        let mut second: Option<(usize, Time)> = None;
        for index in sample {
            let fitness = population[index].makespan();
            if best.map_or(true, |(_, b)| fitness < b) {
                second = best;
                best = Some((index, fitness));
            } else if second.map_or(true, |(_, s)| fitness < s) {
                second = Some((index, fitness));
            }
        }
        Some((best?.0, second?.0))
    }

    /// Index and makespan of the worst individual of a tournament.
    ///
    /// Returns `None` for an empty population.
    pub fn select_worst<R: Rng>(
        &self,
        population: &[Solution<'_>],
        rng: &mut R,
    ) -> Option<(usize, Time)> {
        if population.is_empty() {
            return None;
        }
        floyd_sample(population.len(), self.worst_size.max(1), rng)
            .into_iter()
            .map(|index| (index, population[index].makespan()))
            .fold(None, |worst: Option<(usize, Time)>, (index, fitness)| match worst {
                Some((_, w)) if fitness <= w => worst,
                _ => Some((index, fitness)),
            })
    }
}
