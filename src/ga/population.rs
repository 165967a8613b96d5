//! Population construction and truncation.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::encoding::precedence_order;
use crate::error::ScheduleError;
use crate::models::{JobId, Solution};
use crate::scheduler::ScheduleBuilder;

/// Builds `size` random feasible individuals.
///
/// Each individual is a uniform shuffle of `0..n` brought into precedence
/// order and decoded with the serial scheme.
pub fn initial_population<'a, R: Rng>(
    builder: &ScheduleBuilder<'a>,
    size: usize,
    rng: &mut R,
) -> Result<Vec<Solution<'a>>, ScheduleError> {
    let instance = builder.instance();
    let mut genes: Vec<JobId> = (0..instance.job_count()).collect();
    (0..size)
        .map(|_| {
            genes.shuffle(rng);
            builder.build(&precedence_order(&genes, instance))
        })
        .collect()
}

/// Elitist truncation.
///
/// Keeps the better half (rounded up) by makespan, then drops each
/// schedule already seen with probability `duplicate_removal_rate` as long
/// as more than two individuals remain, and finally shuffles the survivors.
/// Returns the number of removed individuals.
pub fn eliminate<R: Rng>(
    population: &mut Vec<Solution<'_>>,
    duplicate_removal_rate: f64,
    rng: &mut R,
) -> usize {
    let before = population.len();
    population.sort_by_key(|s| s.makespan());
    population.truncate(before.div_ceil(2));

    let mut seen: HashSet<Vec<_>> = HashSet::with_capacity(population.len());
    let mut survivors = Vec::with_capacity(population.len());
    let mut remaining = population.len();
    for solution in population.drain(..) {
        let duplicate = !seen.insert(solution.start_times().to_vec());
        if duplicate && remaining > 2 && rng.random_bool(duplicate_removal_rate) {
            remaining -= 1;
            continue;
        }
        survivors.push(solution);
    }
    *population = survivors;

    population.shuffle(rng);
    before - population.len()
}

/// Index of the individual with the smallest makespan (first on ties).
pub fn best_index(population: &[Solution<'_>]) -> Option<usize> {
    population
        .iter()
        .enumerate()
        .min_by_key(|(index, s)| (s.makespan(), *index))
        .map(|(index, _)| index)
}
