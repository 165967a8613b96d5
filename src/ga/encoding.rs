//! Activity-list encoding.
//!
//! # Encoding
//!
//! An activity list is a permutation of `0..n` in which every job appears
//! after all of its predecessors. The GA recombines activity lists and
//! decodes them back to start times with the serial schedule generation
//! scheme.
//!
//! - [`to_activity_list`]: start times → canonical list (by start time,
//!   ties by job index). Several lists decode to the same schedule; each
//!   schedule has exactly one canonical list.
//! - [`precedence_order`]: any permutation → the closest precedence-ordered
//!   list, keeping the given order wherever precedence allows.
//!
//! # Reference
//! Hartmann (1998), "A competitive genetic algorithm for resource-
//! constrained project scheduling"

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::models::{JobId, ProblemInstance, Solution};

/// Canonical activity list of a solution.
///
/// Jobs sorted by non-decreasing start time; ties broken by ascending job
/// index.
pub fn to_activity_list(solution: &Solution<'_>) -> Vec<JobId> {
    let starts = solution.start_times();
    let mut list: Vec<JobId> = (0..starts.len()).collect();
    list.sort_by_key(|&job| (starts[job], job));
    list
}

/// Stable topological sort of the precedence DAG seeded by `genes`.
///
/// Among the jobs whose predecessors are all placed, the one appearing
/// earliest in `genes` goes next. A list that is already precedence-ordered
/// is returned unchanged.
///
/// `genes` must be a permutation of `0..n`.
///
/// # Complexity
/// O((n + e) log n) for `e` precedence arcs.
pub fn precedence_order(genes: &[JobId], instance: &ProblemInstance) -> Vec<JobId> {
    let n = instance.job_count();
    debug_assert_eq!(genes.len(), n);

    let mut position = vec![0usize; n];
    for (pos, &job) in genes.iter().enumerate() {
        position[job] = pos;
    }

    let mut missing: Vec<usize> = (0..n).map(|j| instance.predecessors(j).len()).collect();
    let mut ready: BinaryHeap<Reverse<(usize, JobId)>> = genes
        .iter()
        .filter(|&&job| missing[job] == 0)
        .map(|&job| Reverse((position[job], job)))
        .collect();

    let mut ordered = Vec::with_capacity(n);
    while let Some(Reverse((_, job))) = ready.pop() {
        ordered.push(job);
        for &succ in instance.successors(job) {
            missing[succ] -= 1;
            if missing[succ] == 0 {
                ready.push(Reverse((position[succ], succ)));
            }
        }
    }
    ordered
}

/// Whether every job of `list` appears after all of its predecessors.
pub fn is_precedence_ordered(list: &[JobId], instance: &ProblemInstance) -> bool {
    let n = instance.job_count();
    if list.len() != n {
        return false;
    }
    let mut position = vec![usize::MAX; n];
    for (pos, &job) in list.iter().enumerate() {
        if job >= n || position[job] != usize::MAX {
            return false;
        }
        position[job] = pos;
    }
    (0..n).all(|job| {
        instance
            .successors(job)
            .iter()
            .all(|&succ| position[job] < position[succ])
    })
}
