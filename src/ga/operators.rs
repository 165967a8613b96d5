//! Crossover and mutation on activity lists.
//!
//! Parents are turned into canonical activity lists, recombined, brought
//! back into precedence order with [`precedence_order`] and decoded with the
//! serial schedule generation scheme, so every child is feasible.
//!
//! # Usage
//!
//! ```
//! use u_rcpsp::ga::operators::{CrossoverType, GeneticOperators};
//! use u_rcpsp::models::{Job, ProblemInstance};
//! use u_rcpsp::scheduler::{is_feasible, ScheduleBuilder};
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let instance = ProblemInstance::new(
//!     vec![2],
//!     vec![
//!         Job::new(2).with_demands(vec![1]).with_successor(2),
//!         Job::new(1).with_demands(vec![2]),
//!         Job::new(3).with_demands(vec![1]),
//!     ],
//! )
//! .unwrap();
//! let builder = ScheduleBuilder::new(&instance);
//! let father = builder.build(&[0, 1, 2]).unwrap();
//! let mother = builder.build(&[1, 0, 2]).unwrap();
//!
//! let ops = GeneticOperators::new(&instance);
//! let mut rng = SmallRng::seed_from_u64(42);
//! let child = ops
//!     .crossover(CrossoverType::DoubleCut, &father, &mother, &mut rng)
//!     .unwrap();
//! assert!(is_feasible(&child));
//! ```
//!
//! # Reference
//! Hartmann (1998), "A competitive genetic algorithm for resource-
//! constrained project scheduling"

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::encoding::{precedence_order, to_activity_list};
use crate::error::ScheduleError;
use crate::models::{JobId, ProblemInstance, Solution};
use crate::scheduler::{is_feasible, ScheduleBuilder};

/// Crossover strategy for activity lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverType {
    /// Father's prefix, then mother's remaining jobs in her order.
    SingleCut,
    /// Mother's genes outside a window, father's genes inside it.
    DoubleCut,
    /// Per-position coin flip between the parents' orders.
    Uniform,
}

// ======================== Crossover operators ========================

/// Single-cut crossover.
///
/// Copies `father[..c]` for a uniform cut `c ∈ [0, n)`, then appends the
/// jobs of `mother` not yet copied, in her order.
pub fn single_cut_crossover<R: Rng>(father: &[JobId], mother: &[JobId], rng: &mut R) -> Vec<JobId> {
    let n = father.len();
    if n == 0 {
        return Vec::new();
    }
    let cut = rng.random_range(0..n);

    let mut used = vec![false; n];
    let mut child = Vec::with_capacity(n);
    for &job in &father[..cut] {
        child.push(job);
        used[job] = true;
    }
    child.extend(mother.iter().copied().filter(|&job| !used[job]));
    child
}

/// Double-cut crossover.
///
/// Draws `c1 ∈ [0, n-1)` and `c2 ∈ [c1, n]`. Positions outside `[c1, c2)`
/// take mother's genes; the window is back-filled with father's remaining
/// genes in father's order. The result may violate precedence and is
/// expected to go through [`precedence_order`].
pub fn double_cut_crossover<R: Rng>(father: &[JobId], mother: &[JobId], rng: &mut R) -> Vec<JobId> {
    let n = father.len();
    if n < 2 {
        return father.to_vec();
    }
    let first = rng.random_range(0..n - 1);
    let second = rng.random_range(first..=n);

    let sentinel = n;
    let mut used = vec![false; n];
    let mut child = vec![sentinel; n];
    for pos in (0..first).chain(second..n) {
        child[pos] = mother[pos];
        used[mother[pos]] = true;
    }

    let mut donor = father.iter().copied().filter(|&job| !used[job]);
    for slot in &mut child[first..second] {
        if let Some(job) = donor.next() {
            *slot = job;
        }
    }
    debug_assert!(child.iter().all(|&job| job != sentinel));
    child
}

/// Uniform crossover.
///
/// For each position a fair coin picks a parent; the child takes that
/// parent's next job not yet in the child.
pub fn uniform_crossover<R: Rng>(father: &[JobId], mother: &[JobId], rng: &mut R) -> Vec<JobId> {
    let n = father.len();
    let mut used = vec![false; n];
    let mut cursors = [0usize; 2];
    let parents = [father, mother];
    let mut child = Vec::with_capacity(n);

    for _ in 0..n {
        let pick = usize::from(rng.random_bool(0.5));
        let parent = parents[pick];
        let cursor = &mut cursors[pick];
        while used[parent[*cursor]] {
            *cursor += 1;
        }
        let job = parent[*cursor];
        used[job] = true;
        child.push(job);
    }
    child
}

/// Recombines two activity lists with the given strategy.
pub fn recombine<R: Rng>(
    kind: CrossoverType,
    father: &[JobId],
    mother: &[JobId],
    rng: &mut R,
) -> Vec<JobId> {
    match kind {
        CrossoverType::SingleCut => single_cut_crossover(father, mother, rng),
        CrossoverType::DoubleCut => double_cut_crossover(father, mother, rng),
        CrossoverType::Uniform => uniform_crossover(father, mother, rng),
    }
}

// ======================== Mutation operators ========================

/// Swap mutation: exchanges two distinct random positions.
///
/// Returns the swapped positions, or `None` for lists shorter than two.
pub fn swap_mutation<R: Rng>(list: &mut [JobId], rng: &mut R) -> Option<(usize, usize)> {
    let len = list.len();
    if len < 2 {
        return None;
    }
    let i = rng.random_range(0..len);
    let mut j = rng.random_range(0..len - 1);
    if j >= i {
        j += 1;
    }
    list.swap(i, j);
    Some((i, j))
}

// ======================== Operator bundle ========================

/// Crossover and repaired mutation bound to one instance.
#[derive(Debug, Clone)]
pub struct GeneticOperators<'a> {
    builder: ScheduleBuilder<'a>,
    mutation_rate: f64,
    mutation_retries: usize,
}

const DEFAULT_MUTATION_RATE: f64 = 0.25;

impl<'a> GeneticOperators<'a> {
    /// Operators with mutation rate 0.25 and 80 retries.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            builder: ScheduleBuilder::new(instance),
            mutation_rate: DEFAULT_MUTATION_RATE,
            mutation_retries: 80,
        }
    }

    /// Sets the mutation trigger probability, clamped to `[0, 1]`.
    ///
    /// NaN keeps the default rate of 0.25.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = if rate.is_nan() {
            DEFAULT_MUTATION_RATE
        } else {
            rate.clamp(0.0, 1.0)
        };
        self
    }

    /// Sets the number of swap attempts per mutation.
    pub fn with_mutation_retries(mut self, retries: usize) -> Self {
        self.mutation_retries = retries;
        self
    }

    /// Probability that [`mutate`](Self::mutate) attempts a mutation.
    pub fn mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    /// Swap attempts before a mutation gives up.
    pub fn mutation_retries(&self) -> usize {
        self.mutation_retries
    }

    pub fn builder(&self) -> &ScheduleBuilder<'a> {
        &self.builder
    }

    /// Builds a child from two parent solutions.
    ///
    /// The recombined list is put into precedence order before decoding,
    /// which leaves single-cut children unchanged.
    pub fn crossover<R: Rng>(
        &self,
        kind: CrossoverType,
        father: &Solution<'a>,
        mother: &Solution<'a>,
        rng: &mut R,
    ) -> Result<Solution<'a>, ScheduleError> {
        let father_list = to_activity_list(father);
        let mother_list = to_activity_list(mother);
        let genes = recombine(kind, &father_list, &mother_list, rng);
        let ordered = precedence_order(&genes, self.builder.instance());
        self.builder.build(&ordered)
    }

    /// Mutates `child` with probability `mutation_rate`.
    ///
    /// Each attempt swaps two positions of the canonical activity list,
    /// decodes it and accepts the result if it is feasible; otherwise the
    /// swap is undone and a new pair is tried. When no attempt succeeds the
    /// unmodified child is returned.
    pub fn mutate<R: Rng>(
        &self,
        child: Solution<'a>,
        rng: &mut R,
    ) -> Result<Solution<'a>, ScheduleError> {
        if child.len() < 2 || !rng.random_bool(self.mutation_rate) {
            return Ok(child);
        }

        let mut list = to_activity_list(&child);
        for _ in 0..self.mutation_retries {
            let Some((i, j)) = swap_mutation(&mut list, rng) else {
                break;
            };
            let candidate = self.builder.build(&list)?;
            if is_feasible(&candidate) {
                return Ok(candidate);
            }
            list.swap(i, j);
        }
        Ok(child)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::encoding::is_precedence_ordered;
    use crate::models::Job;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn is_permutation(list: &[JobId], n: usize) -> bool {
        let mut sorted = list.to_vec();
        sorted.sort();
        sorted == (0..n).collect::<Vec<_>>()
    }

    /// 8 jobs: two chains 0→1→2→3 and 4→5→6, job 7 free.
    fn sample_instance() -> ProblemInstance {
        ProblemInstance::new(
            vec![3, 2],
            vec![
                Job::new(2).with_demands(vec![1, 1]).with_successor(1),
                Job::new(3).with_demands(vec![2, 0]).with_successor(2),
                Job::new(1).with_demands(vec![1, 2]).with_successor(3),
                Job::new(2).with_demands(vec![3, 0]),
                Job::new(4).with_demands(vec![1, 1]).with_successor(5),
                Job::new(2).with_demands(vec![2, 1]).with_successor(6),
                Job::new(1).with_demands(vec![1, 0]),
                Job::new(3).with_demands(vec![2, 2]),
            ],
        )
        .unwrap()
    }

    fn sample_parents(inst: &ProblemInstance) -> (Solution<'_>, Solution<'_>) {
        let b = ScheduleBuilder::new(inst);
        (
            b.build(&[0, 1, 4, 2, 5, 3, 6, 7]).unwrap(),
            b.build(&[7, 4, 5, 6, 0, 1, 2, 3]).unwrap(),
        )
    }

    #[test]
    fn test_single_cut_keeps_father_prefix() {
        let father = [0, 1, 2, 3, 4, 5];
        let mother = [5, 4, 3, 2, 1, 0];
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let child = single_cut_crossover(&father, &mother, &mut rng);
            assert!(is_permutation(&child, 6));
            let cut = child.iter().zip(&father).take_while(|(a, b)| a == b).count();
            // after the prefix, jobs follow mother's (descending) order
            assert!(child[cut..].windows(2).all(|w| w[0] > w[1]));
        }
    }

    #[test]
    fn test_single_cut_preserves_precedence_order() {
        let inst = sample_instance();
        let father = [0, 1, 4, 2, 5, 3, 6, 7];
        let mother = [7, 4, 5, 6, 0, 1, 2, 3];
        let mut rng = SmallRng::seed_from_u64(1);
        for _ in 0..50 {
            let child = single_cut_crossover(&father, &mother, &mut rng);
            assert!(is_precedence_ordered(&child, &inst));
        }
    }

    #[test]
    fn test_double_cut_is_permutation() {
        let father = [0, 1, 2, 3, 4, 5, 6];
        let mother = [6, 5, 4, 3, 2, 1, 0];
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..100 {
            let child = double_cut_crossover(&father, &mother, &mut rng);
            assert!(is_permutation(&child, 7));
        }
    }

    #[test]
    fn test_double_cut_window_follows_father() {
        let father = [0, 1, 2, 3, 4, 5, 6];
        let mother = [6, 5, 4, 3, 2, 1, 0];
        let mut rng = SmallRng::seed_from_u64(5);
        for _ in 0..100 {
            let child = double_cut_crossover(&father, &mother, &mut rng);
            // genes equal to mother's at their position come from outside the
            // window; the rest must be ascending (father's order)
            let from_father: Vec<JobId> = child
                .iter()
                .zip(&mother)
                .filter(|(c, m)| c != m)
                .map(|(c, _)| *c)
                .collect();
            assert!(from_father.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_double_cut_degenerate_sizes() {
        let mut rng = SmallRng::seed_from_u64(0);
        assert_eq!(double_cut_crossover(&[0], &[0], &mut rng), vec![0]);
        assert!(double_cut_crossover(&[], &[], &mut rng).is_empty());
    }

    #[test]
    fn test_uniform_respects_parent_orders() {
        let father = [0, 1, 2, 3, 4, 5];
        let mother = [5, 4, 3, 2, 1, 0];
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..50 {
            let child = uniform_crossover(&father, &mother, &mut rng);
            assert!(is_permutation(&child, 6));
        }
        // identical parents reproduce themselves
        let child = uniform_crossover(&father, &father, &mut rng);
        assert_eq!(child, father.to_vec());
    }

    #[test]
    fn test_swap_mutation() {
        let mut list = vec![0, 1, 2, 3];
        let mut rng = SmallRng::seed_from_u64(42);
        let (i, j) = swap_mutation(&mut list, &mut rng).unwrap();
        assert_ne!(i, j);
        assert_eq!(list[i], j);
        assert_eq!(list[j], i);

        let mut single = vec![0];
        assert_eq!(swap_mutation(&mut single, &mut rng), None);
    }

    #[test]
    fn test_crossover_children_are_feasible() {
        let inst = sample_instance();
        let (father, mother) = sample_parents(&inst);
        let ops = GeneticOperators::new(&inst);
        let mut rng = SmallRng::seed_from_u64(42);
        for kind in [
            CrossoverType::SingleCut,
            CrossoverType::DoubleCut,
            CrossoverType::Uniform,
        ] {
            for _ in 0..30 {
                let child = ops.crossover(kind, &father, &mother, &mut rng).unwrap();
                assert_eq!(child.len(), 8);
                assert!(is_feasible(&child), "{kind:?} produced {child:?}");
            }
        }
    }

    #[test]
    fn test_mutation_always_feasible() {
        let inst = sample_instance();
        let (father, _) = sample_parents(&inst);
        let ops = GeneticOperators::new(&inst).with_mutation_rate(1.0);
        let mut rng = SmallRng::seed_from_u64(7);
        let mut changed = false;
        for _ in 0..50 {
            let mutated = ops.mutate(father.clone(), &mut rng).unwrap();
            assert!(is_feasible(&mutated));
            changed |= mutated != father;
        }
        assert!(changed);
    }

    #[test]
    fn test_mutation_rate_rejects_nan() {
        let inst = sample_instance();
        let (father, _) = sample_parents(&inst);
        let ops = GeneticOperators::new(&inst).with_mutation_rate(f64::NAN);
        assert_eq!(ops.mutation_rate(), 0.25);
        assert_eq!(GeneticOperators::new(&inst).with_mutation_rate(7.0).mutation_rate(), 1.0);

        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(is_feasible(&ops.mutate(father.clone(), &mut rng).unwrap()));
        }
    }

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let inst = sample_instance();
        let (father, _) = sample_parents(&inst);
        let ops = GeneticOperators::new(&inst).with_mutation_rate(0.0);
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(ops.mutate(father.clone(), &mut rng).unwrap(), father);
        }
    }

    #[test]
    fn test_mutation_gives_up_on_chain() {
        // A pure chain has a single feasible order: every swap breaks it.
        let inst = ProblemInstance::new(
            vec![1],
            vec![
                Job::new(1).with_demands(vec![1]).with_successor(1),
                Job::new(1).with_demands(vec![1]).with_successor(2),
                Job::new(1).with_demands(vec![1]),
            ],
        )
        .unwrap();
        let child = ScheduleBuilder::new(&inst).build(&[0, 1, 2]).unwrap();
        let ops = GeneticOperators::new(&inst)
            .with_mutation_rate(1.0)
            .with_mutation_retries(5);
        let mut rng = SmallRng::seed_from_u64(1);
        let result = ops.mutate(child.clone(), &mut rng).unwrap();
        assert_eq!(result, child);
    }
}
