//! Problem instance model.
//!
//! A single-mode RCPSP instance: `n` jobs with fixed durations, `r`
//! renewable resources with per-period capacities, per-job demands and a
//! successor relation forming a DAG.
//!
//! # Reference
//! Kolisch & Hartmann (1999), "Heuristic Algorithms for the
//! Resource-Constrained Project Scheduling Problem"

use serde::{Deserialize, Serialize};

use crate::error::InstanceError;
use crate::validation::validate_input;

/// Zero-based job index.
pub type JobId = usize;

/// Discrete time (periods).
pub type Time = u32;

/// A job (activity) of the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Processing time in periods.
    pub duration: Time,
    /// Units required per resource while the job runs (indexed by resource).
    pub demands: Vec<u32>,
    /// Jobs that may start only after this job completes.
    pub successors: Vec<JobId>,
}

impl Job {
    /// Creates a job with the given duration, no demands and no successors.
    pub fn new(duration: Time) -> Self {
        Self {
            duration,
            demands: Vec::new(),
            successors: Vec::new(),
        }
    }

    /// Sets the per-resource demands.
    pub fn with_demands(mut self, demands: Vec<u32>) -> Self {
        self.demands = demands;
        self
    }

    /// Adds a successor.
    pub fn with_successor(mut self, successor: JobId) -> Self {
        self.successors.push(successor);
        self
    }

    /// Adds several successors.
    pub fn with_successors(mut self, successors: impl IntoIterator<Item = JobId>) -> Self {
        self.successors.extend(successors);
        self
    }
}

/// Job → predecessors lookup, derived once from the successor relation.
///
/// Owned by its [`ProblemInstance`]; two instances never share an index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrecedenceIndex {
    predecessors: Vec<Vec<JobId>>,
    edge_count: usize,
}

impl PrecedenceIndex {
    /// Builds the index by inverting every job's successor list.
    ///
    /// Successors outside `0..jobs.len()` are ignored; validation reports them.
    pub fn from_jobs(jobs: &[Job]) -> Self {
        let mut predecessors = vec![Vec::new(); jobs.len()];
        let mut edge_count = 0;
        for (job, spec) in jobs.iter().enumerate() {
            for &succ in &spec.successors {
                if let Some(preds) = predecessors.get_mut(succ) {
                    preds.push(job);
                    edge_count += 1;
                }
            }
        }
        Self {
            predecessors,
            edge_count,
        }
    }

    /// Predecessors of `job`, in ascending job order.
    #[inline]
    pub fn predecessors(&self, job: JobId) -> &[JobId] {
        &self.predecessors[job]
    }

    /// Number of precedence arcs.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }
}

/// An immutable, validated RCPSP instance.
///
/// Construction runs [`validate_input`], so every `ProblemInstance` has
/// demands within capacity, in-range acyclic successors and a horizon that
/// fits in [`Time`].
///
/// # Example
/// ```
/// use u_rcpsp::models::{Job, ProblemInstance};
///
/// let instance = ProblemInstance::new(
///     vec![5],
///     vec![
///         Job::new(2).with_demands(vec![2]).with_successor(1),
///         Job::new(3).with_demands(vec![3]),
///         Job::new(1).with_demands(vec![5]),
///     ],
/// )
/// .unwrap();
/// assert_eq!(instance.job_count(), 3);
/// assert_eq!(instance.horizon(), 6);
/// assert_eq!(instance.predecessors(1), &[0]);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemInstance {
    capacities: Vec<u32>,
    jobs: Vec<Job>,
    precedence: PrecedenceIndex,
    horizon: Time,
}

impl ProblemInstance {
    /// Validates the data and builds the instance together with its
    /// precedence index.
    pub fn new(capacities: Vec<u32>, jobs: Vec<Job>) -> Result<Self, InstanceError> {
        validate_input(&capacities, &jobs).map_err(InstanceError)?;
        let precedence = PrecedenceIndex::from_jobs(&jobs);
        // Validation guarantees the sum fits.
        let horizon = jobs.iter().map(|j| j.duration).sum();
        Ok(Self {
            capacities,
            jobs,
            precedence,
            horizon,
        })
    }

    /// Builds an instance without running validation.
    #[cfg(test)]
    pub(crate) fn new_unchecked(capacities: Vec<u32>, jobs: Vec<Job>) -> Self {
        let precedence = PrecedenceIndex::from_jobs(&jobs);
        let horizon = jobs
            .iter()
            .fold(0 as Time, |acc, j| acc.saturating_add(j.duration));
        Self {
            capacities,
            jobs,
            precedence,
            horizon,
        }
    }

    /// Number of jobs (`n`).
    #[inline]
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Number of renewable resources (`r`).
    #[inline]
    pub fn resource_count(&self) -> usize {
        self.capacities.len()
    }

    /// Per-period capacity of every resource.
    pub fn capacities(&self) -> &[u32] {
        &self.capacities
    }

    /// Per-period capacity of `resource`.
    #[inline]
    pub fn capacity(&self, resource: usize) -> u32 {
        self.capacities[resource]
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    #[inline]
    pub fn duration(&self, job: JobId) -> Time {
        self.jobs[job].duration
    }

    /// Demand of `job` for `resource`.
    #[inline]
    pub fn demand(&self, job: JobId, resource: usize) -> u32 {
        self.jobs[job].demands[resource]
    }

    /// All demands of `job`, indexed by resource.
    #[inline]
    pub fn demands(&self, job: JobId) -> &[u32] {
        &self.jobs[job].demands
    }

    #[inline]
    pub fn successors(&self, job: JobId) -> &[JobId] {
        &self.jobs[job].successors
    }

    #[inline]
    pub fn predecessors(&self, job: JobId) -> &[JobId] {
        self.precedence.predecessors(job)
    }

    pub fn precedence(&self) -> &PrecedenceIndex {
        &self.precedence
    }

    /// Sum of all durations: an upper bound on any serial-SGS makespan.
    #[inline]
    pub fn horizon(&self) -> Time {
        self.horizon
    }
}
