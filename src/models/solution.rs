//! Solution (chromosome) model.
//!
//! A solution is a start-time vector with one entry per job. The makespan
//! is computed on first request and cached; every write goes through
//! [`Solution::set`], which drops the cache. There is no
//! mutable access to the backing vector.

use std::cell::Cell;
use std::fmt;

use super::{JobId, ProblemInstance, Time};
use crate::error::ScheduleError;

/// Start times of every job of an instance.
///
/// Lower makespan = better (minimization convention).
#[derive(Clone)]
pub struct Solution<'a> {
    instance: &'a ProblemInstance,
    starts: Vec<Time>,
    makespan: Cell<Option<Time>>,
}

impl<'a> Solution<'a> {
    /// Creates a solution with every job starting at 0.
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self {
            instance,
            starts: vec![0; instance.job_count()],
            makespan: Cell::new(None),
        }
    }

    /// Wraps an externally produced start-time vector.
    ///
    /// The vector is not checked for feasibility; use
    /// [`is_feasible`](crate::scheduler::is_feasible) for that.
    pub fn from_start_times(
        instance: &'a ProblemInstance,
        starts: Vec<Time>,
    ) -> Result<Self, ScheduleError> {
        if starts.len() != instance.job_count() {
            return Err(ScheduleError::LengthMismatch {
                expected: instance.job_count(),
                actual: starts.len(),
            });
        }
        Ok(Self {
            instance,
            starts,
            makespan: Cell::new(None),
        })
    }

    /// The instance this solution belongs to.
    pub fn instance(&self) -> &'a ProblemInstance {
        self.instance
    }

    #[inline]
    pub fn start(&self, job: JobId) -> Time {
        self.starts[job]
    }

    /// Completion time of `job`.
    #[inline]
    pub fn finish(&self, job: JobId) -> Time {
        self.starts[job].saturating_add(self.instance.duration(job))
    }

    /// Sets the start time of `job` and invalidates the cached makespan.
    #[inline]
    pub fn set(&mut self, job: JobId, start: Time) {
        self.starts[job] = start;
        self.makespan.set(None);
    }

    /// Read-only view of the start times, indexed by job.
    pub fn start_times(&self) -> &[Time] {
        &self.starts
    }

    pub fn into_start_times(self) -> Vec<Time> {
        self.starts
    }

    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Completion time of the last job (0 for an empty instance).
    ///
    /// Computed once and cached until the next [`set`](Self::set).
    pub fn makespan(&self) -> Time {
        if let Some(cached) = self.makespan.get() {
            return cached;
        }
        let value = (0..self.starts.len())
            .map(|job| self.finish(job))
            .max()
            .unwrap_or(0);
        self.makespan.set(Some(value));
        value
    }

    /// Whether the makespan is currently cached.
    pub fn has_cached_makespan(&self) -> bool {
        self.makespan.get().is_some()
    }
}

impl PartialEq for Solution<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.instance, other.instance) && self.starts == other.starts
    }
}

impl Eq for Solution<'_> {}

impl fmt::Debug for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solution")
            .field("starts", &self.starts)
            .field("makespan", &self.makespan.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Job;

    fn two_jobs() -> ProblemInstance {
        ProblemInstance::new(
            vec![1],
            vec![Job::new(3).with_demands(vec![1]), Job::new(2).with_demands(vec![1])],
        )
        .unwrap()
    }

    #[test]
    fn test_new_solution_starts_at_zero() {
        let inst = two_jobs();
        let s = Solution::new(&inst);
        assert_eq!(s.start_times(), &[0, 0]);
        assert_eq!(s.len(), 2);
        assert!(!s.is_empty());
        assert_eq!(s.makespan(), 3);
    }

    #[test]
    fn test_makespan_is_cached_and_invalidated() {
        let inst = two_jobs();
        let mut s = Solution::new(&inst);
        assert!(!s.has_cached_makespan());
        assert_eq!(s.makespan(), 3);
        assert!(s.has_cached_makespan());

        s.set(1, 3);
        assert!(!s.has_cached_makespan());
        assert_eq!(s.makespan(), 5);
        assert_eq!(s.finish(1), 5);
    }

    #[test]
    fn test_clone_keeps_cache_consistent() {
        let inst = two_jobs();
        let s = Solution::new(&inst);
        s.makespan();
        let mut copy = s.clone();
        copy.set(0, 10);
        assert_eq!(copy.makespan(), 13);
        assert_eq!(s.makespan(), 3);
    }

    #[test]
    fn test_from_start_times_checks_length() {
        let inst = two_jobs();
        let ok = Solution::from_start_times(&inst, vec![0, 3]).unwrap();
        assert_eq!(ok.makespan(), 5);

        let err = Solution::from_start_times(&inst, vec![0]).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::LengthMismatch {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_empty_solution_has_zero_makespan() {
        let inst = ProblemInstance::new(vec![], Vec::new()).unwrap();
        let s = Solution::new(&inst);
        assert!(s.is_empty());
        assert_eq!(s.makespan(), 0);
    }

    #[test]
    fn test_equality_compares_start_times() {
        let inst = two_jobs();
        let a = Solution::from_start_times(&inst, vec![0, 3]).unwrap();
        let b = Solution::from_start_times(&inst, vec![0, 3]).unwrap();
        let c = Solution::from_start_times(&inst, vec![2, 0]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.into_start_times(), vec![0, 3]);
    }
}
