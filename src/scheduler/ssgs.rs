//! Serial schedule generation scheme (SSGS).
//!
//! # Algorithm
//!
//! 1. Start from a remaining-capacity table `[r][horizon]` at full capacity.
//! 2. Take jobs strictly in activity-list order.
//! 3. Precedence floor: latest finish among already scheduled predecessors.
//! 4. Move the start forward one period at a time until every resource has
//!    enough remaining capacity over `[start, start + duration)`.
//! 5. Commit the job's demand to the table.
//!
//! The search is greedy and never backtracks. Given a precedence-ordered
//! list the result is precedence- and resource-feasible by construction.
//!
//! # Complexity
//! O(n · horizon · r · d_max) in the worst case.
//!
//! # Reference
//! Kolisch (1996), "Serial and parallel resource-constrained project
//! scheduling methods revisited: Theory and computation"

use super::profile::ResourceProfile;
use crate::error::ScheduleError;
use crate::models::{JobId, ProblemInstance, Solution};

/// Turns activity lists into start-time solutions.
///
/// # Example
/// ```
/// use u_rcpsp::models::{Job, ProblemInstance};
/// use u_rcpsp::scheduler::ScheduleBuilder;
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
///
/// let solution = ScheduleBuilder::new(&instance).build(&[0, 1, 2]).unwrap();
/// assert_eq!(solution.start_times(), &[0, 2, 5]);
/// assert_eq!(solution.makespan(), 6);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ScheduleBuilder<'a> {
    instance: &'a ProblemInstance,
}

impl<'a> ScheduleBuilder<'a> {
    pub fn new(instance: &'a ProblemInstance) -> Self {
        Self { instance }
    }

    pub fn instance(&self) -> &'a ProblemInstance {
        self.instance
    }

    /// Schedules the jobs of `activity_list` in order.
    ///
    /// Predecessors that appear later in the list are ignored when computing
    /// the precedence floor, so a list that is not precedence-ordered yields
    /// a resource-feasible schedule that may violate precedence.
    ///
    /// # Errors
    /// - [`ScheduleError::InvalidActivityList`] if the list is not a
    ///   permutation of `0..n`.
    /// - [`ScheduleError::HorizonExceeded`] if a job cannot be placed before
    ///   the horizon. The horizon is the sum of all durations, so on a
    ///   validated instance (no demand above capacity) every job fits and
    ///   this is unreachable.
    pub fn build(&self, activity_list: &[JobId]) -> Result<Solution<'a>, ScheduleError> {
        self.check_permutation(activity_list)?;

        let instance = self.instance;
        let horizon = instance.horizon();
        let mut profile = ResourceProfile::new(instance, horizon);
        let mut solution = Solution::new(instance);
        let mut scheduled = vec![false; instance.job_count()];

        for &job in activity_list {
            let duration = instance.duration(job);
            let mut start = instance
                .predecessors(job)
                .iter()
                .filter(|&&p| scheduled[p])
                .map(|&p| solution.finish(p))
                .max()
                .unwrap_or(0);

            loop {
                if !matches!(start.checked_add(duration), Some(end) if end <= horizon) {
                    return Err(ScheduleError::HorizonExceeded { job, horizon });
                }
                if profile.fits(job, start) {
                    break;
                }
                start += 1;
            }

            profile.reserve(job, start);
            solution.set(job, start);
            scheduled[job] = true;
        }

        Ok(solution)
    }

    fn check_permutation(&self, activity_list: &[JobId]) -> Result<(), ScheduleError> {
        let n = self.instance.job_count();
        if activity_list.len() != n {
            return Err(ScheduleError::InvalidActivityList(format!(
                "expected {n} jobs, got {}",
                activity_list.len()
            )));
        }
        let mut seen = vec![false; n];
        for &job in activity_list {
            if job >= n {
                return Err(ScheduleError::InvalidActivityList(format!(
                    "unknown job {job}"
                )));
            }
            if std::mem::replace(&mut seen[job], true) {
                return Err(ScheduleError::InvalidActivityList(format!(
                    "job {job} appears twice"
                )));
            }
        }
        Ok(())
    }
}
