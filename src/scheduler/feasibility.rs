//! Feasibility checking for complete start-time vectors.
//!
//! Replays the resource bookkeeping of the schedule generation scheme on a
//! fresh `[r][makespan]` table, then checks every precedence arc. This is
//! the acceptance gate for mutated offspring.

use thiserror::Error;

use super::profile::ResourceProfile;
use crate::models::{JobId, Solution, Time};

/// The first constraint a solution violates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Violation {
    /// Concurrent demand exceeds capacity.
    #[error("resource {resource} is over capacity in period {period} when adding job {job}")]
    Capacity {
        job: JobId,
        resource: usize,
        period: Time,
    },
    /// A job starts before one of its predecessors has finished.
    #[error("job {successor} starts at {start} before predecessor {job} finishes at {finish}")]
    Precedence {
        job: JobId,
        successor: JobId,
        finish: Time,
        start: Time,
    },
}

/// Checks resource and precedence constraints, returning the first violation.
///
/// Jobs are added to the resource table in index order.
pub fn check(solution: &Solution<'_>) -> Result<(), Violation> {
    let instance = solution.instance();
    let mut profile = ResourceProfile::new(instance, solution.makespan());

    for job in 0..instance.job_count() {
        profile
            .try_reserve(job, solution.start(job))
            .map_err(|o| Violation::Capacity {
                job,
                resource: o.resource,
                period: o.period,
            })?;
    }

    for job in 0..instance.job_count() {
        let finish = solution.finish(job);
        for &successor in instance.successors(job) {
            let start = solution.start(successor);
            if finish > start {
                return Err(Violation::Precedence {
                    job,
                    successor,
                    finish,
                    start,
                });
            }
        }
    }

    Ok(())
}

/// Whether `solution` respects every capacity and precedence constraint.
pub fn is_feasible(solution: &Solution<'_>) -> bool {
    check(solution).is_ok()
}
