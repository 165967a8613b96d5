//! RCPSP domain models.
//!
//! Provides the problem data and the solution representation shared by
//! the schedule generation scheme, the feasibility checker and the GA.
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Job` | duration, per-resource demands, successors |
//! | `ProblemInstance` | validated jobs + capacities + derived precedence index |
//! | `PrecedenceIndex` | job → predecessors |
//! | `Solution` | start time per job, cached makespan |

mod instance;
mod solution;

pub use instance::{Job, JobId, PrecedenceIndex, ProblemInstance, Time};
pub use solution::Solution;
