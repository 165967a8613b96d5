//! Schedule construction and feasibility checking.
//!
//! Provides the serial schedule generation scheme that decodes activity
//! lists into start times, and the checker that validates complete
//! start-time vectors.
//!
//! # Algorithm
//!
//! `ScheduleBuilder` places jobs one at a time, in list order, at the
//! earliest period allowed by their scheduled predecessors and the
//! remaining resource capacity. It is not optimal, but every precedence-
//! ordered list decodes into a feasible schedule.
//!
//! # References
//!
//! - Kolisch (1996), "Serial and parallel resource-constrained project
//!   scheduling methods revisited"
//! - Hartmann (1998), "A competitive genetic algorithm for resource-
//!   constrained project scheduling"

mod feasibility;
mod profile;
mod ssgs;

pub use feasibility::{check, is_feasible, Violation};
pub use profile::{Overload, ResourceProfile};
pub use ssgs::ScheduleBuilder;
