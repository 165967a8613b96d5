//! Resource-constrained project scheduling (RCPSP) by genetic algorithm.
//!
//! Jobs with fixed durations and precedence arcs consume renewable
//! resources of fixed per-period capacity; the goal is a start time for
//! every job that respects both constraint kinds and minimizes the makespan.
//!
//! # Modules
//!
//! - **`models`**: `ProblemInstance`, `Job`, `PrecedenceIndex`, `Solution`
//! - **`validation`**: Instance integrity checks (demand vs. capacity,
//!   successor range, self-loops, cycles, horizon overflow)
//! - **`scheduler`**: Serial schedule generation scheme, resource profile,
//!   feasibility checking
//! - **`ga`**: Activity-list encoding, crossover and mutation, tournament
//!   selection, the evolution engine
//! - **`io`**: Plain-text instance and solution files
//! - **`error`**: Error types
//!
//! # Example
//!
//! ```
//! use u_rcpsp::ga::{EvolutionEngine, GaConfig, IterationLimit};
//! use u_rcpsp::io::{format_solution, parse_instance};
//! use u_rcpsp::scheduler::is_feasible;
//!
//! let instance = parse_instance("3 1\n5\n2 2 1 2\n3 3 0\n1 5 0\n").unwrap();
//! let mut engine = EvolutionEngine::new(&instance, GaConfig::default().with_seed(7));
//! let outcome = engine.run_seeded(&mut IterationLimit(100)).unwrap();
//!
//! assert!(is_feasible(&outcome.best));
//! assert_eq!(outcome.best.makespan(), 6);
//! assert!(format_solution(&outcome.best).starts_with("3\n"));
//! ```
//!
//! # References
//!
//! - Kolisch (1996), "Serial and parallel resource-constrained project
//!   scheduling methods revisited: Theory and computation"
//! - Hartmann (1998), "A competitive genetic algorithm for resource-
//!   constrained project scheduling"

pub mod error;
pub mod ga;
pub mod io;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{InstanceError, ParseError, RcpspError, ScheduleError};
