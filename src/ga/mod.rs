//! Genetic algorithm over activity lists.
//!
//! Individuals are complete start-time [`Solution`](crate::models::Solution)s.
//! Operators work on their canonical activity lists and decode children with
//! the serial schedule generation scheme, so the population only ever holds
//! feasible schedules.
//!
//! # Submodules
//!
//! - [`encoding`]: start times ↔ activity lists, precedence ordering
//! - [`operators`]: single-cut, double-cut and uniform crossover; repaired
//!   swap mutation
//! - [`selection`]: Floyd-sampled tournaments
//! - [`population`]: random initialization and elitist truncation
//! - [`engine`]: the evolution loop and its stop conditions
//!
//! # Reference
//! - Hartmann (1998), "A competitive genetic algorithm for resource-
//!   constrained project scheduling"
//! - Kolisch & Hartmann (2006), "Experimental investigation of heuristics
//!   for resource-constrained project scheduling: An update"

mod config;
pub mod encoding;
pub mod engine;
pub mod operators;
pub mod population;
pub mod selection;

pub use config::{GaConfig, ReplacementStrategy};
pub use encoding::{is_precedence_ordered, precedence_order, to_activity_list};
pub use engine::{
    Clock, EnginePhase, EvolutionEngine, EvolutionOutcome, IterationLimit, StopCondition,
    SystemClock, TimeLimit,
};
pub use operators::{
    double_cut_crossover, single_cut_crossover, swap_mutation, uniform_crossover, CrossoverType,
    GeneticOperators,
};
pub use selection::{floyd_sample, TournamentSelector};
