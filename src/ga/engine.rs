//! Steady-state evolution loop.
//!
//! # Algorithm
//!
//! 1. **Initializing**: build `population_size` random precedence-ordered
//!    individuals.
//! 2. **Evolving**, once per iteration until the stop condition fires:
//!    - pick two parents with a best-of-4 tournament;
//!    - primary crossover (double-cut by default);
//!    - with probability `secondary_crossover_rate`, a secondary crossover
//!      (uniform by default) whose child is inserted unconditionally;
//!    - mutate the primary child and insert it;
//!    - under elitist truncation, halve the population once it outgrows
//!      `elimination_factor × population_size`.
//! 3. **Finalizing**: return the individual with the smallest makespan.
//!
//! Wall-clock time only enters through [`StopCondition`]; with an
//! [`IterationLimit`] and a seeded RNG a run is fully reproducible.
//!
//! # Reference
//! Hartmann (1998), "A competitive genetic algorithm for resource-
//! constrained project scheduling"

use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{GaConfig, ReplacementStrategy};
use super::operators::GeneticOperators;
use super::population::{best_index, eliminate, initial_population};
use crate::error::ScheduleError;
use crate::models::{ProblemInstance, Solution, Time};
use crate::scheduler::ScheduleBuilder;

// ======================== Stop conditions ========================

/// Source of elapsed time.
pub trait Clock {
    /// Time since the clock was started.
    fn elapsed(&self) -> Duration;
}

/// Monotonic wall clock started at construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Decides when the evolution loop ends.
///
/// Checked once at the top of every iteration with the number of completed
/// iterations. Closures `FnMut(u64) -> bool` implement it too.
pub trait StopCondition {
    fn should_stop(&mut self, iteration: u64) -> bool;
}

impl<F: FnMut(u64) -> bool> StopCondition for F {
    fn should_stop(&mut self, iteration: u64) -> bool {
        self(iteration)
    }
}

/// Stops after a fixed number of iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationLimit(pub u64);

impl StopCondition for IterationLimit {
    fn should_stop(&mut self, iteration: u64) -> bool {
        iteration >= self.0
    }
}

/// Stops once the clock passes a time budget.
#[derive(Debug, Clone)]
pub struct TimeLimit<C = SystemClock> {
    limit: Duration,
    clock: C,
}

impl TimeLimit<SystemClock> {
    /// Budget measured from now on the system clock.
    pub fn new(limit: Duration) -> Self {
        Self::with_clock(limit, SystemClock::new())
    }
}

impl<C: Clock> TimeLimit<C> {
    pub fn with_clock(limit: Duration, clock: C) -> Self {
        Self { limit, clock }
    }

    pub fn limit(&self) -> Duration {
        self.limit
    }
}

impl<C: Clock> StopCondition for TimeLimit<C> {
    fn should_stop(&mut self, _iteration: u64) -> bool {
        self.clock.elapsed() >= self.limit
    }
}

// ======================== Engine ========================

/// Lifecycle of an [`EvolutionEngine`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Initializing,
    Evolving,
    Finalizing,
}

/// Result of a run.
#[derive(Debug, Clone)]
pub struct EvolutionOutcome<'a> {
    /// Smallest-makespan individual of the final population.
    pub best: Solution<'a>,
    /// Completed iterations.
    pub iterations: u64,
    /// Individuals decoded and offered to the population, initial ones
    /// included. Rejected mutation attempts are not counted.
    pub evaluations: u64,
    /// Population size at the end of the run.
    pub population_size: usize,
    pub elapsed: Duration,
}

/// Genetic algorithm over activity lists.
///
/// # Example
/// ```
/// use u_rcpsp::ga::{EvolutionEngine, GaConfig, IterationLimit};
/// use u_rcpsp::models::{Job, ProblemInstance};
/// use u_rcpsp::scheduler::is_feasible;
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
/// let config = GaConfig::default().with_population_size(10).with_seed(42);
/// let mut engine = EvolutionEngine::new(&instance, config);
/// let outcome = engine.run_seeded(&mut IterationLimit(200)).unwrap();
/// assert!(is_feasible(&outcome.best));
/// assert_eq!(outcome.best.makespan(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionEngine<'a> {
    instance: &'a ProblemInstance,
    config: GaConfig,
    operators: GeneticOperators<'a>,
    phase: EnginePhase,
}

impl<'a> EvolutionEngine<'a> {
    pub fn new(instance: &'a ProblemInstance, config: GaConfig) -> Self {
        let config = config.normalized();
        let operators = GeneticOperators::new(instance)
            .with_mutation_rate(config.mutation_rate)
            .with_mutation_retries(config.mutation_retries);
        Self {
            instance,
            config,
            operators,
            phase: EnginePhase::Initializing,
        }
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    /// Phase reached by the most recent run.
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Runs with an RNG seeded from `config.seed`.
    pub fn run_seeded<S: StopCondition>(
        &mut self,
        stop: &mut S,
    ) -> Result<EvolutionOutcome<'a>, ScheduleError> {
        let mut rng = StdRng::seed_from_u64(self.config.seed);
        self.run(&mut rng, stop)
    }

    /// Evolves a population until `stop` fires and returns the best
    /// schedule found.
    ///
    /// An instance without jobs yields the empty schedule immediately. With
    /// fewer than two individuals no parents can be drawn and the best
    /// initial individual is returned.
    ///
    /// # Errors
    /// Propagates [`ScheduleError`] from schedule construction, which only
    /// occurs for instances that bypass validation.
    pub fn run<R: Rng, S: StopCondition>(
        &mut self,
        rng: &mut R,
        stop: &mut S,
    ) -> Result<EvolutionOutcome<'a>, ScheduleError> {
        let started = Instant::now();
        let instance = self.instance;
        self.phase = EnginePhase::Initializing;
        tracing::info!(
            "Starting evolution: {} jobs, {} resources, population {}",
            instance.job_count(),
            instance.resource_count(),
            self.config.population_size
        );

        if instance.job_count() == 0 {
            self.phase = EnginePhase::Finalizing;
            return Ok(EvolutionOutcome {
                best: Solution::new(instance),
                iterations: 0,
                evaluations: 0,
                population_size: 0,
                elapsed: started.elapsed(),
            });
        }

        let builder = ScheduleBuilder::new(instance);
        let mut population =
            initial_population(&builder, self.config.population_size.max(1), rng)?;
        let mut evaluations = population.len() as u64;
        let mut best_makespan = population
            .iter()
            .map(Solution::makespan)
            .min()
            .unwrap_or_default();
        tracing::debug!("Initial population ready, best makespan {}", best_makespan);

        let mut iterations = 0u64;
        if population.len() >= 2 {
            self.phase = EnginePhase::Evolving;
            let threshold = self.config.elimination_threshold();

            while !stop.should_stop(iterations) {
                let Some((father, mother)) = self.config.tournament.select_best(&population, rng)
                else {
                    break;
                };
                let child = self.operators.crossover(
                    self.config.primary_crossover,
                    &population[father],
                    &population[mother],
                    rng,
                )?;

                if rng.random_bool(self.config.secondary_crossover_rate) {
                    let extra = self.operators.crossover(
                        self.config.secondary_crossover,
                        &population[father],
                        &population[mother],
                        rng,
                    )?;
                    evaluations += 1;
                    self.note_improvement(&extra, &mut best_makespan, iterations);
                    self.insert(&mut population, extra, rng);
                }

                let child = self.operators.mutate(child, rng)?;
                evaluations += 1;
                self.note_improvement(&child, &mut best_makespan, iterations);
                self.insert(&mut population, child, rng);

                if self.config.replacement == ReplacementStrategy::ElitistTruncation
                    && population.len() > threshold
                {
                    let removed =
                        eliminate(&mut population, self.config.duplicate_removal_rate, rng);
                    tracing::debug!(
                        "Truncation at iteration {}: removed {}, {} remain",
                        iterations,
                        removed,
                        population.len()
                    );
                }

                iterations += 1;
                tracing::trace!(
                    "Iteration {}: population {}, best {}",
                    iterations,
                    population.len(),
                    best_makespan
                );
            }
        }

        self.phase = EnginePhase::Finalizing;
        let population_size = population.len();
        let index = best_index(&population).unwrap_or_default();
        let best = population.swap_remove(index);
        let elapsed = started.elapsed();
        tracing::info!(
            "Evolution finished: makespan {}, {} iterations, {} evaluations in {:.3}s",
            best.makespan(),
            iterations,
            evaluations,
            elapsed.as_secs_f64()
        );

        Ok(EvolutionOutcome {
            best,
            iterations,
            evaluations,
            population_size,
            elapsed,
        })
    }

    fn insert<R: Rng>(&self, population: &mut Vec<Solution<'a>>, child: Solution<'a>, rng: &mut R) {
        match self.config.replacement {
            ReplacementStrategy::ElitistTruncation => population.push(child),
            ReplacementStrategy::ReplaceWorst => {
                if let Some((victim, worst)) = self.config.tournament.select_worst(population, rng) {
                    if child.makespan() < worst {
                        population[victim] = child;
                    }
                }
            }
        }
    }

    fn note_improvement(&self, child: &Solution<'a>, best: &mut Time, iteration: u64) {
        if child.makespan() < *best {
            tracing::debug!(
                "New best makespan {} (was {}) at iteration {}",
                child.makespan(),
                best,
                iteration
            );
            *best = child.makespan();
        }
    }
}
