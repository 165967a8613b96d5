//! GA parameters.

use serde::{Deserialize, Serialize};

use super::operators::CrossoverType;
use super::selection::TournamentSelector;

/// How offspring enter the population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReplacementStrategy {
    /// Children are appended; once the population outgrows
    /// `elimination_factor × population_size` the worse half is dropped.
    ElitistTruncation,
    /// Steady state: a child replaces the worst individual of a
    /// tournament when it is strictly better.
    ReplaceWorst,
}

/// Evolution engine configuration.
///
/// # Example
/// ```
/// use u_rcpsp::ga::{CrossoverType, GaConfig};
///
/// let config = GaConfig::default()
///     .with_population_size(20)
///     .with_primary_crossover(CrossoverType::SingleCut)
///     .with_seed(42);
/// assert_eq!(config.population_size, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaConfig {
    /// Initial population size (default: 30).
    pub population_size: usize,
    /// Truncation triggers above `elimination_factor × population_size`
    /// individuals (default: 10).
    pub elimination_factor: usize,
    /// Probability that a primary child is mutated (default: 0.25).
    pub mutation_rate: f64,
    /// Swap attempts per mutation (default: 80).
    pub mutation_retries: usize,
    /// Crossover producing the child of every iteration (default: double-cut).
    pub primary_crossover: CrossoverType,
    /// Crossover producing the occasional extra child (default: uniform).
    pub secondary_crossover: CrossoverType,
    /// Probability of an extra secondary child per iteration (default: 0.1).
    pub secondary_crossover_rate: f64,
    /// Probability of dropping each duplicate schedule during truncation
    /// (default: 0.8).
    pub duplicate_removal_rate: f64,
    /// Tournament sizes.
    pub tournament: TournamentSelector,
    pub replacement: ReplacementStrategy,
    /// Seed for [`EvolutionEngine::run_seeded`](super::EvolutionEngine::run_seeded).
    pub seed: u64,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            elimination_factor: 10,
            mutation_rate: 0.25,
            mutation_retries: 80,
            primary_crossover: CrossoverType::DoubleCut,
            secondary_crossover: CrossoverType::Uniform,
            secondary_crossover_rate: 0.1,
            duplicate_removal_rate: 0.8,
            tournament: TournamentSelector::default(),
            replacement: ReplacementStrategy::ElitistTruncation,
            seed: 0,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    pub fn with_elimination_factor(mut self, factor: usize) -> Self {
        self.elimination_factor = factor.max(1);
        self
    }

    /// Sets the mutation probability, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_retries(mut self, retries: usize) -> Self {
        self.mutation_retries = retries;
        self
    }

    pub fn with_primary_crossover(mut self, kind: CrossoverType) -> Self {
        self.primary_crossover = kind;
        self
    }

    pub fn with_secondary_crossover(mut self, kind: CrossoverType) -> Self {
        self.secondary_crossover = kind;
        self
    }

    /// Sets the secondary crossover probability, clamped to `[0, 1]`.
    pub fn with_secondary_crossover_rate(mut self, rate: f64) -> Self {
        self.secondary_crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the duplicate removal probability, clamped to `[0, 1]`.
    pub fn with_duplicate_removal_rate(mut self, rate: f64) -> Self {
        self.duplicate_removal_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_tournament(mut self, tournament: TournamentSelector) -> Self {
        self.tournament = tournament;
        self
    }

    pub fn with_replacement(mut self, replacement: ReplacementStrategy) -> Self {
        self.replacement = replacement;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Re-applies the builder clamps, for configurations read from files.
    ///
    /// Rates that are not numbers fall back to their defaults.
    pub fn normalized(self) -> Self {
        let defaults = Self::default();
        let rate = |value: f64, default: f64| if value.is_nan() { default } else { value };
        let mutation = rate(self.mutation_rate, defaults.mutation_rate);
        let secondary = rate(self.secondary_crossover_rate, defaults.secondary_crossover_rate);
        let duplicates = rate(self.duplicate_removal_rate, defaults.duplicate_removal_rate);
        let factor = self.elimination_factor;
        self.with_mutation_rate(mutation)
            .with_secondary_crossover_rate(secondary)
            .with_duplicate_removal_rate(duplicates)
            .with_elimination_factor(factor)
    }

    /// Population size at which truncation runs.
    pub fn elimination_threshold(&self) -> usize {
        self.elimination_factor
            .max(1)
            .saturating_mul(self.population_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = GaConfig::default();
        assert_eq!(c.population_size, 30);
        assert_eq!(c.elimination_threshold(), 300);
        assert_eq!(c.mutation_retries, 80);
        assert_eq!(c.primary_crossover, CrossoverType::DoubleCut);
        assert_eq!(c.secondary_crossover, CrossoverType::Uniform);
        assert_eq!(c.tournament, TournamentSelector::new(4, 3));
        assert_eq!(c.replacement, ReplacementStrategy::ElitistTruncation);
    }

    #[test]
    fn test_builder_clamps_rates() {
        let c = GaConfig::default()
            .with_mutation_rate(1.5)
            .with_secondary_crossover_rate(-0.2)
            .with_duplicate_removal_rate(0.5)
            .with_elimination_factor(0);
        assert_eq!(c.mutation_rate, 1.0);
        assert_eq!(c.secondary_crossover_rate, 0.0);
        assert_eq!(c.duplicate_removal_rate, 0.5);
        assert_eq!(c.elimination_factor, 1);
    }

    #[test]
    fn test_deserialize_partial_json() {
        let json = r#"{
            "population_size": 12,
            "primary_crossover": "Uniform",
            "replacement": "ReplaceWorst",
            "tournament": { "best_size": 5, "worst_size": 2 },
            "seed": 7
        }"#;
        let c: GaConfig = serde_json::from_str(json).unwrap();
        assert_eq!(c.population_size, 12);
        assert_eq!(c.primary_crossover, CrossoverType::Uniform);
        assert_eq!(c.replacement, ReplacementStrategy::ReplaceWorst);
        assert_eq!(c.tournament, TournamentSelector::new(5, 2));
        assert_eq!(c.seed, 7);
        // unspecified fields keep their defaults
        assert_eq!(c.mutation_retries, 80);
        assert_eq!(c.secondary_crossover, CrossoverType::Uniform);
    }

    #[test]
    fn test_normalized_repairs_file_values() {
        let json = r#"{ "mutation_rate": 3.0, "duplicate_removal_rate": -1.0, "elimination_factor": 0 }"#;
        let c = serde_json::from_str::<GaConfig>(json).unwrap().normalized();
        assert_eq!(c.mutation_rate, 1.0);
        assert_eq!(c.duplicate_removal_rate, 0.0);
        assert_eq!(c.elimination_factor, 1);

        let c = GaConfig {
            secondary_crossover_rate: f64::NAN,
            ..GaConfig::default()
        }
        .normalized();
        assert_eq!(c.secondary_crossover_rate, 0.1);
    }

    #[test]
    fn test_serde_round_trip() {
        let c = GaConfig::default().with_seed(99).with_population_size(8);
        let json = serde_json::to_string(&c).unwrap();
        let back: GaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
