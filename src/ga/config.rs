//! Run parameters.
//!
//! [`Params`] holds everything that controls one evolutionary run. It is
//! immutable for the duration of the run.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::crossover::CrossoverKind;
use super::initialize::InitialPopulation;
use super::mutation::MutationKind;
use crate::error::{TspError, TspResult};

/// Parameters of a TSP evolutionary run.
///
/// # Defaults
///
/// ```
/// use u_tsp_evolve::ga::{CrossoverKind, MutationKind, Params};
///
/// let params = Params::default();
/// assert_eq!(params.population_size, 100);
/// assert_eq!(params.crossover_type, CrossoverKind::Ox);
/// assert_eq!(params.mutation_type, MutationKind::Swap);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tsp_evolve::ga::{CrossoverKind, MutationKind, Params};
///
/// let params = Params::default()
///     .with_population_size(200)
///     .with_elite_size(10)
///     .with_crossover_type(CrossoverKind::Pmx)
///     .with_mutation_type(MutationKind::Inversion)
///     .with_seed(42);
/// assert!(params.validate().is_ok());
/// ```
///
/// Variant names parse from their configuration strings:
///
/// ```
/// use u_tsp_evolve::ga::{CrossoverKind, MutationKind, Params};
///
/// let params = Params::default()
///     .with_crossover_name("cx")?
///     .with_mutation_name("two_opt")?
///     .with_initial_population_name("random")?;
/// assert_eq!(params.crossover_type, CrossoverKind::Cx);
/// assert_eq!(params.mutation_type, MutationKind::TwoOpt);
/// assert!(Params::default().with_crossover_name("erx").is_err());
/// # Ok::<(), u_tsp_evolve::TspError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Params {
    /// Number of tours in every generation.
    pub population_size: usize,

    /// Number of generations to evolve.
    pub generations: usize,

    /// Number of top tours carried over unchanged each generation.
    pub elite_size: usize,

    /// Individuals sampled per tournament.
    pub tournament_size: usize,

    /// Probability that an offspring tour is mutated (0.0–1.0).
    ///
    /// Swap mutation also uses it as its per-slot probability.
    pub mutation_rate: f64,

    /// Mutation operator.
    pub mutation_type: MutationKind,

    /// Crossover operator.
    pub crossover_type: CrossoverKind,

    /// How the first generation is built.
    pub initial_population: InitialPopulation,

    /// Random seed for reproducibility.
    ///
    /// `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            elite_size: 5,
            tournament_size: 5,
            mutation_rate: 0.05,
            mutation_type: MutationKind::default(),
            crossover_type: CrossoverKind::default(),
            initial_population: InitialPopulation::default(),
            seed: None,
        }
    }
}

impl Params {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the elite size.
    pub fn with_elite_size(mut self, n: usize) -> Self {
        self.elite_size = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the mutation rate, clamped to `[0, 1]`.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation operator.
    pub fn with_mutation_type(mut self, kind: MutationKind) -> Self {
        self.mutation_type = kind;
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover_type(mut self, kind: CrossoverKind) -> Self {
        self.crossover_type = kind;
        self
    }

    /// Sets the initial population mode.
    pub fn with_initial_population(mut self, mode: InitialPopulation) -> Self {
        self.initial_population = mode;
        self
    }

    /// Sets the mutation operator by name.
    pub fn with_mutation_name(self, name: &str) -> TspResult<Self> {
        Ok(self.with_mutation_type(name.parse()?))
    }

    /// Sets the crossover operator by name.
    pub fn with_crossover_name(self, name: &str) -> TspResult<Self> {
        Ok(self.with_crossover_type(name.parse()?))
    }

    /// Sets the initial population mode by name.
    pub fn with_initial_population_name(self, name: &str) -> TspResult<Self> {
        Ok(self.with_initial_population(name.parse()?))
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of parents selected (and offspring produced) per generation.
    pub fn offspring_count(&self) -> usize {
        self.population_size.saturating_sub(self.elite_size)
    }

    /// Validates the parameters.
    pub fn validate(&self) -> TspResult<()> {
        if self.population_size < 2 {
            return Err(TspError::params("population_size must be at least 2"));
        }
        if self.generations == 0 {
            return Err(TspError::params("generations must be at least 1"));
        }
        if self.elite_size >= self.population_size {
            return Err(TspError::params(format!(
                "elite_size ({}) must be smaller than population_size ({})",
                self.elite_size, self.population_size
            )));
        }
        if self.tournament_size == 0 {
            return Err(TspError::params("tournament_size must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TspError::params(format!(
                "mutation_rate must be within [0, 1], got {}",
                self.mutation_rate
            )));
        }
        Ok(())
    }
}
