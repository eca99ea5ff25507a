//! Annealing configuration.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::constructive::InsertionOrder;
use crate::evaluation::{Coverage, PenaltyWeights};
use crate::neighborhood::{MoveKind, Neighborhood};

/// Configuration of the annealing engine.
///
/// The temperature starts at `initial_temperature` and is multiplied by
/// `cooling_rate` after every step; the search stops once it drops to
/// `final_temperature` or after `max_iterations` steps.
///
/// Missing fields take their defaults when deserializing.
///
/// # Examples
///
/// ```
/// use u_blendroute::annealing::AnnealingConfig;
/// use u_blendroute::neighborhood::MoveKind;
///
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(500.0)
///     .with_final_temperature(0.5)
///     .with_cooling_rate(0.999)
///     .with_moves(vec![MoveKind::TwoOpt, MoveKind::Swap])
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert!(config.with_cooling_rate(1.0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnealingConfig {
    /// Starting temperature.
    pub initial_temperature: f64,

    /// The search stops once the temperature is at or below this.
    pub final_temperature: f64,

    /// Geometric cooling factor in (0, 1).
    pub cooling_rate: f64,

    /// Random seed. A fresh seed is drawn when `None`.
    pub seed: Option<u64>,

    /// Steps between convergence samples.
    pub sample_interval: usize,

    /// Optional hard cap on the number of steps.
    pub max_iterations: Option<usize>,

    /// Penalty weights of the energy function.
    pub weights: PenaltyWeights,

    /// Whether unassigned points break feasibility.
    pub coverage: Coverage,

    /// Insertion order of the constructor.
    pub insertion_order: InsertionOrder,

    /// Enabled neighborhood moves.
    pub moves: Vec<MoveKind>,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100_000.0,
            final_temperature: 1.0,
            cooling_rate: 0.999_999_5,
            seed: None,
            sample_interval: 1000,
            max_iterations: None,
            weights: PenaltyWeights::default(),
            coverage: Coverage::default(),
            insertion_order: InsertionOrder::default(),
            moves: MoveKind::ALL.to_vec(),
        }
    }
}

impl AnnealingConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_final_temperature(mut self, t: f64) -> Self {
        self.final_temperature = t;
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_sample_interval(mut self, n: usize) -> Self {
        self.sample_interval = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = Some(n);
        self
    }

    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = coverage;
        self
    }

    pub fn with_insertion_order(mut self, order: InsertionOrder) -> Self {
        self.insertion_order = order;
        self
    }

    pub fn with_moves(mut self, moves: Vec<MoveKind>) -> Self {
        self.moves = moves;
        self
    }

    /// Number of cooling steps from the initial to the final temperature,
    /// ignoring `max_iterations`.
    pub fn cooling_steps(&self) -> usize {
        let ratio = (self.final_temperature / self.initial_temperature).ln();
        (ratio / self.cooling_rate.ln()).ceil().max(0.0) as usize
    }

    /// The enabled moves as a [`Neighborhood`].
    pub fn neighborhood(&self) -> Result<Neighborhood, ConfigError> {
        Neighborhood::new(self.moves.clone()).ok_or(ConfigError::NoMoves)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.initial_temperature > 0.0) {
            return Err(ConfigError::NonPositiveInitialTemperature(
                self.initial_temperature,
            ));
        }
        if !(self.final_temperature > 0.0) {
            return Err(ConfigError::NonPositiveFinalTemperature(
                self.final_temperature,
            ));
        }
        if self.final_temperature >= self.initial_temperature {
            return Err(ConfigError::FinalNotBelowInitial {
                initial: self.initial_temperature,
                last: self.final_temperature,
            });
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(ConfigError::CoolingRateOutOfRange(self.cooling_rate));
        }
        if self.sample_interval == 0 {
            return Err(ConfigError::ZeroSampleInterval);
        }
        if self.max_iterations == Some(0) {
            return Err(ConfigError::ZeroIterationCap);
        }
        for (name, weight) in [
            ("capacity", self.weights.capacity),
            ("quota", self.weights.quota),
            ("unassigned", self.weights.unassigned),
        ] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(ConfigError::InvalidPenaltyWeight { name, weight });
            }
        }
        if self.moves.is_empty() {
            return Err(ConfigError::NoMoves);
        }
        Ok(())
    }
}
