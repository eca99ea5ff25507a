//! Adapter to the generic simulated-annealing framework.

use rand::Rng;
use u_metaheur::sa::SaProblem;

use super::{AnnealingConfig, EngineError};
use crate::constructive::cheapest_insertion;
use crate::evaluation::{Evaluator, PenaltyWeights};
use crate::models::{Assignment, Instance};
use crate::neighborhood::Neighborhood;

/// Exposes the collection problem as a [`SaProblem`].
///
/// Cost is the negated penalized energy, so minimizing cost maximizes
/// energy. This lets [`u_metaheur::sa::SaRunner`] drive the same moves and
/// evaluator with its own cooling schedules and cancellation.
///
/// # Examples
///
/// ```
/// use u_blendroute::annealing::{AnnealingConfig, BlendingSaProblem};
/// use u_blendroute::models::{Grade, Instance, Point};
/// use u_metaheur::sa::{CoolingSchedule, SaConfig, SaProblem, SaRunner};
///
/// let instance = Instance::new(
///     Point::depot(1, 0.0, 0.0),
///     vec![
///         Point::supply(2, 3.0, 4.0, Grade::from_label('A'), 10),
///         Point::supply(3, -3.0, 4.0, Grade::from_label('A'), 10),
///     ],
///     vec![30],
///     vec![0],
///     vec![2.0],
/// )
/// .unwrap();
/// let problem = BlendingSaProblem::from_config(&instance, &AnnealingConfig::default()).unwrap();
///
/// let config = SaConfig::default()
///     .with_initial_temperature(10.0)
///     .with_min_temperature(0.1)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.9 })
///     .with_iterations_per_temperature(10)
///     .with_seed(42);
/// let result = SaRunner::run(&problem, &config);
/// assert!(result.best_cost <= problem.cost(problem.initial()));
/// ```
pub struct BlendingSaProblem<'a> {
    evaluator: Evaluator<'a>,
    weights: PenaltyWeights,
    neighborhood: Neighborhood,
    initial: Assignment,
}

impl<'a> BlendingSaProblem<'a> {
    /// Creates the adapter around a prepared initial assignment.
    pub fn new(
        evaluator: Evaluator<'a>,
        weights: PenaltyWeights,
        neighborhood: Neighborhood,
        initial: Assignment,
    ) -> Self {
        Self {
            evaluator,
            weights,
            neighborhood,
            initial,
        }
    }

    /// Validates `config` and seeds the adapter with the constructor's
    /// solution.
    pub fn from_config(
        instance: &'a Instance,
        config: &AnnealingConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let evaluator = Evaluator::new(instance).with_coverage(config.coverage);
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = u_numflow::random::create_rng(seed);
        let order = config.insertion_order.sequence(instance, &mut rng);
        let initial = cheapest_insertion(&evaluator, &order)?.into_assignment();
        Ok(Self::new(
            evaluator,
            config.weights,
            config.neighborhood()?,
            initial,
        ))
    }

    /// The starting assignment.
    pub fn initial(&self) -> &Assignment {
        &self.initial
    }

    /// Penalized energy of an assignment; `-inf` if it names unknown points.
    pub fn energy(&self, assignment: &Assignment) -> f64 {
        match self
            .evaluator
            .evaluate(&assignment.routes, &assignment.unassigned)
        {
            Ok(evaluation) => self.weights.energy(&evaluation),
            Err(_) => f64::NEG_INFINITY,
        }
    }
}

impl SaProblem for BlendingSaProblem<'_> {
    type Solution = Assignment;

    fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Assignment {
        self.initial.clone()
    }

    fn cost(&self, assignment: &Assignment) -> f64 {
        -self.energy(assignment)
    }

    fn neighbor<R: Rng>(&self, assignment: &Assignment, rng: &mut R) -> Assignment {
        self.neighborhood
            .propose(assignment, rng)
            .1
            .unwrap_or_else(|| assignment.clone())
    }
}
