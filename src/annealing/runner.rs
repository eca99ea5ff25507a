//! Annealing execution loop.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, info, trace};
use u_numflow::random::create_rng;

use super::acceptance::accept;
use super::{AnnealingConfig, EngineError};
use crate::constructive::cheapest_insertion;
use crate::evaluation::Evaluator;
use crate::models::{Instance, Solution};
use crate::neighborhood::{MoveKind, Neighborhood};

/// Lifecycle of an [`Annealer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No initial solution yet.
    Constructing,
    /// Perturbing and cooling.
    Searching,
    /// Cold or out of iterations.
    Terminated,
}

/// One point of the convergence record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceSample {
    pub step: usize,
    pub temperature: f64,
    /// Profit of the best solution so far (the infeasible sentinel if it
    /// is infeasible).
    pub best_profit: f64,
}

/// Counters for one move kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveStats {
    pub kind: MoveKind,
    /// Times the move was chosen.
    pub attempted: usize,
    /// Times it produced a changed assignment.
    pub applied: usize,
    pub accepted: usize,
    /// Times the neighbor had strictly higher energy than the current solution.
    pub improving: usize,
}

impl MoveStats {
    fn new(kind: MoveKind) -> Self {
        Self {
            kind,
            attempted: 0,
            applied: 0,
            accepted: 0,
            improving: 0,
        }
    }
}

/// Result of an annealing run.
#[derive(Debug, Clone)]
pub struct AnnealingResult {
    /// The best solution found, by energy.
    pub best: Solution,

    /// The constructor's solution.
    pub initial: Solution,

    /// Energy of the best solution.
    pub best_energy: f64,

    /// Number of search steps.
    pub iterations: usize,

    /// Number of accepted neighbors (including improvements).
    pub accepted_moves: usize,

    /// Number of strictly improving neighbors.
    pub improving_moves: usize,

    /// Temperature when the search stopped.
    pub final_temperature: f64,

    /// Best profit sampled every `sample_interval` steps.
    pub convergence: Vec<ConvergenceSample>,

    /// Counters per move kind, in [`MoveKind::ALL`] order.
    pub move_stats: Vec<MoveStats>,
}

struct SearchState {
    initial: Solution,
    current: Solution,
    current_energy: f64,
    best: Solution,
    best_energy: f64,
}

/// Step-wise simulated annealing over one instance.
///
/// Owns its random source, the current and best solutions, and the
/// temperature. Drive it with [`step`](Annealer::step) or run it to the end
/// with [`run`](Annealer::run).
///
/// # Examples
///
/// ```
/// use u_blendroute::annealing::{AnnealingConfig, Annealer, Phase};
/// use u_blendroute::models::{Grade, Instance, Point};
///
/// let instance = Instance::new(
///     Point::depot(1, 0.0, 0.0),
///     vec![
///         Point::supply(2, 3.0, 4.0, Grade::from_label('A'), 10),
///         Point::supply(3, -3.0, 4.0, Grade::from_label('B'), 10),
///     ],
///     vec![15, 15],
///     vec![0, 0],
///     vec![3.0, 1.0],
/// )
/// .unwrap();
/// let config = AnnealingConfig::default()
///     .with_initial_temperature(50.0)
///     .with_final_temperature(1.0)
///     .with_cooling_rate(0.9);
///
/// let rng = u_numflow::random::create_rng(7);
/// let mut annealer = Annealer::new(&instance, config, rng).unwrap();
/// assert_eq!(annealer.phase(), Phase::Constructing);
/// annealer.step().unwrap();
/// assert_eq!(annealer.phase(), Phase::Searching);
///
/// let result = annealer.run().unwrap();
/// assert!(result.best.is_feasible());
/// assert_eq!(result.iterations, 38);
/// ```
pub struct Annealer<'a, R: Rng> {
    config: AnnealingConfig,
    evaluator: Evaluator<'a>,
    neighborhood: Neighborhood,
    rng: R,
    temperature: f64,
    iterations: usize,
    accepted_moves: usize,
    improving_moves: usize,
    convergence: Vec<ConvergenceSample>,
    move_stats: Vec<MoveStats>,
    state: Option<SearchState>,
    terminated: bool,
}

impl<'a, R: Rng> Annealer<'a, R> {
    /// Validates `config` and prepares an engine in the constructing phase.
    pub fn new(
        instance: &'a Instance,
        config: AnnealingConfig,
        rng: R,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let neighborhood = config.neighborhood()?;
        let evaluator = Evaluator::new(instance).with_coverage(config.coverage);
        Ok(Self {
            temperature: config.initial_temperature,
            config,
            evaluator,
            neighborhood,
            rng,
            iterations: 0,
            accepted_moves: 0,
            improving_moves: 0,
            convergence: Vec::new(),
            move_stats: MoveKind::ALL.iter().map(|&k| MoveStats::new(k)).collect(),
            state: None,
            terminated: false,
        })
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        match (&self.state, self.terminated) {
            (None, _) => Phase::Constructing,
            (Some(_), false) => Phase::Searching,
            (Some(_), true) => Phase::Terminated,
        }
    }

    /// Current temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Number of search steps taken.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Current solution, once constructed.
    pub fn current(&self) -> Option<&Solution> {
        self.state.as_ref().map(|s| &s.current)
    }

    /// Best solution so far, once constructed.
    pub fn best(&self) -> Option<&Solution> {
        self.state.as_ref().map(|s| &s.best)
    }

    /// Builds the initial solution and enters the searching phase.
    ///
    /// Does nothing if the initial solution already exists.
    pub fn construct(&mut self) -> Result<&Solution, EngineError> {
        if self.state.is_none() {
            let order = self
                .config
                .insertion_order
                .sequence(self.evaluator.instance(), &mut self.rng);
            let initial = cheapest_insertion(&self.evaluator, &order)?;
            let energy = self.config.weights.energy(initial.evaluation());
            info!(
                profit = initial.profit(),
                energy,
                feasible = initial.is_feasible(),
                temperature = self.temperature,
                "annealing started"
            );
            self.convergence.push(ConvergenceSample {
                step: 0,
                temperature: self.temperature,
                best_profit: initial.profit(),
            });
            self.state = Some(SearchState {
                current: initial.clone(),
                current_energy: energy,
                best: initial.clone(),
                best_energy: energy,
                initial,
            });
        }
        match &self.state {
            Some(state) => Ok(&state.current),
            None => Err(EngineError::NotStarted),
        }
    }

    fn is_exhausted(&self) -> bool {
        self.temperature <= self.config.final_temperature
            || self
                .config
                .max_iterations
                .is_some_and(|cap| self.iterations >= cap)
    }

    /// Advances the engine by one transition and returns the new phase.
    ///
    /// Constructing builds the initial solution; searching performs one
    /// perturb/accept/cool step or terminates; terminated is a no-op.
    pub fn step(&mut self) -> Result<Phase, EngineError> {
        match self.phase() {
            Phase::Constructing => {
                self.construct()?;
            }
            Phase::Searching if self.is_exhausted() => {
                self.terminated = true;
            }
            Phase::Searching => self.search_step()?,
            Phase::Terminated => {}
        }
        Ok(self.phase())
    }

    fn search_step(&mut self) -> Result<(), EngineError> {
        let Some(state) = self.state.as_mut() else {
            return Err(EngineError::NotStarted);
        };

        let (kind, next) = self
            .neighborhood
            .propose(state.current.assignment(), &mut self.rng);
        let stats = &mut self.move_stats[kind.index()];
        stats.attempted += 1;

        let neighbor = match next {
            Some(assignment) => {
                stats.applied += 1;
                self.evaluator.build(assignment)?
            }
            None => state.current.clone(),
        };
        let energy = self.config.weights.energy(neighbor.evaluation());

        if energy > state.current_energy {
            stats.improving += 1;
            self.improving_moves += 1;
        }
        let accepted = accept(energy, state.current_energy, self.temperature, &mut self.rng);
        trace!(
            step = self.iterations,
            %kind,
            energy,
            current = state.current_energy,
            accepted,
            "annealing step"
        );
        if accepted {
            stats.accepted += 1;
            self.accepted_moves += 1;
            state.current = neighbor;
            state.current_energy = energy;
            if state.current_energy > state.best_energy {
                state.best = state.current.clone();
                state.best_energy = state.current_energy;
            }
        }

        self.iterations += 1;
        if self.iterations % self.config.sample_interval == 0 {
            self.convergence.push(ConvergenceSample {
                step: self.iterations,
                temperature: self.temperature,
                best_profit: state.best.profit(),
            });
        }
        self.temperature *= self.config.cooling_rate;
        Ok(())
    }

    /// Runs until terminated and returns the result.
    pub fn run(mut self) -> Result<AnnealingResult, EngineError> {
        let span = debug_span!("annealing", seed = ?self.config.seed);
        let _guard = span.enter();
        while self.step()? != Phase::Terminated {}
        self.finish()
    }

    /// Consumes the engine and returns what it has found so far.
    ///
    /// Fails with [`EngineError::NotStarted`] before construction.
    pub fn finish(mut self) -> Result<AnnealingResult, EngineError> {
        let state = self.state.take().ok_or(EngineError::NotStarted)?;

        if self
            .convergence
            .last()
            .map_or(true, |s| s.step != self.iterations)
        {
            self.convergence.push(ConvergenceSample {
                step: self.iterations,
                temperature: self.temperature,
                best_profit: state.best.profit(),
            });
        }

        for s in &self.move_stats {
            debug!(
                kind = %s.kind,
                attempted = s.attempted,
                applied = s.applied,
                accepted = s.accepted,
                improving = s.improving,
                "move statistics"
            );
        }
        info!(
            iterations = self.iterations,
            accepted = self.accepted_moves,
            improving = self.improving_moves,
            best_profit = state.best.profit(),
            best_energy = state.best_energy,
            feasible = state.best.is_feasible(),
            "annealing finished"
        );

        Ok(AnnealingResult {
            best: state.best,
            initial: state.initial,
            best_energy: state.best_energy,
            iterations: self.iterations,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            final_temperature: self.temperature,
            convergence: self.convergence,
            move_stats: self.move_stats,
        })
    }
}

/// Runs the annealing engine with a generator seeded from the configuration.
pub struct AnnealingRunner;

impl AnnealingRunner {
    /// Constructs, searches, and returns the best solution found.
    ///
    /// # Examples
    ///
    /// ```
    /// use u_blendroute::annealing::{AnnealingConfig, AnnealingRunner};
    /// use u_blendroute::models::{Grade, Instance, Point};
    ///
    /// let instance = Instance::new(
    ///     Point::depot(1, 0.0, 0.0),
    ///     vec![Point::supply(2, 3.0, 4.0, Grade::from_label('A'), 10)],
    ///     vec![100],
    ///     vec![0],
    ///     vec![1.0],
    /// )
    /// .unwrap();
    /// let config = AnnealingConfig::default()
    ///     .with_initial_temperature(10.0)
    ///     .with_cooling_rate(0.9)
    ///     .with_seed(42);
    ///
    /// let result = AnnealingRunner::run(&instance, &config).unwrap();
    /// assert!(result.best.is_feasible());
    /// assert!(result.best.profit().abs() < 1e-10);
    /// ```
    pub fn run(
        instance: &Instance,
        config: &AnnealingConfig,
    ) -> Result<AnnealingResult, EngineError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut config = config.clone();
        config.seed = Some(seed);
        Annealer::new(instance, config, create_rng(seed))?.run()
    }
}
