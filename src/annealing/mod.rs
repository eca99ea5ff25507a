//! Simulated annealing over collection routes.
//!
//! The engine starts from the cheapest-insertion solution, perturbs it with
//! the [`neighborhood`](crate::neighborhood) moves, accepts neighbors with
//! the Metropolis criterion on the penalized energy, and cools geometrically
//! until the final temperature.
//!
//! # Reference
//!
//! Kirkpatrick, S., Gelatt, C.D. & Vecchi, M.P. (1983). "Optimization by
//! Simulated Annealing", *Science* 220(4598), 671-680.

mod acceptance;
mod bridge;
mod config;
mod err;
mod runner;

pub use acceptance::{accept, acceptance_probability};
pub use bridge::BlendingSaProblem;
pub use config::AnnealingConfig;
pub use err::{ConfigError, EngineError};
pub use runner::{
    Annealer, AnnealingResult, AnnealingRunner, ConvergenceSample, MoveStats, Phase,
};
