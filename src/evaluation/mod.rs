//! Solution evaluation.
//!
//! Turns raw assignments into evaluated solutions and scores them with a
//! penalized energy for the annealing search.

mod energy;
mod evaluator;

pub use energy::PenaltyWeights;
pub use evaluator::{Coverage, Evaluator};
