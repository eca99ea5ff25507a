//! Domain model types for blended-grade collection routing.
//!
//! Provides the core abstractions: graded supply points, the immutable
//! problem instance, per-route metrics, and evaluated solutions.

mod err;
mod grade;
mod instance;
mod point;
mod route;
mod solution;

pub use err::{InstanceError, NotFoundError};
pub use grade::Grade;
pub use instance::Instance;
pub use point::Point;
pub use route::RouteSummary;
pub use solution::{
    Assignment, Evaluation, Solution, Violation, ViolationType, INFEASIBLE_PROFIT,
};
