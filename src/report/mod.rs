//! Output writers: the solution report and the convergence stream.

mod convergence;
mod solution;

pub use convergence::{write_convergence, write_convergence_to_path};
pub use solution::{format_route, render_solution, write_solution, SolutionReport};
