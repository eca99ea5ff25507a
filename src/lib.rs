//! # u-blendroute
//!
//! Collection routing with grade blending and per-grade delivery quotas.
//! Vehicles collect a graded commodity from supply points; a route's load is
//! priced at the worst grade it contains, and the fleet must meet minimum
//! quotas per grade. A greedy cheapest-insertion constructor builds the
//! first solution and simulated annealing improves it.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Grade, Point, Instance, Solution)
//! - [`distance`] — Euclidean distance matrix
//! - [`evaluation`] — Route metrics, feasibility, and penalized energy
//! - [`constructive`] — Greedy cheapest insertion
//! - [`neighborhood`] — 2-opt, reinsert, swap, drop, and add moves
//! - [`annealing`] — Simulated annealing engine and u-metaheur bridge
//! - [`loader`] — Instance file reader
//! - [`report`] — Solution report and convergence CSV
//!
//! ## Example
//!
//! ```
//! use u_blendroute::annealing::{AnnealingConfig, AnnealingRunner};
//! use u_blendroute::loader::InstanceLoader;
//! use u_blendroute::report::render_solution;
//!
//! let text = "2\n60 60\n2\n20 0\n3.0 1.0\n5\n\
//!             1 0 0 - 0\n2 5 0 A 20\n3 6 1 A 15\n4 -5 0 B 30\n5 -6 -1 B 10\n";
//! let instance = InstanceLoader::new().parse_str(text).unwrap();
//!
//! let config = AnnealingConfig::default()
//!     .with_initial_temperature(100.0)
//!     .with_cooling_rate(0.99)
//!     .with_seed(42);
//! let result = AnnealingRunner::run(&instance, &config).unwrap();
//!
//! assert!(result.best.is_feasible());
//! assert!(render_solution(&result.best).contains("feasible: yes"));
//! ```

pub mod annealing;
pub mod constructive;
pub mod distance;
pub mod evaluation;
pub mod loader;
pub mod models;
pub mod neighborhood;
pub mod report;
