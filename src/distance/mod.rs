//! Distance matrix.
//!
//! Provides a dense, id-keyed Euclidean distance matrix for collection problems.

mod matrix;

pub use matrix::DistanceMatrix;
