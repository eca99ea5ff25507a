//! Constructive heuristics for building initial solutions.
//!
//! - [`cheapest_insertion`] — Greedy cheapest insertion over all vehicles, O(n·m·L)
//! - [`priority_order`] — Best grade first, then largest quantity
//! - [`shuffled_order`] — Random insertion order

mod cheapest_insertion;

pub use cheapest_insertion::{cheapest_insertion, priority_order, shuffled_order};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Instance;

/// Order in which the constructor inserts supply points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InsertionOrder {
    /// Grade ascending, then quantity descending.
    #[default]
    Priority,
    /// Uniformly shuffled.
    Shuffled,
}

impl InsertionOrder {
    /// Produces the insertion sequence for an instance.
    pub fn sequence<R: Rng>(self, instance: &Instance, rng: &mut R) -> Vec<usize> {
        match self {
            InsertionOrder::Priority => priority_order(instance),
            InsertionOrder::Shuffled => shuffled_order(instance, rng),
        }
    }
}
