//! Neighborhood moves for the annealing search.
//!
//! - [`two_opt_move`] — Intra-route segment reversal
//! - [`reinsert_move`] — Relocate one point, possibly within its route
//! - [`swap_move`] — Exchange two routed points
//! - [`drop_move`] — Route → unassigned bucket
//! - [`add_move`] — Unassigned bucket → route
//!
//! Every move reads an immutable [`Assignment`] and returns a new one, or
//! `None` when its precondition cannot be met.

mod bucket;
mod reinsert;
mod swap;
mod two_opt;

pub use bucket::{add_move, drop_move};
pub use reinsert::reinsert_move;
pub use swap::swap_move;
pub use two_opt::{reverse_segment, two_opt_move};

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Assignment;

/// A neighborhood move kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoveKind {
    TwoOpt,
    Reinsert,
    Swap,
    Drop,
    Add,
}

impl MoveKind {
    /// Every move kind, in declaration order.
    pub const ALL: [MoveKind; 5] = [
        MoveKind::TwoOpt,
        MoveKind::Reinsert,
        MoveKind::Swap,
        MoveKind::Drop,
        MoveKind::Add,
    ];

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            MoveKind::TwoOpt => "two_opt",
            MoveKind::Reinsert => "reinsert",
            MoveKind::Swap => "swap",
            MoveKind::Drop => "drop",
            MoveKind::Add => "add",
        }
    }

    /// Position in [`MoveKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Applies this move to a snapshot.
    pub fn apply<R: Rng>(self, assignment: &Assignment, rng: &mut R) -> Option<Assignment> {
        match self {
            MoveKind::TwoOpt => two_opt_move(assignment, rng),
            MoveKind::Reinsert => reinsert_move(assignment, rng),
            MoveKind::Swap => swap_move(assignment, rng),
            MoveKind::Drop => drop_move(assignment, rng),
            MoveKind::Add => add_move(assignment, rng),
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of enabled moves, chosen uniformly.
///
/// # Examples
///
/// ```
/// use u_blendroute::models::Assignment;
/// use u_blendroute::neighborhood::{MoveKind, Neighborhood};
///
/// let hood = Neighborhood::new(vec![MoveKind::Drop]).unwrap();
/// let mut rng = u_numflow::random::create_rng(42);
/// let a = Assignment::new(vec![vec![2, 3]], vec![]);
///
/// let (kind, next) = hood.propose(&a, &mut rng);
/// assert_eq!(kind, MoveKind::Drop);
/// assert_eq!(next.unwrap().unassigned.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Neighborhood {
    moves: Vec<MoveKind>,
}

impl Default for Neighborhood {
    fn default() -> Self {
        Self {
            moves: MoveKind::ALL.to_vec(),
        }
    }
}

impl Neighborhood {
    /// Creates a neighborhood; `None` if `moves` is empty.
    pub fn new(moves: Vec<MoveKind>) -> Option<Self> {
        if moves.is_empty() {
            None
        } else {
            Some(Self { moves })
        }
    }

    /// The enabled moves.
    pub fn moves(&self) -> &[MoveKind] {
        &self.moves
    }

    /// Picks a move uniformly and applies it.
    ///
    /// A `None` neighbor means the chosen move was a no-op.
    pub fn propose<R: Rng>(
        &self,
        assignment: &Assignment,
        rng: &mut R,
    ) -> (MoveKind, Option<Assignment>) {
        let kind = self.moves[rng.random_range(0..self.moves.len())];
        (kind, kind.apply(assignment, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_neighborhood_rejected() {
        assert!(Neighborhood::new(vec![]).is_none());
    }

    #[test]
    fn test_default_enables_all() {
        assert_eq!(Neighborhood::default().moves(), &MoveKind::ALL);
    }

    #[test]
    fn test_index_matches_all() {
        for (i, kind) in MoveKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
        assert_eq!(MoveKind::TwoOpt.to_string(), "two_opt");
    }

    #[test]
    fn test_propose_covers_every_move() {
        let hood = Neighborhood::default();
        let mut rng = u_numflow::random::create_rng(42);
        let a = Assignment::new(vec![vec![2, 3], vec![4]], vec![5]);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let (kind, next) = hood.propose(&a, &mut rng);
            seen[kind.index()] = true;
            let next = next.unwrap();
            assert_eq!(next.sorted_ids(), vec![2, 3, 4, 5]);
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_no_op_on_empty_assignment() {
        let hood = Neighborhood::default();
        let mut rng = u_numflow::random::create_rng(42);
        let a = Assignment::empty(2);
        for _ in 0..50 {
            assert!(hood.propose(&a, &mut rng).1.is_none());
        }
    }
}
