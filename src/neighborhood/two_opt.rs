//! Intra-route segment reversal (2-opt).
//!
//! # Algorithm
//!
//! Pick a route with at least two points and positions `i < j`, then reverse
//! the segment `[i..=j]`:
//!
//! ```text
//! depot → a b [c d e] f → depot   becomes   depot → a b [e d c] f → depot
//! ```
//!
//! Load and dominant grade are unchanged; only the route cost moves.
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use rand::Rng;

use crate::models::Assignment;

/// Returns `route` with the segment `[i..=j]` reversed.
///
/// Indices past the end are clamped; `i >= j` yields an unchanged copy.
///
/// # Examples
///
/// ```
/// use u_blendroute::neighborhood::reverse_segment;
///
/// assert_eq!(reverse_segment(&[2, 3, 4, 5, 6], 1, 3), vec![2, 5, 4, 3, 6]);
/// assert_eq!(reverse_segment(&[2, 3], 0, 1), vec![3, 2]);
/// ```
pub fn reverse_segment(route: &[usize], i: usize, j: usize) -> Vec<usize> {
    let mut out = route.to_vec();
    let j = j.min(out.len().saturating_sub(1));
    if i < j {
        out[i..=j].reverse();
    }
    out
}

/// Reverses a random segment of a random route with at least two points.
///
/// Returns `None` when no route has two points.
pub fn two_opt_move<R: Rng>(assignment: &Assignment, rng: &mut R) -> Option<Assignment> {
    let candidates = assignment.routes_with_at_least(2);
    if candidates.is_empty() {
        return None;
    }
    let k = candidates[rng.random_range(0..candidates.len())];
    let n = assignment.routes[k].len();
    let i = rng.random_range(0..n - 1);
    let j = rng.random_range(i + 1..n);

    let mut next = assignment.clone();
    next.routes[k] = reverse_segment(&assignment.routes[k], i, j);
    Some(next)
}
