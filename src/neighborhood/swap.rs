//! Point exchange between routes.

use rand::Rng;

use crate::models::Assignment;

/// Exchanges two random points of two random non-empty routes.
///
/// Both picks may land in the same route. Returns `None` when every route
/// is empty.
pub fn swap_move<R: Rng>(assignment: &Assignment, rng: &mut R) -> Option<Assignment> {
    let candidates = assignment.non_empty_routes();
    if candidates.is_empty() {
        return None;
    }
    let r1 = candidates[rng.random_range(0..candidates.len())];
    let r2 = candidates[rng.random_range(0..candidates.len())];
    let p1 = rng.random_range(0..assignment.routes[r1].len());
    let p2 = rng.random_range(0..assignment.routes[r2].len());

    let mut next = assignment.clone();
    if r1 == r2 {
        next.routes[r1].swap(p1, p2);
    } else {
        next.routes[r1][p1] = assignment.routes[r2][p2];
        next.routes[r2][p2] = assignment.routes[r1][p1];
    }
    Some(next)
}
