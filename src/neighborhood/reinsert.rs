//! Point reinsertion (relocate) between routes.

use rand::Rng;

use crate::models::Assignment;

/// Moves a random routed point to a random position of a random route.
///
/// The target route may be the source route. Returns `None` when every
/// route is empty.
///
/// # Examples
///
/// ```
/// use u_blendroute::models::Assignment;
/// use u_blendroute::neighborhood::reinsert_move;
///
/// let mut rng = u_numflow::random::create_rng(42);
/// let a = Assignment::new(vec![vec![2, 3], vec![]], vec![]);
/// let next = reinsert_move(&a, &mut rng).unwrap();
/// assert_eq!(next.num_served(), 2);
/// ```
pub fn reinsert_move<R: Rng>(assignment: &Assignment, rng: &mut R) -> Option<Assignment> {
    let sources = assignment.non_empty_routes();
    if sources.is_empty() {
        return None;
    }
    let from = sources[rng.random_range(0..sources.len())];
    let pos = rng.random_range(0..assignment.routes[from].len());

    let mut next = assignment.clone();
    let id = next.routes[from].remove(pos);
    let to = rng.random_range(0..next.routes.len());
    let at = rng.random_range(0..=next.routes[to].len());
    next.routes[to].insert(at, id);
    Some(next)
}
