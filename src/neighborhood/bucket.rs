//! Moves between routes and the unassigned bucket.

use rand::Rng;

use crate::models::Assignment;

/// Moves a random routed point into the unassigned bucket.
///
/// Returns `None` when every route is empty.
pub fn drop_move<R: Rng>(assignment: &Assignment, rng: &mut R) -> Option<Assignment> {
    let candidates = assignment.non_empty_routes();
    if candidates.is_empty() {
        return None;
    }
    let k = candidates[rng.random_range(0..candidates.len())];
    let pos = rng.random_range(0..assignment.routes[k].len());

    let mut next = assignment.clone();
    let id = next.routes[k].remove(pos);
    next.unassigned.push(id);
    Some(next)
}

/// Moves a random unassigned point to a random position of a random route.
///
/// Returns `None` when the bucket is empty or there are no routes.
pub fn add_move<R: Rng>(assignment: &Assignment, rng: &mut R) -> Option<Assignment> {
    if assignment.unassigned.is_empty() || assignment.routes.is_empty() {
        return None;
    }
    let mut next = assignment.clone();
    let pos = rng.random_range(0..next.unassigned.len());
    let id = next.unassigned.remove(pos);
    let k = rng.random_range(0..next.routes.len());
    let at = rng.random_range(0..=next.routes[k].len());
    next.routes[k].insert(at, id);
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_moves_into_bucket() {
        let mut rng = u_numflow::random::create_rng(42);
        let a = Assignment::new(vec![vec![2, 3], vec![]], vec![4]);
        let next = drop_move(&a, &mut rng).unwrap();
        assert_eq!(next.num_served(), 1);
        assert_eq!(next.unassigned.len(), 2);
        assert_eq!(next.unassigned[0], 4);
        assert_eq!(next.sorted_ids(), vec![2, 3, 4]);
    }

    #[test]
    fn test_drop_needs_routed_point() {
        let mut rng = u_numflow::random::create_rng(42);
        assert!(drop_move(&Assignment::new(vec![vec![]], vec![2]), &mut rng).is_none());
    }

    #[test]
    fn test_add_moves_out_of_bucket() {
        let mut rng = u_numflow::random::create_rng(42);
        let a = Assignment::new(vec![vec![2], vec![]], vec![3]);
        let next = add_move(&a, &mut rng).unwrap();
        assert!(next.unassigned.is_empty());
        assert_eq!(next.num_served(), 2);
        assert_eq!(next.sorted_ids(), vec![2, 3]);
    }

    #[test]
    fn test_add_needs_unassigned_point() {
        let mut rng = u_numflow::random::create_rng(42);
        assert!(add_move(&Assignment::new(vec![vec![2]], vec![]), &mut rng).is_none());
        assert!(add_move(&Assignment::new(vec![], vec![2]), &mut rng).is_none());
    }
}
