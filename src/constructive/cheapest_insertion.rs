//! Greedy cheapest-insertion constructor.
//!
//! # Algorithm
//!
//! Points are taken one at a time in a fixed order. Each point is inserted
//! at the position with the lowest marginal distance over all vehicles that
//! can still absorb its quantity:
//!
//! Δ(i,p,j) = d(i,p) + d(p,j) - d(i,j)
//!
//! where (i,j) is the edge being broken, with the depot at both route ends.
//! A point no vehicle can absorb goes to the unassigned bucket.
//!
//! # Complexity
//!
//! O(n · m · L) where n = points, m = vehicles, L = route length.

use std::cmp::Reverse;

use rand::Rng;
use tracing::debug;

use crate::evaluation::Evaluator;
use crate::models::{Assignment, Instance, NotFoundError, Solution};

/// Supply ids sorted best grade first, then by decreasing quantity.
///
/// The sort is stable, so input order breaks remaining ties.
pub fn priority_order(instance: &Instance) -> Vec<usize> {
    let mut points: Vec<_> = instance.supply_points().collect();
    points.sort_by_key(|p| (p.effective_grade(), Reverse(p.quantity())));
    points.iter().map(|p| p.id()).collect()
}

/// Supply ids in a random order drawn from `rng`.
pub fn shuffled_order<R: Rng>(instance: &Instance, rng: &mut R) -> Vec<usize> {
    let mut ids = instance.supply_ids().to_vec();
    u_numflow::random::shuffle(&mut ids, rng);
    ids
}

/// Builds a solution by cheapest insertion of `order`.
///
/// Vehicles are scanned in index order and positions in ascending order;
/// a candidate replaces the incumbent only if strictly cheaper, so the first
/// minimal candidate wins.
///
/// # Examples
///
/// ```
/// use u_blendroute::models::{Grade, Instance, Point};
/// use u_blendroute::evaluation::Evaluator;
/// use u_blendroute::constructive::{cheapest_insertion, priority_order};
///
/// let instance = Instance::new(
///     Point::depot(1, 0.0, 0.0),
///     vec![
///         Point::supply(2, 3.0, 4.0, Grade::from_label('A'), 10),
///         Point::supply(3, 6.0, 8.0, Grade::from_label('A'), 10),
///         Point::supply(4, 9.0, 12.0, Grade::from_label('A'), 10),
///     ],
///     vec![25, 25],
///     vec![0],
///     vec![5.0],
/// )
/// .unwrap();
///
/// let evaluator = Evaluator::new(&instance);
/// let solution = cheapest_insertion(&evaluator, &priority_order(&instance)).unwrap();
/// assert_eq!(solution.num_served(), 3);
/// assert!(solution.is_feasible());
/// ```
pub fn cheapest_insertion(
    evaluator: &Evaluator<'_>,
    order: &[usize],
) -> Result<Solution, NotFoundError> {
    let instance = evaluator.instance();
    let depot = instance.depot_id();
    let capacities = instance.capacities();

    let mut routes: Vec<Vec<usize>> = vec![Vec::new(); capacities.len()];
    let mut loads = vec![0i64; capacities.len()];
    let mut unassigned = Vec::new();

    for &id in order {
        let quantity = i64::from(instance.point(id)?.quantity());
        let mut best: Option<(usize, usize, f64)> = None; // (vehicle, position, delta)

        for (vehicle, route) in routes.iter().enumerate() {
            if loads[vehicle] + quantity > i64::from(capacities[vehicle]) {
                continue;
            }
            for pos in 0..=route.len() {
                let prev = if pos == 0 { depot } else { route[pos - 1] };
                let next = if pos == route.len() { depot } else { route[pos] };
                let delta = instance.distance(prev, id) + instance.distance(id, next)
                    - instance.distance(prev, next);
                if best.map_or(true, |(_, _, d)| delta < d) {
                    best = Some((vehicle, pos, delta));
                }
            }
        }

        match best {
            Some((vehicle, pos, _)) => {
                routes[vehicle].insert(pos, id);
                loads[vehicle] += quantity;
            }
            None => unassigned.push(id),
        }
    }

    let solution = evaluator.build(Assignment::new(routes, unassigned))?;
    debug!(
        served = solution.num_served(),
        unassigned = solution.unassigned().len(),
        profit = solution.profit(),
        feasible = solution.is_feasible(),
        "constructed initial solution"
    );
    Ok(solution)
}
