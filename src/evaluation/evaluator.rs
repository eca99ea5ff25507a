//! Solution evaluator that computes cost, load, grade blending, and feasibility.

use serde::{Deserialize, Serialize};

use crate::models::{
    Assignment, Evaluation, Grade, Instance, NotFoundError, RouteSummary, Solution, Violation,
    ViolationType,
};

/// Whether supply points may be left uncollected in a feasible solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Coverage {
    /// Every supply point must be routed; unassigned points are violations.
    #[default]
    Full,
    /// Points may stay in the unassigned bucket without breaking feasibility.
    Partial,
}

/// Evaluates assignments against an instance.
///
/// Computes per-route cost, load and dominant grade, aggregates the delivered
/// load per grade, and collects capacity, quota, and coverage violations.
/// Evaluation is pure: the same input always yields the same metrics.
///
/// # Examples
///
/// ```
/// use u_blendroute::models::{Grade, Instance, Point};
/// use u_blendroute::evaluation::Evaluator;
///
/// let instance = Instance::new(
///     Point::depot(1, 0.0, 0.0),
///     vec![
///         Point::supply(2, 3.0, 4.0, Grade::from_label('A'), 10),
///         Point::supply(3, 6.0, 8.0, Grade::from_label('B'), 5),
///     ],
///     vec![100],
///     vec![0, 0],
///     vec![2.0, 1.0],
/// )
/// .unwrap();
///
/// let evaluator = Evaluator::new(&instance);
/// let summary = evaluator.route_summary(0, &[2, 3]).unwrap();
/// assert_eq!(summary.load(), 15);
/// assert_eq!(summary.grade_label(), 'B');
/// assert!((summary.cost() - 20.0).abs() < 1e-10);
/// assert!((summary.revenue() - 15.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    instance: &'a Instance,
    coverage: Coverage,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator requiring full coverage.
    pub fn new(instance: &'a Instance) -> Self {
        Self {
            instance,
            coverage: Coverage::Full,
        }
    }

    /// Sets the coverage policy.
    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = coverage;
        self
    }

    /// The instance being evaluated against.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// The coverage policy.
    pub fn coverage(&self) -> Coverage {
        self.coverage
    }

    /// Computes the metrics of one route served by `vehicle`.
    pub fn route_summary(
        &self,
        vehicle: usize,
        ids: &[usize],
    ) -> Result<RouteSummary, NotFoundError> {
        if ids.is_empty() {
            return Ok(RouteSummary::empty(vehicle));
        }

        let depot = self.instance.depot_id();
        let mut cost = 0.0;
        let mut load: i64 = 0;
        let mut grades = Vec::with_capacity(ids.len());
        let mut prev = depot;

        for &id in ids {
            let point = self.instance.point(id)?;
            cost += self.instance.distance(prev, id);
            load += i64::from(point.quantity());
            grades.push(point.effective_grade());
            prev = id;
        }
        cost += self.instance.distance(prev, depot);
        let dominant = Grade::blend(grades).unwrap_or(Grade::BEST);

        let revenue = load as f64 * self.instance.revenue(dominant);
        Ok(RouteSummary::new(vehicle, cost, load, Some(dominant), revenue))
    }

    /// Evaluates route sequences and an unassigned bucket.
    ///
    /// A route index beyond the fleet is treated as a vehicle of capacity 0.
    pub fn evaluate(
        &self,
        routes: &[Vec<usize>],
        unassigned: &[usize],
    ) -> Result<Evaluation, NotFoundError> {
        let mut summaries = Vec::with_capacity(routes.len());
        let mut delivered = vec![0i64; self.instance.num_grades()];
        let mut violations = Vec::new();
        let mut transport_cost = 0.0;
        let mut gross_revenue = 0.0;

        for (vehicle, ids) in routes.iter().enumerate() {
            let summary = self.route_summary(vehicle, ids)?;
            transport_cost += summary.cost();
            gross_revenue += summary.revenue();

            let capacity = self.instance.capacity(vehicle).map_or(0, i64::from);
            if summary.load() > capacity {
                violations.push(Violation::new(ViolationType::CapacityExceeded {
                    vehicle,
                    load: summary.load(),
                    capacity,
                }));
            }

            if let Some(slot) = summary
                .dominant_grade()
                .and_then(|g| delivered.get_mut(g.rank()))
            {
                *slot += summary.load();
            }
            summaries.push(summary);
        }

        for (grade, (&quota, &got)) in self.instance.quotas().iter().zip(&delivered).enumerate() {
            let quota = i64::from(quota);
            if got < quota {
                violations.push(Violation::new(ViolationType::QuotaShortfall {
                    grade,
                    delivered: got,
                    quota,
                }));
            }
        }

        let mut unassigned_quantity: i64 = 0;
        for &id in unassigned {
            let quantity = i64::from(self.instance.point(id)?.quantity());
            unassigned_quantity += quantity;
            if self.coverage == Coverage::Full {
                violations.push(Violation::new(ViolationType::Unassigned {
                    point_id: id,
                    quantity,
                }));
            }
        }

        Ok(Evaluation {
            routes: summaries,
            delivered,
            unassigned_quantity,
            transport_cost,
            gross_revenue,
            violations,
        })
    }

    /// Evaluates an assignment and wraps it into a [`Solution`].
    pub fn build(&self, assignment: Assignment) -> Result<Solution, NotFoundError> {
        let evaluation = self.evaluate(&assignment.routes, &assignment.unassigned)?;
        Ok(Solution::from_parts(assignment, evaluation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Point;
    use proptest::prelude::*;

    fn grade(label: char) -> Option<Grade> {
        Grade::from_label(label)
    }

    fn single_point(quota: i32) -> Instance {
        Instance::new(
            Point::depot(1, 0.0, 0.0),
            vec![Point::supply(2, 3.0, 4.0, grade('A'), 10)],
            vec![100],
            vec![quota],
            vec![1.0],
        )
        .unwrap()
    }

    fn two_grade_instance() -> Instance {
        Instance::new(
            Point::depot(1, 0.0, 0.0),
            vec![
                Point::supply(2, 10.0, 0.0, grade('A'), 30),
                Point::supply(3, 0.0, 10.0, grade('B'), 20),
                Point::supply(4, -10.0, 0.0, grade('A'), 25),
                Point::supply(5, 0.0, -10.0, None, 15),
            ],
            vec![50, 50],
            vec![20, 10],
            vec![3.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_single_point_feasible() {
        let inst = single_point(0);
        let sol = Evaluator::new(&inst)
            .build(Assignment::new(vec![vec![2]], vec![]))
            .unwrap();
        assert!((sol.transport_cost() - 10.0).abs() < 1e-10);
        assert!((sol.gross_revenue() - 10.0).abs() < 1e-10);
        assert!(sol.profit().abs() < 1e-10);
        assert!(sol.is_feasible());
        assert_eq!(sol.evaluation().delivered(), &[10]);
    }

    #[test]
    fn test_quota_shortfall_infeasible() {
        let inst = single_point(20);
        let sol = Evaluator::new(&inst)
            .build(Assignment::new(vec![vec![2]], vec![]))
            .unwrap();
        assert!(!sol.is_feasible());
        assert_eq!(sol.profit(), crate::models::INFEASIBLE_PROFIT);
        assert_eq!(
            sol.evaluation().violations()[0].kind,
            ViolationType::QuotaShortfall {
                grade: 0,
                delivered: 10,
                quota: 20
            }
        );
    }

    #[test]
    fn test_empty_route() {
        let inst = single_point(0);
        let summary = Evaluator::new(&inst).route_summary(0, &[]).unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.cost(), 0.0);
    }

    #[test]
    fn test_blending_prices_at_worst_grade() {
        let inst = two_grade_instance();
        let ev = Evaluator::new(&inst);
        let mixed = ev.route_summary(0, &[2, 3]).unwrap();
        assert_eq!(mixed.dominant_grade(), grade('B'));
        assert!((mixed.revenue() - 50.0).abs() < 1e-10);

        let pure = ev.route_summary(1, &[2, 4]).unwrap();
        assert_eq!(pure.grade_label(), 'A');
        assert!((pure.revenue() - 165.0).abs() < 1e-10);
    }

    #[test]
    fn test_ungraded_point_counts_as_best() {
        let inst = two_grade_instance();
        let summary = Evaluator::new(&inst).route_summary(0, &[5]).unwrap();
        assert_eq!(summary.grade_label(), 'A');
        assert!((summary.revenue() - 45.0).abs() < 1e-10);
    }

    #[test]
    fn test_capacity_violation() {
        let inst = two_grade_instance();
        let eval = Evaluator::new(&inst)
            .evaluate(&[vec![2, 4], vec![3, 5]], &[])
            .unwrap();
        assert!(eval.violations().iter().any(|v| v.kind
            == ViolationType::CapacityExceeded {
                vehicle: 0,
                load: 55,
                capacity: 50
            }));
        assert!(!eval.is_feasible());
    }

    fn bulk_instance() -> Instance {
        Instance::new(
            Point::depot(1, 0.0, 0.0),
            vec![
                Point::supply(2, 1.0, 0.0, grade('A'), 1_500_000_000),
                Point::supply(3, 2.0, 0.0, grade('A'), 1_500_000_000),
            ],
            vec![i32::MAX],
            vec![0],
            vec![1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_bulk_loads_do_not_wrap() {
        let inst = bulk_instance();
        let eval = Evaluator::new(&inst)
            .evaluate(&[vec![2, 3]], &[])
            .unwrap();
        assert_eq!(eval.routes()[0].load(), 3_000_000_000);
        assert_eq!(eval.delivered(), &[3_000_000_000]);
        assert!(eval.violations().iter().any(|v| v.kind
            == ViolationType::CapacityExceeded {
                vehicle: 0,
                load: 3_000_000_000,
                capacity: i64::from(i32::MAX)
            }));
        assert!(!eval.is_feasible());

        let partial = Evaluator::new(&inst)
            .with_coverage(Coverage::Partial)
            .evaluate(&[vec![]], &[2, 3])
            .unwrap();
        assert_eq!(partial.unassigned_quantity(), 3_000_000_000);
    }

    #[test]
    fn test_route_beyond_fleet_has_zero_capacity() {
        let inst = two_grade_instance();
        let eval = Evaluator::new(&inst)
            .evaluate(&[vec![], vec![], vec![5]], &[])
            .unwrap();
        assert!(eval.violations().iter().any(|v| v.kind
            == ViolationType::CapacityExceeded {
                vehicle: 2,
                load: 15,
                capacity: 0
            }));
    }

    #[test]
    fn test_coverage_policy() {
        let inst = two_grade_instance();
        let routes = [vec![2, 5], vec![3, 4]];

        let full = Evaluator::new(&inst).evaluate(&routes, &[]).unwrap();
        assert!(full.is_feasible(), "{:?}", full.violations());

        let routes = [vec![2], vec![3, 4]];
        let full = Evaluator::new(&inst).evaluate(&routes, &[5]).unwrap();
        assert!(!full.is_feasible());
        assert_eq!(full.unassigned_quantity(), 15);

        let partial = Evaluator::new(&inst)
            .with_coverage(Coverage::Partial)
            .evaluate(&routes, &[5])
            .unwrap();
        assert!(partial.is_feasible());
        assert_eq!(partial.unassigned_quantity(), 15);
    }

    #[test]
    fn test_unknown_id_is_error() {
        let inst = single_point(0);
        let err = Evaluator::new(&inst).evaluate(&[vec![9]], &[]).unwrap_err();
        assert_eq!(err.id(), 9);
        assert!(Evaluator::new(&inst).evaluate(&[vec![]], &[0]).is_err());
    }

    #[test]
    fn test_delivered_per_grade() {
        let inst = two_grade_instance();
        let eval = Evaluator::new(&inst)
            .evaluate(&[vec![2, 5], vec![3, 4]], &[])
            .unwrap();
        assert_eq!(eval.delivered(), &[45, 45]);
    }

    fn grid_instance(n: usize) -> Instance {
        let supply = (0..n)
            .map(|i| {
                let x = (i % 5) as f64 * 7.0 - 14.0;
                let y = (i / 5) as f64 * 5.0 - 10.0;
                Point::supply(i + 2, x, y, Grade::new(i % 3), 5 + (i as i32 % 7) * 3)
            })
            .collect();
        Instance::new(
            Point::depot(1, 0.0, 0.0),
            supply,
            vec![60, 60, 60],
            vec![10, 10, 10],
            vec![4.0, 2.5, 1.0],
        )
        .unwrap()
    }

    proptest! {
        #[test]
        fn prop_evaluation_is_pure(ids in Just((2usize..14).collect::<Vec<_>>()).prop_shuffle(), cut in 0usize..12) {
            let inst = grid_instance(12);
            let ev = Evaluator::new(&inst);
            let routes = vec![ids[..cut].to_vec(), ids[cut..].to_vec()];
            let a = ev.evaluate(&routes, &[]).unwrap();
            let b = ev.evaluate(&routes, &[]).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_appending_never_lowers_route_cost(ids in Just((2usize..14).collect::<Vec<_>>()).prop_shuffle(), len in 0usize..11) {
            let inst = grid_instance(12);
            let ev = Evaluator::new(&inst);
            let base = ev.route_summary(0, &ids[..len]).unwrap();
            let longer = ev.route_summary(0, &ids[..=len]).unwrap();
            prop_assert!(longer.cost() + 1e-9 >= base.cost());
            prop_assert!(longer.load() > base.load());
        }

        #[test]
        fn prop_feasible_respects_capacity_and_quota(ids in Just((2usize..14).collect::<Vec<_>>()).prop_shuffle(), a in 0usize..12, b in 0usize..12) {
            let inst = grid_instance(12);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let routes = vec![ids[..lo].to_vec(), ids[lo..hi].to_vec(), ids[hi..].to_vec()];
            let eval = Evaluator::new(&inst).evaluate(&routes, &[]).unwrap();
            if eval.is_feasible() {
                for (k, r) in eval.routes().iter().enumerate() {
                    prop_assert!(r.load() <= i64::from(inst.capacities()[k]));
                }
                for (g, &q) in inst.quotas().iter().enumerate() {
                    prop_assert!(eval.delivered()[g] >= i64::from(q));
                }
            }
        }
    }
}
