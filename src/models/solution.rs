//! Assignment, evaluation, and solution types.

use super::RouteSummary;

/// Profit reported for an infeasible solution.
///
/// Large enough that a plain maximizer never prefers an infeasible solution.
pub const INFEASIBLE_PROFIT: f64 = -1e9;

/// Raw route structure: point ids per vehicle plus the unassigned bucket.
///
/// Index `k` of `routes` is served by vehicle `k`. The depot is implicit at
/// both ends of every route.
///
/// # Examples
///
/// ```
/// use u_blendroute::models::Assignment;
///
/// let a = Assignment::new(vec![vec![2, 3], vec![]], vec![4]);
/// assert_eq!(a.num_served(), 2);
/// assert_eq!(a.non_empty_routes(), vec![0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    /// Point ids in visit order, one sequence per vehicle.
    pub routes: Vec<Vec<usize>>,
    /// Point ids not visited by any vehicle.
    pub unassigned: Vec<usize>,
}

impl Assignment {
    /// Creates an assignment from route sequences and unassigned ids.
    pub fn new(routes: Vec<Vec<usize>>, unassigned: Vec<usize>) -> Self {
        Self { routes, unassigned }
    }

    /// Creates `num_vehicles` empty routes and an empty bucket.
    pub fn empty(num_vehicles: usize) -> Self {
        Self::new(vec![Vec::new(); num_vehicles], Vec::new())
    }

    /// Number of routed points.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    /// Indices of routes visiting at least `min_len` points.
    pub fn routes_with_at_least(&self, min_len: usize) -> Vec<usize> {
        self.routes
            .iter()
            .enumerate()
            .filter(|(_, r)| r.len() >= min_len)
            .map(|(k, _)| k)
            .collect()
    }

    /// Indices of routes visiting at least one point.
    pub fn non_empty_routes(&self) -> Vec<usize> {
        self.routes_with_at_least(1)
    }

    /// All ids (routed then unassigned), sorted ascending.
    pub fn sorted_ids(&self) -> Vec<usize> {
        let mut ids: Vec<usize> = self
            .routes
            .iter()
            .flatten()
            .chain(self.unassigned.iter())
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// A type of hard-constraint violation.
#[derive(Debug, Clone, PartialEq)]
pub enum ViolationType {
    /// Vehicle load exceeds its capacity.
    CapacityExceeded {
        /// Vehicle (route index).
        vehicle: usize,
        /// Collected load.
        load: i64,
        /// Vehicle capacity.
        capacity: i64,
    },
    /// Delivered load at a grade is below its quota.
    QuotaShortfall {
        /// Grade rank.
        grade: usize,
        /// Load delivered at this dominant grade.
        delivered: i64,
        /// Required minimum.
        quota: i64,
    },
    /// A supply point is left uncollected.
    Unassigned {
        /// Point id.
        point_id: usize,
        /// Quantity left behind.
        quantity: i64,
    },
}

/// A hard-constraint violation in a solution.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType) -> Self {
        Self { kind }
    }
}

/// Derived metrics of an assignment, produced by the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub(crate) routes: Vec<RouteSummary>,
    pub(crate) delivered: Vec<i64>,
    pub(crate) unassigned_quantity: i64,
    pub(crate) transport_cost: f64,
    pub(crate) gross_revenue: f64,
    pub(crate) violations: Vec<Violation>,
}

impl Evaluation {
    /// Per-route metrics, indexed by vehicle.
    pub fn routes(&self) -> &[RouteSummary] {
        &self.routes
    }

    /// Load delivered per dominant grade, indexed by grade rank.
    pub fn delivered(&self) -> &[i64] {
        &self.delivered
    }

    /// Quantity left in the unassigned bucket.
    pub fn unassigned_quantity(&self) -> i64 {
        self.unassigned_quantity
    }

    /// Sum of route costs.
    pub fn transport_cost(&self) -> f64 {
        self.transport_cost
    }

    /// Sum of route revenues.
    pub fn gross_revenue(&self) -> f64 {
        self.gross_revenue
    }

    /// `gross_revenue - transport_cost`, regardless of feasibility.
    pub fn net_profit(&self) -> f64 {
        self.gross_revenue - self.transport_cost
    }

    /// Net profit if feasible, [`INFEASIBLE_PROFIT`] otherwise.
    pub fn profit(&self) -> f64 {
        if self.is_feasible() {
            self.net_profit()
        } else {
            INFEASIBLE_PROFIT
        }
    }

    /// Hard-constraint violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Returns `true` if no hard constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A complete, evaluated candidate solution.
///
/// Built by [`Evaluator::build`](crate::evaluation::Evaluator::build). The
/// metrics are computed once at creation; changing the route structure means
/// building a new solution.
///
/// # Examples
///
/// ```
/// use u_blendroute::models::{Assignment, Grade, Instance, Point};
/// use u_blendroute::evaluation::Evaluator;
///
/// let instance = Instance::new(
///     Point::depot(1, 0.0, 0.0),
///     vec![Point::supply(2, 3.0, 4.0, Grade::from_label('A'), 10)],
///     vec![100],
///     vec![0],
///     vec![1.0],
/// )
/// .unwrap();
///
/// let sol = Evaluator::new(&instance)
///     .build(Assignment::new(vec![vec![2]], vec![]))
///     .unwrap();
/// assert!((sol.transport_cost() - 10.0).abs() < 1e-10);
/// assert!((sol.gross_revenue() - 10.0).abs() < 1e-10);
/// assert!(sol.profit().abs() < 1e-10);
/// assert!(sol.is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    assignment: Assignment,
    evaluation: Evaluation,
}

impl Solution {
    pub(crate) fn from_parts(assignment: Assignment, evaluation: Evaluation) -> Self {
        Self {
            assignment,
            evaluation,
        }
    }

    /// The underlying route structure.
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    /// Consumes the solution, returning its route structure.
    pub fn into_assignment(self) -> Assignment {
        self.assignment
    }

    /// Route sequences, indexed by vehicle.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.assignment.routes
    }

    /// Unassigned point ids.
    pub fn unassigned(&self) -> &[usize] {
        &self.assignment.unassigned
    }

    /// Derived metrics.
    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    /// Per-route metrics, indexed by vehicle.
    pub fn route_summaries(&self) -> &[RouteSummary] {
        self.evaluation.routes()
    }

    /// Sum of route costs.
    pub fn transport_cost(&self) -> f64 {
        self.evaluation.transport_cost()
    }

    /// Sum of route revenues.
    pub fn gross_revenue(&self) -> f64 {
        self.evaluation.gross_revenue()
    }

    /// Net profit if feasible, [`INFEASIBLE_PROFIT`] otherwise.
    pub fn profit(&self) -> f64 {
        self.evaluation.profit()
    }

    /// Returns `true` if no hard constraint is violated.
    pub fn is_feasible(&self) -> bool {
        self.evaluation.is_feasible()
    }

    /// Number of routed points.
    pub fn num_served(&self) -> usize {
        self.assignment.num_served()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Grade;

    fn evaluation(violations: Vec<Violation>) -> Evaluation {
        Evaluation {
            routes: vec![RouteSummary::new(0, 4.0, 10, Some(Grade::BEST), 10.0)],
            delivered: vec![10],
            unassigned_quantity: 0,
            transport_cost: 4.0,
            gross_revenue: 10.0,
            violations,
        }
    }

    #[test]
    fn test_assignment_queries() {
        let a = Assignment::new(vec![vec![3, 2], vec![], vec![5]], vec![4]);
        assert_eq!(a.num_served(), 3);
        assert_eq!(a.non_empty_routes(), vec![0, 2]);
        assert_eq!(a.routes_with_at_least(2), vec![0]);
        assert_eq!(a.sorted_ids(), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_assignment_empty() {
        let a = Assignment::empty(3);
        assert_eq!(a.routes.len(), 3);
        assert!(a.non_empty_routes().is_empty());
        assert!(a.unassigned.is_empty());
    }

    #[test]
    fn test_feasible_profit() {
        let e = evaluation(vec![]);
        assert!(e.is_feasible());
        assert!((e.profit() - 6.0).abs() < 1e-10);
        assert!((e.net_profit() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_infeasible_profit_is_sentinel() {
        let e = evaluation(vec![Violation::new(ViolationType::QuotaShortfall {
            grade: 0,
            delivered: 10,
            quota: 20,
        })]);
        assert!(!e.is_feasible());
        assert_eq!(e.profit(), INFEASIBLE_PROFIT);
        assert!((e.net_profit() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_solution_accessors() {
        let a = Assignment::new(vec![vec![2]], vec![]);
        let sol = Solution::from_parts(a.clone(), evaluation(vec![]));
        assert_eq!(sol.assignment(), &a);
        assert_eq!(sol.routes(), &[vec![2]]);
        assert!(sol.unassigned().is_empty());
        assert_eq!(sol.num_served(), 1);
        assert_eq!(sol.route_summaries().len(), 1);
        assert_eq!(sol.into_assignment(), a);
    }
}
