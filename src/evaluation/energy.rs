//! Penalized energy used by the annealing search.

use serde::{Deserialize, Serialize};

use crate::models::{Evaluation, ViolationType};

/// Per-unit penalty weights for constraint violations.
///
/// # Examples
///
/// ```
/// use u_blendroute::evaluation::PenaltyWeights;
///
/// let w = PenaltyWeights::default().with_quota(800.0);
/// assert_eq!(w.capacity, 15.0);
/// assert_eq!(w.quota, 800.0);
/// assert_eq!(w.unassigned, 150.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PenaltyWeights {
    /// Penalty per unit of load above a vehicle's capacity.
    pub capacity: f64,
    /// Penalty per unit of load missing from a grade quota.
    pub quota: f64,
    /// Penalty per unit of quantity left unassigned.
    pub unassigned: f64,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            capacity: 15.0,
            quota: 500.0,
            unassigned: 150.0,
        }
    }
}

impl PenaltyWeights {
    pub fn with_capacity(mut self, w: f64) -> Self {
        self.capacity = w;
        self
    }

    pub fn with_quota(mut self, w: f64) -> Self {
        self.quota = w;
        self
    }

    pub fn with_unassigned(mut self, w: f64) -> Self {
        self.unassigned = w;
        self
    }

    /// Total penalty of an evaluation.
    ///
    /// Unassigned quantity is penalized under every coverage policy.
    pub fn penalty(&self, evaluation: &Evaluation) -> f64 {
        let violations: f64 = evaluation
            .violations()
            .iter()
            .map(|v| match v.kind {
                ViolationType::CapacityExceeded { load, capacity, .. } => {
                    (load - capacity) as f64 * self.capacity
                }
                ViolationType::QuotaShortfall {
                    delivered, quota, ..
                } => (quota - delivered) as f64 * self.quota,
                ViolationType::Unassigned { .. } => 0.0,
            })
            .sum();
        violations + evaluation.unassigned_quantity() as f64 * self.unassigned
    }

    /// `gross_revenue - transport_cost - penalty`. Higher is better.
    pub fn energy(&self, evaluation: &Evaluation) -> f64 {
        evaluation.net_profit() - self.penalty(evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{Coverage, Evaluator};
    use crate::models::{Assignment, Grade, Instance, Point};
    use proptest::prelude::*;

    fn instance() -> Instance {
        Instance::new(
            Point::depot(1, 0.0, 0.0),
            vec![
                Point::supply(2, 3.0, 4.0, Grade::from_label('A'), 10),
                Point::supply(3, -3.0, 4.0, Grade::from_label('B'), 20),
            ],
            vec![25, 25],
            vec![5, 0],
            vec![2.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn test_feasible_energy_equals_profit() {
        let inst = instance();
        let sol = Evaluator::new(&inst)
            .build(Assignment::new(vec![vec![2], vec![3]], vec![]))
            .unwrap();
        assert!(sol.is_feasible());
        let w = PenaltyWeights::default();
        assert!((w.energy(sol.evaluation()) - sol.profit()).abs() < 1e-10);
    }

    #[test]
    fn test_capacity_penalty() {
        let inst = instance();
        let sol = Evaluator::new(&inst)
            .build(Assignment::new(vec![vec![2, 3], vec![]], vec![]))
            .unwrap();
        // load 30 over capacity 25; delivered A = 0 against quota 5
        let w = PenaltyWeights::default();
        let expected = 5.0 * 15.0 + 5.0 * 500.0;
        assert!((w.penalty(sol.evaluation()) - expected).abs() < 1e-10);
        let net = sol.evaluation().net_profit();
        assert!((w.energy(sol.evaluation()) - (net - expected)).abs() < 1e-10);
    }

    #[test]
    fn test_unassigned_penalty_under_both_policies() {
        let inst = instance();
        let w = PenaltyWeights::default();
        for coverage in [Coverage::Full, Coverage::Partial] {
            let sol = Evaluator::new(&inst)
                .with_coverage(coverage)
                .build(Assignment::new(vec![vec![2], vec![]], vec![3]))
                .unwrap();
            assert!((w.penalty(sol.evaluation()) - 20.0 * 150.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_zero_weights() {
        let inst = instance();
        let sol = Evaluator::new(&inst)
            .build(Assignment::new(vec![vec![2, 3], vec![]], vec![]))
            .unwrap();
        let w = PenaltyWeights::default()
            .with_capacity(0.0)
            .with_quota(0.0)
            .with_unassigned(0.0);
        assert_eq!(w.penalty(sol.evaluation()), 0.0);
    }

    proptest! {
        #[test]
        fn prop_more_overload_means_lower_energy(cap in 1i32..40, extra in 1i32..40) {
            let build = |qty: i32| {
                let inst = Instance::new(
                    Point::depot(1, 0.0, 0.0),
                    vec![Point::supply(2, 3.0, 4.0, Grade::from_label('A'), qty)],
                    vec![cap],
                    vec![0],
                    vec![1.0],
                )
                .unwrap();
                let sol = Evaluator::new(&inst)
                    .build(Assignment::new(vec![vec![2]], vec![]))
                    .unwrap();
                PenaltyWeights::default().energy(sol.evaluation())
            };
            let over = build(cap + extra);
            let more_over = build(cap + extra + 1);
            prop_assert!(more_over < over);
        }
    }
}
