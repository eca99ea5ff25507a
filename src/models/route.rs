//! Per-route metrics.

use super::Grade;

/// Metrics of one vehicle route, computed by the evaluator.
///
/// A route starts and ends at the depot (not stored in the sequence). Its
/// dominant grade is the worst grade collected, which prices the whole load.
///
/// # Examples
///
/// ```
/// use u_blendroute::models::{Grade, RouteSummary};
///
/// let summary = RouteSummary::new(0, 12.5, 40, Grade::new(1), 28.0);
/// assert_eq!(summary.vehicle(), 0);
/// assert_eq!(summary.grade_label(), 'B');
/// assert!(!summary.is_empty());
/// assert!(RouteSummary::empty(3).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    vehicle: usize,
    cost: f64,
    load: i64,
    dominant_grade: Option<Grade>,
    revenue: f64,
}

impl RouteSummary {
    /// Creates a summary from computed metrics.
    pub fn new(
        vehicle: usize,
        cost: f64,
        load: i64,
        dominant_grade: Option<Grade>,
        revenue: f64,
    ) -> Self {
        Self {
            vehicle,
            cost,
            load,
            dominant_grade,
            revenue,
        }
    }

    /// Summary of a route with no points.
    pub fn empty(vehicle: usize) -> Self {
        Self::new(vehicle, 0.0, 0, None, 0.0)
    }

    /// Vehicle serving this route.
    pub fn vehicle(&self) -> usize {
        self.vehicle
    }

    /// Travel distance depot → points → depot.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Total quantity collected.
    pub fn load(&self) -> i64 {
        self.load
    }

    /// Worst grade collected, `None` for an empty route.
    pub fn dominant_grade(&self) -> Option<Grade> {
        self.dominant_grade
    }

    /// Letter of the dominant grade, `'X'` for an empty route.
    pub fn grade_label(&self) -> char {
        self.dominant_grade.map_or('X', Grade::label)
    }

    /// Revenue of the load at the dominant grade's unit price.
    pub fn revenue(&self) -> f64 {
        self.revenue
    }

    /// Returns `true` if the route visits no points.
    pub fn is_empty(&self) -> bool {
        self.dominant_grade.is_none()
    }
}
