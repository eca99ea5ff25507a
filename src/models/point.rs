//! Supply point and depot type.

use super::Grade;

/// A location in a collection problem: the depot or a supply point.
///
/// Supply points offer a fixed quantity of a graded commodity. The depot has
/// no grade and a quantity of zero.
///
/// # Examples
///
/// ```
/// use u_blendroute::models::{Grade, Point};
///
/// let depot = Point::depot(1, 0.0, 0.0);
/// assert!(depot.grade().is_none());
/// assert_eq!(depot.quantity(), 0);
///
/// let farm = Point::supply(2, 3.0, 4.0, Grade::from_label('B'), 120);
/// assert_eq!(farm.id(), 2);
/// assert!((depot.distance_to(&farm) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    id: usize,
    x: f64,
    y: f64,
    grade: Option<Grade>,
    quantity: i32,
}

impl Point {
    /// Creates a supply point.
    pub fn supply(id: usize, x: f64, y: f64, grade: Option<Grade>, quantity: i32) -> Self {
        Self {
            id,
            x,
            y,
            grade,
            quantity,
        }
    }

    /// Creates a depot (no grade, zero quantity).
    pub fn depot(id: usize, x: f64, y: f64) -> Self {
        Self::supply(id, x, y, None, 0)
    }

    /// Point identifier.
    pub fn id(&self) -> usize {
        self.id
    }

    /// X-coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Grade of the offered commodity, if any.
    pub fn grade(&self) -> Option<Grade> {
        self.grade
    }

    /// Grade used for blending and ordering.
    ///
    /// Ungraded points blend like the best grade, so they never degrade a load.
    pub fn effective_grade(&self) -> Grade {
        self.grade.unwrap_or(Grade::BEST)
    }

    /// Quantity offered at this point.
    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}
