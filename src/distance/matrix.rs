//! Dense distance matrix keyed by point id.

use crate::models::Point;

/// A dense n×n distance matrix over point ids `1..=n`, stored row-major.
///
/// Lookups outside `[1, n]` return `0.0` instead of panicking, so a stray id
/// contributes nothing to a route cost.
///
/// # Examples
///
/// ```
/// use u_blendroute::models::Point;
/// use u_blendroute::distance::DistanceMatrix;
///
/// let points = vec![
///     Point::depot(1, 0.0, 0.0),
///     Point::supply(2, 3.0, 4.0, None, 10),
///     Point::supply(3, 6.0, 8.0, None, 20),
/// ];
/// let dm = DistanceMatrix::from_points(&points);
/// assert!((dm.get(1, 2) - 5.0).abs() < 1e-10);
/// assert_eq!(dm.get(0, 2), 0.0);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    data: Vec<f64>,
    size: usize,
}

impl DistanceMatrix {
    /// Creates a matrix over ids `1..=size`, initialized to zero.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0.0; size * size],
            size,
        }
    }

    /// Computes Euclidean distances between all pairs of points.
    ///
    /// Point ids must lie in `[1, points.len()]`; points with other ids are
    /// skipped.
    pub fn from_points(points: &[Point]) -> Self {
        let n = points.len();
        let mut dm = Self::new(n);
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                let d = a.distance_to(b);
                dm.set(a.id(), b.id(), d);
                dm.set(b.id(), a.id(), d);
            }
        }
        dm
    }

    fn slot(&self, from: usize, to: usize) -> Option<usize> {
        if from == 0 || to == 0 || from > self.size || to > self.size {
            return None;
        }
        Some((from - 1) * self.size + (to - 1))
    }

    /// Distance from point `from` to point `to`; `0.0` if either id is out of range.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.slot(from, to).map_or(0.0, |s| self.data[s])
    }

    /// Sets the distance from `from` to `to`. Out-of-range ids are ignored.
    pub fn set(&mut self, from: usize, to: usize, distance: f64) {
        if let Some(s) = self.slot(from, to) {
            self.data[s] = distance;
        }
    }

    /// Number of points covered by this matrix.
    pub fn size(&self) -> usize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Point> {
        vec![
            Point::depot(1, 0.0, 0.0),
            Point::supply(2, 3.0, 4.0, None, 10),
            Point::supply(3, 0.0, 8.0, None, 20),
        ]
    }

    #[test]
    fn test_from_points() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.size(), 3);
        assert!((dm.get(1, 2) - 5.0).abs() < 1e-10);
        assert!((dm.get(1, 3) - 8.0).abs() < 1e-10);
        assert!(dm.get(2, 2).abs() < 1e-10);
    }

    #[test]
    fn test_symmetric() {
        let dm = DistanceMatrix::from_points(&sample_points());
        for i in 1..=3 {
            for j in 1..=3 {
                assert_eq!(dm.get(i, j), dm.get(j, i));
            }
        }
    }

    #[test]
    fn test_out_of_range_is_zero() {
        let dm = DistanceMatrix::from_points(&sample_points());
        assert_eq!(dm.get(0, 1), 0.0);
        assert_eq!(dm.get(1, 4), 0.0);
        assert_eq!(dm.get(99, 99), 0.0);
    }

    #[test]
    fn test_set_ignores_out_of_range() {
        let mut dm = DistanceMatrix::new(2);
        dm.set(1, 2, 42.0);
        dm.set(3, 1, 9.0);
        assert_eq!(dm.get(1, 2), 42.0);
        assert_eq!(dm.get(2, 1), 0.0);
    }
}
