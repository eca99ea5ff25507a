//! Immutable problem instance.

use tracing::warn;

use super::{Grade, InstanceError, NotFoundError, Point};
use crate::distance::DistanceMatrix;

/// A collection problem instance.
///
/// Owns the depot, the supply points, the fleet capacities, the per-grade
/// quotas and revenues, and a Euclidean distance matrix computed once at
/// construction. Point ids are unique and cover `[1, num_nodes]`, so every
/// id inside that range resolves to exactly one point.
///
/// # Examples
///
/// ```
/// use u_blendroute::models::{Grade, Instance, Point};
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
/// assert_eq!(instance.num_nodes(), 2);
/// assert_eq!(instance.num_vehicles(), 1);
/// assert!((instance.distance(1, 2) - 5.0).abs() < 1e-10);
/// assert!(instance.point(7).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Instance {
    points: Vec<Point>,
    depot_id: usize,
    supply_ids: Vec<usize>,
    capacities: Vec<i32>,
    quotas: Vec<i32>,
    revenues: Vec<f64>,
    distances: DistanceMatrix,
}

impl Instance {
    /// Validates the data and builds the distance matrix.
    pub fn new(
        depot: Point,
        supply: Vec<Point>,
        capacities: Vec<i32>,
        quotas: Vec<i32>,
        revenues: Vec<f64>,
    ) -> Result<Self, InstanceError> {
        if capacities.is_empty() {
            return Err(InstanceError::EmptyFleet);
        }
        if let Some((vehicle, &capacity)) = capacities.iter().enumerate().find(|&(_, &c)| c <= 0) {
            return Err(InstanceError::NonPositiveCapacity { vehicle, capacity });
        }
        if quotas.len() != revenues.len() {
            return Err(InstanceError::GradeCountMismatch {
                quotas: quotas.len(),
                revenues: revenues.len(),
            });
        }
        let num_grades = quotas.len();
        if num_grades > Grade::MAX_GRADES {
            return Err(InstanceError::TooManyGrades(num_grades));
        }
        if let Some((grade, &quota)) = quotas.iter().enumerate().find(|&(_, &q)| q < 0) {
            return Err(InstanceError::NegativeQuota { grade, quota });
        }
        if let Some((grade, &revenue)) = revenues
            .iter()
            .enumerate()
            .find(|&(_, &r)| !r.is_finite() || r < 0.0)
        {
            return Err(InstanceError::InvalidRevenue { grade, revenue });
        }

        if depot.grade().is_some() || depot.quantity() != 0 {
            return Err(InstanceError::InvalidDepot {
                id: depot.id(),
                grade: depot.grade(),
                quantity: depot.quantity(),
            });
        }

        let num_nodes = supply.len() + 1;
        let depot_id = depot.id();
        let supply_ids: Vec<usize> = supply.iter().map(Point::id).collect();

        let mut slots: Vec<Option<Point>> = vec![None; num_nodes];
        for point in std::iter::once(depot).chain(supply) {
            let id = point.id();
            if id == 0 || id > num_nodes {
                return Err(InstanceError::IdOutOfRange { id, num_nodes });
            }
            if point.quantity() < 0 {
                return Err(InstanceError::NegativeQuantity {
                    id,
                    quantity: point.quantity(),
                });
            }
            if let Some(grade) = point.grade() {
                if grade.rank() >= num_grades {
                    return Err(InstanceError::UnknownGrade {
                        id,
                        rank: grade.rank(),
                    });
                }
            }
            let slot = &mut slots[id - 1];
            if slot.is_some() {
                return Err(InstanceError::DuplicateId(id));
            }
            *slot = Some(point);
        }
        // Unique ids inside [1, num_nodes] with num_nodes points fill every slot.
        let points: Vec<Point> = slots.into_iter().flatten().collect();
        let distances = DistanceMatrix::from_points(&points);

        let instance = Self {
            points,
            depot_id,
            supply_ids,
            capacities,
            quotas,
            revenues,
            distances,
        };
        if let Some(grade) = instance.revenue_order_violation() {
            warn!(
                grade,
                "revenue increases as grade worsens; blending will favour mixed loads"
            );
        }
        Ok(instance)
    }

    /// Returns the first grade whose revenue exceeds the revenue of the grade
    /// before it, if any.
    pub fn revenue_order_violation(&self) -> Option<usize> {
        self.revenues
            .windows(2)
            .position(|w| w[1] > w[0])
            .map(|i| i + 1)
    }

    /// The depot.
    pub fn depot(&self) -> &Point {
        &self.points[self.depot_id - 1]
    }

    /// Depot id.
    pub fn depot_id(&self) -> usize {
        self.depot_id
    }

    /// Supply point ids in input order.
    pub fn supply_ids(&self) -> &[usize] {
        &self.supply_ids
    }

    /// Supply points in input order.
    pub fn supply_points(&self) -> impl Iterator<Item = &Point> + '_ {
        self.supply_ids.iter().map(|&id| &self.points[id - 1])
    }

    /// Total number of nodes (depot + supply points).
    pub fn num_nodes(&self) -> usize {
        self.points.len()
    }

    /// Number of vehicles.
    pub fn num_vehicles(&self) -> usize {
        self.capacities.len()
    }

    /// Number of grades.
    pub fn num_grades(&self) -> usize {
        self.quotas.len()
    }

    /// Vehicle capacities, indexed by vehicle.
    pub fn capacities(&self) -> &[i32] {
        &self.capacities
    }

    /// Capacity of a vehicle, or `None` for an unknown vehicle index.
    pub fn capacity(&self, vehicle: usize) -> Option<i32> {
        self.capacities.get(vehicle).copied()
    }

    /// Minimum quotas, indexed by grade rank.
    pub fn quotas(&self) -> &[i32] {
        &self.quotas
    }

    /// Unit revenues, indexed by grade rank.
    pub fn revenues(&self) -> &[f64] {
        &self.revenues
    }

    /// Unit revenue of a grade (`0.0` for a grade beyond the grade count).
    pub fn revenue(&self, grade: Grade) -> f64 {
        self.revenues.get(grade.rank()).copied().unwrap_or(0.0)
    }

    /// Looks up a point by id.
    pub fn point(&self, id: usize) -> Result<&Point, NotFoundError> {
        if id == 0 {
            return Err(NotFoundError::new(id));
        }
        self.points.get(id - 1).ok_or(NotFoundError::new(id))
    }

    /// Distance between two points; `0.0` if either id is outside `[1, num_nodes]`.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances.get(from, to)
    }

    /// The precomputed distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Total quantity offered by all supply points.
    pub fn total_supply(&self) -> i64 {
        self.supply_points().map(|p| i64::from(p.quantity())).sum()
    }
}
