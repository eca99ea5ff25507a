//! Errors raised by the instance model.

use super::Grade;

/// A point id that does not resolve to any point of the instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotFoundError {
    id: usize,
}

impl NotFoundError {
    pub fn new(id: usize) -> Self {
        Self { id }
    }

    pub fn id(&self) -> usize {
        self.id
    }
}

impl std::fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Point {} does not exist in the instance", self.id)
    }
}

impl std::error::Error for NotFoundError {}

/// Structural problems found while assembling an [`Instance`](super::Instance).
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceError {
    EmptyFleet,
    NonPositiveCapacity { vehicle: usize, capacity: i32 },
    GradeCountMismatch { quotas: usize, revenues: usize },
    TooManyGrades(usize),
    NegativeQuota { grade: usize, quota: i32 },
    InvalidRevenue { grade: usize, revenue: f64 },
    IncreasingRevenue { grade: usize },
    DuplicateId(usize),
    IdOutOfRange { id: usize, num_nodes: usize },
    UnknownGrade { id: usize, rank: usize },
    NegativeQuantity { id: usize, quantity: i32 },
    InvalidDepot { id: usize, grade: Option<Grade>, quantity: i32 },
}

impl std::fmt::Display for InstanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InstanceError::EmptyFleet => write!(f, "The instance has no vehicles"),
            InstanceError::NonPositiveCapacity { vehicle, capacity } => {
                write!(f, "Vehicle {} has non-positive capacity {}", vehicle, capacity)
            }
            InstanceError::GradeCountMismatch { quotas, revenues } => write!(
                f,
                "Got {} quotas but {} revenues; both must match the grade count",
                quotas, revenues
            ),
            InstanceError::TooManyGrades(n) => write!(f, "{} grades cannot be labelled A..Z", n),
            InstanceError::NegativeQuota { grade, quota } => {
                write!(f, "Grade {} has negative quota {}", grade, quota)
            }
            InstanceError::InvalidRevenue { grade, revenue } => {
                write!(f, "Grade {} has invalid revenue {}", grade, revenue)
            }
            InstanceError::IncreasingRevenue { grade } => write!(
                f,
                "Revenue of grade {} is higher than the revenue of a better grade",
                grade
            ),
            InstanceError::DuplicateId(id) => write!(f, "Point id {} appears more than once", id),
            InstanceError::IdOutOfRange { id, num_nodes } => {
                write!(f, "Point id {} is outside [1, {}]", id, num_nodes)
            }
            InstanceError::UnknownGrade { id, rank } => {
                write!(f, "Point {} uses grade rank {} beyond the grade count", id, rank)
            }
            InstanceError::NegativeQuantity { id, quantity } => {
                write!(f, "Point {} has negative quantity {}", id, quantity)
            }
            InstanceError::InvalidDepot { id, grade, quantity } => write!(
                f,
                "Depot {} must have no grade and zero quantity, got grade {} and quantity {}",
                id,
                grade.map_or('-', Grade::label),
                quantity
            ),
        }
    }
}

impl std::error::Error for InstanceError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let e = NotFoundError::new(42);
        assert_eq!(e.id(), 42);
        assert!(e.to_string().contains("42"));
    }

    #[test]
    fn test_instance_error_display() {
        let e = InstanceError::IdOutOfRange { id: 9, num_nodes: 4 };
        assert_eq!(e.to_string(), "Point id 9 is outside [1, 4]");
    }
}
