//! Commodity grade with an explicit quality rank.

use serde::{Deserialize, Serialize};

/// Quality grade of a collected commodity.
///
/// Grades are ranked `0..N`, where rank 0 is the best grade. The ordering is
/// by rank, so `a < b` means `a` is *better* than `b`, and the worst grade of
/// a set is its maximum. Labels map alphabetically: `'A'` is rank 0.
///
/// # Examples
///
/// ```
/// use u_blendroute::models::Grade;
///
/// let a = Grade::from_label('A').unwrap();
/// let c = Grade::from_label('C').unwrap();
/// assert!(a < c);
/// assert_eq!(a.max(c), c); // blending keeps the worst grade
/// assert_eq!(c.rank(), 2);
/// assert_eq!(c.label(), 'C');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Grade(u8);

impl Grade {
    /// The best grade (rank 0, label `'A'`).
    pub const BEST: Grade = Grade(0);

    /// Largest number of grades a label can express (`'A'..='Z'`).
    pub const MAX_GRADES: usize = 26;

    /// Creates a grade from its rank.
    ///
    /// Returns `None` if the rank has no label.
    pub fn new(rank: usize) -> Option<Self> {
        if rank < Self::MAX_GRADES {
            Some(Self(rank as u8))
        } else {
            None
        }
    }

    /// Parses an uppercase letter label.
    pub fn from_label(label: char) -> Option<Self> {
        if label.is_ascii_uppercase() {
            Some(Self(label as u8 - b'A'))
        } else {
            None
        }
    }

    /// Rank of this grade (0 = best).
    pub fn rank(self) -> usize {
        self.0 as usize
    }

    /// Letter label of this grade.
    pub fn label(self) -> char {
        (b'A' + self.0) as char
    }

    /// Worst grade among the given ones (blending rule).
    ///
    /// Returns `None` for an empty iterator.
    pub fn blend<I: IntoIterator<Item = Grade>>(grades: I) -> Option<Grade> {
        grades.into_iter().max()
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip_bounds() {
        assert_eq!(Grade::from_label('A'), Some(Grade::BEST));
        assert_eq!(Grade::from_label('Z').map(Grade::rank), Some(25));
        assert!(Grade::from_label('a').is_none());
        assert!(Grade::from_label('-').is_none());
    }

    #[test]
    fn test_new_out_of_range() {
        assert!(Grade::new(25).is_some());
        assert!(Grade::new(26).is_none());
    }

    #[test]
    fn test_order_is_by_rank() {
        let a = Grade::BEST;
        let b = Grade::new(1).expect("valid");
        assert!(a < b);
        assert!(b > a);
    }

    #[test]
    fn test_blend_takes_worst() {
        let grades = [Grade::BEST, Grade::new(2).expect("valid"), Grade::new(1).expect("valid")];
        assert_eq!(Grade::blend(grades), Grade::new(2));
        assert_eq!(Grade::blend(std::iter::empty()), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Grade::new(1).expect("valid").to_string(), "B");
    }
}
