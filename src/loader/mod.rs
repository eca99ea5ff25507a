//! Whitespace-tokenized instance reader.
//!
//! The format is, in order: the vehicle count and that many capacities; the
//! grade count, that many quotas and that many unit revenues; the node count
//! and, per node, `id x y grade quantity`. Node `1` is the depot and must read
//! `- 0`; grades are letters from `A`, and `-` marks a node without a grade.
//!
//! ```text
//! 2
//! 100 80
//! 2
//! 30 0
//! 1.5 0.9
//! 3
//! 1 0 0 - 0
//! 2 3 4 A 40
//! 3 -3 4 B 25
//! ```

mod err;

pub use err::LoadError;

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

use tracing::debug;

use crate::models::{Grade, Instance, InstanceError, Point};

/// Reads [`Instance`]s from text.
///
/// # Examples
///
/// ```
/// use u_blendroute::loader::InstanceLoader;
///
/// let text = "1\n100\n1\n0\n1.0\n2\n1 0 0 - 0\n2 3 4 A 10\n";
/// let instance = InstanceLoader::new().parse_str(text).unwrap();
/// assert_eq!(instance.num_nodes(), 2);
/// assert_eq!(instance.capacities(), &[100]);
/// assert!((instance.distance(1, 2) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InstanceLoader {
    reject_increasing_revenue: bool,
}

impl InstanceLoader {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails on revenue that increases as the grade worsens instead of
    /// only logging a warning.
    #[inline]
    pub fn reject_increasing_revenue(mut self, yes: bool) -> Self {
        self.reject_increasing_revenue = yes;
        self
    }

    pub fn from_bufread<R: BufRead>(&self, mut br: R) -> Result<Instance, LoadError> {
        let mut sc = Scanner::new(&mut br);

        let num_vehicles = sc.next_usize()?;
        let mut capacities = Vec::with_capacity(num_vehicles);
        for _ in 0..num_vehicles {
            capacities.push(sc.next_i32()?);
        }

        let num_grades = sc.next_usize()?;
        let mut quotas = Vec::with_capacity(num_grades);
        for _ in 0..num_grades {
            quotas.push(sc.next_i32()?);
        }
        let mut revenues = Vec::with_capacity(num_grades);
        for _ in 0..num_grades {
            revenues.push(sc.next_f64()?);
        }

        let num_nodes = sc.next_usize()?;
        let mut depot = None;
        let mut supply = Vec::with_capacity(num_nodes.saturating_sub(1));
        for _ in 0..num_nodes {
            let id = sc.next_usize()?;
            let x = sc.next_f64()?;
            let y = sc.next_f64()?;
            let grade = sc.next_grade()?;
            let quantity = sc.next_i32()?;
            if id == 1 {
                if depot.is_some() {
                    return Err(InstanceError::DuplicateId(id).into());
                }
                depot = Some(Point::supply(id, x, y, grade, quantity));
            } else {
                supply.push(Point::supply(id, x, y, grade, quantity));
            }
        }

        if let Some(tok) = sc.next_token_opt()? {
            return Err(LoadError::TrailingToken(tok.to_string()));
        }
        let depot = depot.ok_or(LoadError::MissingDepot)?;

        let instance = Instance::new(depot, supply, capacities, quotas, revenues)?;
        if self.reject_increasing_revenue {
            if let Some(grade) = instance.revenue_order_violation() {
                return Err(InstanceError::IncreasingRevenue { grade }.into());
            }
        }
        debug!(
            vehicles = num_vehicles,
            grades = num_grades,
            nodes = num_nodes,
            supply = instance.total_supply(),
            "parsed instance"
        );
        Ok(instance)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Instance, LoadError> {
        let file = File::open(path).map_err(LoadError::Io)?;
        self.from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Instance, LoadError> {
        self.from_bufread(BufReader::new(r))
    }

    #[inline]
    pub fn parse_str(&self, s: &str) -> Result<Instance, LoadError> {
        self.from_reader(s.as_bytes())
    }
}

#[derive(Debug)]
struct Scanner<R: BufRead> {
    rdr: R,
    buf: String,
    pos: usize,
}

impl<R: BufRead> Scanner<R> {
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            buf: String::new(),
            pos: 0,
        }
    }

    /// Moves to the next non-whitespace byte; `false` at end of input.
    fn skip_ws(&mut self) -> Result<bool, LoadError> {
        loop {
            let bytes = self.buf.as_bytes();
            while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos < self.buf.len() {
                return Ok(true);
            }
            self.buf.clear();
            self.pos = 0;
            if self.rdr.read_line(&mut self.buf)? == 0 {
                return Ok(false);
            }
        }
    }

    fn next_token_opt(&mut self) -> Result<Option<&str>, LoadError> {
        if !self.skip_ws()? {
            return Ok(None);
        }
        let start = self.pos;
        let bytes = self.buf.as_bytes();
        while self.pos < bytes.len() && !bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
        Ok(Some(&self.buf[start..self.pos]))
    }

    fn next_token(&mut self) -> Result<&str, LoadError> {
        self.next_token_opt()?.ok_or(LoadError::UnexpectedEof)
    }

    fn next_i32(&mut self) -> Result<i32, LoadError> {
        Ok(self.next_token()?.parse::<i32>()?)
    }

    fn next_usize(&mut self) -> Result<usize, LoadError> {
        Ok(self.next_token()?.parse::<usize>()?)
    }

    fn next_f64(&mut self) -> Result<f64, LoadError> {
        Ok(self.next_token()?.parse::<f64>()?)
    }

    fn next_grade(&mut self) -> Result<Option<Grade>, LoadError> {
        let tok = self.next_token()?;
        if tok == "-" {
            return Ok(None);
        }
        let mut chars = tok.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => match Grade::from_label(c) {
                Some(g) => Ok(Some(g)),
                None => Err(LoadError::BadGrade(tok.to_string())),
            },
            _ => Err(LoadError::BadGrade(tok.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_OK: &str = r#"
        2
        100 80
        2
        30 0
        1.5 0.9
        4
        1 0 0 - 0
        2 3 4 A 40
        3 -3 4 B 25
        4 0 -5 - 12
    "#;

    #[test]
    fn test_loads_small_instance() {
        let inst = InstanceLoader::new().parse_str(SMALL_OK).unwrap();
        assert_eq!(inst.num_vehicles(), 2);
        assert_eq!(inst.capacities(), &[100, 80]);
        assert_eq!(inst.quotas(), &[30, 0]);
        assert_eq!(inst.revenues(), &[1.5, 0.9]);
        assert_eq!(inst.num_nodes(), 4);
        assert_eq!(inst.depot_id(), 1);
        assert_eq!(inst.supply_ids(), &[2, 3, 4]);

        let p3 = inst.point(3).unwrap();
        assert_eq!(p3.grade(), Grade::from_label('B'));
        assert_eq!(p3.quantity(), 25);
        let p4 = inst.point(4).unwrap();
        assert_eq!(p4.grade(), None);
        assert_eq!(p4.effective_grade(), Grade::BEST);
        assert!((inst.distance(1, 4) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_nodes_in_any_order() {
        let text = "1\n50\n1\n0\n2\n3\n3 1 0 A 5\n1 0 0 - 0\n2 2 0 A 5\n";
        let inst = InstanceLoader::new().parse_str(text).unwrap();
        assert_eq!(inst.supply_ids(), &[3, 2]);
        assert!((inst.distance(2, 3) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_truncated_input() {
        let text = "1\n50\n1\n0\n2\n2\n1 0 0 - 0\n2 2 0 A";
        assert!(matches!(
            InstanceLoader::new().parse_str(text),
            Err(LoadError::UnexpectedEof)
        ));
    }

    #[test]
    fn test_bad_tokens() {
        let bad_int = "x\n";
        assert!(matches!(
            InstanceLoader::new().parse_str(bad_int),
            Err(LoadError::ParseInt(_))
        ));
        let bad_float = "1\n50\n1\n0\nabc\n";
        assert!(matches!(
            InstanceLoader::new().parse_str(bad_float),
            Err(LoadError::ParseFloat(_))
        ));
        let bad_grade = "1\n50\n1\n0\n2\n2\n1 0 0 - 0\n2 2 0 a 5\n";
        assert!(matches!(
            InstanceLoader::new().parse_str(bad_grade),
            Err(LoadError::BadGrade(ref t)) if t == "a"
        ));
        let long_grade = "1\n50\n1\n0\n2\n2\n1 0 0 - 0\n2 2 0 AB 5\n";
        assert!(matches!(
            InstanceLoader::new().parse_str(long_grade),
            Err(LoadError::BadGrade(_))
        ));
    }

    #[test]
    fn test_trailing_token() {
        let text = "1\n50\n1\n0\n2\n2\n1 0 0 - 0\n2 2 0 A 5\n7\n";
        assert!(matches!(
            InstanceLoader::new().parse_str(text),
            Err(LoadError::TrailingToken(ref t)) if t == "7"
        ));
    }

    #[test]
    fn test_missing_depot() {
        let text = "1\n50\n1\n0\n2\n1\n2 2 0 A 5\n";
        assert!(matches!(
            InstanceLoader::new().parse_str(text),
            Err(LoadError::MissingDepot)
        ));
    }

    #[test]
    fn test_duplicate_depot() {
        let text = "1\n50\n1\n0\n2\n3\n1 0 0 - 0\n1 9 9 - 0\n2 3 4 A 10\n";
        assert!(matches!(
            InstanceLoader::new().parse_str(text),
            Err(LoadError::Instance(InstanceError::DuplicateId(1)))
        ));
    }

    #[test]
    fn test_depot_with_grade_or_quantity() {
        let graded = "1\n50\n1\n0\n2\n2\n1 0 0 A 0\n2 3 4 A 10\n";
        assert!(matches!(
            InstanceLoader::new().parse_str(graded),
            Err(LoadError::Instance(InstanceError::InvalidDepot { id: 1, .. }))
        ));
        let loaded = "1\n50\n1\n0\n2\n2\n1 0 0 - 40\n2 3 4 A 10\n";
        assert!(matches!(
            InstanceLoader::new().parse_str(loaded),
            Err(LoadError::Instance(InstanceError::InvalidDepot { quantity: 40, .. }))
        ));
    }

    #[test]
    fn test_invalid_instance() {
        let text = "1\n50\n1\n0\n2\n2\n1 0 0 - 0\n2 2 0 C 5\n";
        assert!(matches!(
            InstanceLoader::new().parse_str(text),
            Err(LoadError::Instance(InstanceError::UnknownGrade { id: 2, rank: 2 }))
        ));
        let text = "0\n1\n0\n2\n2\n1 0 0 - 0\n2 2 0 A 5\n";
        assert!(matches!(
            InstanceLoader::new().parse_str(text),
            Err(LoadError::Instance(InstanceError::EmptyFleet))
        ));
    }

    #[test]
    fn test_increasing_revenue_policy() {
        let text = "1\n50\n2\n0 0\n1.0 2.0\n2\n1 0 0 - 0\n2 2 0 A 5\n";
        assert!(InstanceLoader::new().parse_str(text).is_ok());
        assert!(matches!(
            InstanceLoader::new()
                .reject_increasing_revenue(true)
                .parse_str(text),
            Err(LoadError::Instance(InstanceError::IncreasingRevenue { grade: 1 }))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = InstanceLoader::new()
            .from_path("/nonexistent/blendroute/instance.txt")
            .unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        assert!(err.to_string().starts_with("I/O error"));
    }
}
