//! Plain-text solution report.

use std::{
    fmt,
    io::{self, Write},
};

use crate::models::{RouteSummary, Solution};

/// Formats one route as `0-<id>-...-0 <cost> <load><grade>`.
///
/// An empty route prints as `0-0 0 0X`.
///
/// # Examples
///
/// ```
/// use u_blendroute::models::{Grade, RouteSummary};
/// use u_blendroute::report::format_route;
///
/// let summary = RouteSummary::new(0, 24.6, 35, Grade::new(1), 35.0);
/// assert_eq!(format_route(&[4, 2], &summary), "0-4-2-0 25 35B");
/// assert_eq!(format_route(&[], &RouteSummary::empty(1)), "0-0 0 0X");
/// ```
pub fn format_route(ids: &[usize], summary: &RouteSummary) -> String {
    if ids.is_empty() {
        return "0-0 0 0X".to_string();
    }
    let mut line = String::from("0");
    for id in ids {
        line.push('-');
        line.push_str(&id.to_string());
    }
    format!(
        "{}-0 {:.0} {}{}",
        line,
        summary.cost(),
        summary.load(),
        summary.grade_label()
    )
}

/// The solution report as a [`Display`](fmt::Display) value.
///
/// The first line is `<gross> <cost> <profit>` rounded to integers, then one
/// line per vehicle, a feasibility line, and the unassigned ids when any.
#[derive(Debug, Clone, Copy)]
pub struct SolutionReport<'a>(pub &'a Solution);

impl fmt::Display for SolutionReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let solution = self.0;
        writeln!(
            f,
            "{:.0} {:.0} {:.0}",
            solution.gross_revenue(),
            solution.transport_cost(),
            solution.profit()
        )?;
        for (ids, summary) in solution.routes().iter().zip(solution.route_summaries()) {
            writeln!(f, "{}", format_route(ids, summary))?;
        }
        writeln!(
            f,
            "feasible: {}",
            if solution.is_feasible() { "yes" } else { "no" }
        )?;
        if !solution.unassigned().is_empty() {
            let ids: Vec<String> = solution.unassigned().iter().map(|id| id.to_string()).collect();
            writeln!(f, "unassigned: {}", ids.join(" "))?;
        }
        Ok(())
    }
}

/// Writes the solution report.
pub fn write_solution<W: Write>(solution: &Solution, mut w: W) -> io::Result<()> {
    write!(w, "{}", SolutionReport(solution))?;
    w.flush()
}

/// Renders the solution report into a string.
pub fn render_solution(solution: &Solution) -> String {
    SolutionReport(solution).to_string()
}
