//! Convergence stream as CSV.

use std::io;
use std::path::Path;

use csv::Writer;

use crate::annealing::ConvergenceSample;

/// Writes `step,temperature,best_profit` rows.
///
/// # Examples
///
/// ```
/// use u_blendroute::annealing::ConvergenceSample;
/// use u_blendroute::report::write_convergence;
///
/// let samples = [ConvergenceSample { step: 0, temperature: 100.0, best_profit: 12.5 }];
/// let mut out = Vec::new();
/// write_convergence(&samples, &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "step,temperature,best_profit\n0,100,12.5\n");
/// ```
pub fn write_convergence<W: io::Write>(
    samples: &[ConvergenceSample],
    w: W,
) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(w);
    write_rows(&mut wtr, samples)
}

/// Writes the convergence stream to a file, replacing it if present.
pub fn write_convergence_to_path(
    samples: &[ConvergenceSample],
    path: impl AsRef<Path>,
) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_path(path)?;
    write_rows(&mut wtr, samples)
}

fn write_rows<W: io::Write>(
    wtr: &mut Writer<W>,
    samples: &[ConvergenceSample],
) -> Result<(), csv::Error> {
    wtr.write_record(["step", "temperature", "best_profit"])?;
    for s in samples {
        wtr.write_record([
            s.step.to_string(),
            s.temperature.to_string(),
            s.best_profit.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
