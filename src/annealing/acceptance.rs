//! Metropolis acceptance for a maximized energy.

use rand::Rng;

/// Probability of moving from `current` to `neighbor` at temperature `t`.
///
/// Improvements are always accepted. Otherwise the probability is
/// `exp((neighbor - current) / t)` clamped to `[0, 1]`; a non-positive
/// temperature or a NaN result gives `0.0`.
///
/// # Examples
///
/// ```
/// use u_blendroute::annealing::acceptance_probability;
///
/// assert_eq!(acceptance_probability(5.0, 3.0, 10.0), 1.0);
/// assert!((acceptance_probability(3.0, 5.0, 2.0) - (-1.0f64).exp()).abs() < 1e-12);
/// assert_eq!(acceptance_probability(3.0, 5.0, 0.0), 0.0);
/// ```
pub fn acceptance_probability(neighbor: f64, current: f64, t: f64) -> f64 {
    if neighbor > current {
        return 1.0;
    }
    if !(t > 0.0) {
        return 0.0;
    }
    let p = ((neighbor - current) / t).exp();
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}

/// Draws the Metropolis decision.
///
/// Improvements are accepted without consuming randomness.
pub fn accept<R: Rng>(neighbor: f64, current: f64, t: f64, rng: &mut R) -> bool {
    if neighbor > current {
        return true;
    }
    rng.random::<f64>() < acceptance_probability(neighbor, current, t)
}
