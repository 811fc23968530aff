use std::f64::consts::TAU;

use log::error;

use crate::{cfg::KeplerOpts, error::Error};

/// Solves Kepler's equation `E = M + e sin(E)` by Newton iteration, seeded
/// at `E = M`, until the update falls below [KeplerOpts::tolerance].
///
/// The mean anomaly is reduced to one revolution while iterating: the
/// returned eccentric anomaly lies on the same revolution as `mean_anomaly`.
pub fn solve_kepler(mean_anomaly: f64, eccentricity: f64, opts: &KeplerOpts) -> Result<f64, Error> {
    let revolutions = (mean_anomaly / TAU).round();
    let offset = revolutions * TAU;
    let m = mean_anomaly - offset;

    let mut e_k = m;

    for _ in 0..opts.max_iterations {
        let d_e = (m - e_k + eccentricity * e_k.sin()) / (1.0 - eccentricity * e_k.cos());
        e_k += d_e;

        if d_e.abs() < opts.tolerance {
            return Ok(e_k + offset);
        }
    }

    error!(
        "kepler solver in failure: m={} e={} after {} iterations",
        mean_anomaly, eccentricity, opts.max_iterations
    );

    Err(Error::NonConvergentKepler {
        iterations: opts.max_iterations,
    })
}
