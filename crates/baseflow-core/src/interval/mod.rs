//! Graphical (interval) baseflow separation.
//!
//! These methods read baseflow off block or window minima of the hydrograph
//! rather than running a recurrence. `hysep` holds the USGS HYSEP family
//! (fixed, sliding, local minimum); `ukih` holds the 5-day block methods.
pub mod hysep;
pub mod ukih;

pub use hysep::{fixed, interval_width, local, local_turning_points, slide};
pub use ukih::{five_day, ukih, ukih_turning_points};

/// Minimum of a slice (`+inf` when empty).
pub(crate) fn min_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Clip a baseflow series to the observed discharge in place.
pub(crate) fn clip_to(baseflow: &mut [f64], discharge: &[f64]) {
    for (b, &q) in baseflow.iter_mut().zip(discharge) {
        if *b > q {
            *b = q;
        }
    }
}

/// Connect turning points with straight lines.
///
/// Each turning point takes its discharge; days strictly between two turning
/// points are interpolated linearly. Days before the first and after the last
/// turning point keep the `fallback` series (the Lyne-Hollick baseflow). The
/// result is clipped to discharge.
pub(crate) fn interpolate_turning_points(
    discharge: &[f64],
    turning: &[usize],
    fallback: &[f64],
) -> Vec<f64> {
    let mut baseflow = fallback.to_vec();
    if turning.is_empty() {
        log::warn!("no turning points found, using Lyne-Hollick baseflow");
        return baseflow;
    }

    for pair in turning.windows(2) {
        let (t0, t1) = (pair[0], pair[1]);
        let slope = (discharge[t1] - discharge[t0]) / (t1 - t0) as f64;
        for i in t0..t1 {
            baseflow[i] = discharge[t0] + slope * (i - t0) as f64;
        }
    }
    if let Some(&last) = turning.last() {
        baseflow[last] = discharge[last];
    }

    clip_to(&mut baseflow, discharge);
    baseflow
}
