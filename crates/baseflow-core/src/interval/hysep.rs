/// HYSEP graphical methods (Sloto & Crouse, 1996).
///
/// All three methods work on an odd interval width `2N*` derived from the
/// duration of surface runoff, `N = A^0.2` with `A` the drainage area in
/// square miles.
use super::{clip_to, interpolate_turning_points, min_of};
use crate::constants::{DEFAULT_RUNOFF_DAYS, INTERVAL_MAX, INTERVAL_MIN, KM2_TO_MI2};

/// Odd interval width `2N*` in `[3, 11]`.
///
/// `num_days` takes precedence over `area_km2`; with neither, `N = 5`.
pub fn interval_width(area_km2: Option<f64>, num_days: Option<f64>) -> usize {
    let n = match (num_days, area_km2) {
        (Some(days), _) => days,
        (None, Some(area)) => (KM2_TO_MI2 * area).powf(0.2),
        (None, None) => DEFAULT_RUNOFF_DAYS,
    };

    let mut width = (2.0 * n).ceil();
    if width % 2.0 == 0.0 {
        width -= 1.0;
    }
    if width.is_nan() {
        return INTERVAL_MIN;
    }
    width.clamp(INTERVAL_MIN as f64, INTERVAL_MAX as f64) as usize
}

/// Fixed interval: every day of a block takes the block minimum.
///
/// The last block may be shorter than `width`.
pub fn fixed(discharge: &[f64], width: usize) -> Vec<f64> {
    let mut baseflow = Vec::with_capacity(discharge.len());
    for block in discharge.chunks(width.max(1)) {
        let m = min_of(block);
        baseflow.resize(baseflow.len() + block.len(), m);
    }
    clip_to(&mut baseflow, discharge);
    baseflow
}

/// Sliding interval: each day takes the minimum of the window centred on it.
///
/// Days within half a window of either end take the minimum of the leading
/// or trailing edge block instead.
pub fn slide(discharge: &[f64], width: usize) -> Vec<f64> {
    let n = discharge.len();
    let half = width.saturating_sub(1) / 2;
    let mut baseflow = vec![0.0; n];
    if n == 0 {
        return baseflow;
    }

    let lead_end = half.min(n);
    let tail_start = n.saturating_sub(half);

    for i in half..tail_start {
        baseflow[i] = min_of(&discharge[i - half..=i + half]);
    }
    if lead_end > 0 {
        let m = min_of(&discharge[..lead_end]);
        baseflow[..lead_end].fill(m);
    }
    if tail_start < n {
        let m = min_of(&discharge[tail_start..]);
        baseflow[tail_start..].fill(m);
    }

    clip_to(&mut baseflow, discharge);
    baseflow
}

/// Days that are the minimum of their own centred window.
///
/// Only days with a full window on both sides are candidates.
pub fn local_turning_points(discharge: &[f64], width: usize) -> Vec<usize> {
    let n = discharge.len();
    let half = width.saturating_sub(1) / 2;
    (half..n.saturating_sub(half))
        .filter(|&i| i > 0 && discharge[i] == min_of(&discharge[i - half..=i + half]))
        .collect()
}

/// Local minimum: straight lines between local turning points.
///
/// Outside the first and last turning point the Lyne-Hollick baseflow is used.
pub fn local(discharge: &[f64], lh_baseflow: &[f64], width: usize) -> Vec<f64> {
    let turning = local_turning_points(discharge, width);
    interpolate_turning_points(discharge, &turning, lh_baseflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const Q: [f64; 7] = [5.0, 3.0, 4.0, 6.0, 2.0, 7.0, 8.0];

    // -- Interval width --

    #[test]
    fn default_width_is_nine() {
        assert_eq!(interval_width(None, None), 9);
    }

    #[test]
    fn short_runoff_is_clamped_to_three() {
        assert_eq!(interval_width(None, Some(2.0)), 3);
        assert_eq!(interval_width(None, Some(1.0)), 3);
        assert_eq!(interval_width(Some(0.0), None), 3);
    }

    #[test]
    fn long_runoff_is_clamped_to_eleven() {
        assert_eq!(interval_width(None, Some(10.0)), 11);
    }

    #[test]
    fn width_from_area() {
        // 1000 km2 = 386.1 mi2, N = 3.29, 2N = 6.58 -> 7
        assert_eq!(interval_width(Some(1000.0), None), 7);
    }

    #[test]
    fn num_days_overrides_area() {
        assert_eq!(interval_width(Some(1000.0), Some(2.0)), 3);
    }

    #[test]
    fn width_is_always_odd_and_in_range() {
        for days in [0.5, 1.2, 2.5, 3.0, 3.7, 4.2, 5.5, 6.0, 20.0] {
            let w = interval_width(None, Some(days));
            assert_eq!(w % 2, 1);
            assert!((INTERVAL_MIN..=INTERVAL_MAX).contains(&w));
        }
    }

    // -- Methods --

    #[test]
    fn fixed_takes_block_minima() {
        assert_eq!(fixed(&Q, 3), vec![3.0, 3.0, 3.0, 2.0, 2.0, 2.0, 8.0]);
    }

    #[test]
    fn slide_takes_centred_minima() {
        assert_eq!(slide(&Q, 3), vec![5.0, 3.0, 3.0, 2.0, 2.0, 2.0, 8.0]);
    }

    #[test]
    fn slide_on_series_shorter_than_window() {
        assert_eq!(slide(&[4.0, 2.0], 9), vec![2.0, 2.0]);
        assert!(slide(&[], 9).is_empty());
    }

    #[test]
    fn local_turning_points_are_window_minima() {
        assert_eq!(local_turning_points(&Q, 3), vec![1, 4]);
    }

    #[test]
    fn local_interpolates_and_falls_back() {
        let lh = [1.0; 7];
        let b = local(&Q, &lh, 3);
        assert_relative_eq!(b[0], 1.0);
        assert_relative_eq!(b[1], 3.0);
        assert_relative_eq!(b[2], 8.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(b[3], 7.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(b[4], 2.0);
        assert_relative_eq!(b[5], 1.0);
        assert_relative_eq!(b[6], 1.0);
    }

    #[test]
    fn graphical_methods_never_exceed_discharge() {
        let q: Vec<f64> = (0..40).map(|i| 5.0 + ((i * 7) % 11) as f64).collect();
        let lh = vec![0.5; q.len()];
        for w in [3, 5, 9, 11] {
            for b in [fixed(&q, w), slide(&q, w), local(&q, &lh, w)] {
                assert_eq!(b.len(), q.len());
                assert!(b.iter().zip(&q).all(|(b, q)| b <= q));
            }
        }
    }
}
