//! 5-day block minimum methods.
//!
//! `ukih` follows the UK Institute of Hydrology (1980) turning-point rule.
//! `five_day` is the simpler block-minimum variant that interpolates
//! rejected blocks instead of whole turning-point segments.
use super::{clip_to, interpolate_turning_points, min_of};
use crate::constants::{BLOCK_DAYS, TURNING_POINT_FACTOR};

/// Index of the first minimum of every complete 5-day block.
fn block_minima(discharge: &[f64]) -> Vec<usize> {
    discharge
        .chunks_exact(BLOCK_DAYS)
        .enumerate()
        .map(|(block, days)| {
            let mut best = 0;
            for (j, &q) in days.iter().enumerate() {
                if q < days[best] {
                    best = j;
                }
            }
            block * BLOCK_DAYS + best
        })
        .collect()
}

/// Block minima that are markedly lower than both neighbouring block minima.
pub fn ukih_turning_points(discharge: &[f64]) -> Vec<usize> {
    block_minima(discharge)
        .windows(3)
        .filter(|w| {
            let candidate = TURNING_POINT_FACTOR * discharge[w[1]];
            candidate < discharge[w[0]] && candidate < discharge[w[2]]
        })
        .map(|w| w[1])
        .collect()
}

/// UKIH separation: straight lines between turning points.
///
/// Outside the first and last turning point the Lyne-Hollick baseflow is used.
pub fn ukih(discharge: &[f64], lh_baseflow: &[f64]) -> Vec<f64> {
    let turning = ukih_turning_points(discharge);
    interpolate_turning_points(discharge, &turning, lh_baseflow)
}

/// Five-day block minimum method.
///
/// A block minimum is rejected when 90% of it still exceeds the minimum of a
/// neighbouring block. Rejected blocks are filled by linear interpolation
/// between kept blocks; leading and trailing rejected blocks hold the nearest
/// kept value. Every day takes its block's value.
pub fn five_day(discharge: &[f64]) -> Vec<f64> {
    let minima: Vec<f64> = discharge.chunks(BLOCK_DAYS).map(min_of).collect();
    let m = minima.len();

    let kept: Vec<usize> = (0..m)
        .filter(|&i| {
            let v = TURNING_POINT_FACTOR * minima[i];
            let above_next = i + 1 < m && v > minima[i + 1];
            let above_prev = i > 0 && v > minima[i - 1];
            !(above_next || above_prev)
        })
        .collect();

    let mut values = minima.clone();
    if let (Some(&first), Some(&last)) = (kept.first(), kept.last()) {
        values[..first].fill(minima[first]);
        values[last + 1..].fill(minima[last]);
        for pair in kept.windows(2) {
            let (k0, k1) = (pair[0], pair[1]);
            let slope = (minima[k1] - minima[k0]) / (k1 - k0) as f64;
            for (i, v) in values.iter_mut().enumerate().take(k1).skip(k0 + 1) {
                *v = minima[k0] + slope * (i - k0) as f64;
            }
        }
    }

    let mut baseflow = Vec::with_capacity(discharge.len());
    for (days, &v) in discharge.chunks(BLOCK_DAYS).zip(&values) {
        baseflow.resize(baseflow.len() + days.len(), v);
    }
    clip_to(&mut baseflow, discharge);
    baseflow
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ukih_series() -> Vec<f64> {
        let mut q = vec![10.0; 25];
        q[2] = 8.0;
        q[7] = 3.0;
        q[12] = 9.0;
        q[17] = 2.0;
        q[22] = 9.0;
        q
    }

    #[test]
    fn block_minima_use_first_occurrence() {
        let q = [3.0, 1.0, 1.0, 4.0, 5.0, 2.0, 2.0, 2.0, 2.0, 2.0, 0.5];
        // The trailing partial block is ignored.
        assert_eq!(block_minima(&q), vec![1, 5]);
    }

    #[test]
    fn ukih_turning_points_need_both_neighbours_higher() {
        assert_eq!(ukih_turning_points(&ukih_series()), vec![7, 17]);
    }

    #[test]
    fn ukih_interpolates_between_turning_points() {
        let q = ukih_series();
        let lh = vec![1.0; q.len()];
        let b = ukih(&q, &lh);
        assert_relative_eq!(b[6], 1.0);
        assert_relative_eq!(b[7], 3.0);
        assert_relative_eq!(b[12], 2.5, epsilon = 1e-12);
        assert_relative_eq!(b[17], 2.0);
        assert_relative_eq!(b[18], 1.0);
    }

    #[test]
    fn ukih_without_turning_points_is_lyne_hollick() {
        let q = vec![4.0; 12];
        let lh = vec![2.0; 12];
        assert_eq!(ukih(&q, &lh), lh);
    }

    #[test]
    fn five_day_interpolates_rejected_blocks() {
        let q = [
            4.0, 5.0, 6.0, 7.0, 8.0, 10.0, 11.0, 12.0, 13.0, 14.0, 5.0, 6.0, 7.0, 8.0, 9.0,
        ];
        let b = five_day(&q);
        assert_eq!(&b[..5], &[4.0; 5]);
        assert!(b[5..10].iter().all(|&v| (v - 4.5).abs() < 1e-12));
        assert_eq!(&b[10..], &[5.0; 5]);
    }

    #[test]
    fn five_day_edge_blocks_hold_nearest_kept_value() {
        // minima [10, 4, 5]: the first and last blocks are rejected.
        let mut q = vec![20.0; 15];
        q[0] = 10.0;
        q[5] = 4.0;
        q[10] = 5.0;
        let b = five_day(&q);
        assert_relative_eq!(b[0], 4.0);
        assert_relative_eq!(b[7], 4.0);
        assert_relative_eq!(b[14], 4.0);
    }

    #[test]
    fn five_day_keeps_partial_last_block() {
        let q = [6.0, 5.0, 6.0, 7.0, 8.0, 5.5, 6.0];
        let b = five_day(&q);
        assert_eq!(b.len(), q.len());
        assert_relative_eq!(b[6], 5.5);
    }
}
