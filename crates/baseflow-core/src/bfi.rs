//! Baseflow index (BFI) utilities.
//!
//! `backward` walks a pure exponential recession backwards from the end of
//! the record; `maximum_bfi` turns it into an estimate of the Eckhardt
//! `BFImax` parameter (Collischonn & Fan, 2013).
use std::collections::BTreeMap;

use crate::constants::{BFI_MAX_CEILING, DAYS_PER_YEAR};
use crate::error::{BaseflowError, Result};

/// Long-term baseflow index `sum(b) / sum(Q)`.
pub fn baseflow_index(discharge: &[f64], baseflow: &[f64]) -> f64 {
    let total_b: f64 = baseflow.iter().sum();
    let total_q: f64 = discharge.iter().sum();
    total_b / total_q
}

/// Backward recession filter.
///
/// Starts from the last Lyne-Hollick value and grows it backwards in time as
/// `b[i-1] = b[i] / k`. A zero day restarts the recession from discharge.
/// Every day is clipped to discharge.
pub fn backward(discharge: &[f64], lh_baseflow: &[f64], k: f64) -> Vec<f64> {
    let n = discharge.len();
    let mut baseflow = vec![0.0; n];
    let Some(&last) = lh_baseflow.last() else {
        return baseflow;
    };
    if n == 0 {
        return baseflow;
    }
    baseflow[n - 1] = last.min(discharge[n - 1]);

    for i in (1..n).rev() {
        let b = if baseflow[i] == 0.0 {
            discharge[i - 1]
        } else {
            baseflow[i] / k
        };
        baseflow[i - 1] = b.min(discharge[i - 1]);
    }
    baseflow
}

/// Ratio of annual mean baseflow to annual mean discharge, per year.
///
/// With `years`, days are grouped by calendar year. Without, the record is cut
/// into consecutive 365-day chunks and the incomplete remainder is dropped; a
/// record shorter than a year is treated as one chunk.
fn annual_means(discharge: &[f64], baseflow: &[f64], years: Option<&[i32]>) -> Vec<(f64, f64)> {
    match years {
        Some(years) => {
            let mut groups: BTreeMap<i32, (f64, f64, usize)> = BTreeMap::new();
            for ((&y, &q), &b) in years.iter().zip(discharge).zip(baseflow) {
                let entry = groups.entry(y).or_insert((0.0, 0.0, 0));
                entry.0 += b;
                entry.1 += q;
                entry.2 += 1;
            }
            groups
                .into_values()
                .map(|(b, q, count)| (b / count as f64, q / count as f64))
                .collect()
        }
        None => {
            let chunk = if discharge.len() < DAYS_PER_YEAR {
                discharge.len().max(1)
            } else {
                DAYS_PER_YEAR
            };
            discharge
                .chunks_exact(chunk)
                .zip(baseflow.chunks_exact(chunk))
                .map(|(q, b)| {
                    let days = chunk as f64;
                    (b.iter().sum::<f64>() / days, q.iter().sum::<f64>() / days)
                })
                .collect()
        }
    }
}

fn bfi_from_annual(annual: &[(f64, f64)]) -> f64 {
    let best = annual
        .iter()
        .map(|(b, q)| b / q)
        .fold(f64::NEG_INFINITY, f64::max);
    if best < BFI_MAX_CEILING {
        return best;
    }
    let (sum_b, sum_q) = annual
        .iter()
        .fold((0.0, 0.0), |(sb, sq), (b, q)| (sb + b, sq + q));
    sum_b / sum_q
}

/// Estimate `BFImax` from the backward recession filter.
///
/// The largest annual BFI is used unless it reaches 0.9, in which case the
/// ratio of the summed annual means is used instead.
///
/// # Errors
///
/// `EmptySeries` for an empty record, `LengthMismatch` if `lh_baseflow` or
/// `years` do not match the discharge, and `InvalidParameter` for `k`
/// outside `(0, 1)`.
pub fn maximum_bfi(
    discharge: &[f64],
    lh_baseflow: &[f64],
    k: f64,
    years: Option<&[i32]>,
) -> Result<f64> {
    let n = discharge.len();
    if n == 0 {
        return Err(BaseflowError::EmptySeries);
    }
    for len in std::iter::once(lh_baseflow.len()).chain(years.map(<[i32]>::len)) {
        if len != n {
            return Err(BaseflowError::LengthMismatch {
                expected: n,
                actual: len,
            });
        }
    }
    if !(k > 0.0 && k < 1.0) {
        return Err(BaseflowError::InvalidParameter {
            name: "k",
            value: k,
            reason: "must lie in (0, 1)",
        });
    }

    let baseflow = backward(discharge, lh_baseflow, k);
    let bfi_max = bfi_from_annual(&annual_means(discharge, &baseflow, years));
    log::debug!("maximum BFI {bfi_max:.4}");
    Ok(bfi_max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn backward_grows_and_clips() {
        let q = [10.0; 4];
        let lh = [0.0, 0.0, 0.0, 2.0];
        assert_eq!(backward(&q, &lh, 0.5), vec![10.0, 8.0, 4.0, 2.0]);
    }

    #[test]
    fn backward_restarts_after_zero() {
        let q = [10.0; 4];
        let lh = [0.0; 4];
        assert_eq!(backward(&q, &lh, 0.5), vec![10.0, 10.0, 10.0, 0.0]);
    }

    #[test]
    fn baseflow_index_is_volume_ratio() {
        assert_relative_eq!(baseflow_index(&[2.0, 4.0, 4.0], &[1.0, 1.0, 3.0]), 0.5);
    }

    #[test]
    fn annual_ratio_below_ceiling_is_used() {
        let annual = [(2.0, 10.0), (5.0, 10.0), (3.0, 10.0)];
        assert_relative_eq!(bfi_from_annual(&annual), 0.5);
    }

    #[test]
    fn annual_ratio_at_ceiling_falls_back_to_pooled() {
        let annual = [(9.5, 10.0), (2.5, 10.0)];
        assert_relative_eq!(bfi_from_annual(&annual), 0.6);
    }

    #[test]
    fn calendar_years_group_days() {
        let q = [2.0, 2.0, 4.0, 4.0, 4.0];
        let b = [1.0, 1.0, 1.0, 2.0, 3.0];
        let years = [2000, 2000, 2001, 2001, 2001];
        let annual = annual_means(&q, &b, Some(&years[..]));
        assert_eq!(annual, vec![(1.0, 2.0), (2.0, 4.0)]);
    }

    #[test]
    fn incomplete_year_is_dropped() {
        let q = vec![1.0; 400];
        let b = vec![0.5; 400];
        assert_eq!(annual_means(&q, &b, None).len(), 1);
    }

    #[test]
    fn maximum_bfi_of_slow_recession() {
        let k: f64 = 0.999;
        let q = vec![10.0; 365];
        let mut lh = vec![0.0; 365];
        lh[364] = 1.0;
        // b[364 - j] = k^-j, a geometric sum over one year
        let r = 1.0 / k;
        let expected = (r.powi(365) - 1.0) / (r - 1.0) / 365.0 / 10.0;
        let bfi = maximum_bfi(&q, &lh, k, None).unwrap();
        assert_relative_eq!(bfi, expected, epsilon = 1e-9);
        assert!(bfi < BFI_MAX_CEILING);
    }

    #[test]
    fn maximum_bfi_validates_inputs() {
        assert_eq!(maximum_bfi(&[], &[], 0.9, None), Err(BaseflowError::EmptySeries));
        assert!(maximum_bfi(&[1.0, 2.0], &[1.0], 0.9, None).is_err());
        assert!(maximum_bfi(&[1.0], &[1.0], 0.9, Some(&[2000, 2001])).is_err());
        assert!(maximum_bfi(&[1.0], &[1.0], 1.5, None).is_err());
    }
}
