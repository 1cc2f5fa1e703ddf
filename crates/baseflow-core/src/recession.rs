//! Recession coefficient estimation.
//!
//! Fits the exponential decay `Q[t+1] = k Q[t]` from strict-baseflow days.
//! Each candidate day gives a decline rate `dQ/Q` from the central
//! difference. Rates are ranked from the gentlest decline and the one at the
//! 5% rank is used, which trims the few near-flat outliers instead of taking
//! the single extreme.
use crate::constants::RECESSION_RANK;
use crate::error::{BaseflowError, Result};

/// Estimate the recession coefficient `k` in `(0, 1)`.
///
/// Candidates are interior days with `strict[i]` set and, when an ice mask is
/// given, `ice[i]` unset.
///
/// # Errors
///
/// `LengthMismatch` if a mask does not match the series, and
/// `InsufficientRecession` if no candidate day is left.
pub fn recession_coefficient(
    discharge: &[f64],
    strict: &[bool],
    ice: Option<&[bool]>,
) -> Result<f64> {
    let n = discharge.len();
    if strict.len() != n {
        return Err(BaseflowError::LengthMismatch {
            expected: n,
            actual: strict.len(),
        });
    }
    if let Some(ice) = ice {
        if ice.len() != n {
            return Err(BaseflowError::LengthMismatch {
                expected: n,
                actual: ice.len(),
            });
        }
    }

    // (dQ, cQ) per candidate day
    let mut candidates: Vec<(f64, f64)> = (1..n.saturating_sub(1))
        .filter(|&i| strict[i] && !ice.is_some_and(|ice| ice[i]))
        .map(|i| ((discharge[i + 1] - discharge[i - 1]) / 2.0, discharge[i]))
        .collect();

    if candidates.is_empty() {
        return Err(BaseflowError::InsufficientRecession { candidates: 0 });
    }

    candidates.sort_by(|a, b| (b.0 / b.1).total_cmp(&(a.0 / a.1)));
    let rank = (candidates.len() as f64 * RECESSION_RANK).floor() as usize;
    let (dq, cq) = candidates[rank.min(candidates.len() - 1)];

    let recession_constant = -cq / dq;
    let k = (-1.0 / recession_constant).exp();
    log::info!(
        "recession coefficient k = {k:.4} from {} candidate days",
        candidates.len()
    );
    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strict::strict_baseflow;
    use approx::assert_relative_eq;

    fn geometric(n: usize, ratio: f64) -> Vec<f64> {
        (0..n).map(|i| 100.0 * ratio.powi(i as i32)).collect()
    }

    #[test]
    fn recovers_decay_of_geometric_recession() {
        let q = geometric(30, 0.9);
        let strict = strict_baseflow(&q);
        let k = recession_coefficient(&q, &strict, None).unwrap();
        // Every day has dQ/Q = (0.9 - 1/0.9) / 2.
        assert_relative_eq!(k, ((0.9 - 1.0 / 0.9) / 2.0f64).exp(), epsilon = 1e-12);
        assert!(k > 0.0 && k < 1.0);
    }

    #[test]
    fn picks_gentlest_decline_at_low_rank() {
        let q = [10.0, 9.0, 7.0, 6.0, 4.0, 3.5, 3.0];
        let strict = [false, true, true, true, true, true, false];
        // Day 5: dQ = -0.5, Q = 3.5
        let k = recession_coefficient(&q, &strict, None).unwrap();
        assert_relative_eq!(k, (-0.5f64 / 3.5).exp(), epsilon = 1e-12);
    }

    #[test]
    fn series_endpoints_are_never_candidates() {
        let q = [10.0, 9.0, 7.0];
        let strict = [true, false, true];
        let err = recession_coefficient(&q, &strict, None).unwrap_err();
        assert_eq!(err, BaseflowError::InsufficientRecession { candidates: 0 });
    }

    #[test]
    fn ice_days_are_excluded() {
        let q = [10.0, 9.0, 7.0, 6.0, 4.0, 3.5, 3.0];
        let strict = [false, true, true, true, true, true, false];
        let mut ice = [false; 7];
        ice[5] = true;
        // Day 1 is now the gentlest: dQ = -1.5, Q = 9
        let k = recession_coefficient(&q, &strict, Some(&ice[..])).unwrap();
        assert_relative_eq!(k, (-1.5f64 / 9.0).exp(), epsilon = 1e-12);

        let all_ice = [true; 7];
        assert!(recession_coefficient(&q, &strict, Some(&all_ice)).is_err());
    }

    #[test]
    fn rejects_mismatched_masks() {
        let q = [3.0, 2.0, 1.0];
        assert_eq!(
            recession_coefficient(&q, &[true], None),
            Err(BaseflowError::LengthMismatch {
                expected: 3,
                actual: 1
            })
        );
        assert!(recession_coefficient(&q, &[false; 3], Some(&[false; 2])).is_err());
    }
}
