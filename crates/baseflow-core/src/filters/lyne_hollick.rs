/// Lyne-Hollick two-pass digital filter (Lyne & Hollick, 1979).
///
/// The forward pass is a regular one-pole recurrence seeded with `Q[0] / 2`.
/// The backward pass re-filters the forward output from the last day towards
/// the first. The passes are independent: the backward pass reads the forward
/// series and writes a fresh buffer, each clipping against discharge.
use crate::constants::LH_BETA_DEFAULT;
use crate::error::{BaseflowError, Result};
use crate::traits::{FilterOutput, RecursiveFilter};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LyneHollick {
    beta: f64,
    half_gain: f64,
}

impl Default for LyneHollick {
    fn default() -> Self {
        Self::new_unchecked(LH_BETA_DEFAULT)
    }
}

impl LyneHollick {
    /// Create the filter, requiring `0 < beta < 1`.
    pub fn new(beta: f64) -> Result<Self> {
        if !(beta > 0.0 && beta < 1.0) {
            return Err(BaseflowError::InvalidParameter {
                name: "beta",
                value: beta,
                reason: "must lie in (0, 1)",
            });
        }
        Ok(Self::new_unchecked(beta))
    }

    pub fn new_unchecked(beta: f64) -> Self {
        Self {
            beta,
            half_gain: (1.0 - beta) / 2.0,
        }
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Forward pass, seeded with half the first day's discharge.
    pub fn forward_pass(&self, discharge: &[f64]) -> FilterOutput {
        let seed = discharge.first().map_or(0.0, |q| q / 2.0);
        self.run(discharge, seed)
    }

    /// Backward pass over a forward-pass series.
    ///
    /// The last day keeps its forward value; every earlier day is
    /// `beta * b[i+1] + (1 - beta) / 2 * (f[i+1] + f[i])`.
    ///
    /// # Panics
    ///
    /// If `forward` and `discharge` differ in length.
    pub(crate) fn backward_pass(&self, discharge: &[f64], forward: &[f64]) -> FilterOutput {
        let n = discharge.len();
        assert_eq!(n, forward.len(), "discharge and forward pass must have the same length");

        let mut baseflow = vec![0.0; n];
        let mut exceedances = 0;
        let Some(&last) = forward.last() else {
            return FilterOutput {
                baseflow,
                exceedances,
            };
        };
        baseflow[n - 1] = last;

        for i in (0..n - 1).rev() {
            let b = self.beta * baseflow[i + 1] + self.half_gain * (forward[i + 1] + forward[i]);
            baseflow[i] = if b > discharge[i] {
                exceedances += 1;
                discharge[i]
            } else {
                b
            };
        }

        FilterOutput {
            baseflow,
            exceedances,
        }
    }

    /// Both passes. Exceedances are summed over the two passes.
    pub fn separate(&self, discharge: &[f64]) -> FilterOutput {
        let forward = self.forward_pass(discharge);
        let mut backward = self.backward_pass(discharge, &forward.baseflow);
        backward.exceedances += forward.exceedances;
        backward
    }
}

impl RecursiveFilter for LyneHollick {
    fn step(&self, prev_baseflow: f64, prev_discharge: f64, discharge: f64) -> f64 {
        self.beta * prev_baseflow + self.half_gain * (prev_discharge + discharge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_out_of_range_beta() {
        assert!(LyneHollick::new(0.0).is_err());
        assert!(LyneHollick::new(1.0).is_err());
        assert!(LyneHollick::new(f64::NAN).is_err());
        assert!(LyneHollick::new(0.925).is_ok());
    }

    #[test]
    fn forward_pass_known_values() {
        // beta = 0.5: b0 = 5, b1 = 2.5 + 0.25 * 18 = 7 (< 8), b2 = 3.5 + 0.25 * 14 = 7 > 6 -> 6
        let lh = LyneHollick::new(0.5).unwrap();
        let out = lh.forward_pass(&[10.0, 8.0, 6.0]);
        assert_relative_eq!(out.baseflow[0], 5.0);
        assert_relative_eq!(out.baseflow[1], 7.0);
        assert_relative_eq!(out.baseflow[2], 6.0);
        assert_eq!(out.exceedances, 1);
    }

    #[test]
    fn backward_pass_known_values() {
        // f = [5, 7, 6]; b2 = 6; b1 = 3 + 0.25 * 13 = 6.25; b0 = 3.125 + 0.25 * 12 = 6.125
        let lh = LyneHollick::new(0.5).unwrap();
        let q = [10.0, 8.0, 6.0];
        let out = lh.backward_pass(&q, &[5.0, 7.0, 6.0]);
        assert_relative_eq!(out.baseflow[2], 6.0);
        assert_relative_eq!(out.baseflow[1], 6.25);
        assert_relative_eq!(out.baseflow[0], 6.125);
        assert_eq!(out.exceedances, 0);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn backward_pass_rejects_mismatched_forward() {
        LyneHollick::default().backward_pass(&[3.0, 2.0], &[1.0]);
    }

    #[test]
    fn separate_sums_exceedances_of_both_passes() {
        let lh = LyneHollick::new(0.5).unwrap();
        let q = [10.0, 8.0, 6.0];
        let out = lh.separate(&q);
        assert_eq!(out.exceedances, 1);
        assert_eq!(out.baseflow, vec![6.125, 6.25, 6.0]);
    }

    #[test]
    fn single_day_series() {
        let out = LyneHollick::default().separate(&[4.0]);
        assert_eq!(out.baseflow, vec![2.0]);
        assert_eq!(out.exceedances, 0);
    }

    #[test]
    fn baseflow_never_exceeds_discharge() {
        let q = [1.0, 50.0, 3.0, 2.0, 80.0, 60.0, 5.0, 4.0, 3.5, 3.0];
        let out = LyneHollick::default().separate(&q);
        assert_eq!(out.len(), q.len());
        for (b, q) in out.baseflow.iter().zip(q) {
            assert!(b <= &q);
        }
    }
}
