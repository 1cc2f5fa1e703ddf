//! Grid-search calibration of filter parameters.
//!
//! The loss compares `ln(1 + Q)` with `ln(1 + b)` separately over recession
//! periods and over all other days:
//!
//! `loss = 1 - (1 - (1 - NSE_rec) / (1 - NSE_oth)) * (1 - exceedance_fraction)`
//!
//! A parameter scores well when baseflow tracks discharge on the tail of long
//! recessions, much better than elsewhere, without clipping often.
use crate::constants::{
    ParamGrid, MIN_RECESSION_DAYS, RECESSION_HEAD_FRACTION, RECESSION_SMOOTHING_DAYS,
};
use crate::error::{BaseflowError, Result};
use crate::metrics::nse;
use crate::strict::true_runs;
use crate::traits::FilterOutput;

/// Moving average: element `j` is the mean of `x[j..j + w]`.
fn moving_average(x: &[f64], w: usize) -> Vec<f64> {
    x.windows(w).map(|win| win.iter().sum::<f64>() / w as f64).collect()
}

/// Day indices belonging to the tail of long recession periods.
///
/// A recession period is a run of at least 10 days over which the 3-day
/// moving average strictly declines. The first 60% of each period is
/// discarded.
pub fn recession_period(discharge: &[f64]) -> Vec<usize> {
    let n = discharge.len();
    if n < RECESSION_SMOOTHING_DAYS + 1 {
        return Vec::new();
    }

    let q_ave = moving_average(discharge, RECESSION_SMOOTHING_DAYS);
    let mut declining = vec![false; n - 1];
    for (j, w) in q_ave.windows(2).enumerate() {
        declining[j + 1] = w[0] > w[1];
    }
    // The last flag stays false so every run is closed.
    declining[n - 2] = false;

    let mut indices = Vec::new();
    for (beg, end) in true_runs(&declining) {
        let duration = end - beg;
        if duration < MIN_RECESSION_DAYS {
            continue;
        }
        let head = (duration as f64 * RECESSION_HEAD_FRACTION).ceil() as usize;
        indices.extend(beg + head..end);
    }
    indices
}

/// Calibration state shared by every grid point of one discharge series.
#[derive(Debug, Clone)]
pub struct Calibrator {
    recession: Vec<bool>,
    log_rec: Vec<f64>,
    log_oth: Vec<f64>,
}

impl Calibrator {
    pub fn new(discharge: &[f64]) -> Self {
        let mut recession = vec![false; discharge.len()];
        for i in recession_period(discharge) {
            recession[i] = true;
        }
        if !recession.iter().any(|&r| r) {
            log::warn!(
                "no recession period found; calibration loss reduces to the exceedance rate"
            );
        }

        let (log_rec, log_oth) = split_log(discharge, &recession);
        Self {
            recession,
            log_rec,
            log_oth,
        }
    }

    /// Days treated as recession days by the loss.
    pub fn recession_mask(&self) -> &[bool] {
        &self.recession
    }

    /// Loss of one filter run. Lower is better.
    pub fn loss(&self, output: &FilterOutput) -> f64 {
        let (b_rec, b_oth) = split_log(&output.baseflow, &self.recession);
        let nse_rec = nse(&self.log_rec, &b_rec);
        let nse_oth = nse(&self.log_oth, &b_oth);
        1.0 - (1.0 - (1.0 - nse_rec) / (1.0 - nse_oth)) * (1.0 - output.exceedance_fraction())
    }

    /// Grid value with the smallest loss.
    ///
    /// Ties go to the earliest grid value. Non-finite losses never win; if no
    /// loss is finite the first grid value is returned.
    pub fn calibrate<F>(&self, grid: ParamGrid, filter: F) -> Result<f64>
    where
        F: Fn(f64) -> FilterOutput,
    {
        if grid.is_empty() {
            return Err(BaseflowError::EmptyGrid);
        }

        let mut best = (grid.value(0), f64::INFINITY);
        for p in grid.iter() {
            let loss = self.loss(&filter(p));
            if loss.is_finite() && loss < best.1 {
                best = (p, loss);
            }
        }

        log::debug!("calibrated parameter {:.4} (loss {:.6})", best.0, best.1);
        Ok(best.0)
    }
}

/// `ln(1 + x)` split into recession and other days.
fn split_log(values: &[f64], recession: &[bool]) -> (Vec<f64>, Vec<f64>) {
    let mut rec = Vec::new();
    let mut oth = Vec::new();
    for (&v, &r) in values.iter().zip(recession) {
        if r {
            rec.push(v.ln_1p());
        } else {
            oth.push(v.ln_1p());
        }
    }
    (rec, oth)
}

/// One-shot calibration of `filter` over `grid` for a discharge series.
pub fn calibrate<F>(grid: ParamGrid, discharge: &[f64], filter: F) -> Result<f64>
where
    F: Fn(f64) -> FilterOutput,
{
    Calibrator::new(discharge).calibrate(grid, filter)
}
