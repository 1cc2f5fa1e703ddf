//! Strict-baseflow classification.
//!
//! Flags the days on which observed discharge can be taken as pure baseflow:
//! days in a sustained, decelerating recession that are away from rising
//! limbs and from the tail of major events. Four exclusion rules are
//! evaluated independently and their union is removed.
use crate::constants::{
    DAYS_AFTER_MAJOR_EVENT, DAYS_AFTER_RISE, DAYS_BEFORE_RISE, MAJOR_EVENT_QUANTILE,
};

/// Half-open `[start, end)` runs of `true` in a boolean sequence.
pub fn true_runs(mask: &[bool]) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, &m) in mask.iter().enumerate() {
        match (m, start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push((s, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, mask.len()));
    }
    runs
}

/// Linear-interpolated quantile of unsorted data (NumPy's default method).
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

/// Central difference `(Q[i+1] - Q[i-1]) / 2` for the interior days `1..n-1`.
fn central_difference(discharge: &[f64]) -> Vec<f64> {
    discharge.windows(3).map(|w| (w[2] - w[0]) / 2.0).collect()
}

/// Rule 1: rising or flat days (`dQ/dt >= 0`). Both endpoints are flagged.
fn rising_days(discharge: &[f64], dq: &[f64]) -> Vec<bool> {
    let n = discharge.len();
    let mut wet = vec![true; n];
    for (i, &d) in dq.iter().enumerate() {
        wet[i + 1] = d >= 0.0;
    }
    wet
}

/// Rule 2: the days just before and after every rising run.
fn around_rising_runs(rising: &[bool]) -> Vec<bool> {
    let n = rising.len();
    let mut wet = vec![false; n];
    for (start, end) in true_runs(rising) {
        if start > 0 {
            for i in start.saturating_sub(DAYS_BEFORE_RISE)..start {
                wet[i] = true;
            }
        }
        if end < n {
            for i in end..(end + DAYS_AFTER_RISE).min(n) {
                wet[i] = true;
            }
        }
    }
    wet
}

/// Rule 3: the days following a peak at or above the major-event quantile.
///
/// A peak is a day reached by a non-decreasing step and left by a decrease.
fn after_major_events(discharge: &[f64]) -> Vec<bool> {
    let n = discharge.len();
    let mut wet = vec![false; n];
    let threshold = quantile(discharge, MAJOR_EVENT_QUANTILE);
    for i in 0..n.saturating_sub(1) {
        let reached = i == 0 || discharge[i] >= discharge[i - 1];
        let left = discharge[i + 1] < discharge[i];
        if discharge[i] >= threshold && reached && left {
            for j in i + 1..=(i + DAYS_AFTER_MAJOR_EVENT).min(n - 1) {
                wet[j] = true;
            }
        }
    }
    wet
}

/// Rule 4: days whose decline is followed by a steeper decline.
///
/// The first day and the last two days are flagged.
fn accelerating_decline(discharge: &[f64], dq: &[f64]) -> Vec<bool> {
    let n = discharge.len();
    let mut wet = vec![true; n];
    for (j, d) in dq.windows(2).enumerate() {
        wet[j + 1] = d[1] < d[0];
    }
    wet
}

/// Classify strict-baseflow days.
///
/// Returns `true` for days that survive every exclusion rule. Series shorter
/// than three days have no interior and are entirely excluded.
pub fn strict_baseflow(discharge: &[f64]) -> Vec<bool> {
    let n = discharge.len();
    if n < 3 {
        return vec![false; n];
    }

    let dq = central_difference(discharge);
    let rule1 = rising_days(discharge, &dq);
    let rule2 = around_rising_runs(&rule1);
    let rule3 = after_major_events(discharge);
    let rule4 = accelerating_decline(discharge, &dq);

    (0..n)
        .map(|i| !(rule1[i] || rule2[i] || rule3[i] || rule4[i]))
        .collect()
}
