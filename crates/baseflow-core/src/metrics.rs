//! Goodness-of-fit metrics used for calibration and scoring.
//!
//! All metrics take observed and simulated slices and return a scalar score.
//! Denominators carry a small epsilon so degenerate inputs (constant or empty
//! series) yield a defined value instead of a division by zero.

/// Guard added to every metric denominator.
pub const EPSILON: f64 = 1e-10;

/// Mean that is zero for an empty slice.
fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len().max(1) as f64
}

/// Nash-Sutcliffe Efficiency. Range: (-inf, 1], 1 = perfect.
///
/// An empty index set has zero residual and zero variance and scores ~1.
pub fn nse(observed: &[f64], simulated: &[f64]) -> f64 {
    let mean_obs = mean(observed);
    let ss_res: f64 = observed
        .iter()
        .zip(simulated)
        .map(|(o, s)| (o - s).powi(2))
        .sum();
    let ss_tot: f64 = observed.iter().map(|o| (o - mean_obs).powi(2)).sum();
    (1.0 - ss_res / (ss_tot + EPSILON)) - EPSILON
}

/// NSE of `ln(1 + x)` transformed flows.
pub fn log_nse(observed: &[f64], simulated: &[f64]) -> f64 {
    let log_obs: Vec<f64> = observed.iter().map(|o| o.ln_1p()).collect();
    let log_sim: Vec<f64> = simulated.iter().map(|s| s.ln_1p()).collect();
    nse(&log_obs, &log_sim)
}

/// Kling-Gupta Efficiency (Gupta et al., 2009). Range: (-inf, 1], 1 = perfect.
///
/// `r` is the Pearson correlation, `alpha` the ratio of population standard
/// deviations and `beta` the ratio of sums (equivalently of means).
///
/// An empty index set has `r = alpha = beta = 0` and scores `1 - sqrt(3)`.
pub fn kge(observed: &[f64], simulated: &[f64]) -> f64 {
    let n = observed.len().max(1) as f64;
    let mean_o = mean(observed);
    let mean_s = mean(simulated);

    let mut cov = 0.0;
    let mut ss_o = 0.0;
    let mut ss_s = 0.0;
    for (o, s) in observed.iter().zip(simulated) {
        let (d_o, d_s) = (o - mean_o, s - mean_s);
        cov += d_o * d_s;
        ss_o += d_o * d_o;
        ss_s += d_s * d_s;
    }

    let r = cov / ((ss_s * ss_o).sqrt() + EPSILON);
    let alpha = (ss_s / n).sqrt() / ((ss_o / n).sqrt() + EPSILON);
    let beta = simulated.iter().sum::<f64>() / (observed.iter().sum::<f64>() + EPSILON);

    1.0 - ((r - 1.0).powi(2) + (alpha - 1.0).powi(2) + (beta - 1.0).powi(2)).sqrt()
}
