/// Options for a separation run.
///
/// Every free parameter left as `None` is resolved from the data: `k` by the
/// recession estimator, the filter shape parameters by grid-search
/// calibration against that series.
use super::method::Method;
use crate::constants::{IHACRES_A_DEFAULT, LH_BETA_DEFAULT};
use crate::series::{IcePeriod, MonthDay};

#[derive(Debug, Clone, PartialEq)]
pub struct SeparationConfig {
    /// Methods to run, in output order.
    pub methods: Vec<Method>,
    /// Lyne-Hollick filter parameter.
    pub lh_beta: f64,
    /// Drainage area [km2] for the HYSEP interval width.
    pub area_km2: Option<f64>,
    /// Surface runoff duration [days]; overrides `area_km2`.
    pub num_days: Option<f64>,
    /// Calendar window excluded from recession estimation.
    pub ice_period: Option<IcePeriod>,
    /// Month and day of every observation. Required with `ice_period`.
    pub dates: Option<Vec<MonthDay>>,
    /// Recession coefficient.
    pub k: Option<f64>,
    pub boughton_c: Option<f64>,
    pub ihacres_c: Option<f64>,
    pub ihacres_a: f64,
    /// Eckhardt maximum baseflow index.
    pub bfi_max: Option<f64>,
    /// Furey ratio `c3/c1`.
    pub c3c1: Option<f64>,
    pub ewma_e: Option<f64>,
    /// Willems quickflow proportion.
    pub willems_w: Option<f64>,
}

impl Default for SeparationConfig {
    fn default() -> Self {
        Self {
            methods: Method::ALL.to_vec(),
            lh_beta: LH_BETA_DEFAULT,
            area_km2: None,
            num_days: None,
            ice_period: None,
            dates: None,
            k: None,
            boughton_c: None,
            ihacres_c: None,
            ihacres_a: IHACRES_A_DEFAULT,
            bfi_max: None,
            c3c1: None,
            ewma_e: None,
            willems_w: None,
        }
    }
}

impl SeparationConfig {
    pub fn with_methods(mut self, methods: impl IntoIterator<Item = Method>) -> Self {
        self.methods = methods.into_iter().collect();
        self
    }

    pub fn with_lh_beta(mut self, beta: f64) -> Self {
        self.lh_beta = beta;
        self
    }

    pub fn with_area_km2(mut self, area: f64) -> Self {
        self.area_km2 = Some(area);
        self
    }

    pub fn with_num_days(mut self, days: f64) -> Self {
        self.num_days = Some(days);
        self
    }

    /// Exclude an ice window; `dates` gives the month and day of every
    /// observation.
    pub fn with_ice_period(mut self, period: IcePeriod, dates: Vec<MonthDay>) -> Self {
        self.ice_period = Some(period);
        self.dates = Some(dates);
        self
    }

    pub fn with_k(mut self, k: f64) -> Self {
        self.k = Some(k);
        self
    }

    pub fn with_boughton_c(mut self, c: f64) -> Self {
        self.boughton_c = Some(c);
        self
    }

    pub fn with_ihacres(mut self, c: Option<f64>, a: f64) -> Self {
        self.ihacres_c = c;
        self.ihacres_a = a;
        self
    }

    pub fn with_bfi_max(mut self, bfi_max: f64) -> Self {
        self.bfi_max = Some(bfi_max);
        self
    }

    pub fn with_c3c1(mut self, c3c1: f64) -> Self {
        self.c3c1 = Some(c3c1);
        self
    }

    pub fn with_ewma_e(mut self, e: f64) -> Self {
        self.ewma_e = Some(e);
        self
    }

    pub fn with_willems_w(mut self, w: f64) -> Self {
        self.willems_w = Some(w);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_runs_every_method_with_free_parameters() {
        let cfg = SeparationConfig::default();
        assert_eq!(cfg.methods.len(), 15);
        assert_eq!(cfg.lh_beta, LH_BETA_DEFAULT);
        assert_eq!(cfg.ihacres_a, 0.0);
        assert!(cfg.k.is_none() && cfg.boughton_c.is_none() && cfg.bfi_max.is_none());
    }

    #[test]
    fn builder_sets_fields() {
        let cfg = SeparationConfig::default()
            .with_methods([Method::Lh, Method::Eckhardt])
            .with_k(0.95)
            .with_bfi_max(0.8)
            .with_num_days(3.0);
        assert_eq!(cfg.methods, vec![Method::Lh, Method::Eckhardt]);
        assert_eq!(cfg.k, Some(0.95));
        assert_eq!(cfg.bfi_max, Some(0.8));
        assert_eq!(cfg.num_days, Some(3.0));
    }
}
