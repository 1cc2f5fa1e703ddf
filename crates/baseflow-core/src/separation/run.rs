/// Separation orchestrator.
///
/// Computes the shared inputs once (strict-baseflow mask, recession
/// coefficient, Lyne-Hollick baseflow, calibration split), then runs each
/// requested method and scores it.
use super::config::SeparationConfig;
use super::method::Method;
use super::result::{MethodOutput, ResolvedParams, SeparationResult};
use crate::bfi::baseflow_index;
use crate::calibrate::Calibrator;
use crate::constants::{
    ParamGrid, BOUGHTON_C_GRID, ECKHARDT_BFI_MAX_GRID, EWMA_E_GRID, FUREY_C3C1_GRID,
    IHACRES_C_GRID, WILLEMS_W_GRID,
};
use crate::error::{BaseflowError, Result};
use crate::filters::{
    Boughton, Chapman, ChapmanMaxwell, Eckhardt, Ewma, Furey, Ihacres, LyneHollick, Willems,
};
use crate::interval::{five_day, fixed, interval_width, local, slide, ukih};
use crate::metrics::kge;
use crate::recession::recession_coefficient;
use crate::series::Discharge;
use crate::strict::strict_baseflow;
use crate::traits::{FilterOutput, RecursiveFilter};

/// Shared state of one separation call.
struct Separator<'a> {
    q: &'a [f64],
    config: &'a SeparationConfig,
    strict: Vec<bool>,
    ice: Option<Vec<bool>>,
    lh: FilterOutput,
    calibrator: Option<Calibrator>,
    params: ResolvedParams,
}

impl<'a> Separator<'a> {
    fn new(q: &'a [f64], config: &'a SeparationConfig, methods: &[Method]) -> Result<Self> {
        let ice = match (&config.ice_period, &config.dates) {
            (None, _) => None,
            (Some(_), None) => return Err(BaseflowError::MissingCalendar),
            (Some(period), Some(dates)) => {
                if dates.len() != q.len() {
                    return Err(BaseflowError::LengthMismatch {
                        expected: q.len(),
                        actual: dates.len(),
                    });
                }
                Some(period.mask(dates))
            }
        };

        let lh_filter = LyneHollick::new(config.lh_beta)?;
        let lh = if methods.iter().any(|m| m.needs_lh()) {
            lh_filter.separate(q)
        } else {
            FilterOutput::with_capacity(0)
        };

        Ok(Self {
            q,
            config,
            strict: strict_baseflow(q),
            ice,
            lh,
            calibrator: None,
            params: ResolvedParams::default(),
        })
    }

    /// Recession coefficient, estimated on first use.
    fn k(&mut self) -> Result<f64> {
        if let Some(k) = self.params.k {
            return Ok(k);
        }
        let k = match self.config.k {
            Some(k) if k > 0.0 && k < 1.0 => k,
            Some(k) => {
                return Err(BaseflowError::InvalidParameter {
                    name: "k",
                    value: k,
                    reason: "must lie in (0, 1)",
                })
            }
            None => recession_coefficient(self.q, &self.strict, self.ice.as_deref())?,
        };
        self.params.k = Some(k);
        Ok(k)
    }

    fn seed(&self) -> f64 {
        self.lh.baseflow.first().copied().unwrap_or_default()
    }

    /// A supplied parameter, or the calibrated one when absent.
    fn resolve<F>(&mut self, supplied: Option<f64>, grid: ParamGrid, filter: F) -> Result<f64>
    where
        F: Fn(f64) -> FilterOutput,
    {
        match supplied {
            Some(p) => Ok(p),
            None => {
                let q = self.q;
                self.calibrator
                    .get_or_insert_with(|| Calibrator::new(q))
                    .calibrate(grid, filter)
            }
        }
    }

    fn width(&mut self) -> usize {
        let width = interval_width(self.config.area_km2, self.config.num_days);
        self.params.interval_width = Some(width);
        width
    }

    fn baseflow(&mut self, method: Method) -> Result<Vec<f64>> {
        let q = self.q;
        let seed = self.seed();
        let baseflow = match method {
            Method::Ukih => ukih(q, &self.lh.baseflow),
            Method::Local => {
                let width = self.width();
                local(q, &self.lh.baseflow, width)
            }
            Method::Fixed => fixed(q, self.width()),
            Method::Slide => slide(q, self.width()),
            Method::Lh => self.lh.baseflow.clone(),
            Method::Chapman => Chapman::new(self.k()?)?.run(q, seed).baseflow,
            Method::Cm => ChapmanMaxwell::new(self.k()?)?.run(q, seed).baseflow,
            Method::Boughton => {
                let k = self.k()?;
                let c = self.resolve(self.config.boughton_c, BOUGHTON_C_GRID, |p| {
                    Boughton::new_unchecked(k, p).run(q, seed)
                })?;
                self.params.boughton_c = Some(c);
                Boughton::new(k, c)?.run(q, seed).baseflow
            }
            Method::Furey => {
                let k = self.k()?;
                let c3c1 = self.resolve(self.config.c3c1, FUREY_C3C1_GRID, |p| {
                    Furey::new_unchecked(k, p).run(q, seed)
                })?;
                self.params.c3c1 = Some(c3c1);
                Furey::new(k, c3c1)?.run(q, seed).baseflow
            }
            Method::Eckhardt => {
                let k = self.k()?;
                let bfi_max = self.resolve(self.config.bfi_max, ECKHARDT_BFI_MAX_GRID, |p| {
                    Eckhardt::new_unchecked(k, p).run(q, seed)
                })?;
                self.params.bfi_max = Some(bfi_max);
                Eckhardt::new(k, bfi_max)?.run(q, seed).baseflow
            }
            Method::Ewma => {
                let e = self.resolve(self.config.ewma_e, EWMA_E_GRID, |p| {
                    Ewma::new_unchecked(p).run(q, seed)
                })?;
                self.params.ewma_e = Some(e);
                Ewma::new(e)?.run(q, seed).baseflow
            }
            Method::Willems => {
                let k = self.k()?;
                let w = self.resolve(self.config.willems_w, WILLEMS_W_GRID, |p| {
                    Willems::new_unchecked(k, p).run(q, seed)
                })?;
                self.params.willems_w = Some(w);
                Willems::new(k, w)?.run(q, seed).baseflow
            }
            Method::Ihacres => {
                let k = self.k()?;
                let a = self.config.ihacres_a;
                let q0 = q[0];
                let c = self.resolve(self.config.ihacres_c, IHACRES_C_GRID, |p| {
                    Ihacres::new_unchecked(k, p, a).run(q, q0)
                })?;
                self.params.ihacres_c = Some(c);
                Ihacres::new(k, c, a)?.run(q, q0).baseflow
            }
            Method::Strict => q
                .iter()
                .zip(&self.strict)
                .map(|(&v, &s)| if s { v } else { 0.0 })
                .collect(),
            Method::FiveDay => five_day(q),
        };
        Ok(baseflow)
    }

    /// KGE of baseflow against discharge over strict-baseflow days.
    fn score(&self, baseflow: &[f64]) -> f64 {
        let (obs, sim): (Vec<f64>, Vec<f64>) = self
            .q
            .iter()
            .zip(baseflow)
            .zip(&self.strict)
            .filter(|(_, s)| **s)
            .map(|((&q, &b), _)| (q, b))
            .unzip();
        kge(&obs, &sim)
    }
}

/// Run every configured method over a discharge series.
///
/// Duplicate methods are run once. The recession coefficient is estimated
/// only if a recession-driven method is requested and `k` is not supplied.
///
/// # Errors
///
/// Invalid supplied parameters, an ice period without dates or with dates of
/// the wrong length, and a recession estimate with no candidate days.
pub fn separate(discharge: &Discharge, config: &SeparationConfig) -> Result<SeparationResult> {
    let q = discharge.as_slice();

    let mut methods: Vec<Method> = Vec::with_capacity(config.methods.len());
    for &m in &config.methods {
        if !methods.contains(&m) {
            methods.push(m);
        }
    }

    let mut separator = Separator::new(q, config, &methods)?;
    let mut outputs = Vec::with_capacity(methods.len());
    for method in methods {
        log::debug!("running {method}");
        let baseflow = separator.baseflow(method)?;
        let kge = separator.score(&baseflow);
        let bfi = baseflow_index(q, &baseflow);
        log::debug!("{method}: KGE {kge:.4}, BFI {bfi:.4}");
        outputs.push(MethodOutput {
            method,
            baseflow,
            kge,
            bfi,
        });
    }

    Ok(SeparationResult {
        strict: separator.strict,
        params: separator.params,
        outputs,
    })
}
