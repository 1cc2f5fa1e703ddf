/// One-pole digital baseflow filters.
///
/// Each filter stores its recurrence coefficients, precomputed from the
/// recession coefficient `k` and its shape parameter, and implements
/// [`RecursiveFilter::step`]. Seeding, clipping and exceedance counting come
/// from the trait's default `run`.
///
/// `new` validates parameters; `new_unchecked` is for calibration sweeps
/// where the grid is already known to be in range.
use crate::error::{BaseflowError, Result};
use crate::traits::RecursiveFilter;

fn check_open_unit(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(BaseflowError::InvalidParameter {
            name,
            value,
            reason: "must lie in (0, 1)",
        })
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(BaseflowError::InvalidParameter {
            name,
            value,
            reason: "must be positive and finite",
        })
    }
}

/// Chapman (1991): `b[i] = (3k-1)/(3-k) b[i-1] + (1-k)/(3-k) (Q[i] + Q[i-1])`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chapman {
    alpha: f64,
    beta: f64,
}

impl Chapman {
    pub fn new(k: f64) -> Result<Self> {
        check_open_unit("k", k)?;
        Ok(Self::new_unchecked(k))
    }

    pub fn new_unchecked(k: f64) -> Self {
        Self {
            alpha: (3.0 * k - 1.0) / (3.0 - k),
            beta: (1.0 - k) / (3.0 - k),
        }
    }
}

impl RecursiveFilter for Chapman {
    fn step(&self, prev_baseflow: f64, prev_discharge: f64, discharge: f64) -> f64 {
        self.alpha * prev_baseflow + self.beta * (discharge + prev_discharge)
    }
}

/// Chapman & Maxwell (1996): `b[i] = k/(2-k) b[i-1] + (1-k)/(2-k) Q[i]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChapmanMaxwell {
    alpha: f64,
    beta: f64,
}

impl ChapmanMaxwell {
    pub fn new(k: f64) -> Result<Self> {
        check_open_unit("k", k)?;
        Ok(Self::new_unchecked(k))
    }

    pub fn new_unchecked(k: f64) -> Self {
        Self {
            alpha: k / (2.0 - k),
            beta: (1.0 - k) / (2.0 - k),
        }
    }
}

impl RecursiveFilter for ChapmanMaxwell {
    fn step(&self, prev_baseflow: f64, _prev_discharge: f64, discharge: f64) -> f64 {
        self.alpha * prev_baseflow + self.beta * discharge
    }
}

/// Boughton two-parameter filter (Boughton, 2004).
///
/// `b[i] = k/(1+C) b[i-1] + C/(1+C) Q[i]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boughton {
    alpha: f64,
    beta: f64,
}

impl Boughton {
    pub fn new(k: f64, c: f64) -> Result<Self> {
        check_open_unit("k", k)?;
        check_positive("C", c)?;
        Ok(Self::new_unchecked(k, c))
    }

    pub fn new_unchecked(k: f64, c: f64) -> Self {
        Self {
            alpha: k / (1.0 + c),
            beta: c / (1.0 + c),
        }
    }
}

impl RecursiveFilter for Boughton {
    fn step(&self, prev_baseflow: f64, _prev_discharge: f64, discharge: f64) -> f64 {
        self.alpha * prev_baseflow + self.beta * discharge
    }
}

/// Eckhardt (2005) filter with maximum baseflow index `BFImax`.
///
/// `b[i] = ((1-BFImax) k b[i-1] + (1-k) BFImax Q[i]) / (1 - k BFImax)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Eckhardt {
    alpha: f64,
    beta: f64,
}

impl Eckhardt {
    pub fn new(k: f64, bfi_max: f64) -> Result<Self> {
        check_open_unit("k", k)?;
        check_open_unit("bfi_max", bfi_max)?;
        Ok(Self::new_unchecked(k, bfi_max))
    }

    pub fn new_unchecked(k: f64, bfi_max: f64) -> Self {
        let denom = 1.0 - k * bfi_max;
        Self {
            alpha: (1.0 - bfi_max) * k / denom,
            beta: (1.0 - k) * bfi_max / denom,
        }
    }
}

impl RecursiveFilter for Eckhardt {
    fn step(&self, prev_baseflow: f64, _prev_discharge: f64, discharge: f64) -> f64 {
        self.alpha * prev_baseflow + self.beta * discharge
    }
}

/// Exponentially weighted moving average (Tularam & Ilahee, 2008).
///
/// `b[i] = (1-e) b[i-1] + e Q[i]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ewma {
    e: f64,
}

impl Ewma {
    pub fn new(e: f64) -> Result<Self> {
        if !(e > 0.0 && e <= 1.0) {
            return Err(BaseflowError::InvalidParameter {
                name: "e",
                value: e,
                reason: "must lie in (0, 1]",
            });
        }
        Ok(Self::new_unchecked(e))
    }

    pub fn new_unchecked(e: f64) -> Self {
        Self { e }
    }
}

impl RecursiveFilter for Ewma {
    fn step(&self, prev_baseflow: f64, _prev_discharge: f64, discharge: f64) -> f64 {
        (1.0 - self.e) * prev_baseflow + self.e * discharge
    }
}

/// Furey & Gupta (2001) filter.
///
/// Driven by the previous day's quickflow rather than today's discharge:
/// `b[i] = k b[i-1] + (1-k) c3/c1 (Q[i-1] - b[i-1])`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Furey {
    k: f64,
    gain: f64,
}

impl Furey {
    pub fn new(k: f64, c3c1: f64) -> Result<Self> {
        check_open_unit("k", k)?;
        check_positive("c3c1", c3c1)?;
        Ok(Self::new_unchecked(k, c3c1))
    }

    pub fn new_unchecked(k: f64, c3c1: f64) -> Self {
        Self {
            k,
            gain: (1.0 - k) * c3c1,
        }
    }
}

impl RecursiveFilter for Furey {
    fn step(&self, prev_baseflow: f64, prev_discharge: f64, _discharge: f64) -> f64 {
        self.k * prev_baseflow + self.gain * (prev_discharge - prev_baseflow)
    }
}

/// Willems (2009) filter with average quickflow proportion `w`.
///
/// With `v = (1-w)(1-k) / (2w)`:
/// `b[i] = (k-v)/(1+v) b[i-1] + v/(1+v) (Q[i] + Q[i-1])`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Willems {
    alpha: f64,
    beta: f64,
}

impl Willems {
    pub fn new(k: f64, w: f64) -> Result<Self> {
        check_open_unit("k", k)?;
        if !(w > 0.0 && w <= 1.0) {
            return Err(BaseflowError::InvalidParameter {
                name: "w",
                value: w,
                reason: "must lie in (0, 1]",
            });
        }
        Ok(Self::new_unchecked(k, w))
    }

    pub fn new_unchecked(k: f64, w: f64) -> Self {
        let v = (1.0 - w) * (1.0 - k) / (2.0 * w);
        Self {
            alpha: (k - v) / (1.0 + v),
            beta: v / (1.0 + v),
        }
    }
}

impl RecursiveFilter for Willems {
    fn step(&self, prev_baseflow: f64, prev_discharge: f64, discharge: f64) -> f64 {
        self.alpha * prev_baseflow + self.beta * (discharge + prev_discharge)
    }
}

/// IHACRES three-parameter filter (Jakeman & Hornberger, 1993).
///
/// `b[i] = k/(1+C) b[i-1] + C/(1+C) (Q[i] + a Q[i-1])`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ihacres {
    alpha: f64,
    beta: f64,
    a: f64,
}

impl Ihacres {
    pub fn new(k: f64, c: f64, a: f64) -> Result<Self> {
        check_open_unit("k", k)?;
        check_positive("C", c)?;
        if !a.is_finite() {
            return Err(BaseflowError::InvalidParameter {
                name: "a",
                value: a,
                reason: "must be finite",
            });
        }
        Ok(Self::new_unchecked(k, c, a))
    }

    pub fn new_unchecked(k: f64, c: f64, a: f64) -> Self {
        Self {
            alpha: k / (1.0 + c),
            beta: c / (1.0 + c),
            a,
        }
    }
}

impl RecursiveFilter for Ihacres {
    fn step(&self, prev_baseflow: f64, prev_discharge: f64, discharge: f64) -> f64 {
        self.alpha * prev_baseflow + self.beta * (discharge + self.a * prev_discharge)
    }
}
