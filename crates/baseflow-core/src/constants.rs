/// Baseflow separation numerical constants and calibration grids.
///
/// Centralises the fixed values used by the filters, the graphical methods,
/// the strict-baseflow classifier and the calibrator.

// -- Lyne-Hollick --

/// Filter parameter recommended by Nathan & McMahon (1990).
pub const LH_BETA_DEFAULT: f64 = 0.925;

// -- IHACRES --

/// Weight of the previous day's discharge when `a` is not supplied.
pub const IHACRES_A_DEFAULT: f64 = 0.0;

// -- HYSEP interval methods --

/// Square kilometres to square miles, for the HYSEP `N = A^0.2` relation.
pub const KM2_TO_MI2: f64 = 0.3861022;

/// Surface runoff duration [days] when neither area nor days are given.
pub const DEFAULT_RUNOFF_DAYS: f64 = 5.0;

/// Allowed range of the (odd) HYSEP interval width 2N*.
pub const INTERVAL_MIN: usize = 3;
pub const INTERVAL_MAX: usize = 11;

// -- Block-minimum methods (UKIH, five-day) --

/// Block length [days].
pub const BLOCK_DAYS: usize = 5;

/// A block minimum is a turning point only if this fraction of it is still
/// below its neighbouring block minima.
pub const TURNING_POINT_FACTOR: f64 = 0.9;

// -- Strict baseflow classifier --

/// Days flagged before a rising (dQ/dt >= 0) run.
pub const DAYS_BEFORE_RISE: usize = 2;

/// Days flagged after a rising run ends.
pub const DAYS_AFTER_RISE: usize = 3;

/// Quantile of the whole record above which a peak is a major event.
pub const MAJOR_EVENT_QUANTILE: f64 = 0.9;

/// Days flagged after a major event peak.
pub const DAYS_AFTER_MAJOR_EVENT: usize = 5;

// -- Recession analysis --

/// Rank (as a fraction of candidates) used to pick the recession ratio.
pub const RECESSION_RANK: f64 = 0.05;

/// Moving-average window used to find calibration recession periods.
pub const RECESSION_SMOOTHING_DAYS: usize = 3;

/// Minimum length [days] of a declining run to count as a recession period.
pub const MIN_RECESSION_DAYS: usize = 10;

/// Leading fraction of each recession period discarded before calibration.
pub const RECESSION_HEAD_FRACTION: f64 = 0.6;

// -- Maximum BFI --

/// Annual BFI at or above this is rejected in favour of the pooled ratio.
pub const BFI_MAX_CEILING: f64 = 0.9;

/// Days per year when no calendar is supplied.
pub const DAYS_PER_YEAR: usize = 365;

// -- Calibration grids --

/// Half-open arithmetic grid `start, start + step, ...` below `stop`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamGrid {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl ParamGrid {
    pub const fn new(start: f64, stop: f64, step: f64) -> Self {
        Self { start, stop, step }
    }

    /// Number of grid points, `ceil((stop - start) / step)`.
    pub fn len(&self) -> usize {
        if self.step.is_nan() || self.step <= 0.0 || self.stop <= self.start {
            return 0;
        }
        ((self.stop - self.start) / self.step).ceil() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |i| self.value(i))
    }
}

/// Boughton `C`.
pub const BOUGHTON_C_GRID: ParamGrid = ParamGrid::new(0.0001, 1.0, 0.0001);

/// IHACRES `C`.
pub const IHACRES_C_GRID: ParamGrid = ParamGrid::new(0.0001, 1.0, 0.0001);

/// Eckhardt `BFImax`.
pub const ECKHARDT_BFI_MAX_GRID: ParamGrid = ParamGrid::new(0.0001, 1.0, 0.0001);

/// Willems quickflow proportion `w`.
pub const WILLEMS_W_GRID: ParamGrid = ParamGrid::new(0.0001, 1.0, 0.0001);

/// Furey `c3/c1`.
pub const FUREY_C3C1_GRID: ParamGrid = ParamGrid::new(0.001, 10.0, 0.001);

/// EWMA smoothing factor `e`.
pub const EWMA_E_GRID: ParamGrid = ParamGrid::new(0.0001, 0.5, 0.0001);
