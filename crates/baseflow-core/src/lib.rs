//! baseflow-core: baseflow separation for daily streamflow records.
//!
//! Recursive digital filters, HYSEP and UKIH graphical methods, the
//! strict-baseflow classifier, recession analysis and grid-search
//! calibration, composed by [`separation::separate`].
pub mod bfi;
pub mod calibrate;
pub mod constants;
pub mod error;
pub mod filters;
pub mod interval;
pub mod metrics;
pub mod recession;
pub mod separation;
pub mod series;
pub mod strict;
pub mod traits;

pub use error::{BaseflowError, Result};
pub use separation::{separate, Method, SeparationConfig, SeparationResult};
pub use series::{Discharge, IcePeriod, MonthDay};
