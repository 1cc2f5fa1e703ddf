//! Validated discharge input and calendar metadata.
//!
//! The separation kernels work on plain `&[f64]` slices and assume a clean,
//! gap-free daily series. `Discharge` is the checked entry point used by the
//! orchestrator and the bindings.
use std::fmt;
use std::str::FromStr;

use crate::error::{BaseflowError, Result};

/// A daily discharge series: non-empty, finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Discharge {
    values: Vec<f64>,
}

impl Discharge {
    /// Validate and wrap a discharge series.
    ///
    /// Rejects empty input and any value that is NaN, infinite or negative.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(BaseflowError::EmptySeries);
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(BaseflowError::InvalidDischarge { index, value });
        }
        Ok(Self { values })
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }

    /// Number of days.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for a constructed series; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl AsRef<[f64]> for Discharge {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}

/// Calendar month and day, ordered by position in the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    pub month: u8,
    pub day: u8,
}

impl MonthDay {
    pub fn new(month: u8, day: u8) -> Result<Self> {
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(BaseflowError::InvalidIcePeriod(format!(
                "{month:02}-{day:02} is not a calendar day"
            )));
        }
        Ok(Self { month, day })
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

impl FromStr for MonthDay {
    type Err = BaseflowError;

    /// Parse `MM-DD` (also accepts `M/D`).
    fn from_str(s: &str) -> Result<Self> {
        let bad = || BaseflowError::InvalidIcePeriod(format!("cannot parse '{s}' as MM-DD"));
        let (m, d) = s.trim().split_once(['-', '/']).ok_or_else(bad)?;
        let month = m.trim().parse::<u8>().map_err(|_| bad())?;
        let day = d.trim().parse::<u8>().map_err(|_| bad())?;
        Self::new(month, day)
    }
}

/// Inclusive calendar window during which river ice distorts the rating curve.
///
/// When `end` falls before `start` in the calendar year the window wraps
/// across December 31st.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcePeriod {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl IcePeriod {
    pub fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    /// Whether the window wraps across the year boundary.
    pub fn wraps(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, date: MonthDay) -> bool {
        if self.wraps() {
            date >= self.start || date <= self.end
        } else {
            date >= self.start && date <= self.end
        }
    }

    /// Flag every date that falls inside the window.
    pub fn mask(&self, dates: &[MonthDay]) -> Vec<bool> {
        dates.iter().map(|&d| self.contains(d)).collect()
    }
}

impl FromStr for IcePeriod {
    type Err = BaseflowError;

    /// Parse `MM-DD:MM-DD`.
    fn from_str(s: &str) -> Result<Self> {
        let (start, end) = s.split_once(':').ok_or_else(|| {
            BaseflowError::InvalidIcePeriod(format!("expected MM-DD:MM-DD, got '{s}'"))
        })?;
        Ok(Self::new(start.parse()?, end.parse()?))
    }
}

impl fmt::Display for IcePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}
