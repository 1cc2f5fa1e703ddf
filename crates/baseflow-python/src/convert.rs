use numpy::PyReadonlyArray1;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use baseflow_core::series::{Discharge, IcePeriod, MonthDay};
use baseflow_core::BaseflowError;

/// Map a core error onto `ValueError`.
pub fn to_py_err(err: BaseflowError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Validate that a numpy array is C-contiguous and return its slice.
pub fn contiguous_slice<'py>(arr: &'py PyReadonlyArray1<'py, f64>) -> PyResult<&'py [f64]> {
    arr.as_slice()
        .map_err(|_| PyValueError::new_err("array must be C-contiguous"))
}

/// Validate length + contiguity of a numpy array.
pub fn checked_slice<'py>(
    arr: &'py PyReadonlyArray1<'py, f64>,
    expected_len: usize,
    name: &str,
) -> PyResult<&'py [f64]> {
    let slice = contiguous_slice(arr)?;
    if slice.len() != expected_len {
        return Err(PyValueError::new_err(format!(
            "{} must have {} elements, got {}",
            name,
            expected_len,
            slice.len()
        )));
    }
    Ok(slice)
}

/// Copy a numpy array into a validated discharge series.
pub fn discharge(arr: &PyReadonlyArray1<'_, f64>) -> PyResult<Discharge> {
    let slice = arr
        .as_slice()
        .map_err(|_| PyValueError::new_err("array must be C-contiguous"))?;
    Discharge::new(slice.to_vec()).map_err(to_py_err)
}

/// Build the calendar for an ice window from parallel month and day lists.
///
/// Returns `None` when no window is given.
pub fn ice_calendar(
    ice_period: Option<&str>,
    months: Option<Vec<u8>>,
    days: Option<Vec<u8>>,
) -> PyResult<Option<(IcePeriod, Vec<MonthDay>)>> {
    let Some(period) = ice_period else {
        return Ok(None);
    };
    let period: IcePeriod = period.parse().map_err(to_py_err)?;
    let (Some(months), Some(days)) = (months, days) else {
        return Err(to_py_err(BaseflowError::MissingCalendar));
    };
    if months.len() != days.len() {
        return Err(to_py_err(BaseflowError::LengthMismatch {
            expected: months.len(),
            actual: days.len(),
        }));
    }
    let dates = months
        .into_iter()
        .zip(days)
        .map(|(m, d)| MonthDay::new(m, d))
        .collect::<Result<Vec<_>, _>>()
        .map_err(to_py_err)?;
    Ok(Some((period, dates)))
}
