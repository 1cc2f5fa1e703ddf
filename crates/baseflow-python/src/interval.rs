use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use baseflow_core::interval;
use baseflow_core::strict;

use crate::convert::{checked_slice, contiguous_slice};

/// HYSEP interval width `2N*` (odd, in `[3, 11]`).
#[pyfunction]
#[pyo3(signature = (area=None, num_days=None))]
fn interval_width(area: Option<f64>, num_days: Option<f64>) -> usize {
    interval::interval_width(area, num_days)
}

#[pyfunction]
#[pyo3(signature = (q, area=None, num_days=None))]
fn fixed<'py>(
    py: Python<'py>,
    q: PyReadonlyArray1<'py, f64>,
    area: Option<f64>,
    num_days: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let q = contiguous_slice(&q)?;
    let width = interval::interval_width(area, num_days);
    Ok(PyArray1::from_vec(py, interval::fixed(q, width)))
}

#[pyfunction]
#[pyo3(signature = (q, area=None, num_days=None))]
fn slide<'py>(
    py: Python<'py>,
    q: PyReadonlyArray1<'py, f64>,
    area: Option<f64>,
    num_days: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let q = contiguous_slice(&q)?;
    let width = interval::interval_width(area, num_days);
    Ok(PyArray1::from_vec(py, interval::slide(q, width)))
}

#[pyfunction]
#[pyo3(signature = (q, b_lh, area=None, num_days=None))]
fn local<'py>(
    py: Python<'py>,
    q: PyReadonlyArray1<'py, f64>,
    b_lh: PyReadonlyArray1<'py, f64>,
    area: Option<f64>,
    num_days: Option<f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let q = contiguous_slice(&q)?;
    let b_lh = checked_slice(&b_lh, q.len(), "b_lh")?;
    let width = interval::interval_width(area, num_days);
    Ok(PyArray1::from_vec(py, interval::local(q, b_lh, width)))
}

#[pyfunction]
fn ukih<'py>(
    py: Python<'py>,
    q: PyReadonlyArray1<'py, f64>,
    b_lh: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let q = contiguous_slice(&q)?;
    let b_lh = checked_slice(&b_lh, q.len(), "b_lh")?;
    Ok(PyArray1::from_vec(py, interval::ukih(q, b_lh)))
}

#[pyfunction]
fn five_day<'py>(
    py: Python<'py>,
    q: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let q = contiguous_slice(&q)?;
    Ok(PyArray1::from_vec(py, interval::five_day(q)))
}

/// Boolean mask of strict-baseflow days.
#[pyfunction]
fn strict_baseflow<'py>(
    py: Python<'py>,
    q: PyReadonlyArray1<'py, f64>,
) -> PyResult<Bound<'py, PyArray1<bool>>> {
    let q = contiguous_slice(&q)?;
    Ok(PyArray1::from_vec(py, strict::strict_baseflow(q)))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "interval")?;
    m.add_function(wrap_pyfunction!(interval_width, &m)?)?;
    m.add_function(wrap_pyfunction!(fixed, &m)?)?;
    m.add_function(wrap_pyfunction!(slide, &m)?)?;
    m.add_function(wrap_pyfunction!(local, &m)?)?;
    m.add_function(wrap_pyfunction!(ukih, &m)?)?;
    m.add_function(wrap_pyfunction!(five_day, &m)?)?;
    m.add_function(wrap_pyfunction!(strict_baseflow, &m)?)?;
    parent.add_submodule(&m)?;
    Ok(())
}
