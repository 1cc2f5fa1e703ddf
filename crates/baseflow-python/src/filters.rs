use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::prelude::*;

use baseflow_core::constants::{IHACRES_A_DEFAULT, LH_BETA_DEFAULT};
use baseflow_core::filters::{
    Boughton, Chapman, ChapmanMaxwell, Eckhardt, Ewma, Furey, Ihacres, LyneHollick, Willems,
};
use baseflow_core::traits::RecursiveFilter;

use crate::convert::{contiguous_slice, to_py_err};

/// Lyne-Hollick two-pass filter. Returns `(baseflow, exceedances)`.
#[pyfunction]
#[pyo3(signature = (q, beta=LH_BETA_DEFAULT))]
fn lh<'py>(
    py: Python<'py>,
    q: PyReadonlyArray1<'py, f64>,
    beta: f64,
) -> PyResult<(Bound<'py, PyArray1<f64>>, usize)> {
    let q = contiguous_slice(&q)?;
    let out = LyneHollick::new(beta).map_err(to_py_err)?.separate(q);
    Ok((PyArray1::from_vec(py, out.baseflow), out.exceedances))
}

define_filter! {
    /// Chapman (1991) filter seeded with `b_lh[0]`.
    fn chapman(k) => Chapman
}

define_filter! {
    /// Chapman & Maxwell (1996) filter seeded with `b_lh[0]`.
    fn cm(k) => ChapmanMaxwell
}

define_filter! {
    /// Boughton (1993) two-parameter filter seeded with `b_lh[0]`.
    fn boughton(k, c) => Boughton
}

define_filter! {
    /// Eckhardt (2005) filter seeded with `b_lh[0]`.
    fn eckhardt(k, bfi_max) => Eckhardt
}

define_filter! {
    /// Exponentially weighted moving average seeded with `b_lh[0]`.
    fn ewma(e) => Ewma
}

define_filter! {
    /// Furey & Gupta (2001) filter seeded with `b_lh[0]`.
    fn furey(k, c3c1) => Furey
}

define_filter! {
    /// Willems (2009) filter seeded with `b_lh[0]`.
    fn willems(k, w) => Willems
}

/// IHACRES filter, seeded with the first discharge value.
#[pyfunction]
#[pyo3(signature = (q, k, c, a=IHACRES_A_DEFAULT))]
fn ihacres<'py>(
    py: Python<'py>,
    q: PyReadonlyArray1<'py, f64>,
    k: f64,
    c: f64,
    a: f64,
) -> PyResult<(Bound<'py, PyArray1<f64>>, usize)> {
    let q = contiguous_slice(&q)?;
    let filter = Ihacres::new(k, c, a).map_err(to_py_err)?;
    let out = filter.run(q, q.first().copied().unwrap_or_default());
    Ok((PyArray1::from_vec(py, out.baseflow), out.exceedances))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "filters")?;
    m.add_function(wrap_pyfunction!(lh, &m)?)?;
    m.add_function(wrap_pyfunction!(chapman, &m)?)?;
    m.add_function(wrap_pyfunction!(cm, &m)?)?;
    m.add_function(wrap_pyfunction!(boughton, &m)?)?;
    m.add_function(wrap_pyfunction!(eckhardt, &m)?)?;
    m.add_function(wrap_pyfunction!(ewma, &m)?)?;
    m.add_function(wrap_pyfunction!(furey, &m)?)?;
    m.add_function(wrap_pyfunction!(willems, &m)?)?;
    m.add_function(wrap_pyfunction!(ihacres, &m)?)?;
    parent.add_submodule(&m)?;
    Ok(())
}
