use numpy::PyReadonlyArray1;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use baseflow_core::bfi;
use baseflow_core::constants::{IHACRES_A_DEFAULT, LH_BETA_DEFAULT};
use baseflow_core::recession;
use baseflow_core::separation::{self as core_separation, Method, SeparationConfig};
use baseflow_core::strict::strict_baseflow;

use crate::convert::{checked_slice, discharge, ice_calendar, to_py_err};

/// Run several separation methods at once.
///
/// `methods` is a list of method names (or `["all"]`, the default). Returns
/// `(baseflow, kge)`: dicts keyed by method name holding the baseflow array
/// and the KGE over strict-baseflow days.
#[pyfunction]
#[pyo3(signature = (
    q,
    methods=None,
    area=None,
    num_days=None,
    ice_period=None,
    months=None,
    days=None,
    k=None,
    boughton_c=None,
    ihacres_c=None,
    ihacres_a=IHACRES_A_DEFAULT,
    bfi_max=None,
    c3c1=None,
    ewma_e=None,
    willems_w=None,
    lh_beta=LH_BETA_DEFAULT,
))]
#[allow(clippy::too_many_arguments)]
fn separation<'py>(
    py: Python<'py>,
    q: PyReadonlyArray1<'py, f64>,
    methods: Option<Vec<String>>,
    area: Option<f64>,
    num_days: Option<f64>,
    ice_period: Option<String>,
    months: Option<Vec<u8>>,
    days: Option<Vec<u8>>,
    k: Option<f64>,
    boughton_c: Option<f64>,
    ihacres_c: Option<f64>,
    ihacres_a: f64,
    bfi_max: Option<f64>,
    c3c1: Option<f64>,
    ewma_e: Option<f64>,
    willems_w: Option<f64>,
    lh_beta: f64,
) -> PyResult<(Bound<'py, PyDict>, Bound<'py, PyDict>)> {
    let q = discharge(&q)?;

    let methods = match methods {
        Some(names) => Method::parse_list(&names.join(",")).map_err(to_py_err)?,
        None => Method::ALL.to_vec(),
    };
    let mut config = SeparationConfig {
        methods,
        lh_beta,
        area_km2: area,
        num_days,
        k,
        boughton_c,
        ihacres_c,
        ihacres_a,
        bfi_max,
        c3c1,
        ewma_e,
        willems_w,
        ..SeparationConfig::default()
    };
    if let Some((period, dates)) = ice_calendar(ice_period.as_deref(), months, days)? {
        config = config.with_ice_period(period, dates);
    }

    let result = py
        .allow_threads(|| core_separation::separate(&q, &config))
        .map_err(to_py_err)?;

    let kge = PyDict::new(py);
    for out in &result.outputs {
        kge.set_item(out.method.name(), out.kge)?;
    }
    let baseflow = columns_to_dict!(
        py,
        result.outputs.into_iter().map(|o| (o.method.name(), o.baseflow))
    );
    Ok((baseflow, kge))
}

/// Recession coefficient `k` estimated from strict-baseflow days.
///
/// `months` and `days` give the calendar of every observation and are only
/// needed with `ice_period` (`"MM-DD:MM-DD"`).
#[pyfunction]
#[pyo3(signature = (q, months=None, days=None, ice_period=None))]
fn recession_coefficient(
    q: PyReadonlyArray1<'_, f64>,
    months: Option<Vec<u8>>,
    days: Option<Vec<u8>>,
    ice_period: Option<String>,
) -> PyResult<f64> {
    let q = discharge(&q)?;
    let q = q.as_slice();
    let strict = strict_baseflow(q);
    let ice = ice_calendar(ice_period.as_deref(), months, days)?
        .map(|(period, dates)| period.mask(&dates));
    recession::recession_coefficient(q, &strict, ice.as_deref()).map_err(to_py_err)
}

/// Maximum baseflow index from the backward recession filter.
#[pyfunction]
#[pyo3(signature = (q, b_lh, k, years=None))]
fn maximum_bfi(
    q: PyReadonlyArray1<'_, f64>,
    b_lh: PyReadonlyArray1<'_, f64>,
    k: f64,
    years: Option<Vec<i32>>,
) -> PyResult<f64> {
    let q = discharge(&q)?;
    let b_lh = checked_slice(&b_lh, q.len(), "b_lh")?;
    bfi::maximum_bfi(q.as_slice(), b_lh, k, years.as_deref()).map_err(to_py_err)
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "separation")?;
    m.add_function(wrap_pyfunction!(separation, &m)?)?;
    m.add_function(wrap_pyfunction!(recession_coefficient, &m)?)?;
    m.add_function(wrap_pyfunction!(maximum_bfi, &m)?)?;
    parent.add_submodule(&m)?;
    Ok(())
}
