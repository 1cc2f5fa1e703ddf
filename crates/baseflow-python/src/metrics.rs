use numpy::PyReadonlyArray1;
use pyo3::prelude::*;

use baseflow_core::metrics;

use crate::convert::{checked_slice, contiguous_slice};

fn pair<'py>(
    observed: &'py PyReadonlyArray1<'py, f64>,
    simulated: &'py PyReadonlyArray1<'py, f64>,
) -> PyResult<(&'py [f64], &'py [f64])> {
    let obs = contiguous_slice(observed)?;
    let sim = checked_slice(simulated, obs.len(), "simulated")?;
    Ok((obs, sim))
}

#[pyfunction]
fn nse(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let (obs, sim) = pair(&observed, &simulated)?;
    Ok(metrics::nse(obs, sim))
}

#[pyfunction]
fn log_nse(
    observed: PyReadonlyArray1<'_, f64>,
    simulated: PyReadonlyArray1<'_, f64>,
) -> PyResult<f64> {
    let (obs, sim) = pair(&observed, &simulated)?;
    Ok(metrics::log_nse(obs, sim))
}

#[pyfunction]
fn kge(observed: PyReadonlyArray1<'_, f64>, simulated: PyReadonlyArray1<'_, f64>) -> PyResult<f64> {
    let (obs, sim) = pair(&observed, &simulated)?;
    Ok(metrics::kge(obs, sim))
}

pub fn register(parent: &Bound<'_, PyModule>) -> PyResult<()> {
    let m = PyModule::new(parent.py(), "metrics")?;
    m.add_function(wrap_pyfunction!(nse, &m)?)?;
    m.add_function(wrap_pyfunction!(log_nse, &m)?)?;
    m.add_function(wrap_pyfunction!(kge, &m)?)?;
    parent.add_submodule(&m)?;
    Ok(())
}
