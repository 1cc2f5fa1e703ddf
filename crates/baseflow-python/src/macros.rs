/// Generate a `#[pyfunction]` for a one-pole recursive filter.
///
/// The generated function takes the discharge array, the Lyne-Hollick
/// baseflow used as seed, and the filter's scalar parameters. It returns the
/// baseflow array and the number of clipped days.
macro_rules! define_filter {
    (
        $(#[$meta:meta])*
        fn $name:ident($($param:ident),+ $(,)?) => $filter:ty
    ) => {
        $(#[$meta])*
        #[pyo3::pyfunction]
        pub fn $name<'py>(
            py: pyo3::Python<'py>,
            q: numpy::PyReadonlyArray1<'py, f64>,
            b_lh: numpy::PyReadonlyArray1<'py, f64>,
            $($param: f64),+
        ) -> pyo3::PyResult<(pyo3::Bound<'py, numpy::PyArray1<f64>>, usize)> {
            use baseflow_core::traits::RecursiveFilter;

            let q = $crate::convert::contiguous_slice(&q)?;
            let b_lh = $crate::convert::checked_slice(&b_lh, q.len(), "b_lh")?;
            let filter = <$filter>::new($($param),+).map_err($crate::convert::to_py_err)?;
            let seed = b_lh.first().copied().unwrap_or_default();
            let out = filter.run(q, seed);
            Ok((numpy::PyArray1::from_vec(py, out.baseflow), out.exceedances))
        }
    };
}

/// Convert named baseflow columns into a `PyDict` of numpy arrays.
macro_rules! columns_to_dict {
    ($py:expr, $columns:expr) => {{
        let dict = pyo3::types::PyDict::new($py);
        for (name, values) in $columns {
            dict.set_item(name, numpy::PyArray1::from_vec($py, values))?;
        }
        dict
    }};
}
