//! Conversion helpers for the Python bindings.
//!
//! Python callers hand in numpy arrays, nested lists or pandas frames and
//! expect plain dicts back. These helpers do the conversions in both
//! directions so that `lib.rs` only wires entry points.
#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::PyTypeError,
    prelude::*,
    types::{PyAny, PyDict, PyList},
};

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArrayMethods, PyReadonlyArray2, PyReadonlyArray3};

#[cfg(feature = "python-bindings")]
use crate::{
    filter::TieFilterResult,
    network::{NodeToken, TemporalEdge},
};

/// Accept a 3-D float64 array or anything numpy can convert into one.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_array3<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray3<'py, f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray3<f64>>() {
        return Ok(arr);
    }
    let converted = py
        .import("numpy")?
        .call_method1("asarray", (raw, "float64"))
        .map_err(|_| PyTypeError::new_err("expected a (tau, N, N) array of float64"))?;
    converted.extract()
}

/// Accept a 2-D float64 array or anything numpy can convert into one.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_array2<'py>(
    py: Python<'py>, raw: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray2<'py, f64>> {
    if let Ok(arr) = raw.extract::<PyReadonlyArray2<f64>>() {
        return Ok(arr);
    }
    let converted = py
        .import("numpy")?
        .call_method1("asarray", (raw, "float64"))
        .map_err(|_| PyTypeError::new_err("expected an (N, N) array of float64"))?;
    converted.extract()
}

/// Integral non-negative values (including `3.0` from float arrays) become
/// indices; everything else is a label.
#[cfg(feature = "python-bindings")]
fn extract_node(obj: &Bound<'_, PyAny>) -> PyResult<NodeToken> {
    if let Ok(i) = obj.extract::<usize>() {
        return Ok(NodeToken::Index(i));
    }
    if let Ok(v) = obj.extract::<f64>() {
        if v >= 0.0 && v.fract() == 0.0 && v <= usize::MAX as f64 {
            return Ok(NodeToken::Index(v as usize));
        }
    }
    Ok(NodeToken::Label(obj.str()?.to_string()))
}

/// Read `(snapshot, node, node)` rows from any iterable of 3-sequences.
///
/// Snapshot ids are compared by their `str()` form.
#[cfg(feature = "python-bindings")]
pub fn extract_edge_list(raw: &Bound<'_, PyAny>) -> PyResult<Vec<TemporalEdge<String>>> {
    let source = match raw.getattr("to_numpy") {
        Ok(to_numpy) => to_numpy.call0()?,
        Err(_) => raw.clone(),
    };
    let mut edges = Vec::new();
    for (line, item) in source.try_iter()?.enumerate() {
        let row: Vec<Bound<'_, PyAny>> = item?.extract()?;
        if row.len() != 3 {
            return Err(PyTypeError::new_err(format!(
                "edge list row {line} has {} fields, expected [snapshot, node, node]",
                row.len()
            )));
        }
        edges.push(TemporalEdge {
            snapshot: row[0].str()?.to_string(),
            source: extract_node(&row[1])?,
            target: extract_node(&row[2])?,
        });
    }
    Ok(edges)
}

/// Build the result dict: `Adj_sig`, `Adj_all`, `p_mat` (dense mode only),
/// `activ_params`, `nodes` (labeled input only) and `warnings`.
#[cfg(feature = "python-bindings")]
pub fn result_to_dict<'py>(py: Python<'py>, result: TieFilterResult) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new(py);
    if let Some(sig) = result.significance {
        dict.set_item("Adj_sig", sig.adj_sig.mapv(i64::from).into_pyarray(py))?;
        dict.set_item("Adj_all", sig.adj_all.into_pyarray(py))?;
        dict.set_item("p_mat", sig.p_mat.into_pyarray(py))?;
    }
    dict.set_item("activ_params", result.activ_params.into_pyarray(py))?;
    if let Some(labels) = result.nodes {
        dict.set_item("nodes", PyList::new(py, labels.into_vec())?)?;
    }
    let warnings: Vec<String> = result.warnings.iter().map(ToString::to_string).collect();
    dict.set_item("warnings", PyList::new(py, warnings)?)?;
    Ok(dict)
}
