//! st_filter — significant ties in temporal networks.
//!
//! Purpose
//! -------
//! Identify ties that recur more often than a fitness-model null predicts.
//! Every node gets an activity parameter `x_i`, a pair {i, j} is active in
//! a snapshot with probability `x_i x_j`, and an observed tie count is
//! significant when it falls in the upper α tail of
//! `Binomial(τ, x_i x_j)`.
//!
//! Key behaviors
//! -------------
//! - [`network`] normalizes snapshot stacks, aggregates and edge lists into
//!   one canonical form.
//! - [`fitness`] estimates activity parameters, densely or with an
//!   O(N + |E|) memory-saving estimator that can fan nodes out over a
//!   rayon pool.
//! - [`significance`] computes probabilities, p-values and the
//!   significance matrix.
//! - [`filter`] exposes the three entry points and the result type.
//! - [`optimization`] is the argmin-backed root finder underneath.
//!
//! Conventions
//! -----------
//! - Hard failures are typed errors; degraded-but-usable results carry
//!   [`filter::Diagnostic`]s instead.
//! - When `python-bindings` is enabled, this file also defines the
//!   `_st_filter` extension module. Its functions return dicts keyed
//!   `Adj_sig`, `Adj_all`, `p_mat`, `activ_params`, `nodes` and `warnings`.
//!
//! Downstream usage
//! ----------------
//! ```
//! use ndarray::array;
//! use st_filter::filter::{st_filter_aggregate, FilterOptions};
//!
//! let adj = array![[0.0, 3.0, 1.0], [3.0, 0.0, 2.0], [1.0, 2.0, 0.0]];
//! let result = st_filter_aggregate(adj.view(), 4, &FilterOptions::default())?;
//! for (i, j, count, p) in result.significant_ties() {
//!     println!("{i}-{j}: {count} ties, p = {p:.3}");
//! }
//! # Ok::<(), st_filter::filter::FilterError>(())
//! ```

pub mod filter;
pub mod fitness;
pub mod network;
pub mod optimization;
pub mod significance;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::{PyAny, PyDict}};

#[cfg(feature = "python-bindings")]
use crate::{
    filter::{EdgeListOptions, FilterOptions},
    utils::{extract_edge_list, extract_f64_array2, extract_f64_array3, result_to_dict},
};

#[cfg(feature = "python-bindings")]
fn filter_options(alpha: f64, judge: &str, opt_method: &str) -> PyResult<FilterOptions> {
    Ok(FilterOptions::new(alpha, judge, opt_method)?)
}

/// Significant ties from a `(tau, N, N)` stack of binary snapshots.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "st_filter",
    signature = (a_snap, alpha, judge = "p_val", opt_method = "krylov")
)]
fn py_st_filter<'py>(
    py: Python<'py>, a_snap: &Bound<'py, PyAny>, alpha: f64, judge: &str, opt_method: &str,
) -> PyResult<Bound<'py, PyDict>> {
    let opts = filter_options(alpha, judge, opt_method)?;
    let snaps = extract_f64_array3(py, a_snap)?;
    let view = snaps.as_array();
    let result = py.allow_threads(|| filter::st_filter(view, &opts))?;
    result_to_dict(py, result)
}

/// Significant ties from an aggregate matrix observed over `t` snapshots.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "st_filter_aat",
    signature = (aat, t, alpha, judge = "p_val", opt_method = "krylov")
)]
fn py_st_filter_aat<'py>(
    py: Python<'py>, aat: &Bound<'py, PyAny>, t: usize, alpha: f64, judge: &str, opt_method: &str,
) -> PyResult<Bound<'py, PyDict>> {
    let opts = filter_options(alpha, judge, opt_method)?;
    let adj = extract_f64_array2(py, aat)?;
    let view = adj.as_array();
    let result = py.allow_threads(|| filter::st_filter_aggregate(view, t, &opts))?;
    result_to_dict(py, result)
}

/// Significant ties from rows `[snapshot, node, node]`.
///
/// `paral` only has an effect with `memorysave=True`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(
    name = "st_filter_list",
    signature = (edge_list, alpha, judge = "p_val", opt_method = "krylov", memorysave = false, paral = true)
)]
#[allow(clippy::too_many_arguments)]
fn py_st_filter_list<'py>(
    py: Python<'py>, edge_list: &Bound<'py, PyAny>, alpha: f64, judge: &str, opt_method: &str,
    memorysave: bool, paral: bool,
) -> PyResult<Bound<'py, PyDict>> {
    let opts = filter_options(alpha, judge, opt_method)?;
    let edges = extract_edge_list(edge_list)?;
    if edges.is_empty() {
        return Err(PyValueError::new_err("edge_list is empty"));
    }
    let edge_opts = EdgeListOptions::new(memorysave, paral);
    let result = py.allow_threads(|| filter::st_filter_edges(&edges, &opts, &edge_opts))?;
    result_to_dict(py, result)
}

/// _st_filter — PyO3 module initializer for the Python extension.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _st_filter<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_st_filter, m)?)?;
    m.add_function(wrap_pyfunction!(py_st_filter_aat, m)?)?;
    m.add_function(wrap_pyfunction!(py_st_filter_list, m)?)?;
    Ok(())
}
