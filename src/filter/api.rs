//! Entry points: one per input form, one shared pipeline.
//!
//! Each entry point only normalizes its input. The dense pipeline then
//! estimates activity parameters, tests every pair and assembles a
//! [`TieFilterResult`]; the memory-saving pipeline stops after estimation.
use crate::{
    filter::{
        diagnostics::Diagnostic,
        errors::FilterResult,
        options::{EdgeListOptions, FilterOptions, MemoryMode},
        outcome::TieFilterResult,
    },
    fitness::{
        dense::FitnessContext,
        estimate::{estimate_dense, estimate_streaming, ActivityEstimate},
        pool::NodePool,
        streaming::StreamingContext,
    },
    network::{AggregateNetwork, EdgeList, NodeLabels, TemporalEdge},
    significance::tester::test_ties,
};
use log::{debug, info, warn};
use ndarray::{ArrayView2, ArrayView3};
use std::hash::Hash;

/// Filter a `(τ, N, N)` stack of binary snapshot matrices.
///
/// # Errors
/// - `Network` for an empty or non-square stack, or when the dense
///   matrices cannot be allocated.
/// - `Fitness` when the network has no ties or the solver is misconfigured.
///
/// # Examples
/// ```
/// use ndarray::Array3;
/// use st_filter::filter::{st_filter, FilterOptions};
///
/// // Pair (0, 1) is active in every snapshot, (1, 2) in one.
/// let mut snaps = Array3::<f64>::zeros((4, 3, 3));
/// for s in 0..4 {
///     snaps[[s, 0, 1]] = 1.0;
///     snaps[[s, 1, 0]] = 1.0;
/// }
/// snaps[[0, 1, 2]] = 1.0;
/// snaps[[0, 2, 1]] = 1.0;
///
/// let result = st_filter(snaps.view(), &FilterOptions::default())?;
/// assert_eq!(result.activ_params.len(), 3);
/// assert_eq!(result.adj_all().map(|a| a[[0, 1]]), Some(4.0));
/// # Ok::<(), st_filter::filter::FilterError>(())
/// ```
pub fn st_filter(snapshots: ArrayView3<'_, f64>, opts: &FilterOptions) -> FilterResult<TieFilterResult> {
    let network = AggregateNetwork::from_snapshots(snapshots)?;
    filter_dense(network, None, opts)
}

/// Filter a precomputed aggregate observed over `tau` snapshots.
///
/// # Errors
/// As for [`st_filter`], plus `Network(NoSnapshots)` when `tau == 0`.
pub fn st_filter_aggregate(
    adj: ArrayView2<'_, f64>, tau: usize, opts: &FilterOptions,
) -> FilterResult<TieFilterResult> {
    let network = AggregateNetwork::from_aggregate(adj, tau)?;
    filter_dense(network, None, opts)
}

/// Filter a timestamped edge list.
///
/// With [`MemoryMode::MemorySaving`] no N×N matrix is built; the result
/// holds activity parameters (and labels) only.
///
/// # Errors
/// - `Network(EmptyEdgeList)` for an empty list.
/// - `Network(DenseAllocation)` in dense mode when N is too large; retry
///   with the memory-saving mode.
/// - `Fitness` as for [`st_filter`], and when the worker pool cannot start.
pub fn st_filter_edges<S: Eq + Hash>(
    edges: &[TemporalEdge<S>], opts: &FilterOptions, edge_opts: &EdgeListOptions,
) -> FilterResult<TieFilterResult> {
    let list = EdgeList::normalize(edges)?;
    info!(
        "Normalized {} edge rows: N = {}, tau = {}, {} non-self ties, labeled = {}",
        edges.len(),
        list.n(),
        list.tau(),
        list.pairs().len(),
        list.identity().labels().is_some()
    );
    match edge_opts.memory {
        MemoryMode::Dense => {
            let network = list.aggregate()?;
            filter_dense(network, list.into_identity().into_labels(), opts)
        }
        MemoryMode::MemorySaving { parallel, threads } => {
            filter_memory_saving(list, parallel, threads, opts)
        }
    }
}

fn filter_dense(
    network: AggregateNetwork, nodes: Option<NodeLabels>, opts: &FilterOptions,
) -> FilterResult<TieFilterResult> {
    info!(
        "Fitting {} activity parameters over tau = {} with {}",
        network.n(),
        network.tau(),
        opts.solver.method
    );
    let ctx = FitnessContext::new(network);
    let estimate = estimate_dense(&ctx, &opts.init, &opts.solver)?;
    let mut warnings = solver_diagnostics(&estimate);

    if let Some(fallback) = opts.judge_fallback() {
        warnings.push(fallback.clone());
    }
    let significance = test_ties(ctx.network(), &estimate.params, opts.alpha, opts.judge)?;
    info!(
        "{} significant ties at alpha = {} ({})",
        significance.significant_ties().len(),
        opts.alpha,
        opts.judge
    );

    emit(&warnings);
    Ok(TieFilterResult {
        activ_params: estimate.params,
        significance: Some(significance),
        nodes,
        solver: estimate.solver,
        warnings,
    })
}

fn filter_memory_saving(
    list: EdgeList, parallel: bool, threads: usize, opts: &FilterOptions,
) -> FilterResult<TieFilterResult> {
    let mut warnings = vec![Diagnostic::MemorySavingMode];
    let pool = NodePool::new(parallel, threads)?;
    debug!("Memory-saving estimator on {} worker(s)", pool.workers());

    let ctx = StreamingContext::new(list.incidence()?, list.tau(), pool);
    info!(
        "Fitting {} activity parameters over tau = {} from {} ties with {}",
        ctx.n(),
        ctx.tau(),
        ctx.index().n_edges(),
        opts.solver.method
    );
    let estimate = estimate_streaming(&ctx, &opts.init, &opts.solver)?;
    warnings.extend(solver_diagnostics(&estimate));

    emit(&warnings);
    Ok(TieFilterResult {
        activ_params: estimate.params,
        significance: None,
        nodes: list.into_identity().into_labels(),
        solver: estimate.solver,
        warnings,
    })
}

fn solver_diagnostics(estimate: &ActivityEstimate) -> Vec<Diagnostic> {
    let solver = &estimate.solver;
    if solver.converged {
        info!(
            "Root finding converged after {} iterations (max |H| = {:.3e})",
            solver.iterations, solver.residual_norm
        );
        Vec::new()
    } else {
        vec![Diagnostic::SolverNotConverged {
            residual_norm: solver.residual_norm,
            status: solver.status.clone(),
        }]
    }
}

fn emit(warnings: &[Diagnostic]) {
    for diagnostic in warnings {
        warn!("{diagnostic}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{filter::errors::FilterError, network::NetworkError};
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover pipeline wiring: which outputs each mode produces
    // and which diagnostics are attached. Numerical properties are covered
    // in the integration tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure the memory-saving path returns parameters only and flags the
    // mode, while keeping labels.
    //
    // Given
    // -----
    // - A labeled 3-node triangle list over 3 snapshots.
    //
    // Expect
    // ------
    // - No significance matrices, labels ["a", "b", "c"], and a
    //   `MemorySavingMode` warning first.
    fn memory_saving_returns_params_only() {
        // Arrange
        let edges = vec![
            TemporalEdge::new(0, "a", "b"),
            TemporalEdge::new(1, "b", "c"),
            TemporalEdge::new(2, "a", "c"),
            TemporalEdge::new(2, "a", "b"),
        ];

        // Act
        let result = st_filter_edges(
            &edges,
            &FilterOptions::default(),
            &EdgeListOptions::new(true, false),
        )
        .expect("non-empty");

        // Assert
        assert!(result.significance.is_none());
        assert!(result.adj_sig().is_none());
        assert_eq!(result.activ_params.len(), 3);
        let labels = result.nodes.as_ref().expect("labeled");
        assert_eq!(labels.as_slice(), ["a", "b", "c"]);
        assert_eq!(result.warnings.first(), Some(&Diagnostic::MemorySavingMode));
        assert!(result.significant_ties().is_empty());
    }

    #[test]
    // Purpose
    // -------
    // Check that an unknown judge still produces a result, computed with
    // `p_val`, plus exactly one `InvalidJudge` warning.
    //
    // Given
    // -----
    // - A 3-node aggregate over τ = 4 and judge "bogus".
    //
    // Expect
    // ------
    // - Same `adj_sig` as with "p_val"; an `InvalidJudge { given: "bogus" }`
    //   warning that the "p_val" run does not have.
    fn unknown_judge_falls_back_with_warning() {
        // Arrange
        let adj = array![[0.0, 2.0, 1.0], [2.0, 0.0, 1.0], [1.0, 1.0, 0.0]];
        let bogus = FilterOptions::default().with_judge("bogus");
        let p_val = FilterOptions::default().with_judge("p_val");

        // Act
        let a = st_filter_aggregate(adj.view(), 4, &bogus).expect("valid");
        let b = st_filter_aggregate(adj.view(), 4, &p_val).expect("valid");

        // Assert
        assert_eq!(a.adj_sig(), b.adj_sig());
        let invalid: Vec<_> =
            a.warnings.iter().filter(|w| matches!(w, Diagnostic::InvalidJudge { .. })).collect();
        assert_eq!(invalid, vec![&Diagnostic::InvalidJudge { given: "bogus".to_string() }]);
        assert!(!b.warnings.iter().any(|w| matches!(w, Diagnostic::InvalidJudge { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Ensure structural input errors are hard failures.
    //
    // Given
    // -----
    // - A 2×3 aggregate and an empty edge list.
    //
    // Expect
    // ------
    // - `NonSquare` and `EmptyEdgeList` wrapped in `FilterError::Network`.
    fn structural_errors_are_hard_failures() {
        // Arrange
        let adj = ndarray::Array2::<f64>::zeros((2, 3));
        let empty: Vec<TemporalEdge<u32>> = Vec::new();

        // Act
        let shape = st_filter_aggregate(adj.view(), 3, &FilterOptions::default());
        let none = st_filter_edges(&empty, &FilterOptions::default(), &EdgeListOptions::default());

        // Assert
        assert_eq!(
            shape.map(|r| r.activ_params),
            Err(FilterError::Network(NetworkError::NonSquare { rows: 2, cols: 3 }))
        );
        assert_eq!(
            none.map(|r| r.activ_params),
            Err(FilterError::Network(NetworkError::EmptyEdgeList))
        );
    }
}
