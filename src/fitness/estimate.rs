//! Activity-parameter estimation entry points.
//!
//! Both estimators resolve a starting point, hand their system to
//! [`solve`] and return the best iterate together with the solver outcome.
//! A solve that does not reach `f_tol` is still returned; callers inspect
//! `solver.converged` and decide how to report it.
use crate::{
    fitness::{
        dense::{DenseFitness, FitnessContext},
        errors::FitnessResult,
        init::InitialGuess,
        streaming::{StreamingContext, StreamingFitness},
    },
    optimization::root_finder::{solve, RootOutcome, SolverOptions},
};
use ndarray::Array1;

/// Fitted activity parameters plus how the solve went.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityEstimate {
    pub params: Array1<f64>,
    pub solver: RootOutcome,
}

impl ActivityEstimate {
    fn from_outcome(solver: RootOutcome) -> Self {
        Self { params: solver.x_hat.clone(), solver }
    }

    pub fn converged(&self) -> bool {
        self.solver.converged
    }
}

/// Estimate activity parameters from a dense aggregate.
///
/// # Errors
/// - `NoTies` / `InitialGuessLength` from the start policy.
/// - `Optimization` for solver configuration errors.
pub fn estimate_dense(
    ctx: &FitnessContext, init: &InitialGuess, opts: &SolverOptions,
) -> FitnessResult<ActivityEstimate> {
    let x0 = init.dense_start(ctx.network())?;
    let outcome = solve(&DenseFitness::new(), ctx, x0, opts)?;
    Ok(ActivityEstimate::from_outcome(outcome))
}

/// Estimate activity parameters from an incidence index, without a dense
/// matrix.
///
/// # Errors
/// As for [`estimate_dense`].
pub fn estimate_streaming(
    ctx: &StreamingContext, init: &InitialGuess, opts: &SolverOptions,
) -> FitnessResult<ActivityEstimate> {
    let x0 = init.streaming_start(ctx.index(), ctx.tau())?;
    let outcome = solve(&StreamingFitness::new(), ctx, x0, opts)?;
    Ok(ActivityEstimate::from_outcome(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fitness::pool::NodePool,
        network::{AggregateNetwork, EdgeList, TemporalEdge},
        optimization::root_finder::OptMethod,
    };
    use ndarray::Array2;

    fn ring_edges(n: usize, tau: usize) -> Vec<TemporalEdge<usize>> {
        // Neighbours on the ring tie in 3 snapshots, everyone else in 1.
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let d = j - i;
                let times = if d == 1 || d == n - 1 { 3 } else { 1 };
                for s in 0..times {
                    edges.push(TemporalEdge::new(s, i, j));
                }
            }
        }
        // Touch every snapshot id so that τ is counted correctly.
        for s in 3..tau {
            edges.push(TemporalEdge::new(s, 0usize, 0usize));
        }
        edges
    }

    /// Pseudo-random aggregate over `tau` snapshots: pair `i < j` is active
    /// in a snapshot when a 64-bit LCG draw falls below `p_i p_j`, with
    /// activities spread over [0.05, 0.5].
    fn lcg_aggregate(n: usize, tau: usize, seed: u64) -> AggregateNetwork {
        let p: Vec<f64> =
            (0..n).map(|i| 0.05 + 0.45 * (((i * 37 + 11) % 101) as f64 / 100.0)).collect();
        let mut state = seed;
        let mut adj = Array2::<f64>::zeros((n, n));
        for _ in 0..tau {
            for i in 0..n {
                for j in (i + 1)..n {
                    state = state
                        .wrapping_mul(6364136223846793005)
                        .wrapping_add(1442695040888963407);
                    let draw = (state >> 11) as f64 / (1u64 << 53) as f64;
                    if draw < p[i] * p[j] {
                        adj[[i, j]] += 1.0;
                        adj[[j, i]] += 1.0;
                    }
                }
            }
        }
        AggregateNetwork::from_aggregate(adj.view(), tau).expect("valid")
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Convergence to a closed-form root with both line searches.
    // - Hager–Zhang convergence on a heterogeneous network whose first
    //   bracketing steps cross the pole.
    // - Dense vs memory-saving agreement, sequential and parallel.
    // - Warm-start idempotence.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure the dense estimator recovers the closed-form ring solution with
    // both line searches.
    //
    // Given
    // -----
    // - N = 6, τ = 8 ring (see `ring_edges`), exact root x_i = sqrt(9/40).
    //
    // Expect
    // ------
    // - `converged` and every x_i within 1e-6 of 0.474341649.
    fn estimate_dense_recovers_ring_solution() {
        // Arrange
        let list = EdgeList::normalize(&ring_edges(6, 8)).expect("non-empty");
        assert_eq!(list.tau(), 8);
        let ctx = FitnessContext::new(list.aggregate().expect("small"));
        let exact = (9.0_f64 / 40.0).sqrt();

        for method in [OptMethod::MoreThuente, OptMethod::HagerZhang] {
            let opts = SolverOptions::default().with_method(method);

            // Act
            let est = estimate_dense(&ctx, &InitialGuess::ConfigurationModel, &opts)
                .expect("well-posed");

            // Assert
            assert!(est.converged(), "{method:?}: {}", est.solver.status);
            assert!(est.params.iter().all(|&x| (x - exact).abs() < 1e-6), "{:?}", est.params);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure L-BFGS with Hager–Zhang converges on a heterogeneous network,
    // densely and in memory-saving mode.
    //
    // Given
    // -----
    // - `lcg_aggregate(60, 15, 3)`: 60 nodes, τ = 15, every node tied.
    // - The configuration-model start.
    //
    // Expect
    // ------
    // - Both estimators converge (`max |H_i| ≤ f_tol`) and agree within
    //   1e-4 relative error.
    fn hager_zhang_converges_on_heterogeneous_network() {
        // Arrange
        let network = lcg_aggregate(60, 15, 3);
        let edges: Vec<TemporalEdge<usize>> = {
            // Expand counts into distinct snapshots so the incidence matches.
            let adj = network.adj();
            let mut rows = Vec::new();
            for i in 0..60 {
                for j in (i + 1)..60 {
                    for s in 0..adj[[i, j]] as usize {
                        rows.push(TemporalEdge::new(s, i, j));
                    }
                }
            }
            for s in 0..15 {
                rows.push(TemporalEdge::new(s, 0usize, 0usize));
            }
            rows
        };
        let list = EdgeList::normalize(&edges).expect("non-empty");
        assert_eq!(list.tau(), 15);
        let opts = SolverOptions::default().with_method(OptMethod::HagerZhang);
        let dense_ctx = FitnessContext::new(network);

        // Act
        let dense = estimate_dense(&dense_ctx, &InitialGuess::default(), &opts).expect("solve");
        let pool = NodePool::new(false, 1).expect("pool");
        let ctx = StreamingContext::new(list.incidence().expect("small"), list.tau(), pool);
        let streamed = estimate_streaming(&ctx, &InitialGuess::default(), &opts).expect("solve");

        // Assert
        assert!(dense.converged(), "{}", dense.solver.status);
        assert!(dense.solver.residual_norm <= opts.f_tol);
        assert!(streamed.converged(), "{}", streamed.solver.status);
        for (a, b) in streamed.params.iter().zip(dense.params.iter()) {
            assert!((a - b).abs() <= 1e-4 * b.abs(), "streaming {a} vs dense {b}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that the memory-saving estimator matches the dense one on the
    // same edge list, with and without a worker pool.
    //
    // Given
    // -----
    // - An irregular 5-node list over 6 snapshots.
    //
    // Expect
    // ------
    // - Both converge and agree within 1e-4 relative error.
    fn estimate_streaming_matches_dense() {
        // Arrange
        let rows = [
            (0, 0, 1), (0, 1, 2), (0, 3, 4), (1, 0, 1), (1, 2, 3), (1, 0, 4),
            (2, 0, 1), (2, 1, 3), (3, 0, 2), (3, 2, 4), (4, 0, 1), (4, 3, 4),
            (5, 1, 4), (5, 0, 3), (5, 1, 2),
        ];
        let edges: Vec<TemporalEdge<i32>> =
            rows.iter().map(|&(s, a, b)| TemporalEdge::new(s, a as usize, b as usize)).collect();
        let list = EdgeList::normalize(&edges).expect("non-empty");
        let opts = SolverOptions::default();
        let dense_ctx = FitnessContext::new(list.aggregate().expect("small"));
        let dense = estimate_dense(&dense_ctx, &InitialGuess::default(), &opts).expect("solve");
        assert!(dense.converged(), "{}", dense.solver.status);

        for parallel in [false, true] {
            let pool = NodePool::new(parallel, 2).expect("pool");
            let ctx = StreamingContext::new(list.incidence().expect("small"), list.tau(), pool);

            // Act
            let streamed = estimate_streaming(&ctx, &InitialGuess::default(), &opts).expect("solve");

            // Assert
            assert!(streamed.converged(), "{}", streamed.solver.status);
            for (a, b) in streamed.params.iter().zip(dense.params.iter()) {
                assert!((a - b).abs() <= 1e-4 * b.abs().max(1e-3), "streaming {a} vs dense {b}");
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check that restarting from a converged estimate returns it without
    // further iterations.
    //
    // Given
    // -----
    // - The converged ring estimate used as a fixed start.
    //
    // Expect
    // ------
    // - Zero iterations and identical parameters.
    fn estimate_dense_is_idempotent_from_converged_start() {
        // Arrange
        let mut adj = Array2::<f64>::from_elem((6, 6), 1.0);
        for i in 0..6 {
            adj[[i, i]] = 0.0;
            adj[[i, (i + 1) % 6]] = 3.0;
            adj[[(i + 1) % 6, i]] = 3.0;
        }
        let ctx = FitnessContext::new(AggregateNetwork::from_aggregate(adj.view(), 8).expect("valid"));
        let opts = SolverOptions::default();
        let first = estimate_dense(&ctx, &InitialGuess::default(), &opts).expect("solve");
        assert!(first.converged());

        // Act
        let warm = InitialGuess::fixed(first.params.clone()).expect("finite");
        let second = estimate_dense(&ctx, &warm, &opts).expect("solve");

        // Assert
        assert_eq!(second.solver.iterations, 0);
        assert_eq!(second.params, first.params);
    }
}
