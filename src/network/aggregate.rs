//! Canonical aggregate representation of a temporal network.
//!
//! Purpose
//! -------
//! Hold the triple (N, τ, A) every estimator works from, where `A[i][j]` is
//! the number of snapshots in which the undirected tie {i, j} is active.
//! Snapshot stacks and precomputed aggregates are reduced to this form
//! here; edge lists get here through [`crate::network::edges::EdgeList`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `A` is square with a structurally zero diagonal.
//! - Entries are finite and non-negative. Symmetry and binary snapshot
//!   entries are caller preconditions and are not checked.
//! - `τ ≥ 1`.
//!
//! Performance
//! -----------
//! - The N×N buffer is obtained through [`try_zeros`], which reserves
//!   fallibly so that an oversized network surfaces as
//!   [`NetworkError::DenseAllocation`] instead of aborting the process.
use crate::network::errors::{NetworkError, NetworkResult};
use ndarray::{Array1, Array2, ArrayView2, ArrayView3, Axis};

/// Aggregated tie counts plus the snapshot count they were observed over.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateNetwork {
    adj: Array2<f64>,
    tau: usize,
}

impl AggregateNetwork {
    /// Sum a `(τ, N, N)` snapshot stack into an aggregate.
    ///
    /// # Errors
    /// - `NoSnapshots` if the stack is empty along the first axis.
    /// - `NonSquare` if the per-snapshot matrices are not square.
    /// - `DenseAllocation` if the N×N buffer cannot be reserved.
    /// - `InvalidCount` if any summed entry is non-finite or negative.
    pub fn from_snapshots(snapshots: ArrayView3<'_, f64>) -> NetworkResult<Self> {
        let (tau, rows, cols) = snapshots.dim();
        if tau == 0 {
            return Err(NetworkError::NoSnapshots);
        }
        if rows != cols {
            return Err(NetworkError::NonSquare { rows, cols });
        }
        let mut adj = try_zeros(rows)?;
        for snapshot in snapshots.axis_iter(Axis(0)) {
            adj += &snapshot;
        }
        Self::finish(adj, tau)
    }

    /// Wrap a precomputed aggregate observed over `tau` snapshots.
    ///
    /// # Errors
    /// - `NoSnapshots` if `tau == 0`.
    /// - `NonSquare`, `DenseAllocation`, `InvalidCount` as for
    ///   [`AggregateNetwork::from_snapshots`].
    pub fn from_aggregate(adj: ArrayView2<'_, f64>, tau: usize) -> NetworkResult<Self> {
        if tau == 0 {
            return Err(NetworkError::NoSnapshots);
        }
        let (rows, cols) = adj.dim();
        if rows != cols {
            return Err(NetworkError::NonSquare { rows, cols });
        }
        let mut owned = try_zeros(rows)?;
        owned.assign(&adj);
        Self::finish(owned, tau)
    }

    /// Count undirected pairs into a symmetric aggregate. Self-pairs are
    /// skipped.
    pub(crate) fn from_pairs(n: usize, pairs: &[(usize, usize)], tau: usize) -> NetworkResult<Self> {
        let mut adj = try_zeros(n)?;
        for &(a, b) in pairs.iter().filter(|(a, b)| a != b) {
            adj[[a, b]] += 1.0;
            adj[[b, a]] += 1.0;
        }
        Ok(Self { adj, tau })
    }

    fn finish(mut adj: Array2<f64>, tau: usize) -> NetworkResult<Self> {
        adj.diag_mut().fill(0.0);
        if let Some(((row, col), &value)) =
            adj.indexed_iter().find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(NetworkError::InvalidCount { row, col, value });
        }
        Ok(Self { adj, tau })
    }

    pub fn n(&self) -> usize {
        self.adj.nrows()
    }

    pub fn tau(&self) -> usize {
        self.tau
    }

    pub fn adj(&self) -> &Array2<f64> {
        &self.adj
    }

    /// Observed tie count of pair (i, j).
    pub fn count(&self, i: usize, j: usize) -> f64 {
        self.adj[[i, j]]
    }

    /// Σ_j A[i][j] per node.
    pub fn row_sums(&self) -> Array1<f64> {
        self.adj.sum_axis(Axis(1))
    }

    /// Σ_i Σ_j A[i][j].
    pub fn total(&self) -> f64 {
        self.adj.sum()
    }
}

/// Allocate an `n × n` zero matrix, failing softly when the buffer cannot be
/// reserved.
///
/// # Errors
/// `DenseAllocation { nodes: n, bytes }` when `n²` elements overflow or the
/// reservation is refused.
pub fn try_zeros(n: usize) -> NetworkResult<Array2<f64>> {
    let overflow = NetworkError::DenseAllocation { nodes: n, bytes: None };
    let len = n.checked_mul(n).ok_or(overflow.clone())?;
    let bytes = len.checked_mul(std::mem::size_of::<f64>()).ok_or(overflow)?;
    let mut buf: Vec<f64> = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| NetworkError::DenseAllocation { nodes: n, bytes: Some(bytes) })?;
    buf.resize(len, 0.0);
    Array2::from_shape_vec((n, n), buf)
        .map_err(|_| NetworkError::DenseAllocation { nodes: n, bytes: Some(bytes) })
}
