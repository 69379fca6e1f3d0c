//! network — input normalization for temporal networks.
//!
//! Purpose
//! -------
//! Convert every supported input form into the canonical
//! (N nodes, τ snapshots, N×N aggregate) triple, or, for the memory-saving
//! path, into a per-node incidence index that never materializes N×N.
//!
//! Key behaviors
//! -------------
//! - [`AggregateNetwork`] — snapshot stacks `(τ, N, N)` and precomputed
//!   aggregates with an explicit τ.
//! - [`EdgeList`] — `(snapshot, node, node)` rows with numeric or labeled
//!   endpoints, normalized once into index pairs plus a [`NodeIdentity`].
//! - [`IncidenceIndex`] — CSR partner lists for streaming estimation.
//! - [`io`] — text edge-list reader for the CLI.
//!
//! Invariants & assumptions
//! ------------------------
//! - Aggregates are square with zero diagonal, finite non-negative counts,
//!   and τ ≥ 1.
//! - Self-ties never reach an aggregate or an incidence index.
//! - Inputs are assumed undirected (symmetric) and binary per snapshot;
//!   neither is checked.
//!
//! Conventions
//! -----------
//! - Dense allocations are fallible and report
//!   [`NetworkError::DenseAllocation`]; there is no automatic switch to
//!   the memory-saving path.

pub mod aggregate;
pub mod edges;
pub mod errors;
pub mod io;
pub mod nodes;

pub use self::aggregate::{try_zeros, AggregateNetwork};
pub use self::edges::{EdgeList, IncidenceIndex, TemporalEdge};
pub use self::errors::{NetworkError, NetworkResult};
pub use self::nodes::{NodeIdentity, NodeLabels, NodeToken};

pub mod prelude {
    pub use super::aggregate::AggregateNetwork;
    pub use super::edges::{EdgeList, IncidenceIndex, TemporalEdge};
    pub use super::errors::{NetworkError, NetworkResult};
    pub use super::nodes::{NodeIdentity, NodeLabels, NodeToken};
}
