//! Timestamped edge lists and their normalized forms.
//!
//! Purpose
//! -------
//! Turn raw `(snapshot, node, node)` rows into an [`EdgeList`] of dense
//! index pairs, deciding the node identity once for the whole input. From
//! there the network can be aggregated densely ([`EdgeList::aggregate`]) or
//! indexed per node for the memory-saving estimator
//! ([`EdgeList::incidence`]).
//!
//! Key behaviors
//! -------------
//! - τ is the number of distinct snapshot ids.
//! - Purely numeric endpoints keep their values as indices; N = max + 1.
//!   Every unused id below the maximum is an isolated node that still costs
//!   O(N) per node evaluation, so sparse id spaces should be relabeled.
//! - A single label endpoint switches the whole list to label mode. Index
//!   tokens are then rendered as decimal text and mapped like any label, in
//!   first-appearance order scanning rows in order, source before target.
//! - Self-ties are dropped from the pair list. Duplicate rows are kept and
//!   counted each time.
use crate::network::{
    aggregate::AggregateNetwork,
    errors::{NetworkError, NetworkResult},
    nodes::{NodeIdentity, NodeLabels, NodeToken},
};
use ndarray::Array1;
use std::collections::HashSet;
use std::hash::Hash;

/// One observed tie: `source`–`target` active in `snapshot`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemporalEdge<S> {
    pub snapshot: S,
    pub source: NodeToken,
    pub target: NodeToken,
}

impl<S> TemporalEdge<S> {
    pub fn new(snapshot: S, source: impl Into<NodeToken>, target: impl Into<NodeToken>) -> Self {
        Self { snapshot, source: source.into(), target: target.into() }
    }
}

/// Normalized edge list: index pairs, snapshot count and node identity.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeList {
    pairs: Vec<(usize, usize)>,
    tau: usize,
    identity: NodeIdentity,
}

impl EdgeList {
    /// Normalize raw rows.
    ///
    /// # Errors
    /// - `EmptyEdgeList` when `edges` is empty.
    /// - `IndexAllocation` when a numeric id is `usize::MAX`.
    pub fn normalize<S: Eq + Hash>(edges: &[TemporalEdge<S>]) -> NetworkResult<Self> {
        if edges.is_empty() {
            return Err(NetworkError::EmptyEdgeList);
        }
        let tau = edges.iter().map(|e| &e.snapshot).collect::<HashSet<_>>().len();
        let labeled = edges.iter().any(|e| e.source.is_label() || e.target.is_label());

        let mut pairs = Vec::with_capacity(edges.len());
        let identity = if labeled {
            let mut labels = NodeLabels::new();
            for e in edges {
                let a = labels.intern(e.source.to_string());
                let b = labels.intern(e.target.to_string());
                if a != b {
                    pairs.push((a, b));
                }
            }
            NodeIdentity::Labeled(labels)
        } else {
            let mut max = 0usize;
            for e in edges {
                if let (NodeToken::Index(a), NodeToken::Index(b)) = (&e.source, &e.target) {
                    max = max.max(*a).max(*b);
                    if a != b {
                        pairs.push((*a, *b));
                    }
                }
            }
            let n = max
                .checked_add(1)
                .ok_or(NetworkError::IndexAllocation { nodes: max, entries: None })?;
            NodeIdentity::Dense { n }
        };
        Ok(Self { pairs, tau, identity })
    }

    pub fn n(&self) -> usize {
        self.identity.n()
    }

    pub fn tau(&self) -> usize {
        self.tau
    }

    /// Non-self index pairs, one per observed row.
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    pub fn identity(&self) -> &NodeIdentity {
        &self.identity
    }

    pub fn into_identity(self) -> NodeIdentity {
        self.identity
    }

    /// Dense aggregate of the list.
    ///
    /// # Errors
    /// `DenseAllocation` when the N×N matrix cannot be reserved.
    pub fn aggregate(&self) -> NetworkResult<AggregateNetwork> {
        AggregateNetwork::from_pairs(self.n(), &self.pairs, self.tau)
    }

    /// Per-node partner index for the memory-saving estimator.
    ///
    /// # Errors
    /// `IndexAllocation` when the O(N + |E|) index cannot be reserved.
    pub fn incidence(&self) -> NetworkResult<IncidenceIndex> {
        IncidenceIndex::build(self.n(), &self.pairs)
    }
}

/// Per-node sorted partner lists in CSR form.
///
/// Partners of node `i` are `partners[offsets[i]..offsets[i + 1]]`, sorted,
/// with a partner repeated once per observed row. The length of that slice
/// is the incidence count of `i` across both endpoint columns.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidenceIndex {
    offsets: Vec<usize>,
    partners: Vec<usize>,
    n_edges: usize,
}

impl IncidenceIndex {
    /// Build the index in O(N + |E| log d) time and O(N + |E|) memory.
    ///
    /// # Errors
    /// `IndexAllocation` when the offset, cursor or partner buffers cannot
    /// be reserved.
    pub fn build(n: usize, pairs: &[(usize, usize)]) -> NetworkResult<Self> {
        let len =
            n.checked_add(1).ok_or(NetworkError::IndexAllocation { nodes: n, entries: None })?;
        let mut offsets = try_index_buffer(len, n)?;
        for &(a, b) in pairs.iter().filter(|(a, b)| a != b) {
            offsets[a + 1] += 1;
            offsets[b + 1] += 1;
        }
        for i in 0..n {
            offsets[i + 1] += offsets[i];
        }
        let mut cursor = try_index_buffer(len, n)?;
        cursor.copy_from_slice(&offsets);
        let mut partners = try_index_buffer(offsets[n], n)?;
        let mut n_edges = 0usize;
        for &(a, b) in pairs.iter().filter(|(a, b)| a != b) {
            partners[cursor[a]] = b;
            cursor[a] += 1;
            partners[cursor[b]] = a;
            cursor[b] += 1;
            n_edges += 1;
        }
        for i in 0..n {
            partners[offsets[i]..offsets[i + 1]].sort_unstable();
        }
        Ok(Self { offsets, partners, n_edges })
    }

    pub fn n(&self) -> usize {
        self.offsets.len() - 1
    }

    /// Number of non-self rows |E|.
    pub fn n_edges(&self) -> usize {
        self.n_edges
    }

    /// Sorted partners of node `i`, with repetitions.
    pub fn partners(&self, i: usize) -> &[usize] {
        &self.partners[self.offsets[i]..self.offsets[i + 1]]
    }

    /// Incidence count of node `i`.
    pub fn degree(&self, i: usize) -> usize {
        self.offsets[i + 1] - self.offsets[i]
    }

    pub fn degrees(&self) -> Array1<f64> {
        (0..self.n()).map(|i| self.degree(i) as f64).collect()
    }

    /// `(j, m_ij)` for every distinct partner `j` of `i`, in increasing `j`.
    pub fn runs(&self, i: usize) -> PartnerRuns<'_> {
        PartnerRuns { rest: self.partners(i) }
    }
}

/// Zero-filled `Vec<usize>` of `len` entries, reserved fallibly.
fn try_index_buffer(len: usize, nodes: usize) -> NetworkResult<Vec<usize>> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| NetworkError::IndexAllocation { nodes, entries: Some(len) })?;
    buf.resize(len, 0);
    Ok(buf)
}

/// Iterator over runs of equal partners in a sorted slice.
#[derive(Debug, Clone)]
pub struct PartnerRuns<'a> {
    rest: &'a [usize],
}

impl Iterator for PartnerRuns<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let &first = self.rest.first()?;
        let len = self.rest.iter().take_while(|&&p| p == first).count();
        self.rest = &self.rest[len..];
        Some((first, len))
    }
}
