//! The result bag returned by every entry point.
use crate::{
    filter::diagnostics::Diagnostic,
    network::nodes::NodeLabels,
    optimization::root_finder::RootOutcome,
    significance::tester::SignificanceMatrices,
};
use ndarray::{Array1, Array2};

/// Outputs of one filtering run.
///
/// - `activ_params` is always present, converged or not.
/// - `significance` is `None` in memory-saving mode.
/// - `nodes` is `Some` only when the input used non-numeric labels; row and
///   column `i` of every matrix belong to `nodes.label(i)`.
/// - `warnings` lists every non-fatal condition hit during the run.
#[derive(Debug, Clone, PartialEq)]
pub struct TieFilterResult {
    pub activ_params: Array1<f64>,
    pub significance: Option<SignificanceMatrices>,
    pub nodes: Option<NodeLabels>,
    pub solver: RootOutcome,
    pub warnings: Vec<Diagnostic>,
}

impl TieFilterResult {
    pub fn adj_sig(&self) -> Option<&Array2<u8>> {
        self.significance.as_ref().map(|s| &s.adj_sig)
    }

    pub fn adj_all(&self) -> Option<&Array2<f64>> {
        self.significance.as_ref().map(|s| &s.adj_all)
    }

    pub fn p_mat(&self) -> Option<&Array2<f64>> {
        self.significance.as_ref().map(|s| &s.p_mat)
    }

    pub fn converged(&self) -> bool {
        self.solver.converged
    }

    /// Display name of node `i`: its label when labeled, else the index.
    pub fn node_name(&self, i: usize) -> String {
        self.nodes
            .as_ref()
            .and_then(|labels| labels.label(i))
            .map_or_else(|| i.to_string(), str::to_string)
    }

    /// `(i, j, count, p)` with `i < j` for every significant tie; empty in
    /// memory-saving mode.
    pub fn significant_ties(&self) -> Vec<(usize, usize, f64, f64)> {
        self.significance.as_ref().map(SignificanceMatrices::significant_ties).unwrap_or_default()
    }
}
