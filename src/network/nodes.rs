//! Node identifiers and the label ↔ index mapping.
//!
//! Raw endpoints arrive as [`NodeToken`]s. Normalization decides once,
//! for the whole input, whether nodes are dense indices or external labels
//! ([`NodeIdentity`]); nothing downstream branches on token kinds again.
use std::collections::HashMap;
use std::fmt;

/// A raw edge endpoint: a dense integer index or an opaque label.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeToken {
    Index(usize),
    Label(String),
}

impl NodeToken {
    /// Classify a text field: non-negative integers become `Index`, anything
    /// else becomes `Label`.
    pub fn parse(field: &str) -> Self {
        match field.parse::<usize>() {
            Ok(i) => NodeToken::Index(i),
            Err(_) => NodeToken::Label(field.to_string()),
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, NodeToken::Label(_))
    }
}

impl fmt::Display for NodeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeToken::Index(i) => write!(f, "{i}"),
            NodeToken::Label(s) => write!(f, "{s}"),
        }
    }
}

impl From<usize> for NodeToken {
    fn from(i: usize) -> Self {
        NodeToken::Index(i)
    }
}

impl From<&str> for NodeToken {
    fn from(s: &str) -> Self {
        NodeToken::Label(s.to_string())
    }
}

impl From<String> for NodeToken {
    fn from(s: String) -> Self {
        NodeToken::Label(s)
    }
}

/// Bijective mapping between labels and indices `0..len()`, in order of
/// first appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeLabels {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl NodeLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `label`, assigning the next free index on first sight.
    pub fn intern(&mut self, label: String) -> usize {
        if let Some(&i) = self.index.get(&label) {
            return i;
        }
        let i = self.labels.len();
        self.index.insert(label.clone(), i);
        self.labels.push(label);
        i
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label of node `i`.
    pub fn label(&self, i: usize) -> Option<&str> {
        self.labels.get(i).map(String::as_str)
    }

    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    /// Labels indexed by node.
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    pub fn into_vec(self) -> Vec<String> {
        self.labels
    }
}

/// How the nodes of a normalized network are identified.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeIdentity {
    /// Nodes are the integers `0..n`.
    Dense { n: usize },
    /// Nodes are external labels resolved through the mapping.
    Labeled(NodeLabels),
}

impl NodeIdentity {
    pub fn n(&self) -> usize {
        match self {
            NodeIdentity::Dense { n } => *n,
            NodeIdentity::Labeled(labels) => labels.len(),
        }
    }

    pub fn labels(&self) -> Option<&NodeLabels> {
        match self {
            NodeIdentity::Dense { .. } => None,
            NodeIdentity::Labeled(labels) => Some(labels),
        }
    }

    pub fn into_labels(self) -> Option<NodeLabels> {
        match self {
            NodeIdentity::Dense { .. } => None,
            NodeIdentity::Labeled(labels) => Some(labels),
        }
    }

    /// Display name of node `i`: its label, or the index itself.
    pub fn name(&self, i: usize) -> String {
        match self {
            NodeIdentity::Dense { .. } => i.to_string(),
            NodeIdentity::Labeled(labels) => {
                labels.label(i).map(str::to_string).unwrap_or_else(|| i.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Ensure text fields classify as indices only when they are
    // non-negative integers.
    //
    // Given
    // -----
    // - `"12"`, `"-3"`, `"alice"`.
    //
    // Expect
    // ------
    // - `Index(12)`, `Label("-3")`, `Label("alice")`.
    fn node_token_parse_classifies_fields() {
        // Act / Assert
        assert_eq!(NodeToken::parse("12"), NodeToken::Index(12));
        assert_eq!(NodeToken::parse("-3"), NodeToken::Label("-3".to_string()));
        assert!(NodeToken::parse("alice").is_label());
    }

    #[test]
    // Purpose
    // -------
    // Verify that interning assigns indices by first appearance and is
    // idempotent for repeated labels.
    //
    // Given
    // -----
    // - The sequence `b, a, b, c`.
    //
    // Expect
    // ------
    // - Indices `0, 1, 0, 2` and a mapping that round-trips.
    fn node_labels_intern_in_first_appearance_order() {
        // Arrange
        let mut labels = NodeLabels::new();

        // Act
        let ids: Vec<usize> =
            ["b", "a", "b", "c"].iter().map(|s| labels.intern(s.to_string())).collect();

        // Assert
        assert_eq!(ids, vec![0, 1, 0, 2]);
        assert_eq!(labels.len(), 3);
        for i in 0..labels.len() {
            let label = labels.label(i).expect("in range");
            assert_eq!(labels.index_of(label), Some(i));
        }
    }
}
