//! Errors for temporal-network normalization (shape checks, edge-list
//! parsing and dense allocation).
//!
//! ## Conventions
//! - **Indices are 0-based**; parse errors report 1-based line numbers.
//! - Allocation failures of the dense matrix and of the incidence index
//!   are surfaced as errors instead of aborting; the dense message points
//!   the caller at the memory-saving mode, the index message at sparse
//!   numeric node ids.

/// Result alias for normalization paths that may produce [`NetworkError`].
pub type NetworkResult<T> = Result<T, NetworkError>;

#[derive(Debug, Clone, PartialEq)]
pub enum NetworkError {
    // ---- Shape ----
    /// Adjacency matrices must be square.
    NonSquare { rows: usize, cols: usize },

    /// At least one snapshot is required (τ ≥ 1).
    NoSnapshots,

    /// The edge list contains no rows.
    EmptyEdgeList,

    /// Aggregate counts must be finite and non-negative.
    InvalidCount { row: usize, col: usize, value: f64 },

    // ---- Resources ----
    /// The dense N×N structure could not be allocated. `bytes` is `None`
    /// when the size itself overflows `usize`.
    DenseAllocation { nodes: usize, bytes: Option<usize> },

    /// The memory-saving incidence index could not be allocated. `entries`
    /// is `None` when the length itself overflows `usize`.
    IndexAllocation { nodes: usize, entries: Option<usize> },

    // ---- Edge-list files ----
    /// Reading the input failed.
    Io { message: String },

    /// A row could not be parsed as `snapshot node node`.
    Parse { line: usize, message: String },
}

impl std::error::Error for NetworkError {}

impl std::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkError::NonSquare { rows, cols } => {
                write!(f, "Adjacency matrix must be square, got {rows}x{cols}")
            }
            NetworkError::NoSnapshots => {
                write!(f, "At least one snapshot is required")
            }
            NetworkError::EmptyEdgeList => {
                write!(f, "Edge list is empty")
            }
            NetworkError::InvalidCount { row, col, value } => {
                write!(f, "Invalid tie count {value} at ({row}, {col}): must be finite and >= 0")
            }
            NetworkError::DenseAllocation { nodes, bytes } => {
                match bytes {
                    Some(b) => write!(
                        f,
                        "Could not allocate a dense {nodes}x{nodes} matrix ({b} bytes); \
                         retry with the memory-saving mode"
                    ),
                    None => write!(
                        f,
                        "A dense {nodes}x{nodes} matrix does not fit in memory; \
                         retry with the memory-saving mode"
                    ),
                }
            }
            NetworkError::IndexAllocation { nodes, entries } => {
                match entries {
                    Some(len) => write!(
                        f,
                        "Could not allocate an incidence index of {len} entries for {nodes} nodes"
                    )?,
                    None => {
                        write!(f, "An incidence index for {nodes} nodes does not fit in memory")?
                    }
                }
                write!(
                    f,
                    "; numeric node ids are used as indices, relabel sparse ids to 0..N or \
                     pass string labels"
                )
            }
            NetworkError::Io { message } => {
                write!(f, "Failed to read edge list: {message}")
            }
            NetworkError::Parse { line, message } => {
                write!(f, "Malformed edge list at line {line}: {message}")
            }
        }
    }
}

impl From<std::io::Error> for NetworkError {
    fn from(err: std::io::Error) -> Self {
        NetworkError::Io { message: err.to_string() }
    }
}
