//! filter::errors — the single error surface of the entry points.
//!
//! Purpose
//! -------
//! Fold the hard failures of every layer into [`FilterError`] so callers of
//! [`crate::filter`] match on one enum. Everything softer (non-convergence,
//! unknown judge) is a [`crate::filter::Diagnostic`] instead.
//!
//! Conventions
//! -----------
//! - Layer errors are wrapped, not flattened; `Display` forwards the inner
//!   message unchanged.
//! - With `python-bindings`, every variant maps to `ValueError` except
//!   allocation failures (dense matrix or incidence index), which map to
//!   `MemoryError`.
use crate::{
    fitness::errors::FitnessError, network::errors::NetworkError,
    optimization::errors::OptError, significance::errors::SignificanceError,
};

#[cfg(feature = "python-bindings")]
use pyo3::{
    exceptions::{PyMemoryError, PyValueError},
    PyErr,
};

/// Result alias for the filter entry points.
pub type FilterResult<T> = Result<T, FilterError>;

#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Input shape, parsing, dense or index allocation.
    Network(NetworkError),

    /// Degenerate input for estimation, bad warm start or solver setup.
    Fitness(FitnessError),

    /// Tester shape mismatch or allocation.
    Significance(SignificanceError),
}

impl FilterError {
    /// Whether this is the dense-allocation failure that the memory-saving
    /// mode avoids.
    pub fn is_dense_allocation(&self) -> bool {
        matches!(
            self,
            FilterError::Network(NetworkError::DenseAllocation { .. })
                | FilterError::Significance(SignificanceError::Network(
                    NetworkError::DenseAllocation { .. }
                ))
        )
    }

    /// Whether any buffer, dense or incidence index, failed to allocate.
    pub fn is_allocation(&self) -> bool {
        self.is_dense_allocation()
            || matches!(self, FilterError::Network(NetworkError::IndexAllocation { .. }))
    }
}

impl std::error::Error for FilterError {}

impl std::fmt::Display for FilterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FilterError::Network(err) => write!(f, "{err}"),
            FilterError::Fitness(err) => write!(f, "{err}"),
            FilterError::Significance(err) => write!(f, "{err}"),
        }
    }
}

impl From<NetworkError> for FilterError {
    fn from(err: NetworkError) -> Self {
        FilterError::Network(err)
    }
}

impl From<FitnessError> for FilterError {
    fn from(err: FitnessError) -> Self {
        FilterError::Fitness(err)
    }
}

impl From<SignificanceError> for FilterError {
    fn from(err: SignificanceError) -> Self {
        FilterError::Significance(err)
    }
}

impl From<OptError> for FilterError {
    fn from(err: OptError) -> Self {
        FilterError::Fitness(FitnessError::Optimization(err))
    }
}

#[cfg(feature = "python-bindings")]
impl From<FilterError> for PyErr {
    fn from(err: FilterError) -> PyErr {
        if err.is_allocation() {
            PyMemoryError::new_err(err.to_string())
        } else {
            PyValueError::new_err(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover layer conversions and the allocation checks.
    //
    // They intentionally DO NOT cover:
    // - The `From<FilterError> for PyErr` conversion, which needs the
    //   Python C API.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure allocation failures are recognized whichever layer raised them
    // and that the message still recommends the memory-saving mode.
    //
    // Given
    // -----
    // - `DenseAllocation` wrapped directly and via the tester.
    // - An `OptError` converted through `From`.
    //
    // Expect
    // ------
    // - `is_dense_allocation` true for both allocation errors, false for the
    //   solver error; the solver error lands under `Fitness`.
    fn dense_allocation_is_detected_through_layers() {
        // Arrange
        let alloc = NetworkError::DenseAllocation { nodes: 10, bytes: Some(800) };
        let direct = FilterError::from(alloc.clone());
        let nested = FilterError::from(SignificanceError::from(alloc));
        let solver = FilterError::from(OptError::NoTolerancesProvided);

        // Act / Assert
        assert!(direct.is_dense_allocation());
        assert!(nested.is_dense_allocation());
        assert!(direct.to_string().contains("memory-saving"));
        assert!(!solver.is_dense_allocation());
        assert!(matches!(solver, FilterError::Fitness(FitnessError::Optimization(_))));
    }

    #[test]
    // Purpose
    // -------
    // Check that an incidence-index failure counts as an allocation error
    // but not as the dense one the memory-saving mode avoids.
    //
    // Given
    // -----
    // - `IndexAllocation` for 2^40 + 1 nodes.
    //
    // Expect
    // ------
    // - `is_allocation` true, `is_dense_allocation` false; the message
    //   names the node-id cause.
    fn index_allocation_is_an_allocation_error() {
        // Arrange
        let nodes = (1usize << 40) + 1;
        let err = FilterError::from(NetworkError::IndexAllocation {
            nodes,
            entries: Some(nodes + 1),
        });

        // Act / Assert
        assert!(err.is_allocation());
        assert!(!err.is_dense_allocation());
        assert!(err.to_string().contains("node ids"));
    }
}
