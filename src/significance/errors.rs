//! Errors for the probability and significance tester.
//!
//! The tester itself cannot fail numerically (invalid probabilities become
//! NaN p-values); what remains are shape mismatches and the dense N×N
//! allocations it shares with the normalizer.
use crate::network::errors::NetworkError;

/// Result alias for tester paths that may produce [`SignificanceError`].
pub type SignificanceResult<T> = Result<T, SignificanceError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SignificanceError {
    /// One activity parameter per node is required.
    ParamsLength { expected: usize, found: usize },

    /// Allocating a dense output matrix failed.
    Network(NetworkError),
}

impl std::error::Error for SignificanceError {}

impl std::fmt::Display for SignificanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignificanceError::ParamsLength { expected, found } => {
                write!(f, "Got {found} activity parameters for {expected} nodes")
            }
            SignificanceError::Network(err) => write!(f, "{err}"),
        }
    }
}

impl From<NetworkError> for SignificanceError {
    fn from(err: NetworkError) -> Self {
        SignificanceError::Network(err)
    }
}
