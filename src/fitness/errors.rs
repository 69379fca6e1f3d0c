//! Errors for activity-parameter estimation.
//!
//! Solver configuration problems arrive wrapped from
//! [`crate::optimization::errors::OptError`]; estimator-level problems
//! (degenerate input, bad warm starts, pool construction) are named here.
use crate::optimization::errors::OptError;

/// Result alias for estimation paths that may produce [`FitnessError`].
pub type FitnessResult<T> = Result<T, FitnessError>;

#[derive(Debug, Clone, PartialEq)]
pub enum FitnessError {
    /// The network has no ties, so the configuration-model start is 0/0.
    NoTies,

    /// A fixed initial guess must have one entry per node.
    InitialGuessLength { expected: usize, found: usize },

    /// A fixed initial guess must be finite.
    InvalidInitialGuess { index: usize, value: f64 },

    /// The worker pool could not be built.
    ThreadPool { message: String },

    /// Solver configuration or evaluation failure.
    Optimization(OptError),
}

impl std::error::Error for FitnessError {}

impl std::fmt::Display for FitnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FitnessError::NoTies => {
                write!(f, "The network has no observed ties; activity parameters are undefined")
            }
            FitnessError::InitialGuessLength { expected, found } => {
                write!(f, "Initial guess has length {found}, expected {expected}")
            }
            FitnessError::InvalidInitialGuess { index, value } => {
                write!(f, "Initial guess entry {index} is {value}, must be finite")
            }
            FitnessError::ThreadPool { message } => {
                write!(f, "Failed to build worker pool: {message}")
            }
            FitnessError::Optimization(err) => {
                write!(f, "Solver failure: {err}")
            }
        }
    }
}

impl From<OptError> for FitnessError {
    fn from(err: OptError) -> Self {
        FitnessError::Optimization(err)
    }
}

impl From<rayon::ThreadPoolBuildError> for FitnessError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        FitnessError::ThreadPool { message: err.to_string() }
    }
}
