use argmin::core::{ArgminError, Error};

/// Crate-wide result alias for solver operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Implies that FD should be used
    GradientNotImplemented,

    /// Gradient dimensions do not match point dimensions.
    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Gradient elements need to be finite
    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- Residual system ----
    /// Residual length does not match the number of unknowns.
    ResidualDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Initial point length does not match the system size.
    InitialPointDimMismatch {
        expected: usize,
        found: usize,
    },

    /// Initial point entries need to be finite.
    InvalidInitialPoint {
        index: usize,
        value: f64,
    },

    // ---- SolverOptions ----
    /// Gradient tolerance needs to be positive and finite.
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    /// Cost change tolerance needs to be positive and finite.
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    /// Residual tolerance needs to be positive and finite.
    InvalidFTol {
        tol: f64,
        reason: &'static str,
    },
    /// Maximum iterations needs to be positive.
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    /// At least one tolerance must be provided.
    NoTolerancesProvided,

    /// Invalid solver method name.
    InvalidMethod {
        name: String,
        reason: &'static str,
    },

    /// lbfgs_mem needs to be at least 1.
    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Cost function ----
    /// Merit function returned a non-finite value.
    NonFiniteCost {
        value: f64,
    },

    // ---- Solver outcome ----
    /// Final point must be finite.
    InvalidPointHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    /// No final point was produced.
    MissingPointHat,

    // ---- Argmin ---
    /// Wrapper for argmin::InvalidParameter
    InvalidParameter {
        text: String,
    },
    /// Wrapper for argmin::NotImplemented
    NotImplemented {
        text: String,
    },
    /// Wrapper for argmin::NotInitialized
    NotInitialized {
        text: String,
    },
    /// Wrapper for argmin::ConditionViolated
    ConditionViolated {
        text: String,
    },
    /// Wrapper for argmin::CheckPointNotFound
    CheckPointNotFound {
        text: String,
    },
    /// Wrapper for argmin::PotentialBug
    PotentialBug {
        text: String,
    },
    /// Wrapper for argmin::ImpossibleError
    ImpossibleError {
        text: String,
    },
    /// Wrapper for other argmin::Error types
    BackendError {
        text: String,
    },

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Analytic merit gradient not implemented")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Invalid gradient at index {index}: {value}: {reason}")
            }

            // ---- Residual system ----
            OptError::ResidualDimMismatch { expected, found } => {
                write!(f, "Residual dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InitialPointDimMismatch { expected, found } => {
                write!(f, "Initial point dimension mismatch: expected {expected}, found {found}")
            }
            OptError::InvalidInitialPoint { index, value } => {
                write!(f, "Invalid initial point at index {index}: {value}, must be finite")
            }

            // ---- SolverOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "Invalid gradient tolerance {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "Invalid cost function change tolerance {tol}: {reason}")
            }
            OptError::InvalidFTol { tol, reason } => {
                write!(f, "Invalid residual tolerance {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "Invalid maximum iterations {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "No tolerances provided")
            }
            OptError::InvalidMethod { name, reason } => {
                write!(f, "Invalid solver method '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "Invalid L-BFGS memory {mem}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Non-finite merit value: {value}")
            }

            // ---- Solver outcome ----
            OptError::InvalidPointHat { index, value, reason } => {
                write!(f, "Invalid solution entry at index {index}: {value}: {reason}")
            }
            OptError::MissingPointHat => {
                write!(f, "Solver produced no solution point")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => {
                write!(f, "Invalid parameter: {text}")
            }
            OptError::NotImplemented { text } => {
                write!(f, "Not implemented: {text}")
            }
            OptError::NotInitialized { text } => {
                write!(f, "Not initialized: {text}")
            }
            OptError::ConditionViolated { text } => {
                write!(f, "Condition violated: {text}")
            }
            OptError::CheckPointNotFound { text } => {
                write!(f, "Checkpoint not found: {text}")
            }
            OptError::PotentialBug { text } => {
                write!(f, "Potential bug: {text}")
            }
            OptError::ImpossibleError { text } => {
                write!(f, "Impossible error: {text}")
            }
            OptError::BackendError { text } => {
                write!(f, "Backend error: {text}")
            }

            // ---- Fallback ----
            OptError::UnknownError => {
                write!(f, "Unknown error")
            }
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        if let Some(opt_err) = original_err.downcast_ref::<OptError>() {
            return opt_err.clone();
        }
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Conversion of argmin errors into `OptError`, including errors that
    //   originated as `OptError` inside a cost or gradient evaluation.
    // - Payload embedding in `Display` messages.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure an `OptError` raised inside a merit evaluation survives the
    // round trip through `argmin::core::Error` unchanged.
    //
    // Given
    // -----
    // - `OptError::NonFiniteCost { value: inf }` converted into an argmin
    //   `Error` via `?`-style `into()`.
    //
    // Expect
    // ------
    // - Converting back yields the identical `OptError`.
    fn from_argmin_error_recovers_original_opt_error() {
        // Arrange
        let original = OptError::NonFiniteCost { value: f64::INFINITY };
        let wrapped: Error = original.clone().into();

        // Act
        let recovered = OptError::from(wrapped);

        // Assert
        assert_eq!(recovered, original);
    }

    #[test]
    // Purpose
    // -------
    // Verify that native argmin errors map to their named wrappers.
    //
    // Given
    // -----
    // - An `ArgminError::InvalidParameter` with a short message.
    //
    // Expect
    // ------
    // - `OptError::InvalidParameter` carrying the same text.
    fn from_argmin_error_maps_invalid_parameter() {
        // Arrange
        let wrapped: Error = ArgminError::InvalidParameter { text: "bad tol".to_string() }.into();

        // Act
        let converted = OptError::from(wrapped);

        // Assert
        assert_eq!(converted, OptError::InvalidParameter { text: "bad tol".to_string() });
    }

    #[test]
    // Purpose
    // -------
    // Check that `Display` output embeds the offending name for an invalid
    // solver method.
    //
    // Given
    // -----
    // - `OptError::InvalidMethod { name: "hybr", .. }`.
    //
    // Expect
    // ------
    // - The message contains `'hybr'`.
    fn display_invalid_method_embeds_name() {
        // Arrange
        let err = OptError::InvalidMethod { name: "hybr".to_string(), reason: "unsupported" };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("'hybr'"), "unexpected message: {msg}");
    }
}
