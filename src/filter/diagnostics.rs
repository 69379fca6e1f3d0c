//! Non-fatal conditions reported alongside a result.
//!
//! A run that hits one of these still returns its best-effort output; the
//! diagnostic tells the caller how far to trust it.
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The solver stopped without reaching the residual tolerance; the best
    /// iterate was kept.
    SolverNotConverged { residual_norm: f64, status: String },

    /// The judge name was not recognized; `p_val` was used instead.
    InvalidJudge { given: String },

    /// The memory-saving estimator ran; no dense matrices were produced and
    /// the run is slower than the dense path.
    MemorySavingMode,
}

impl Diagnostic {
    /// Whether the activity parameters themselves may be inaccurate.
    pub fn degrades_estimate(&self) -> bool {
        matches!(self, Diagnostic::SolverNotConverged { .. })
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::SolverNotConverged { residual_norm, status } => write!(
                f,
                "Root finding failed to find an appropriate solution \
                 (max |H| = {residual_norm:.3e}, {status}); the solution could be wrong"
            ),
            Diagnostic::InvalidJudge { given } => write!(
                f,
                "Judge '{given}' is not one of 'p_val' or 'inv_binom'; \
                 significant ties are computed from p-values"
            ),
            Diagnostic::MemorySavingMode => write!(
                f,
                "Using memory-saving mode; the run time is much slower than the default \
                 and only activity parameters are returned"
            ),
        }
    }
}
