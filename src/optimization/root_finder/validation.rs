//! Validation helpers for the nonlinear-system solver.
//!
//! This module centralizes common consistency checks used across the
//! solver interface:
//!
//! - **Tolerance checks**: [`verify_tol_grad`], [`verify_tol_cost`] and
//!   [`verify_f_tol`] ensure numeric tolerances are finite and strictly
//!   positive when provided.
//! - **Vector checks**: [`validate_grad`], [`validate_residual_dim`] and
//!   [`validate_initial_point`] enforce dimensions and finite entries.
//! - **Solutions**: [`validate_point_hat`] ensures a final point exists.
use crate::optimization::{
    errors::{OptError, OptResult},
    root_finder::types::{Grad, Point, Residual},
};

/// Validate the optional gradient‐norm tolerance.
///
/// - Accepts `None` (no stopping rule on gradient).
/// - If `Some`, the value must be **finite** and **strictly positive**.
///
/// # Errors
/// Returns [`OptError::InvalidTolGrad`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolGrad { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the optional merit-change tolerance.
///
/// # Errors
/// Returns [`OptError::InvalidTolCost`] if the value is non-finite or ≤ 0.0.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    if let Some(tol) = tol {
        if !tol.is_finite() {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be finite." });
        }
        if tol <= 0.0 {
            return Err(OptError::InvalidTolCost { tol, reason: "Tolerance must be positive." });
        }
    }
    Ok(())
}

/// Validate the residual sup-norm tolerance used to declare convergence.
///
/// # Errors
/// Returns [`OptError::InvalidFTol`] if the value is non-finite or ≤ 0.0.
pub fn verify_f_tol(tol: f64) -> OptResult<()> {
    if !tol.is_finite() {
        return Err(OptError::InvalidFTol { tol, reason: "Tolerance must be finite." });
    }
    if tol <= 0.0 {
        return Err(OptError::InvalidFTol { tol, reason: "Tolerance must be positive." });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] with the index/value/reason of the first
///   offending element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Check that a residual has one entry per unknown.
///
/// Non-finite entries are allowed here; they surface later as a
/// non-finite merit value.
pub fn validate_residual_dim(residual: &Residual, dim: usize) -> OptResult<()> {
    if residual.len() != dim {
        return Err(OptError::ResidualDimMismatch { expected: dim, found: residual.len() });
    }
    Ok(())
}

/// Validate a starting point against the system size and finiteness.
///
/// # Errors
/// - [`OptError::InitialPointDimMismatch`] if `x0.len() != dim`.
/// - [`OptError::InvalidInitialPoint`] for the first non-finite entry.
pub fn validate_initial_point(x0: &Point, dim: usize) -> OptResult<()> {
    if x0.len() != dim {
        return Err(OptError::InitialPointDimMismatch { expected: dim, found: x0.len() });
    }
    match x0.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(OptError::InvalidInitialPoint { index, value: x0[index] }),
        None => Ok(()),
    }
}

/// Validate and unwrap the final point reported by the solver.
///
/// # Errors
/// - [`OptError::MissingPointHat`] if no vector was provided.
/// - [`OptError::InvalidPointHat`] if any element is non-finite.
pub fn validate_point_hat(x_hat: Option<Point>) -> OptResult<Point> {
    let x = x_hat.ok_or(OptError::MissingPointHat)?;
    for (index, &value) in x.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidPointHat {
                index,
                value,
                reason: "Solution entries must be finite.",
            });
        }
    }
    Ok(x)
}
