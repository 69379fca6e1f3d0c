//! root_finder::finite_diff — finite-difference merit gradients.
//!
//! Purpose
//! -------
//! Approximate `∇c(x)` for systems that do not supply an analytic merit
//! gradient, without exposing the `finitediff` API to the rest of the
//! solver.
//!
//! Key behaviors
//! -------------
//! - [`fd_gradient`] tries central differences first and falls back to
//!   forward differences when an evaluation fails or the central estimate
//!   is not finite.
//! - [`run_fd_diff`] performs the forward pass with error capture and
//!   post-hoc validation.
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective closure cannot return `Result`, so callers route any
//!   evaluation error into a shared `RefCell<Option<Error>>` and return
//!   `NaN`. The first captured error wins.
//! - Gradients returned from this module satisfy [`validate_grad`].
use crate::optimization::{
    errors::OptResult,
    root_finder::{
        types::{Grad, Point},
        validation::validate_grad,
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// fd_gradient — central-difference gradient with forward fallback.
///
/// Parameters
/// ----------
/// - `x`: point at which `∇c` is approximated.
/// - `func`: merit closure; writes failures into `closure_err` and
///   returns `NaN`.
/// - `closure_err`: shared error slot, cleared between passes.
///
/// Errors
/// ------
/// - The captured evaluation error from the forward pass, if any.
/// - Validation errors from [`validate_grad`] on the forward pass.
pub fn fd_gradient<G: Fn(&Point) -> f64>(
    x: &Point, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let central = x.central_diff(func);
    if closure_err.borrow().is_none() && validate_grad(&central, x.len()).is_ok() {
        return Ok(central);
    }
    run_fd_diff(x, func, closure_err)
}

/// run_fd_diff — forward-difference gradient with error capture and validation.
///
/// Clears `closure_err`, performs `forward_diff`, then returns the
/// captured error if one was written, otherwise the validated gradient.
///
/// # Examples
/// ```rust
/// # use std::cell::RefCell;
/// # use argmin::core::Error;
/// # use ndarray::Array1;
/// # use st_filter::optimization::root_finder::{finite_diff::run_fd_diff, Point};
/// let x: Point = Array1::from(vec![0.0_f64, 1.0]);
/// let closure_err: RefCell<Option<Error>> = RefCell::new(None);
/// let f = |p: &Point| 0.5 * p.dot(p);
///
/// let grad = run_fd_diff(&x, &f, &closure_err).unwrap();
/// assert_eq!(grad.len(), x.len());
/// ```
pub fn run_fd_diff<G: Fn(&Point) -> f64>(
    x: &Point, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = x.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, x.len())?;
    Ok(fd_grad)
}
