//! root_finder — argmin-powered solver for nonlinear systems `H(x) = 0`.
//!
//! Purpose
//! -------
//! Provide a small, Argmin-backed layer that finds a root of a
//! user-supplied residual map by minimizing its merit `c(x) = ½‖H(x)‖²`
//! with L-BFGS. Callers implement [`ResidualSystem`] and invoke [`solve`].
//!
//! Key behaviors
//! -------------
//! - [`adapter::MeritAdapter`] turns a residual system plus its explicit
//!   context into an Argmin cost/gradient problem and records the
//!   lowest-merit point seen.
//! - [`solve`] validates the start, short-circuits when `x0` is already a
//!   root, selects the line search and normalizes the run into a
//!   [`RootOutcome`].
//! - [`finite_diff`] supplies merit gradients when the system has no
//!   analytic one.
//!
//! Invariants & assumptions
//! ------------------------
//! - `converged` in a [`RootOutcome`] always means
//!   `max_i |H_i(x_hat)| ≤ f_tol`, independent of Argmin's own reason for
//!   stopping.
//! - A backend failure mid-run is not an error; the best point so far is
//!   returned with `converged` computed as above.
//! - This module never panics or logs; reporting is left to callers.
//!
//! Testing notes
//! -------------
//! - Unit tests in submodules cover option validation, adapter merit and
//!   gradient behavior, builder wiring and end-to-end solves on small
//!   algebraic systems.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::solve;
pub use self::traits::{OptMethod, ResidualSystem, RootOutcome, SolverOptions, Tolerances};
pub use self::types::{Cost, FnEvalMap, Grad, Point, Residual, DEFAULT_F_TOL, DEFAULT_LBFGS_MEM};

pub mod prelude {
    pub use super::api::solve;
    pub use super::traits::{OptMethod, ResidualSystem, RootOutcome, SolverOptions, Tolerances};
    pub use super::types::{Grad, Point, Residual};
}
