//! optimization — nonlinear-system solving and its error surface.
//!
//! Purpose
//! -------
//! Provide the numerical engine that the fitness estimators hand their
//! stationarity equations to. A system `H(x) = 0` is solved by minimizing
//! `½‖H(x)‖²` with Argmin's L-BFGS, and every failure mode is folded into a
//! single enum (`errors::OptError`) with a common result alias.
//!
//! Conventions
//! -----------
//! - Points, residuals and gradients are `ndarray::Array1<f64>` aliases
//!   defined in `root_finder::types`.
//! - Public entry points that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors.
//! - This module and its submodules avoid I/O and logging.
//!
//! Downstream usage
//! ----------------
//! - `fitness` implements `ResidualSystem` for the dense and streaming
//!   estimators and calls `root_finder::solve`.
//! - Front-ends import the curated surface via `optimization::prelude::*`.

pub mod errors;
pub mod root_finder;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::root_finder::prelude::*;
}
