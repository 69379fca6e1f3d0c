//! root_finder::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the vector aliases and L-BFGS solver types used to solve a
//! nonlinear system `H(x) = 0` through its merit function
//! `c(x) = ½‖H(x)‖²`. Keeping them in one place lets the rest of the
//! solver layer stay agnostic to `ndarray` and Argmin generics.
//!
//! Conventions
//! -----------
//! - `Point`, `Residual` and `Grad` all have length equal to the number of
//!   unknowns of the system.
//! - `Cost` is the merit value `½‖H‖²`, never a signed objective.
//! - `DEFAULT_F_TOL` is the residual sup-norm below which a solve counts as
//!   converged; it equals the cube root of machine epsilon.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::Array1;
use std::collections::HashMap;

/// Candidate solution vector `x`.
pub type Point = Array1<f64>;

/// Residual vector `H(x)` of the nonlinear system.
pub type Residual = Array1<f64>;

/// Gradient of the merit function, `∇c(x)`.
pub type Grad = Array1<f64>;

/// Merit value `c(x) = ½‖H(x)‖²`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
///
/// Maps counter names (e.g., `"cost_count"`) to counts.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 10;

/// Default residual sup-norm tolerance (≈ `f64::EPSILON^(1/3)`).
pub const DEFAULT_F_TOL: f64 = 6e-6;

/// Merit reported for points outside a system's domain when the adapter
/// runs with [`OutsideDomain::Penalize`](super::adapter::OutsideDomain).
pub const OUTSIDE_DOMAIN_COST: Cost = 1e100;

/// Hager–Zhang line search specialized to the solver's numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Point, Grad, Cost>;

/// More–Thuente line search specialized to the solver's numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Point, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Point, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Point, Grad, Cost>;
