//! High-level entry point for solving a user-provided `ResidualSystem`.
//!
//! Selects an L-BFGS solver with either More–Thuente or Hager–Zhang line
//! search, wraps the system in a `MeritAdapter` (which minimizes
//! `½‖H(x)‖²`) and delegates the run to `run_lbfgs`.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptResult,
    root_finder::{
        adapter::{IterateTracker, OutsideDomain},
        builders::{build_solver_hager_zhang, build_solver_more_thuente},
        run::run_lbfgs,
        traits::{OptMethod, ResidualSystem, RootOutcome, SolverOptions},
        types::Point,
        validation::{validate_initial_point, validate_residual_dim},
    },
};

/// Solve `H(x) = 0` by L-BFGS on the merit `½‖H(x)‖²`.
///
/// # Behavior
/// - Calls `system.check(x0, ctx)` once.
/// - Evaluates `H(x0)`; if its sup-norm is already within `opts.f_tol`,
///   returns `x0` with zero iterations.
/// - Otherwise builds the solver selected by `opts.method` and runs it.
///   Hager–Zhang runs on a penalized merit ([`OutsideDomain::Penalize`])
///   because its bracketing tries steps far past any pole of `H`;
///   More–Thuente keeps non-finite merits as line-search errors.
///   The lowest-merit point ever evaluated is reported, together with its
///   residual norm; `converged` is `residual_norm ≤ f_tol`.
///
/// # Errors
/// - Propagates any error from `system.check` or from evaluating `H(x0)`.
/// - `InitialPointDimMismatch` / `ResidualDimMismatch` on shape problems.
/// - Builder errors for invalid tolerances.
///
/// Backend runtime failures are **not** errors; they yield a
/// non-converged [`RootOutcome`].
///
/// # Example
/// ```rust
/// use ndarray::{array, Array1};
/// use st_filter::optimization::errors::OptResult;
/// use st_filter::optimization::root_finder::{solve, ResidualSystem, SolverOptions};
///
/// // H(x) = x² - 4, root at 2.
/// struct Square;
/// impl ResidualSystem for Square {
///     type Context = f64;
///     fn residual(&self, x: &Array1<f64>, c: &f64) -> OptResult<Array1<f64>> {
///         Ok(x.mapv(|v| v * v - c))
///     }
///     fn check(&self, _: &Array1<f64>, _: &f64) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = solve(&Square, &4.0, array![1.5], &SolverOptions::default())?;
/// assert!(out.converged);
/// assert!((out.x_hat[0] - 2.0).abs() < 1e-5);
/// # Ok::<(), st_filter::optimization::errors::OptError>(())
/// ```
pub fn solve<R: ResidualSystem>(
    system: &R, ctx: &R::Context, x0: Point, opts: &SolverOptions,
) -> OptResult<RootOutcome> {
    system.check(&x0, ctx)?;
    let dim = x0.len();
    validate_initial_point(&x0, dim)?;
    let r0 = system.residual(&x0, ctx)?;
    validate_residual_dim(&r0, dim)?;
    let early = RootOutcome::new(
        Some(x0.clone()),
        &r0,
        opts.f_tol,
        "Initial point within f_tol".to_string(),
        0,
        Default::default(),
    )?;
    if early.converged {
        return Ok(early);
    }

    let tracker = RefCell::new(IterateTracker::new());
    match opts.method {
        OptMethod::MoreThuente => {
            let solver = build_solver_more_thuente(opts)?;
            run_lbfgs(system, ctx, x0, opts, solver, OutsideDomain::Fail, &tracker)
        }
        OptMethod::HagerZhang => {
            let solver = build_solver_hager_zhang(opts)?;
            run_lbfgs(system, ctx, x0, opts, solver, OutsideDomain::Penalize, &tracker)
        }
    }
}
