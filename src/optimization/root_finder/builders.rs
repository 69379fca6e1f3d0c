//! root_finder::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Build L-BFGS solvers for the merit minimization, applying the crate's
//! tolerance and memory options so callers never touch Argmin's generic
//! wiring.
//!
//! Conventions
//! -----------
//! - Builders do **not** set the initial point or `max_iters`; both are
//!   applied by the runner.
//! - When a tolerance is `None`, Argmin's defaults remain in effect.
//! - Errors are reported via [`OptResult`].
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    root_finder::{
        traits::SolverOptions,
        types::{
            Cost, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS, Point,
        },
    },
};

/// Construct L-BFGS with the Hager–Zhang line search.
///
/// # Errors
/// Propagates Argmin's rejection of any configured tolerance.
pub fn build_solver_hager_zhang(opts: &SolverOptions) -> OptResult<LbfgsHagerZhang> {
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), opts.memory());
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with the More–Thuente line search.
///
/// # Errors
/// Propagates Argmin's rejection of any configured tolerance.
pub fn build_solver_more_thuente(opts: &SolverOptions) -> OptResult<LbfgsMoreThuente> {
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), opts.memory());
    configure_lbfgs(lbfgs, opts)
}

/// Apply optional gradient and merit-change tolerances to an L-BFGS solver,
/// whatever its line search.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Point, Grad, Cost>, opts: &SolverOptions,
) -> OptResult<LBFGS<L, Point, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
