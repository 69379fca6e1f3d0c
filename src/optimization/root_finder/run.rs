//! Execution helper that runs an `argmin` L-BFGS solver on a merit problem
//! and returns a crate-friendly [`RootOutcome`].
use std::cell::RefCell;

use crate::optimization::{
    errors::OptResult,
    root_finder::{
        adapter::{IterateTracker, MeritAdapter, OutsideDomain},
        traits::{ResidualSystem, RootOutcome, SolverOptions},
        types::{Grad, Point},
    },
};
use argmin::core::{Executor, IterState, Solver, State, TerminationStatus};

/// Run L-BFGS on `½‖H‖²` starting at `x0`.
///
/// The returned point is the lowest-merit iterate recorded by `tracker`,
/// falling back to argmin's own best parameter when nothing was recorded.
///
/// Backend failures (line-search breakdown, a non-finite merit near a pole
/// of `H`) do not abort the solve: the best point seen so far is returned
/// and `status` carries the error text. Convergence is always decided by
/// the residual sup-norm at the returned point.
///
/// `outside` selects how the merit treats points the system rejects via
/// `in_domain`; see [`OutsideDomain`].
///
/// # Errors
/// - Propagates system errors raised while re-evaluating `H` at the
///   returned point.
/// - `MissingPointHat` / `InvalidPointHat` when no finite point exists.
///
/// # Examples
/// ```ignore
/// let tracker = RefCell::new(IterateTracker::new());
/// let solver = build_solver_more_thuente(&opts)?;
/// let out = run_lbfgs(&system, &ctx, x0, &opts, solver, OutsideDomain::Fail, &tracker)?;
/// println!("done in {} iters, |H| = {:e}", out.iterations, out.residual_norm);
/// ```
pub fn run_lbfgs<'a, R, S>(
    system: &'a R, ctx: &'a R::Context, x0: Point, opts: &SolverOptions, solver: S,
    outside: OutsideDomain, tracker: &'a RefCell<IterateTracker>,
) -> OptResult<RootOutcome>
where
    R: ResidualSystem,
    S: Solver<MeritAdapter<'a, R>, IterState<Point, Grad, (), (), (), f64>>,
{
    let problem = MeritAdapter::new(system, ctx, tracker).with_outside_domain(outside);
    let mut executor = Executor::new(problem, solver).configure(|state| state.param(x0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        executor = executor.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        executor = executor.configure(|state| state.max_iters(max_iter as u64));
    }

    let (argmin_best, status, iterations, fn_evals) = match executor.run() {
        Ok(result) => {
            let mut state = result.state().clone();
            let status = match state.get_termination_status() {
                TerminationStatus::NotTerminated => "Not terminated".to_string(),
                other => format!("{other:?}"),
            };
            let counts = state.get_func_counts().clone();
            (state.take_best_param(), status, state.get_iter(), counts)
        }
        Err(err) => (None, format!("Solver stopped early: {err}"), 0, tracker.borrow().counts()),
    };

    let x_hat = tracker.borrow().best_point().cloned().or(argmin_best);
    match x_hat {
        Some(x) => {
            let residual = system.residual(&x, ctx)?;
            RootOutcome::new(Some(x), &residual, opts.f_tol, status, iterations, fn_evals)
        }
        None => RootOutcome::new(None, &Point::zeros(0), opts.f_tol, status, iterations, fn_evals),
    }
}
