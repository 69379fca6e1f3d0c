//! Public API surface for nonlinear-system solving.
//!
//! - [`ResidualSystem`]: trait users implement for their system `H(x) = 0`.
//! - [`SolverOptions`] and [`Tolerances`]: configuration for the solver.
//! - [`OptMethod`]: choice of line search used by L-BFGS.
//! - [`RootOutcome`]: normalized result returned by the high-level `solve` API.
//!
//! Convention: a root of `H` is found by minimizing the merit
//! `c(x) = ½‖H(x)‖²`. If an analytic gradient is provided, it must be the
//! gradient of that merit, `∇c(x) = J(x)ᵀ H(x)`.
use crate::optimization::{
    errors::{OptError, OptResult},
    root_finder::{
        types::{FnEvalMap, Grad, Point, Residual, DEFAULT_F_TOL, DEFAULT_LBFGS_MEM},
        validation::{validate_point_hat, verify_f_tol, verify_tol_cost, verify_tol_grad},
    },
};
use std::{fmt, str::FromStr};

/// User-implemented nonlinear system `H(x) = 0`.
///
/// The context is passed explicitly to every call; implementors hold no
/// hidden state derived from the data.
///
/// Required:
/// - `residual(&Point, &Context) -> OptResult<Residual>`: evaluate `H(x)`.
/// - `check(&Point, &Context) -> OptResult<()>`: validation hook called once
///   before solving.
///
/// Optional:
/// - `merit_gradient(&Point, &Context) -> OptResult<Grad>`: analytic
///   `∇c(x)`. If not implemented, finite differences of the merit are used.
/// - `in_domain(&Point, &Context) -> bool`: whether `H` is defined and
///   smooth at `x`. Defaults to `true` everywhere.
pub trait ResidualSystem {
    type Context;

    // Required methods
    fn residual(&self, x: &Point, ctx: &Self::Context) -> OptResult<Residual>;
    fn check(&self, x: &Point, ctx: &Self::Context) -> OptResult<()>;

    // Optional methods
    fn merit_gradient(&self, _x: &Point, _ctx: &Self::Context) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }

    fn in_domain(&self, _x: &Point, _ctx: &Self::Context) -> bool {
        true
    }
}

/// Line search used inside the L-BFGS solver.
///
/// Parsing is case-insensitive. `"lbfgs"` and `"krylov"` select the default
/// (`MoreThuente`); unknown names return [`OptError::InvalidMethod`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptMethod {
    #[default]
    MoreThuente,
    HagerZhang,
}

impl FromStr for OptMethod {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morethuente" | "lbfgs" | "l-bfgs" | "krylov" => Ok(OptMethod::MoreThuente),
            "hagerzhang" => Ok(OptMethod::HagerZhang),
            _ => Err(OptError::InvalidMethod {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente', 'HagerZhang', \
                         'lbfgs' or 'krylov'.",
            }),
        }
    }
}

impl fmt::Display for OptMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptMethod::MoreThuente => write!(f, "L-BFGS/More-Thuente"),
            OptMethod::HagerZhang => write!(f, "L-BFGS/Hager-Zhang"),
        }
    }
}

/// Solver-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — merit tolerances and iteration limits.
/// - `method: OptMethod` — line search used by L-BFGS.
/// - `lbfgs_mem: Option<usize>` — history size; `None` uses
///   [`DEFAULT_LBFGS_MEM`].
/// - `f_tol: f64` — residual sup-norm at or below which the solve counts
///   as converged.
/// - `verbose: bool` — attaches a terminal observer when the `obs_slog`
///   feature is enabled.
///
/// Default:
/// - `tols`: `tol_grad = 1e-10`, `tol_cost = None`, `max_iter = 1000`
/// - `method`: `MoreThuente`
/// - `lbfgs_mem`: `None`
/// - `f_tol`: [`DEFAULT_F_TOL`]
#[derive(Debug, Clone, PartialEq)]
pub struct SolverOptions {
    pub tols: Tolerances,
    pub method: OptMethod,
    pub lbfgs_mem: Option<usize>,
    pub f_tol: f64,
    pub verbose: bool,
}

impl SolverOptions {
    /// Create a validated set of solver options.
    ///
    /// # Errors
    /// - [`OptError::InvalidLBFGSMem`] if `lbfgs_mem == Some(0)`.
    /// - [`OptError::InvalidFTol`] if `f_tol` is not finite and positive.
    pub fn new(
        tols: Tolerances, method: OptMethod, lbfgs_mem: Option<usize>, f_tol: f64, verbose: bool,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        verify_f_tol(f_tol)?;
        Ok(Self { tols, method, lbfgs_mem, f_tol, verbose })
    }

    /// Same options with a different line search.
    pub fn with_method(mut self, method: OptMethod) -> Self {
        self.method = method;
        self
    }

    pub fn memory(&self) -> usize {
        self.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM)
    }
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-10), tol_cost: None, max_iter: Some(1000) },
            method: OptMethod::MoreThuente,
            lbfgs_mem: None,
            f_tol: DEFAULT_F_TOL,
            verbose: false,
        }
    }
}

/// Merit tolerances and iteration limits used by L-BFGS.
///
/// - `tol_grad`: terminate when the merit gradient norm falls below this.
/// - `tol_cost`: terminate when the change in merit falls below this.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for
    ///   non-finite or non-positive tolerances.
    /// - [`OptError::InvalidMaxIter`] if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

/// Canonical result returned by `solve`.
///
/// - `x_hat`: best point found (lowest merit among evaluated iterates).
/// - `residual_norm`: `max_i |H_i(x_hat)|`; `+∞` if any entry is non-finite.
/// - `converged`: `residual_norm ≤ f_tol`.
/// - `status`: backend termination status or error text.
/// - `iterations`: number of L-BFGS iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`.
#[derive(Debug, Clone, PartialEq)]
pub struct RootOutcome {
    pub x_hat: Point,
    pub residual_norm: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
}

impl RootOutcome {
    /// Build a validated [`RootOutcome`] from raw solver state.
    ///
    /// # Errors
    /// Propagates [`validate_point_hat`] failures.
    pub fn new(
        x_hat_opt: Option<Point>, residual: &Residual, f_tol: f64, status: String,
        iterations: u64, fn_evals: FnEvalMap,
    ) -> OptResult<Self> {
        let x_hat = validate_point_hat(x_hat_opt)?;
        let residual_norm = sup_norm(residual);
        let converged = residual_norm <= f_tol;
        Ok(Self { x_hat, residual_norm, converged, status, iterations: iterations as usize, fn_evals })
    }
}

/// `max_i |r_i|`, or `+∞` when any entry is NaN or infinite.
pub fn sup_norm(r: &Residual) -> f64 {
    r.iter().try_fold(0.0_f64, |acc, v| if v.is_finite() { Some(acc.max(v.abs())) } else { None })
        .unwrap_or(f64::INFINITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Method-name parsing, including the legacy aliases.
    // - Option and tolerance validation.
    // - Convergence classification in `RootOutcome::new`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure legacy solver names map onto the default line search and that
    // parsing ignores case.
    //
    // Given
    // -----
    // - `"krylov"`, `"LBFGS"`, `"HagerZhang"` and an unknown `"hybr"`.
    //
    // Expect
    // ------
    // - The first two parse to `MoreThuente`, the third to `HagerZhang`,
    //   and the last is rejected with `InvalidMethod`.
    fn opt_method_parses_aliases_and_rejects_unknown() {
        // Arrange / Act
        let krylov: Result<OptMethod, _> = "krylov".parse();
        let lbfgs: Result<OptMethod, _> = "LBFGS".parse();
        let hz: Result<OptMethod, _> = "HagerZhang".parse();
        let bad: Result<OptMethod, _> = "hybr".parse();

        // Assert
        assert_eq!(krylov, Ok(OptMethod::MoreThuente));
        assert_eq!(lbfgs, Ok(OptMethod::MoreThuente));
        assert_eq!(hz, Ok(OptMethod::HagerZhang));
        assert!(matches!(bad, Err(OptError::InvalidMethod { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Verify that `Tolerances::new` requires at least one criterion and
    // rejects a zero iteration cap.
    //
    // Given
    // -----
    // - All-`None` tolerances and `max_iter = Some(0)`.
    //
    // Expect
    // ------
    // - `NoTolerancesProvided` and `InvalidMaxIter` respectively.
    fn tolerances_new_requires_a_criterion() {
        // Act
        let none = Tolerances::new(None, None, None);
        let zero_iter = Tolerances::new(None, None, Some(0));

        // Assert
        assert_eq!(none, Err(OptError::NoTolerancesProvided));
        assert!(matches!(zero_iter, Err(OptError::InvalidMaxIter { max_iter: 0, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Check that `SolverOptions::new` rejects zero L-BFGS memory and that
    // the default options carry the documented residual tolerance.
    //
    // Given
    // -----
    // - Valid tolerances with `lbfgs_mem = Some(0)`.
    //
    // Expect
    // ------
    // - `InvalidLBFGSMem`; default `f_tol == DEFAULT_F_TOL`.
    fn solver_options_validate_memory_and_default_f_tol() {
        // Arrange
        let tols = Tolerances::new(Some(1e-8), None, Some(100)).expect("valid tolerances");

        // Act
        let bad = SolverOptions::new(tols, OptMethod::MoreThuente, Some(0), DEFAULT_F_TOL, false);
        let default = SolverOptions::default();

        // Assert
        assert!(matches!(bad, Err(OptError::InvalidLBFGSMem { mem: 0, .. })));
        assert_eq!(default.f_tol, DEFAULT_F_TOL);
        assert_eq!(default.memory(), DEFAULT_LBFGS_MEM);
    }

    #[test]
    // Purpose
    // -------
    // Confirm that convergence is decided by the residual sup-norm and that a
    // non-finite residual entry is never reported as converged.
    //
    // Given
    // -----
    // - A small residual `[1e-7, -2e-7]` and one containing NaN.
    //
    // Expect
    // ------
    // - The first is converged with norm 2e-7; the second has norm +∞.
    fn root_outcome_classifies_by_residual_norm() {
        // Arrange
        let x = array![0.3, 0.4];
        let small = array![1e-7, -2e-7];
        let broken = array![1e-7, f64::NAN];

        // Act
        let ok = RootOutcome::new(Some(x.clone()), &small, 6e-6, "done".into(), 3, FnEvalMap::new())
            .expect("finite point");
        let bad = RootOutcome::new(Some(x), &broken, 6e-6, "done".into(), 3, FnEvalMap::new())
            .expect("finite point");

        // Assert
        assert!(ok.converged);
        assert!((ok.residual_norm - 2e-7).abs() < 1e-20);
        assert!(!bad.converged);
        assert!(bad.residual_norm.is_infinite());
    }
}
