//! Adapter that exposes a user `ResidualSystem` as an `argmin` problem.
//!
//! A root of `H` is searched for by minimizing `c(x) = ½‖H(x)‖²`. Analytic
//! merit gradients are used when the system provides one; otherwise the
//! merit closure is finite-differenced. Every successful merit evaluation
//! is offered to an [`IterateTracker`] so the lowest-merit point survives a
//! backend failure.
//!
//! Line searches that step far along the search direction (Hager–Zhang
//! always evaluates a step of 1e5 while bracketing) need a merit that is
//! finite everywhere. With [`OutsideDomain::Penalize`] points outside
//! `ResidualSystem::in_domain`, or with a non-finite merit, cost
//! [`OUTSIDE_DOMAIN_COST`] and get the gradient `x − x_best`, which points
//! away from the best point seen so the bracket shrinks back towards it.
use std::cell::RefCell;

use crate::optimization::{
    errors::OptError,
    root_finder::{
        finite_diff::fd_gradient,
        traits::ResidualSystem,
        types::{Cost, FnEvalMap, Grad, Point, OUTSIDE_DOMAIN_COST},
        validation::{validate_grad, validate_residual_dim},
    },
};
use argmin::core::{CostFunction, Error, Gradient};

/// Lowest-merit point seen across all evaluations of one solve.
#[derive(Debug, Clone, Default)]
pub struct IterateTracker {
    best: Option<(Point, Cost)>,
    evaluations: u64,
}

impl IterateTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `x` if its merit is finite and strictly below the best so far.
    pub fn record(&mut self, x: &Point, cost: Cost) {
        self.evaluations += 1;
        if !cost.is_finite() {
            return;
        }
        match &self.best {
            Some((_, best)) if *best <= cost => {}
            _ => self.best = Some((x.clone(), cost)),
        }
    }

    pub fn best_point(&self) -> Option<&Point> {
        self.best.as_ref().map(|(x, _)| x)
    }

    /// Evaluation counters in the same shape argmin reports.
    pub fn counts(&self) -> FnEvalMap {
        FnEvalMap::from([("cost_count".to_string(), self.evaluations)])
    }
}

/// What the merit does at points where the system is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutsideDomain {
    /// Non-finite merits are errors that stop the line search.
    #[default]
    Fail,
    /// Out-of-domain points and non-finite merits get a finite penalty.
    Penalize,
}

/// Bridges a user [`ResidualSystem`] to `argmin`'s `CostFunction` and
/// `Gradient`.
///
/// - `CostFunction::cost` returns `½‖H(x)‖²`.
/// - `Gradient::gradient` returns the system's analytic merit gradient, or a
///   finite-difference gradient of the merit.
pub struct MeritAdapter<'a, S: ResidualSystem> {
    pub system: &'a S,
    pub ctx: &'a S::Context,
    tracker: &'a RefCell<IterateTracker>,
    outside: OutsideDomain,
}

impl<'a, S: ResidualSystem> MeritAdapter<'a, S> {
    pub fn new(system: &'a S, ctx: &'a S::Context, tracker: &'a RefCell<IterateTracker>) -> Self {
        Self { system, ctx, tracker, outside: OutsideDomain::Fail }
    }

    pub fn with_outside_domain(mut self, outside: OutsideDomain) -> Self {
        self.outside = outside;
        self
    }

    fn penalizes(&self) -> bool {
        self.outside == OutsideDomain::Penalize
    }

    /// Gradient of the penalized region: `x − x_best`, or `x` before any
    /// in-domain point has been recorded.
    fn back_off_gradient(&self, x: &Point) -> Grad {
        match self.tracker.borrow().best_point() {
            Some(best) if best.len() == x.len() => x - best,
            _ => x.clone(),
        }
    }
}

impl<S: ResidualSystem> CostFunction for MeritAdapter<'_, S> {
    type Param = Point;
    type Output = Cost;

    /// Evaluate `c(x) = ½‖H(x)‖²`.
    ///
    /// # Errors
    /// - Propagates any `OptError` from the system's `residual`.
    /// - `ResidualDimMismatch` if `H(x)` has the wrong length.
    /// - `NonFiniteCost` if the merit is not finite (e.g. on a pole of `H`)
    ///   and the adapter does not penalize.
    fn cost(&self, x: &Self::Param) -> Result<Self::Output, Error> {
        if self.penalizes() && !self.system.in_domain(x, self.ctx) {
            return Ok(OUTSIDE_DOMAIN_COST);
        }
        let r = self.system.residual(x, self.ctx)?;
        validate_residual_dim(&r, x.len())?;
        let value = 0.5 * r.dot(&r);
        self.tracker.borrow_mut().record(x, value);
        if !value.is_finite() {
            if self.penalizes() {
                return Ok(OUTSIDE_DOMAIN_COST);
            }
            return Err((OptError::NonFiniteCost { value }).into());
        }
        Ok(value)
    }
}

impl<S: ResidualSystem> Gradient for MeritAdapter<'_, S> {
    type Param = Point;
    type Gradient = Grad;

    /// Evaluate `∇c(x)`.
    ///
    /// - Analytic gradients are validated and returned as-is.
    /// - `GradientNotImplemented` switches to [`fd_gradient`] on the merit
    ///   closure; cost failures inside the closure are captured and
    ///   re-raised once differencing finishes.
    /// - When penalizing, out-of-domain points and non-finite analytic
    ///   gradients yield the back-off gradient.
    ///
    /// # Errors
    /// - Propagates system errors other than `GradientNotImplemented`.
    /// - Propagates validation and captured cost errors.
    fn gradient(&self, x: &Self::Param) -> Result<Self::Gradient, Error> {
        if self.penalizes() && !self.system.in_domain(x, self.ctx) {
            return Ok(self.back_off_gradient(x));
        }
        match self.system.merit_gradient(x, self.ctx) {
            Ok(g) => match validate_grad(&g, x.len()) {
                Ok(()) => Ok(g),
                Err(OptError::InvalidGradient { .. }) if self.penalizes() => {
                    Ok(self.back_off_gradient(x))
                }
                Err(e) => Err(e.into()),
            },
            Err(OptError::GradientNotImplemented) => {
                let closure_err: RefCell<Option<Error>> = RefCell::new(None);
                let merit = |p: &Point| -> f64 {
                    match self.cost(p) {
                        Ok(val) => val,
                        Err(e) => {
                            let mut slot = closure_err.borrow_mut();
                            if slot.is_none() {
                                *slot = Some(e);
                            }
                            f64::NAN
                        }
                    }
                };
                Ok(fd_gradient(x, &merit, &closure_err)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}
