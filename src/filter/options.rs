//! Options for the filter entry points.
//!
//! [`FilterOptions`] is shared by all three entry points. Edge-list input
//! additionally takes [`EdgeListOptions`] to pick the estimator.
use crate::{
    filter::{diagnostics::Diagnostic, errors::FilterResult},
    fitness::init::InitialGuess,
    optimization::root_finder::{OptMethod, SolverOptions},
    significance::judge::{JudgePolicy, UnknownJudge},
};

/// Significance level, judging policy, solver configuration and start.
///
/// `alpha` is not range-checked; conventional values lie in (0, 1).
/// Building with [`FilterOptions::with_judge`] parses leniently and keeps
/// the fallback notice, which the entry points forward as a warning.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOptions {
    pub alpha: f64,
    pub judge: JudgePolicy,
    pub solver: SolverOptions,
    pub init: InitialGuess,
    judge_fallback: Option<Diagnostic>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            judge: JudgePolicy::PValue,
            solver: SolverOptions::default(),
            init: InitialGuess::ConfigurationModel,
            judge_fallback: None,
        }
    }
}

impl FilterOptions {
    pub fn new(alpha: f64, judge: &str, opt_method: &str) -> FilterResult<Self> {
        Self::default().with_alpha(alpha).with_judge(judge).with_method(opt_method)
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the policy by name; unknown names select `p_val`.
    pub fn with_judge(mut self, judge: &str) -> Self {
        let (policy, unknown) = JudgePolicy::parse_lenient(judge);
        self.judge = policy;
        self.judge_fallback = unknown.map(|UnknownJudge(given)| Diagnostic::InvalidJudge { given });
        self
    }

    pub fn with_policy(mut self, judge: JudgePolicy) -> Self {
        self.judge = judge;
        self.judge_fallback = None;
        self
    }

    /// Set the line search by name.
    ///
    /// # Errors
    /// `InvalidMethod` (wrapped) for names the solver does not know.
    pub fn with_method(mut self, opt_method: &str) -> FilterResult<Self> {
        let method: OptMethod = opt_method.parse()?;
        self.solver = self.solver.with_method(method);
        Ok(self)
    }

    pub fn with_solver(mut self, solver: SolverOptions) -> Self {
        self.solver = solver;
        self
    }

    pub fn with_init(mut self, init: InitialGuess) -> Self {
        self.init = init;
        self
    }

    pub(crate) fn judge_fallback(&self) -> Option<&Diagnostic> {
        self.judge_fallback.as_ref()
    }
}

/// Estimator choice for edge-list input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemoryMode {
    /// Build the dense aggregate and return every matrix.
    #[default]
    Dense,
    /// Estimate from an incidence index; only activity parameters are
    /// returned. `threads == 0` lets rayon pick the worker count.
    MemorySaving { parallel: bool, threads: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeListOptions {
    pub memory: MemoryMode,
}

impl EdgeListOptions {
    /// `parallel` only has an effect together with `memorysave`.
    pub fn new(memorysave: bool, parallel: bool) -> Self {
        let memory = if memorysave {
            MemoryMode::MemorySaving { parallel, threads: 0 }
        } else {
            MemoryMode::Dense
        };
        Self { memory }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        if let MemoryMode::MemorySaving { parallel, .. } = self.memory {
            self.memory = MemoryMode::MemorySaving { parallel, threads };
        }
        self
    }
}
