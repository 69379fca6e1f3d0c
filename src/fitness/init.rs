//! Initial-guess policies for the activity-parameter solve.
//!
//! Purpose
//! -------
//! Decide where the root search starts. The default is the
//! configuration-model heuristic, which scales each node's average degree
//! by the network's overall activity level; a fixed vector allows warm
//! starts from a previous fit.
//!
//! Conventions
//! -----------
//! - Dense form: `x_i = (Σ_j A_ij / τ) / sqrt(Σ_ij A_ij / τ)`.
//! - Memory-saving form: `x_i = (d_i / τ) / sqrt(2|E| / τ)` with `d_i` the
//!   incidence count of `i`. With self-ties removed both forms coincide.
//! - A network without ties has no configuration-model start and yields
//!   [`FitnessError::NoTies`].
use crate::{
    fitness::errors::{FitnessError, FitnessResult},
    network::{AggregateNetwork, IncidenceIndex},
};
use ndarray::Array1;

/// Where the solver starts.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InitialGuess {
    /// Configuration-model heuristic computed from the data.
    #[default]
    ConfigurationModel,
    /// Explicit starting vector, one entry per node.
    Fixed(Array1<f64>),
}

impl InitialGuess {
    /// Validated fixed start.
    ///
    /// # Errors
    /// `InvalidInitialGuess` for the first non-finite entry.
    pub fn fixed(x0: Array1<f64>) -> FitnessResult<Self> {
        if let Some(index) = x0.iter().position(|v| !v.is_finite()) {
            return Err(FitnessError::InvalidInitialGuess { index, value: x0[index] });
        }
        Ok(InitialGuess::Fixed(x0))
    }

    /// Starting point for the dense estimator.
    ///
    /// # Errors
    /// - `NoTies` when the aggregate is all zero.
    /// - `InitialGuessLength` when a fixed start has the wrong length.
    pub fn dense_start(&self, network: &AggregateNetwork) -> FitnessResult<Array1<f64>> {
        match self {
            InitialGuess::ConfigurationModel => {
                let tau = network.tau() as f64;
                configuration_start(network.row_sums(), network.total(), tau)
            }
            InitialGuess::Fixed(x0) => check_len(x0, network.n()),
        }
    }

    /// Starting point for the memory-saving estimator.
    ///
    /// # Errors
    /// As for [`InitialGuess::dense_start`].
    pub fn streaming_start(&self, index: &IncidenceIndex, tau: usize) -> FitnessResult<Array1<f64>> {
        match self {
            InitialGuess::ConfigurationModel => {
                let total = 2.0 * index.n_edges() as f64;
                configuration_start(index.degrees(), total, tau as f64)
            }
            InitialGuess::Fixed(x0) => check_len(x0, index.n()),
        }
    }
}

fn configuration_start(degrees: Array1<f64>, total: f64, tau: f64) -> FitnessResult<Array1<f64>> {
    if total <= 0.0 {
        return Err(FitnessError::NoTies);
    }
    let scale = (total / tau).sqrt();
    Ok(degrees.mapv(|d| d / tau / scale))
}

fn check_len(x0: &Array1<f64>, n: usize) -> FitnessResult<Array1<f64>> {
    if x0.len() != n {
        return Err(FitnessError::InitialGuessLength { expected: n, found: x0.len() });
    }
    Ok(x0.clone())
}
