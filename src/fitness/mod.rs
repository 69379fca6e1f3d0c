//! fitness — activity-parameter estimation under the fitness model.
//!
//! Purpose
//! -------
//! Fit one activity parameter `x_i` per node so that, with tie
//! probabilities `u_ij = x_i x_j` per snapshot, the expected aggregate
//! matches the observed one in the sense of the stationarity conditions
//! `H(x) = 0`. Two interchangeable systems are provided:
//!
//! - [`DenseFitness`] over a [`FitnessContext`] holding the N×N aggregate.
//! - [`StreamingFitness`] over a [`StreamingContext`] holding only an
//!   incidence index, with optional per-node parallelism via [`NodePool`].
//!
//! Key behaviors
//! -------------
//! - [`estimate_dense`] / [`estimate_streaming`] resolve the start from an
//!   [`InitialGuess`], call the root finder and return an
//!   [`ActivityEstimate`] whether or not the solve converged.
//! - Both systems supply an analytic merit gradient and share a
//!   [`cache::ResidualCache`] so `H(x)` is evaluated once per iterate.
//!
//! Conventions
//! -----------
//! - Estimation does not log; the filter layer reports convergence.

pub mod cache;
pub mod dense;
pub mod errors;
pub mod estimate;
pub mod init;
pub mod pool;
pub mod streaming;

pub use self::dense::{DenseFitness, FitnessContext};
pub use self::errors::{FitnessError, FitnessResult};
pub use self::estimate::{estimate_dense, estimate_streaming, ActivityEstimate};
pub use self::init::InitialGuess;
pub use self::pool::NodePool;
pub use self::streaming::{StreamingContext, StreamingFitness};

pub mod prelude {
    pub use super::errors::{FitnessError, FitnessResult};
    pub use super::estimate::{estimate_dense, estimate_streaming, ActivityEstimate};
    pub use super::init::InitialGuess;
    pub use super::pool::NodePool;
}
