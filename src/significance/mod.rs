//! significance — binomial tests of observed tie counts.
//!
//! Purpose
//! -------
//! Judge each observed tie against the fitted fitness-model null: with
//! per-snapshot probability `u_ij = x_i x_j`, the count over τ snapshots is
//! `Binomial(τ, u_ij)`, and a tie is significant when its observed count
//! is improbably high.
//!
//! Key behaviors
//! -------------
//! - [`binomial`] computes `P(X ≥ k)` and the α-level upper quantile with
//!   `statrs`.
//! - [`test_ties`] builds the probability, p-value and significance
//!   matrices for a dense aggregate under a [`JudgePolicy`].
//! - [`JudgePolicy::parse_lenient`] maps unknown policy names to `p_val`
//!   and hands the rejected name back; `filter` turns it into a warning.
//!
//! Conventions
//! -----------
//! - `p ≤ α` is significant, on every entry point. `inv_binom` uses
//!   `A_ij > t_ij` with `t_ij` the smallest count whose survival
//!   probability is at most α, which is the same test.
//! - Nothing here logs.

pub mod binomial;
pub mod errors;
pub mod judge;
pub mod tester;

pub use self::binomial::{tie_p_value, upper_quantile};
pub use self::errors::{SignificanceError, SignificanceResult};
pub use self::judge::{JudgePolicy, UnknownJudge};
pub use self::tester::{probability_matrix, test_ties, SignificanceMatrices};

pub mod prelude {
    pub use super::errors::{SignificanceError, SignificanceResult};
    pub use super::judge::JudgePolicy;
    pub use super::tester::{test_ties, SignificanceMatrices};
}
