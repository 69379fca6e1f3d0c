//! Pairwise null probabilities, p-values and the significance matrix.
//!
//! Purpose
//! -------
//! Given fitted activity parameters `x` and the aggregate they were fitted
//! on, build `u_ij = x_i x_j`, the p-value matrix `P(X ≥ A_ij)` with
//! `X ~ Binomial(τ, u_ij)`, and the binary matrix of significant ties under
//! a [`JudgePolicy`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Probability and p-value diagonals are NaN; the significance diagonal
//!   is 0.
//! - A tie with `A_ij = 0` is never significant.
//! - Every cell is evaluated independently, so symmetric inputs give
//!   symmetric outputs.
use crate::{
    network::{try_zeros, AggregateNetwork},
    significance::{
        binomial::{tie_p_value, upper_quantile},
        errors::{SignificanceError, SignificanceResult},
        judge::JudgePolicy,
    },
};
use ndarray::{Array1, Array2};

/// The dense outputs of a significance run.
#[derive(Debug, Clone, PartialEq)]
pub struct SignificanceMatrices {
    /// 1 where the tie is significant, 0 elsewhere.
    pub adj_sig: Array2<u8>,
    /// The aggregate the test was run on.
    pub adj_all: Array2<f64>,
    /// `P(X ≥ A_ij)` under the null; NaN on the diagonal.
    pub p_mat: Array2<f64>,
}

impl SignificanceMatrices {
    /// Upper-triangle `(i, j, count, p)` for every significant tie.
    pub fn significant_ties(&self) -> Vec<(usize, usize, f64, f64)> {
        let n = self.adj_sig.nrows();
        let mut ties = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                if self.adj_sig[[i, j]] == 1 {
                    ties.push((i, j, self.adj_all[[i, j]], self.p_mat[[i, j]]));
                }
            }
        }
        ties
    }
}

/// `u_ij = x_i x_j` with a NaN diagonal.
///
/// # Errors
/// `Network(DenseAllocation)` if the N×N matrix cannot be reserved.
pub fn probability_matrix(x: &Array1<f64>) -> SignificanceResult<Array2<f64>> {
    let n = x.len();
    let mut u = try_zeros(n)?;
    for ((i, j), cell) in u.indexed_iter_mut() {
        *cell = if i == j { f64::NAN } else { x[i] * x[j] };
    }
    Ok(u)
}

/// Run the binomial test on every pair of `network`.
///
/// # Errors
/// - `ParamsLength` if `x.len() != N`.
/// - `Network(DenseAllocation)` if an output matrix cannot be reserved.
pub fn test_ties(
    network: &AggregateNetwork, x: &Array1<f64>, alpha: f64, judge: JudgePolicy,
) -> SignificanceResult<SignificanceMatrices> {
    let n = network.n();
    if x.len() != n {
        return Err(SignificanceError::ParamsLength { expected: n, found: x.len() });
    }
    let tau = network.tau() as u64;
    let adj = network.adj();
    let u = probability_matrix(x)?;

    let mut p_mat = try_zeros(n)?;
    let mut adj_sig = Array2::<u8>::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            if i == j {
                p_mat[[i, j]] = f64::NAN;
                continue;
            }
            let count = adj[[i, j]];
            let k = count.round() as u64;
            let p = tie_p_value(k, tau, u[[i, j]]);
            p_mat[[i, j]] = p;
            let significant = count > 0.0
                && match judge {
                    JudgePolicy::PValue => p <= alpha,
                    JudgePolicy::InvBinom => {
                        upper_quantile(tau, u[[i, j]], alpha).is_some_and(|t| k > t)
                    }
                };
            adj_sig[[i, j]] = u8::from(significant);
        }
    }

    Ok(SignificanceMatrices { adj_sig, adj_all: adj.clone(), p_mat })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn network() -> AggregateNetwork {
        let adj = array![
            [0.0, 4.0, 1.0, 0.0],
            [4.0, 0.0, 2.0, 1.0],
            [1.0, 2.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0]
        ];
        AggregateNetwork::from_aggregate(adj.view(), 5).expect("valid")
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Structural properties of the outputs (symmetry, diagonals, range).
    // - The existence guard and policy agreement.
    // - α extremes and invalid probabilities.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Ensure the outputs are symmetric with NaN probability/p-value
    // diagonals, p-values in [0, 1], and a zero significance diagonal.
    //
    // Given
    // -----
    // - A 4-node aggregate over τ = 5 and x = [0.6, 0.7, 0.4, 0.2].
    //
    // Expect
    // ------
    // - As stated above for every cell.
    fn outputs_are_symmetric_with_nan_diagonal() {
        // Arrange
        let net = network();
        let x = array![0.6, 0.7, 0.4, 0.2];

        // Act
        let out = test_ties(&net, &x, 0.05, JudgePolicy::PValue).expect("valid");
        let u = probability_matrix(&x).expect("small");

        // Assert
        for i in 0..4 {
            assert!(out.p_mat[[i, i]].is_nan());
            assert!(u[[i, i]].is_nan());
            assert_eq!(out.adj_sig[[i, i]], 0);
            for j in 0..4 {
                if i != j {
                    assert_eq!(out.p_mat[[i, j]], out.p_mat[[j, i]]);
                    assert_eq!(u[[i, j]], u[[j, i]]);
                    assert!((0.0..=1.0).contains(&out.p_mat[[i, j]]));
                    assert_eq!(out.adj_sig[[i, j]], out.adj_sig[[j, i]]);
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify that both policies flag the same ties and never flag a pair
    // with no observed ties, even at α = 1.
    //
    // Given
    // -----
    // - The 4-node aggregate; α ∈ {0.05, 0.3, 1.0}.
    //
    // Expect
    // ------
    // - Identical `adj_sig` for `PValue` and `InvBinom`.
    // - `adj_sig ≤ 1[A > 0]` entrywise; at α = 1 equality holds.
    fn policies_agree_and_respect_existence_guard() {
        // Arrange
        let net = network();
        let x = array![0.6, 0.7, 0.4, 0.2];

        for alpha in [0.05, 0.3, 1.0] {
            // Act
            let p = test_ties(&net, &x, alpha, JudgePolicy::PValue).expect("valid");
            let q = test_ties(&net, &x, alpha, JudgePolicy::InvBinom).expect("valid");

            // Assert
            assert_eq!(p.adj_sig, q.adj_sig, "alpha = {alpha}");
            for ((idx, &sig), &count) in p.adj_sig.indexed_iter().zip(net.adj().iter()) {
                if count == 0.0 {
                    assert_eq!(sig, 0, "cell {idx:?}");
                } else if alpha >= 1.0 {
                    assert_eq!(sig, 1, "cell {idx:?}");
                }
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Check that a tie whose p-value equals α exactly is significant.
    //
    // Given
    // -----
    // - The 4-node aggregate with α set to the computed p-value of (0, 1).
    //
    // Expect
    // ------
    // - (0, 1) significant under both policies.
    fn p_value_equal_to_alpha_is_significant() {
        // Arrange
        let net = network();
        let x = array![0.6, 0.7, 0.4, 0.2];
        let alpha = tie_p_value(4, 5, 0.6 * 0.7);

        for judge in [JudgePolicy::PValue, JudgePolicy::InvBinom] {
            // Act
            let out = test_ties(&net, &x, alpha, judge).expect("valid");

            // Assert
            assert_eq!(out.p_mat[[0, 1]], alpha);
            assert_eq!(out.adj_sig[[0, 1]], 1, "{judge}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure out-of-range probabilities from a non-converged solve give NaN
    // p-values and no significance rather than an error.
    //
    // Given
    // -----
    // - x = [1.5, 0.9, 0.4, 0.2], so u_01 = 1.35.
    //
    // Expect
    // ------
    // - `p_mat[0][1]` NaN and `adj_sig[0][1] = 0`.
    fn invalid_probability_yields_nan_not_error() {
        // Arrange
        let net = network();
        let x = array![1.5, 0.9, 0.4, 0.2];

        // Act
        let out = test_ties(&net, &x, 0.05, JudgePolicy::PValue).expect("valid");

        // Assert
        assert!(out.p_mat[[0, 1]].is_nan());
        assert_eq!(out.adj_sig[[0, 1]], 0);
    }

    #[test]
    // Purpose
    // -------
    // Check the length guard on activity parameters.
    //
    // Given
    // -----
    // - Three parameters for four nodes.
    //
    // Expect
    // ------
    // - `ParamsLength { expected: 4, found: 3 }`.
    fn test_ties_rejects_wrong_length() {
        let err = test_ties(&network(), &array![0.1, 0.2, 0.3], 0.05, JudgePolicy::PValue);
        assert_eq!(err, Err(SignificanceError::ParamsLength { expected: 4, found: 3 }));
    }
}
