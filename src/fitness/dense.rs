//! Dense activity-parameter system.
//!
//! Purpose
//! -------
//! Express the fitness-model stationarity conditions
//!
//! ```text
//! H_i(x) = Σ_{j≠i} (A_ij − τ x_i x_j) / (1 − x_i x_j) = 0
//! ```
//!
//! as a [`ResidualSystem`] over an explicit [`FitnessContext`] holding the
//! dense aggregate and τ.
//!
//! Key behaviors
//! -------------
//! - Residuals are computed row by row from the aggregate, O(N²) time with
//!   no N×N temporaries.
//! - The analytic merit gradient is
//!   `∂c/∂x_k = H_k Σ_{j≠k} g_kj x_j + Σ_{j≠k} g_kj x_j H_j` with
//!   `g_kj = (A_kj − τ) / (1 − x_k x_j)²`, reusing the cached `H(x)`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `x_i x_j = 1` is a pole of `H`. The system's domain is
//!   `x_i x_j < 1` for every pair `i ≠ j` ([`below_pole`]); a line search
//!   that penalizes out-of-domain points never evaluates past the pole,
//!   the others rely on the solver's best-iterate fallback.
use crate::{
    fitness::cache::ResidualCache,
    network::AggregateNetwork,
    optimization::{
        errors::{OptError, OptResult},
        root_finder::{Grad, Point, Residual, ResidualSystem},
    },
};
use ndarray::{Array1, Array2};

/// Immutable data for the dense system: the aggregate and its τ.
#[derive(Debug, Clone, PartialEq)]
pub struct FitnessContext {
    network: AggregateNetwork,
}

impl FitnessContext {
    pub fn new(network: AggregateNetwork) -> Self {
        Self { network }
    }

    pub fn network(&self) -> &AggregateNetwork {
        &self.network
    }

    pub fn n(&self) -> usize {
        self.network.n()
    }

    pub fn tau(&self) -> f64 {
        self.network.tau() as f64
    }
}

/// The dense stationarity system `H(x) = 0`.
#[derive(Debug, Default)]
pub struct DenseFitness {
    cache: ResidualCache,
}

impl DenseFitness {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResidualSystem for DenseFitness {
    type Context = FitnessContext;

    fn residual(&self, x: &Point, ctx: &FitnessContext) -> OptResult<Residual> {
        Ok(self.cache.get_or_compute(x, || dense_residual(ctx.network().adj(), ctx.tau(), x)))
    }

    fn check(&self, x: &Point, ctx: &FitnessContext) -> OptResult<()> {
        if x.len() != ctx.n() {
            return Err(OptError::InitialPointDimMismatch { expected: ctx.n(), found: x.len() });
        }
        Ok(())
    }

    fn merit_gradient(&self, x: &Point, ctx: &FitnessContext) -> OptResult<Grad> {
        let h = self.residual(x, ctx)?;
        Ok(dense_merit_gradient(ctx.network().adj(), ctx.tau(), x, &h))
    }

    fn in_domain(&self, x: &Point, _ctx: &FitnessContext) -> bool {
        below_pole(x)
    }
}

/// `true` when `x` is finite and `x_i x_j < 1` for every pair `i ≠ j`.
///
/// The largest pairwise product is the product of the two largest or of
/// the two smallest entries, so one pass suffices.
pub fn below_pole(x: &Point) -> bool {
    let mut top = [f64::NEG_INFINITY; 2];
    let mut bottom = [f64::INFINITY; 2];
    for &v in x.iter() {
        if !v.is_finite() {
            return false;
        }
        if v > top[0] {
            top = [v, top[0]];
        } else if v > top[1] {
            top[1] = v;
        }
        if v < bottom[0] {
            bottom = [v, bottom[0]];
        } else if v < bottom[1] {
            bottom[1] = v;
        }
    }
    if x.len() < 2 {
        return true;
    }
    top[0] * top[1] < 1.0 && bottom[0] * bottom[1] < 1.0
}

/// `H(x)` from a dense aggregate.
pub fn dense_residual(adj: &Array2<f64>, tau: f64, x: &Point) -> Residual {
    (0..x.len())
        .map(|i| {
            let xi = x[i];
            adj.row(i)
                .iter()
                .zip(x.iter())
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, (&a, &xj))| {
                    let u = xi * xj;
                    (a - tau * u) / (1.0 - u)
                })
                .sum::<f64>()
        })
        .collect()
}

/// `∇(½‖H‖²)` from a dense aggregate and a precomputed `H(x)`.
pub fn dense_merit_gradient(adj: &Array2<f64>, tau: f64, x: &Point, h: &Residual) -> Grad {
    (0..x.len())
        .map(|k| {
            let xk = x[k];
            let (own, cross) = adj
                .row(k)
                .iter()
                .zip(x.iter())
                .zip(h.iter())
                .enumerate()
                .filter(|(j, _)| *j != k)
                .fold((0.0, 0.0), |(own, cross), (_, ((&a, &xj), &hj))| {
                    let d = 1.0 - xk * xj;
                    let w = (a - tau) * xj / (d * d);
                    (own + w, cross + w * hj)
                });
            h[k] * own + cross
        })
        .collect::<Array1<f64>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use finitediff::FiniteDiff;
    use ndarray::array;

    fn ring(n: usize, tau: usize) -> FitnessContext {
        let mut adj = Array2::<f64>::zeros((n, n));
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                let d = (j + n - i) % n;
                adj[[i, j]] = if d == 1 || d == n - 1 { 3.0 } else { 1.0 };
            }
        }
        FitnessContext::new(AggregateNetwork::from_aggregate(adj.view(), tau).expect("valid"))
    }

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The residual at a known closed-form root.
    // - Agreement of the analytic merit gradient with finite differences.
    // - Dimension checks.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the residual vanishes at the closed-form root of a symmetric
    // ring network.
    //
    // Given
    // -----
    // - N = 6, τ = 8; ring neighbours tied 3 times, all other pairs once.
    //   Every node sees Σ_j A_ij = 9, so x_i = sqrt(9/40) solves H = 0.
    //
    // Expect
    // ------
    // - `max |H_i| < 1e-12`.
    fn residual_vanishes_at_ring_root() {
        // Arrange
        let ctx = ring(6, 8);
        let x = Array1::from_elem(6, (9.0_f64 / 40.0).sqrt());

        // Act
        let h = DenseFitness::new().residual(&x, &ctx).expect("finite");

        // Assert
        assert!(h.iter().all(|v| v.abs() < 1e-12), "residual {h:?}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure the analytic merit gradient matches central differences of
    // `½‖H‖²`.
    //
    // Given
    // -----
    // - A = [[0,3,1],[3,0,0],[1,0,0]], τ = 4, x = [0.6, 0.4, 0.3].
    //
    // Expect
    // ------
    // - Entrywise agreement within 1e-6.
    fn merit_gradient_matches_finite_differences() {
        // Arrange
        let adj = array![[0.0, 3.0, 1.0], [3.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let ctx =
            FitnessContext::new(AggregateNetwork::from_aggregate(adj.view(), 4).expect("valid"));
        let x = array![0.6, 0.4, 0.3];
        let merit = |p: &Array1<f64>| {
            let h = dense_residual(ctx.network().adj(), ctx.tau(), p);
            0.5 * h.dot(&h)
        };

        // Act
        let analytic = DenseFitness::new().merit_gradient(&x, &ctx).expect("finite");
        let numeric = x.central_diff(&merit);

        // Assert
        for (a, b) in analytic.iter().zip(numeric.iter()) {
            assert!((a - b).abs() < 1e-6, "analytic {a} vs numeric {b}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Check that a start of the wrong length is rejected.
    //
    // Given
    // -----
    // - The 6-node ring and a 5-element start.
    //
    // Expect
    // ------
    // - `InitialPointDimMismatch { expected: 6, found: 5 }`.
    fn check_rejects_wrong_length() {
        // Arrange
        let ctx = ring(6, 8);

        // Act
        let err = DenseFitness::new().check(&Array1::zeros(5), &ctx);

        // Assert
        assert_eq!(err, Err(OptError::InitialPointDimMismatch { expected: 6, found: 5 }));
    }

    #[test]
    // Purpose
    // -------
    // Ensure the domain check looks at the largest pairwise product, from
    // either end of the sorted entries, and ignores the diagonal.
    //
    // Given
    // -----
    // - `[2, 0.1, 0.3]` (largest pair 0.6), `[2, 0.6, 0.1]` (1.2),
    //   `[-2, -0.6, 0.1]` (1.2), a single entry 5 and a NaN entry.
    //
    // Expect
    // ------
    // - Only the first and the single-entry vector are below the pole.
    fn below_pole_checks_largest_pairwise_product() {
        // Act / Assert
        assert!(below_pole(&array![2.0, 0.1, 0.3]));
        assert!(!below_pole(&array![2.0, 0.6, 0.1]));
        assert!(!below_pole(&array![-2.0, -0.6, 0.1]));
        assert!(below_pole(&array![5.0]));
        assert!(!below_pole(&array![0.1, f64::NAN]));
    }
}
