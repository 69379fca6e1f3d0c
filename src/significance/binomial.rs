//! Binomial tail probabilities for tie counts.
//!
//! Under the fitted null, the number of snapshots in which {i, j} is active
//! is `X ~ Binomial(τ, u_ij)`. The p-value of an observed count `k` is
//! `P(X ≥ k)`, i.e. `sf(k − 1)` for `k ≥ 1` and exactly 1 for `k = 0`.
//!
//! A probability outside `[0, 1]` (or NaN) can only come from a solve that
//! failed to converge; it yields a NaN p-value and no quantile, which every
//! caller treats as "not significant".
use statrs::distribution::{Binomial, DiscreteCDF};

fn null_distribution(tau: u64, u: f64) -> Option<Binomial> {
    Binomial::new(u, tau).ok()
}

/// `P(X ≥ count)` for `X ~ Binomial(tau, u)`, or NaN when `u` is not a
/// probability.
pub fn tie_p_value(count: u64, tau: u64, u: f64) -> f64 {
    match null_distribution(tau, u) {
        None => f64::NAN,
        Some(_) if count == 0 => 1.0,
        Some(dist) => dist.sf(count - 1),
    }
}

/// Smallest `t ∈ [0, τ]` with `P(X > t) ≤ alpha`.
///
/// An observed count `k` exceeds this threshold exactly when its p-value is
/// at most `alpha`. Returns `None` when `u` is not a probability or when no
/// such `t` exists (`alpha < 0` or NaN).
pub fn upper_quantile(tau: u64, u: f64, alpha: f64) -> Option<u64> {
    let dist = null_distribution(tau, u)?;
    if !(dist.sf(tau) <= alpha) {
        return None;
    }
    // sf is non-increasing in t, so bisect on the predicate.
    let (mut lo, mut hi) = (0_u64, tau);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if dist.sf(mid) <= alpha {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    Some(lo)
}
