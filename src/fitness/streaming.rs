//! Memory-saving activity-parameter system.
//!
//! Purpose
//! -------
//! Evaluate the same stationarity conditions as [`crate::fitness::dense`]
//! without an N×N matrix, reading tie counts from an [`IncidenceIndex`]
//! instead of a dense row.
//!
//! Key behaviors
//! -------------
//! - Per node, the residual is split as
//!
//!   ```text
//!   H_i = Σ_{j≠i} −τ u_ij / (1 − u_ij) + Σ_{(j, m_ij) ∈ runs(i)} m_ij / (1 − u_ij)
//!   ```
//!
//!   with `u_ij = x_i x_j`. The first sum runs over all nodes, the second
//!   only over the observed partners of `i`; together they equal the dense
//!   formula exactly.
//! - The merit gradient uses the same split for
//!   `g_kj x_j = (m_kj − τ) x_j / (1 − u_kj)²` and reuses the cached `H(x)`.
//! - Every node is one task on the context's [`NodePool`]; results are
//!   collected by node index.
//!
//! Performance
//! -----------
//! - Memory is O(N + |E|) beyond the iterate; each evaluation is O(N² + |E|)
//!   time, split across the pool's workers.
use crate::{
    fitness::{cache::ResidualCache, dense::below_pole, pool::NodePool},
    network::IncidenceIndex,
    optimization::{
        errors::{OptError, OptResult},
        root_finder::{Grad, Point, Residual, ResidualSystem},
    },
};

/// Immutable data for the memory-saving system.
#[derive(Debug)]
pub struct StreamingContext {
    index: IncidenceIndex,
    tau: usize,
    pool: NodePool,
}

impl StreamingContext {
    pub fn new(index: IncidenceIndex, tau: usize, pool: NodePool) -> Self {
        Self { index, tau, pool }
    }

    pub fn index(&self) -> &IncidenceIndex {
        &self.index
    }

    pub fn n(&self) -> usize {
        self.index.n()
    }

    pub fn tau(&self) -> usize {
        self.tau
    }

    pub fn pool(&self) -> &NodePool {
        &self.pool
    }
}

/// The memory-saving stationarity system `H(x) = 0`.
#[derive(Debug, Default)]
pub struct StreamingFitness {
    cache: ResidualCache,
}

impl StreamingFitness {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResidualSystem for StreamingFitness {
    type Context = StreamingContext;

    fn residual(&self, x: &Point, ctx: &StreamingContext) -> OptResult<Residual> {
        Ok(self.cache.get_or_compute(x, || streaming_residual(ctx, x)))
    }

    fn check(&self, x: &Point, ctx: &StreamingContext) -> OptResult<()> {
        if x.len() != ctx.n() {
            return Err(OptError::InitialPointDimMismatch { expected: ctx.n(), found: x.len() });
        }
        Ok(())
    }

    fn merit_gradient(&self, x: &Point, ctx: &StreamingContext) -> OptResult<Grad> {
        let h = self.residual(x, ctx)?;
        Ok(streaming_merit_gradient(ctx, x, &h))
    }

    fn in_domain(&self, x: &Point, _ctx: &StreamingContext) -> bool {
        below_pole(x)
    }
}

/// `H(x)` from an incidence index.
pub fn streaming_residual(ctx: &StreamingContext, x: &Point) -> Residual {
    let tau = ctx.tau as f64;
    let index = &ctx.index;
    ctx.pool.map_nodes(x.len(), |i| {
        let xi = x[i];
        let expected: f64 = x
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .map(|(_, &xj)| {
                let u = xi * xj;
                -tau * u / (1.0 - u)
            })
            .sum();
        let observed: f64 = index.runs(i).map(|(j, m)| m as f64 / (1.0 - xi * x[j])).sum();
        expected + observed
    })
}

/// `∇(½‖H‖²)` from an incidence index and a precomputed `H(x)`.
pub fn streaming_merit_gradient(ctx: &StreamingContext, x: &Point, h: &Residual) -> Grad {
    let tau = ctx.tau as f64;
    let index = &ctx.index;
    ctx.pool.map_nodes(x.len(), |k| {
        let xk = x[k];
        let (mut own, mut cross) = (0.0, 0.0);
        for (j, (&xj, &hj)) in x.iter().zip(h.iter()).enumerate() {
            if j == k {
                continue;
            }
            let d = 1.0 - xk * xj;
            let w = -tau * xj / (d * d);
            own += w;
            cross += w * hj;
        }
        for (j, m) in index.runs(k) {
            let d = 1.0 - xk * x[j];
            let w = m as f64 * x[j] / (d * d);
            own += w;
            cross += w * h[j];
        }
        h[k] * own + cross
    })
}
