//! filter — significant-tie filtering for temporal networks.
//!
//! Purpose
//! -------
//! Tie the layers together: normalize the input, fit the fitness-model
//! null, test every observed pair and return a [`TieFilterResult`].
//!
//! Key behaviors
//! -------------
//! - Three entry points, one per input form: [`st_filter`] (snapshot
//!   stack), [`st_filter_aggregate`] (aggregate + τ) and
//!   [`st_filter_edges`] (timestamped edge list, optionally memory-saving).
//! - Non-fatal conditions are returned as [`Diagnostic`]s in
//!   `TieFilterResult::warnings` and also logged at `warn` level.
//! - Hard failures are [`FilterError`]s: malformed shapes, empty input, no
//!   ties, solver misconfiguration, and dense allocation failure.
//!
//! Conventions
//! -----------
//! - This is the only layer that logs. `info` carries dimensions, mode and
//!   solver summaries; `debug` carries worker-pool sizing.
//! - The estimator is chosen by the caller; a failed dense allocation is
//!   returned as an error, never silently retried in memory-saving mode.

pub mod api;
pub mod diagnostics;
pub mod errors;
pub mod options;
pub mod outcome;

pub use self::api::{st_filter, st_filter_aggregate, st_filter_edges};
pub use self::diagnostics::Diagnostic;
pub use self::errors::{FilterError, FilterResult};
pub use self::options::{EdgeListOptions, FilterOptions, MemoryMode};
pub use self::outcome::TieFilterResult;
pub use crate::significance::tester::SignificanceMatrices;

pub mod prelude {
    pub use super::api::{st_filter, st_filter_aggregate, st_filter_edges};
    pub use super::diagnostics::Diagnostic;
    pub use super::errors::{FilterError, FilterResult};
    pub use super::options::{EdgeListOptions, FilterOptions, MemoryMode};
    pub use super::outcome::TieFilterResult;
}
