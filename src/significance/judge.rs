//! Judging policies for turning p-values into significant ties.
use std::{fmt, str::FromStr};

/// How a tie is judged significant at level α.
///
/// - `PValue` (`"p_val"`): `p_ij ≤ α` and `A_ij > 0`.
/// - `InvBinom` (`"inv_binom"`): `A_ij > t_ij`, where `t_ij` is the α-level
///   upper quantile of `Binomial(τ, u_ij)`.
///
/// Both policies are evaluated on the same survival function and flag the
/// same ties; they differ only in which quantity is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JudgePolicy {
    #[default]
    PValue,
    InvBinom,
}

/// Error for a judge name that is neither `p_val` nor `inv_binom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownJudge(pub String);

impl fmt::Display for UnknownJudge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown judge '{}': expected 'p_val' or 'inv_binom'", self.0)
    }
}

impl std::error::Error for UnknownJudge {}

impl FromStr for JudgePolicy {
    type Err = UnknownJudge;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "p_val" => Ok(JudgePolicy::PValue),
            "inv_binom" => Ok(JudgePolicy::InvBinom),
            other => Err(UnknownJudge(other.to_string())),
        }
    }
}

impl fmt::Display for JudgePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JudgePolicy::PValue => write!(f, "p_val"),
            JudgePolicy::InvBinom => write!(f, "inv_binom"),
        }
    }
}

impl JudgePolicy {
    /// Parse a judge name, falling back to `PValue` for anything unknown.
    ///
    /// The rejected name is returned alongside so that the caller can
    /// surface it instead of failing the run.
    pub fn parse_lenient(s: &str) -> (Self, Option<UnknownJudge>) {
        match s.parse() {
            Ok(policy) => (policy, None),
            Err(unknown) => (JudgePolicy::PValue, Some(unknown)),
        }
    }
}
