use pv_core::{ErrorInfo, VerifyError};
use serde::{Deserialize, Serialize};

/// How candidates are ordered once the numeric window is known.
///
/// Written as a map with a `mode` field, e.g. `{mode: blended, label_weight: 2.5}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Ranking {
    /// Numeric closeness decides the window; label score breaks ties inside it.
    #[default]
    NumericFirst,
    /// Every plausible candidate is ranked by
    /// `deviation_pct - label_weight * label_score`.
    Blended {
        /// Percentage points of deviation one full label match is worth.
        #[serde(default = "Ranking::default_label_weight")]
        label_weight: f64,
    },
}

impl Ranking {
    const fn default_label_weight() -> f64 {
        1.0
    }
}

/// Matching thresholds and ranking mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    /// Deviations up to this percentage are TOLERABLE.
    #[serde(default = "MatchPolicy::default_tolerance_pct")]
    pub tolerance_pct: f64,
    /// Deviations up to this percentage count as an exact MATCH.
    #[serde(default = "MatchPolicy::default_negligible_pct")]
    pub negligible_pct: f64,
    /// Candidates beyond this deviation are not plausible.
    #[serde(default = "MatchPolicy::default_plausible_pct")]
    pub plausible_pct: f64,
    /// Floor of the deviation denominator.
    #[serde(default = "MatchPolicy::default_epsilon")]
    pub epsilon: f64,
    /// Candidate ordering.
    #[serde(default)]
    pub ranking: Ranking,
    /// Include the source file stem in the label haystack.
    #[serde(default = "MatchPolicy::default_label_includes_source")]
    pub label_includes_source: bool,
    /// Compute per-claim verdicts on the rayon pool.
    #[serde(default = "MatchPolicy::default_parallel")]
    pub parallel: bool,
}

impl MatchPolicy {
    const fn default_tolerance_pct() -> f64 {
        1.0
    }

    const fn default_negligible_pct() -> f64 {
        0.01
    }

    const fn default_plausible_pct() -> f64 {
        100.0
    }

    const fn default_epsilon() -> f64 {
        1e-12
    }

    const fn default_label_includes_source() -> bool {
        true
    }

    const fn default_parallel() -> bool {
        true
    }

    /// Default policy with the given tolerance.
    pub fn with_tolerance(tolerance_pct: f64) -> Self {
        Self {
            tolerance_pct,
            ..Self::default()
        }
    }

    /// Rejects thresholds that cannot classify consistently.
    pub fn validate(&self) -> Result<(), VerifyError> {
        non_negative("tolerance_pct", self.tolerance_pct)?;
        non_negative("negligible_pct", self.negligible_pct)?;
        non_negative("plausible_pct", self.plausible_pct)?;
        if self.plausible_pct < self.tolerance_pct {
            return Err(policy_error(
                ErrorInfo::new(
                    "match.plausible_below_tolerance",
                    "plausible_pct must be at least tolerance_pct",
                )
                .with_context("plausible_pct", self.plausible_pct.to_string())
                .with_context("tolerance_pct", self.tolerance_pct.to_string()),
            ));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(policy_error(
                ErrorInfo::new("match.epsilon", "epsilon must be a positive finite number")
                    .with_context("epsilon", self.epsilon.to_string()),
            ));
        }
        if let Ranking::Blended { label_weight } = self.ranking {
            non_negative("label_weight", label_weight)?;
        }
        Ok(())
    }
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            tolerance_pct: Self::default_tolerance_pct(),
            negligible_pct: Self::default_negligible_pct(),
            plausible_pct: Self::default_plausible_pct(),
            epsilon: Self::default_epsilon(),
            ranking: Ranking::default(),
            label_includes_source: Self::default_label_includes_source(),
            parallel: Self::default_parallel(),
        }
    }
}

fn policy_error(info: ErrorInfo) -> VerifyError {
    VerifyError::Config(info)
}

fn non_negative(field: &str, value: f64) -> Result<(), VerifyError> {
    if value.is_finite() && value >= 0.0 {
        return Ok(());
    }
    Err(policy_error(
        ErrorInfo::new(
            "match.invalid_threshold",
            "threshold must be finite and non-negative",
        )
        .with_context("field", field)
        .with_context("value", value.to_string())
        .with_hint("use a percentage such as 1.0"),
    ))
}
