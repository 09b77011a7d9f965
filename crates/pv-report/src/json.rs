use pv_core::{stable_hash_string, to_canonical_json_string, Verdict, VerifyError};
use pv_store::LoadFailure;
use serde::{Deserialize, Serialize};

use crate::tally::{Outcome, Tally};

/// Machine-readable report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Document label.
    pub document: String,
    /// Tolerance the verdicts were classified under.
    pub tolerance_pct: f64,
    /// Status counts.
    pub tally: Tally,
    /// Overall outcome.
    pub outcome: Outcome,
    /// Verdicts in claim order.
    pub verdicts: Vec<Verdict>,
    /// Results files that failed to load.
    pub failures: Vec<LoadFailure>,
    /// SHA-256 of the canonical report with this field empty.
    pub report_hash: String,
}

impl VerificationReport {
    /// Assembles the report and stamps its hash.
    pub fn new(
        document: &str,
        tolerance_pct: f64,
        verdicts: &[Verdict],
        failures: &[LoadFailure],
    ) -> Result<Self, VerifyError> {
        let tally = Tally::from_verdicts(verdicts);
        let mut report = Self {
            document: document.to_string(),
            tolerance_pct,
            tally,
            outcome: tally.outcome(),
            verdicts: verdicts.to_vec(),
            failures: failures.to_vec(),
            report_hash: String::new(),
        };
        report.report_hash = stable_hash_string(&report)?;
        Ok(report)
    }

    /// Recomputes the hash and compares it with the stored one.
    pub fn verify_hash(&self) -> Result<bool, VerifyError> {
        let unstamped = Self {
            report_hash: String::new(),
            ..self.clone()
        };
        Ok(stable_hash_string(&unstamped)? == self.report_hash)
    }
}

/// Canonical JSON rendering of a [`VerificationReport`].
pub fn render_json(
    document: &str,
    tolerance_pct: f64,
    verdicts: &[Verdict],
    failures: &[LoadFailure],
) -> Result<String, VerifyError> {
    let report = VerificationReport::new(document, tolerance_pct, verdicts, failures)?;
    to_canonical_json_string(&report)
}
