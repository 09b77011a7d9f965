use pv_core::{Status, Verdict};
use serde::{Deserialize, Serialize};

/// Overall result of a verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// No mismatches and no tolerable deviations.
    Pass,
    /// Tolerable deviations but no mismatches.
    Warn,
    /// At least one mismatch.
    Fail,
}

impl Outcome {
    /// Process exit code: 1 for [`Outcome::Fail`], 0 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Fail => 1,
            Outcome::Pass | Outcome::Warn => 0,
        }
    }

    /// Lower-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pass => "pass",
            Outcome::Warn => "warn",
            Outcome::Fail => "fail",
        }
    }
}

/// Verdict counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Number of verdicts.
    pub total: usize,
    /// MATCH verdicts.
    pub matched: usize,
    /// TOLERABLE verdicts.
    pub tolerable: usize,
    /// MISMATCH verdicts.
    pub mismatched: usize,
    /// UNMATCHED verdicts.
    pub unmatched: usize,
}

impl Tally {
    /// Counts verdicts by status.
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        let mut tally = Tally {
            total: verdicts.len(),
            ..Tally::default()
        };
        for verdict in verdicts {
            match verdict.status {
                Status::Match => tally.matched += 1,
                Status::Tolerable => tally.tolerable += 1,
                Status::Mismatch => tally.mismatched += 1,
                Status::Unmatched => tally.unmatched += 1,
            }
        }
        tally
    }

    /// Claims that found a plausible reference.
    pub fn checked(&self) -> usize {
        self.total - self.unmatched
    }

    /// Fail on any mismatch, warn on any tolerable deviation, pass otherwise.
    pub fn outcome(&self) -> Outcome {
        if self.mismatched > 0 {
            Outcome::Fail
        } else if self.tolerable > 0 {
            Outcome::Warn
        } else {
            Outcome::Pass
        }
    }
}
