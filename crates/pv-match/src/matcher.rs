use std::cmp::Ordering;

use log::{debug, info};
use pv_core::{Claim, ReferenceValue, Status, Verdict, VerifyError};
use rayon::prelude::*;

use crate::policy::{MatchPolicy, Ranking};
use crate::score::{label_score, reference_haystack, relative_deviation_pct};

#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    deviation: f64,
    label: f64,
}

/// Matches claims against a fixed pool of reference values.
///
/// References are never consumed: several claims may select the same value.
#[derive(Debug, Clone)]
pub struct Matcher {
    references: Vec<ReferenceValue>,
    haystacks: Vec<String>,
    policy: MatchPolicy,
}

impl Matcher {
    /// Validates the policy and precomputes label haystacks.
    pub fn new(references: Vec<ReferenceValue>, policy: MatchPolicy) -> Result<Self, VerifyError> {
        policy.validate()?;
        let haystacks = references
            .iter()
            .map(|reference| reference_haystack(reference, policy.label_includes_source))
            .collect();
        Ok(Self {
            references,
            haystacks,
            policy,
        })
    }

    /// The policy verdicts are classified under.
    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// The reference pool.
    pub fn references(&self) -> &[ReferenceValue] {
        &self.references
    }

    /// Classifies one claim.
    pub fn match_claim(&self, claim: &Claim) -> Verdict {
        let policy = &self.policy;
        let deviations: Vec<f64> = self
            .references
            .iter()
            .map(|reference| relative_deviation_pct(claim.value, reference.value, policy.epsilon))
            .collect();
        let Some(best) = deviations.iter().copied().filter(|d| !d.is_nan()).reduce(f64::min) else {
            return Verdict::unmatched(claim.clone());
        };
        if best > policy.plausible_pct {
            debug!(
                "line {} `{}`: nearest reference deviates {best:.4}%",
                claim.line_number, claim.raw_text
            );
            return Verdict::unmatched(claim.clone());
        }

        let exact = best <= policy.negligible_pct;
        let limit = match (exact, policy.ranking) {
            (true, _) => policy.negligible_pct,
            (false, Ranking::NumericFirst) => (best + policy.tolerance_pct).min(policy.plausible_pct),
            (false, Ranking::Blended { .. }) => policy.plausible_pct,
        };
        let tokens = claim.label_tokens();
        let mut candidates: Vec<Candidate> = deviations
            .iter()
            .enumerate()
            .filter(|(_, deviation)| **deviation <= limit)
            .map(|(index, deviation)| Candidate {
                index,
                deviation: *deviation,
                label: label_score(&tokens, &self.haystacks[index]),
            })
            .collect();
        match (exact, policy.ranking) {
            (false, Ranking::Blended { label_weight }) => candidates.sort_by(|a, b| {
                let blended_a = a.deviation - label_weight * a.label;
                let blended_b = b.deviation - label_weight * b.label;
                blended_a
                    .total_cmp(&blended_b)
                    .then_with(|| self.tie_break(a, b))
            }),
            _ => candidates.sort_by(|a, b| self.tie_break(a, b)),
        }

        let Some(chosen) = candidates.first().copied() else {
            return Verdict::unmatched(claim.clone());
        };
        let status = classify(chosen.deviation, policy);
        debug!(
            "line {} `{}` -> {} ({} {:.4}%, {} candidates)",
            claim.line_number,
            claim.raw_text,
            self.references[chosen.index].key,
            status,
            chosen.deviation,
            candidates.len()
        );
        Verdict::matched(
            claim.clone(),
            self.references[chosen.index].clone(),
            status,
            chosen.deviation,
            chosen.label,
            candidates.len(),
        )
    }

    /// Classifies every claim, returning verdicts in claim order.
    pub fn match_all(&self, claims: &[Claim]) -> Vec<Verdict> {
        let verdicts: Vec<Verdict> = if self.policy.parallel {
            let mut indexed: Vec<(usize, Verdict)> = claims
                .par_iter()
                .enumerate()
                .map(|(index, claim)| (index, self.match_claim(claim)))
                .collect();
            indexed.sort_by_key(|(index, _)| *index);
            indexed.into_iter().map(|(_, verdict)| verdict).collect()
        } else {
            claims.iter().map(|claim| self.match_claim(claim)).collect()
        };
        info!(
            "matched {} claims against {} reference values",
            verdicts.len(),
            self.references.len()
        );
        verdicts
    }

    /// Label score descending, deviation ascending, then source file and key.
    fn tie_break(&self, a: &Candidate, b: &Candidate) -> Ordering {
        let ref_a = &self.references[a.index];
        let ref_b = &self.references[b.index];
        b.label
            .total_cmp(&a.label)
            .then_with(|| a.deviation.total_cmp(&b.deviation))
            .then_with(|| ref_a.source_file.cmp(&ref_b.source_file))
            .then_with(|| ref_a.key.cmp(&ref_b.key))
    }
}

fn classify(deviation: f64, policy: &MatchPolicy) -> Status {
    if deviation <= policy.negligible_pct {
        Status::Match
    } else if deviation <= policy.tolerance_pct {
        Status::Tolerable
    } else {
        Status::Mismatch
    }
}

/// Matches `claims` against `references`, one verdict per claim in claim
/// order. Fails only when the policy is invalid.
pub fn match_claims(
    claims: &[Claim],
    references: &[ReferenceValue],
    policy: &MatchPolicy,
) -> Result<Vec<Verdict>, VerifyError> {
    let matcher = Matcher::new(references.to_vec(), policy.clone())?;
    Ok(matcher.match_all(claims))
}
