use std::fmt;

use serde::{Deserialize, Serialize};

/// A numeric literal found in document text, with its textual context and location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Literal text as written, including sign, suffix and percent marker.
    pub raw_text: String,
    /// Canonical value after normalisation.
    pub value: f64,
    /// One-based source line.
    pub line_number: usize,
    /// Lower-cased words preceding the literal on the same line, in reading order.
    pub context_tokens: Vec<String>,
    /// Label of the document the claim was extracted from.
    pub document_path: String,
    /// Canonical metric name recognised next to the literal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metric_hint: Option<String>,
    /// Whether the literal carried a percent marker.
    #[serde(default)]
    pub percent: bool,
}

impl Claim {
    /// Creates a claim without metric hint or percent marker.
    pub fn new(
        raw_text: impl Into<String>,
        value: f64,
        line_number: usize,
        context_tokens: Vec<String>,
        document_path: impl Into<String>,
    ) -> Self {
        Self {
            raw_text: raw_text.into(),
            value,
            line_number,
            context_tokens,
            document_path: document_path.into(),
            metric_hint: None,
            percent: false,
        }
    }

    /// Attaches a canonical metric hint.
    pub fn with_metric_hint(mut self, hint: impl Into<String>) -> Self {
        self.metric_hint = Some(hint.into());
        self
    }

    /// Marks the claim as a percentage literal.
    pub fn with_percent(mut self, percent: bool) -> Self {
        self.percent = percent;
        self
    }

    /// Tokens used as the matching label: the context plus the metric hint
    /// when it is not already part of the context.
    pub fn label_tokens(&self) -> Vec<&str> {
        let mut tokens: Vec<&str> = self.context_tokens.iter().map(String::as_str).collect();
        if let Some(hint) = &self.metric_hint {
            if !tokens.iter().any(|token| token == hint) {
                tokens.push(hint.as_str());
            }
        }
        tokens
    }
}

/// A numeric fact loaded from an experiment result file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceValue {
    /// Dotted path, unique within its source file.
    pub key: String,
    /// Numeric value.
    pub value: f64,
    /// Originating file, relative to the results root.
    pub source_file: String,
}

impl ReferenceValue {
    /// Creates a new reference value.
    pub fn new(key: impl Into<String>, value: f64, source_file: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value,
            source_file: source_file.into(),
        }
    }

    /// File stem of the source, used as additional label haystack.
    pub fn source_stem(&self) -> &str {
        let name = self
            .source_file
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(self.source_file.as_str());
        match name.rfind('.') {
            Some(idx) if idx > 0 => &name[..idx],
            _ => name,
        }
    }
}

/// Classification outcome of a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Exact or within floating rounding noise.
    Match,
    /// Deviation within the user tolerance.
    Tolerable,
    /// A plausible candidate exists but deviates beyond the tolerance.
    Mismatch,
    /// No plausible candidate.
    Unmatched,
}

impl Status {
    /// Upper-case label used in rendered reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Match => "MATCH",
            Status::Tolerable => "TOLERABLE",
            Status::Mismatch => "MISMATCH",
            Status::Unmatched => "UNMATCHED",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of one claim after matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    /// The claim being judged.
    pub claim: Claim,
    /// Selected reference value, absent for [`Status::Unmatched`].
    pub matched_reference: Option<ReferenceValue>,
    /// Classification outcome.
    pub status: Status,
    /// Relative deviation in percent, absent for [`Status::Unmatched`].
    pub deviation_pct: Option<f64>,
    /// Label score of the selected reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_score: Option<f64>,
    /// Number of references inside the tie-break window.
    #[serde(default)]
    pub tied_candidates: usize,
}

impl Verdict {
    /// Verdict for a claim with no plausible candidate.
    pub fn unmatched(claim: Claim) -> Self {
        Self {
            claim,
            matched_reference: None,
            status: Status::Unmatched,
            deviation_pct: None,
            label_score: None,
            tied_candidates: 0,
        }
    }

    /// Verdict for a claim matched against `reference`.
    pub fn matched(
        claim: Claim,
        reference: ReferenceValue,
        status: Status,
        deviation_pct: f64,
        label_score: f64,
        tied_candidates: usize,
    ) -> Self {
        Self {
            claim,
            matched_reference: Some(reference),
            status,
            deviation_pct: Some(deviation_pct),
            label_score: Some(label_score),
            tied_candidates,
        }
    }
}
