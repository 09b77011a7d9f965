//! Numeric claim extraction for paperverify.
//!
//! Documents are scanned line by line. Markup is cleaned according to the
//! document flavour, numeric literals are recognised and normalised, and each
//! literal is returned as a [`Claim`] with the label tokens that precede it on
//! the same line.

mod context;
mod literal;
mod markup;
mod options;

use std::path::Path;

use log::debug;
use pv_core::{Claim, ErrorInfo, VerifyError};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context::{context_tokens, metric_hint, MetricVocabulary};
use crate::literal::{LiteralScanner, ScanLimits};
use crate::markup::{fenced_lines, MarkupCleaner};

pub use options::ExtractOptions;

/// Markup dialect of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFlavor {
    /// LaTeX source.
    Latex,
    /// Markdown text.
    Markdown,
    /// Anything else.
    Plain,
}

impl DocumentFlavor {
    /// Detects the flavour from the file extension.
    pub fn from_path(path: &str) -> Self {
        let extension = Path::new(path)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("tex") | Some("latex") => DocumentFlavor::Latex,
            Some("md") | Some("markdown") => DocumentFlavor::Markdown,
            _ => DocumentFlavor::Plain,
        }
    }
}

fn config_error(code: &str, message: impl Into<String>) -> VerifyError {
    VerifyError::Config(ErrorInfo::new(code, message))
}

/// Reusable claim extractor holding compiled patterns.
#[derive(Debug, Clone)]
pub struct Extractor {
    options: ExtractOptions,
    cleaner: MarkupCleaner,
    scanner: LiteralScanner,
    vocab: MetricVocabulary,
    skip: Vec<Regex>,
}

impl Extractor {
    /// Compiles the extractor. Fails only when a skip pattern is not a valid
    /// regular expression.
    pub fn new(options: ExtractOptions) -> Result<Self, VerifyError> {
        let cleaner = MarkupCleaner::new()
            .map_err(|err| config_error("extract.markup_pattern", err.to_string()))?;
        let scanner = LiteralScanner::new()
            .map_err(|err| config_error("extract.literal_pattern", err.to_string()))?;
        let skip = options
            .skip_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|err| {
                    VerifyError::Config(
                        ErrorInfo::new("extract.skip_pattern", err.to_string())
                            .with_context("pattern", pattern.clone()),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let vocab = MetricVocabulary::new(&options.extra_metrics);
        Ok(Self {
            options,
            cleaner,
            scanner,
            vocab,
            skip,
        })
    }

    /// Extracts claims from `text` in document order. Never fails: anything
    /// that is not recognised is treated as plain text.
    pub fn extract(&self, text: &str, document_path: &str) -> Vec<Claim> {
        let flavor = self
            .options
            .flavor
            .unwrap_or_else(|| DocumentFlavor::from_path(document_path));
        let lines: Vec<&str> = text.lines().collect();
        let fenced = match flavor {
            DocumentFlavor::Markdown => fenced_lines(&lines),
            _ => vec![false; lines.len()],
        };
        let limits = ScanLimits {
            min_integer_digits: self.options.min_integer_digits,
            max_magnitude: self.options.max_magnitude,
        };

        let mut claims = Vec::new();
        for (idx, raw_line) in lines.iter().enumerate() {
            if fenced[idx] || self.skip.iter().any(|re| re.is_match(raw_line)) {
                continue;
            }
            let Some(line) = self.cleaner.clean(raw_line, flavor) else {
                continue;
            };
            let mut segment_start = 0;
            for literal in self.scanner.scan(&line, &self.vocab, limits) {
                let segment = &line[segment_start..literal.start];
                let context = context_tokens(segment, self.options.context_window);
                let hint = metric_hint(&line[literal.end..], &context, &self.vocab);
                segment_start = literal.end;

                let mut claim = Claim::new(literal.raw, literal.value, idx + 1, context, document_path)
                    .with_percent(literal.percent);
                if let Some(hint) = hint {
                    claim = claim.with_metric_hint(hint);
                }
                claims.push(claim);
            }
        }
        debug!(
            "extracted {} claims from {} ({:?}, {} lines)",
            claims.len(),
            document_path,
            flavor,
            lines.len()
        );
        claims
    }
}

/// One-shot extraction with freshly compiled options.
pub fn extract(
    text: &str,
    document_path: &str,
    options: &ExtractOptions,
) -> Result<Vec<Claim>, VerifyError> {
    Ok(Extractor::new(options.clone())?.extract(text, document_path))
}
