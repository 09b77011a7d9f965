use serde::{Deserialize, Serialize};

use crate::DocumentFlavor;

/// Options controlling claim extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractOptions {
    /// Maximum number of label tokens captured before a literal.
    #[serde(default = "ExtractOptions::default_context_window")]
    pub context_window: usize,
    /// Bare integers with fewer digits than this are not claims.
    #[serde(default = "ExtractOptions::default_min_integer_digits")]
    pub min_integer_digits: usize,
    /// Literals whose magnitude exceeds this bound are skipped.
    #[serde(default)]
    pub max_magnitude: Option<f64>,
    /// Forces a document flavour instead of detecting it from the path.
    #[serde(default)]
    pub flavor: Option<DocumentFlavor>,
    /// Regular expressions; lines matching any of them are skipped.
    #[serde(default)]
    pub skip_patterns: Vec<String>,
    /// Additional metric names recognised as hints.
    #[serde(default)]
    pub extra_metrics: Vec<String>,
}

impl ExtractOptions {
    const fn default_context_window() -> usize {
        5
    }

    const fn default_min_integer_digits() -> usize {
        2
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            context_window: Self::default_context_window(),
            min_integer_digits: Self::default_min_integer_digits(),
            max_magnitude: None,
            flavor: None,
            skip_patterns: Vec::new(),
            extra_metrics: Vec::new(),
        }
    }
}
