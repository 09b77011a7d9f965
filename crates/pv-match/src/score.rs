//! Pure scoring functions.

use pv_core::ReferenceValue;

/// Lower-cases `text` and removes every non-alphanumeric character.
pub fn normalize_label(text: &str) -> String {
    text.chars()
        .filter(|ch| ch.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Label haystack of a reference: its normalised key, optionally followed by
/// the normalised source file stem.
pub fn reference_haystack(reference: &ReferenceValue, include_source: bool) -> String {
    let key = normalize_label(&reference.key);
    if include_source {
        // the space keeps tokens from matching across the boundary
        format!("{key} {}", normalize_label(reference.source_stem()))
    } else {
        key
    }
}

/// Fraction of label tokens found as substrings of `haystack`. Tokens are
/// normalised first and empty ones ignored; no tokens scores 0.
pub fn label_score<S: AsRef<str>>(tokens: &[S], haystack: &str) -> f64 {
    let normalized: Vec<String> = tokens
        .iter()
        .map(|token| normalize_label(token.as_ref()))
        .filter(|token| !token.is_empty())
        .collect();
    if normalized.is_empty() {
        return 0.0;
    }
    let hits = normalized
        .iter()
        .filter(|token| haystack.contains(token.as_str()))
        .count();
    hits as f64 / normalized.len() as f64
}

/// `|claim - reference| / max(|reference|, epsilon) * 100`.
pub fn relative_deviation_pct(claim: f64, reference: f64, epsilon: f64) -> f64 {
    (claim - reference).abs() / reference.abs().max(epsilon) * 100.0
}
