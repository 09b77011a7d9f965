//! Verdict reporting for paperverify.

mod json;
mod markdown;
mod tally;
mod text;

use std::fs;
use std::path::Path;

use pv_core::{ErrorInfo, Verdict, VerifyError};
use pv_store::LoadFailure;

pub use json::{render_json, VerificationReport};
pub use markdown::render_markdown;
pub use tally::{Outcome, Tally};
pub use text::{render_failure, render_line, render_summary, render_text, write_console, ConsoleOptions};

/// Report file format, chosen from the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// `.md`
    Markdown,
    /// `.json`
    Json,
    /// Anything else.
    Text,
}

impl ReportFormat {
    /// `.md`/`.markdown` is Markdown, `.json` is JSON, anything else text.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("md") | Some("markdown") => ReportFormat::Markdown,
            Some("json") => ReportFormat::Json,
            _ => ReportFormat::Text,
        }
    }
}

/// Renders the report in `format`.
pub fn render_report(
    format: ReportFormat,
    document: &str,
    tolerance_pct: f64,
    verdicts: &[Verdict],
    failures: &[LoadFailure],
) -> Result<String, VerifyError> {
    let tally = Tally::from_verdicts(verdicts);
    Ok(match format {
        ReportFormat::Markdown => render_markdown(document, tolerance_pct, verdicts, &tally, failures),
        ReportFormat::Json => render_json(document, tolerance_pct, verdicts, failures)?,
        ReportFormat::Text => render_text(verdicts, &tally, failures),
    })
}

/// Writes the report to `path` in the format its extension selects.
pub fn write_report(
    path: &Path,
    document: &str,
    tolerance_pct: f64,
    verdicts: &[Verdict],
    failures: &[LoadFailure],
) -> Result<ReportFormat, VerifyError> {
    let format = ReportFormat::from_path(path);
    let contents = render_report(format, document, tolerance_pct, verdicts, failures)?;
    fs::write(path, contents).map_err(|err| {
        VerifyError::Io(
            ErrorInfo::new("report.write", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    Ok(format)
}
