use std::io::{self, Write};

use pv_core::{Status, Verdict};
use pv_store::LoadFailure;
use serde::{Deserialize, Serialize};

use crate::tally::Tally;

/// Console filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleOptions {
    /// Print MISMATCH lines only.
    pub quiet: bool,
    /// Print UNMATCHED lines too.
    pub show_unmatched: bool,
}

impl ConsoleOptions {
    fn shows(&self, status: Status) -> bool {
        match status {
            Status::Mismatch => true,
            _ if self.quiet => false,
            Status::Unmatched => self.show_unmatched,
            Status::Match | Status::Tolerable => true,
        }
    }
}

/// One tab-separated line: line number, claim text, status, `source:key`,
/// deviation.
pub fn render_line(verdict: &Verdict) -> String {
    let reference = verdict
        .matched_reference
        .as_ref()
        .map(|reference| format!("{}:{}", reference.source_file, reference.key))
        .unwrap_or_else(|| "-".to_string());
    let deviation = verdict
        .deviation_pct
        .map(|deviation| format!("{deviation:.4}%"))
        .unwrap_or_else(|| "-".to_string());
    format!(
        "{}\t{}\t{}\t{}\t{}",
        verdict.claim.line_number, verdict.claim.raw_text, verdict.status, reference, deviation
    )
}

/// Summary line with per-status counts and the outcome.
pub fn render_summary(tally: &Tally) -> String {
    format!(
        "checked {} claims: {} match, {} tolerable, {} mismatch, {} unmatched -> {}",
        tally.total,
        tally.matched,
        tally.tolerable,
        tally.mismatched,
        tally.unmatched,
        tally.outcome().as_str()
    )
}

/// One line describing a results file that failed to load.
pub fn render_failure(failure: &LoadFailure) -> String {
    format!(
        "load failure\t{}\t{}\t{}",
        failure.path,
        failure.error.family(),
        failure.error.info().message
    )
}

/// Writes the filtered verdict lines, the summary and the load failures.
pub fn write_console<W: Write>(
    writer: &mut W,
    verdicts: &[Verdict],
    tally: &Tally,
    failures: &[LoadFailure],
    options: &ConsoleOptions,
) -> io::Result<()> {
    for verdict in verdicts.iter().filter(|verdict| options.shows(verdict.status)) {
        writeln!(writer, "{}", render_line(verdict))?;
    }
    writeln!(writer, "{}", render_summary(tally))?;
    for failure in failures {
        writeln!(writer, "{}", render_failure(failure))?;
    }
    Ok(())
}

/// Plain-text report: every verdict line, the summary and the load failures.
pub fn render_text(verdicts: &[Verdict], tally: &Tally, failures: &[LoadFailure]) -> String {
    let mut out = String::new();
    for verdict in verdicts {
        out.push_str(&render_line(verdict));
        out.push('\n');
    }
    out.push_str(&render_summary(tally));
    out.push('\n');
    for failure in failures {
        out.push_str(&render_failure(failure));
        out.push('\n');
    }
    out
}
