use std::fmt::{self, Write};

use pv_core::{Status, Verdict};
use pv_store::LoadFailure;

use crate::tally::Tally;

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

/// Markdown report with a summary list, a details table of every checked
/// claim and a section listing load failures.
pub fn render_markdown(
    document: &str,
    tolerance_pct: f64,
    verdicts: &[Verdict],
    tally: &Tally,
    failures: &[LoadFailure],
) -> String {
    let mut out = String::new();
    // fmt::Write for String never fails
    let _ = write_markdown(&mut out, document, tolerance_pct, verdicts, tally, failures);
    out
}

fn write_markdown(
    out: &mut String,
    document: &str,
    tolerance_pct: f64,
    verdicts: &[Verdict],
    tally: &Tally,
    failures: &[LoadFailure],
) -> fmt::Result {
    writeln!(out, "# Paper Verification Report")?;
    writeln!(out, "\nDocument: `{document}` (tolerance {tolerance_pct}%)")?;
    writeln!(out, "\n## Summary\n")?;
    writeln!(out, "- **Total claims checked**: {}", tally.total)?;
    writeln!(out, "- **Claims with a reference**: {}", tally.checked())?;
    writeln!(out, "- **Exact matches**: {}", tally.matched)?;
    writeln!(out, "- **Tolerable deviations**: {}", tally.tolerable)?;
    writeln!(out, "- **Mismatches**: {}", tally.mismatched)?;
    writeln!(out, "- **Unmatched**: {}", tally.unmatched)?;
    writeln!(out, "- **Outcome**: {}", tally.outcome().as_str())?;
    writeln!(out, "\n## Details\n")?;
    writeln!(out, "| Line | Claim | Status | Matched Value | Source | Deviation |")?;
    writeln!(out, "|------|-------|--------|---------------|--------|-----------|")?;
    for verdict in verdicts {
        if verdict.status == Status::Unmatched {
            continue;
        }
        let (matched, source) = match &verdict.matched_reference {
            Some(reference) => (
                reference.value.to_string(),
                format!("{}:{}", reference.source_file, reference.key),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        let deviation = verdict
            .deviation_pct
            .map(|deviation| format!("{deviation:.4}%"))
            .unwrap_or_else(|| "-".to_string());
        writeln!(
            out,
            "| {} | {} | {} | {} | {} | {} |",
            verdict.claim.line_number,
            escape_cell(&verdict.claim.raw_text),
            verdict.status,
            matched,
            escape_cell(&source),
            deviation
        )?;
    }
    if !failures.is_empty() {
        writeln!(out, "\n## Load failures\n")?;
        for failure in failures {
            writeln!(
                out,
                "- `{}`: {} ({})",
                failure.path,
                failure.error.info().message,
                failure.error.family()
            )?;
        }
    }
    Ok(())
}
