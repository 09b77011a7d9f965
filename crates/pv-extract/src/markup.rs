use std::borrow::Cow;

use regex::Regex;

use crate::DocumentFlavor;

/// Commands whose arguments never carry claims.
const LATEX_NON_CLAIM: &str = r"\\(?:label|ref|eqref|autoref|cref|Cref|pageref|cite[a-zA-Z]*|usepackage|documentclass|bibliography[a-zA-Z]*|includegraphics|input|include|begin|end|url)\*?(?:\[[^\]]*\])*(?:\{[^}]*\})?";
/// Length and spacing commands.
const LATEX_LENGTHS: &str =
    r"\\(?:vspace|hspace|vskip|hskip|setlength|rule|kern|resizebox|scalebox)\*?(?:\{[^}]*\})+";
const MARKDOWN_COMMENT: &str = r"<!--.*?-->";
const MARKDOWN_LINK_TARGET: &str = r"\]\([^)]*\)";

/// Line-level markup cleanup. Anything not recognised is left as plain text.
#[derive(Debug, Clone)]
pub(crate) struct MarkupCleaner {
    latex_non_claim: Regex,
    latex_lengths: Regex,
    markdown_comment: Regex,
    markdown_link_target: Regex,
}

impl MarkupCleaner {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            latex_non_claim: Regex::new(LATEX_NON_CLAIM)?,
            latex_lengths: Regex::new(LATEX_LENGTHS)?,
            markdown_comment: Regex::new(MARKDOWN_COMMENT)?,
            markdown_link_target: Regex::new(MARKDOWN_LINK_TARGET)?,
        })
    }

    /// Returns the cleaned line, or `None` when the whole line is a comment.
    pub(crate) fn clean<'a>(&self, line: &'a str, flavor: DocumentFlavor) -> Option<Cow<'a, str>> {
        match flavor {
            DocumentFlavor::Latex => self.clean_latex(line),
            DocumentFlavor::Markdown => Some(self.clean_markdown(line)),
            DocumentFlavor::Plain => Some(Cow::Borrowed(line)),
        }
    }

    fn clean_latex<'a>(&self, line: &'a str) -> Option<Cow<'a, str>> {
        if line.trim_start().starts_with('%') {
            return None;
        }
        let body = strip_latex_comment(line);
        let body = self.latex_non_claim.replace_all(body, " ");
        let body = self.latex_lengths.replace_all(&body, " ");
        let cleaned: String = body
            .replace("\\(", "  ")
            .replace("\\)", "  ")
            .chars()
            .map(|ch| if ch == '$' || ch == '~' { ' ' } else { ch })
            .collect();
        Some(Cow::Owned(cleaned))
    }

    fn clean_markdown<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let body = self.markdown_comment.replace_all(line, " ");
        let body = self.markdown_link_target.replace_all(&body, "] ");
        let cleaned: String = body
            .chars()
            .map(|ch| if ch == '$' || ch == '`' { ' ' } else { ch })
            .collect();
        Cow::Owned(cleaned)
    }
}

/// Truncates a LaTeX line at the first unescaped `%`.
fn strip_latex_comment(line: &str) -> &str {
    let mut escaped = false;
    for (idx, ch) in line.char_indices() {
        match ch {
            '\\' => escaped = !escaped,
            '%' if !escaped => return &line[..idx],
            _ => escaped = false,
        }
    }
    line
}

fn fence_marker(line: &str) -> Option<&'static str> {
    let trimmed = line.trim_start();
    ["```", "~~~"]
        .into_iter()
        .find(|marker| trimmed.starts_with(marker))
}

/// Marks lines that belong to fenced code blocks. A fence only closes on the
/// marker that opened it. An unterminated final fence is ignored so the
/// remainder of the document is still scanned.
pub(crate) fn fenced_lines(lines: &[&str]) -> Vec<bool> {
    let mut mask = vec![false; lines.len()];
    let mut open: Option<(usize, &str)> = None;
    for (idx, line) in lines.iter().enumerate() {
        let Some(marker) = fence_marker(line) else {
            continue;
        };
        match open {
            None => open = Some((idx, marker)),
            Some((start, opened)) if opened == marker => {
                for flag in &mut mask[start..=idx] {
                    *flag = true;
                }
                open = None;
            }
            Some(_) => {}
        }
    }
    mask
}
