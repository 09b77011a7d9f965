use regex::Regex;

use crate::context::{letters_before, MetricVocabulary};

/// Alternatives are ordered longest form first so the leftmost match is also
/// the longest one.
const LITERAL_PATTERN: &str = r"(?x)
    (?P<sci>
        (?P<mantissa>[0-9]+(?:\.[0-9]+)?)
        \s*\\times\s*10\^\{?\s*(?P<exponent>[-+−]?[0-9]+)\s*\}?
    )
  | (?P<grouped>[0-9]{1,3}(?:(?:,|\{,\}|\\,)[0-9]{3})+(?:\.[0-9]+)?)
  | (?P<plain>(?:[0-9]+(?:\.[0-9]+)?|\.[0-9]+)(?:[eE][-+]?[0-9]+)?)
";
const PLAIN_PATTERN: &str = r"[0-9]+(?:\.[0-9]+)?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Form {
    Scientific,
    Grouped,
    Plain,
}

/// A recognised and normalised literal within one cleaned line.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Literal {
    /// Byte offset of the first character, including the sign.
    pub(crate) start: usize,
    /// Byte offset after the suffix or percent marker.
    pub(crate) end: usize,
    pub(crate) raw: String,
    pub(crate) value: f64,
    pub(crate) percent: bool,
}

/// Scanner settings derived from [`crate::ExtractOptions`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct ScanLimits {
    pub(crate) min_integer_digits: usize,
    pub(crate) max_magnitude: Option<f64>,
}

#[derive(Debug, Clone)]
pub(crate) struct LiteralScanner {
    pattern: Regex,
    plain: Regex,
}

fn prev_char(line: &str, idx: usize) -> Option<char> {
    line[..idx].chars().next_back()
}

fn next_char(line: &str, idx: usize) -> Option<char> {
    line[idx..].chars().next()
}

fn suffix_multiplier(ch: char) -> Option<f64> {
    match ch {
        'K' | 'k' => Some(1e3),
        'M' => Some(1e6),
        'B' => Some(1e9),
        _ => None,
    }
}

fn strip_group_separators(text: &str) -> String {
    text.replace("{,}", "").replace("\\,", "").replace(',', "")
}

impl LiteralScanner {
    pub(crate) fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(LITERAL_PATTERN)?,
            plain: Regex::new(PLAIN_PATTERN)?,
        })
    }

    /// Scans a cleaned line and returns accepted literals in column order.
    pub(crate) fn scan(
        &self,
        line: &str,
        vocab: &MetricVocabulary,
        limits: ScanLimits,
    ) -> Vec<Literal> {
        let mut literals = Vec::new();
        let mut pos = 0;
        while pos < line.len() {
            let Some(caps) = self.pattern.captures_at(line, pos) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            let start = whole.start();
            let mut end = whole.end();
            let mut form = if caps.name("sci").is_some() {
                Form::Scientific
            } else if caps.name("grouped").is_some() {
                Form::Grouped
            } else {
                Form::Plain
            };
            if form == Form::Grouped && next_char(line, end).is_some_and(|c| c.is_ascii_digit()) {
                // `1,2345` is not a grouped number; fall back to the leading digits.
                if let Some(plain) = self.plain.find_at(line, start) {
                    end = plain.end();
                    form = Form::Plain;
                }
            }
            pos = end;

            let Some(sign) = sign_or_guard(line, start, vocab) else {
                continue;
            };

            let number = &line[start..end];
            let mut value = match parse_number(number, form, &caps) {
                Some(value) => value,
                None => continue,
            };

            let exponent_form = form == Form::Scientific || number.contains(['e', 'E']);
            let mut suffixed = false;
            if !exponent_form {
                if let Some(multiplier) = next_char(line, end).and_then(suffix_multiplier) {
                    let after = end + 1;
                    if !next_char(line, after).is_some_and(char::is_alphanumeric) {
                        value *= multiplier;
                        end = after;
                        suffixed = true;
                    }
                }
            }

            let rest = &line[end..];
            let trimmed = rest.trim_start_matches(' ');
            let gap = rest.len() - trimmed.len();
            let mut percent = false;
            if trimmed.starts_with("\\%") {
                end += gap + 2;
                percent = true;
            } else if trimmed.starts_with('%') {
                end += gap + 1;
                percent = true;
            }
            pos = end;

            let bare_integer = form == Form::Plain && !number.contains(['.', 'e', 'E']);
            if bare_integer && !percent && !suffixed {
                if number.len() < limits.min_integer_digits || ordinal_follows(line, end) {
                    continue;
                }
            }
            if sign.negative {
                value = -value;
            }
            if !value.is_finite() {
                continue;
            }
            if let Some(bound) = limits.max_magnitude {
                if value.abs() > bound {
                    continue;
                }
            }
            let literal_start = start - sign.len;
            literals.push(Literal {
                start: literal_start,
                end,
                raw: line[literal_start..end].trim_end().to_string(),
                value,
                percent,
            });
        }
        literals
    }
}

/// `12th`, `21st`: the letters right after a bare integer form an ordinal
/// suffix.
fn ordinal_follows(line: &str, end: usize) -> bool {
    let run: String = line[end..]
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .collect();
    matches!(run.to_ascii_lowercase().as_str(), "st" | "nd" | "rd" | "th")
}

struct Sign {
    negative: bool,
    len: usize,
}

/// Resolves a leading sign and rejects literals embedded in identifiers.
fn sign_or_guard(line: &str, start: usize, vocab: &MetricVocabulary) -> Option<Sign> {
    let unsigned = Sign {
        negative: false,
        len: 0,
    };
    let Some(prev) = prev_char(line, start) else {
        return Some(unsigned);
    };
    match prev {
        '-' | '+' | '−' => {
            let sign_start = start - prev.len_utf8();
            match prev_char(line, sign_start) {
                Some(before) if before.is_alphabetic() || before == '_' => None,
                Some(before) if before.is_ascii_digit() => Some(unsigned),
                _ => Some(Sign {
                    negative: prev != '+',
                    len: prev.len_utf8(),
                }),
            }
        }
        c if c.is_alphabetic() => {
            let run = letters_before(line, start);
            if !run.is_empty() && vocab.contains(&run) {
                Some(unsigned)
            } else {
                None
            }
        }
        c if c.is_alphanumeric() || c == '_' => None,
        '.' => {
            let dot = start - 1;
            if prev_char(line, dot).is_some_and(|c| c.is_ascii_digit()) {
                None
            } else {
                Some(unsigned)
            }
        }
        _ => Some(unsigned),
    }
}

fn parse_number(number: &str, form: Form, caps: &regex::Captures<'_>) -> Option<f64> {
    match form {
        Form::Scientific => {
            let mantissa = caps.name("mantissa")?.as_str();
            let exponent: i32 = caps
                .name("exponent")?
                .as_str()
                .replace('−', "-")
                .parse()
                .ok()?;
            format!("{mantissa}e{exponent}").parse().ok()
        }
        Form::Grouped => strip_group_separators(number).parse().ok(),
        Form::Plain => number.parse().ok(),
    }
}
