use std::collections::BTreeMap;

/// Alias to canonical metric name.
const METRIC_ALIASES: &[(&str, &str)] = &[
    ("mae", "mae"),
    ("mse", "mse"),
    ("rmse", "rmse"),
    ("mape", "mape"),
    ("smape", "smape"),
    ("mase", "mase"),
    ("crps", "crps"),
    ("accuracy", "accuracy"),
    ("acc", "accuracy"),
    ("f1", "f1"),
    ("auc", "auc"),
    ("bleu", "bleu"),
    ("rouge", "rouge"),
    ("precision", "precision"),
    ("recall", "recall"),
    ("loss", "loss"),
    ("perplexity", "perplexity"),
    ("ppl", "perplexity"),
    ("latency", "latency"),
    ("ms", "latency"),
    ("vram", "vram"),
    ("gb", "vram"),
    ("r2", "r2"),
];

/// Known metric tokens and their canonical names.
#[derive(Debug, Clone)]
pub(crate) struct MetricVocabulary {
    aliases: BTreeMap<String, String>,
}

impl MetricVocabulary {
    pub(crate) fn new(extra: &[String]) -> Self {
        let mut aliases: BTreeMap<String, String> = METRIC_ALIASES
            .iter()
            .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
            .collect();
        for metric in extra {
            let token = metric.trim().to_lowercase();
            if !token.is_empty() {
                aliases.entry(token.clone()).or_insert(token);
            }
        }
        Self { aliases }
    }

    pub(crate) fn canonical(&self, token: &str) -> Option<&str> {
        self.aliases.get(token).map(String::as_str)
    }

    pub(crate) fn contains(&self, token: &str) -> bool {
        self.aliases.contains_key(token)
    }
}

enum Word {
    Tokens(Vec<String>),
    Numeric,
    Empty,
}

fn strip_commands(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut chars = word.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            while matches!(chars.peek(), Some(next) if next.is_ascii_alphabetic()) {
                chars.next();
            }
            out.push(' ');
        } else {
            out.push(ch);
        }
    }
    out
}

fn classify(word: &str) -> Word {
    let stripped = strip_commands(word);
    let pieces: Vec<&str> = stripped
        .split(|c: char| !c.is_alphanumeric())
        .filter(|piece| !piece.is_empty())
        .collect();
    if pieces.is_empty() {
        return Word::Empty;
    }
    let tokens: Vec<String> = pieces
        .iter()
        .filter(|piece| piece.chars().next().is_some_and(char::is_alphabetic))
        .map(|piece| piece.to_lowercase())
        .collect();
    if tokens.is_empty() {
        Word::Numeric
    } else {
        Word::Tokens(tokens)
    }
}

/// Collects up to `window` label tokens from the end of `segment`, stopping at
/// the first numeric word. Tokens are returned in reading order.
pub(crate) fn context_tokens(segment: &str, window: usize) -> Vec<String> {
    let mut collected: Vec<String> = Vec::new();
    if window == 0 {
        return collected;
    }
    'words: for word in segment.split_whitespace().rev() {
        match classify(word) {
            Word::Empty => continue,
            Word::Numeric => break,
            Word::Tokens(tokens) => {
                for token in tokens.into_iter().rev() {
                    collected.push(token);
                    if collected.len() == window {
                        break 'words;
                    }
                }
            }
        }
    }
    collected.reverse();
    collected
}

/// First token of the text following a literal, when it names a metric.
pub(crate) fn following_metric(rest: &str, vocab: &MetricVocabulary) -> Option<String> {
    let word = rest.split_whitespace().next()?;
    match classify(word) {
        Word::Tokens(tokens) => tokens
            .first()
            .and_then(|token| vocab.canonical(token))
            .map(str::to_string),
        _ => None,
    }
}

/// Metric hint from the literal's trailing word, falling back to the nearest
/// context token.
pub(crate) fn metric_hint(
    rest: &str,
    context: &[String],
    vocab: &MetricVocabulary,
) -> Option<String> {
    following_metric(rest, vocab).or_else(|| {
        context
            .iter()
            .rev()
            .find_map(|token| vocab.canonical(token))
            .map(str::to_string)
    })
}

/// Trailing run of ASCII letters immediately before `idx`, lower-cased.
pub(crate) fn letters_before(line: &str, idx: usize) -> String {
    let run: String = line[..idx]
        .chars()
        .rev()
        .take_while(char::is_ascii_alphabetic)
        .collect();
    run.chars().rev().collect::<String>().to_lowercase()
}
