use std::collections::{HashMap, HashSet};

use pv_core::ReferenceValue;

/// Format-independent tree that JSON, YAML and TOML documents are converted to
/// before flattening.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Number(f64),
    /// Strings, booleans, nulls, dates.
    Other,
    List(Vec<Node>),
    Map(Vec<(String, Node)>),
}

impl Node {
    pub(crate) fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Number(number) => number.as_f64().map_or(Node::Other, Node::Number),
            Value::Array(items) => Node::List(items.iter().map(Node::from_json).collect()),
            Value::Object(map) => Node::Map(
                map.iter()
                    .map(|(key, value)| (key.clone(), Node::from_json(value)))
                    .collect(),
            ),
            Value::Null | Value::Bool(_) | Value::String(_) => Node::Other,
        }
    }

    pub(crate) fn from_yaml(value: &serde_yaml::Value) -> Self {
        use serde_yaml::Value;
        match value {
            Value::Number(number) => number.as_f64().map_or(Node::Other, Node::Number),
            Value::Sequence(items) => Node::List(items.iter().map(Node::from_yaml).collect()),
            Value::Mapping(map) => Node::Map(
                map.iter()
                    .filter_map(|(key, value)| {
                        yaml_key(key).map(|key| (key, Node::from_yaml(value)))
                    })
                    .collect(),
            ),
            Value::Tagged(tagged) => Node::from_yaml(&tagged.value),
            Value::Null | Value::Bool(_) | Value::String(_) => Node::Other,
        }
    }

    pub(crate) fn from_toml(value: &toml::Value) -> Self {
        use toml::Value;
        match value {
            Value::Integer(number) => Node::Number(*number as f64),
            Value::Float(number) => Node::Number(*number),
            Value::Array(items) => Node::List(items.iter().map(Node::from_toml).collect()),
            Value::Table(table) => Node::Map(
                table
                    .iter()
                    .map(|(key, value)| (key.clone(), Node::from_toml(value)))
                    .collect(),
            ),
            Value::String(_) | Value::Boolean(_) | Value::Datetime(_) => Node::Other,
        }
    }
}

/// Non-string YAML keys are stringified; compound keys are dropped.
fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value;
    match key {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Tagged(tagged) => yaml_key(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Flattens a tree into `(dotted key, value)` pairs in tree order.
pub(crate) fn flatten(root: &Node, max_list_len: usize) -> Vec<(String, f64)> {
    let mut out = Vec::new();
    match root {
        Node::Number(value) => push_finite(&mut out, "value".to_string(), *value),
        _ => walk(root, String::new(), max_list_len, &mut out),
    }
    out
}

fn walk(node: &Node, prefix: String, max_list_len: usize, out: &mut Vec<(String, f64)>) {
    match node {
        Node::Number(value) => push_finite(out, prefix, *value),
        Node::Other => {}
        Node::List(items) => {
            if items.len() > max_list_len {
                return;
            }
            for (idx, item) in items.iter().enumerate() {
                walk(item, format!("{prefix}[{idx}]"), max_list_len, out);
            }
        }
        Node::Map(entries) => {
            for (key, value) in entries {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                walk(value, path, max_list_len, out);
            }
        }
    }
}

fn push_finite(out: &mut Vec<(String, f64)>, key: String, value: f64) {
    if value.is_finite() {
        out.push((key, value));
    }
}

/// Parses a tabular cell, accepting thousands separators.
pub(crate) fn parse_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    let value: f64 = if trimmed.contains(',') {
        trimmed.replace(',', "").parse().ok()?
    } else {
        trimmed.parse().ok()?
    };
    value.is_finite().then_some(value)
}

/// Builds reference values, suffixing repeated keys with `#2`, `#3`, ... in
/// encounter order.
pub(crate) fn into_references(pairs: Vec<(String, f64)>, source: &str) -> Vec<ReferenceValue> {
    let mut seen: HashSet<String> = HashSet::with_capacity(pairs.len());
    let mut repeats: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(pairs.len());
    for (key, value) in pairs {
        let unique = if seen.insert(key.clone()) {
            key
        } else {
            let mut count = repeats.get(&key).copied().unwrap_or(1);
            let candidate = loop {
                count += 1;
                let candidate = format!("{key}#{count}");
                if seen.insert(candidate.clone()) {
                    break candidate;
                }
            };
            repeats.insert(key, count);
            candidate
        };
        out.push(ReferenceValue::new(unique, value, source));
    }
    out
}
