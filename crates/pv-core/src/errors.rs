//! Structured error types shared across paperverify crates.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured payload attached to every [`VerifyError`] variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Stable machine readable error code.
    pub code: String,
    /// Human readable diagnostic message.
    pub message: String,
    /// Contextual key value pairs (paths, extensions, etc.).
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Optional hint that may help the caller resolve the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Creates a new error payload with the provided code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Adds a context entry to the payload.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Sets a human readable hint for remediation.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for paperverify.
///
/// `UnsupportedFormat` and `CorruptData` are per-file conditions that directory
/// loading records and recovers from. `Io` and `Config` abort a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum VerifyError {
    /// No registered loader handles the file extension.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(ErrorInfo),
    /// The file could not be read or parsed into key/value pairs.
    #[error("corrupt data: {0}")]
    CorruptData(ErrorInfo),
    /// Fatal input/output failures (document unreadable, results path missing).
    #[error("io error: {0}")]
    Io(ErrorInfo),
    /// Invalid policy or configuration values.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Serialization failures.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl VerifyError {
    /// Returns a reference to the payload describing the error.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            VerifyError::UnsupportedFormat(info)
            | VerifyError::CorruptData(info)
            | VerifyError::Io(info)
            | VerifyError::Config(info)
            | VerifyError::Serde(info) => info,
        }
    }

    /// Returns true for failures that are scoped to a single results file.
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            VerifyError::UnsupportedFormat(_) | VerifyError::CorruptData(_)
        )
    }

    /// Short lowercase family name used in reports.
    pub fn family(&self) -> &'static str {
        match self {
            VerifyError::UnsupportedFormat(_) => "unsupported-format",
            VerifyError::CorruptData(_) => "corrupt-data",
            VerifyError::Io(_) => "io",
            VerifyError::Config(_) => "config",
            VerifyError::Serde(_) => "serde",
        }
    }
}
