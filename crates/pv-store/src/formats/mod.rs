//! Built-in [`FormatLoader`](crate::FormatLoader) implementations.

use std::fs;
use std::path::Path;

use pv_core::{ErrorInfo, VerifyError};

mod csv;
mod json;
mod sqlite;
mod toml;
mod yaml;

pub use self::csv::CsvLoader;
pub use self::json::JsonLoader;
pub use self::sqlite::SqliteLoader;
pub use self::toml::TomlLoader;
pub use self::yaml::YamlLoader;

pub(crate) fn corrupt_data(code: &str, path: &Path, err: impl ToString) -> VerifyError {
    VerifyError::CorruptData(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

pub(crate) fn read_text(path: &Path) -> Result<String, VerifyError> {
    fs::read_to_string(path).map_err(|err| corrupt_data("store.read", path, err))
}

/// Source label of a file loaded on its own.
pub(crate) fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
