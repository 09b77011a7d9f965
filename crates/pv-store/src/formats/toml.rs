use std::path::Path;

use pv_core::{ReferenceValue, VerifyError};

use super::{corrupt_data, file_label, read_text};
use crate::flatten::{flatten, into_references, Node};
use crate::{FormatLoader, LoadOptions};

/// Loads `.toml` files in table order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlLoader;

impl FormatLoader for TomlLoader {
    fn name(&self) -> &'static str {
        "toml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["toml"]
    }

    fn load(&self, path: &Path, options: &LoadOptions) -> Result<Vec<ReferenceValue>, VerifyError> {
        let text = read_text(path)?;
        let table: toml::Table =
            toml::from_str(&text).map_err(|err| corrupt_data("store.toml_parse", path, err))?;
        let pairs = flatten(
            &Node::from_toml(&toml::Value::Table(table)),
            options.max_list_len,
        );
        Ok(into_references(pairs, &file_label(path)))
    }
}
