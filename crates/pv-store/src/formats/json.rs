use std::path::Path;

use pv_core::{ReferenceValue, VerifyError};

use super::{corrupt_data, file_label, read_text};
use crate::flatten::{flatten, into_references, Node};
use crate::{FormatLoader, LoadOptions};

/// Loads `.json` files. Object keys flatten in sorted order.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLoader;

impl FormatLoader for JsonLoader {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["json"]
    }

    fn load(&self, path: &Path, options: &LoadOptions) -> Result<Vec<ReferenceValue>, VerifyError> {
        let text = read_text(path)?;
        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|err| corrupt_data("store.json_parse", path, err))?;
        let pairs = flatten(&Node::from_json(&value), options.max_list_len);
        Ok(into_references(pairs, &file_label(path)))
    }
}
