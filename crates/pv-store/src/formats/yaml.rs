use std::path::Path;

use pv_core::{ReferenceValue, VerifyError};

use super::{corrupt_data, file_label, read_text};
use crate::flatten::{flatten, into_references, Node};
use crate::{FormatLoader, LoadOptions};

/// Loads `.yaml`/`.yml` files in mapping order.
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlLoader;

impl FormatLoader for YamlLoader {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["yaml", "yml"]
    }

    fn load(&self, path: &Path, options: &LoadOptions) -> Result<Vec<ReferenceValue>, VerifyError> {
        let text = read_text(path)?;
        let value: serde_yaml::Value =
            serde_yaml::from_str(&text).map_err(|err| corrupt_data("store.yaml_parse", path, err))?;
        let pairs = flatten(&Node::from_yaml(&value), options.max_list_len);
        Ok(into_references(pairs, &file_label(path)))
    }
}
