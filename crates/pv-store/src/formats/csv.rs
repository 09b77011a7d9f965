use std::path::Path;

use csv::ReaderBuilder;
use pv_core::{ReferenceValue, VerifyError};

use super::{corrupt_data, file_label};
use crate::flatten::{into_references, parse_cell};
use crate::registry::extension_of;
use crate::{FormatLoader, LoadOptions};

/// Loads `.csv` and tab-separated `.tsv` files.
///
/// The first row is the header. A row whose first cell is non-numeric text
/// uses that cell as a label: `row{n}.{label}.{column}`, otherwise the key is
/// `row{n}.{column}`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLoader;

impl FormatLoader for CsvLoader {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["csv", "tsv"]
    }

    fn load(&self, path: &Path, _options: &LoadOptions) -> Result<Vec<ReferenceValue>, VerifyError> {
        let delimiter = match extension_of(path).as_deref() {
            Some("tsv") => b'\t',
            _ => b',',
        };
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_path(path)
            .map_err(|err| corrupt_data("store.csv_open", path, err))?;
        let headers: Vec<String> = reader
            .headers()
            .map_err(|err| corrupt_data("store.csv_header", path, err))?
            .iter()
            .enumerate()
            .map(|(idx, name)| column_name(idx, name))
            .collect();

        let mut pairs = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record.map_err(|err| corrupt_data("store.csv_parse", path, err))?;
            let label = record
                .get(0)
                .map(str::trim)
                .filter(|cell| !cell.is_empty() && parse_cell(cell).is_none());
            let prefix = match label {
                Some(label) => format!("row{row}.{label}"),
                None => format!("row{row}"),
            };
            for (idx, cell) in record.iter().enumerate() {
                if idx == 0 && label.is_some() {
                    continue;
                }
                let Some(value) = parse_cell(cell) else {
                    continue;
                };
                let column = headers
                    .get(idx)
                    .cloned()
                    .unwrap_or_else(|| format!("col{idx}"));
                pairs.push((format!("{prefix}.{column}"), value));
            }
        }
        Ok(into_references(pairs, &file_label(path)))
    }
}

fn column_name(idx: usize, name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        format!("col{idx}")
    } else {
        trimmed.to_string()
    }
}
