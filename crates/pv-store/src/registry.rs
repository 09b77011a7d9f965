use std::path::Path;

use pv_core::{ErrorInfo, ReferenceValue, VerifyError};

use crate::directory::LoadOptions;
use crate::formats::{CsvLoader, JsonLoader, SqliteLoader, TomlLoader, YamlLoader};

/// Lower-cased extension of `path`, if any.
pub(crate) fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

/// A loader for one result-file format.
pub trait FormatLoader: Send + Sync {
    /// Short format name used in logs.
    fn name(&self) -> &'static str;

    /// Lower-case extensions handled by this loader, without the dot.
    fn extensions(&self) -> &'static [&'static str];

    /// Returns true when the loader handles `path`.
    fn can_load(&self, path: &Path) -> bool {
        extension_of(path).is_some_and(|ext| self.extensions().contains(&ext.as_str()))
    }

    /// Loads every numeric value of the file. `source_file` of the returned
    /// values is the file name; directory loads relabel it.
    fn load(&self, path: &Path, options: &LoadOptions) -> Result<Vec<ReferenceValue>, VerifyError>;
}

/// Ordered collection of loaders. The first loader accepting a path wins.
pub struct FormatRegistry {
    loaders: Vec<Box<dyn FormatLoader>>,
}

impl FormatRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    /// Registry with the JSON, YAML, TOML, CSV/TSV and SQLite loaders.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(JsonLoader);
        registry.register(YamlLoader);
        registry.register(TomlLoader);
        registry.register(CsvLoader);
        registry.register(SqliteLoader);
        registry
    }

    /// Appends a loader.
    pub fn register<L: FormatLoader + 'static>(&mut self, loader: L) {
        self.loaders.push(Box::new(loader));
    }

    /// Registered loaders in lookup order.
    pub fn loaders(&self) -> impl Iterator<Item = &dyn FormatLoader> {
        self.loaders.iter().map(|loader| loader.as_ref())
    }

    /// Finds the loader for `path`.
    pub fn loader_for(&self, path: &Path) -> Option<&dyn FormatLoader> {
        self.loaders().find(|loader| loader.can_load(path))
    }

    /// Every extension some loader handles, sorted.
    pub fn supported_extensions(&self) -> Vec<&'static str> {
        let mut extensions: Vec<&'static str> = self
            .loaders
            .iter()
            .flat_map(|loader| loader.extensions().iter().copied())
            .collect();
        extensions.sort_unstable();
        extensions.dedup();
        extensions
    }

    /// Loads `path` with the matching loader.
    pub fn load(
        &self,
        path: &Path,
        options: &LoadOptions,
    ) -> Result<Vec<ReferenceValue>, VerifyError> {
        let loader = self.loader_for(path).ok_or_else(|| {
            VerifyError::UnsupportedFormat(
                ErrorInfo::new("store.unsupported_format", "no loader for file extension")
                    .with_context("path", path.display().to_string())
                    .with_context(
                        "extension",
                        extension_of(path).unwrap_or_else(|| "<none>".to_string()),
                    )
                    .with_hint(format!(
                        "supported extensions: {}",
                        self.supported_extensions().join(", ")
                    )),
            )
        })?;
        log::debug!("loading {} as {}", path.display(), loader.name());
        loader.load(path, options)
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for FormatRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.loaders.iter().map(|loader| loader.name()))
            .finish()
    }
}
