use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::{debug, info, warn};
use pv_core::{ErrorInfo, ReferenceValue, VerifyError};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use walkdir::{DirEntry, WalkDir};

use crate::formats::file_label;
use crate::FormatRegistry;

/// Options for loading a results path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Worker threads used to load files.
    #[serde(default = "LoadOptions::default_jobs")]
    pub jobs: usize,
    /// Glob patterns matched against paths relative to the results root.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Follow symbolic links while walking directories.
    #[serde(default)]
    pub follow_links: bool,
    /// Lists longer than this are treated as raw series and skipped.
    #[serde(default = "LoadOptions::default_max_list_len")]
    pub max_list_len: usize,
}

impl LoadOptions {
    const fn default_jobs() -> usize {
        1
    }

    const fn default_max_list_len() -> usize {
        100
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            jobs: Self::default_jobs(),
            exclude: Vec::new(),
            follow_links: false,
            max_list_len: Self::default_max_list_len(),
        }
    }
}

/// A results file that could not be loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadFailure {
    /// Path relative to the results root.
    pub path: String,
    /// Per-file error.
    pub error: VerifyError,
}

/// Everything produced by [`load_path`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadOutcome {
    /// Reference values in path order, then file order.
    pub values: Vec<ReferenceValue>,
    /// Number of files that loaded successfully.
    pub files_loaded: usize,
    /// Files that failed to load.
    pub failures: Vec<LoadFailure>,
    /// Files skipped because no loader handles their extension.
    pub unsupported: usize,
}

fn store_error(code: &str, err: impl ToString) -> VerifyError {
    VerifyError::Io(ErrorInfo::new(code, err.to_string()))
}

fn build_excludes(patterns: &[String]) -> Result<GlobSet, VerifyError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|err| {
            VerifyError::Config(
                ErrorInfo::new("store.exclude_pattern", err.to_string())
                    .with_context("pattern", pattern.clone()),
            )
        })?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|err| VerifyError::Config(ErrorInfo::new("store.exclude_pattern", err.to_string())))
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0 && entry.file_name().to_string_lossy().starts_with('.')
}

/// Root-relative label with `/` separators.
fn relative_label(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|component| component.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn relabel(values: Vec<ReferenceValue>, source: &str) -> Vec<ReferenceValue> {
    values
        .into_iter()
        .map(|value| ReferenceValue {
            source_file: source.to_string(),
            ..value
        })
        .collect()
}

/// Loads a results directory or a single results file.
///
/// Only a missing `root` is fatal. Per-file failures are recorded in
/// [`LoadOutcome::failures`] and logged.
pub fn load_path(
    root: &Path,
    registry: &FormatRegistry,
    options: &LoadOptions,
) -> Result<LoadOutcome, VerifyError> {
    if !root.exists() {
        return Err(VerifyError::Io(
            ErrorInfo::new("store.results_missing", "results path does not exist")
                .with_context("path", root.display().to_string()),
        ));
    }
    if !root.is_dir() {
        return Ok(load_single(root, registry, options));
    }

    let excludes = build_excludes(&options.exclude)?;
    let mut outcome = LoadOutcome::default();
    let mut files: Vec<(String, PathBuf)> = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(options.follow_links)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                let path = err
                    .path()
                    .map(|path| relative_label(root, path))
                    .unwrap_or_default();
                warn!("cannot walk {path}: {err}");
                outcome.failures.push(LoadFailure {
                    error: VerifyError::CorruptData(
                        ErrorInfo::new("store.walk", err.to_string())
                            .with_context("path", path.clone()),
                    ),
                    path,
                });
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = relative_label(root, entry.path());
        if excludes.is_match(&rel) {
            debug!("excluded {rel}");
            continue;
        }
        if registry.loader_for(entry.path()).is_none() {
            debug!("no loader for {rel}");
            outcome.unsupported += 1;
            continue;
        }
        files.push((rel, entry.into_path()));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.jobs.max(1))
        .build()
        .map_err(|err| store_error("store.thread_pool", err))?;
    let mut loaded: Vec<(usize, Result<Vec<ReferenceValue>, VerifyError>)> = pool.install(|| {
        files
            .par_iter()
            .enumerate()
            .map(|(index, (_, path))| (index, registry.load(path, options)))
            .collect()
    });
    loaded.sort_by_key(|(index, _)| *index);

    for (index, result) in loaded {
        let rel = &files[index].0;
        match result {
            Ok(values) => {
                outcome.files_loaded += 1;
                outcome.values.extend(relabel(values, rel));
            }
            Err(err) if err.is_per_file() => {
                warn!("failed to load {rel}: {err}");
                outcome.failures.push(LoadFailure {
                    path: rel.clone(),
                    error: err,
                });
            }
            Err(err) => return Err(err),
        }
    }
    info!(
        "loaded {} values from {} files ({} failed, {} unsupported)",
        outcome.values.len(),
        outcome.files_loaded,
        outcome.failures.len(),
        outcome.unsupported
    );
    Ok(outcome)
}

fn load_single(path: &Path, registry: &FormatRegistry, options: &LoadOptions) -> LoadOutcome {
    let label = file_label(path);
    let mut outcome = LoadOutcome::default();
    match registry.load(path, options) {
        Ok(values) => {
            outcome.files_loaded = 1;
            outcome.values = relabel(values, &label);
        }
        Err(err) => {
            warn!("failed to load {label}: {err}");
            outcome.failures.push(LoadFailure { path: label, error: err });
        }
    }
    outcome
}
