//! Result-file loading for paperverify.
//!
//! A [`FormatRegistry`] maps file extensions to [`FormatLoader`]s. Each loader
//! flattens a file into dotted keys (`runs[0].mae`, `row3.chronos.mae`,
//! `metrics.mae.row0`) with numeric values. [`load_path`] walks a results
//! directory, loads the supported files and records per-file failures.

mod directory;
mod flatten;
pub mod formats;
mod registry;

pub use directory::{load_path, LoadFailure, LoadOptions, LoadOutcome};
pub use formats::{CsvLoader, JsonLoader, SqliteLoader, TomlLoader, YamlLoader};
pub use registry::{FormatLoader, FormatRegistry};
