use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use pv_core::{ErrorInfo, VerifyError};

use crate::config::VerifyConfig;

pub mod check;
pub mod claims;
pub mod values;
pub mod version;

/// Flags shared by commands that load results.
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// YAML configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Worker threads for loading result files.
    #[arg(long, value_name = "N")]
    pub jobs: Option<usize>,
    /// Glob of result paths to skip, relative to the results root.
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,
}

impl LoadArgs {
    /// Loads the configuration and applies the command-line overrides.
    pub fn resolve(&self) -> Result<VerifyConfig, Box<dyn Error>> {
        let mut config = VerifyConfig::load(self.config.as_ref())?;
        if let Some(jobs) = self.jobs {
            config.loading.jobs = jobs;
        }
        config.loading.exclude.extend(self.exclude.iter().cloned());
        Ok(config)
    }
}

/// Reads a document, replacing invalid UTF-8.
pub fn read_document(path: &Path) -> Result<String, VerifyError> {
    let bytes = fs::read(path).map_err(|err| {
        VerifyError::Io(
            ErrorInfo::new("cli.read_document", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
