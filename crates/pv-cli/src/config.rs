use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use pv_core::{ErrorInfo, VerifyError};
use pv_extract::ExtractOptions;
use pv_match::MatchPolicy;
use pv_store::LoadOptions;
use serde::{Deserialize, Serialize};

/// Settings for one verification run, loadable from YAML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifyConfig {
    #[serde(default)]
    pub extraction: ExtractOptions,
    #[serde(default)]
    pub loading: LoadOptions,
    #[serde(default)]
    pub matching: MatchPolicy,
}

fn config_error(code: &str, path: &Path, err: impl ToString) -> VerifyError {
    VerifyError::Config(
        ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()),
    )
}

impl VerifyConfig {
    /// Reads the YAML file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&PathBuf>) -> Result<Self, VerifyError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|err| config_error("cli.config_read", path, err))?;
        let config: Self =
            serde_yaml::from_str(&text).map_err(|err| config_error("cli.config_parse", path, err))?;
        debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Applies a tolerance given on the command line. The plausibility bound
    /// is raised when the tolerance exceeds it.
    pub fn set_tolerance(&mut self, tolerance_pct: f64) {
        self.matching.tolerance_pct = tolerance_pct;
        if tolerance_pct.is_finite() && self.matching.plausible_pct < tolerance_pct {
            self.matching.plausible_pct = tolerance_pct;
        }
    }

    pub fn validate(&self) -> Result<(), VerifyError> {
        self.matching.validate()?;
        if self.loading.jobs == 0 {
            return Err(VerifyError::Config(
                ErrorInfo::new("cli.jobs", "jobs must be at least 1").with_hint("use --jobs 1"),
            ));
        }
        Ok(())
    }
}
