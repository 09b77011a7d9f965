use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use log::info;
use pv_core::to_canonical_json_string;
use pv_report::render_failure;
use pv_store::{load_path, FormatRegistry};

use super::LoadArgs;

#[derive(Args, Debug)]
pub struct ValuesArgs {
    /// Results directory or single results file.
    pub results: PathBuf,
    #[command(flatten)]
    pub load: LoadArgs,
}

/// Prints loaded reference values as JSON lines and load failures on stderr.
pub fn run(args: &ValuesArgs) -> Result<(), Box<dyn Error>> {
    let config = args.load.resolve()?;
    config.validate()?;
    let outcome = load_path(&args.results, &FormatRegistry::with_defaults(), &config.loading)?;
    for value in &outcome.values {
        println!("{}", to_canonical_json_string(value)?);
    }
    for failure in &outcome.failures {
        eprintln!("{}", render_failure(failure));
    }
    info!(
        "{} values from {} files, {} unsupported files skipped",
        outcome.values.len(),
        outcome.files_loaded,
        outcome.unsupported
    );
    Ok(())
}
