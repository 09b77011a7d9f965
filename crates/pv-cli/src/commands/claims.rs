use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use pv_core::to_canonical_json_string;
use pv_extract::Extractor;

use super::read_document;
use crate::config::VerifyConfig;

#[derive(Args, Debug)]
pub struct ClaimsArgs {
    /// Document to scan.
    pub paper: PathBuf,
    /// YAML configuration file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Prints extracted claims as JSON lines.
pub fn run(args: &ClaimsArgs) -> Result<(), Box<dyn Error>> {
    let config = VerifyConfig::load(args.config.as_ref())?;
    let text = read_document(&args.paper)?;
    let extractor = Extractor::new(config.extraction)?;
    for claim in extractor.extract(&text, &args.paper.display().to_string()) {
        println!("{}", to_canonical_json_string(&claim)?);
    }
    Ok(())
}
