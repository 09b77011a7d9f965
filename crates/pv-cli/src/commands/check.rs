use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use log::info;
use pv_extract::Extractor;
use pv_match::Matcher;
use pv_report::{write_console, write_report, ConsoleOptions, Tally};
use pv_store::{load_path, FormatRegistry};

use super::{read_document, LoadArgs};

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Paper draft (.tex, .md or plain text).
    pub paper: PathBuf,
    /// Results directory or single results file.
    #[arg(short, long, value_name = "PATH")]
    pub results: PathBuf,
    /// Tolerance in percent for TOLERABLE deviations.
    #[arg(short, long, value_name = "PCT")]
    pub tolerance: Option<f64>,
    /// Write a report file (.md, .json, otherwise plain text).
    #[arg(short = 'o', long, value_name = "FILE")]
    pub report: Option<PathBuf>,
    /// Only print mismatches.
    #[arg(short, long)]
    pub quiet: bool,
    /// Also print claims without a plausible reference.
    #[arg(long)]
    pub show_unmatched: bool,
    #[command(flatten)]
    pub load: LoadArgs,
}

pub fn run(args: &CheckArgs) -> Result<ExitCode, Box<dyn Error>> {
    let mut config = args.load.resolve()?;
    if let Some(tolerance) = args.tolerance {
        config.set_tolerance(tolerance);
    }
    config.validate()?;

    let document = args.paper.display().to_string();
    let text = read_document(&args.paper)?;
    let extractor = Extractor::new(config.extraction.clone())?;
    let claims = extractor.extract(&text, &document);
    info!("found {} numeric claims in {document}", claims.len());

    let registry = FormatRegistry::with_defaults();
    let loaded = load_path(&args.results, &registry, &config.loading)?;
    info!(
        "loaded {} reference values from {}",
        loaded.values.len(),
        args.results.display()
    );

    let matcher = Matcher::new(loaded.values, config.matching)?;
    let tolerance_pct = matcher.policy().tolerance_pct;
    let verdicts = matcher.match_all(&claims);
    let tally = Tally::from_verdicts(&verdicts);

    let options = ConsoleOptions {
        quiet: args.quiet,
        show_unmatched: args.show_unmatched,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_console(&mut out, &verdicts, &tally, &loaded.failures, &options)?;
    out.flush()?;

    if let Some(path) = &args.report {
        let format = write_report(path, &document, tolerance_pct, &verdicts, &loaded.failures)?;
        info!("wrote {format:?} report to {}", path.display());
    }
    Ok(ExitCode::from(tally.outcome().exit_code()))
}
