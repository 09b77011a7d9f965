use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use commands::{
    check::{self, CheckArgs},
    claims::{self, ClaimsArgs},
    values::{self, ValuesArgs},
    version::{self, VersionArgs},
};
use log::LevelFilter;

mod commands;
mod config;

#[derive(Parser, Debug)]
#[command(
    name = "paperverify",
    about = "Check numeric claims in a paper draft against experiment results"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Verify the claims of a document against a results path.
    Check(CheckArgs),
    /// Print the numeric claims extracted from a document.
    Claims(ClaimsArgs),
    /// Print the reference values loaded from a results path.
    Values(ValuesArgs),
    /// Show version information.
    Version(VersionArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let result = match cli.command {
        Command::Check(args) => check::run(&args),
        Command::Claims(args) => claims::run(&args).map(|()| ExitCode::SUCCESS),
        Command::Values(args) => values::run(&args).map(|()| ExitCode::SUCCESS),
        Command::Version(args) => version::run(&args).map(|()| ExitCode::SUCCESS),
    };
    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
