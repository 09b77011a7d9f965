use std::error::Error;
use std::process::Command;

use clap::Args;
use pv_core::to_canonical_json_string;
use pv_store::FormatRegistry;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit extended metadata including git and toolchain information.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: String,
    git_commit: String,
    rustc: String,
    formats: Vec<String>,
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("paperverify {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    println!("{}", to_canonical_json_string(&gather_info())?);
    Ok(())
}

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    let out = Command::new(program).args(args).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}

fn gather_info() -> VersionInfo {
    VersionInfo {
        version: env!("CARGO_PKG_VERSION").into(),
        git_commit: command_output("git", &["rev-parse", "HEAD"]).unwrap_or_else(|| "unknown".into()),
        rustc: command_output("rustc", &["--version"])
            .unwrap_or_else(|| "rustc unavailable".into()),
        formats: FormatRegistry::with_defaults()
            .supported_extensions()
            .into_iter()
            .map(String::from)
            .collect(),
    }
}
