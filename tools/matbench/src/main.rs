//! Matrix-multiplication benchmark analysis.
//!
//! Reads the metrics table written by the sequential, OpenMP, MPI and
//! hybrid benchmark binaries and produces a text report and SVG chart.
//!
//! Pipeline: resolve config → load metrics → aggregate → speedup →
//!           scaling → assemble report → render → write artifacts.

mod artifact;
mod cli;
mod config;
mod output;
mod report_cmd;
mod verbose;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use matbench_analysis::AnalysisError;

/// Exit status when the metrics table does not exist.
const EXIT_MISSING_INPUT: u8 = 1;
/// Exit status for every other fatal error.
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    verbose::init(verbose::Verbosity::from_flags(cli.quiet, cli.verbose));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if is_missing_input(&err) => {
            eprintln!("error: {err}; run the benchmark binaries first to produce it");
            ExitCode::from(EXIT_MISSING_INPUT)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run(cli: &cli::Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match &cli.command {
        cli::Command::Report(args) => report_cmd::cmd_report(args, config_path),
        cli::Command::Summary(args) => report_cmd::cmd_summary(args, config_path),
    }
}

fn is_missing_input(err: &anyhow::Error) -> bool {
    err.downcast_ref::<AnalysisError>()
        .is_some_and(AnalysisError::is_missing_input)
}
