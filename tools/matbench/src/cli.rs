//! Command-line interface definitions for matbench.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Matrix-multiplication benchmark analysis.
#[derive(Parser)]
#[command(name = "matbench", version, about)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: ./matbench.toml when present).
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Suppress progress output; show only errors and generated file paths.
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose output with stage timings and configuration details.
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Analyse the metrics table and write the report and chart.
    Report(ReportArgs),
    /// Print summary statistics and speedups without writing any files.
    Summary(SummaryArgs),
}

/// Options shared by every command that analyses the metrics table.
#[derive(Args, Default)]
pub struct AnalysisArgs {
    /// Metrics CSV produced by the benchmark binaries.
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// Label of the sequential baseline variant.
    #[arg(long)]
    pub baseline: Option<String>,

    /// Label substring selecting the thread-sweep family.
    #[arg(long)]
    pub family: Option<String>,

    /// Skip sweep rows without a thread count instead of failing.
    #[arg(long)]
    pub lenient_scaling: bool,
}

/// Arguments for the `report` subcommand.
#[derive(Parser)]
pub struct ReportArgs {
    /// Analysis selection.
    #[command(flatten)]
    pub analysis: AnalysisArgs,

    /// Output path of the text report.
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Output path of the SVG chart.
    #[arg(long)]
    pub chart: Option<PathBuf>,

    /// Also write the report as JSON to this path.
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Square matrix dimension printed in the report header.
    #[arg(long)]
    pub matrix_size: Option<u32>,
}

/// Arguments for the `summary` subcommand.
#[derive(Parser)]
pub struct SummaryArgs {
    /// Analysis selection.
    #[command(flatten)]
    pub analysis: AnalysisArgs,
}
