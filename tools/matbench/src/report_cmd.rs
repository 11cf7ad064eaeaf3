//! `matbench report` and `matbench summary`.
//!
//! Both commands load the metrics table and run the analysis pipeline. The
//! report command renders every artifact in memory and commits them
//! together, so a fatal error leaves the output paths untouched.

use std::path::Path;

use anyhow::{Context, Result};
use matbench_analysis::{
    AnalysisObserver, MeasurementRecord, RecordStore, Report, VariantSummary, chart, scaling, text,
};

use crate::artifact::{self, Artifact};
use crate::cli::{ReportArgs, SummaryArgs};
use crate::config::ResolvedConfig;
use crate::output;
use crate::verbose::{StageTimer, dprintln, wprintln};

/// `matbench report`: analyse and write the report, chart and optional JSON.
pub fn cmd_report(args: &ReportArgs, config_path: Option<&Path>) -> Result<()> {
    let config = ResolvedConfig::load(config_path)?.with_report_args(args);
    config.validate()?;
    config.print();

    let report = analyze(&config)?;

    let family = scaling::family_display_name(&config.analysis.scaling_family);
    let report_text = {
        let _t = StageTimer::start("render text");
        text::render(&report, config.matrix_size)
    };
    let chart_svg = {
        let _t = StageTimer::start("render chart");
        chart::render(&report, config.matrix_size, family)
    };
    let report_json = match &config.json {
        Some(_) => Some(serde_json::to_string_pretty(&report).context("serializing report to JSON")?),
        None => None,
    };

    let mut artifacts = vec![
        Artifact {
            path: &config.chart,
            contents: chart_svg.as_bytes(),
        },
        Artifact {
            path: &config.report,
            contents: report_text.as_bytes(),
        },
    ];
    if let (Some(path), Some(json)) = (&config.json, &report_json) {
        artifacts.push(Artifact {
            path,
            contents: json.as_bytes(),
        });
    }
    artifact::commit_all(&artifacts)?;

    dprintln!("\n✓ Graph saved to '{}'", config.chart.display());
    dprintln!("✓ Detailed report saved to '{}'", config.report.display());
    if let Some(path) = &config.json {
        dprintln!("✓ JSON report saved to '{}'", path.display());
    }

    println!("\nGenerated files:");
    println!("  - {}", config.chart.display());
    println!("  - {}", config.report.display());
    if let Some(path) = &config.json {
        println!("  - {}", path.display());
    }
    println!("  - {}", config.input.display());

    Ok(())
}

/// `matbench summary`: print the analysis to the console only.
pub fn cmd_summary(args: &SummaryArgs, config_path: Option<&Path>) -> Result<()> {
    let config = ResolvedConfig::load(config_path)?.with_analysis_args(&args.analysis);
    config.validate()?;
    config.print();

    let report = analyze(&config)?;

    dprintln!();
    output::print_speedups(&report.speedup);
    if let Some(sweep) = &report.scaling {
        dprintln!();
        dprintln!(
            "{} scaling: best {} threads, {:.2} ms -> {:.2} ms ({:.1}%)",
            sweep.family_name(),
            sweep.best_concurrency,
            sweep.max_time_ms,
            sweep.min_time_ms,
            sweep.improvement_pct
        );
    }
    Ok(())
}

/// Console hooks: stage timings, the summary table and lenient-sweep warnings.
struct ConsoleObserver;

impl AnalysisObserver for ConsoleObserver {
    fn stage<T>(&mut self, name: &'static str, run: impl FnOnce() -> T) -> T {
        let _t = StageTimer::start(name);
        run()
    }

    fn summarized(&mut self, summaries: &[VariantSummary]) {
        output::print_summaries(summaries);
    }

    fn skipped(&mut self, record: &MeasurementRecord) {
        wprintln!(
            "skipping '{}' at row {}: no thread count for scaling analysis",
            record.variant,
            record.row
        );
    }
}

/// Load the table, echo it, and run every analysis stage.
fn analyze(config: &ResolvedConfig) -> Result<Report> {
    output::print_banner("RESULTS ANALYSIS");

    let store = {
        let _t = StageTimer::start("load");
        RecordStore::load(&config.input, &config.analysis.baseline)?
    };
    dprintln!("\nData loaded ({} rows from {}):", store.len(), config.input.display());
    output::print_records(store.records());
    dprintln!();

    Ok(Report::analyze_with(&store, &config.analysis, &mut ConsoleObserver)?)
}
