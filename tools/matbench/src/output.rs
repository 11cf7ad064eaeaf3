//! Terminal output for loaded measurements and analysis results.

use matbench_analysis::{MeasurementRecord, SpeedupAnalysis, VariantSummary};

use crate::verbose::dprintln;

const RULE_WIDTH: usize = 60;

/// Print a heading framed by `=` rules.
pub fn print_banner(title: &str) {
    dprintln!("{}", "=".repeat(RULE_WIDTH));
    dprintln!("{title}");
    dprintln!("{}", "=".repeat(RULE_WIDTH));
}

/// Echo the loaded measurement table.
pub fn print_records(records: &[MeasurementRecord]) {
    if records.is_empty() {
        dprintln!("  No measurements to display.");
        return;
    }

    let max_name = records
        .iter()
        .map(|r| r.variant.len())
        .max()
        .unwrap_or(7)
        .max(7);
    let optional = |value: Option<u32>| value.map_or_else(|| "-".to_string(), |v| v.to_string());

    dprintln!(
        "  {:>4}  {:<width$}  {:>12}  {:>10}  {:>15}  {:>11}  {:>9}",
        "row",
        "version",
        "time_ms",
        "gflops",
        "throughput_gb_s",
        "num_threads",
        "num_ranks",
        width = max_name
    );
    dprintln!(
        "  {:->4}  {:-<width$}  {:->12}  {:->10}  {:->15}  {:->11}  {:->9}",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        width = max_name
    );
    for r in records {
        dprintln!(
            "  {:>4}  {:<width$}  {:>12.3}  {:>10.3}  {:>15.3}  {:>11}  {:>9}",
            r.row,
            r.variant,
            r.time_ms,
            r.gflops,
            r.throughput_gb_s,
            optional(r.concurrency),
            optional(r.ranks),
            width = max_name
        );
    }
}

/// Print per-variant means, one line per variant.
pub fn print_summaries(summaries: &[VariantSummary]) {
    dprintln!("SUMMARY STATISTICS:");
    dprintln!("{}", "-".repeat(RULE_WIDTH));
    for s in summaries {
        dprintln!(
            "{:<20} | Time: {:8.2} ms | GFLOPS: {:8.2}",
            s.variant,
            s.mean_time_ms,
            s.mean_gflops
        );
    }
}

/// Print the speedup table and best performers.
pub fn print_speedups(analysis: &SpeedupAnalysis) {
    dprintln!("SPEEDUP (vs {}, {:.2} ms):", analysis.baseline, analysis.baseline_time_ms);
    dprintln!("{}", "-".repeat(RULE_WIDTH));
    for entry in &analysis.entries {
        let flag = if entry.speedup < 1.0 { "  (slower than baseline)" } else { "" };
        dprintln!("{:<20} | Speedup: {:6.2}x{flag}", entry.variant, entry.speedup);
    }
    dprintln!();
    dprintln!("  {:<16}{}", "Fastest:", analysis.best_time_variant);
    dprintln!("  {:<16}{}", "Highest GFLOPS:", analysis.best_gflops_variant);
    if let Some(best) = &analysis.best_speedup {
        dprintln!("  {:<16}{} ({:.2}x)", "Best speedup:", best.variant, best.speedup);
    }
}
