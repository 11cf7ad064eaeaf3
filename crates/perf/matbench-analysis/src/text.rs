//! Plain-text report writer.
//!
//! Sections appear in a fixed order: summary statistics, speedup table,
//! analysis and insights, recommendations. The output carries no
//! timestamp, so identical input renders identical bytes.

use std::fmt::{self, Write};

use crate::report::Report;

const RULE_WIDTH: usize = 60;

const RECOMMENDATIONS: [&str; 4] = [
    "For maximum performance, use the hybrid approach",
    "Balance MPI ranks and OpenMP threads based on system resources",
    "Monitor NUMA effects on multi-socket systems",
    "Use proper work scheduling (dynamic, guided) for better load balancing",
];

/// Render the full text report.
///
/// `matrix_size` is the square matrix dimension printed in the header.
pub fn render(report: &Report, matrix_size: u32) -> String {
    let mut out = String::new();
    write_report(&mut out, report, matrix_size).expect("writing to a String cannot fail");
    out
}

fn write_report(w: &mut impl Write, report: &Report, matrix_size: u32) -> fmt::Result {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);

    writeln!(w, "{heavy}")?;
    writeln!(w, "MATRIX-MATRIX MULTIPLICATION PERFORMANCE REPORT")?;
    writeln!(w, "Matrix size: {matrix_size} × {matrix_size}")?;
    writeln!(w, "{heavy}")?;
    writeln!(w)?;

    writeln!(w, "SUMMARY STATISTICS:")?;
    writeln!(w, "{light}")?;
    for s in &report.summaries {
        writeln!(
            w,
            "{:<25} | Time: {:8.2} ms | GFLOPS: {:8.2} | Throughput: {:6.2} GB/s",
            s.variant, s.mean_time_ms, s.mean_gflops, s.mean_throughput_gb_s
        )?;
    }

    let speedup = &report.speedup;
    writeln!(w)?;
    writeln!(w, "{heavy}")?;
    writeln!(w, "SPEEDUP ANALYSIS (vs {})", speedup.baseline)?;
    writeln!(w, "{light}")?;
    writeln!(w, "{} baseline: {:.2} ms", speedup.baseline, speedup.baseline_time_ms)?;
    writeln!(w)?;
    for entry in &speedup.entries {
        writeln!(w, "{:<25} | Speedup: {:.2}x", entry.variant, entry.speedup)?;
    }

    writeln!(w)?;
    writeln!(w, "{heavy}")?;
    writeln!(w, "ANALYSIS & INSIGHTS")?;
    writeln!(w, "{light}")?;
    writeln!(w)?;
    writeln!(w, "1. Best execution time: {}", speedup.best_time_variant)?;
    writeln!(w, "2. Best GFLOPS performance: {}", speedup.best_gflops_variant)?;
    if let Some(best) = &speedup.best_speedup {
        writeln!(w, "3. Best speedup: {} ({:.2}x)", best.variant, best.speedup)?;
    }

    if let Some(scaling) = &report.scaling {
        writeln!(w)?;
        writeln!(w, "4. {} Scaling Analysis:", scaling.family_name())?;
        writeln!(w, "   - Best performance with {} threads", scaling.best_concurrency)?;
        writeln!(
            w,
            "   - Improvement: {:.2} ms ({:.1}%)",
            scaling.improvement_ms, scaling.improvement_pct
        )?;
    }

    writeln!(w)?;
    writeln!(w, "{heavy}")?;
    writeln!(w, "RECOMMENDATIONS")?;
    writeln!(w, "{light}")?;
    for (i, line) in RECOMMENDATIONS.iter().enumerate() {
        writeln!(w, "{}. {line}", i + 1)?;
    }

    Ok(())
}
