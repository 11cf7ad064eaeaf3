//! Thread-count sweep analysis for one scalable variant family.

use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::record::MeasurementRecord;

/// How to treat family records that lack a thread count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingPolicy {
    /// Abort with [`AnalysisError::MalformedScalingRecord`].
    #[default]
    Strict,
    /// Leave the record out of the sweep.
    Lenient,
}

/// One run of the sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingPoint {
    /// Variant label of the run.
    pub variant: String,
    /// Thread count.
    pub concurrency: u32,
    /// Elapsed time in milliseconds.
    pub time_ms: f64,
    /// Achieved GFLOPS.
    pub gflops: f64,
}

/// Summary of a thread-count sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScalingSummary {
    /// Pattern the family was selected by.
    pub family: String,
    /// Runs sorted ascending by thread count; input order within a count.
    pub points: Vec<ScalingPoint>,
    /// Fastest run time.
    pub min_time_ms: f64,
    /// Slowest run time.
    pub max_time_ms: f64,
    /// Thread count of the fastest run (lowest count on ties).
    pub best_concurrency: u32,
    /// `max_time_ms - min_time_ms`.
    pub improvement_ms: f64,
    /// Improvement relative to the slowest run, in percent.
    pub improvement_pct: f64,
}

impl ScalingSummary {
    /// Human-readable family name, e.g. `OpenMP` for the pattern `OpenMP_`.
    pub fn family_name(&self) -> &str {
        family_display_name(&self.family)
    }
}

/// Strip separator characters from a family pattern for display.
pub fn family_display_name(pattern: &str) -> &str {
    let name = pattern.trim_matches(|c: char| c == '_' || c == '-' || c.is_whitespace());
    if name.is_empty() { pattern } else { name }
}

/// Returns `true` if `variant` belongs to the family named by `pattern`.
pub fn in_family(variant: &str, pattern: &str) -> bool {
    variant.contains(pattern)
}

/// Family records that carry no thread count.
pub fn missing_concurrency<'a>(
    records: &'a [MeasurementRecord],
    family: &str,
) -> Vec<&'a MeasurementRecord> {
    records
        .iter()
        .filter(|r| in_family(&r.variant, family) && r.concurrency.is_none())
        .collect()
}

/// Analyse the runs of the family selected by `family`.
///
/// Returns `Ok(None)` when no record belongs to the family; the sweep is
/// optional and its absence is not an error.
pub fn analyze_scaling(
    records: &[MeasurementRecord],
    family: &str,
    policy: ScalingPolicy,
) -> Result<Option<ScalingSummary>> {
    let mut points = Vec::new();
    for record in records.iter().filter(|r| in_family(&r.variant, family)) {
        let Some(concurrency) = record.concurrency else {
            match policy {
                ScalingPolicy::Strict => {
                    return Err(AnalysisError::MalformedScalingRecord {
                        variant: record.variant.clone(),
                        row: record.row,
                    });
                }
                ScalingPolicy::Lenient => continue,
            }
        };
        points.push(ScalingPoint {
            variant: record.variant.clone(),
            concurrency,
            time_ms: record.time_ms,
            gflops: record.gflops,
        });
    }

    if points.is_empty() {
        return Ok(None);
    }

    // Stable, so equal thread counts keep input order.
    points.sort_by_key(|p| p.concurrency);

    let mut fastest = &points[0];
    let mut max_time_ms = points[0].time_ms;
    for point in &points[1..] {
        if point.time_ms < fastest.time_ms {
            fastest = point;
        }
        max_time_ms = max_time_ms.max(point.time_ms);
    }
    let min_time_ms = fastest.time_ms;
    let best_concurrency = fastest.concurrency;

    let improvement_ms = max_time_ms - min_time_ms;
    let improvement_pct = if max_time_ms == 0.0 {
        0.0
    } else {
        100.0 * improvement_ms / max_time_ms
    };

    Ok(Some(ScalingSummary {
        family: family.to_string(),
        points,
        min_time_ms,
        max_time_ms,
        best_concurrency,
        improvement_ms,
        improvement_pct,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::VariantCategory;

    fn run(variant: &str, threads: Option<u32>, time_ms: f64, row: usize) -> MeasurementRecord {
        MeasurementRecord {
            variant: variant.to_string(),
            category: VariantCategory::classify(variant, "Sequential"),
            time_ms,
            gflops: 16_000.0 / time_ms,
            throughput_gb_s: 1.0,
            concurrency: threads,
            ranks: Some(1),
            row,
        }
    }

    fn sweep() -> Vec<MeasurementRecord> {
        vec![
            run("Sequential", Some(1), 1000.0, 1),
            run("OpenMP_8T", Some(8), 250.0, 2),
            run("OpenMP_2T", Some(2), 420.0, 3),
            run("MPI_4R", Some(1), 300.0, 4),
            run("OpenMP_1T", Some(1), 800.0, 5),
            run("OpenMP_4T", Some(4), 230.0, 6),
        ]
    }

    #[test]
    fn sweep_summary() {
        let summary = analyze_scaling(&sweep(), "OpenMP_", ScalingPolicy::Strict)
            .unwrap()
            .unwrap();

        let threads: Vec<u32> = summary.points.iter().map(|p| p.concurrency).collect();
        assert_eq!(threads, [1, 2, 4, 8]);
        assert_eq!(summary.min_time_ms, 230.0);
        assert_eq!(summary.max_time_ms, 800.0);
        assert_eq!(summary.best_concurrency, 4);
        assert_eq!(summary.improvement_ms, 570.0);
        assert!((summary.improvement_pct - 71.25).abs() < 1e-9);
    }

    #[test]
    fn family_name_drops_separators() {
        let summary = analyze_scaling(&sweep(), "OpenMP_", ScalingPolicy::Strict)
            .unwrap()
            .unwrap();
        assert_eq!(summary.family_name(), "OpenMP");
        assert_eq!(family_display_name("_"), "_");
    }

    #[test]
    fn absent_family_is_none() {
        let records = vec![run("Sequential", Some(1), 1000.0, 1), run("MPI_2R", Some(1), 600.0, 2)];
        assert!(analyze_scaling(&records, "OpenMP_", ScalingPolicy::Strict)
            .unwrap()
            .is_none());
        assert!(analyze_scaling(&[], "OpenMP_", ScalingPolicy::Strict).unwrap().is_none());
    }

    #[test]
    fn family_match_is_substring() {
        let records = vec![run("Hybrid_2R_4T", Some(4), 200.0, 1), run("OpenMP_4T", Some(4), 230.0, 2)];
        let summary = analyze_scaling(&records, "OpenMP_", ScalingPolicy::Strict)
            .unwrap()
            .unwrap();
        assert_eq!(summary.points.len(), 1);
        assert_eq!(summary.points[0].variant, "OpenMP_4T");
    }

    #[test]
    fn strict_policy_rejects_missing_thread_count() {
        let records = vec![run("OpenMP_2T", Some(2), 420.0, 1), run("OpenMP_4T", None, 230.0, 7)];
        match analyze_scaling(&records, "OpenMP_", ScalingPolicy::Strict) {
            Err(AnalysisError::MalformedScalingRecord { variant, row }) => {
                assert_eq!(variant, "OpenMP_4T");
                assert_eq!(row, 7);
            }
            other => panic!("expected MalformedScalingRecord, got {other:?}"),
        }
    }

    #[test]
    fn lenient_policy_skips_missing_thread_count() {
        let records = vec![run("OpenMP_2T", Some(2), 420.0, 1), run("OpenMP_4T", None, 230.0, 2)];
        let summary = analyze_scaling(&records, "OpenMP_", ScalingPolicy::Lenient)
            .unwrap()
            .unwrap();
        assert_eq!(summary.points.len(), 1);
        assert_eq!(summary.best_concurrency, 2);
        assert_eq!(missing_concurrency(&records, "OpenMP_").len(), 1);
    }

    #[test]
    fn lenient_policy_with_nothing_left_is_none() {
        let records = vec![run("OpenMP_4T", None, 230.0, 1)];
        assert!(analyze_scaling(&records, "OpenMP_", ScalingPolicy::Lenient)
            .unwrap()
            .is_none());
    }

    #[test]
    fn equal_times_pick_lowest_thread_count() {
        let records = vec![
            run("OpenMP_8T", Some(8), 200.0, 1),
            run("OpenMP_4T", Some(4), 200.0, 2),
            run("OpenMP_1T", Some(1), 500.0, 3),
        ];
        let summary = analyze_scaling(&records, "OpenMP_", ScalingPolicy::Strict)
            .unwrap()
            .unwrap();
        assert_eq!(summary.best_concurrency, 4);
    }

    #[test]
    fn repeated_thread_counts_keep_input_order() {
        let records = vec![
            run("OpenMP_2T", Some(2), 410.0, 1),
            run("OpenMP_1T", Some(1), 800.0, 2),
            run("OpenMP_2T", Some(2), 430.0, 3),
        ];
        let summary = analyze_scaling(&records, "OpenMP_", ScalingPolicy::Strict)
            .unwrap()
            .unwrap();
        let times: Vec<f64> = summary.points.iter().map(|p| p.time_ms).collect();
        assert_eq!(times, [800.0, 410.0, 430.0]);
    }

    #[test]
    fn all_zero_times_have_zero_improvement() {
        let mut records = vec![run("OpenMP_1T", Some(1), 1.0, 1), run("OpenMP_2T", Some(2), 1.0, 2)];
        for r in &mut records {
            r.time_ms = 0.0;
        }
        let summary = analyze_scaling(&records, "OpenMP_", ScalingPolicy::Strict)
            .unwrap()
            .unwrap();
        assert_eq!(summary.max_time_ms, 0.0);
        assert_eq!(summary.improvement_pct, 0.0);
        assert_eq!(summary.best_concurrency, 1);
    }
}
