//! Per-variant mean statistics.

use serde::Serialize;

use crate::record::{MeasurementRecord, VariantCategory};
use crate::store::{RecordStore, VariantGroup};

/// Arithmetic means over one variant's records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantSummary {
    /// Variant label.
    pub variant: String,
    /// Category shared by every record of the variant.
    pub category: VariantCategory,
    /// Number of records averaged.
    pub runs: usize,
    /// Mean elapsed time in milliseconds.
    pub mean_time_ms: f64,
    /// Mean GFLOPS.
    pub mean_gflops: f64,
    /// Mean memory throughput in GB/s.
    pub mean_throughput_gb_s: f64,
}

impl VariantSummary {
    /// Summarize one non-empty group.
    fn from_group(group: &VariantGroup<'_>) -> Self {
        let n = group.records.len();
        let mean = |field: fn(&MeasurementRecord) -> f64| {
            group.records.iter().map(|r| field(r)).sum::<f64>() / n as f64
        };

        Self {
            variant: group.variant.to_string(),
            category: group.records[0].category,
            runs: n,
            mean_time_ms: mean(|r| r.time_ms),
            mean_gflops: mean(|r| r.gflops),
            mean_throughput_gb_s: mean(|r| r.throughput_gb_s),
        }
    }
}

/// Compute one summary per distinct variant, in first-appearance order.
pub fn summarize(store: &RecordStore) -> Vec<VariantSummary> {
    store.groups().map(|g| VariantSummary::from_group(&g)).collect()
}
