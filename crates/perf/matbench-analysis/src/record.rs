//! Measurement records and variant categories.

use serde::Serialize;

/// Execution strategy family of a variant.
///
/// Decided once at ingestion from the variant label; renderers and reports
/// read this tag instead of re-matching label substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantCategory {
    /// The sequential baseline.
    Sequential,
    /// Shared-memory threading (OpenMP).
    ThreadParallel,
    /// Distributed processes (MPI).
    ProcessParallel,
    /// Processes each running several threads.
    Hybrid,
    /// A label that follows none of the known conventions.
    Other,
}

impl VariantCategory {
    /// Classify a variant label.
    ///
    /// `Hybrid` is checked before the thread/process markers since hybrid
    /// labels mention both.
    pub fn classify(label: &str, baseline: &str) -> Self {
        if label == baseline {
            Self::Sequential
        } else if label.contains("Hybrid") {
            Self::Hybrid
        } else if label.contains("OpenMP") {
            Self::ThreadParallel
        } else if label.contains("MPI") {
            Self::ProcessParallel
        } else {
            Self::Other
        }
    }

    /// Short display name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::ThreadParallel => "thread-parallel",
            Self::ProcessParallel => "process-parallel",
            Self::Hybrid => "hybrid",
            Self::Other => "other",
        }
    }
}

/// One benchmark run as read from the measurement table.
///
/// Records are created once by the [`RecordStore`](crate::RecordStore) and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementRecord {
    /// Variant label, e.g. `OpenMP_4T`.
    pub variant: String,
    /// Category derived from the label.
    pub category: VariantCategory,
    /// Elapsed wall time in milliseconds.
    pub time_ms: f64,
    /// Achieved floating-point throughput.
    pub gflops: f64,
    /// Achieved memory throughput in GB/s.
    pub throughput_gb_s: f64,
    /// Thread count, when the producer recorded one.
    pub concurrency: Option<u32>,
    /// MPI rank count, when the producer recorded one.
    pub ranks: Option<u32>,
    /// 1-based data row in the source table.
    pub row: usize,
}
