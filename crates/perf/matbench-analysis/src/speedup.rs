//! Speedup against the sequential baseline and best-performer selection.
//!
//! Best performers are chosen from the per-variant means, not from single
//! runs, so the outcome does not depend on one lucky repetition. Ties go
//! to the variant that appeared first in the input.

use serde::Serialize;

use crate::aggregate::VariantSummary;
use crate::error::{AnalysisError, Result};
use crate::record::VariantCategory;

/// Speedup of one non-baseline variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupEntry {
    /// Variant label.
    pub variant: String,
    /// Category of the variant.
    pub category: VariantCategory,
    /// `baseline_mean_time / variant_mean_time`. Below 1.0 is a regression.
    pub speedup: f64,
}

/// Outcome of comparing every variant against the baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedupAnalysis {
    /// Baseline label used for the comparison.
    pub baseline: String,
    /// Mean time of the baseline variant.
    pub baseline_time_ms: f64,
    /// One entry per non-baseline variant, in input order.
    pub entries: Vec<SpeedupEntry>,
    /// Variant with the lowest mean time (baseline included).
    pub best_time_variant: String,
    /// Variant with the highest mean GFLOPS (baseline included).
    pub best_gflops_variant: String,
    /// Entry with the highest speedup; `None` when only the baseline ran.
    pub best_speedup: Option<SpeedupEntry>,
}

impl SpeedupAnalysis {
    /// Speedup of any analysed variant, the baseline included.
    pub fn speedup_for(&self, variant: &str) -> Option<f64> {
        if variant == self.baseline {
            return Some(1.0);
        }
        self.entries
            .iter()
            .find(|e| e.variant == variant)
            .map(|e| e.speedup)
    }
}

/// Compare every summary against the one labelled `baseline`.
///
/// Fails with [`AnalysisError::MissingBaseline`] when no summary carries
/// the label, with [`AnalysisError::ZeroBaselineTime`] when its mean time
/// is zero, and with [`AnalysisError::ZeroVariantTime`] when any other
/// variant's mean time is zero.
pub fn analyze(summaries: &[VariantSummary], baseline: &str) -> Result<SpeedupAnalysis> {
    let base = summaries
        .iter()
        .find(|s| s.variant == baseline)
        .ok_or_else(|| AnalysisError::MissingBaseline {
            label: baseline.to_string(),
        })?;
    if base.mean_time_ms <= 0.0 {
        return Err(AnalysisError::ZeroBaselineTime {
            label: baseline.to_string(),
        });
    }
    let baseline_time_ms = base.mean_time_ms;

    let entries = summaries
        .iter()
        .filter(|s| s.variant != baseline)
        .map(|s| {
            if s.mean_time_ms <= 0.0 {
                return Err(AnalysisError::ZeroVariantTime {
                    variant: s.variant.clone(),
                });
            }
            Ok(SpeedupEntry {
                variant: s.variant.clone(),
                category: s.category,
                speedup: baseline_time_ms / s.mean_time_ms,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // The baseline is present, so `summaries` is non-empty.
    let best_time = first_extreme(summaries, |s| s.mean_time_ms, |a, b| a < b).unwrap_or(base);
    let best_gflops = first_extreme(summaries, |s| s.mean_gflops, |a, b| a > b).unwrap_or(base);
    let best_speedup = first_extreme(&entries, |e| e.speedup, |a, b| a > b).cloned();

    Ok(SpeedupAnalysis {
        baseline: baseline.to_string(),
        baseline_time_ms,
        best_time_variant: best_time.variant.clone(),
        best_gflops_variant: best_gflops.variant.clone(),
        best_speedup,
        entries,
    })
}

/// First item whose key is not beaten by any later item.
///
/// `better(a, b)` must be strict so that equal keys keep the earlier item.
fn first_extreme<T>(
    items: &[T],
    key: impl Fn(&T) -> f64,
    better: impl Fn(f64, f64) -> bool,
) -> Option<&T> {
    let mut best: Option<&T> = None;
    for item in items {
        match best {
            Some(current) if !better(key(item), key(current)) => {}
            _ => best = Some(item),
        }
    }
    best
}
