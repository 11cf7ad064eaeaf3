//! Report assembly.

use serde::Serialize;

use crate::aggregate::{self, VariantSummary};
use crate::error::Result;
use crate::record::MeasurementRecord;
use crate::scaling::{self, ScalingPolicy, ScalingSummary};
use crate::speedup::{self, SpeedupAnalysis};
use crate::store::RecordStore;

/// Settings that select what the analysis compares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Label of the sequential baseline variant.
    pub baseline: String,
    /// Substring selecting the thread-sweep family.
    pub scaling_family: String,
    /// Treatment of family records without a thread count.
    pub scaling_policy: ScalingPolicy,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            baseline: "Sequential".into(),
            scaling_family: "OpenMP_".into(),
            scaling_policy: ScalingPolicy::Strict,
        }
    }
}

/// Everything the renderers need, computed once per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Per-variant means in first-appearance order.
    pub summaries: Vec<VariantSummary>,
    /// Baseline comparison and best performers.
    pub speedup: SpeedupAnalysis,
    /// Thread sweep, when the input contains the family.
    pub scaling: Option<ScalingSummary>,
}

/// Hooks called while [`Report::analyze_with`] runs.
///
/// Every method has a no-op default.
pub trait AnalysisObserver {
    /// Run one named stage. Override to time or trace stages.
    fn stage<T>(&mut self, _name: &'static str, run: impl FnOnce() -> T) -> T {
        run()
    }

    /// Per-variant means are ready. Called before the baseline lookup, so
    /// it fires even when the baseline turns out to be missing.
    fn summarized(&mut self, _summaries: &[VariantSummary]) {}

    /// A family record without a thread count is left out of the sweep
    /// under [`ScalingPolicy::Lenient`].
    fn skipped(&mut self, _record: &MeasurementRecord) {}
}

/// Observer that ignores every hook.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl AnalysisObserver for Silent {}

impl Report {
    /// Compose the stage outputs into a report.
    pub fn assemble(
        summaries: Vec<VariantSummary>,
        speedup: SpeedupAnalysis,
        scaling: Option<ScalingSummary>,
    ) -> Self {
        Self {
            summaries,
            speedup,
            scaling,
        }
    }

    /// Run every analysis stage over a loaded store.
    ///
    /// Nothing is returned unless every stage succeeds.
    pub fn analyze(store: &RecordStore, options: &AnalysisOptions) -> Result<Self> {
        Self::analyze_with(store, options, &mut Silent)
    }

    /// [`Report::analyze`], reporting progress to `observer`.
    pub fn analyze_with(
        store: &RecordStore,
        options: &AnalysisOptions,
        observer: &mut impl AnalysisObserver,
    ) -> Result<Self> {
        let summaries = observer.stage("aggregate", || aggregate::summarize(store));
        observer.summarized(&summaries);

        let speedup = observer.stage("speedup", || speedup::analyze(&summaries, &options.baseline))?;

        if options.scaling_policy == ScalingPolicy::Lenient {
            for record in scaling::missing_concurrency(store.records(), &options.scaling_family) {
                observer.skipped(record);
            }
        }
        let scaling = observer.stage("scaling", || {
            scaling::analyze_scaling(store.records(), &options.scaling_family, options.scaling_policy)
        })?;

        Ok(Self::assemble(summaries, speedup, scaling))
    }
}
