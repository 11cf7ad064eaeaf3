//! Performance analysis for matrix-multiplication benchmark runs.
//!
//! Pipeline: load the measurement table into a [`RecordStore`] → average
//! each variant ([`aggregate`]) → compare against the sequential baseline
//! ([`speedup`]) → analyse the thread sweep ([`scaling`]) → assemble a
//! [`Report`] → render it as text ([`text`]) or SVG ([`chart`]).
//!
//! Every stage takes its predecessor's output by reference and returns a
//! new value; nothing is shared or mutated between stages.

pub mod aggregate;
pub mod chart;
pub mod error;
pub mod record;
pub mod report;
pub mod scaling;
pub mod speedup;
pub mod store;
pub mod text;

pub use aggregate::VariantSummary;
pub use error::{AnalysisError, DataSourceError, Result};
pub use record::{MeasurementRecord, VariantCategory};
pub use report::{AnalysisObserver, AnalysisOptions, Report, Silent};
pub use scaling::{ScalingPoint, ScalingPolicy, ScalingSummary};
pub use speedup::{SpeedupAnalysis, SpeedupEntry};
pub use store::{RecordStore, VariantGroup};
