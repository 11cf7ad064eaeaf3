//! Record store: the measurement table, grouped by variant.
//!
//! Rows are kept in source order and distinct variants are remembered in
//! first-appearance order, which every downstream table preserves.

use std::collections::HashMap;
use std::io::{self, Read};
use std::path::Path;

use serde::Deserialize;

use crate::error::{DataSourceError, Result};
use crate::record::{MeasurementRecord, VariantCategory};

/// One CSV row as written by the benchmark producers.
#[derive(Debug, Deserialize)]
struct RawRow {
    version: String,
    time_ms: f64,
    gflops: f64,
    throughput_gb_s: f64,
    #[serde(default)]
    num_threads: Option<u32>,
    #[serde(default)]
    num_ranks: Option<u32>,
}

/// All records sharing one variant label.
#[derive(Debug, Clone)]
pub struct VariantGroup<'a> {
    /// The shared label.
    pub variant: &'a str,
    /// Records in source order. Never empty.
    pub records: Vec<&'a MeasurementRecord>,
}

/// Immutable, ordered collection of measurement records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<MeasurementRecord>,
    /// Distinct variant labels in first-appearance order.
    variant_order: Vec<String>,
    /// Record indices per variant label.
    groups: HashMap<String, Vec<usize>>,
}

impl RecordStore {
    /// Load the measurement table from a CSV file.
    pub fn load(path: &Path, baseline: &str) -> Result<Self> {
        if !path.exists() {
            return Err(DataSourceError::NotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        let read_error = |source| DataSourceError::Read {
            path: path.to_path_buf(),
            source,
        };
        if !path.is_file() {
            return Err(read_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            ))
            .into());
        }
        let file = std::fs::File::open(path).map_err(read_error)?;
        Self::from_reader(std::io::BufReader::new(file), baseline)
    }

    /// Parse a measurement table from any CSV reader.
    ///
    /// The first line must be a header naming at least `version`,
    /// `time_ms`, `gflops` and `throughput_gb_s`.
    pub fn from_reader<R: Read>(reader: R, baseline: &str) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (idx, result) in csv_reader.deserialize::<RawRow>().enumerate() {
            let row = idx + 1;
            let raw = result.map_err(|e| DataSourceError::Malformed {
                row,
                message: e.to_string(),
            })?;
            records.push(validate_row(raw, row, baseline)?);
        }

        Ok(Self::from_records(records))
    }

    /// Build a store from records that were already validated.
    pub fn from_records(records: Vec<MeasurementRecord>) -> Self {
        let mut variant_order = Vec::new();
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, record) in records.iter().enumerate() {
            groups
                .entry(record.variant.clone())
                .or_insert_with(|| {
                    variant_order.push(record.variant.clone());
                    Vec::new()
                })
                .push(idx);
        }
        Self {
            records,
            variant_order,
            groups,
        }
    }

    /// All records in source order.
    pub fn records(&self) -> &[MeasurementRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table had no data rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct variant labels in first-appearance order.
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.variant_order.iter().map(String::as_str)
    }

    /// Records grouped by variant, groups in first-appearance order.
    pub fn groups(&self) -> impl Iterator<Item = VariantGroup<'_>> {
        self.variant_order.iter().map(|variant| VariantGroup {
            variant,
            records: self.groups[variant]
                .iter()
                .map(|&idx| &self.records[idx])
                .collect(),
        })
    }
}

/// Check a raw row's values and turn it into a record.
fn validate_row(raw: RawRow, row: usize, baseline: &str) -> Result<MeasurementRecord> {
    let malformed = |message: String| DataSourceError::Malformed { row, message };

    if raw.version.is_empty() {
        return Err(malformed("empty version label".into()).into());
    }
    for (column, value) in [
        ("time_ms", raw.time_ms),
        ("gflops", raw.gflops),
        ("throughput_gb_s", raw.throughput_gb_s),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(malformed(format!("{column} must be a non-negative number, got {value}")).into());
        }
    }
    for (column, value) in [("num_threads", raw.num_threads), ("num_ranks", raw.num_ranks)] {
        if value == Some(0) {
            return Err(malformed(format!("{column} must be at least 1")).into());
        }
    }

    Ok(MeasurementRecord {
        category: VariantCategory::classify(&raw.version, baseline),
        variant: raw.version,
        time_ms: raw.time_ms,
        gflops: raw.gflops,
        throughput_gb_s: raw.throughput_gb_s,
        concurrency: raw.num_threads,
        ranks: raw.num_ranks,
        row,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    const TABLE: &str = "\
version,time_ms,gflops,throughput_gb_s,num_threads,num_ranks
Sequential,1000,5.0,10.0,1,1
OpenMP_2T,500,10.0,20.0,2,1
Sequential,1100,4.5,9.0,1,1
MPI_4R,300,16.0,30.0,1,4
";

    fn parse(text: &str) -> Result<RecordStore> {
        RecordStore::from_reader(text.as_bytes(), "Sequential")
    }

    fn malformed_row(err: AnalysisError) -> usize {
        match err {
            AnalysisError::DataSource(DataSourceError::Malformed { row, .. }) => row,
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn preserves_row_order() {
        let store = parse(TABLE).unwrap();
        assert_eq!(store.len(), 4);
        let rows: Vec<usize> = store.records().iter().map(|r| r.row).collect();
        assert_eq!(rows, [1, 2, 3, 4]);
        assert_eq!(store.records()[3].ranks, Some(4));
        assert_eq!(store.records()[1].category, VariantCategory::ThreadParallel);
    }

    #[test]
    fn groups_follow_first_appearance() {
        let store = parse(TABLE).unwrap();
        let variants: Vec<&str> = store.variants().collect();
        assert_eq!(variants, ["Sequential", "OpenMP_2T", "MPI_4R"]);

        let groups: Vec<VariantGroup<'_>> = store.groups().collect();
        assert_eq!(groups[0].records.len(), 2);
        assert_eq!(groups[0].records[1].time_ms, 1100.0);
        assert_eq!(groups[2].records.len(), 1);
    }

    #[test]
    fn optional_columns_may_be_absent() {
        let store = parse("version,time_ms,gflops,throughput_gb_s\nSequential,10,1,1\n").unwrap();
        assert_eq!(store.records()[0].concurrency, None);
        assert_eq!(store.records()[0].ranks, None);
    }

    #[test]
    fn blank_thread_cell_reads_as_absent() {
        let store = parse(
            "version,time_ms,gflops,throughput_gb_s,num_threads\nOpenMP_2T,10,1,1,\n",
        )
        .unwrap();
        assert_eq!(store.records()[0].concurrency, None);
    }

    #[test]
    fn cells_are_trimmed() {
        let store = parse(
            "version, time_ms, gflops, throughput_gb_s\n Sequential , 10.5 , 1 , 2 \n",
        )
        .unwrap();
        assert_eq!(store.records()[0].variant, "Sequential");
        assert_eq!(store.records()[0].time_ms, 10.5);
    }

    #[test]
    fn missing_required_column_is_malformed() {
        let err = parse("version,time_ms,gflops\nSequential,10,1\n").unwrap_err();
        assert_eq!(malformed_row(err), 1);
    }

    #[test]
    fn non_numeric_value_reports_its_row() {
        let err = parse(
            "version,time_ms,gflops,throughput_gb_s\nSequential,10,1,1\nOpenMP_2T,fast,1,1\n",
        )
        .unwrap_err();
        assert_eq!(malformed_row(err), 2);
    }

    #[test]
    fn negative_time_is_rejected() {
        let err = parse("version,time_ms,gflops,throughput_gb_s\nSequential,-1,1,1\n").unwrap_err();
        assert_eq!(malformed_row(err), 1);
    }

    #[test]
    fn zero_thread_count_is_rejected() {
        let err = parse(
            "version,time_ms,gflops,throughput_gb_s,num_threads\nOpenMP_0T,10,1,1,0\n",
        )
        .unwrap_err();
        assert_eq!(malformed_row(err), 1);
    }

    #[test]
    fn header_only_table_is_empty() {
        let store = parse("version,time_ms,gflops,throughput_gb_s\n").unwrap();
        assert!(store.is_empty());
        assert_eq!(store.variants().count(), 0);
    }

    #[test]
    fn directory_input_is_a_read_error() {
        let err = RecordStore::load(&std::env::temp_dir(), "Sequential").unwrap_err();
        assert!(!err.is_missing_input());
        assert!(
            matches!(err, AnalysisError::DataSource(DataSourceError::Read { .. })),
            "expected read error, got {err:?}"
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = RecordStore::load(Path::new("/nonexistent/metrics.csv"), "Sequential")
            .unwrap_err();
        assert!(err.is_missing_input());
    }
}
