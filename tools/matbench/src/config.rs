//! Configuration resolution: built-in defaults, then `matbench.toml`, then
//! command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use matbench_analysis::{AnalysisOptions, ScalingPolicy};
use serde::Deserialize;

use crate::cli::{AnalysisArgs, ReportArgs};
use crate::verbose::vprintln;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "matbench.toml";

/// Contents of a `matbench.toml` file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    input: Option<PathBuf>,
    report: Option<PathBuf>,
    chart: Option<PathBuf>,
    json: Option<PathBuf>,
    baseline: Option<String>,
    scaling_family: Option<String>,
    matrix_size: Option<u32>,
    scaling_policy: Option<PolicySetting>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PolicySetting {
    Strict,
    Lenient,
}

impl From<PolicySetting> for ScalingPolicy {
    fn from(setting: PolicySetting) -> Self {
        match setting {
            PolicySetting::Strict => Self::Strict,
            PolicySetting::Lenient => Self::Lenient,
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Metrics CSV.
    pub input: PathBuf,
    /// Text report output.
    pub report: PathBuf,
    /// SVG chart output.
    pub chart: PathBuf,
    /// Optional JSON report output.
    pub json: Option<PathBuf>,
    /// Matrix dimension shown in report headers.
    pub matrix_size: u32,
    /// Baseline, sweep family and sweep policy.
    pub analysis: AnalysisOptions,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("metrics.csv"),
            report: PathBuf::from("performance_report.txt"),
            chart: PathBuf::from("performance_analysis.svg"),
            json: None,
            matrix_size: 2000,
            analysis: AnalysisOptions::default(),
        }
    }
}

impl ResolvedConfig {
    /// Defaults overlaid with the config file, if any.
    ///
    /// An explicitly named file must exist; the implicit `matbench.toml`
    /// is used only when present.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    bail!("config file {} not found", path.display());
                }
                Some(path.to_path_buf())
            }
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
        };

        let mut config = Self::default();
        if let Some(path) = path {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            config.apply_file(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            vprintln!("Loaded configuration from {}", path.display());
        }
        Ok(config)
    }

    fn apply_file(&mut self, content: &str) -> Result<()> {
        let file: FileConfig = toml::from_str(content)?;

        if let Some(input) = file.input {
            self.input = input;
        }
        if let Some(report) = file.report {
            self.report = report;
        }
        if let Some(chart) = file.chart {
            self.chart = chart;
        }
        if file.json.is_some() {
            self.json = file.json;
        }
        if let Some(size) = file.matrix_size {
            self.matrix_size = size;
        }
        if let Some(baseline) = file.baseline {
            self.analysis.baseline = baseline;
        }
        if let Some(family) = file.scaling_family {
            self.analysis.scaling_family = family;
        }
        if let Some(policy) = file.scaling_policy {
            self.analysis.scaling_policy = policy.into();
        }
        Ok(())
    }

    /// Overlay the flags shared by every analysing command.
    pub fn with_analysis_args(mut self, args: &AnalysisArgs) -> Self {
        if let Some(input) = &args.input {
            self.input.clone_from(input);
        }
        if let Some(baseline) = &args.baseline {
            self.analysis.baseline.clone_from(baseline);
        }
        if let Some(family) = &args.family {
            self.analysis.scaling_family.clone_from(family);
        }
        if args.lenient_scaling {
            self.analysis.scaling_policy = ScalingPolicy::Lenient;
        }
        self
    }

    /// Overlay the `report` command's output flags.
    pub fn with_report_args(mut self, args: &ReportArgs) -> Self {
        self = self.with_analysis_args(&args.analysis);
        if let Some(report) = &args.report {
            self.report.clone_from(report);
        }
        if let Some(chart) = &args.chart {
            self.chart.clone_from(chart);
        }
        if args.json.is_some() {
            self.json.clone_from(&args.json);
        }
        if let Some(size) = args.matrix_size {
            self.matrix_size = size;
        }
        self
    }

    /// Reject settings no run could succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.analysis.baseline.trim().is_empty() {
            bail!("baseline label must not be empty");
        }
        if self.analysis.scaling_family.is_empty() {
            bail!("scaling family pattern must not be empty");
        }
        if self.matrix_size == 0 {
            bail!("matrix size must be at least 1");
        }
        let outputs = [Some(&self.report), Some(&self.chart), self.json.as_ref()];
        for output in outputs.into_iter().flatten() {
            if output == &self.input {
                bail!("output {} would overwrite the input table", output.display());
            }
        }
        Ok(())
    }

    /// Print the resolved settings (verbose mode).
    pub fn print(&self) {
        vprintln!("Configuration:");
        vprintln!("  input:          {}", self.input.display());
        vprintln!("  report:         {}", self.report.display());
        vprintln!("  chart:          {}", self.chart.display());
        if let Some(json) = &self.json {
            vprintln!("  json:           {}", json.display());
        }
        vprintln!("  baseline:       {}", self.analysis.baseline);
        vprintln!("  scaling family: {}", self.analysis.scaling_family);
        vprintln!("  scaling policy: {:?}", self.analysis.scaling_policy);
        vprintln!("  matrix size:    {}", self.matrix_size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(content: &str) -> Result<ResolvedConfig> {
        let mut config = ResolvedConfig::default();
        config.apply_file(content)?;
        Ok(config)
    }

    #[test]
    fn defaults_match_benchmark_layout() {
        let config = ResolvedConfig::default();
        assert_eq!(config.input, PathBuf::from("metrics.csv"));
        assert_eq!(config.report, PathBuf::from("performance_report.txt"));
        assert_eq!(config.analysis.baseline, "Sequential");
        assert_eq!(config.analysis.scaling_family, "OpenMP_");
        assert_eq!(config.matrix_size, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overrides_defaults() {
        let config = from_toml(
            r#"
input = "runs/metrics.csv"
json = "out/report.json"
baseline = "naive"
scaling_family = "tiled_"
matrix_size = 1024
scaling_policy = "lenient"
"#,
        )
        .unwrap();
        assert_eq!(config.input, PathBuf::from("runs/metrics.csv"));
        assert_eq!(config.json, Some(PathBuf::from("out/report.json")));
        assert_eq!(config.analysis.baseline, "naive");
        assert_eq!(config.analysis.scaling_family, "tiled_");
        assert_eq!(config.analysis.scaling_policy, ScalingPolicy::Lenient);
        assert_eq!(config.matrix_size, 1024);
        assert_eq!(config.chart, PathBuf::from("performance_analysis.svg"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(from_toml("baseline_label = \"x\"\n").is_err());
        assert!(from_toml("scaling_policy = \"sometimes\"\n").is_err());
    }

    #[test]
    fn flags_override_file() {
        let config = from_toml("baseline = \"naive\"\nmatrix_size = 512\n").unwrap();
        let args = ReportArgs {
            analysis: AnalysisArgs {
                input: Some(PathBuf::from("other.csv")),
                baseline: Some("Sequential".into()),
                family: None,
                lenient_scaling: true,
            },
            report: None,
            chart: Some(PathBuf::from("chart.svg")),
            json: None,
            matrix_size: Some(4096),
        };
        let config = config.with_report_args(&args);
        assert_eq!(config.input, PathBuf::from("other.csv"));
        assert_eq!(config.analysis.baseline, "Sequential");
        assert_eq!(config.analysis.scaling_family, "OpenMP_");
        assert_eq!(config.analysis.scaling_policy, ScalingPolicy::Lenient);
        assert_eq!(config.chart, PathBuf::from("chart.svg"));
        assert_eq!(config.matrix_size, 4096);
    }

    #[test]
    fn validation_rejects_bad_settings() {
        let mut config = ResolvedConfig::default();
        config.matrix_size = 0;
        assert!(config.validate().is_err());

        let mut config = ResolvedConfig::default();
        config.analysis.baseline = " ".into();
        assert!(config.validate().is_err());

        let mut config = ResolvedConfig::default();
        config.report = config.input.clone();
        assert!(config.validate().is_err());
    }

    #[test]
    fn explicit_missing_config_fails() {
        assert!(ResolvedConfig::load(Some(Path::new("/nonexistent/matbench.toml"))).is_err());
    }
}
