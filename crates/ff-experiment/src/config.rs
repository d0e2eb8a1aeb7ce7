//! Disk-facing experiment configuration: where assets live, which
//! scenarios to run, and where to publish the result.

use std::path::{Path, PathBuf};

use ff_core::RunConfig;
use ff_materializer::MaterializerConfig;

use crate::runner::DEFAULT_WORKER_LIMIT;

/// Everything needed to run one experiment end to end from disk.
pub struct ExperimentConfig {
    /// Directory holding the baseline asset bundle (grid arrays + `pois.json`).
    pub baseline_dir: PathBuf,
    /// Scenario JSON files to run against the baseline, each becoming one
    /// comparison environment (`env2`, `env3`, ...).
    pub scenario_paths: Vec<PathBuf>,
    /// Where materialized assets, event logs, and `analytics.json` are written.
    pub exp_out_dir: PathBuf,
    /// Per-scenario run parameters (seed, duration, agent count, bins, ...).
    pub run: RunConfig,
    /// Maximum scenarios run concurrently.
    pub worker_limit: usize,
    pub materializer: MaterializerConfig,
}

impl ExperimentConfig {
    pub fn new(baseline_dir: impl Into<PathBuf>, exp_out_dir: impl Into<PathBuf>, run: RunConfig) -> Self {
        Self {
            baseline_dir: baseline_dir.into(),
            scenario_paths: Vec::new(),
            exp_out_dir: exp_out_dir.into(),
            run,
            worker_limit: DEFAULT_WORKER_LIMIT,
            materializer: MaterializerConfig::default(),
        }
    }

    pub fn with_scenario(mut self, path: impl Into<PathBuf>) -> Self {
        self.scenario_paths.push(path.into());
        self
    }

    pub fn materialized_dir(&self, scenario_id: &str) -> PathBuf {
        self.exp_out_dir.join("materialized").join(scenario_id)
    }

    pub fn analytics_path(&self) -> PathBuf {
        self.exp_out_dir.join("analytics.json")
    }

    pub fn event_log_dir(&self) -> &Path {
        &self.exp_out_dir
    }
}
