//! Orchestrates one baseline and its comparison scenarios across a bounded
//! pool of concurrent workers, then composes the analytics document.

use std::path::Path;
use std::sync::Arc;

use ff_core::RunConfig;
use ff_decider::Decider;
use ff_metrics::document::{self, AnalyticsDocument, ScenarioSummary};
use rayon::prelude::*;

use crate::worker::{run_scenario, ScenarioRunResult, ScenarioSpec};

/// Default number of scenarios run concurrently.
pub const DEFAULT_WORKER_LIMIT: usize = 4;

pub struct ExperimentOutcome {
    pub document: AnalyticsDocument,
    pub baseline: ScenarioRunResult,
    pub comparisons: Vec<ScenarioRunResult>,
}

impl ExperimentOutcome {
    /// `true` if every scenario (baseline included) produced at least one
    /// decision event — the condition a CLI wrapper's exit code is based on.
    pub fn all_scenarios_produced_decisions(&self) -> bool {
        std::iter::once(&self.baseline)
            .chain(self.comparisons.iter())
            .all(|r| r.aggregator.decisions.iter().sum::<u64>() > 0)
    }
}

/// Run `baseline` and every entry in `comparisons` concurrently, up to
/// `worker_limit` at a time, then compose the analytics document (baseline
/// always `env1`, extra comparisons beyond three are dropped from the
/// document but still run and aggregate — see `ff_metrics::document`).
///
/// `event_log_dir`, if given, receives one `<id>.events.jsonl` per
/// scenario as it runs.
///
/// Every scenario shares the single `decider` instance (behind an `Arc`,
/// cloned once per worker) — wire an [`ff_decider::OracleDecider`] here to
/// run the whole experiment against an external oracle, or
/// [`ff_decider::DeterministicDecider`] for the baseline strategy.
pub fn run_experiment<D: Decider + 'static>(
    baseline: ScenarioSpec,
    comparisons: Vec<ScenarioSpec>,
    run: &RunConfig,
    decider: Arc<D>,
    worker_limit: usize,
    event_log_dir: Option<&Path>,
) -> ExperimentOutcome {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(worker_limit.max(1))
        .build()
        .unwrap_or_else(|_| rayon::ThreadPoolBuilder::new().build().expect("default rayon pool"));

    let mut specs = Vec::with_capacity(1 + comparisons.len());
    specs.push(baseline);
    specs.extend(comparisons);

    let mut results: Vec<ScenarioRunResult> = pool.install(|| {
        specs
            .par_iter()
            .map(|spec| run_scenario(spec, run, Arc::clone(&decider), event_log_dir))
            .collect()
    });

    let baseline_result = results.remove(0);
    let comparison_results = results;

    let baseline_summary = ScenarioSummary {
        label: baseline_result.label.clone(),
        aggregator: &baseline_result.aggregator,
    };
    let comparison_summaries: Vec<ScenarioSummary<'_>> = comparison_results
        .iter()
        .map(|r| ScenarioSummary {
            label: r.label.clone(),
            aggregator: &r.aggregator,
        })
        .collect();

    let doc = document::compose_document(&baseline_summary, &comparison_summaries);

    ExperimentOutcome {
        document: doc,
        baseline: baseline_result,
        comparisons: comparison_results,
    }
}
