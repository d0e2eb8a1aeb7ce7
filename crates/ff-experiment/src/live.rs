//! Live publisher: periodically rebuilds the analytics document from each
//! scenario's append-only event log, for the duration of a run still in
//! progress.
//!
//! Each cycle re-reads every `<id>.events.jsonl` file from byte offset
//! zero and replays it into a fresh [`Aggregator`] — no incremental
//! tailing, matching the simplification the event log format allows at
//! this scale.

use std::path::Path;
use std::time::Duration;

use ff_core::RunConfig;
use ff_metrics::document::{self, AnalyticsDocument, ScenarioSummary};
use ff_metrics::{publish_json, replay_into_aggregator};

use crate::error::ExperimentResult;

/// Default interval between live publish cycles.
pub const DEFAULT_PUBLISH_INTERVAL: Duration = Duration::from_secs(1);

/// One scenario identifier the live publisher should track, alongside the
/// label its document series should carry.
pub struct LiveScenario {
    pub id: String,
    pub label: String,
}

/// Rebuild the document once from whatever each scenario's event log
/// currently contains, and publish it atomically. Returns the composed
/// document for callers that want to inspect or log it.
pub fn publish_cycle(
    exp_out_dir: &Path,
    run: &RunConfig,
    baseline: &LiveScenario,
    comparisons: &[LiveScenario],
) -> ExperimentResult<AnalyticsDocument> {
    let baseline_agg = replay_into_aggregator(
        exp_out_dir.join(format!("{}.events.jsonl", baseline.id)),
        run.bins,
        run.duration_s,
        run.agent_count,
    )?;
    let comparison_aggs: Vec<_> = comparisons
        .iter()
        .map(|s| {
            replay_into_aggregator(
                exp_out_dir.join(format!("{}.events.jsonl", s.id)),
                run.bins,
                run.duration_s,
                run.agent_count,
            )
        })
        .collect::<Result<_, _>>()?;

    let baseline_summary = ScenarioSummary {
        label: baseline.label.clone(),
        aggregator: &baseline_agg,
    };
    let comparison_summaries: Vec<ScenarioSummary<'_>> = comparisons
        .iter()
        .zip(&comparison_aggs)
        .map(|(s, agg)| ScenarioSummary {
            label: s.label.clone(),
            aggregator: agg,
        })
        .collect();

    let doc = document::compose_document(&baseline_summary, &comparison_summaries);
    publish_json(&exp_out_dir.join("analytics.json"), &doc)?;
    Ok(doc)
}

/// Run live publish cycles until `max_cycles` have completed (a live run
/// driven by a signal or external cancellation would pass `None` and let
/// the caller terminate the process; tests pass `Some(n)`).
pub fn run_live(
    exp_out_dir: &Path,
    run: &RunConfig,
    baseline: &LiveScenario,
    comparisons: &[LiveScenario],
    interval: Duration,
    max_cycles: Option<usize>,
) -> ExperimentResult<()> {
    let mut cycles = 0usize;
    loop {
        publish_cycle(exp_out_dir, run, baseline, comparisons)?;
        cycles += 1;
        if let Some(max) = max_cycles {
            if cycles >= max {
                return Ok(());
            }
        }
        std::thread::sleep(interval);
    }
}
