//! One scenario's worker: run its `Sim` to completion, fanned out into a
//! live `Aggregator` and (optionally) a durable event log, under a
//! per-scenario timeout.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use ff_core::{NeedCategory, RunConfig};
use ff_decider::Decider;
use ff_grid::Grid;
use ff_metrics::{Aggregator, EventLogWriter};
use ff_sim::{NoopObserver, SimBuilder};

/// A scenario ready to run: its materialized grid and derived need biases.
/// The baseline scenario is just another `ScenarioSpec` with empty biases.
#[derive(Clone)]
pub struct ScenarioSpec {
    pub id: String,
    pub label: String,
    pub grid: Grid,
    pub biases: HashMap<NeedCategory, f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ScenarioStatus {
    Completed,
    /// The worker exceeded `duration_s` plus its slack.
    TimedOut,
    /// The scenario failed to build or run; the aggregator is still
    /// returned (empty) so downstream readers always get a parseable
    /// series.
    Failed(String),
}

pub struct ScenarioRunResult {
    pub id: String,
    pub label: String,
    pub aggregator: Aggregator,
    pub status: ScenarioStatus,
}

/// Slack multiplier applied to `duration_s` for the per-scenario timeout:
/// `timeout = duration_s * (1 + SLACK_MULTIPLIER)`.
const SLACK_MULTIPLIER: f64 = 2.0;

/// Run one scenario to completion on a detached worker thread, enforcing
/// the timeout, and returning a result that always carries a usable
/// (possibly empty) aggregator.
///
/// The worker thread is spawned detached, not scoped: if it doesn't answer
/// within `timeout` this function returns `ScenarioStatus::TimedOut` anyway
/// and abandons the thread rather than waiting for it to finish.
///
/// `event_log_dir`, if given, is where `<id>.events.jsonl` is appended
/// alongside live aggregation — both consume the same event stream via the
/// tuple `EventSink` fan-out.
///
/// `decider` is generic so a run can be wired to either
/// [`ff_decider::DeterministicDecider`] or an [`ff_decider::OracleDecider`];
/// every scenario in one experiment shares the same decider instance.
pub fn run_scenario<D: Decider + 'static>(
    spec: &ScenarioSpec,
    run: &RunConfig,
    decider: Arc<D>,
    event_log_dir: Option<&Path>,
) -> ScenarioRunResult {
    let timeout = Duration::from_secs_f64(run.duration_s * (1.0 + SLACK_MULTIPLIER));
    let (tx, rx) = mpsc::channel();

    let id = spec.id.clone();
    let label = spec.label.clone();
    let bins = run.bins;
    let duration_s = run.duration_s;
    let agent_count = run.agent_count;

    let spec = spec.clone();
    let run = run.clone();
    let event_log_dir = event_log_dir.map(PathBuf::from);

    thread::spawn(move || {
        let result = run_scenario_inner(&spec, &run, decider.as_ref(), event_log_dir.as_deref());
        let _ = tx.send(result);
    });

    match rx.recv_timeout(timeout) {
        Ok((aggregator, status)) => ScenarioRunResult { id, label, aggregator, status },
        Err(_) => ScenarioRunResult {
            id,
            label,
            aggregator: Aggregator::new(bins, duration_s, agent_count),
            status: ScenarioStatus::TimedOut,
        },
    }
}

fn run_scenario_inner<D: Decider>(
    spec: &ScenarioSpec,
    run: &RunConfig,
    decider: &D,
    event_log_dir: Option<&Path>,
) -> (Aggregator, ScenarioStatus) {
    let empty = Aggregator::new(run.bins, run.duration_s, run.agent_count);

    let mut sim = match SimBuilder::new(run.clone(), &spec.grid, decider)
        .biases(spec.biases.clone())
        .build()
    {
        Ok(sim) => sim,
        Err(e) => return (empty, ScenarioStatus::Failed(e.to_string())),
    };

    let aggregator = Aggregator::new(run.bins, run.duration_s, run.agent_count);

    let log_writer = match event_log_dir {
        Some(dir) => {
            let path = dir.join(format!("{}.events.jsonl", spec.id));
            match EventLogWriter::create(&path) {
                Ok(w) => Some(w),
                Err(e) => return (aggregator, ScenarioStatus::Failed(e.to_string())),
            }
        }
        None => None,
    };

    let run_result = match log_writer {
        Some(writer) => {
            let mut sink = (aggregator, writer);
            let result = sim.run(&mut NoopObserver, &mut sink);
            let (aggregator, _writer) = sink;
            result.map(|_| aggregator)
        }
        None => {
            let mut sink = aggregator;
            sim.run(&mut NoopObserver, &mut sink).map(|_| sink)
        }
    };

    match run_result {
        Ok(aggregator) => (aggregator, ScenarioStatus::Completed),
        Err(e) => (
            Aggregator::new(run.bins, run.duration_s, run.agent_count),
            ScenarioStatus::Failed(e.to_string()),
        ),
    }
}
