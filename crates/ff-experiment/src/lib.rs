//! `ff-experiment` — orchestrates a baseline and its comparison scenarios,
//! running each one's simulation loop concurrently and publishing the
//! combined analytics document.
//!
//! # Pipeline
//!
//! 1. Load the baseline asset directory as-is.
//! 2. For each scenario file, load and validate it, then materialize it
//!    against the baseline into its own asset directory (via [`ff_materializer`]).
//! 3. Derive each scenario's need biases ([`ff_needs::build_need_biases_for_scenario`]).
//! 4. Run the baseline and every scenario concurrently, one [`worker::ScenarioSpec`]
//!    per [`rayon`] task, bounded by a worker limit.
//! 5. Compose the analytics document ([`ff_metrics::document`]) and publish
//!    it atomically ([`ff_metrics::publish`]).
//!
//! # Progress reporting
//!
//! This library never logs; the binary in `src/bin/main.rs` is the only
//! thing that prints, via plain `println!`/`eprintln!`.

pub mod config;
pub mod error;
pub mod live;
pub mod runner;
pub mod worker;


use std::collections::HashMap;
use std::sync::Arc;

use ff_decider::DeterministicDecider;
use ff_grid::load_grid_dir;
use ff_metrics::publish_json;
use ff_needs::build_need_biases_for_scenario;
use ff_scenario::load_scenario;

pub use config::ExperimentConfig;
pub use error::{ExperimentError, ExperimentResult};
pub use runner::{run_experiment as run_scenarios, ExperimentOutcome, DEFAULT_WORKER_LIMIT};
pub use worker::{ScenarioRunResult, ScenarioSpec, ScenarioStatus};

/// Run a full experiment from disk: load the baseline, materialize and run
/// every configured scenario, publish `analytics.json`, and return the
/// outcome (so a CLI wrapper can compute its exit code from
/// [`ExperimentOutcome::all_scenarios_produced_decisions`]).
pub fn run_experiment_from_disk(config: &ExperimentConfig) -> ExperimentResult<ExperimentOutcome> {
    std::fs::create_dir_all(&config.exp_out_dir)?;

    let baseline_grid = load_grid_dir(&config.baseline_dir)?;
    let baseline_spec = ScenarioSpec {
        id: "baseline".to_string(),
        label: "Baseline".to_string(),
        grid: baseline_grid,
        biases: HashMap::new(),
    };

    let mut comparisons = Vec::with_capacity(config.scenario_paths.len());
    for path in &config.scenario_paths {
        let scenario = load_scenario(path)?;
        scenario.validate()?;
        let out_dir = config.materialized_dir(&scenario.id);
        let grid = ff_materializer::materialize(&config.baseline_dir, &scenario, &out_dir, config.materializer)?;
        let biases = build_need_biases_for_scenario(&scenario);
        let label = scenario.title.clone().unwrap_or_else(|| scenario.id.clone());
        comparisons.push(ScenarioSpec {
            id: scenario.id,
            label,
            grid,
            biases,
        });
    }

    let outcome = run_scenarios(
        baseline_spec,
        comparisons,
        &config.run,
        Arc::new(DeterministicDecider),
        config.worker_limit,
        Some(config.event_log_dir()),
    );

    publish_json(&config.analytics_path(), &outcome.document)?;

    Ok(outcome)
}
