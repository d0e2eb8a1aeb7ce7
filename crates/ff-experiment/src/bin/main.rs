//! `ff-experiment` — run a baseline plus its comparison scenarios and
//! publish `analytics.json`.
//!
//! Usage: `ff-experiment <baseline_dir> <exp_out_dir> [scenario.json ...]`

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Result};

use ff_core::RunConfig;
use ff_experiment::{run_experiment_from_disk, ExperimentConfig, ScenarioStatus};

// ── Run parameters ────────────────────────────────────────────────────────────
// Hardcoded here the same way the example binaries in this workspace fix
// their scale constants; wire these to real configuration if this ever
// grows beyond a reference runner.

const SEED: u64 = 42;
const DURATION_S: f64 = 3_600.0;
const AGENT_COUNT: u32 = 200;
const BINS: usize = 25;
const TICK_SECONDS: f64 = 5.0;
const ORACLE_TIMEOUT_S: f64 = 30.0;

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(baseline_dir) = args.next() else {
        bail!("usage: ff-experiment <baseline_dir> <exp_out_dir> [scenario.json ...]");
    };
    let Some(exp_out_dir) = args.next() else {
        bail!("usage: ff-experiment <baseline_dir> <exp_out_dir> [scenario.json ...]");
    };
    let scenario_paths: Vec<PathBuf> = args.map(PathBuf::from).collect();

    let run = RunConfig {
        seed: SEED,
        duration_s: DURATION_S,
        agent_count: AGENT_COUNT,
        bins: BINS,
        tick_seconds: TICK_SECONDS,
        oracle_timeout_s: ORACLE_TIMEOUT_S,
        speed: 1.0,
    };

    println!("=== ff-experiment ===");
    println!("baseline: {baseline_dir}  out: {exp_out_dir}");
    println!("scenarios: {}", scenario_paths.len());
    println!();

    let mut config = ExperimentConfig::new(baseline_dir, exp_out_dir, run);
    for path in scenario_paths {
        config = config.with_scenario(path);
    }

    let t0 = Instant::now();
    let outcome = run_experiment_from_disk(&config)?;
    let elapsed = t0.elapsed();

    println!("{:<16} {:<12} {:<10}", "scenario", "status", "decisions");
    println!("{}", "-".repeat(40));
    for result in std::iter::once(&outcome.baseline).chain(outcome.comparisons.iter()) {
        let status = match &result.status {
            ScenarioStatus::Completed => "ok".to_string(),
            ScenarioStatus::TimedOut => "timed out".to_string(),
            ScenarioStatus::Failed(reason) => {
                eprintln!("scenario {} failed: {reason}", result.id);
                "failed".to_string()
            }
        };
        let decisions: u64 = result.aggregator.decisions.iter().sum();
        println!("{:<16} {:<12} {:<10}", result.id, status, decisions);
    }

    println!();
    println!("analytics.json written in {:.3} s", elapsed.as_secs_f64());

    if !outcome.all_scenarios_produced_decisions() {
        std::process::exit(1);
    }
    Ok(())
}
