//! End-to-end scenarios run through the full `ff-experiment` pipeline:
//! in-memory fixture grids in, an `Aggregator`/`AnalyticsDocument` out.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use ff_core::{Cell, NeedCategory, PoiCategory, RunConfig};
use ff_decider::oracle::{Oracle, OracleError, OracleRequest, OracleResponse};
use ff_decider::{DeterministicDecider, OracleDecider};
use ff_grid::{Grid, GridBuilder, Poi};
use ff_experiment::runner::run_experiment;
use ff_experiment::worker::{run_scenario, ScenarioSpec};

fn poi_at(category: PoiCategory, cell: Cell) -> Poi {
    Poi {
        category,
        iy: cell.iy,
        ix: cell.ix,
        snapped: None,
        name: None,
        tags: HashMap::new(),
        lon: None,
        lat: None,
    }
}

fn run_config(duration_s: f64, agent_count: u32, bins: usize) -> RunConfig {
    RunConfig {
        seed: 7,
        duration_s,
        agent_count,
        bins,
        tick_seconds: 1.0,
        oracle_timeout_s: 1.0,
        speed: 1.0,
    }
}

fn spec(id: &str, grid: Grid, biases: HashMap<NeedCategory, f64>) -> ScenarioSpec {
    ScenarioSpec {
        id: id.to_string(),
        label: id.to_string(),
        grid,
        biases,
    }
}

// 1. Empty scenario: a tiny all-walkable grid, one agent, one bin, a
// one-second run. No POIs at all, so every decision fails to resolve a
// destination — the aggregator should still show at least one decision.
#[test]
fn empty_scenario_records_a_decision_with_no_cost_against_itself() {
    let grid = GridBuilder::all_walkable(3, 3).build();
    let run = run_config(1.0, 1, 1);
    let result = run_scenario(
        &spec("baseline", grid, HashMap::new()),
        &run,
        Arc::new(DeterministicDecider),
        None,
    );

    let decisions: u64 = result.aggregator.decisions.iter().sum();
    assert!(decisions >= 1);
    assert!(result.aggregator.efficiency_series()[0] >= 0.0);
    // Baseline-vs-self: spend matches itself exactly, so the cost delta is zero.
    let self_cost = result.aggregator.cost_series(Some(&result.aggregator));
    assert_eq!(self_cost, vec![0.0]);
}

// 2. A single cafe at the agents' start cell, five agents all biased
// toward caffeine. Every decision should pick cafe, and with the cafe
// reachable in zero cells every agent arrives in the same tick.
#[test]
fn single_reachable_cafe_is_chosen_by_every_biased_agent() {
    let mut grid = GridBuilder::all_walkable(5, 5).build();
    let center = grid.center();
    grid.pois.push(poi_at(PoiCategory::Cafe, center));

    let mut biases = HashMap::new();
    biases.insert(NeedCategory::Caffeine, 1.0);

    let run = run_config(5.0, 5, 1);
    let result = run_scenario(&spec("cafe-bias", grid, biases), &run, Arc::new(DeterministicDecider), None);

    assert_eq!(result.aggregator.arrivals[0], 5);
    assert_eq!(result.aggregator.decisions.iter().sum::<u64>(), 5);
}

// 3. Baseline has one grocery away from the agents' start cell; the
// comparison adds a cafe at the start cell itself. Agents biased toward
// caffeine find nothing in the baseline (no cafe exists) but arrive
// immediately once the comparison's cafe is in place.
#[test]
fn comparison_scenario_unlocks_arrivals_the_baseline_cannot_reach() {
    let mut baseline_grid = GridBuilder::all_walkable(25, 25).build();
    let grocery_cell = Cell::new(10, 10);
    baseline_grid.pois.push(poi_at(PoiCategory::Grocery, grocery_cell));

    let mut scenario_grid = baseline_grid.clone();
    let center = scenario_grid.center();
    scenario_grid.pois.push(poi_at(PoiCategory::Cafe, center));

    let mut biases = HashMap::new();
    biases.insert(NeedCategory::Caffeine, 0.5);

    let run = run_config(5.0, 4, 5);
    let outcome = run_experiment(
        spec("baseline", baseline_grid, biases.clone()),
        vec![spec("adds-cafe", scenario_grid, biases)],
        &run,
        Arc::new(DeterministicDecider),
        2,
        None,
    );

    let baseline_arrivals: u64 = outcome.baseline.aggregator.arrivals.iter().sum();
    let scenario_arrivals: u64 = outcome.comparisons[0].aggregator.arrivals.iter().sum();
    assert!(scenario_arrivals > baseline_arrivals);

    let expected_cost = outcome.comparisons[0]
        .aggregator
        .cost_series(Some(&outcome.baseline.aggregator));
    let actual_cost: Vec<f64> = outcome.document.metrics.cost.env2.iter().map(|p| p.y).collect();
    assert_eq!(expected_cost, actual_cost);
}

// 4. A one-cell walkable island with every other cell walled off, and a
// goal POI behind the wall. No path exists; the decision is recorded but
// no arrival ever happens.
#[test]
fn unreachable_poi_yields_a_decision_but_never_an_arrival() {
    let mut builder = GridBuilder::all_walkable(3, 3);
    for iy in 0..3 {
        for ix in 0..3 {
            if (iy, ix) != (0, 0) {
                builder.set_walkable(Cell::new(iy, ix), false);
            }
        }
    }
    let mut grid = builder.build();
    grid.pois.push(poi_at(PoiCategory::Cafe, Cell::new(2, 2)));

    let mut biases = HashMap::new();
    biases.insert(NeedCategory::Caffeine, 1.0);

    let run = run_config(3.0, 1, 1);
    let result = run_scenario(&spec("walled-off", grid, biases), &run, Arc::new(DeterministicDecider), None);

    assert!(result.aggregator.decisions.iter().sum::<u64>() >= 1);
    assert_eq!(result.aggregator.arrivals.iter().sum::<u64>(), 0);
    assert!(result.aggregator.path_not_found.iter().sum::<u64>() >= 1);
}

// 5. An oracle that always exceeds its timeout. The decider must fall back
// to the deterministic strategy every time rather than ever blocking the
// scenario, and the resulting document still carries real series.
struct AlwaysSlowOracle;

impl Oracle for AlwaysSlowOracle {
    fn decide(&self, _request: &OracleRequest) -> Result<OracleResponse, OracleError> {
        std::thread::sleep(Duration::from_millis(200));
        Ok(OracleResponse {
            category: PoiCategory::Cafe,
            thought: "too slow to matter".to_string(),
            memory: "oracle thought".to_string(),
        })
    }
}

#[test]
fn oracle_timeout_falls_back_to_deterministic_and_still_publishes() {
    let mut grid = GridBuilder::all_walkable(5, 5).build();
    let center = grid.center();
    grid.pois.push(poi_at(PoiCategory::Cafe, center));

    let decider = Arc::new(OracleDecider::new(AlwaysSlowOracle, Duration::from_millis(5)));
    let run = run_config(4.0, 3, 2);
    let outcome = run_experiment(
        spec("oracle-timeout", grid, HashMap::new()),
        vec![],
        &run,
        decider,
        1,
        None,
    );

    assert_eq!(outcome.baseline.aggregator.decisions.iter().sum::<u64>(), 3);
    assert!(!outcome.document.metrics.efficiency.env1.is_empty());
}

// 6. Four environments, each adding one more POI category than the last.
#[test]
fn four_environment_experiment_fills_every_series_and_sums_weights_to_one() {
    let bins = 5;
    let base = GridBuilder::all_walkable(9, 9).build();

    let mut env1 = base.clone();
    env1.pois.push(poi_at(PoiCategory::Cafe, env1.center()));

    let mut env2 = env1.clone();
    env2.pois.push(poi_at(PoiCategory::Grocery, Cell::new(1, 1)));

    let mut env3 = env2.clone();
    env3.pois.push(poi_at(PoiCategory::Restaurant, Cell::new(7, 7)));

    let mut env4 = env3.clone();
    env4.pois.push(poi_at(PoiCategory::Pharmacy, Cell::new(1, 7)));

    let run = run_config(6.0, 4, bins);
    let outcome = run_experiment(
        spec("env1", env1, HashMap::new()),
        vec![spec("env2", env2, HashMap::new()), spec("env3", env3, HashMap::new()), spec("env4", env4, HashMap::new())],
        &run,
        Arc::new(DeterministicDecider),
        4,
        None,
    );

    assert_eq!(outcome.document.metrics.efficiency.env1.len(), bins);
    assert_eq!(outcome.document.metrics.efficiency.env2.len(), bins);
    assert_eq!(outcome.document.metrics.efficiency.env3.len(), bins);
    assert_eq!(outcome.document.metrics.efficiency.env4.len(), bins);
    assert_eq!(outcome.document.metadata.data_points, bins);

    let weights = outcome.document.overall.weights;
    assert!((weights.efficiency + weights.cost + weights.time_saved - 1.0).abs() < 1e-9);
}
