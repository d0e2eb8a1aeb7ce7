//! End-to-end coverage across the aggregation → document → publish pipeline.

use ff_core::{AgentId, PoiCategory};
use ff_sim::{Event, EventSink};
use tempfile::tempdir;

use crate::aggregator::Aggregator;
use crate::document::{compose_document, ScenarioSummary};
use crate::eventlog::{replay_into_aggregator, EventLogWriter};
use crate::publish::publish_json;

#[test]
fn eventlog_replay_feeds_a_document_identical_to_the_in_memory_aggregator() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("baseline.events.jsonl");

    let mut in_memory = Aggregator::new(4, 40.0, 2);
    let mut writer = EventLogWriter::create(&path).unwrap();

    let events = vec![
        Event::Decision { agent: AgentId(0), category: PoiCategory::Cafe, t_s: 1.0 },
        Event::Arrival {
            agent: AgentId(0),
            category: PoiCategory::Cafe,
            path_len_cells: 5,
            travel_time_s: 5.0,
            t_s: 5.0,
        },
        Event::Purchase { agent: AgentId(0), category: PoiCategory::Cafe, amount: 12.0, t_s: 5.0 },
    ];
    for event in &events {
        in_memory.record(event.clone());
        writer.append(event).unwrap();
    }

    let replayed = replay_into_aggregator(&path, 4, 40.0, 2).unwrap();
    assert_eq!(replayed.decisions, in_memory.decisions);
    assert_eq!(replayed.arrivals, in_memory.arrivals);
    assert_eq!(replayed.spend, in_memory.spend);
}

#[test]
fn composed_document_publishes_and_reloads_as_valid_json() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("analytics.json");

    let mut baseline_agg = Aggregator::new(3, 30.0, 10);
    baseline_agg.record(Event::Purchase { agent: AgentId(0), category: PoiCategory::Cafe, amount: 20.0, t_s: 1.0 });

    let mut scenario_agg = Aggregator::new(3, 30.0, 10);
    scenario_agg.record(Event::Arrival {
        agent: AgentId(0),
        category: PoiCategory::Cafe,
        path_len_cells: 3,
        travel_time_s: 3.0,
        t_s: 1.0,
    });
    scenario_agg.record(Event::Purchase { agent: AgentId(0), category: PoiCategory::Cafe, amount: 8.0, t_s: 1.0 });

    let baseline = ScenarioSummary { label: "baseline".to_string(), aggregator: &baseline_agg };
    let scenario = ScenarioSummary { label: "new cafe".to_string(), aggregator: &scenario_agg };
    let doc = compose_document(&baseline, &[scenario]);

    publish_json(&path, &doc).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let reloaded: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert!(reloaded["metrics"]["cost"]["env2"].is_array());
    assert!(reloaded["overall"]["weights"]["efficiency"].is_number());
}
