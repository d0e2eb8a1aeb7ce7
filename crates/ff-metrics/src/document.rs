//! The canonical analytics document: composed once per publish cycle from
//! one baseline aggregator and up to three comparison aggregators.
//!
//! The shape is fixed at four color-coded `env1`..`env4` slots for a
//! dashboard to render directly — `env1` is always the baseline.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

use crate::aggregator::Aggregator;

/// Maximum number of environments (baseline + comparisons) a document can
/// carry — the dashboard this document feeds has four fixed color slots.
/// Scenarios beyond the fourth still run and aggregate normally; they are
/// simply not plotted.
pub const MAX_ENVIRONMENTS: usize = 4;

const ENV_COLORS: [&str; MAX_ENVIRONMENTS] = ["#4e79a7", "#f28e2b", "#e15759", "#76b7b2"];

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    pub x: usize,
    pub y: f64,
}

fn to_points(series: &[f64]) -> Vec<Point> {
    series
        .iter()
        .enumerate()
        .map(|(x, &y)| Point { x, y })
        .collect()
}

#[derive(Clone, Debug, Serialize)]
pub struct EnvSeries {
    pub env1: Vec<Point>,
    pub env2: Vec<Point>,
    pub env3: Vec<Point>,
    pub env4: Vec<Point>,
    pub label: String,
    pub color_env1: &'static str,
    pub color_env2: &'static str,
    pub color_env3: &'static str,
    pub color_env4: &'static str,
}

fn env_series(label: &str, series_by_env: &[Vec<f64>]) -> EnvSeries {
    let get = |i: usize| series_by_env.get(i).map(|s| to_points(s)).unwrap_or_default();
    EnvSeries {
        env1: get(0),
        env2: get(1),
        env3: get(2),
        env4: get(3),
        label: label.to_string(),
        color_env1: ENV_COLORS[0],
        color_env2: ENV_COLORS[1],
        color_env3: ENV_COLORS[2],
        color_env4: ENV_COLORS[3],
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Metrics {
    pub efficiency: EnvSeries,
    pub cost: EnvSeries,
    pub time_saved: EnvSeries,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Weights {
    pub efficiency: f64,
    pub cost: f64,
    pub time_saved: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            efficiency: 0.4,
            cost: 0.35,
            time_saved: 0.25,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Overall {
    pub weights: Weights,
    pub label: String,
    pub color_env1: &'static str,
    pub color_env2: &'static str,
    pub color_env3: &'static str,
    pub color_env4: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub efficiency_improvement: f64,
    pub cost_reduction: f64,
    pub time_saved: f64,
    pub overall_rating: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Metadata {
    pub description: String,
    pub time_period: String,
    pub data_points: usize,
    /// Unix timestamp in seconds, as a string. No calendar-formatting crate
    /// is in this workspace's dependency stack, so this is a raw epoch
    /// value rather than an RFC 3339 string.
    pub generated_at: String,
    pub version: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct AnalyticsDocument {
    pub metrics: Metrics,
    pub overall: Overall,
    pub summary: Summary,
    pub metadata: Metadata,
}

/// Describes one scenario's contribution to the document: its aggregator
/// plus the label a dashboard should show for it.
pub struct ScenarioSummary<'a> {
    pub label: String,
    pub aggregator: &'a Aggregator,
}

/// Compose the analytics document from a baseline and its comparison
/// scenarios (`baseline` is always `env1`; `comparisons` fill `env2..env4`
/// in order, extras are dropped per [`MAX_ENVIRONMENTS`]).
pub fn compose_document(baseline: &ScenarioSummary<'_>, comparisons: &[ScenarioSummary<'_>]) -> AnalyticsDocument {
    let envs: Vec<&ScenarioSummary<'_>> = std::iter::once(baseline)
        .chain(comparisons.iter())
        .take(MAX_ENVIRONMENTS)
        .collect();

    let efficiency_by_env: Vec<Vec<f64>> = envs.iter().map(|e| e.aggregator.efficiency_series()).collect();
    let cost_by_env: Vec<Vec<f64>> = envs
        .iter()
        .enumerate()
        .map(|(i, e)| {
            if i == 0 {
                e.aggregator.cost_series(None)
            } else {
                e.aggregator.cost_series(Some(baseline.aggregator))
            }
        })
        .collect();
    let time_saved_by_env: Vec<Vec<f64>> = envs
        .iter()
        .enumerate()
        .map(|(i, e)| {
            if i == 0 {
                e.aggregator.time_saved_series(None)
            } else {
                e.aggregator.time_saved_series(Some(baseline.aggregator))
            }
        })
        .collect();

    let metrics = Metrics {
        efficiency: env_series("Pedestrian efficiency", &efficiency_by_env),
        cost: env_series("Relative cost", &cost_by_env),
        time_saved: env_series("Time saved", &time_saved_by_env),
    };

    let best_comparison = comparisons.iter().max_by(|a, b| {
        mean(&a.aggregator.efficiency_series())
            .partial_cmp(&mean(&b.aggregator.efficiency_series()))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let (efficiency_improvement, cost_reduction, time_saved) = match best_comparison {
        Some(best) => (
            mean(&best.aggregator.efficiency_series()) - mean(&baseline.aggregator.efficiency_series()),
            mean(&best.aggregator.cost_series(Some(baseline.aggregator))),
            mean(&best.aggregator.time_saved_series(Some(baseline.aggregator))),
        ),
        None => (0.0, 0.0, 0.0),
    };

    let overall_rating = rating_label(efficiency_improvement);

    let overall = Overall {
        weights: Weights::default(),
        label: "Overall impact".to_string(),
        color_env1: ENV_COLORS[0],
        color_env2: ENV_COLORS[1],
        color_env3: ENV_COLORS[2],
        color_env4: ENV_COLORS[3],
    };

    let summary = Summary {
        efficiency_improvement,
        cost_reduction,
        time_saved,
        overall_rating,
    };

    let metadata = Metadata {
        description: "Pedestrian footfall impact analysis".to_string(),
        time_period: format!("{:.0}s", baseline.aggregator.duration_s),
        data_points: baseline.aggregator.bins,
        generated_at: unix_now().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    AnalyticsDocument {
        metrics,
        overall,
        summary,
        metadata,
    }
}

fn mean(series: &[f64]) -> f64 {
    if series.is_empty() {
        0.0
    } else {
        series.iter().sum::<f64>() / series.len() as f64
    }
}

fn rating_label(efficiency_improvement: f64) -> String {
    if efficiency_improvement >= 10.0 {
        "strong improvement".to_string()
    } else if efficiency_improvement > 0.0 {
        "modest improvement".to_string()
    } else if efficiency_improvement == 0.0 {
        "no measurable change".to_string()
    } else {
        "regression".to_string()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
