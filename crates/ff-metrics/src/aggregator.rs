//! Per-scenario metrics aggregator: the only thing events are allowed to
//! mutate.
//!
//! State is six fixed-length vectors plus a per-category travel-time
//! average, all indexed by time bin. Every derived series below is a pure
//! function of that state — calling it twice with the same aggregator gives
//! the same answer.

use std::collections::HashMap;

use ff_core::PoiCategory;
use ff_sim::{Event, EventSink};

/// Floor for a baseline denominator so a division never blows up on an
/// all-zero bin.
const EPS: f64 = 1e-9;
/// Floor for `dist_scale` in the efficiency series.
const MIN_DIST_SCALE: f64 = 200.0;

#[derive(Clone, Debug)]
pub struct Aggregator {
    pub bins: usize,
    pub duration_s: f64,
    pub agent_count: u32,
    pub decisions: Vec<u64>,
    pub arrivals: Vec<u64>,
    pub walk_cells: Vec<u64>,
    pub travel_time: Vec<f64>,
    pub spend: Vec<f64>,
    /// Debug-level counter of decisions that found no reachable POI;
    /// doesn't feed any derived series, just surfaced for inspection.
    pub path_not_found: Vec<u64>,
    cat_time: HashMap<PoiCategory, (f64, u64)>,
}

impl Aggregator {
    pub fn new(bins: usize, duration_s: f64, agent_count: u32) -> Self {
        Self {
            bins,
            duration_s,
            agent_count,
            decisions: vec![0; bins],
            arrivals: vec![0; bins],
            walk_cells: vec![0; bins],
            travel_time: vec![0.0; bins],
            spend: vec![0.0; bins],
            path_not_found: vec![0; bins],
            cat_time: HashMap::new(),
        }
    }

    #[inline]
    pub fn bin_width(&self) -> f64 {
        self.duration_s / self.bins as f64
    }

    /// `bin(t) = clamp(floor(t / bin_width), 0, bins - 1)`.
    pub fn bin(&self, t_s: f64) -> usize {
        let width = self.bin_width();
        if width <= 0.0 || self.bins == 0 {
            return 0;
        }
        let raw = (t_s / width).floor();
        raw.clamp(0.0, (self.bins - 1) as f64) as usize
    }

    /// The global average travel time across every recorded category,
    /// used as the baseline comparison point for `time_saved`.
    fn avg_travel_time(&self) -> f64 {
        let (sum, count) = self
            .cat_time
            .values()
            .fold((0.0, 0u64), |(s, c), &(ts, tc)| (s + ts, c + tc));
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    /// `100 * clamp(arrivals[i]/agents - 0.05 * walk_cells[i]/(agents*dist_scale), 0, 1)`.
    pub fn efficiency_series(&self) -> Vec<f64> {
        let agents = (self.agent_count.max(1)) as f64;
        let total_walk: u64 = self.walk_cells.iter().sum();
        let dist_scale = (total_walk as f64 / agents).max(MIN_DIST_SCALE);

        self.arrivals
            .iter()
            .zip(&self.walk_cells)
            .map(|(&arrivals, &walk)| {
                let raw = arrivals as f64 / agents - 0.05 * (walk as f64) / (agents * dist_scale);
                100.0 * raw.clamp(0.0, 1.0)
            })
            .collect()
    }

    /// With a baseline: `100 * (baseline.spend[i] - spend[i]) / max(eps, baseline.spend[i])`.
    /// Without: `min(100, 10 * sqrt(spend[i] + 1))`.
    pub fn cost_series(&self, baseline: Option<&Aggregator>) -> Vec<f64> {
        match baseline {
            Some(base) => (0..self.bins)
                .map(|i| {
                    let base_spend = base.spend.get(i).copied().unwrap_or(0.0);
                    100.0 * (base_spend - self.spend[i]) / base_spend.max(EPS)
                })
                .collect(),
            None => self
                .spend
                .iter()
                .map(|&spend| (10.0 * (spend + 1.0).sqrt()).min(100.0))
                .collect(),
        }
    }

    /// With a baseline and `arrivals[i] > 0`: compares this bin's average
    /// travel time to the baseline's global average. Otherwise 0.
    pub fn time_saved_series(&self, baseline: Option<&Aggregator>) -> Vec<f64> {
        let Some(base) = baseline else {
            return vec![0.0; self.bins];
        };
        let avg_baseline = base.avg_travel_time();

        (0..self.bins)
            .map(|i| {
                if self.arrivals[i] == 0 {
                    return 0.0;
                }
                let avg_scenario = self.travel_time[i] / self.arrivals[i] as f64;
                (avg_baseline - avg_scenario).max(0.0) * 10.0
            })
            .collect()
    }
}

impl EventSink for Aggregator {
    fn record(&mut self, event: Event) {
        match event {
            Event::Decision { t_s, .. } => {
                let b = self.bin(t_s);
                self.decisions[b] += 1;
            }
            Event::Arrival {
                category,
                path_len_cells,
                travel_time_s,
                t_s,
                ..
            } => {
                let b = self.bin(t_s);
                self.arrivals[b] += 1;
                self.walk_cells[b] += path_len_cells as u64;
                self.travel_time[b] += travel_time_s;
                let entry = self.cat_time.entry(category).or_insert((0.0, 0));
                entry.0 += travel_time_s;
                entry.1 += 1;
            }
            Event::Purchase { amount, t_s, .. } => {
                let b = self.bin(t_s);
                self.spend[b] += amount;
            }
            Event::PathNotFound { t_s, .. } => {
                let b = self.bin(t_s);
                self.path_not_found[b] += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff_core::AgentId;

    fn agent() -> AgentId {
        AgentId(0)
    }

    #[test]
    fn bin_clamps_to_last_bucket() {
        let agg = Aggregator::new(10, 100.0, 5);
        assert_eq!(agg.bin(0.0), 0);
        assert_eq!(agg.bin(99.9), 9);
        assert_eq!(agg.bin(1_000.0), 9);
    }

    #[test]
    fn decision_increments_its_bin_only() {
        let mut agg = Aggregator::new(4, 40.0, 1);
        agg.record(Event::Decision {
            agent: agent(),
            category: PoiCategory::Cafe,
            t_s: 25.0,
        });
        assert_eq!(agg.decisions, vec![0, 0, 1, 0]);
    }

    #[test]
    fn arrival_updates_arrivals_walk_and_travel_time() {
        let mut agg = Aggregator::new(2, 20.0, 1);
        agg.record(Event::Arrival {
            agent: agent(),
            category: PoiCategory::Grocery,
            path_len_cells: 12,
            travel_time_s: 6.0,
            t_s: 1.0,
        });
        assert_eq!(agg.arrivals, vec![1, 0]);
        assert_eq!(agg.walk_cells, vec![12, 0]);
        assert_eq!(agg.travel_time, vec![6.0, 0.0]);
    }

    #[test]
    fn purchase_adds_to_spend() {
        let mut agg = Aggregator::new(1, 10.0, 1);
        agg.record(Event::Purchase {
            agent: agent(),
            category: PoiCategory::Restaurant,
            amount: 14.5,
            t_s: 3.0,
        });
        assert_eq!(agg.spend, vec![14.5]);
    }

    #[test]
    fn path_not_found_increments_its_bin_without_touching_other_series() {
        let mut agg = Aggregator::new(2, 20.0, 1);
        agg.record(Event::PathNotFound {
            agent: agent(),
            category: PoiCategory::Pharmacy,
            t_s: 15.0,
        });
        assert_eq!(agg.path_not_found, vec![0, 1]);
        assert_eq!(agg.arrivals, vec![0, 0]);
    }

    #[test]
    fn efficiency_is_zero_with_no_arrivals() {
        let agg = Aggregator::new(3, 30.0, 4);
        assert_eq!(agg.efficiency_series(), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn cost_without_baseline_grows_with_spend() {
        let mut agg = Aggregator::new(1, 10.0, 1);
        agg.record(Event::Purchase {
            agent: agent(),
            category: PoiCategory::Cafe,
            amount: 99.0,
            t_s: 0.0,
        });
        let series = agg.cost_series(None);
        assert!(series[0] > 0.0 && series[0] <= 100.0);
    }

    #[test]
    fn cost_with_baseline_is_positive_when_cheaper() {
        let mut baseline = Aggregator::new(1, 10.0, 1);
        baseline.record(Event::Purchase {
            agent: agent(),
            category: PoiCategory::Cafe,
            amount: 20.0,
            t_s: 0.0,
        });
        let mut scenario = Aggregator::new(1, 10.0, 1);
        scenario.record(Event::Purchase {
            agent: agent(),
            category: PoiCategory::Cafe,
            amount: 10.0,
            t_s: 0.0,
        });
        let series = scenario.cost_series(Some(&baseline));
        assert_eq!(series[0], 50.0);
    }

    #[test]
    fn time_saved_is_zero_without_arrivals_this_bin() {
        let baseline = Aggregator::new(1, 10.0, 1);
        let scenario = Aggregator::new(1, 10.0, 1);
        assert_eq!(scenario.time_saved_series(Some(&baseline)), vec![0.0]);
    }

    #[test]
    fn time_saved_is_zero_without_a_baseline() {
        let scenario = Aggregator::new(2, 20.0, 1);
        assert_eq!(scenario.time_saved_series(None), vec![0.0, 0.0]);
    }
}
