//! The `Sim` struct and its per-scenario tick loop.
//!
//! One `Sim` runs exactly one scenario, single-threaded, over its own
//! `AgentStore`/`AgentRngs` and a read-only `Grid`. Concurrency across
//! scenarios is the caller's concern (an experiment runner spawning one
//! worker per scenario); nothing in this module spawns a thread.

use ff_agent::{AgentRngs, AgentStore};
use ff_core::{AgentId, Cell, NeedCategory, PoiCategory, RunConfig, SimClock};
use ff_decider::{Decider, DecisionContext};
use ff_grid::pathfind::{astar, PathfinderConfig};
use ff_grid::Grid;
use ff_needs::{decay_and_reinforce, Needs};

use crate::events::{Event, EventSink};
use crate::observer::SimObserver;
use crate::SimResult;

/// Probability an arriving agent makes a purchase.
const P_PURCHASE: f64 = 0.7;
/// Baseline purchase amount range, before the scenario-added multiplier.
const PURCHASE_AMOUNT_RANGE: std::ops::Range<f64> = 5.0..25.0;
/// Multiplier applied when the destination POI was added by the scenario.
const SCENARIO_MULTIPLIER_RANGE: std::ops::Range<f64> = 1.3..2.5;
/// How many recent memory lines a decider is shown.
const MEMORY_TAIL_LEN: usize = 5;

// ── Per-agent travel state ─────────────────────────────────────────────────────

/// An in-progress walk toward a chosen POI.
struct Travel {
    path: Vec<Cell>,
    next_idx: usize,
    category: PoiCategory,
    scenario_added: bool,
    ticks_elapsed: u64,
}

// ── Sim ─────────────────────────────────────────────────────────────────────────

/// One scenario's simulation: agents, their decider, the grid they walk on,
/// and each agent's in-progress travel, if any.
pub struct Sim<'g, D: Decider> {
    pub config: RunConfig,
    pub clock: SimClock,
    pub grid: &'g Grid,
    pub agents: AgentStore,
    pub rngs: AgentRngs,
    pub decider: D,
    pub biases: std::collections::HashMap<NeedCategory, f64>,
    travel: Vec<Option<Travel>>,
}

impl<'g, D: Decider> Sim<'g, D> {
    pub(crate) fn new(
        config: RunConfig,
        grid: &'g Grid,
        agents: AgentStore,
        rngs: AgentRngs,
        decider: D,
        biases: std::collections::HashMap<NeedCategory, f64>,
    ) -> Self {
        let travel = (0..agents.count).map(|_| None).collect();
        let clock = config.make_clock();
        Self {
            config,
            clock,
            grid,
            agents,
            rngs,
            decider,
            biases,
            travel,
        }
    }

    /// Run to completion: `config.total_ticks()` ticks, or until `duration_s`
    /// has elapsed, whichever the clock reaches first.
    pub fn run<O: SimObserver, S: EventSink>(
        &mut self,
        observer: &mut O,
        sink: &mut S,
    ) -> SimResult<()> {
        let total = self.config.total_ticks();
        self.run_ticks(total, observer, sink)
    }

    /// Run at most `n` more ticks (fewer if the clock's total is reached
    /// first). Exposed separately so tests and callers can step the loop.
    pub fn run_ticks<O: SimObserver, S: EventSink>(
        &mut self,
        n: u64,
        observer: &mut O,
        sink: &mut S,
    ) -> SimResult<()> {
        let total = self.config.total_ticks();
        for _ in 0..n {
            if self.clock.current_tick.0 >= total {
                break;
            }
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            self.process_tick(sink);
            self.clock.advance();
            observer.on_tick_end(now);
        }
        if self.clock.current_tick.0 >= total {
            observer.on_sim_end(self.clock.current_tick);
        }
        Ok(())
    }

    /// Decide, advance travel, and decay needs for every agent this tick.
    ///
    /// Runs as two phases even though single-threaded: the loop below both
    /// decides and advances travel per agent in ascending `AgentId` order,
    /// collecting events into a local buffer; only once that's done does it
    /// push them into `sink`. Decision and travel logic never touch `sink`
    /// directly.
    fn process_tick<S: EventSink>(&mut self, sink: &mut S) {
        let t_s = self.clock.elapsed_secs();
        let mut events: Vec<Event> = Vec::new();

        for i in 0..self.agents.count {
            let agent = AgentId(i as u32);

            if self.travel[i].is_none() {
                self.decide_for(agent, t_s, &mut events);
            }

            self.advance_travel(agent, t_s, &mut events);
        }

        for event in events {
            sink.record(event);
        }

        for i in 0..self.agents.count {
            self.agents.needs[i] =
                decay_and_reinforce(&self.agents.needs[i], self.clock.tick_seconds, &self.biases);
        }
    }

    fn decide_for(&mut self, agent: AgentId, t_s: f64, events: &mut Vec<Event>) {
        let i = agent.index();
        let needs: &Needs = &self.agents.needs[i];
        let persona = self.agents.persona[i].as_deref();
        let memory_tail = self.agents.memory_tail(agent, MEMORY_TAIL_LEN);

        let ctx = DecisionContext {
            needs,
            persona,
            memory_tail,
            time_of_day_s: t_s,
            biases: &self.biases,
            meeting: false,
        };
        let decision = self.decider.decide(&ctx);

        self.agents.push_memory(agent, decision.memory_line);
        events.push(Event::Decision {
            agent,
            category: decision.category,
            t_s,
        });

        let (x, y) = self.agents.position(agent);
        let from = Cell::new(y as i32, x as i32);
        match resolve_destination(self.grid, from, decision.category) {
            Some((path, scenario_added)) => {
                self.travel[i] = Some(Travel {
                    path,
                    next_idx: 1,
                    category: decision.category,
                    scenario_added,
                    ticks_elapsed: 0,
                });
            }
            None => {
                events.push(Event::PathNotFound {
                    agent,
                    category: decision.category,
                    t_s,
                });
            }
        }
    }

    fn advance_travel(&mut self, agent: AgentId, t_s: f64, events: &mut Vec<Event>) {
        let i = agent.index();
        let Some(travel) = &mut self.travel[i] else { return };
        travel.ticks_elapsed += 1;

        if travel.next_idx < travel.path.len() {
            let cell = travel.path[travel.next_idx];
            self.agents.set_position(agent, cell.ix as f32, cell.iy as f32);
            travel.next_idx += 1;
        }

        if travel.next_idx < travel.path.len() {
            return;
        }

        let path_len_cells = travel.path.len().saturating_sub(1);
        let travel_time_s = travel.ticks_elapsed as f64 * self.clock.tick_seconds;
        let category = travel.category;
        let scenario_added = travel.scenario_added;
        self.travel[i] = None;

        events.push(Event::Arrival {
            agent,
            category,
            path_len_cells,
            travel_time_s,
            t_s,
        });

        let rng = self.rngs.get_mut(agent);
        if rng.gen_bool(P_PURCHASE) {
            let mut amount: f64 = rng.gen_range(PURCHASE_AMOUNT_RANGE);
            if scenario_added {
                amount *= rng.gen_range(SCENARIO_MULTIPLIER_RANGE);
            }
            events.push(Event::Purchase {
                agent,
                category,
                amount,
                t_s,
            });
        }
    }
}

/// Nearest POI of `category` reachable from `from`, approximated by sorting
/// candidates on Chebyshev distance and taking the first one A* actually
/// reaches. Returns the full path (including `from`) and whether that POI
/// was added by the scenario.
fn resolve_destination(grid: &Grid, from: Cell, category: PoiCategory) -> Option<(Vec<Cell>, bool)> {
    let mut candidates: Vec<_> = grid
        .pois
        .iter()
        .filter(|poi| poi.category == category)
        .collect();
    candidates.sort_by_key(|poi| from.chebyshev(poi.resolved_cell()));

    for poi in candidates {
        let dest = poi.resolved_cell();
        if !grid.is_walkable(dest) {
            continue;
        }
        if let Some(path) = astar(grid, from, dest, PathfinderConfig::default()) {
            return Some((path, poi.is_scenario_added()));
        }
    }
    None
}
