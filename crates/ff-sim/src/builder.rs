//! Fluent builder for constructing a [`Sim`].

use std::collections::HashMap;

use ff_agent::AgentStoreBuilder;
use ff_core::{NeedCategory, RunConfig};
use ff_decider::Decider;
use ff_grid::pathfind::snap_to_walkable;
use ff_grid::Grid;
use ff_needs::{seed_needs, Needs};

use crate::{Sim, SimError, SimResult};

/// How far `snap_to_walkable` is allowed to spiral out from the grid's
/// center when placing agents at start.
const START_SNAP_RADIUS: i32 = 25;

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`RunConfig`] — seed, duration, agent count, tick length, …
/// - a [`Grid`] the agents walk on
/// - a `D: Decider` — the decision strategy every agent shares
///
/// # Optional inputs
///
/// | Method            | Default                                   |
/// |--------------------|-------------------------------------------|
/// | `.biases(map)`     | empty (no need biases)                     |
/// | `.memory_capacity(n)` | [`ff_agent::DEFAULT_MEMORY_CAPACITY`]   |
///
/// # Example
///
/// ```rust,ignore
/// let biases = ff_needs::build_need_biases_for_scenario(&scenario);
/// let mut sim = SimBuilder::new(config, &grid, DeterministicDecider)
///     .biases(biases)
///     .build()?;
/// sim.run(&mut NoopObserver, &mut Vec::new())?;
/// ```
pub struct SimBuilder<'g, D: Decider> {
    config: RunConfig,
    grid: &'g Grid,
    decider: D,
    biases: HashMap<NeedCategory, f64>,
    memory_capacity: usize,
}

impl<'g, D: Decider> SimBuilder<'g, D> {
    /// Create a builder with all required inputs.
    pub fn new(config: RunConfig, grid: &'g Grid, decider: D) -> Self {
        Self {
            config,
            grid,
            decider,
            biases: HashMap::new(),
            memory_capacity: ff_agent::DEFAULT_MEMORY_CAPACITY,
        }
    }

    /// Supply the scenario's need biases (see
    /// [`ff_needs::build_need_biases_for_scenario`]).
    pub fn biases(mut self, biases: HashMap<NeedCategory, f64>) -> Self {
        self.biases = biases;
        self
    }

    /// Override the per-agent memory log capacity.
    pub fn memory_capacity(mut self, capacity: usize) -> Self {
        self.memory_capacity = capacity;
        self
    }

    /// Place every agent at the grid center (snapped to the nearest walkable
    /// cell), seed needs from each agent's role and the scenario's biases,
    /// and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<'g, D>> {
        if self.config.tick_seconds <= 0.0 {
            return Err(SimError::Config("tick_seconds must be positive".into()));
        }

        let center = self.grid.center();
        let start = snap_to_walkable(self.grid, center.iy, center.ix, START_SNAP_RADIUS)
            .unwrap_or(center);

        let (mut agents, rngs) = AgentStoreBuilder::new(self.config.agent_count as usize, self.config.seed)
            .start_position(start.ix as f32, start.iy as f32)
            .memory_capacity(self.memory_capacity)
            .build();

        let empty: Needs = Needs::new();
        for i in 0..agents.count {
            agents.needs[i] = seed_needs(&empty, &self.biases, agents.role[i]);
        }

        Ok(Sim::new(self.config, self.grid, agents, rngs, self.decider, self.biases))
    }
}
