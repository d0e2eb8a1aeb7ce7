//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The parallel decision phase needs `&mut AgentRngs` (exclusive mutable
//! access to each agent's RNG) and `&AgentStore` (shared read access to
//! needs/position/memory) simultaneously. Rust's borrow checker forbids this
//! if both live inside a single struct. Keeping RNGs in a separate
//! `AgentRngs` struct resolves the conflict cleanly:
//!
//! ```ignore
//! // ff-sim tick loop (simplified):
//! let store: &AgentStore = &sim.store;
//! let decisions = sim.rngs.inner
//!     .par_iter_mut()
//!     .enumerate()
//!     .map(|(i, rng)| decider.decide(&store.decision_context(AgentId(i as u32), rng)))
//!     .collect::<Vec<_>>();
//! ```

use ff_core::{AgentId, AgentRng, Role};
use ff_needs::Needs;

/// Number of most-recent memory lines kept per agent by default.
pub const DEFAULT_MEMORY_CAPACITY: usize = 20;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] to enable
/// simultaneous `&mut AgentRngs` + `&AgentStore` borrows in the parallel phase.
///
/// `AgentRngs` is `Send` (the inner `SmallRng` is `Send`) but intentionally
/// not `Sync` — per-agent RNG state must never be shared between threads.
/// Rayon's `par_iter_mut()` handles the exclusive-per-thread access pattern.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Return mutable references to the RNGs for a set of agents.
    ///
    /// # Precondition (enforced by caller)
    ///
    /// `agents` must contain no duplicate `AgentId`s and all indices must be
    /// in-bounds.
    pub fn get_many_mut(&mut self, agents: &[AgentId]) -> Vec<&mut AgentRng> {
        let ptr = self.inner.as_mut_ptr();
        // SAFETY: every `AgentId` in `agents` is unique (caller invariant) and
        // within bounds, so each pointer aliases a distinct element.
        agents
            .iter()
            .map(|a| unsafe { &mut *ptr.add(a.index()) })
            .collect()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; `AgentId::index()` is the
/// index into all of them:
///
/// ```ignore
/// let role = store.role[agent.index()];
/// ```
pub struct AgentStore {
    /// Number of agents. Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Agent role, sampled once at construction.
    pub role: Vec<Role>,

    /// Current position in float grid-cell coordinates.
    pub pos_x: Vec<f32>,
    pub pos_y: Vec<f32>,

    /// Current need levels, always clamped to `[0.0, 1.0]` on write.
    pub needs: Vec<Needs>,

    /// Optional persona summary, consumed only by oracle-backed deciders.
    pub persona: Vec<Option<String>>,

    memory: Vec<Vec<String>>,
    memory_capacity: usize,
}

impl AgentStore {
    /// `true` if there are no agents.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `AgentId`s in ascending index order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Current position of `agent` as `(x, y)`.
    #[inline]
    pub fn position(&self, agent: AgentId) -> (f32, f32) {
        (self.pos_x[agent.index()], self.pos_y[agent.index()])
    }

    /// Overwrite `agent`'s position.
    #[inline]
    pub fn set_position(&mut self, agent: AgentId, x: f32, y: f32) {
        self.pos_x[agent.index()] = x;
        self.pos_y[agent.index()] = y;
    }

    /// The last `n` memory lines for `agent`, oldest first.
    pub fn memory_tail(&self, agent: AgentId, n: usize) -> &[String] {
        let lines = &self.memory[agent.index()];
        let start = lines.len().saturating_sub(n);
        &lines[start..]
    }

    /// Append a line to `agent`'s memory log, dropping the oldest line once
    /// the configured capacity is exceeded.
    pub fn push_memory(&mut self, agent: AgentId, line: String) {
        let lines = &mut self.memory[agent.index()];
        lines.push(line);
        if lines.len() > self.memory_capacity {
            lines.remove(0);
        }
    }

    // ── Package-private constructor used by AgentStoreBuilder ─────────────

    pub(crate) fn new(
        count: usize,
        role: Vec<Role>,
        start_pos: (f32, f32),
        memory_capacity: usize,
    ) -> Self {
        Self {
            count,
            role,
            pos_x: vec![start_pos.0; count],
            pos_y: vec![start_pos.1; count],
            needs: vec![Needs::new(); count],
            persona: vec![None; count],
            memory: vec![Vec::new(); count],
            memory_capacity,
        }
    }
}
