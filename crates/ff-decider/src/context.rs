//! Read-only input handed to a decider for one agent's decision.

use ff_core::NeedCategory;
use ff_needs::Needs;

/// Everything a decider needs to pick the agent's next destination category.
///
/// Built fresh per agent per decision; the simulation loop owns the
/// underlying `Needs`/memory/bias storage, this struct only borrows from
/// it.
pub struct DecisionContext<'a> {
    /// The agent's current need levels.
    pub needs: &'a Needs,

    /// A compact, free-form summary of the agent's persona, if any. Only
    /// consumed by oracle-backed deciders; the deterministic strategy
    /// ignores it.
    pub persona: Option<&'a str>,

    /// The agent's recent memory log, oldest first, already bounded in
    /// length by the caller.
    pub memory_tail: &'a [String],

    /// Seconds since simulated midnight, for oracle prompts that care about
    /// time of day.
    pub time_of_day_s: f64,

    /// The scenario's need biases (see `ff_needs::build_need_biases_for_scenario`).
    pub biases: &'a std::collections::HashMap<NeedCategory, f64>,

    /// `true` when the agent is in a "meeting" context, which biases the
    /// deterministic strategy toward cafe/restaurant.
    pub meeting: bool,
}

impl<'a> DecisionContext<'a> {
    /// The (category, weight) pair for the agent's single strongest need,
    /// or `None` if `needs` is empty.
    pub fn strongest_need(&self) -> Option<(NeedCategory, f64)> {
        self.needs
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(&c, &w)| (c, w))
    }

    /// Up to the three highest-weighted needs, descending by weight.
    pub fn top_needs(&self, n: usize) -> Vec<(NeedCategory, f64)> {
        let mut sorted: Vec<(NeedCategory, f64)> =
            self.needs.iter().map(|(&c, &w)| (c, w)).collect();
        sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        sorted.truncate(n);
        sorted
    }
}
