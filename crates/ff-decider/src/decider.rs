//! The `Decider` trait — the main extension point for choosing an agent's
//! next destination category, plus the two built-in strategies.

use std::sync::Arc;
use std::time::Duration;

use ff_core::{NeedCategory, PoiCategory};

use crate::context::DecisionContext;
use crate::oracle::{call_with_timeout, Oracle, OracleRequest};

/// The outcome of one decision: a category to head towards, a short
/// rationale, and a line to append to the agent's memory log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub category: PoiCategory,
    pub thought: String,
    pub memory_line: String,
}

/// Pluggable per-agent decision strategy.
///
/// Implementations must be `Send + Sync`: the simulation loop may call
/// `decide` for many agents in parallel.
pub trait Decider: Send + Sync {
    fn decide(&self, ctx: &DecisionContext<'_>) -> Decision;
}

/// Lets a shared reference stand in for an owned decider, so one instance
/// can be handed to several `SimBuilder`s without cloning it.
impl<T: Decider + ?Sized> Decider for &T {
    fn decide(&self, ctx: &DecisionContext<'_>) -> Decision {
        (**self).decide(ctx)
    }
}

/// Picks the highest-weighted need and maps it through the fixed
/// need-to-category table. Used both as the baseline strategy and as the
/// fallback for [`OracleDecider`].
pub struct DeterministicDecider;

impl DeterministicDecider {
    fn pick_category(ctx: &DecisionContext<'_>) -> (NeedCategory, PoiCategory) {
        let (need, _weight) = ctx
            .strongest_need()
            .unwrap_or((NeedCategory::Hunger, 0.0));
        let mut category = need.satisfying_category();
        if ctx.meeting {
            category = match category {
                PoiCategory::Cafe | PoiCategory::Restaurant => category,
                _ => PoiCategory::Cafe,
            };
        }
        (need, category)
    }
}

impl Decider for DeterministicDecider {
    fn decide(&self, ctx: &DecisionContext<'_>) -> Decision {
        let (need, category) = Self::pick_category(ctx);
        Decision {
            category,
            thought: format!("strongest need is {need}, heading to {category}"),
            memory_line: format!("went looking for {category}"),
        }
    }
}

/// Consults an external [`Oracle`] for the decision, falling back to
/// [`DeterministicDecider`] on timeout, malformed output, or an unrecognized
/// category. The oracle is never allowed to block or abort the simulation.
pub struct OracleDecider<O: Oracle> {
    oracle: Arc<O>,
    timeout: Duration,
    fallback: DeterministicDecider,
}

impl<O: Oracle> OracleDecider<O> {
    pub fn new(oracle: O, timeout: Duration) -> Self {
        Self {
            oracle: Arc::new(oracle),
            timeout,
            fallback: DeterministicDecider,
        }
    }
}

impl<O: Oracle> Decider for OracleDecider<O> {
    fn decide(&self, ctx: &DecisionContext<'_>) -> Decision {
        let request = OracleRequest {
            persona_summary: ctx.persona.unwrap_or_default().to_string(),
            top_needs: ctx.top_needs(3),
            memory_tail: ctx.memory_tail.to_vec(),
            time_of_day_s: ctx.time_of_day_s,
            biases: ctx.biases.clone(),
        };

        match call_with_timeout(Arc::clone(&self.oracle) as Arc<dyn Oracle>, &request, self.timeout) {
            Ok(response) => Decision {
                category: response.category,
                thought: response.thought,
                memory_line: response.memory,
            },
            Err(_) => self.fallback.decide(ctx),
        }
    }
}
