//! Events the tick loop produces and the destination a metrics aggregator
//! (or an event log writer) consumes them through.
//!
//! Decision logic never touches an aggregator directly — it returns
//! `Event`s, and only the tick loop pushes them onward. This keeps the loop
//! the single place event ordering is decided.

use ff_core::{AgentId, PoiCategory};
use serde::{Deserialize, Serialize};

/// One observable occurrence during a tick, in the exact shape the metrics
/// aggregator and the live event log both consume.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    /// An agent chose a destination category this tick.
    Decision {
        agent: AgentId,
        category: PoiCategory,
        t_s: f64,
    },
    /// An agent reached the destination it was traveling to.
    Arrival {
        agent: AgentId,
        category: PoiCategory,
        path_len_cells: usize,
        travel_time_s: f64,
        t_s: f64,
    },
    /// An agent spent money at the POI it just arrived at.
    Purchase {
        agent: AgentId,
        category: PoiCategory,
        amount: f64,
        t_s: f64,
    },
    /// An agent decided on a category but no reachable POI of that category
    /// exists; the decision stands, travel never starts.
    PathNotFound {
        agent: AgentId,
        category: PoiCategory,
        t_s: f64,
    },
}

/// Destination for events produced during a tick.
///
/// Implemented by the metrics aggregator and by event-log writers alike;
/// the tick loop is generic over this trait and never knows which.
pub trait EventSink {
    fn record(&mut self, event: Event);
}

impl EventSink for Vec<Event> {
    fn record(&mut self, event: Event) {
        self.push(event);
    }
}

/// Fans a single event out to two sinks, e.g. a live aggregator and a
/// durable event-log writer sharing one tick loop.
impl<A: EventSink, B: EventSink> EventSink for (A, B) {
    fn record(&mut self, event: Event) {
        self.0.record(event.clone());
        self.1.record(event);
    }
}
