//! `ff-sim` — single-scenario tick loop: decide, travel, purchase, decay.
//!
//! # Per-tick sequence
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   for each agent, in ascending AgentId order:
//!     if not traveling:
//!       decide()           — call the Decider, record a Decision event,
//!                             resolve the nearest reachable POI of that
//!                             category and compute a path once.
//!     advance_travel()     — step one cell along any in-progress path;
//!                             on arrival, record an Arrival event and roll
//!                             a Purchase event.
//!   push all of this tick's events into the EventSink
//!   decay every agent's needs
//! ```
//!
//! This loop is single-threaded by design — running multiple scenarios
//! concurrently is the caller's job (one `Sim` per worker), so nothing here
//! spawns a thread or depends on Rayon. Decision and travel logic never
//! touch the `EventSink` directly; they return `Event`s into a per-tick
//! buffer that only the loop itself drains into the sink, keeping event
//! ordering exactly reproducible for a given seed.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ff_decider::DeterministicDecider;
//! use ff_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(config, &grid, DeterministicDecider)
//!     .biases(biases)
//!     .build()?;
//! let mut events = Vec::new();
//! sim.run(&mut NoopObserver, &mut events)?;
//! ```

pub mod builder;
pub mod error;
pub mod events;
pub mod observer;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use events::{Event, EventSink};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
