//! Structure-of-Arrays agent storage.
//!
//! # Crate layout
//!
//! | Module      | Contents                                               |
//! |-------------|---------------------------------------------------------|
//! | [`store`]   | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)  |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction)               |

pub mod builder;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use store::{AgentRngs, AgentStore, DEFAULT_MEMORY_CAPACITY};
