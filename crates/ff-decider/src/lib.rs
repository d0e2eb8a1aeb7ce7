//! Agent decider: chooses the next destination category per agent.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                      |
//! |------------|----------------------------------------------------------------|
//! | [`context`] | `DecisionContext<'a>` — read-only per-decision input           |
//! | [`decider`] | `Decider` trait, `Decision`, `DeterministicDecider`, `OracleDecider` |
//! | [`oracle`]  | `Oracle` trait, request/response types, `DeterministicOracle`  |
//! | [`error`]   | `DeciderError`, `DeciderResult<T>`                              |
//!
//! # Design notes
//!
//! There is no intent phase/apply phase split here: a decider produces one
//! [`decider::Decision`] per agent per tick, and the simulation loop applies
//! it directly (pick a destination POI of that category, compute a path).
//! Both `DeterministicDecider` and `OracleDecider` are `Send + Sync`, so the
//! simulation loop may call `decide` for all agents in parallel.

pub mod context;
pub mod decider;
pub mod error;
pub mod oracle;

pub use context::DecisionContext;
pub use decider::{Decider, DeterministicDecider, Decision, OracleDecider};
pub use error::{DeciderError, DeciderResult};
pub use oracle::{DeterministicOracle, Oracle, OracleError, OracleRequest, OracleResponse};
