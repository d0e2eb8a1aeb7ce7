//! `ff-needs` — need-bias derivation, per-role need seeding, and per-tick
//! decay/reinforcement.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                     |
//! |-----------|----------------------------------------------------------------|
//! | [`needs`] | `Needs`, `build_need_biases_for_scenario`, `seed_needs`, `decay_and_reinforce` |
//!
//! No error type: every operation here is a pure, total function over plain
//! maps — nothing can fail.

pub mod needs;


pub use needs::{build_need_biases_for_scenario, decay_and_reinforce, seed_needs, Needs};
