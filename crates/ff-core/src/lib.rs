//! `ff-core` — foundational types shared by every `ff-*` crate.
//!
//! This crate has no `ff-*` dependencies and minimal external ones (only
//! `rand` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|--------------------------------------------------------|
//! | [`ids`]      | `AgentId`                                              |
//! | [`geo`]      | `Cell`, `GridOrigin`                                    |
//! | [`time`]     | `Tick`, `SimClock`, `RunConfig`                         |
//! | [`rng`]      | `AgentRng` (per-agent), `SimRng` (global)               |
//! | [`category`] | `PoiCategory`, `NeedCategory`, `CellClass`, `Role`      |
//! | [`error`]    | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod category;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use category::{CellClass, NeedCategory, PoiCategory, Role};
pub use error::{CoreError, CoreResult};
pub use geo::{Cell, GridOrigin};
pub use ids::AgentId;
pub use rng::{AgentRng, SimRng};
pub use time::{RunConfig, SimClock, Tick};
