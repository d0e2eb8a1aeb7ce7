//! `ff-scenario` — scenario documents, validation, and the JSON loader.
//!
//! # Crate layout
//!
//! | Module       | Contents                                             |
//! |--------------|-------------------------------------------------------|
//! | [`scenario`] | `Scenario`, `PoiAdd`, `PoiUpdate`, `Placement`        |
//! | [`loader`]   | `load_scenario`, `load_scenario_reader`               |
//! | [`error`]    | `ScenarioError`, `ScenarioResult<T>`                  |
//!
//! # Validation
//!
//! A scenario is validated as a whole at load time: every `poi_add` entry
//! must parse as either absolute coordinates or an anchor (enforced by
//! [`scenario::Placement`]'s untagged deserialization), every `poi_update`
//! must carry a non-empty `match` and `set`, and the scenario `id` must be
//! non-empty. Anchor resolution (`center`/`frontage_center`/unknown → grid
//! midpoint, offset and clamp) lives on [`scenario::PoiAdd::target_cell`].

pub mod error;
pub mod loader;
pub mod scenario;


pub use error::{ScenarioError, ScenarioResult};
pub use loader::{load_scenario, load_scenario_reader};
pub use scenario::{Placement, PoiAdd, PoiUpdate, Scenario};
