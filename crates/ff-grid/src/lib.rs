//! `ff-grid` — grid loading, 8-connected A* pathfinding, and doorway carving.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`grid`]    | `Grid`, `Poi`, `load_grid_dir`, `write_pois`, `GridBuilder` |
//! | [`pathfind`]| `astar`, `snap_to_walkable`, `carve_doorway`                |
//! | [`npy`]     | Minimal `.npy` reader (internal)                            |
//! | [`error`]   | `GridError`, `GridResult<T>`                                |
//!
//! Grid values are pure and immutable once built: `load_grid_dir` and
//! `GridBuilder` are the only ways to produce one, and nothing in this crate
//! mutates a `Grid` in place except [`pathfind::carve_doorway`], which the
//! caller invokes on an owned copy during asset materialization.

pub mod error;
pub mod grid;
mod npy;
pub mod pathfind;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use grid::{load_grid_dir, write_pois, Grid, GridBuilder, Poi, SnappedCell};
pub use pathfind::{astar, carve_doorway, snap_to_walkable, PathfinderConfig};
