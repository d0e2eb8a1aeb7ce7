//! `ff-materializer` — turns a baseline grid plus a scenario into a
//! scenario-specific asset directory.
//!
//! # Crate layout
//!
//! | Module           | Contents                                  |
//! |------------------|--------------------------------------------|
//! | [`materializer`] | `materialize`, `MaterializerConfig`        |
//! | [`error`]        | `MaterializerError`, `MaterializerResult<T>` |

pub mod error;
pub mod materializer;


pub use error::{MaterializerError, MaterializerResult};
pub use materializer::{materialize, MaterializerConfig};
