//! `ff-metrics` — binned event aggregation and analytics publishing.
//!
//! A scenario's tick loop produces [`ff_sim::Event`]s; this crate turns a
//! stream of those into the single artifact a dashboard reads:
//!
//! - [`Aggregator`] folds events into fixed-length, time-binned vectors and
//!   derives the `efficiency` / `cost` / `time_saved` series from them.
//! - [`document`] composes a baseline aggregator and its comparison
//!   aggregators into the [`document::AnalyticsDocument`] shape a dashboard
//!   expects.
//! - [`eventlog`] appends events to a JSON Lines file as a scenario runs,
//!   and lets a live publisher rebuild an [`Aggregator`] by replaying that
//!   file from the start.
//! - [`publish`] writes the composed document to disk atomically.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ff_metrics::{Aggregator, document, eventlog, publish};
//!
//! let mut aggregator = Aggregator::new(config.bins, config.duration_s, config.agent_count);
//! sim.run(&mut NoopObserver, &mut aggregator)?;
//!
//! let baseline = document::ScenarioSummary { label: "baseline".into(), aggregator: &aggregator };
//! let doc = document::compose_document(&baseline, &[]);
//! publish::publish_json(&out_path, &doc)?;
//! ```

pub mod aggregator;
pub mod document;
pub mod error;
pub mod eventlog;
pub mod publish;

#[cfg(test)]
mod tests;

pub use aggregator::Aggregator;
pub use document::{AnalyticsDocument, ScenarioSummary};
pub use error::{MetricsError, MetricsResult};
pub use eventlog::{EventLogWriter, read_all_events, replay_into_aggregator};
pub use publish::publish_json;
