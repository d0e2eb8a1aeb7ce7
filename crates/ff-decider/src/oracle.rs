//! The `Oracle` trait — external LLM-like decision backend, and the
//! always-available deterministic fallback.
//!
//! No concrete network transport lives in this crate; an application wires
//! a real `Oracle` implementation (e.g. an HTTP client) elsewhere and passes
//! it to [`crate::decider::OracleDecider`]. Each call is handed to a detached
//! background thread with a receive-timeout on the result channel, rather
//! than a `tokio::time::timeout` — no async runtime dependency needed for
//! one blocking round trip per decision.

use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use ff_core::{NeedCategory, PoiCategory};
use thiserror::Error;

/// Compact input sent to an oracle-backed decider.
#[derive(Clone, Debug)]
pub struct OracleRequest {
    /// Free-form persona summary, or empty if the agent has none.
    pub persona_summary: String,
    /// Up to three (need, weight) pairs, highest weight first.
    pub top_needs: Vec<(NeedCategory, f64)>,
    /// Recent memory lines, oldest first.
    pub memory_tail: Vec<String>,
    /// Seconds since simulated midnight.
    pub time_of_day_s: f64,
    /// The scenario's need biases.
    pub biases: HashMap<NeedCategory, f64>,
}

/// An oracle's answer: the chosen POI category, a short rationale, and a
/// memory line for the simulation loop to append to the agent's log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OracleResponse {
    pub category: PoiCategory,
    pub thought: String,
    pub memory: String,
}

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle call timed out after {0:?}")]
    Timeout(Duration),

    #[error("oracle returned malformed output: {0}")]
    Malformed(String),

    #[error("oracle returned unknown category {0:?}")]
    UnknownCategory(String),

    #[error("oracle transport error: {0}")]
    Transport(String),
}

/// A decision backend consulted for a single agent's choice of category.
///
/// Implementations must be cheap to share across threads (`Send + Sync`);
/// the simulation loop may call `decide` from many worker threads at once,
/// one per in-flight oracle request.
pub trait Oracle: Send + Sync + 'static {
    fn decide(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError>;
}

/// Call `oracle.decide(request)` on a detached background thread, returning
/// `OracleError::Timeout` if it doesn't complete within `timeout`.
///
/// The thread is spawned rather than scoped, so the caller returns at the
/// deadline regardless of whether the oracle has answered: a timed-out call
/// is abandoned, not waited on. There is no safe way to preempt arbitrary
/// blocking work, so the thread keeps running in the background and its
/// eventual result, if any, is dropped. Callers that time out repeatedly
/// against the same oracle should treat that as a signal to fall back for
/// the remainder of the run.
pub fn call_with_timeout(
    oracle: Arc<dyn Oracle>,
    request: &OracleRequest,
    timeout: Duration,
) -> Result<OracleResponse, OracleError> {
    let (tx, rx) = mpsc::channel();
    let request = request.clone();
    thread::spawn(move || {
        let result = oracle.decide(&request);
        let _ = tx.send(result);
    });
    rx.recv_timeout(timeout)
        .unwrap_or(Err(OracleError::Timeout(timeout)))
}

/// An oracle that always succeeds by delegating to the deterministic
/// strategy. Used as the default oracle and in tests.
pub struct DeterministicOracle;

impl Oracle for DeterministicOracle {
    fn decide(&self, request: &OracleRequest) -> Result<OracleResponse, OracleError> {
        let category = request
            .top_needs
            .first()
            .map(|(need, _)| need.satisfying_category())
            .unwrap_or(PoiCategory::Other);
        Ok(OracleResponse {
            category,
            thought: format!("deterministic fallback for {category}"),
            memory: format!("went looking for {category}"),
        })
    }
}
