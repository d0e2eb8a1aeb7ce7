//! JSON Lines event log: one [`Event`] per line, appended as a scenario
//! runs and replayed from scratch by the live publisher.
//!
//! The reader always starts at byte offset zero. A scenario's event count
//! is small enough over a run that re-reading the whole file every publish
//! cycle is simpler than maintaining a tailing cursor, and it sidesteps
//! partial-line races with the writer.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use ff_sim::{Event, EventSink};

use crate::aggregator::Aggregator;
use crate::error::{MetricsError, MetricsResult};

/// Appends newline-delimited JSON [`Event`]s to a file, flushing after each
/// write so a concurrent reader never sees a half-written line.
pub struct EventLogWriter {
    file: File,
}

impl EventLogWriter {
    pub fn create<P: AsRef<Path>>(path: P) -> MetricsResult<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self { file })
    }

    pub fn append(&mut self, event: &Event) -> MetricsResult<()> {
        let line = serde_json::to_string(event)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.file.flush()?;
        Ok(())
    }
}

impl EventSink for EventLogWriter {
    fn record(&mut self, event: Event) {
        // The sink trait is infallible; a write failure here is surfaced as
        // a missing line rather than a panic, so a lagging output backend
        // never takes a tick loop down.
        let _ = self.append(&event);
    }
}

/// Reads every event currently in the log file, in order. Returns an empty
/// vec for a file that doesn't exist yet (the scenario hasn't started
/// writing).
pub fn read_all_events<P: AsRef<Path>>(path: P) -> MetricsResult<Vec<Event>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Vec::new());
    }
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut events = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let event: Event = serde_json::from_str(&line)
            .map_err(|e| MetricsError::MalformedEvent(format!("{line}: {e}")))?;
        events.push(event);
    }
    Ok(events)
}

/// Rebuilds an [`Aggregator`] from scratch by replaying every event in the
/// log file, from byte offset zero, into a fresh aggregator of the given
/// shape.
pub fn replay_into_aggregator<P: AsRef<Path>>(
    path: P,
    bins: usize,
    duration_s: f64,
    agent_count: u32,
) -> MetricsResult<Aggregator> {
    let mut aggregator = Aggregator::new(bins, duration_s, agent_count);
    for event in read_all_events(path)? {
        aggregator.record(event);
    }
    Ok(aggregator)
}
