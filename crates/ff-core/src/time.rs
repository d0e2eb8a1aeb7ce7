//! Simulation time model.
//!
//! Time is represented as a monotonically increasing `Tick` counter mapped to
//! simulated seconds via `SimClock`:
//!
//!   elapsed_s = tick * tick_seconds
//!
//! Using an integer tick as the canonical step unit keeps the tick loop exact
//! (no drift from repeatedly adding a fractional duration) while still
//! allowing a sub-second tick (the typical case here is 0.5 simulated
//! seconds per tick).

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
#[derive(Clone, Copy, Debug)]
pub struct SimClock {
    /// Simulated seconds represented by one tick. Typically `0.5`.
    pub tick_seconds: f64,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(tick_seconds: f64) -> Self {
        Self {
            tick_seconds,
            current_tick: Tick::ZERO,
        }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.tick_seconds
    }

    /// How many ticks span `secs` simulated seconds (rounds up).
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        (secs / self.tick_seconds).ceil().max(0.0) as u64
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── RunConfig ─────────────────────────────────────────────────────────────────

/// Per-scenario run configuration, constructed once by the caller (the
/// experiment runner) and passed by reference into the simulation loop.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Master RNG seed for this scenario run.
    pub seed: u64,
    /// Simulated duration of the run, in seconds.
    pub duration_s: f64,
    /// Number of agents to simulate.
    pub agent_count: u32,
    /// Number of time bins in the metrics series. Default 25.
    pub bins: usize,
    /// Simulated seconds represented by one tick. Default 0.5.
    pub tick_seconds: f64,
    /// Per-oracle-call timeout, in seconds. Default 30.
    pub oracle_timeout_s: f64,
    /// Wall-vs-simulated time scaling factor passed to the oracle context.
    pub speed: f64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            duration_s: 3_600.0,
            agent_count: 50,
            bins: 25,
            tick_seconds: 0.5,
            oracle_timeout_s: 30.0,
            speed: 1.0,
        }
    }
}

impl RunConfig {
    /// Total number of ticks this run will execute (its termination bound).
    #[inline]
    pub fn total_ticks(&self) -> u64 {
        (self.duration_s / self.tick_seconds).ceil().max(0.0) as u64
    }

    /// Width of one metrics bin, in simulated seconds.
    #[inline]
    pub fn bin_width(&self) -> f64 {
        self.duration_s / self.bins as f64
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_seconds)
    }
}
