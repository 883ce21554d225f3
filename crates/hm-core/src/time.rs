//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to simulated seconds is held in `SimClock`:
//!
//!   sim_time_s = tick * tick_duration_ms / 1000
//!
//! Using an integer tick as the canonical time unit means all period
//! arithmetic is exact (no floating-point drift) and comparisons are O(1).
//! Fractional seconds appear only at the trace boundary.
//!
//! The default tick duration is 100 ms, which makes the reference periods
//! exact integer multiples: flow sampling (0.1 s) = 1 tick, position and
//! signal sampling (0.5 s) = 5 ticks, the watchdog (2 s) = 20 ticks.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
///
/// Stored as `u64` to avoid overflow: at 100 ms per tick a u64 lasts
/// ~58 billion years, far longer than any conceivable run.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
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
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// How many milliseconds one tick represents.  Default: 100.
    pub tick_duration_ms: u32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    /// Create a clock at tick 0 with the given resolution.
    pub fn new(tick_duration_ms: u32) -> Self {
        Self {
            tick_duration_ms,
            current_tick: Tick::ZERO,
        }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Simulated seconds elapsed since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.secs_at(self.current_tick)
    }

    /// Simulated seconds corresponding to an arbitrary tick.
    #[inline]
    pub fn secs_at(&self, tick: Tick) -> f64 {
        tick.0 as f64 * self.tick_duration_ms as f64 / 1000.0
    }

    /// Seconds represented by one tick.
    #[inline]
    pub fn tick_secs(&self) -> f64 {
        self.tick_duration_ms as f64 / 1000.0
    }

    // ── Tick-count helpers ────────────────────────────────────────────────

    /// How many ticks span `secs` seconds?  Rounds to the nearest tick and
    /// never returns 0, so a period shorter than one tick still reschedules.
    #[inline]
    pub fn ticks_for_secs(&self, secs: f64) -> u64 {
        let ticks = (secs * 1000.0 / self.tick_duration_ms as f64).round();
        (ticks as u64).max(1)
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.1}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation time configuration.
///
/// Typically constructed by the application crate and passed to the
/// simulation builder.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Milliseconds per tick.  Must evenly divide every configured period
    /// for the tick arithmetic to remain exact.  Default: 100.
    pub tick_duration_ms: u32,

    /// Simulation horizon in ticks (exclusive upper bound).  Periodic tasks
    /// stop rescheduling once their next invocation would fall at or past
    /// this tick.  For the 14.5 s reference horizon at 100 ms: 145.
    pub horizon_ticks: u64,

    /// Master RNG seed for collaborators that inject randomness (e.g. a
    /// synthetic traffic probe).  The measurement core itself is
    /// deterministic.
    pub seed: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.horizon_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms: 100,
            horizon_ticks:    145,
            seed:             42,
        }
    }
}
