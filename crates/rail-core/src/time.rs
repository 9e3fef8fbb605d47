//! Simulation time model.
//!
//! # Design
//!
//! Time is a logical integer-second clock.  `SimTime(0)` is simulated
//! midnight; values may be negative (a train leaving at 00:10 starts its
//! assembly at 23:40 the previous evening) and may exceed one day.  Nothing
//! here reads the host clock; the driving caller owns time.
//!
//! Using whole seconds keeps every schedule offset exact: the lifecycle
//! offsets (+10 min, +20 min, −30 min) are integer multiples of 60.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult};

pub const SECS_PER_MINUTE: i64 = 60;
pub const SECS_PER_HOUR:   i64 = 3_600;
pub const SECS_PER_DAY:    i64 = 86_400;

/// Seconds spanned by `n` minutes.
#[inline]
pub const fn minutes(n: i64) -> i64 {
    n * SECS_PER_MINUTE
}

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An instant on the simulated timeline, in seconds since simulated midnight.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub i64);

impl SimTime {
    pub const MIDNIGHT: SimTime = SimTime(0);

    /// Build an instant from a wall-clock-of-day hour and minute.
    #[inline]
    pub const fn from_hm(hour: i64, minute: i64) -> SimTime {
        SimTime(hour * SECS_PER_HOUR + minute * SECS_PER_MINUTE)
    }

    /// Seconds elapsed from `earlier` to `self` (negative if `earlier` is later).
    #[inline]
    pub fn since(self, earlier: SimTime) -> i64 {
        self.0 - earlier.0
    }

    /// Wall-clock-of-day `(hour, minute)`, wrapping across midnight.
    pub fn hour_minute(self) -> (u32, u32) {
        let of_day = self.0.rem_euclid(SECS_PER_DAY);
        ((of_day / SECS_PER_HOUR) as u32, ((of_day % SECS_PER_HOUR) / SECS_PER_MINUTE) as u32)
    }
}

impl std::ops::Add<i64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: i64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::AddAssign<i64> for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: i64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub<i64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn sub(self, rhs: i64) -> SimTime {
        SimTime(self.0 - rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = i64;
    #[inline]
    fn sub(self, rhs: SimTime) -> i64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m) = self.hour_minute();
        f.pad(&format!("{h:02}:{m:02}"))
    }
}

/// Parses `HH:MM` (24-hour clock).
impl FromStr for SimTime {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<SimTime> {
        let bad = || CoreError::Parse(format!("invalid clock time {s:?}: expected HH:MM"));
        let (h, m) = s.trim().split_once(':').ok_or_else(bad)?;
        let hour: i64 = h.parse().map_err(|_| bad())?;
        let minute: i64 = m.parse().map_err(|_| bad())?;
        if !(0..24).contains(&hour) || !(0..60).contains(&minute) {
            return Err(bad());
        }
        Ok(SimTime::from_hm(hour, minute))
    }
}

/// Render a delay as `HH:MM`, widening the hour field past two digits when
/// needed.  Negative delays are rendered with a leading `-`.
pub fn format_delay(secs: i64) -> String {
    let sign = if secs < 0 { "-" } else { "" };
    let secs = secs.unsigned_abs();
    let hours = secs / SECS_PER_HOUR as u64;
    let mins = (secs / SECS_PER_MINUTE as u64) % 60;
    format!("{sign}{hours:02}:{mins:02}")
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The three instants a simulation run is steered by.
///
/// `current` is moved by the driver (interval stepping, jump to next event,
/// finish) and by the dispatcher when it executes an event past the horizon.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Events before this instant are recorded but not sent to the log sink.
    pub start:   SimTime,
    /// The caller-controlled "now".
    pub current: SimTime,
    /// The horizon past which dispatch is throttled.
    pub stop:    SimTime,
}

impl SimClock {
    /// A clock positioned at `start`.
    pub fn new(start: SimTime, stop: SimTime) -> Self {
        Self { start, current: start, stop }
    }

    /// Move `current` forward by `secs`.
    #[inline]
    pub fn advance(&mut self, secs: i64) {
        self.current += secs;
    }

    #[inline]
    pub fn past_horizon(&self) -> bool {
        self.current >= self.stop
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (start {}, stop {})", self.current, self.start, self.stop)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// How much detail the log sink renders per executed event.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verbosity {
    /// One line per event.
    #[default]
    Low,
    /// Event header, vehicle lists and average speed.
    High,
}

/// Top-level simulation configuration.
///
/// Typically built by the application crate (or deserialized with the
/// `serde` feature) and handed to the simulation builder.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// First instant whose events reach the log sink.  Default 00:00.
    pub start_time: SimTime,

    /// Dispatch horizon.  Default 23:59.
    pub stop_time: SimTime,

    /// Step used by interval-driven runs, in seconds.  Default 600 (10 min).
    pub interval_secs: i64,

    /// Detail level forwarded to the log sink.
    pub verbosity: Verbosity,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            start_time:    SimTime::MIDNIGHT,
            stop_time:     SimTime(SECS_PER_DAY - SECS_PER_MINUTE),
            interval_secs: minutes(10),
            verbosity:     Verbosity::Low,
        }
    }
}

impl SimConfig {
    /// Reject configurations the driver cannot make progress with.
    pub fn validate(&self) -> CoreResult<()> {
        if self.stop_time < self.start_time {
            return Err(CoreError::Config(format!(
                "stop time {} is before start time {}",
                self.stop_time, self.start_time
            )));
        }
        if self.interval_secs <= 0 {
            return Err(CoreError::Config(format!(
                "interval must be positive, got {} s",
                self.interval_secs
            )));
        }
        Ok(())
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.start_time, self.stop_time)
    }
}
