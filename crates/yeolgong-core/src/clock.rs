//! Wall clock and background drift correction.
//!
//! Periodic ticks stop while the host app is suspended. Instead of replaying
//! missed ticks, the engine records the instant it was backgrounded and, on
//! return, advances every running timer by the whole-second gap in one step.
//!
//! The corrector never produces a negative gap: an unavailable clock, or a
//! reading earlier than the suspension instant or the last observed reading,
//! yields a zero gap.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use tracing::warn;

/// Source of wall-clock time. `None` means the clock is unavailable.
pub trait Clock {
    fn now(&self) -> Option<DateTime<Utc>>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Option<DateTime<Utc>> {
        Some(Utc::now())
    }
}

/// A settable clock shared between clones. Used by tests and by hosts that
/// drive time themselves.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    inner: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl ManualClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Some(now))),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(now);
    }

    /// Move forward (or backward, for a negative count) by `secs` seconds.
    pub fn advance_secs(&self, secs: i64) {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(now) = guard.as_mut() {
            *now += Duration::seconds(secs);
        }
    }

    /// Make the clock report itself unavailable.
    pub fn make_unavailable(&self) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Option<DateTime<Utc>> {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Whole seconds from `from` to `to`, zero when `to` is earlier.
pub fn whole_secs_between(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    u64::try_from((to - from).num_seconds()).unwrap_or(0)
}

/// Outcome of returning to the foreground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resumed {
    /// Seconds to apply to every running timer.
    pub gap_secs: u64,
    /// False when there was no suspension to resume from.
    pub was_suspended: bool,
    /// The suspension instant that was consumed.
    pub since: Option<DateTime<Utc>>,
    /// False when the gap was zeroed by a clock anomaly.
    pub measured: bool,
}

/// Tracks the suspension instant and the last trusted clock reading.
#[derive(Debug, Clone, Default)]
pub struct DriftCorrector {
    suspended_at: Option<DateTime<Utc>>,
    last_observed: Option<DateTime<Utc>>,
}

impl DriftCorrector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn suspended_at(&self) -> Option<DateTime<Utc>> {
        self.suspended_at
    }

    pub fn last_observed(&self) -> Option<DateTime<Utc>> {
        self.last_observed
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended_at.is_some()
    }

    /// Accept a clock reading if it is available and not behind the last
    /// accepted one. Returns the accepted instant.
    pub fn observe(&mut self, reading: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
        let now = reading?;
        if self.last_observed.is_some_and(|last| now < last) {
            return None;
        }
        self.last_observed = Some(now);
        Some(now)
    }

    /// Record that the app went to the background.
    pub fn suspend(&mut self, reading: Option<DateTime<Utc>>) {
        if self.suspended_at.is_some() {
            // Already suspended; keep the earliest instant.
            return;
        }
        match self.observe(reading) {
            Some(now) => self.suspended_at = Some(now),
            None => warn!("clock unavailable at suspension; foreground gap will be zero"),
        }
    }

    /// Restore a suspension instant persisted by a previous process.
    pub fn rearm(&mut self, suspended_at: DateTime<Utc>) {
        self.suspended_at = Some(suspended_at);
        if self.last_observed.map_or(true, |last| last < suspended_at) {
            self.last_observed = Some(suspended_at);
        }
    }

    /// Consume the suspension and compute the catch-up gap. Calling this again
    /// without a new [`suspend`](Self::suspend) yields a zero gap.
    pub fn resume(&mut self, reading: Option<DateTime<Utc>>) -> Resumed {
        let Some(since) = self.suspended_at.take() else {
            return Resumed {
                gap_secs: 0,
                was_suspended: false,
                since: None,
                measured: false,
            };
        };

        let (gap_secs, measured) = match self.observe(reading) {
            Some(now) if now >= since => (whole_secs_between(since, now), true),
            Some(now) => {
                warn!("clock reads {now}, before suspension at {since}; skipping correction");
                (0, false)
            }
            None => {
                warn!("clock unavailable or went backwards on resume; skipping correction");
                (0, false)
            }
        };

        Resumed {
            gap_secs,
            was_suspended: true,
            since: Some(since),
            measured,
        }
    }
}
