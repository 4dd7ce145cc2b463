//! Derived, read-only values over a [`Timer`].
//!
//! Remaining time, progress, warnings and display strings are computed here
//! and nowhere else.

use serde::{Deserialize, Serialize};

use super::entity::{PomodoroPhase, Timer, TimerId, TimerStatus};
use crate::density::TimerResult;
use crate::session::SessionMode;

/// Remaining-time alerts, fired once per run or phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWarning {
    FiveMinutesLeft,
    OneMinuteLeft,
}

impl TimeWarning {
    pub fn threshold_secs(self) -> u64 {
        match self {
            TimeWarning::FiveMinutesLeft => 300,
            TimeWarning::OneMinuteLeft => 60,
        }
    }
}

pub fn target_secs(timer: &Timer) -> Option<u64> {
    timer.kind().target_secs()
}

pub fn remaining_secs(timer: &Timer) -> Option<u64> {
    target_secs(timer).map(|target| target.saturating_sub(timer.elapsed_secs()))
}

/// 0.0 ..= 1.0 within the current run or phase; 0.0 for free timers.
pub fn progress(timer: &Timer) -> f64 {
    match target_secs(timer) {
        Some(target) if target > 0 => (timer.elapsed_secs() as f64 / target as f64).min(1.0),
        _ => 0.0,
    }
}

/// The tightest warning crossed while elapsed moved from `before` to `after`.
/// Nothing fires on the step that reaches the target itself, or for targets
/// too short for the threshold to mean anything.
pub fn crossed_warning(target: u64, before: u64, after: u64) -> Option<TimeWarning> {
    if after >= target {
        return None;
    }
    let remaining_before = target.saturating_sub(before);
    let remaining_after = target - after;
    [TimeWarning::OneMinuteLeft, TimeWarning::FiveMinutesLeft]
        .into_iter()
        .find(|w| {
            let t = w.threshold_secs();
            target > t && remaining_before > t && remaining_after <= t
        })
}

/// `MM:SS`, or `H:MM:SS` from one hour up.
pub fn format_clock(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m:02}:{s:02}")
    }
}

/// Short human duration such as `1h 5m`, `2h` or `45m`.
pub fn format_short(secs: u64) -> String {
    let (h, m) = (secs / 3600, (secs % 3600) / 60);
    match (h, m) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// Owned UI row for one timer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerView {
    pub id: TimerId,
    pub label: String,
    pub color: String,
    pub subject_id: Option<String>,
    pub mode: SessionMode,
    pub status: TimerStatus,
    pub elapsed_secs: u64,
    pub target_secs: Option<u64>,
    pub remaining_secs: Option<u64>,
    pub progress: f64,
    /// Countdown-style display for targeted timers, stopwatch for free ones.
    pub display: String,
    pub phase: Option<PomodoroPhase>,
    pub set_index: Option<u32>,
    pub pause_count: u32,
    pub result: Option<TimerResult>,
}

impl From<&Timer> for TimerView {
    fn from(timer: &Timer) -> Self {
        let remaining = remaining_secs(timer);
        Self {
            id: timer.id().clone(),
            label: timer.label().to_string(),
            color: timer.color().to_string(),
            subject_id: timer.subject_id().map(str::to_string),
            mode: timer.mode(),
            status: timer.status(),
            elapsed_secs: timer.elapsed_secs(),
            target_secs: target_secs(timer),
            remaining_secs: remaining,
            progress: progress(timer),
            display: format_clock(remaining.unwrap_or(timer.elapsed_secs())),
            phase: timer.kind().phase(),
            set_index: timer.kind().set_index(),
            pause_count: timer.pause_count(),
            result: timer.result().cloned(),
        }
    }
}
