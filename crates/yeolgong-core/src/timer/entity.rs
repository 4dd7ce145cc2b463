//! Timer entity and its state machine.
//!
//! ```text
//! Running <-> Paused
//!    |          |
//!    +----> Completed (terminal until restart/reset)
//! ```
//!
//! Disallowed transitions are no-ops that report `false`. Fields are only
//! writable from the `timer` module, so the registry is the single writer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::density::{DensityInput, TimerResult};
use crate::error::ValidationError;
use crate::session::SessionMode;

/// Every Nth completed work set is followed by a long break.
pub const LONG_BREAK_EVERY: u32 = 4;

const DEFAULT_LABEL: &str = "Timer";
const DEFAULT_COLOR: &str = "#FF6B9D";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(String);

impl TimerId {
    pub fn generate() -> Self {
        Self(format!("tmr_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TimerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TimerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Running,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PomodoroPhase {
    Work,
    Break,
    LongBreak,
}

/// Kind-specific timing state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TimerKind {
    /// Stopwatch; runs until stopped.
    Free,
    Countdown {
        target_secs: u64,
    },
    /// Cycles work/break phases; never completes on its own.
    Pomodoro {
        work_minutes: u32,
        break_minutes: u32,
        #[serde(default)]
        long_break_minutes: Option<u32>,
        phase: PomodoroPhase,
        set_index: u32,
    },
}

impl TimerKind {
    pub fn mode(&self) -> SessionMode {
        match self {
            TimerKind::Free => SessionMode::Free,
            TimerKind::Countdown { .. } => SessionMode::Countdown,
            TimerKind::Pomodoro { .. } => SessionMode::Pomodoro,
        }
    }

    /// Target of the current run or phase; `None` for free timers.
    pub fn target_secs(&self) -> Option<u64> {
        match self {
            TimerKind::Free => None,
            TimerKind::Countdown { target_secs } => Some(*target_secs),
            TimerKind::Pomodoro {
                work_minutes,
                break_minutes,
                long_break_minutes,
                phase,
                ..
            } => {
                let minutes = match phase {
                    PomodoroPhase::Work => *work_minutes,
                    PomodoroPhase::Break => *break_minutes,
                    PomodoroPhase::LongBreak => long_break_minutes.unwrap_or(*break_minutes),
                };
                Some(u64::from(minutes) * 60)
            }
        }
    }

    pub fn phase(&self) -> Option<PomodoroPhase> {
        match self {
            TimerKind::Pomodoro { phase, .. } => Some(*phase),
            _ => None,
        }
    }

    pub fn set_index(&self) -> Option<u32> {
        match self {
            TimerKind::Pomodoro { set_index, .. } => Some(*set_index),
            _ => None,
        }
    }
}

/// What kind of timer to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum KindSpec {
    Free,
    Countdown {
        target_secs: u64,
    },
    Pomodoro {
        work_minutes: u32,
        break_minutes: u32,
        #[serde(default)]
        long_break_minutes: Option<u32>,
    },
}

/// Request to create a timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSpec {
    pub kind: KindSpec,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub subject_id: Option<String>,
    /// Earn the ultra-focus bonus when the run finishes without pauses or
    /// app exits.
    #[serde(default)]
    pub ultra_focus: bool,
}

impl TimerSpec {
    fn of(kind: KindSpec) -> Self {
        Self {
            kind,
            label: None,
            color: None,
            subject_id: None,
            ultra_focus: false,
        }
    }

    pub fn free() -> Self {
        Self::of(KindSpec::Free)
    }

    pub fn countdown(target_secs: u64) -> Self {
        Self::of(KindSpec::Countdown { target_secs })
    }

    pub fn pomodoro(work_minutes: u32, break_minutes: u32) -> Self {
        Self::of(KindSpec::Pomodoro {
            work_minutes,
            break_minutes,
            long_break_minutes: None,
        })
    }

    pub fn with_long_break(mut self, minutes: u32) -> Self {
        if let KindSpec::Pomodoro {
            long_break_minutes, ..
        } = &mut self.kind
        {
            *long_break_minutes = Some(minutes);
        }
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.subject_id = Some(subject_id.into());
        self
    }

    pub fn with_ultra_focus(mut self) -> Self {
        self.ultra_focus = true;
        self
    }

    /// Reject zero durations and anything longer than `max_secs`.
    pub fn validate(&self, max_secs: u64) -> Result<(), ValidationError> {
        let check = |field: &'static str, secs: u64| {
            if secs == 0 {
                Err(ValidationError::ZeroDuration { field })
            } else if secs > max_secs {
                Err(ValidationError::DurationTooLong {
                    field,
                    value: secs,
                    max: max_secs,
                })
            } else {
                Ok(())
            }
        };

        match &self.kind {
            KindSpec::Free => Ok(()),
            KindSpec::Countdown { target_secs } => check("target_secs", *target_secs),
            KindSpec::Pomodoro {
                work_minutes,
                break_minutes,
                long_break_minutes,
            } => {
                check("work_minutes", u64::from(*work_minutes) * 60)?;
                check("break_minutes", u64::from(*break_minutes) * 60)?;
                if let Some(long) = long_break_minutes {
                    check("long_break_minutes", u64::from(*long) * 60)?;
                }
                Ok(())
            }
        }
    }
}

/// A live timer. Owned by [`TimerRegistry`](super::TimerRegistry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub(super) id: TimerId,
    pub(super) kind: TimerKind,
    pub(super) status: TimerStatus,
    pub(super) label: String,
    pub(super) color: String,
    #[serde(default)]
    pub(super) subject_id: Option<String>,
    pub(super) elapsed_secs: u64,
    pub(super) pause_count: u32,
    #[serde(default)]
    pub(super) app_exit_count: u32,
    #[serde(default)]
    pub(super) quick_return_count: u32,
    #[serde(default)]
    pub(super) ultra_focus: bool,
    #[serde(default)]
    pub(super) result: Option<TimerResult>,
    pub(super) created_at: DateTime<Utc>,
}

impl Timer {
    /// Build a running timer from an already-validated spec.
    pub(super) fn new(spec: TimerSpec, now: DateTime<Utc>) -> Self {
        let kind = match spec.kind {
            KindSpec::Free => TimerKind::Free,
            KindSpec::Countdown { target_secs } => TimerKind::Countdown { target_secs },
            KindSpec::Pomodoro {
                work_minutes,
                break_minutes,
                long_break_minutes,
            } => TimerKind::Pomodoro {
                work_minutes,
                break_minutes,
                long_break_minutes,
                phase: PomodoroPhase::Work,
                set_index: 0,
            },
        };
        Self {
            id: TimerId::generate(),
            kind,
            status: TimerStatus::Running,
            label: spec.label.unwrap_or_else(|| DEFAULT_LABEL.into()),
            color: spec.color.unwrap_or_else(|| DEFAULT_COLOR.into()),
            subject_id: spec.subject_id,
            elapsed_secs: 0,
            pause_count: 0,
            app_exit_count: 0,
            quick_return_count: 0,
            ultra_focus: spec.ultra_focus,
            result: None,
            created_at: now,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn id(&self) -> &TimerId {
        &self.id
    }

    pub fn kind(&self) -> &TimerKind {
        &self.kind
    }

    pub fn mode(&self) -> SessionMode {
        self.kind.mode()
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.subject_id.as_deref()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn pause_count(&self) -> u32 {
        self.pause_count
    }

    pub fn app_exit_count(&self) -> u32 {
        self.app_exit_count
    }

    pub fn quick_return_count(&self) -> u32 {
        self.quick_return_count
    }

    pub fn ultra_focus(&self) -> bool {
        self.ultra_focus
    }

    pub fn result(&self) -> Option<&TimerResult> {
        self.result.as_ref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Why this timer cannot be advanced, if it is corrupt.
    pub fn integrity_fault(&self) -> Option<&'static str> {
        match &self.kind {
            TimerKind::Free => None,
            TimerKind::Countdown { target_secs: 0 } => Some("countdown target is zero"),
            TimerKind::Countdown { target_secs } if self.elapsed_secs > *target_secs => {
                Some("countdown elapsed beyond target")
            }
            TimerKind::Countdown { .. } => None,
            TimerKind::Pomodoro {
                work_minutes,
                break_minutes,
                ..
            } if *work_minutes == 0 || *break_minutes == 0 => Some("pomodoro phase length is zero"),
            TimerKind::Pomodoro { .. } => match self.kind.target_secs() {
                Some(0) => Some("pomodoro phase length is zero"),
                Some(target) if self.elapsed_secs > target => Some("phase elapsed beyond target"),
                _ => None,
            },
        }
    }

    /// Counters for scoring the current run.
    pub(super) fn density_input(&self, total_secs: u64, finished: bool) -> DensityInput {
        DensityInput {
            pause_count: self.pause_count,
            app_exit_count: self.app_exit_count,
            quick_return_count: self.quick_return_count,
            total_secs,
            ultra_focus_completed: finished && self.earned_ultra_focus(),
        }
    }

    fn earned_ultra_focus(&self) -> bool {
        self.ultra_focus && self.pause_count == 0 && self.app_exit_count == 0
    }

    // ── Transitions ──────────────────────────────────────────────────

    pub(super) fn pause(&mut self) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.status = TimerStatus::Paused;
        self.pause_count += 1;
        true
    }

    pub(super) fn resume(&mut self) -> bool {
        if self.status != TimerStatus::Paused {
            return false;
        }
        self.status = TimerStatus::Running;
        true
    }

    /// Enter `Completed`. The first result sticks.
    pub(super) fn complete(&mut self, result: TimerResult) {
        self.status = TimerStatus::Completed;
        if self.result.is_none() {
            self.result = Some(result);
        }
    }

    /// Back to a fresh run in the given status.
    pub(super) fn rewind(&mut self, status: TimerStatus) {
        self.elapsed_secs = 0;
        self.clear_counters();
        self.result = None;
        if let TimerKind::Pomodoro {
            phase, set_index, ..
        } = &mut self.kind
        {
            *phase = PomodoroPhase::Work;
            *set_index = 0;
        }
        self.status = status;
    }

    /// Move to the next pomodoro phase. Returns `(from, to, set_index)`.
    pub(super) fn flip_phase(&mut self) -> Option<(PomodoroPhase, PomodoroPhase, u32)> {
        let TimerKind::Pomodoro {
            phase, set_index, ..
        } = &mut self.kind
        else {
            return None;
        };
        let from = *phase;
        let to = match from {
            PomodoroPhase::Work => {
                *set_index += 1;
                if *set_index % LONG_BREAK_EVERY == 0 {
                    PomodoroPhase::LongBreak
                } else {
                    PomodoroPhase::Break
                }
            }
            PomodoroPhase::Break | PomodoroPhase::LongBreak => PomodoroPhase::Work,
        };
        *phase = to;
        let set_index = *set_index;
        self.elapsed_secs = 0;
        self.clear_counters();
        Some((from, to, set_index))
    }

    fn clear_counters(&mut self) {
        self.pause_count = 0;
        self.app_exit_count = 0;
        self.quick_return_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::<Utc>::default()
    }

    #[test]
    fn pause_only_from_running() {
        let mut t = Timer::new(TimerSpec::free(), now());
        assert!(t.pause());
        assert_eq!(t.pause_count(), 1);
        assert!(!t.pause());
        assert_eq!(t.pause_count(), 1);
        assert!(t.resume());
        assert!(!t.resume());
    }

    #[test]
    fn completed_result_is_kept() {
        let mut t = Timer::new(TimerSpec::countdown(60), now());
        t.complete(TimerResult {
            density: 97,
            tier: "S+".into(),
        });
        t.complete(TimerResult {
            density: 40,
            tier: "F".into(),
        });
        assert_eq!(t.result().map(|r| r.density), Some(97));
    }

    #[test]
    fn phase_cycle_places_long_break_every_fourth_set() {
        let mut t = Timer::new(TimerSpec::pomodoro(25, 5), now());
        let mut breaks = Vec::new();
        for _ in 0..4 {
            let (_, to, _) = t.flip_phase().unwrap();
            breaks.push(to);
            let (_, back, _) = t.flip_phase().unwrap();
            assert_eq!(back, PomodoroPhase::Work);
        }
        assert_eq!(
            breaks,
            vec![
                PomodoroPhase::Break,
                PomodoroPhase::Break,
                PomodoroPhase::Break,
                PomodoroPhase::LongBreak
            ]
        );
        assert_eq!(t.kind().set_index(), Some(4));
    }

    #[test]
    fn long_break_falls_back_to_break_length() {
        let mut t = Timer::new(TimerSpec::pomodoro(25, 5), now());
        if let TimerKind::Pomodoro { phase, .. } = &mut t.kind {
            *phase = PomodoroPhase::LongBreak;
        }
        assert_eq!(t.kind().target_secs(), Some(300));

        let mut t = Timer::new(TimerSpec::pomodoro(25, 5).with_long_break(15), now());
        if let TimerKind::Pomodoro { phase, .. } = &mut t.kind {
            *phase = PomodoroPhase::LongBreak;
        }
        assert_eq!(t.kind().target_secs(), Some(900));
    }

    #[test]
    fn rewind_clears_run_state() {
        let mut t = Timer::new(TimerSpec::pomodoro(25, 5), now());
        t.elapsed_secs = 42;
        t.pause();
        t.flip_phase();
        t.complete(TimerResult {
            density: 90,
            tier: "S".into(),
        });
        t.rewind(TimerStatus::Paused);
        assert_eq!(t.status(), TimerStatus::Paused);
        assert_eq!(t.elapsed_secs(), 0);
        assert_eq!(t.pause_count(), 0);
        assert_eq!(t.kind().phase(), Some(PomodoroPhase::Work));
        assert_eq!(t.kind().set_index(), Some(0));
        assert!(t.result().is_none());
    }

    #[test]
    fn validate_rejects_zero_and_oversized() {
        assert_eq!(
            TimerSpec::countdown(0).validate(86_400),
            Err(ValidationError::ZeroDuration {
                field: "target_secs"
            })
        );
        assert!(matches!(
            TimerSpec::countdown(100_000).validate(86_400),
            Err(ValidationError::DurationTooLong { .. })
        ));
        assert!(TimerSpec::pomodoro(25, 0).validate(86_400).is_err());
        assert!(TimerSpec::pomodoro(25, 5).validate(86_400).is_ok());
        assert!(TimerSpec::free().validate(86_400).is_ok());
    }

    #[test]
    fn ultra_focus_requires_clean_run() {
        let mut t = Timer::new(TimerSpec::countdown(600).with_ultra_focus(), now());
        assert!(t.density_input(600, true).ultra_focus_completed);
        assert!(!t.density_input(600, false).ultra_focus_completed);
        t.pause();
        assert!(!t.density_input(600, true).ultra_focus_completed);
    }

    #[test]
    fn integrity_detects_corrupt_targets() {
        let mut t = Timer::new(TimerSpec::countdown(60), now());
        assert!(t.integrity_fault().is_none());
        t.kind = TimerKind::Countdown { target_secs: 0 };
        assert!(t.integrity_fault().is_some());
    }
}
