use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::density::TimerResult;
use crate::session::SessionMode;
use crate::timer::{PomodoroPhase, TimeWarning, TimerId};

/// Every state change in the engine produces an Event.
/// The UI drains them after each call; alerts are also handed to the
/// notifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerCreated {
        timer_id: TimerId,
        mode: SessionMode,
        at: DateTime<Utc>,
    },
    TimerPaused {
        timer_id: TimerId,
        elapsed_secs: u64,
        pause_count: u32,
        at: DateTime<Utc>,
    },
    TimerResumed {
        timer_id: TimerId,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// A countdown reached its target.
    TimerCompleted {
        timer_id: TimerId,
        label: String,
        duration_secs: u64,
        result: TimerResult,
        at: DateTime<Utc>,
    },
    /// The user ended a timer explicitly.
    TimerStopped {
        timer_id: TimerId,
        mode: SessionMode,
        elapsed_secs: u64,
        result: TimerResult,
        at: DateTime<Utc>,
    },
    /// A pomodoro moved between work and break.
    PhaseFlipped {
        timer_id: TimerId,
        label: String,
        from: PomodoroPhase,
        to: PomodoroPhase,
        set_index: u32,
        at: DateTime<Utc>,
    },
    /// Remaining time crossed a warning threshold.
    TimeWarning {
        timer_id: TimerId,
        label: String,
        warning: TimeWarning,
        at: DateTime<Utc>,
    },
    TimerRestarted {
        timer_id: TimerId,
        at: DateTime<Utc>,
    },
    TimerReset {
        timer_id: TimerId,
        at: DateTime<Utc>,
    },
    TimerRemoved {
        timer_id: TimerId,
        at: DateTime<Utc>,
    },
    /// A timer failed its integrity check and was forced to completion.
    TimerFaulted {
        timer_id: TimerId,
        reason: String,
        at: DateTime<Utc>,
    },
    SessionRecorded {
        session_id: String,
        subject_id: Option<String>,
        mode: SessionMode,
        duration_secs: u64,
        focus_density: u32,
        tier: String,
        streak: u32,
        at: DateTime<Utc>,
    },
    AppBackgrounded {
        running_timers: usize,
        at: DateTime<Utc>,
    },
    AppForegrounded {
        gap_secs: u64,
        quick_return: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Events worth an OS-level alert (sound, vibration, banner).
    pub fn is_alert(&self) -> bool {
        matches!(
            self,
            Event::TimerCompleted { .. } | Event::PhaseFlipped { .. } | Event::TimeWarning { .. }
        )
    }

    pub fn timer_id(&self) -> Option<&TimerId> {
        match self {
            Event::TimerCreated { timer_id, .. }
            | Event::TimerPaused { timer_id, .. }
            | Event::TimerResumed { timer_id, .. }
            | Event::TimerCompleted { timer_id, .. }
            | Event::TimerStopped { timer_id, .. }
            | Event::PhaseFlipped { timer_id, .. }
            | Event::TimeWarning { timer_id, .. }
            | Event::TimerRestarted { timer_id, .. }
            | Event::TimerReset { timer_id, .. }
            | Event::TimerRemoved { timer_id, .. }
            | Event::TimerFaulted { timer_id, .. } => Some(timer_id),
            Event::SessionRecorded { .. }
            | Event::AppBackgrounded { .. }
            | Event::AppForegrounded { .. } => None,
        }
    }
}
