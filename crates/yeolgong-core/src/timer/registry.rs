//! The timer registry.
//!
//! Owns every live [`Timer`] and advances them as one batch per tick. The
//! registry never performs side effects: completions, phase flips and
//! session-recording requests are queued as [`Effect`]s, in creation order,
//! for the caller to drain after the call returns.
//!
//! ## Usage
//!
//! ```ignore
//! let mut registry = TimerRegistry::new(DensityScorer::default(), 86_400);
//! let id = registry.create_timer(TimerSpec::countdown(300), now)?;
//! registry.tick(now);
//! for effect in registry.drain_effects() { /* notify, record */ }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::entity::{PomodoroPhase, Timer, TimerId, TimerKind, TimerSpec, TimerStatus};
use super::projection::{crossed_warning, TimerView};
use crate::density::DensityScorer;
use crate::error::Result;
use crate::events::Event;
use crate::session::SessionMode;

/// Countdowns shorter than this are not worth a session on completion.
pub const COUNTDOWN_RECORD_MIN_SECS: u64 = 10;
/// Explicit stops shorter than this are discarded.
pub const STOP_RECORD_MIN_SECS: u64 = 30;

/// Everything the recorder needs to turn a finished run into a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRequest {
    pub timer_id: Option<TimerId>,
    pub subject_id: Option<String>,
    pub duration_secs: u64,
    pub mode: SessionMode,
    pub pause_count: u32,
    #[serde(default)]
    pub app_exit_count: u32,
    #[serde(default)]
    pub quick_return_count: u32,
    #[serde(default)]
    pub ultra_focus_completed: bool,
    pub ended_at: DateTime<Utc>,
}

impl RecordRequest {
    fn from_timer(timer: &Timer, duration_secs: u64, finished: bool, at: DateTime<Utc>) -> Self {
        let input = timer.density_input(duration_secs, finished);
        Self {
            timer_id: Some(timer.id().clone()),
            subject_id: timer.subject_id().map(str::to_string),
            duration_secs,
            mode: timer.mode(),
            pause_count: input.pause_count,
            app_exit_count: input.app_exit_count,
            quick_return_count: input.quick_return_count,
            ultra_focus_completed: input.ultra_focus_completed,
            ended_at: at,
        }
    }
}

/// A side effect requested by the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify(Event),
    RecordSession(RecordRequest),
}

/// Authoritative collection of timers, in creation order.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    timers: Vec<Timer>,
    effects: Vec<Effect>,
    scorer: DensityScorer,
    max_duration_secs: u64,
}

impl TimerRegistry {
    pub fn new(scorer: DensityScorer, max_duration_secs: u64) -> Self {
        Self {
            timers: Vec::new(),
            effects: Vec::new(),
            scorer,
            max_duration_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    pub fn get(&self, id: &TimerId) -> Option<&Timer> {
        self.timers.iter().find(|t| t.id() == id)
    }

    pub fn snapshot(&self) -> Vec<TimerView> {
        self.timers.iter().map(TimerView::from).collect()
    }

    pub fn running_count(&self) -> usize {
        self.timers.iter().filter(|t| t.is_running()).count()
    }

    pub fn running_ids(&self) -> Vec<TimerId> {
        self.timers
            .iter()
            .filter(|t| t.is_running())
            .map(|t| t.id().clone())
            .collect()
    }

    /// Elapsed seconds of the longest-running active timer.
    pub fn longest_running_secs(&self) -> u64 {
        self.timers
            .iter()
            .filter(|t| t.is_running())
            .map(Timer::elapsed_secs)
            .max()
            .unwrap_or(0)
    }

    pub fn scorer(&self) -> &DensityScorer {
        &self.scorer
    }

    /// Hand out queued effects in emission order.
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Validate `spec` and append a running timer. Nothing is added on error.
    pub fn create_timer(&mut self, spec: TimerSpec, now: DateTime<Utc>) -> Result<TimerId> {
        spec.validate(self.max_duration_secs)?;
        let timer = Timer::new(spec, now);
        let id = timer.id().clone();
        debug!("created timer {id} ({:?})", timer.mode());
        self.effects.push(Effect::Notify(Event::TimerCreated {
            timer_id: id.clone(),
            mode: timer.mode(),
            at: now,
        }));
        self.timers.push(timer);
        Ok(id)
    }

    /// Put previously persisted timers back, replacing the collection.
    /// Corrupt running timers are forced to completion.
    pub fn restore(&mut self, timers: Vec<Timer>, now: DateTime<Utc>) {
        self.timers = timers;
        for index in 0..self.timers.len() {
            self.check_integrity(index, now);
        }
    }

    pub fn pause(&mut self, id: &TimerId, now: DateTime<Utc>) -> bool {
        let Some(timer) = self.find_mut(id) else {
            return false;
        };
        if !timer.pause() {
            return false;
        }
        let event = Event::TimerPaused {
            timer_id: id.clone(),
            elapsed_secs: timer.elapsed_secs(),
            pause_count: timer.pause_count(),
            at: now,
        };
        self.effects.push(Effect::Notify(event));
        true
    }

    pub fn resume(&mut self, id: &TimerId, now: DateTime<Utc>) -> bool {
        let Some(timer) = self.find_mut(id) else {
            return false;
        };
        if !timer.resume() {
            return false;
        }
        let event = Event::TimerResumed {
            timer_id: id.clone(),
            elapsed_secs: timer.elapsed_secs(),
            at: now,
        };
        self.effects.push(Effect::Notify(event));
        true
    }

    /// End a running or paused timer. Records a session when it ran long
    /// enough.
    pub fn stop(&mut self, id: &TimerId, now: DateTime<Utc>) -> bool {
        let Self {
            timers,
            effects,
            scorer,
            ..
        } = self;
        let Some(timer) = timers.iter_mut().find(|t| t.id() == id) else {
            return false;
        };
        if timer.status() == TimerStatus::Completed {
            return false;
        }

        let elapsed = timer.elapsed_secs();
        let request = (elapsed > STOP_RECORD_MIN_SECS)
            .then(|| RecordRequest::from_timer(timer, elapsed, false, now));
        let result = scorer.evaluate(&timer.density_input(elapsed, false));
        timer.complete(result.clone());

        effects.push(Effect::Notify(Event::TimerStopped {
            timer_id: id.clone(),
            mode: timer.mode(),
            elapsed_secs: elapsed,
            result: timer.result().cloned().unwrap_or(result),
            at: now,
        }));
        if let Some(request) = request {
            effects.push(Effect::RecordSession(request));
        }
        true
    }

    /// Start a completed timer over from zero.
    pub fn restart(&mut self, id: &TimerId, now: DateTime<Utc>) -> bool {
        let Some(timer) = self.find_mut(id) else {
            return false;
        };
        if timer.status() != TimerStatus::Completed {
            return false;
        }
        timer.rewind(TimerStatus::Running);
        self.effects.push(Effect::Notify(Event::TimerRestarted {
            timer_id: id.clone(),
            at: now,
        }));
        true
    }

    /// Rewind to zero and leave the timer paused, whatever its status.
    pub fn reset(&mut self, id: &TimerId, now: DateTime<Utc>) -> bool {
        let Some(timer) = self.find_mut(id) else {
            return false;
        };
        timer.rewind(TimerStatus::Paused);
        self.effects.push(Effect::Notify(Event::TimerReset {
            timer_id: id.clone(),
            at: now,
        }));
        true
    }

    /// Drop a timer immediately. Its unrecorded run is discarded.
    pub fn remove_timer(&mut self, id: &TimerId, now: DateTime<Utc>) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id() != id);
        if self.timers.len() == before {
            return false;
        }
        self.effects.push(Effect::Notify(Event::TimerRemoved {
            timer_id: id.clone(),
            at: now,
        }));
        true
    }

    /// Count an app exit against every running timer.
    pub fn note_app_exit(&mut self) {
        for timer in self.timers.iter_mut().filter(|t| t.is_running()) {
            timer.app_exit_count += 1;
        }
    }

    /// Count a quick return for each of `ids` that is still running.
    pub fn note_quick_return(&mut self, ids: &[TimerId]) {
        for timer in self
            .timers
            .iter_mut()
            .filter(|t| t.is_running() && ids.contains(&t.id))
        {
            timer.quick_return_count += 1;
        }
    }

    // ── Clock ────────────────────────────────────────────────────────

    /// One periodic tick: every running timer advances by one second.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.advance_running(1, now);
    }

    /// Advance every running timer by `secs` in one step, in creation
    /// order. Overshooting timers clamp to their target and fire the
    /// completion or phase flip exactly once.
    pub fn advance_running(&mut self, secs: u64, now: DateTime<Utc>) {
        if secs == 0 {
            return;
        }
        for index in 0..self.timers.len() {
            self.advance_at(index, secs, now);
        }
    }

    /// Advance a single timer, used when timers carry different anchors.
    pub fn advance_timer(&mut self, id: &TimerId, secs: u64, now: DateTime<Utc>) -> bool {
        match self.timers.iter().position(|t| t.id() == id) {
            Some(index) if secs > 0 => {
                self.advance_at(index, secs, now);
                true
            }
            _ => false,
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn find_mut(&mut self, id: &TimerId) -> Option<&mut Timer> {
        self.timers.iter_mut().find(|t| t.id() == id)
    }

    /// Force a corrupt running timer to completion. Returns false if the
    /// timer is corrupt.
    fn check_integrity(&mut self, index: usize, now: DateTime<Utc>) -> bool {
        let timer = &mut self.timers[index];
        let Some(reason) = timer.integrity_fault() else {
            return true;
        };
        if timer.status() == TimerStatus::Completed {
            return false;
        }
        warn!("timer {} is malformed ({reason}); forcing completion", timer.id());
        let result = self
            .scorer
            .evaluate(&timer.density_input(timer.elapsed_secs(), false));
        timer.complete(result);
        self.effects.push(Effect::Notify(Event::TimerFaulted {
            timer_id: timer.id().clone(),
            reason: reason.to_string(),
            at: now,
        }));
        false
    }

    fn advance_at(&mut self, index: usize, secs: u64, now: DateTime<Utc>) {
        if !self.timers[index].is_running() || !self.check_integrity(index, now) {
            return;
        }

        let Self {
            timers,
            effects,
            scorer,
            ..
        } = self;
        let timer = &mut timers[index];
        let before = timer.elapsed_secs;

        let Some(target) = timer.kind.target_secs() else {
            timer.elapsed_secs = before.saturating_add(secs);
            return;
        };

        let after = before.saturating_add(secs).min(target);
        timer.elapsed_secs = after;

        if let Some(warning) = crossed_warning(target, before, after) {
            effects.push(Effect::Notify(Event::TimeWarning {
                timer_id: timer.id.clone(),
                label: timer.label.clone(),
                warning,
                at: now,
            }));
        }
        if after < target {
            return;
        }

        match timer.kind {
            TimerKind::Free => {}
            TimerKind::Countdown { .. } => {
                let result = scorer.evaluate(&timer.density_input(target, true));
                let request = (target > COUNTDOWN_RECORD_MIN_SECS)
                    .then(|| RecordRequest::from_timer(timer, target, true, now));
                timer.complete(result.clone());
                debug!("countdown {} completed after {target}s", timer.id);
                effects.push(Effect::Notify(Event::TimerCompleted {
                    timer_id: timer.id.clone(),
                    label: timer.label.clone(),
                    duration_secs: target,
                    result: timer.result.clone().unwrap_or(result),
                    at: now,
                }));
                if let Some(request) = request {
                    effects.push(Effect::RecordSession(request));
                }
            }
            TimerKind::Pomodoro { phase, .. } => {
                let work_request = (phase == PomodoroPhase::Work)
                    .then(|| RecordRequest::from_timer(timer, target, true, now));
                if let Some((from, to, set_index)) = timer.flip_phase() {
                    debug!("pomodoro {} flipped {from:?} -> {to:?}", timer.id);
                    if let Some(request) = work_request {
                        effects.push(Effect::RecordSession(request));
                    }
                    effects.push(Effect::Notify(Event::PhaseFlipped {
                        timer_id: timer.id.clone(),
                        label: timer.label.clone(),
                        from,
                        to,
                        set_index,
                        at: now,
                    }));
                }
            }
        }
    }
}
