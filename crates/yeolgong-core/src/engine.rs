//! The study engine.
//!
//! One owned root object wiring the timer registry, the session recorder,
//! settings and persistence together. Like the registry it has no internal
//! thread: the host calls [`StudyEngine::tick`] once a second and forwards
//! app lifecycle changes to [`StudyEngine::on_background`] and
//! [`StudyEngine::on_foreground`].
//!
//! ## Usage
//!
//! ```ignore
//! let config = Config::load_or_default();
//! let mut engine = StudyEngine::load(Database::open()?, SystemClock, Box::new(LogNotifier), &config);
//! let id = engine.create_timer(TimerSpec::countdown(25 * 60))?;
//! // Once a second:
//! engine.tick();
//! for event in engine.drain_events() { /* update the UI */ }
//! ```

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{debug, info};

use crate::clock::{whole_secs_between, Clock, DriftCorrector, Resumed};
use crate::density::DensityScorer;
use crate::error::Result;
use crate::events::Event;
use crate::planner::{DDay, DDayView, Planner, Todo};
use crate::session::{
    DailySummary, RecordOutcome, Session, SessionRecorder, Subject, TodaySummary,
};
use crate::storage::{
    Config, DebouncedWriter, Document, Gateway, KvStore, Settings, TimerSnapshot,
};
use crate::timer::{Effect, RecordRequest, Timer, TimerId, TimerRegistry, TimerSpec, TimerView};

/// Receives alert events (completions, phase flips, time warnings).
/// Delivery is fire-and-forget.
pub trait Notifier: Send {
    fn notify(&self, event: &Event);
}

/// Drops every alert.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: &Event) {}
}

/// Logs alerts at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &Event) {
        match event {
            Event::TimerCompleted {
                label,
                duration_secs,
                result,
                ..
            } => info!(
                "{label} finished after {duration_secs}s (density {} {})",
                result.density, result.tier
            ),
            Event::PhaseFlipped {
                label, from, to, ..
            } => info!("{label}: {from:?} -> {to:?}"),
            Event::TimeWarning { label, warning, .. } => info!("{label}: {warning:?}"),
            other => debug!("notification for {other:?}"),
        }
    }
}

pub struct StudyEngine<S: KvStore, C: Clock> {
    gateway: Gateway<S>,
    clock: C,
    notifier: Box<dyn Notifier>,
    registry: TimerRegistry,
    recorder: SessionRecorder,
    settings: Settings,
    planner: Planner,
    corrector: DriftCorrector,
    /// Timers that were running when the app went to the background.
    backgrounded: Vec<TimerId>,
    writer: DebouncedWriter,
    quick_return_secs: u64,
    /// Instant the registry's elapsed values are exact at.
    synced_at: Option<DateTime<Utc>>,
    events: Vec<Event>,
}

impl<S: KvStore, C: Clock> StudyEngine<S, C> {
    /// Read every document from `store` and rebuild the in-memory state.
    /// Missing or unreadable documents start empty; this never fails.
    ///
    /// Running timers from the snapshot are caught up by the wall-clock time
    /// since they were saved, so completions and phase flips that fell due
    /// while no process was running fire now.
    pub fn load(store: S, clock: C, notifier: Box<dyn Notifier>, config: &Config) -> Self {
        let gateway = Gateway::new(store);
        let scorer = DensityScorer::new(config.density.clone());

        let settings: Settings = gateway.load_or_default(Document::Settings);
        let sessions: Vec<Session> = gateway.load_or_default(Document::Sessions);
        let subjects: Vec<Subject> = gateway.load_or_default(Document::Subjects);
        let snapshot: Option<TimerSnapshot> = gateway.load(Document::TimerSnapshot);
        let ddays: Vec<DDay> = gateway.load_or_default(Document::DDays);
        let todos: Vec<Todo> = gateway.load_or_default(Document::Todos);

        let mut engine = Self {
            gateway,
            clock,
            notifier,
            registry: TimerRegistry::new(scorer.clone(), config.timer.max_duration_secs),
            recorder: SessionRecorder::restore(scorer, sessions, subjects),
            settings,
            planner: Planner::restore(ddays, todos),
            corrector: DriftCorrector::new(),
            backgrounded: Vec::new(),
            writer: DebouncedWriter::new(config.persistence.debounce_ms),
            quick_return_secs: config.lifecycle.quick_return_secs,
            synced_at: None,
            events: Vec::new(),
        };

        let now = engine.corrector.observe(engine.clock.now());
        engine.synced_at = now;
        if let Some(snapshot) = snapshot {
            engine.restore_snapshot(snapshot, now);
        }
        info!(
            "loaded {} timers, {} sessions, {} subjects, {} D-days, {} todos",
            engine.registry.timers().len(),
            engine.recorder.sessions().len(),
            engine.recorder.subjects().len(),
            engine.planner.ddays().len(),
            engine.planner.todos().len()
        );
        engine
    }

    fn restore_snapshot(&mut self, snapshot: TimerSnapshot, now: Option<DateTime<Utc>>) {
        let until = snapshot.catch_up_until(now).unwrap_or(snapshot.saved_at);
        let gaps = snapshot.catch_up(until);
        let suspended_at = snapshot.suspended_at;
        self.synced_at = Some(snapshot.synced_at(until));

        let (timers, backgrounded) = snapshot.into_parts();
        self.registry.restore(timers, until);
        for (id, gap) in gaps {
            debug!("catching up timer {id} by {gap}s");
            self.registry.advance_timer(&id, gap, until);
        }
        if let Some(suspended_at) = suspended_at {
            self.corrector.rearm(suspended_at);
            self.backgrounded = backgrounded;
        }
        self.process_effects(until);
    }

    // ── Clock & lifecycle ────────────────────────────────────────────

    /// One periodic tick. Ignored while backgrounded; the foreground
    /// correction covers that time instead.
    pub fn tick(&mut self) {
        if self.corrector.is_suspended() {
            debug!("tick while suspended; ignoring");
            return;
        }
        let now = self.instant();
        self.registry.tick(now);
        self.synced_at = Some(now);
        self.process_effects(now);
        self.flush_if_due(now);
    }

    /// The app left the foreground. Counts an exit against every running
    /// timer and writes everything out immediately.
    pub fn on_background(&mut self) {
        if self.corrector.is_suspended() {
            return;
        }
        self.corrector.suspend(self.clock.now());
        let at = self.corrector.last_observed().unwrap_or_default();

        self.backgrounded = self.registry.running_ids();
        self.registry.note_app_exit();
        let running_timers = self.backgrounded.len();
        debug!("backgrounded with {running_timers} running timers");
        self.events.push(Event::AppBackgrounded { running_timers, at });
        self.writer.mark(Document::TimerSnapshot, at);
        self.flush_at(at);
    }

    /// The app is back. Running timers advance by the whole seconds spent
    /// in the background that commands issued meanwhile have not already
    /// applied, in one step. A return within the quick-return window counts
    /// a quick return for each timer that was running at suspension.
    pub fn on_foreground(&mut self) -> Resumed {
        let resumed = self.corrector.resume(self.clock.now());
        let backgrounded = std::mem::take(&mut self.backgrounded);
        if !resumed.was_suspended {
            return resumed;
        }
        let at = self.corrector.last_observed().unwrap_or_default();

        let quick_return = resumed.measured && resumed.gap_secs <= self.quick_return_secs;
        if quick_return {
            self.registry.note_quick_return(&backgrounded);
        }
        self.events.push(Event::AppForegrounded {
            gap_secs: resumed.gap_secs,
            quick_return,
            at,
        });
        let applied = match (resumed.since, self.synced_at) {
            (Some(since), Some(synced)) => whole_secs_between(since, synced),
            _ => 0,
        };
        self.registry
            .advance_running(resumed.gap_secs.saturating_sub(applied), at);
        self.synced_at = resumed
            .since
            .and_then(|since| {
                let gap = i64::try_from(resumed.gap_secs).ok()?;
                since.checked_add_signed(Duration::seconds(gap))
            })
            .or(Some(at));
        self.process_effects(at);
        self.writer.mark(Document::TimerSnapshot, at);
        resumed
    }

    pub fn is_backgrounded(&self) -> bool {
        self.corrector.is_suspended()
    }

    /// Longest background gap that still counts as a quick return.
    pub fn quick_return_secs(&self) -> u64 {
        self.quick_return_secs
    }

    // ── Timers ───────────────────────────────────────────────────────

    /// Create and start a timer. With `ultra_focus_strict` set, every timer
    /// runs in ultra focus mode.
    pub fn create_timer(&mut self, mut spec: TimerSpec) -> Result<TimerId> {
        if self.settings.ultra_focus_strict {
            spec.ultra_focus = true;
        }
        let now = self.command_instant();
        let id = self.registry.create_timer(spec, now)?;
        self.after_change(now);
        Ok(id)
    }

    pub fn pause_timer(&mut self, id: &TimerId) -> bool {
        let now = self.command_instant();
        let changed = self.registry.pause(id, now);
        if changed {
            self.after_change(now);
        }
        changed
    }

    pub fn resume_timer(&mut self, id: &TimerId) -> bool {
        let now = self.command_instant();
        let changed = self.registry.resume(id, now);
        if changed {
            self.after_change(now);
        }
        changed
    }

    pub fn stop_timer(&mut self, id: &TimerId) -> bool {
        let now = self.command_instant();
        let changed = self.registry.stop(id, now);
        if changed {
            self.after_change(now);
        }
        changed
    }

    pub fn restart_timer(&mut self, id: &TimerId) -> bool {
        let now = self.command_instant();
        let changed = self.registry.restart(id, now);
        if changed {
            self.after_change(now);
        }
        changed
    }

    pub fn reset_timer(&mut self, id: &TimerId) -> bool {
        let now = self.command_instant();
        let changed = self.registry.reset(id, now);
        if changed {
            self.after_change(now);
        }
        changed
    }

    pub fn remove_timer(&mut self, id: &TimerId) -> bool {
        let now = self.command_instant();
        let changed = self.registry.remove_timer(id, now);
        if changed {
            self.after_change(now);
        }
        changed
    }

    // ── Sessions ─────────────────────────────────────────────────────

    /// Record a session that did not come from a live timer.
    pub fn record_session(&mut self, request: &RecordRequest) -> RecordOutcome {
        let now = self.instant();
        self.record(request, now)
    }

    // ── Settings & subjects ──────────────────────────────────────────

    pub fn update_settings(&mut self, update: impl FnOnce(&mut Settings)) {
        update(&mut self.settings);
        let now = self.instant();
        self.writer.mark(Document::Settings, now);
    }

    /// Set one setting by name, e.g. `daily_goal_minutes`.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<()> {
        self.settings.set(key, value)?;
        let now = self.instant();
        self.writer.mark(Document::Settings, now);
        Ok(())
    }

    pub fn add_subject(&mut self, name: impl Into<String>, color: impl Into<String>) -> Subject {
        let now = self.instant();
        let subject = self.recorder.add_subject(name, color, now).clone();
        self.writer.mark(Document::Subjects, now);
        subject
    }

    pub fn rename_subject(&mut self, id: &str, name: impl Into<String>) -> Result<()> {
        self.recorder.rename_subject(id, name)?;
        let now = self.instant();
        self.writer.mark(Document::Subjects, now);
        Ok(())
    }

    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let favorite = self.recorder.toggle_favorite(id)?;
        let now = self.instant();
        self.writer.mark(Document::Subjects, now);
        Ok(favorite)
    }

    // ── Planner ──────────────────────────────────────────────────────

    pub fn add_dday(&mut self, label: &str, date: NaiveDate, emoji: Option<&str>) -> Result<DDay> {
        let dday = self.planner.add_dday(label, date, emoji)?.clone();
        self.mark_planner(Document::DDays);
        Ok(dday)
    }

    pub fn remove_dday(&mut self, id: &str) -> Result<DDay> {
        let removed = self.planner.remove_dday(id)?;
        self.mark_planner(Document::DDays);
        Ok(removed)
    }

    pub fn set_primary_dday(&mut self, id: &str) -> Result<()> {
        self.planner.set_primary_dday(id)?;
        self.mark_planner(Document::DDays);
        Ok(())
    }

    pub fn add_todo(&mut self, text: &str) -> Result<Todo> {
        let todo = self.planner.add_todo(text)?.clone();
        self.mark_planner(Document::Todos);
        Ok(todo)
    }

    pub fn toggle_todo(&mut self, id: &str) -> Result<bool> {
        let done = self.planner.toggle_todo(id)?;
        self.mark_planner(Document::Todos);
        Ok(done)
    }

    pub fn remove_todo(&mut self, id: &str) -> Result<Todo> {
        let removed = self.planner.remove_todo(id)?;
        self.mark_planner(Document::Todos);
        Ok(removed)
    }

    fn mark_planner(&mut self, doc: Document) {
        let now = self.instant();
        self.writer.mark(doc, now);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn planner(&self) -> &Planner {
        &self.planner
    }

    /// D-days as seen today, in insertion order.
    pub fn dday_views(&self) -> Vec<DDayView> {
        let today = self.today();
        self.planner
            .ddays()
            .iter()
            .map(|dday| DDayView::new(dday, today))
            .collect()
    }

    pub fn primary_dday_view(&self) -> Option<DDayView> {
        self.planner
            .primary_dday()
            .map(|dday| DDayView::new(dday, self.today()))
    }

    pub fn timers(&self) -> &[Timer] {
        self.registry.timers()
    }

    pub fn timer(&self, id: &TimerId) -> Option<&Timer> {
        self.registry.get(id)
    }

    pub fn snapshot(&self) -> Vec<TimerView> {
        self.registry.snapshot()
    }

    pub fn sessions(&self) -> &[Session] {
        self.recorder.sessions()
    }

    pub fn subjects(&self) -> &[Subject] {
        self.recorder.subjects()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn recorder(&self) -> &SessionRecorder {
        &self.recorder
    }

    pub fn scorer(&self) -> &DensityScorer {
        self.registry.scorer()
    }

    pub fn today(&self) -> NaiveDate {
        self.peek_instant().date_naive()
    }

    pub fn today_summary(&self) -> TodaySummary {
        let today = self.today();
        TodaySummary::new(
            self.recorder.daily_summary(today),
            self.registry.longest_running_secs(),
            self.settings.daily_goal_minutes,
            self.settings.streak.current(today),
        )
    }

    /// Per-day summaries for the last `days` days, oldest first.
    pub fn daily_summaries(&self, days: u32) -> Vec<DailySummary> {
        self.recorder.daily_summaries(self.today(), days)
    }

    /// Hand out accumulated events in emission order.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn store(&self) -> &S {
        self.gateway.store()
    }

    // ── Persistence ──────────────────────────────────────────────────

    pub fn has_pending_writes(&self) -> bool {
        self.writer.has_pending()
    }

    /// Write every dirty document now. Returns whether all writes landed;
    /// failed documents stay dirty.
    pub fn flush(&mut self) -> bool {
        let now = self.instant();
        self.flush_at(now)
    }

    /// Mark every document dirty and write them all.
    pub fn persist_all(&mut self) -> bool {
        let now = self.instant();
        for doc in Document::ALL {
            self.writer.mark(doc, now);
        }
        self.flush_at(now)
    }

    fn flush_if_due(&mut self, now: DateTime<Utc>) {
        if self.writer.is_due(now) {
            self.flush_at(now);
        }
    }

    fn flush_at(&mut self, now: DateTime<Utc>) -> bool {
        let mut all_written = true;
        for doc in self.writer.pending() {
            if self.save(doc, now) {
                self.writer.written(doc);
            } else {
                all_written = false;
            }
        }
        if !all_written {
            self.writer.retry_later(now);
        }
        all_written
    }

    fn save(&self, doc: Document, now: DateTime<Utc>) -> bool {
        match doc {
            Document::Settings => self.gateway.save(doc, &self.settings),
            Document::Subjects => self.gateway.save(doc, self.recorder.subjects()),
            Document::Sessions => self.gateway.save(doc, self.recorder.sessions()),
            Document::TimerSnapshot => {
                let snapshot = TimerSnapshot::capture(
                    self.registry.timers(),
                    self.synced_at.unwrap_or(now),
                    self.corrector.suspended_at(),
                    &self.backgrounded,
                );
                self.gateway.save(doc, &snapshot)
            }
            Document::DDays => self.gateway.save(doc, self.planner.ddays()),
            Document::Todos => self.gateway.save(doc, self.planner.todos()),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Current trusted time. Falls back to the last trusted reading when the
    /// clock is unavailable or behind.
    fn instant(&mut self) -> DateTime<Utc> {
        self.corrector
            .observe(self.clock.now())
            .or(self.corrector.last_observed())
            .unwrap_or_default()
    }

    /// Current trusted time for a command that may change which timers are
    /// running. While backgrounded, running timers are first brought up to
    /// that time so the foreground gap only covers what is left.
    fn command_instant(&mut self) -> DateTime<Utc> {
        let now = self.instant();
        self.catch_up_background(now);
        now
    }

    fn catch_up_background(&mut self, now: DateTime<Utc>) {
        let Some(since) = self.corrector.suspended_at() else {
            return;
        };
        let from = self.synced_at.map_or(since, |synced| synced.max(since));
        let gap = whole_secs_between(from, now);
        let Some(to) = i64::try_from(gap)
            .ok()
            .and_then(|secs| from.checked_add_signed(Duration::seconds(secs)))
        else {
            return;
        };
        if gap == 0 {
            return;
        }
        debug!("catching up running timers by {gap}s while backgrounded");
        self.registry.advance_running(gap, now);
        self.synced_at = Some(to);
        self.process_effects(now);
        self.writer.mark(Document::TimerSnapshot, now);
    }

    fn peek_instant(&self) -> DateTime<Utc> {
        let last = self.corrector.last_observed();
        match self.clock.now() {
            Some(now) if last.map_or(true, |last| now >= last) => now,
            _ => last.unwrap_or_default(),
        }
    }

    fn after_change(&mut self, now: DateTime<Utc>) {
        self.process_effects(now);
        self.writer.mark(Document::TimerSnapshot, now);
    }

    fn process_effects(&mut self, now: DateTime<Utc>) {
        for effect in self.registry.drain_effects() {
            match effect {
                Effect::Notify(event) => self.emit(event),
                Effect::RecordSession(request) => {
                    self.record(&request, now);
                }
            }
            self.writer.mark(Document::TimerSnapshot, now);
        }
    }

    fn emit(&mut self, event: Event) {
        if event.is_alert() && self.settings.notifications_enabled {
            self.notifier.notify(&event);
        }
        self.events.push(event);
    }

    fn record(&mut self, request: &RecordRequest, now: DateTime<Utc>) -> RecordOutcome {
        let outcome = self.recorder.record(request, &mut self.settings.streak);
        if let RecordOutcome::Recorded { session, .. } = &outcome {
            self.events.push(Event::SessionRecorded {
                session_id: session.id.clone(),
                subject_id: session.subject_id.clone(),
                mode: session.mode,
                duration_secs: session.duration_secs,
                focus_density: session.focus_density,
                tier: session.tier.clone(),
                streak: self.settings.streak.count,
                at: session.ended_at,
            });
            for doc in [Document::Sessions, Document::Subjects, Document::Settings] {
                self.writer.mark(doc, now);
            }
        }
        outcome
    }
}
