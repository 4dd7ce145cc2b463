//! End-to-end tests for the study engine.
//!
//! Every test drives a `StudyEngine` with a `ManualClock` over an in-memory
//! or on-disk store, the way a host app or the CLI would.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use yeolgong_core::{
    Config, Database, Document, Event, KvStore, ManualClock, MemoryStore, Mood, Notifier,
    NullNotifier, PomodoroPhase, RecordOutcome, RecordRequest, SessionMode, StudyEngine,
    TimerSpec, TimerStatus,
};

// ============================================================================
// Test Helpers
// ============================================================================

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

fn engine<'a>(store: &'a MemoryStore, clock: &ManualClock) -> StudyEngine<&'a MemoryStore, ManualClock> {
    StudyEngine::load(store, clock.clone(), Box::new(NullNotifier), &Config::default())
}

/// Tick `n` times, one second apart.
fn tick_n<S: KvStore>(engine: &mut StudyEngine<S, ManualClock>, clock: &ManualClock, n: u32) {
    for _ in 0..n {
        clock.advance_secs(1);
        engine.tick();
    }
}

#[derive(Clone, Default)]
struct Recording(Arc<Mutex<Vec<Event>>>);

impl Notifier for Recording {
    fn notify(&self, event: &Event) {
        self.0.lock().unwrap().push(event.clone());
    }
}

fn request(secs: u64, ended_at: DateTime<Utc>) -> RecordRequest {
    RecordRequest {
        timer_id: None,
        subject_id: None,
        duration_secs: secs,
        mode: SessionMode::Free,
        pause_count: 0,
        app_exit_count: 0,
        quick_return_count: 0,
        ultra_focus_completed: false,
        ended_at,
    }
}

// ============================================================================
// Timer scenarios
// ============================================================================

#[test]
fn countdown_completes_after_300_ticks() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let id = e.create_timer(TimerSpec::countdown(300)).unwrap();

    tick_n(&mut e, &clock, 299);
    let timer = e.timer(&id).unwrap();
    assert_eq!(timer.status(), TimerStatus::Running);
    assert_eq!(timer.elapsed_secs(), 299);
    assert!(e.sessions().is_empty());

    tick_n(&mut e, &clock, 1);
    assert_eq!(e.timer(&id).unwrap().status(), TimerStatus::Completed);
    assert_eq!(e.sessions().len(), 1);
    assert_eq!(e.sessions()[0].duration_secs, 300);
    assert_eq!(e.sessions()[0].mode, SessionMode::Countdown);
}

#[test]
fn pomodoro_flips_to_break_at_1500_seconds() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let id = e.create_timer(TimerSpec::pomodoro(25, 5)).unwrap();

    tick_n(&mut e, &clock, 1500);
    let timer = e.timer(&id).unwrap();
    assert_eq!(timer.status(), TimerStatus::Running);
    assert_eq!(timer.kind().phase(), Some(PomodoroPhase::Break));
    assert_eq!(timer.kind().set_index(), Some(1));
    assert_eq!(timer.elapsed_secs(), 0);

    assert_eq!(e.sessions().len(), 1);
    assert_eq!(e.sessions()[0].duration_secs, 1500);
    assert_eq!(e.sessions()[0].mode, SessionMode::Pomodoro);

    // The break runs out and work starts again without a new session.
    tick_n(&mut e, &clock, 300);
    assert_eq!(e.timer(&id).unwrap().kind().phase(), Some(PomodoroPhase::Work));
    assert_eq!(e.sessions().len(), 1);
}

#[test]
fn background_gap_completes_countdown_exactly_once() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let id = e.create_timer(TimerSpec::countdown(300)).unwrap();
    tick_n(&mut e, &clock, 100);

    e.on_background();
    e.drain_events();
    clock.advance_secs(400);
    let resumed = e.on_foreground();
    assert_eq!(resumed.gap_secs, 400);

    let timer = e.timer(&id).unwrap();
    assert_eq!(timer.status(), TimerStatus::Completed);
    assert_eq!(timer.elapsed_secs(), 300);
    assert_eq!(timer.app_exit_count(), 1);
    assert_eq!(e.sessions().len(), 1);
    assert_eq!(e.sessions()[0].duration_secs, 300);
    // One exit, no quick return.
    assert_eq!(e.sessions()[0].focus_density, 94);
    assert_eq!(e.sessions()[0].tier, "S");

    let events = e.drain_events();
    let completions = events
        .iter()
        .filter(|ev| matches!(ev, Event::TimerCompleted { .. }))
        .count();
    assert_eq!(completions, 1);
    assert!(matches!(
        events[0],
        Event::AppForegrounded {
            gap_secs: 400,
            quick_return: false,
            ..
        }
    ));

    // A second foreground has nothing left to apply.
    assert_eq!(e.on_foreground().gap_secs, 0);
    assert_eq!(e.sessions().len(), 1);
}

#[test]
fn quick_return_counts_against_running_timers_only() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let running = e.create_timer(TimerSpec::free()).unwrap();
    let paused = e.create_timer(TimerSpec::free()).unwrap();
    e.pause_timer(&paused);

    e.on_background();
    clock.advance_secs(20);
    let resumed = e.on_foreground();
    assert_eq!(resumed.gap_secs, 20);

    let r = e.timer(&running).unwrap();
    assert_eq!(r.app_exit_count(), 1);
    assert_eq!(r.quick_return_count(), 1);
    assert_eq!(r.elapsed_secs(), 20);
    let p = e.timer(&paused).unwrap();
    assert_eq!(p.app_exit_count(), 0);
    assert_eq!(p.quick_return_count(), 0);
    assert_eq!(p.elapsed_secs(), 0);
}

#[test]
fn backwards_clock_on_foreground_applies_no_gap() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let id = e.create_timer(TimerSpec::free()).unwrap();
    e.on_background();
    clock.set(t0() - Duration::seconds(600));
    let resumed = e.on_foreground();
    assert_eq!(resumed.gap_secs, 0);
    assert_eq!(e.timer(&id).unwrap().elapsed_secs(), 0);
    assert_eq!(e.timer(&id).unwrap().quick_return_count(), 0);
}

#[test]
fn pausing_a_completed_timer_changes_nothing() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let id = e.create_timer(TimerSpec::countdown(60)).unwrap();
    tick_n(&mut e, &clock, 60);
    let before = e.timer(&id).unwrap().clone();
    e.drain_events();

    assert!(!e.pause_timer(&id));
    assert_eq!(e.timer(&id).unwrap(), &before);
    assert_eq!(e.timer(&id).unwrap().pause_count(), 0);
    assert!(e.drain_events().is_empty());
}

#[test]
fn stop_records_only_runs_over_thirty_seconds() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let short = e.create_timer(TimerSpec::free()).unwrap();
    let long = e.create_timer(TimerSpec::free()).unwrap();
    tick_n(&mut e, &clock, 30);
    assert!(e.stop_timer(&short));
    tick_n(&mut e, &clock, 15);
    assert!(e.stop_timer(&long));

    assert_eq!(e.sessions().len(), 1);
    assert_eq!(e.sessions()[0].duration_secs, 45);
    assert_eq!(e.timer(&short).unwrap().status(), TimerStatus::Completed);
    assert!(e.timer(&short).unwrap().result().is_some());
}

#[test]
fn invalid_spec_adds_nothing() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    assert!(e.create_timer(TimerSpec::countdown(0)).is_err());
    assert!(e.create_timer(TimerSpec::pomodoro(0, 5)).is_err());
    assert!(e.create_timer(TimerSpec::countdown(100_000)).is_err());
    assert!(e.timers().is_empty());
    assert!(e.drain_events().is_empty());
}

#[test]
fn timers_advance_independently() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let a = e.create_timer(TimerSpec::countdown(120).with_label("Math")).unwrap();
    let b = e.create_timer(TimerSpec::free().with_label("Reading")).unwrap();
    tick_n(&mut e, &clock, 10);
    e.pause_timer(&b);
    tick_n(&mut e, &clock, 10);

    let view = e.snapshot();
    assert_eq!(view.len(), 2);
    assert_eq!(view[0].id, a);
    assert_eq!(view[0].elapsed_secs, 20);
    assert_eq!(view[0].remaining_secs, Some(100));
    assert_eq!(view[0].display, "01:40");
    assert_eq!(view[1].elapsed_secs, 10);
    assert_eq!(view[1].status, TimerStatus::Paused);
}

// ============================================================================
// Notifications
// ============================================================================

#[test]
fn alerts_reach_the_notifier_unless_disabled() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let notifier = Recording::default();
    let mut e = StudyEngine::load(
        &store,
        clock.clone(),
        Box::new(notifier.clone()),
        &Config::default(),
    );
    e.create_timer(TimerSpec::countdown(400)).unwrap();
    tick_n(&mut e, &clock, 400);

    let seen = notifier.0.lock().unwrap().clone();
    assert!(seen.iter().all(Event::is_alert));
    assert!(seen
        .iter()
        .any(|ev| matches!(ev, Event::TimeWarning { .. })));
    assert!(seen
        .iter()
        .any(|ev| matches!(ev, Event::TimerCompleted { .. })));

    notifier.0.lock().unwrap().clear();
    e.set_setting("notifications_enabled", "false").unwrap();
    e.create_timer(TimerSpec::countdown(60)).unwrap();
    tick_n(&mut e, &clock, 60);
    assert!(notifier.0.lock().unwrap().is_empty());
    assert!(e
        .drain_events()
        .iter()
        .any(|ev| matches!(ev, Event::TimerCompleted { .. })));
}

// ============================================================================
// Sessions, streaks, summaries
// ============================================================================

#[test]
fn sessions_feed_subjects_streak_and_summary() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let math = e.add_subject("Math", "#4A90D9");
    let id = e
        .create_timer(TimerSpec::countdown(1200).with_subject(math.id.clone()))
        .unwrap();
    tick_n(&mut e, &clock, 1200);
    assert_eq!(e.timer(&id).unwrap().status(), TimerStatus::Completed);

    assert_eq!(e.subjects()[0].total_elapsed_secs, 1200);
    assert_eq!(e.settings().streak.count, 1);

    let today = e.today_summary();
    assert_eq!(today.day.total_secs, 1200);
    assert_eq!(today.day.session_count, 1);
    assert_eq!(today.day.tier.as_deref(), Some("S+"));
    assert_eq!(today.mood, Mood::Normal);
    assert_eq!(today.streak, 1);
}

#[test]
fn manual_sessions_below_minimum_are_dropped() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let outcome = e.record_session(&request(29, t0()));
    assert!(matches!(outcome, RecordOutcome::TooShort { .. }));
    assert!(e.sessions().is_empty());
    assert_eq!(e.settings().streak.count, 0);

    let outcome = e.record_session(&request(600, t0()));
    assert!(outcome.session().is_some());
    assert_eq!(e.settings().streak.count, 1);
}

#[test]
fn streak_spans_consecutive_days() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    e.record_session(&request(600, t0()));
    e.record_session(&request(600, t0() + Duration::days(1)));
    assert_eq!(e.settings().streak.count, 2);
    e.record_session(&request(600, t0() + Duration::days(3)));
    assert_eq!(e.settings().streak.count, 1);
    assert_eq!(
        e.settings().streak.last_study_date,
        NaiveDate::from_ymd_opt(2026, 3, 5)
    );
}

#[test]
fn daily_summaries_end_today() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    e.record_session(&request(900, t0() - Duration::days(1)));
    e.record_session(&request(600, t0()));
    let days = e.daily_summaries(7);
    assert_eq!(days.len(), 7);
    assert_eq!(days[6].date, t0().date_naive());
    assert_eq!(days[6].total_secs, 600);
    assert_eq!(days[5].total_secs, 900);
    assert_eq!(days[0].session_count, 0);
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn debounced_writes_land_after_quiet_period() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    e.set_setting("daily_goal_minutes", "120").unwrap();
    assert!(store.get(Document::Settings.key()).unwrap().is_none());

    tick_n(&mut e, &clock, 1);
    let saved = store.get(Document::Settings.key()).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&saved).unwrap();
    assert_eq!(json["daily_goal_minutes"], 120);
    assert!(!e.has_pending_writes());
}

#[test]
fn failed_writes_are_swallowed_and_retried() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    store.set_failing(true);
    e.add_subject("History", "#F5A623");
    assert!(!e.flush());
    assert!(e.has_pending_writes());
    assert_eq!(e.subjects().len(), 1);

    store.set_failing(false);
    assert!(e.flush());
    assert!(store.get(Document::Subjects.key()).unwrap().is_some());
}

#[test]
fn state_survives_reload() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let subject = e.add_subject("Korean", "#E8575A");
    e.set_setting("pomodoro_work_minutes", "50").unwrap();
    e.record_session(&request(600, t0()));
    let paused = e.create_timer(TimerSpec::free()).unwrap();
    tick_n(&mut e, &clock, 5);
    e.pause_timer(&paused);
    assert!(e.persist_all());
    drop(e);

    clock.advance_secs(3600);
    let e = engine(&store, &clock);
    assert_eq!(e.subjects()[0].id, subject.id);
    assert_eq!(e.settings().pomodoro_work_minutes, 50);
    assert_eq!(e.settings().streak.count, 1);
    assert_eq!(e.sessions().len(), 1);
    // Paused timers do not move while no process is running.
    assert_eq!(e.timer(&paused).unwrap().elapsed_secs(), 5);
}

#[test]
fn restart_catches_up_running_timers_once() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let countdown = e.create_timer(TimerSpec::countdown(300)).unwrap();
    let free = e.create_timer(TimerSpec::free()).unwrap();
    tick_n(&mut e, &clock, 100);
    assert!(e.persist_all());
    drop(e);

    clock.advance_secs(500);
    let mut e = engine(&store, &clock);
    assert_eq!(e.timer(&countdown).unwrap().status(), TimerStatus::Completed);
    assert_eq!(e.timer(&countdown).unwrap().elapsed_secs(), 300);
    assert_eq!(e.timer(&free).unwrap().elapsed_secs(), 600);
    assert_eq!(e.sessions().len(), 1);
    assert!(e
        .drain_events()
        .iter()
        .any(|ev| matches!(ev, Event::TimerCompleted { .. })));
    assert!(e.persist_all());
    drop(e);

    // Reloading again does not replay the completion.
    let e = engine(&store, &clock);
    assert_eq!(e.sessions().len(), 1);
    assert_eq!(e.timer(&free).unwrap().elapsed_secs(), 600);
}

#[test]
fn background_and_foreground_across_processes() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let id = e.create_timer(TimerSpec::free()).unwrap();
    tick_n(&mut e, &clock, 10);
    e.on_background();
    drop(e);

    // Another process reads state while the app is still backgrounded.
    clock.advance_secs(100);
    let mut e = engine(&store, &clock);
    assert!(e.is_backgrounded());
    assert_eq!(e.timer(&id).unwrap().elapsed_secs(), 10);
    assert!(e.persist_all());
    drop(e);

    clock.advance_secs(100);
    let mut e = engine(&store, &clock);
    let resumed = e.on_foreground();
    assert_eq!(resumed.gap_secs, 200);
    assert_eq!(e.timer(&id).unwrap().elapsed_secs(), 210);
    assert_eq!(e.timer(&id).unwrap().app_exit_count(), 1);
}

#[test]
fn timer_created_while_backgrounded_gets_only_its_own_time() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    e.on_background();
    clock.advance_secs(400);
    let id = e.create_timer(TimerSpec::countdown(300)).unwrap();
    clock.advance_secs(1);
    let resumed = e.on_foreground();

    assert_eq!(resumed.gap_secs, 401);
    let timer = e.timer(&id).unwrap();
    assert_eq!(timer.elapsed_secs(), 1);
    assert_eq!(timer.status(), TimerStatus::Running);
    assert_eq!(timer.quick_return_count(), 0);
    assert!(e.sessions().is_empty());
}

#[test]
fn pausing_while_backgrounded_keeps_the_time_already_run() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let id = e.create_timer(TimerSpec::free()).unwrap();
    e.on_background();
    clock.advance_secs(200);
    assert!(e.pause_timer(&id));
    clock.advance_secs(100);
    e.on_foreground();

    let timer = e.timer(&id).unwrap();
    assert_eq!(timer.status(), TimerStatus::Paused);
    assert_eq!(timer.elapsed_secs(), 200);
}

#[test]
fn quick_return_only_counts_for_timers_running_at_suspension() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let before = e.create_timer(TimerSpec::free()).unwrap();
    e.on_background();
    clock.advance_secs(10);
    let during = e.create_timer(TimerSpec::free()).unwrap();
    clock.advance_secs(5);
    e.on_foreground();

    assert_eq!(e.timer(&before).unwrap().quick_return_count(), 1);
    assert_eq!(e.timer(&before).unwrap().elapsed_secs(), 15);
    assert_eq!(e.timer(&during).unwrap().quick_return_count(), 0);
    assert_eq!(e.timer(&during).unwrap().elapsed_secs(), 5);
}

#[test]
fn commands_while_backgrounded_carry_across_processes() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    let first = e.create_timer(TimerSpec::free()).unwrap();
    e.on_background();
    assert!(e.persist_all());
    drop(e);

    clock.advance_secs(100);
    let mut e = engine(&store, &clock);
    let second = e.create_timer(TimerSpec::free()).unwrap();
    assert_eq!(e.timer(&first).unwrap().elapsed_secs(), 100);
    assert!(e.persist_all());
    drop(e);

    clock.advance_secs(20);
    let mut e = engine(&store, &clock);
    let resumed = e.on_foreground();
    assert_eq!(resumed.gap_secs, 120);
    assert_eq!(e.timer(&first).unwrap().elapsed_secs(), 120);
    assert_eq!(e.timer(&second).unwrap().elapsed_secs(), 20);
    // 120 s is past the quick-return window.
    assert_eq!(e.timer(&first).unwrap().quick_return_count(), 0);
}

#[test]
fn backdated_session_does_not_reset_the_streak() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0() + Duration::days(1));
    let mut e = engine(&store, &clock);
    e.record_session(&request(600, t0()));
    e.record_session(&request(600, t0() + Duration::days(1)));
    e.record_session(&request(600, t0() - Duration::days(3)));

    assert_eq!(e.sessions().len(), 3);
    assert_eq!(e.settings().streak.count, 2);
    assert_eq!(
        e.settings().streak.last_study_date,
        NaiveDate::from_ymd_opt(2026, 3, 3)
    );
    assert_eq!(e.today_summary().streak, 2);
}

// ============================================================================
// Planner
// ============================================================================

#[test]
fn ddays_and_todos_survive_a_reload() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let exam = NaiveDate::from_ymd_opt(2026, 3, 12).unwrap();
    let (mock, todo) = {
        let mut e = engine(&store, &clock);
        e.add_dday("Final", exam, None).unwrap();
        let mock = e.add_dday("Mock", NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(), Some("📝")).unwrap();
        e.set_primary_dday(&mock.id).unwrap();
        let todo = e.add_todo("solve 20 problems").unwrap();
        e.add_todo("review notes").unwrap();
        assert!(e.toggle_todo(&todo.id).unwrap());
        assert!(e.has_pending_writes());
        assert!(e.flush());
        (mock, todo)
    };
    assert!(store.get(Document::DDays.key()).unwrap().is_some());
    assert!(store.get(Document::Todos.key()).unwrap().is_some());

    let mut e = engine(&store, &clock);
    let views = e.dday_views();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].display, "D-10");
    assert_eq!(views[1].display, "D+1");
    assert_eq!(e.primary_dday_view().unwrap().id, mock.id);
    assert_eq!(e.planner().todo_progress(), (1, 2));
    assert!(e.planner().todos()[0].done);

    e.remove_dday(&mock.id).unwrap();
    assert_eq!(e.primary_dday_view().unwrap().label, "Final");
    e.remove_todo(&todo.id).unwrap();
    assert!(e.flush());

    let e = engine(&store, &clock);
    assert_eq!(e.dday_views().len(), 1);
    assert!(e.dday_views()[0].is_primary);
    assert_eq!(e.planner().todos().len(), 1);
}

#[test]
fn planner_errors_do_not_mark_anything_dirty() {
    let store = MemoryStore::new();
    let clock = ManualClock::at(t0());
    let mut e = engine(&store, &clock);
    assert!(e.remove_dday("dd_missing").is_err());
    assert!(e.toggle_todo("todo_missing").is_err());
    assert!(e.add_todo("   ").is_err());
    assert!(!e.has_pending_writes());
}

#[test]
fn sqlite_store_backs_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("yeolgong.db");
    let clock = ManualClock::at(t0());
    {
        let db = Database::open_at(&path).unwrap();
        let mut e = StudyEngine::load(db, clock.clone(), Box::new(NullNotifier), &Config::default());
        e.add_subject("Science", "#7ED321");
        e.record_session(&request(1800, t0()));
        assert!(e.persist_all());
    }
    let db = Database::open_at(&path).unwrap();
    let e = StudyEngine::load(db, clock, Box::new(NullNotifier), &Config::default());
    assert_eq!(e.subjects().len(), 1);
    assert_eq!(e.sessions()[0].duration_secs, 1800);
}

#[test]
fn malformed_documents_load_as_defaults() {
    let store = MemoryStore::new();
    store.set(Document::Settings.key(), "[1, 2").unwrap();
    store.set(Document::TimerSnapshot.key(), "{}").unwrap();
    let clock = ManualClock::at(t0());
    let e = engine(&store, &clock);
    assert_eq!(e.settings().daily_goal_minutes, 360);
    assert!(e.timers().is_empty());
}
