//! # Yeolgong Core Library
//!
//! Core logic for the Yeolgong study timer: several concurrent timers, a
//! focus score for every finished run, and a daily study log. Everything is
//! driven by the host; there are no internal threads. The `yeolgong` CLI is
//! a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Clock**: injectable wall clock plus the drift corrector that turns
//!   time spent in the background into one catch-up step
//! - **Density**: focus density scoring and the tier table
//! - **Timer**: timer entity, pomodoro phase machine and the registry that
//!   advances every timer per tick and queues side effects
//! - **Session**: the append-only session log, subject totals, streaks and
//!   daily summaries
//! - **Planner**: exam D-days and the to-do list
//! - **Storage**: SQLite key-value documents, debounced writes and TOML
//!   configuration
//!
//! ## Key Components
//!
//! - [`StudyEngine`]: root object owning all state
//! - [`TimerRegistry`]: the timer collection and its tick
//! - [`SessionRecorder`]: session log and aggregates
//! - [`DensityScorer`]: configurable scoring
//! - [`Database`]: SQLite-backed [`KvStore`]
//! - [`Config`]: engine configuration

pub mod clock;
pub mod density;
pub mod engine;
pub mod error;
pub mod events;
pub mod planner;
pub mod session;
pub mod storage;
pub mod timer;

pub use clock::{Clock, DriftCorrector, ManualClock, Resumed, SystemClock};
pub use density::{DensityConfig, DensityInput, DensityScorer, Tier, TierTable, TimerResult};
pub use engine::{LogNotifier, Notifier, NullNotifier, StudyEngine};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use planner::{DDay, DDayView, Planner, Todo};
pub use session::{
    DailySummary, Mood, RecordOutcome, Session, SessionMode, SessionRecorder, Streak, Subject,
    TodaySummary,
};
pub use storage::{Config, Database, Document, Gateway, KvStore, MemoryStore, Settings};
pub use timer::{
    KindSpec, PomodoroPhase, RecordRequest, TimeWarning, Timer, TimerId, TimerKind,
    TimerRegistry, TimerSpec, TimerStatus, TimerView,
};
