mod entity;
pub mod projection;
mod registry;

pub use entity::{
    KindSpec, PomodoroPhase, Timer, TimerId, TimerKind, TimerSpec, TimerStatus, LONG_BREAK_EVERY,
};
pub use projection::{TimeWarning, TimerView};
pub use registry::{
    Effect, RecordRequest, TimerRegistry, COUNTDOWN_RECORD_MIN_SECS, STOP_RECORD_MIN_SECS,
};
