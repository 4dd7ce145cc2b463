//! Recorded study sessions and the subjects they count towards.

mod recorder;
pub mod stats;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use recorder::{RecordOutcome, SessionRecorder, Streak, MIN_SESSION_SECS};
pub use stats::{DailySummary, Mood, TodaySummary};

/// How a session was timed. Mirrors the timer kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionMode {
    Free,
    Countdown,
    Pomodoro,
}

/// One finished, immutable study session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    /// UTC day the session ended on.
    pub date: NaiveDate,
    pub subject_id: Option<String>,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub duration_secs: u64,
    pub mode: SessionMode,
    pub focus_density: u32,
    pub tier: String,
    pub paused_count: u32,
    #[serde(default)]
    pub app_exit_count: u32,
    #[serde(default)]
    pub quick_return_count: u32,
}

/// A study subject. Accumulates the duration of every session tagged with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: String,
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub total_elapsed_secs: u64,
    #[serde(default)]
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
}

impl Subject {
    pub fn new(name: impl Into<String>, color: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: format!("subj_{}", Uuid::new_v4().simple()),
            name: name.into(),
            color: color.into(),
            total_elapsed_secs: 0,
            is_favorite: false,
            created_at: now,
        }
    }
}
