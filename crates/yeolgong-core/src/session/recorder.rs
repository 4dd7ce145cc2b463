//! Session recorder.
//!
//! Turns a finished run into an immutable [`Session`], adds its duration to
//! the tagged subject, and advances the daily streak. The session log is
//! append-only. Recording is deliberately not idempotent: every call with a
//! qualifying duration appends a new session.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::stats::{self, DailySummary};
use super::{Session, Subject};
use crate::density::{average_density, DensityInput, DensityScorer, TimerResult};
use crate::error::{CoreError, Result};
use crate::timer::RecordRequest;

/// Sessions shorter than this are never recorded.
pub const MIN_SESSION_SECS: u64 = 30;

/// Consecutive study days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    #[serde(rename = "streak", default)]
    pub count: u32,
    #[serde(default)]
    pub last_study_date: Option<NaiveDate>,
}

impl Streak {
    /// Count a study day. Same or earlier day: unchanged. Day after the last
    /// one (or the first ever): +1. A later gap: back to 1.
    pub fn register(&mut self, date: NaiveDate) -> bool {
        match self.last_study_date {
            Some(last) if date <= last => return false,
            Some(last) if last.succ_opt() == Some(date) => self.count += 1,
            None => self.count += 1,
            Some(_) => self.count = 1,
        }
        self.last_study_date = Some(date);
        true
    }

    /// Streak as seen on `today`: zero once a whole day has been missed.
    pub fn current(&self, today: NaiveDate) -> u32 {
        match self.last_study_date {
            Some(last) if last == today || last.succ_opt() == Some(today) => self.count,
            _ => 0,
        }
    }
}

/// What [`SessionRecorder::record`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    Recorded { session: Session, result: TimerResult },
    /// Below [`MIN_SESSION_SECS`]; nothing was written.
    TooShort { result: TimerResult },
}

impl RecordOutcome {
    pub fn result(&self) -> &TimerResult {
        match self {
            RecordOutcome::Recorded { result, .. } | RecordOutcome::TooShort { result } => result,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            RecordOutcome::Recorded { session, .. } => Some(session),
            RecordOutcome::TooShort { .. } => None,
        }
    }
}

/// Owner of the session log and subject totals.
#[derive(Debug, Clone, Default)]
pub struct SessionRecorder {
    sessions: Vec<Session>,
    subjects: Vec<Subject>,
    scorer: DensityScorer,
}

impl SessionRecorder {
    pub fn new(scorer: DensityScorer) -> Self {
        Self {
            sessions: Vec::new(),
            subjects: Vec::new(),
            scorer,
        }
    }

    /// Rebuild from persisted documents.
    pub fn restore(scorer: DensityScorer, sessions: Vec<Session>, subjects: Vec<Subject>) -> Self {
        Self {
            sessions,
            subjects,
            scorer,
        }
    }

    pub fn record(&mut self, request: &RecordRequest, streak: &mut Streak) -> RecordOutcome {
        let result = self.scorer.evaluate(&DensityInput {
            pause_count: request.pause_count,
            app_exit_count: request.app_exit_count,
            quick_return_count: request.quick_return_count,
            total_secs: request.duration_secs,
            ultra_focus_completed: request.ultra_focus_completed,
        });

        if request.duration_secs < MIN_SESSION_SECS {
            debug!("discarding {}s session (below minimum)", request.duration_secs);
            return RecordOutcome::TooShort { result };
        }

        let ended_at = request.ended_at;
        let duration = i64::try_from(request.duration_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1000);
        let session = Session {
            id: format!("sess_{}", Uuid::new_v4().simple()),
            date: ended_at.date_naive(),
            subject_id: request.subject_id.clone(),
            started_at: ended_at
                .checked_sub_signed(Duration::seconds(duration))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ended_at,
            duration_secs: request.duration_secs,
            mode: request.mode,
            focus_density: result.density,
            tier: result.tier.clone(),
            paused_count: request.pause_count,
            app_exit_count: request.app_exit_count,
            quick_return_count: request.quick_return_count,
        };

        if let Some(subject_id) = &request.subject_id {
            match self.subjects.iter_mut().find(|s| &s.id == subject_id) {
                Some(subject) => subject.total_elapsed_secs += request.duration_secs,
                None => debug!("session references unknown subject {subject_id}"),
            }
        }
        streak.register(session.date);

        info!(
            "recorded {:?} session {} ({}s, density {} {})",
            session.mode, session.id, session.duration_secs, session.focus_density, session.tier
        );
        self.sessions.push(session.clone());
        RecordOutcome::Recorded { session, result }
    }

    // ── Subjects ─────────────────────────────────────────────────────

    pub fn add_subject(
        &mut self,
        name: impl Into<String>,
        color: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &Subject {
        self.subjects.push(Subject::new(name, color, now));
        &self.subjects[self.subjects.len() - 1]
    }

    pub fn rename_subject(&mut self, id: &str, name: impl Into<String>) -> Result<()> {
        let subject = self.subject_mut(id)?;
        subject.name = name.into();
        Ok(())
    }

    /// Flip the favourite flag, returning the new value.
    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool> {
        let subject = self.subject_mut(id)?;
        subject.is_favorite = !subject.is_favorite;
        Ok(subject.is_favorite)
    }

    fn subject_mut(&mut self, id: &str) -> Result<&mut Subject> {
        self.subjects
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::SubjectNotFound(id.to_string()))
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn subject(&self, id: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.id == id)
    }

    pub fn scorer(&self) -> &DensityScorer {
        &self.scorer
    }

    pub fn sessions_on(&self, date: NaiveDate) -> impl Iterator<Item = &Session> {
        self.sessions.iter().filter(move |s| s.date == date)
    }

    pub fn total_secs_on(&self, date: NaiveDate) -> u64 {
        self.sessions_on(date).map(|s| s.duration_secs).sum()
    }

    pub fn average_density_on(&self, date: NaiveDate) -> u32 {
        average_density(self.sessions_on(date).map(|s| s.focus_density))
    }

    pub fn daily_summary(&self, date: NaiveDate) -> DailySummary {
        stats::summarize_day(&self.sessions, date, &self.scorer)
    }

    /// One summary per day for the `days` days ending on `today`, oldest
    /// first.
    pub fn daily_summaries(&self, today: NaiveDate, days: u32) -> Vec<DailySummary> {
        (0..days)
            .rev()
            .filter_map(|back| today.checked_sub_days(chrono::Days::new(u64::from(back))))
            .map(|date| self.daily_summary(date))
            .collect()
    }
}
