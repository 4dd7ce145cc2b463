//! The persisted timer snapshot.
//!
//! Each running timer is stored with the wall-clock instant its
//! `elapsed_secs` was true at. A later process catches it up by the time
//! since that anchor, through the same advance path a foreground gap uses,
//! so completions and phase flips missed while no process was alive are
//! synthesized exactly once.
//!
//! A snapshot written while the app was backgrounded carries `suspended_at`
//! and the timers that were running at that instant. Restoring it only
//! catches up to the suspension; the rest of the gap belongs to the next
//! foreground.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::whole_secs_between;
use crate::timer::{Timer, TimerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchoredTimer {
    pub timer: Timer,
    /// Set for running timers only.
    #[serde(default)]
    pub anchored_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Instant the stored elapsed values were true at.
    pub saved_at: DateTime<Utc>,
    #[serde(default)]
    pub suspended_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timers: Vec<AnchoredTimer>,
    /// Timers that were running when the app went to the background.
    #[serde(default)]
    pub backgrounded: Vec<TimerId>,
}

impl TimerSnapshot {
    pub fn capture(
        timers: &[Timer],
        saved_at: DateTime<Utc>,
        suspended_at: Option<DateTime<Utc>>,
        backgrounded: &[TimerId],
    ) -> Self {
        Self {
            saved_at,
            suspended_at,
            timers: timers
                .iter()
                .map(|timer| AnchoredTimer {
                    anchored_at: timer.is_running().then_some(saved_at),
                    timer: timer.clone(),
                })
                .collect(),
            backgrounded: if suspended_at.is_some() {
                backgrounded.to_vec()
            } else {
                Vec::new()
            },
        }
    }

    /// `saved_at` moved forward by the whole seconds caught up at `until`,
    /// i.e. the instant restored elapsed values are exact at.
    pub fn synced_at(&self, until: DateTime<Utc>) -> DateTime<Utc> {
        let anchor = self.saved_at;
        i64::try_from(whole_secs_between(anchor, until))
            .ok()
            .and_then(|secs| anchor.checked_add_signed(Duration::seconds(secs)))
            .unwrap_or(anchor)
    }

    /// The instant restored timers are caught up to: the suspension
    /// instant if there was one, otherwise `now`.
    pub fn catch_up_until(&self, now: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
        self.suspended_at.or(now)
    }

    /// Seconds each running timer is behind at `until`. Anchors in the
    /// future yield nothing.
    pub fn catch_up(&self, until: DateTime<Utc>) -> Vec<(TimerId, u64)> {
        self.timers
            .iter()
            .filter(|entry| entry.timer.is_running())
            .filter_map(|entry| {
                let gap = whole_secs_between(entry.anchored_at?, until);
                (gap > 0).then(|| (entry.timer.id().clone(), gap))
            })
            .collect()
    }

    /// Split into the restored timers and the backgrounded set.
    pub fn into_parts(self) -> (Vec<Timer>, Vec<TimerId>) {
        let timers = self.timers.into_iter().map(|entry| entry.timer).collect();
        (timers, self.backgrounded)
    }
}
