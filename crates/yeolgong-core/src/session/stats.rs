//! Per-day aggregates over the session log.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Session;
use crate::density::{average_density, DensityScorer};
use crate::timer::projection::format_short;

/// Mascot mood for the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Normal,
    Sad,
}

impl Mood {
    /// Happy at 80% of the goal, sad under ten minutes, normal otherwise.
    pub fn assess(studied_secs: u64, goal_minutes: u32) -> Self {
        let goal_secs = u64::from(goal_minutes) * 60;
        if studied_secs * 5 >= goal_secs * 4 {
            Mood::Happy
        } else if studied_secs < 600 {
            Mood::Sad
        } else {
            Mood::Normal
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_secs: u64,
    pub session_count: usize,
    /// Zero on days without sessions.
    pub average_density: u32,
    pub tier: Option<String>,
}

pub fn summarize_day(sessions: &[Session], date: NaiveDate, scorer: &DensityScorer) -> DailySummary {
    let day: Vec<&Session> = sessions.iter().filter(|s| s.date == date).collect();
    let average = average_density(day.iter().map(|s| s.focus_density));
    DailySummary {
        date,
        total_secs: day.iter().map(|s| s.duration_secs).sum(),
        session_count: day.len(),
        average_density: average,
        tier: (!day.is_empty()).then(|| scorer.tier(average).id.clone()),
    }
}

/// Dashboard numbers for today, including time on still-running timers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodaySummary {
    #[serde(flatten)]
    pub day: DailySummary,
    pub running_secs: u64,
    pub goal_secs: u64,
    /// Recorded plus running time over the goal, capped at 1.0.
    pub goal_progress: f64,
    /// Recorded plus running time, e.g. `1h 5m`.
    pub studied_display: String,
    pub mood: Mood,
    pub streak: u32,
}

impl TodaySummary {
    pub fn new(day: DailySummary, running_secs: u64, goal_minutes: u32, streak: u32) -> Self {
        let goal_secs = u64::from(goal_minutes) * 60;
        let studied = day.total_secs + running_secs;
        let goal_progress = if goal_secs == 0 {
            1.0
        } else {
            (studied as f64 / goal_secs as f64).min(1.0)
        };
        Self {
            day,
            running_secs,
            goal_secs,
            goal_progress,
            studied_display: format_short(studied),
            mood: Mood::assess(studied, goal_minutes),
            streak,
        }
    }
}
