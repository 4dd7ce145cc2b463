//! Exam countdowns (D-days) and the to-do list.
//!
//! At most one D-day is primary at a time; whenever the list is non-empty
//! exactly one is.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, Result, ValidationError};

/// Most D-days kept at once.
pub const MAX_DDAYS: usize = 10;

const DEFAULT_EMOJI: &str = "📅";

/// A dated target such as an exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DDay {
    pub id: String,
    pub label: String,
    pub date: NaiveDate,
    #[serde(default = "default_emoji")]
    pub emoji: String,
    #[serde(default)]
    pub is_primary: bool,
}

fn default_emoji() -> String {
    DEFAULT_EMOJI.to_string()
}

/// One to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

/// Parse a `YYYY-MM-DD` date.
///
/// # Errors
/// Returns [`ValidationError::InvalidValue`] for anything else.
pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| ValidationError::InvalidValue {
        field: "date".into(),
        message: format!("'{raw}' is not a YYYY-MM-DD date: {e}"),
    })
}

/// Whole days from `today` to `date`; negative once it has passed.
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// `D-3` before the day, `D-Day` on it, `D+2` after.
pub fn format_d_day(days: i64) -> String {
    match days {
        0 => "D-Day".to_string(),
        d if d > 0 => format!("D-{d}"),
        d => format!("D+{}", d.unsigned_abs()),
    }
}

fn non_empty(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidValue {
            field: field.to_string(),
            message: "must not be empty".into(),
        });
    }
    Ok(trimmed.to_string())
}

/// Owned UI row for one D-day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DDayView {
    pub id: String,
    pub label: String,
    pub date: NaiveDate,
    pub emoji: String,
    pub is_primary: bool,
    pub days_left: i64,
    pub display: String,
}

impl DDayView {
    pub fn new(dday: &DDay, today: NaiveDate) -> Self {
        let days_left = days_until(dday.date, today);
        Self {
            id: dday.id.clone(),
            label: dday.label.clone(),
            date: dday.date,
            emoji: dday.emoji.clone(),
            is_primary: dday.is_primary,
            days_left,
            display: format_d_day(days_left),
        }
    }
}

/// D-days and to-dos, persisted as two documents.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    ddays: Vec<DDay>,
    todos: Vec<Todo>,
}

impl Planner {
    /// Rebuild from stored documents, repairing the primary flag.
    pub fn restore(mut ddays: Vec<DDay>, todos: Vec<Todo>) -> Self {
        let mut seen = false;
        for dday in &mut ddays {
            dday.is_primary = dday.is_primary && !seen;
            seen |= dday.is_primary;
        }
        let mut planner = Self { ddays, todos };
        planner.ensure_primary();
        planner
    }

    // ── D-days ───────────────────────────────────────────────────────

    /// Add a D-day. The first one becomes primary.
    pub fn add_dday(
        &mut self,
        label: &str,
        date: NaiveDate,
        emoji: Option<&str>,
    ) -> Result<&DDay> {
        let label = non_empty("label", label)?;
        if self.ddays.len() >= MAX_DDAYS {
            return Err(ValidationError::InvalidValue {
                field: "ddays".into(),
                message: format!("at most {MAX_DDAYS} D-days"),
            }
            .into());
        }
        self.ddays.push(DDay {
            id: format!("dd_{}", Uuid::new_v4().simple()),
            label,
            date,
            emoji: emoji.map_or_else(default_emoji, str::to_string),
            is_primary: self.ddays.is_empty(),
        });
        Ok(&self.ddays[self.ddays.len() - 1])
    }

    /// Remove a D-day. Losing the primary promotes the first one left.
    pub fn remove_dday(&mut self, id: &str) -> Result<DDay> {
        let index = self.dday_index(id)?;
        let removed = self.ddays.remove(index);
        self.ensure_primary();
        Ok(removed)
    }

    pub fn set_primary_dday(&mut self, id: &str) -> Result<()> {
        self.dday_index(id)?;
        for dday in &mut self.ddays {
            dday.is_primary = dday.id == id;
        }
        Ok(())
    }

    pub fn ddays(&self) -> &[DDay] {
        &self.ddays
    }

    pub fn primary_dday(&self) -> Option<&DDay> {
        self.ddays.iter().find(|d| d.is_primary)
    }

    fn dday_index(&self, id: &str) -> Result<usize> {
        self.ddays
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(|| CoreError::DDayNotFound(id.to_string()))
    }

    fn ensure_primary(&mut self) {
        if !self.ddays.iter().any(|d| d.is_primary) {
            if let Some(first) = self.ddays.first_mut() {
                first.is_primary = true;
            }
        }
    }

    // ── To-dos ───────────────────────────────────────────────────────

    pub fn add_todo(&mut self, text: &str) -> Result<&Todo> {
        let text = non_empty("text", text)?;
        self.todos.push(Todo {
            id: format!("todo_{}", Uuid::new_v4().simple()),
            text,
            done: false,
        });
        Ok(&self.todos[self.todos.len() - 1])
    }

    /// Flip the done flag, returning the new value.
    pub fn toggle_todo(&mut self, id: &str) -> Result<bool> {
        let todo = self
            .todos
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CoreError::TodoNotFound(id.to_string()))?;
        todo.done = !todo.done;
        Ok(todo.done)
    }

    pub fn remove_todo(&mut self, id: &str) -> Result<Todo> {
        let index = self
            .todos
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::TodoNotFound(id.to_string()))?;
        Ok(self.todos.remove(index))
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    /// `(done, total)`.
    pub fn todo_progress(&self) -> (usize, usize) {
        let done = self.todos.iter().filter(|t| t.done).count();
        (done, self.todos.len())
    }
}
