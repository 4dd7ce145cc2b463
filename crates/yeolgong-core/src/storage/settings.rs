//! User preferences, persisted as the `yeolgong/settings` document.

use serde::{Deserialize, Serialize};

use super::{get_json_value_by_path, set_json_value_by_path};
use crate::error::ConfigError;
use crate::session::Streak;
use crate::timer::TimerSpec;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub daily_goal_minutes: u32,
    pub pomodoro_work_minutes: u32,
    pub pomodoro_break_minutes: u32,
    /// Falls back to the short break when unset.
    pub pomodoro_long_break_minutes: Option<u32>,
    pub notifications_enabled: bool,
    /// Every new timer runs in ultra focus mode.
    pub ultra_focus_strict: bool,
    #[serde(flatten)]
    pub streak: Streak,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            daily_goal_minutes: 360,
            pomodoro_work_minutes: 25,
            pomodoro_break_minutes: 5,
            pomodoro_long_break_minutes: None,
            notifications_enabled: true,
            ultra_focus_strict: false,
            streak: Streak::default(),
        }
    }
}

impl Settings {
    /// A pomodoro spec using the configured lengths.
    pub fn pomodoro_spec(&self) -> TimerSpec {
        let spec = TimerSpec::pomodoro(self.pomodoro_work_minutes, self.pomodoro_break_minutes);
        match self.pomodoro_long_break_minutes {
            Some(minutes) => spec.with_long_break(minutes),
            None => spec,
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        match get_json_value_by_path(&json, key)? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set one field by name, parsing `value` after the field's type.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or the value does not fit.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json =
            serde_json::to_value(&*self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        set_json_value_by_path(&mut json, key, value)?;
        *self = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}
