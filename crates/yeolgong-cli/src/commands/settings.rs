use clap::Subcommand;

use super::{close_engine, open_engine, print_json, CliResult};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print all settings as JSON
    Show,
    /// Set a setting (e.g. "daily_goal_minutes", "notifications_enabled")
    Set {
        key: String,
        /// New value; "null" clears optional settings
        value: String,
    },
}

pub fn run(action: SettingsAction) -> CliResult {
    let mut engine = open_engine()?;

    match action {
        SettingsAction::Show => print_json(engine.settings())?,
        SettingsAction::Set { key, value } => {
            engine.set_setting(&key, &value)?;
            print_json(engine.settings())?;
        }
    }

    close_engine(engine)
}
