use clap::Subcommand;
use serde_json::json;

use super::{close_engine, open_engine, print_json, CliResult};

#[derive(Subcommand)]
pub enum AppAction {
    /// The app went to the background
    Background,
    /// The app came back to the foreground
    Foreground,
}

pub fn run(action: AppAction) -> CliResult {
    let mut engine = open_engine()?;

    match action {
        AppAction::Background => {
            engine.on_background();
            print_json(&json!({
                "backgrounded": engine.is_backgrounded(),
                "timers": engine.snapshot(),
            }))?;
        }
        AppAction::Foreground => {
            let resumed = engine.on_foreground();
            let quick_return = resumed.measured
                && resumed.was_suspended
                && resumed.gap_secs <= engine.quick_return_secs();
            print_json(&json!({
                "was_backgrounded": resumed.was_suspended,
                "gap_secs": resumed.gap_secs,
                "measured": resumed.measured,
                "quick_return": quick_return,
                "timers": engine.snapshot(),
            }))?;
        }
    }

    close_engine(engine)
}
