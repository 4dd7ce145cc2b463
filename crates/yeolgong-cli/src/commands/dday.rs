use clap::Subcommand;
use serde_json::json;
use yeolgong_core::planner::parse_date;

use super::{close_engine, open_engine, print_json, CliResult};

#[derive(Subcommand)]
pub enum DDayAction {
    /// Add a D-day; the first one becomes primary
    Add {
        label: String,
        /// Target date, YYYY-MM-DD
        date: String,
        #[arg(long)]
        emoji: Option<String>,
    },
    /// List D-days with the days left
    List,
    /// Remove a D-day
    Remove { id: String },
    /// Make a D-day the primary one
    Primary { id: String },
}

pub fn run(action: DDayAction) -> CliResult {
    let mut engine = open_engine()?;

    match action {
        DDayAction::Add { label, date, emoji } => {
            let date = parse_date(&date)?;
            let dday = engine.add_dday(&label, date, emoji.as_deref())?;
            print_json(&json!({
                "dday": dday,
                "primary": engine.primary_dday_view(),
            }))?;
        }
        DDayAction::List => print_json(&engine.dday_views())?,
        DDayAction::Remove { id } => {
            engine.remove_dday(&id)?;
            print_json(&json!({ "id": id, "removed": true, "primary": engine.primary_dday_view() }))?;
        }
        DDayAction::Primary { id } => {
            engine.set_primary_dday(&id)?;
            print_json(&engine.primary_dday_view())?;
        }
    }

    close_engine(engine)
}
