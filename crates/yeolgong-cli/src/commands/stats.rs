use clap::Subcommand;

use super::{close_engine, open_engine, print_json, CliResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Today's totals, goal progress, mood and streak
    Today,
    /// Per-day totals, oldest first
    Days {
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// Recorded sessions, newest first
    Sessions {
        /// Only this many sessions
        #[arg(long)]
        limit: Option<usize>,
    },
}

pub fn run(action: StatsAction) -> CliResult {
    let engine = open_engine()?;

    match action {
        StatsAction::Today => print_json(&engine.today_summary())?,
        StatsAction::Days { days } => print_json(&engine.daily_summaries(days))?,
        StatsAction::Sessions { limit } => {
            let sessions: Vec<_> = engine
                .sessions()
                .iter()
                .rev()
                .take(limit.unwrap_or(usize::MAX))
                .collect();
            print_json(&sessions)?;
        }
    }

    close_engine(engine)
}
