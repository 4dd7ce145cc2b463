use clap::Subcommand;
use serde_json::json;

use super::{close_engine, open_engine, print_json, CliResult};

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add a to-do
    Add { text: String },
    /// List to-dos with the done count
    List,
    /// Flip a to-do between done and open
    Toggle { id: String },
    /// Remove a to-do
    Remove { id: String },
}

pub fn run(action: TodoAction) -> CliResult {
    let mut engine = open_engine()?;

    match action {
        TodoAction::Add { text } => print_json(&engine.add_todo(&text)?)?,
        TodoAction::List => {
            let (done, total) = engine.planner().todo_progress();
            print_json(&json!({
                "done": done,
                "total": total,
                "todos": engine.planner().todos(),
            }))?;
        }
        TodoAction::Toggle { id } => {
            let done = engine.toggle_todo(&id)?;
            print_json(&json!({ "id": id, "done": done }))?;
        }
        TodoAction::Remove { id } => {
            let removed = engine.remove_todo(&id)?;
            print_json(&removed)?;
        }
    }

    close_engine(engine)
}
