use clap::Subcommand;
use serde_json::json;

use super::{close_engine, open_engine, print_json, CliResult};

const DEFAULT_COLOR: &str = "#4A90D9";

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Add a subject
    Add {
        name: String,
        #[arg(long, default_value = DEFAULT_COLOR)]
        color: String,
    },
    /// List subjects with their study totals
    List,
    /// Rename a subject
    Rename { id: String, name: String },
    /// Toggle a subject's favourite flag
    Favorite { id: String },
}

pub fn run(action: SubjectAction) -> CliResult {
    let mut engine = open_engine()?;

    match action {
        SubjectAction::Add { name, color } => {
            let subject = engine.add_subject(name, color);
            print_json(&subject)?;
        }
        SubjectAction::List => print_json(engine.subjects())?,
        SubjectAction::Rename { id, name } => {
            engine.rename_subject(&id, name)?;
            print_json(&json!({ "id": id, "renamed": true }))?;
        }
        SubjectAction::Favorite { id } => {
            let favorite = engine.toggle_favorite(&id)?;
            print_json(&json!({ "id": id, "is_favorite": favorite }))?;
        }
    }

    close_engine(engine)
}
