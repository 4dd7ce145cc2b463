pub mod app;
pub mod config;
pub mod dday;
pub mod score;
pub mod settings;
pub mod stats;
pub mod subject;
pub mod timer;
pub mod todo;

use serde::Serialize;
use yeolgong_core::{Config, Database, LogNotifier, StudyEngine, SystemClock};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

pub type Engine = StudyEngine<Database, SystemClock>;

/// Open the engine over the on-disk store. Loading catches running timers
/// up to the current wall-clock time.
pub fn open_engine() -> Result<Engine, Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();
    Ok(StudyEngine::load(
        db,
        SystemClock,
        Box::new(LogNotifier),
        &config,
    ))
}

/// Write everything back. Events produced by this invocation go to stderr
/// as JSON lines so stdout stays a single document.
pub fn close_engine(mut engine: Engine) -> CliResult {
    for event in engine.drain_events() {
        eprintln!("{}", serde_json::to_string(&event)?);
    }
    if !engine.persist_all() {
        return Err("failed to save state".into());
    }
    Ok(())
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
