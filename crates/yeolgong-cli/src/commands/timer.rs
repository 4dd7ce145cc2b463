use clap::{Subcommand, ValueEnum};
use serde_json::json;
use yeolgong_core::{CoreError, TimerId, TimerSpec, TimerView};

use super::{close_engine, open_engine, print_json, CliResult, Engine};

#[derive(Clone, Copy, ValueEnum)]
pub enum Kind {
    Free,
    Countdown,
    Pomodoro,
}

#[derive(Subcommand)]
pub enum TimerAction {
    /// Create and start a timer
    Create {
        #[arg(value_enum)]
        kind: Kind,
        /// Countdown length in seconds
        #[arg(long)]
        secs: Option<u64>,
        /// Pomodoro work minutes (defaults to settings)
        #[arg(long)]
        work: Option<u32>,
        /// Pomodoro break minutes (defaults to settings)
        #[arg(long = "break")]
        break_minutes: Option<u32>,
        /// Pomodoro long break minutes (defaults to settings)
        #[arg(long)]
        long_break: Option<u32>,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        color: Option<String>,
        /// Subject ID to count the time towards
        #[arg(long)]
        subject: Option<String>,
        /// Ultra focus mode
        #[arg(long)]
        ultra: bool,
    },
    /// Pause a running timer
    Pause { id: String },
    /// Resume a paused timer
    Resume { id: String },
    /// Stop a timer, recording the session if it ran long enough
    Stop { id: String },
    /// Start a completed timer over
    Restart { id: String },
    /// Rewind a timer to zero, paused
    Reset { id: String },
    /// Remove a timer
    Remove { id: String },
    /// Print all timers as JSON
    List,
}

/// Options of `timer create` beyond the kind.
struct CreateOptions {
    secs: Option<u64>,
    work: Option<u32>,
    break_minutes: Option<u32>,
    long_break: Option<u32>,
    label: Option<String>,
    color: Option<String>,
    subject: Option<String>,
    ultra: bool,
}

fn build_spec(
    engine: &Engine,
    kind: Kind,
    options: CreateOptions,
) -> Result<TimerSpec, Box<dyn std::error::Error>> {
    let CreateOptions {
        secs,
        work,
        break_minutes,
        long_break,
        label,
        color,
        subject,
        ultra,
    } = options;

    let settings = engine.settings();
    let mut spec = match kind {
        Kind::Free => TimerSpec::free(),
        Kind::Countdown => TimerSpec::countdown(secs.ok_or("countdown needs --secs")?),
        Kind::Pomodoro if work.is_none() && break_minutes.is_none() && long_break.is_none() => {
            settings.pomodoro_spec()
        }
        Kind::Pomodoro => {
            let spec = TimerSpec::pomodoro(
                work.unwrap_or(settings.pomodoro_work_minutes),
                break_minutes.unwrap_or(settings.pomodoro_break_minutes),
            );
            match long_break.or(settings.pomodoro_long_break_minutes) {
                Some(minutes) => spec.with_long_break(minutes),
                None => spec,
            }
        }
    };
    if let Some(label) = label {
        spec = spec.with_label(label);
    }
    if let Some(color) = color {
        spec = spec.with_color(color);
    }
    if let Some(subject) = subject {
        spec = spec.with_subject(subject);
    }
    if ultra {
        spec = spec.with_ultra_focus();
    }
    Ok(spec)
}

fn transition(
    engine: &mut Engine,
    id: &str,
    apply: fn(&mut Engine, &TimerId) -> bool,
) -> CliResult {
    let id = TimerId::from(id);
    if engine.timer(&id).is_none() {
        return Err(CoreError::TimerNotFound(id.to_string()).into());
    }
    let changed = apply(engine, &id);
    let timer = engine.timer(&id).map(TimerView::from);
    print_json(&json!({ "id": id, "changed": changed, "timer": timer }))
}

pub fn run(action: TimerAction) -> CliResult {
    let mut engine = open_engine()?;

    match action {
        TimerAction::Create {
            kind,
            secs,
            work,
            break_minutes,
            long_break,
            label,
            color,
            subject,
            ultra,
        } => {
            let options = CreateOptions {
                secs,
                work,
                break_minutes,
                long_break,
                label,
                color,
                subject,
                ultra,
            };
            let spec = build_spec(&engine, kind, options)?;
            let id = engine.create_timer(spec)?;
            let view = engine.timer(&id).map(TimerView::from);
            print_json(&view)?;
        }
        TimerAction::Pause { id } => transition(&mut engine, &id, Engine::pause_timer)?,
        TimerAction::Resume { id } => transition(&mut engine, &id, Engine::resume_timer)?,
        TimerAction::Stop { id } => transition(&mut engine, &id, Engine::stop_timer)?,
        TimerAction::Restart { id } => transition(&mut engine, &id, Engine::restart_timer)?,
        TimerAction::Reset { id } => transition(&mut engine, &id, Engine::reset_timer)?,
        TimerAction::Remove { id } => transition(&mut engine, &id, Engine::remove_timer)?,
        TimerAction::List => print_json(&engine.snapshot())?,
    }

    close_engine(engine)
}
