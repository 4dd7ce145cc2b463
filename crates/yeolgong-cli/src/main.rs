use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "yeolgong", version, about = "Yeolgong study timer CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// App lifecycle (background / foreground)
    App {
        #[command(subcommand)]
        action: commands::app::AppAction,
    },
    /// Study statistics
    Stats {
        #[command(subcommand)]
        action: commands::stats::StatsAction,
    },
    /// Subject management
    Subject {
        #[command(subcommand)]
        action: commands::subject::SubjectAction,
    },
    /// Exam D-days
    Dday {
        #[command(subcommand)]
        action: commands::dday::DDayAction,
    },
    /// To-do list
    Todo {
        #[command(subcommand)]
        action: commands::todo::TodoAction,
    },
    /// User settings
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
    /// Engine configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Score a run without recording it
    Score(commands::score::ScoreArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("YEOLGONG_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action),
        Commands::App { action } => commands::app::run(action),
        Commands::Stats { action } => commands::stats::run(action),
        Commands::Subject { action } => commands::subject::run(action),
        Commands::Dday { action } => commands::dday::run(action),
        Commands::Todo { action } => commands::todo::run(action),
        Commands::Settings { action } => commands::settings::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Score(args) => commands::score::run(args),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
