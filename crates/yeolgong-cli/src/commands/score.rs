use clap::Args;
use serde_json::json;
use yeolgong_core::{Config, DensityInput, DensityScorer};

use super::{print_json, CliResult};

/// Counters for a hypothetical run.
#[derive(Args)]
pub struct ScoreArgs {
    #[arg(long, default_value_t = 0)]
    pauses: u32,
    #[arg(long, default_value_t = 0)]
    exits: u32,
    #[arg(long = "quick-returns", default_value_t = 0)]
    quick_returns: u32,
    /// Run length in seconds
    #[arg(long)]
    secs: u64,
    /// The run finished in ultra focus mode
    #[arg(long)]
    ultra: bool,
}

pub fn run(args: ScoreArgs) -> CliResult {
    let scorer = DensityScorer::new(Config::load_or_default().density);
    let input = DensityInput {
        pause_count: args.pauses,
        app_exit_count: args.exits,
        quick_return_count: args.quick_returns,
        total_secs: args.secs,
        ultra_focus_completed: args.ultra,
    };
    let result = scorer.evaluate(&input);
    let tier = scorer.tier(result.density);

    print_json(&json!({
        "density": result.density,
        "tier": result.tier,
        "label": tier.label,
        "color": tier.color,
        "message": tier.message,
    }))
}
