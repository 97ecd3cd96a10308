use std::path::{Path, PathBuf};

use clap::Args;
use lifeplan_core::{planner::render_coverage, MatchMode, WeekPlanner};

use crate::common::{self, CliResult};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// JSON file with the week's calendar events
    #[arg(long)]
    pub events: PathBuf,
    /// Any date inside the target week (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub week: Option<String>,
    /// Match events to activities by explicit tag only
    #[arg(long)]
    pub strict: bool,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(config: Option<&Path>, args: AnalyzeArgs) -> CliResult {
    let mode = if args.strict {
        MatchMode::Strict
    } else {
        MatchMode::Heuristic
    };
    let planner = WeekPlanner::new(common::load_config(config)?).with_match_mode(mode);
    let events = common::load_events(&args.events)?;
    let reference = common::parse_date(args.week.as_deref())?;

    let analysis = planner.analyze_week(&events, reference);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        let (week_start, week_end) = WeekPlanner::week_bounds(reference);
        println!(
            "Coverage for {} .. {}",
            week_start.format("%Y-%m-%d"),
            week_end.format("%Y-%m-%d")
        );
        println!("{}", render_coverage(&analysis));
    }
    Ok(())
}
