use std::path::{Path, PathBuf};

use clap::Args;
use lifeplan_core::{planner::render_proposal, EventDraft, WeekPlanner};

use crate::common::{self, CliResult};

#[derive(Args)]
pub struct ProposeArgs {
    /// JSON file with the week's calendar events
    #[arg(long)]
    pub events: PathBuf,
    /// Any date inside the target week (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub week: Option<String>,
    /// Output event drafts as JSON instead of the text report
    #[arg(long)]
    pub json: bool,
}

pub fn run(config: Option<&Path>, args: ProposeArgs) -> CliResult {
    let planner = WeekPlanner::new(common::load_config(config)?);
    let events = common::load_events(&args.events)?;
    let reference = common::parse_date(args.week.as_deref())?;

    let proposal = planner.propose_week(&events, reference)?;
    if args.json {
        let drafts: Vec<EventDraft> = proposal
            .proposals
            .iter()
            .map(|proposed| proposed.event_draft(planner.config()))
            .collect();
        println!("{}", serde_json::to_string_pretty(&drafts)?);
    } else {
        println!("{}", render_proposal(&proposal, planner.config()));
    }
    Ok(())
}
