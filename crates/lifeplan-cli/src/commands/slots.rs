use std::path::{Path, PathBuf};

use chrono::Duration;
use clap::Args;
use lifeplan_core::WeekPlanner;

use crate::common::{self, CliResult};

#[derive(Args)]
pub struct SlotsArgs {
    /// JSON file with calendar events
    #[arg(long)]
    pub events: PathBuf,
    /// First day of the search window (YYYY-MM-DD, default: today)
    #[arg(long)]
    pub from: Option<String>,
    /// Number of days to search
    #[arg(long, default_value_t = 7)]
    pub days: i64,
    /// Minimum slot duration in minutes
    #[arg(long, default_value_t = 30)]
    pub min_duration: i64,
    /// Restrict to slots suitable for one activity
    #[arg(long)]
    pub activity: Option<String>,
}

pub fn run(config: Option<&Path>, args: SlotsArgs) -> CliResult {
    let planner = WeekPlanner::new(common::load_config(config)?).with_min_slot(args.min_duration);
    let events = common::load_events(&args.events)?;
    let from = common::parse_date(args.from.as_deref())?;

    let slots = match &args.activity {
        Some(activity_id) => {
            let slots = planner.find_slots_for_activity(activity_id, &events, from, args.days)?;
            if slots.is_empty() && planner.config().activity_by_id(activity_id).is_none() {
                return Err(format!("unknown activity '{activity_id}'").into());
            }
            slots
        }
        None => planner.available_slots(
            &events,
            from,
            from + Duration::days(args.days),
            args.min_duration,
        )?,
    };

    if slots.is_empty() {
        println!("no free slots found");
        return Ok(());
    }
    for slot in slots {
        println!(
            "{} - {}  ({} min)",
            slot.start.format("%Y-%m-%d %H:%M"),
            slot.end.format("%Y-%m-%d %H:%M"),
            slot.duration_minutes()
        );
    }
    Ok(())
}
