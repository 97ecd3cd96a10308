use std::path::Path;

use lifeplan_core::WeekPlanner;

use crate::common::{self, CliResult};

pub fn run(config: Option<&Path>, json: bool) -> CliResult {
    let planner = WeekPlanner::new(common::load_config(config)?);
    let requirements = planner.weekly_requirements();

    if json {
        println!("{}", serde_json::to_string_pretty(&requirements)?);
        return Ok(());
    }

    for requirement in requirements.values() {
        println!(
            "{} ({}): {}-{} sessions of {}-{} min, {}-{} min/week [{}]",
            requirement.activity_name,
            requirement.activity_id,
            requirement.min_sessions,
            requirement.max_sessions,
            requirement.min_duration,
            requirement.max_duration,
            requirement.total_min_minutes,
            requirement.total_max_minutes,
            requirement.tier.as_str()
        );
    }
    Ok(())
}
