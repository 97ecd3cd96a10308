//! Human-readable rendering of proposals and coverage.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::config::Config;
use crate::planner::coverage::CoverageInfo;
use crate::planner::propose::ScheduleProposal;

const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Render a proposal as text grouped by day, with a trailing coverage
/// checklist.
pub fn render_proposal(proposal: &ScheduleProposal, config: &Config) -> String {
    let mut lines = vec![
        format!(
            "Schedule proposal for week of {}",
            proposal.week_start.format("%B %-d, %Y")
        ),
        String::new(),
    ];

    let mut by_day: BTreeMap<usize, Vec<&crate::planner::propose::ProposedEvent>> =
        BTreeMap::new();
    for event in &proposal.proposals {
        by_day
            .entry(event.start.weekday().num_days_from_monday() as usize)
            .or_default()
            .push(event);
    }

    for (day_index, mut events) in by_day {
        lines.push(format!("{}:", DAY_NAMES[day_index]));
        events.sort_by_key(|event| event.start);
        for event in events {
            lines.push(format!(
                "  {}-{}  {}",
                event.start.format("%H:%M"),
                event.end.format("%H:%M"),
                event.activity_name
            ));
        }
        lines.push(String::new());
    }

    lines.push("Coverage:".to_string());
    for (activity_id, summary) in &proposal.coverage {
        let name = config
            .activity_by_id(activity_id)
            .map(|activity| activity.name.as_str())
            .unwrap_or(activity_id);
        let status = if summary.covered { "✓" } else { "✗" };
        lines.push(format!(
            "  {} {}: {}/{} sessions",
            status, name, summary.scheduled, summary.target
        ));
    }

    lines.join("\n")
}

/// Render a coverage analysis as a per-activity checklist.
pub fn render_coverage(analysis: &BTreeMap<String, CoverageInfo>) -> String {
    let mut lines = Vec::with_capacity(analysis.len());
    for info in analysis.values() {
        let status = if info.on_track { "✓" } else { "✗" };
        let mut line = format!(
            "{} {}: {}/{} sessions, {} min scheduled",
            status,
            info.activity_name,
            info.scheduled_sessions,
            info.target_sessions,
            info.scheduled_minutes
        );
        if info.sessions_deficit > 0 {
            line.push_str(&format!(" ({} short)", info.sessions_deficit));
        }
        if info.sessions_surplus > 0 {
            line.push_str(&format!(" ({} over)", info.sessions_surplus));
        }
        lines.push(line);
    }
    lines.join("\n")
}
