//! Scheduled-vs-required coverage analysis.
//!
//! Read-only over both the requirement set and the event list: tallies the
//! week's events per activity and reports deficits and surpluses. Events
//! count toward an activity through their explicit tag; activities with no
//! tagged events fall back to a case-insensitive name-substring match
//! against event titles. The fallback exists so manually created events
//! still count, at the cost of false positives on coincidental overlap --
//! an accepted heuristic, switchable off via [`MatchMode::Strict`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::ScheduledEvent;
use crate::config::Tier;
use crate::planner::requirements::WeeklyRequirement;

/// How events are matched to activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Explicit activity tags only.
    Strict,
    /// Tags first, then the name-substring fallback for untagged activities.
    #[default]
    Heuristic,
}

/// Coverage status for one activity in one week.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageInfo {
    pub activity_id: String,
    pub activity_name: String,
    pub target_sessions: u32,
    pub min_sessions: u32,
    pub max_sessions: u32,
    pub scheduled_sessions: u32,
    pub scheduled_minutes: i64,
    pub sessions_deficit: u32,
    pub sessions_surplus: u32,
    pub minutes_deficit: i64,
    pub tier: Tier,
    pub on_track: bool,
}

/// Compare the week's events against the requirement set.
///
/// Only events starting within `[week_start, week_end)` are counted.
pub fn analyze(
    requirements: &BTreeMap<String, WeeklyRequirement>,
    events: &[ScheduledEvent],
    week_start: DateTime<Utc>,
    week_end: DateTime<Utc>,
    mode: MatchMode,
) -> BTreeMap<String, CoverageInfo> {
    let in_week: Vec<&ScheduledEvent> = events
        .iter()
        .filter(|event| event.start >= week_start && event.start < week_end)
        .collect();

    let mut analysis = BTreeMap::new();

    for (activity_id, requirement) in requirements {
        let tagged: Vec<&&ScheduledEvent> = in_week
            .iter()
            .filter(|event| event.activity_id.as_deref() == Some(activity_id.as_str()))
            .collect();

        let (scheduled_sessions, scheduled_minutes) = if !tagged.is_empty()
            || mode == MatchMode::Strict
        {
            (
                tagged.len() as u32,
                tagged.iter().map(|event| event.duration_minutes()).sum(),
            )
        } else {
            let name = requirement.activity_name.to_lowercase();
            let matched: Vec<&&ScheduledEvent> = in_week
                .iter()
                .filter(|event| {
                    event.activity_id.is_none() && event.title.to_lowercase().contains(&name)
                })
                .collect();
            (
                matched.len() as u32,
                matched.iter().map(|event| event.duration_minutes()).sum(),
            )
        };

        let target_sessions = requirement.min_sessions;
        analysis.insert(
            activity_id.clone(),
            CoverageInfo {
                activity_id: activity_id.clone(),
                activity_name: requirement.activity_name.clone(),
                target_sessions,
                min_sessions: requirement.min_sessions,
                max_sessions: requirement.max_sessions,
                scheduled_sessions,
                scheduled_minutes,
                sessions_deficit: requirement.min_sessions.saturating_sub(scheduled_sessions),
                sessions_surplus: scheduled_sessions.saturating_sub(requirement.max_sessions),
                minutes_deficit: (requirement.total_min_minutes as i64 - scheduled_minutes).max(0),
                tier: requirement.tier,
                on_track: scheduled_sessions >= target_sessions,
            },
        );
    }

    analysis
}
