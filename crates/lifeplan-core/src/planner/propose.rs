//! Greedy proposal generation.
//!
//! Fills the week's free slots with sessions for deficit activities, in
//! priority order. No backtracking: an activity that cannot find a long
//! enough slot keeps its residual deficit in the returned coverage, which is
//! a reported condition, not an error.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::calendar::{EventDraft, ScheduledEvent};
use crate::config::{Activity, ActivityCategory, Config, Tier};
use crate::planner::WeekPlanner;
use crate::timeline::preference::slot_matches;

/// A proposed booking for one activity session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedEvent {
    pub id: String,
    pub activity_id: String,
    pub activity_name: String,
    pub category: ActivityCategory,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub tier: Tier,
    pub rationale: String,
}

impl ProposedEvent {
    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Render this proposal as a calendar-event draft for the caller to
    /// realize via the calendar collaborator.
    pub fn event_draft(&self, config: &Config) -> EventDraft {
        let format = &config.event_format;
        let category_suffix = if format.include_category {
            format!(" [{}]", self.category.as_str())
        } else {
            String::new()
        };
        let title = format!("{}{}{}", format.prefix, self.activity_name, category_suffix)
            .trim()
            .to_string();

        let activity = config.activity_by_id(&self.activity_id);
        let mut description = format!(
            "Planned activity\nCategory: {}\nActivity: {}",
            self.category.as_str(),
            self.activity_id
        );
        if let Some(note) = activity.and_then(|a| a.note.as_deref()) {
            description.push_str("\n\nNote: ");
            description.push_str(note);
        }

        EventDraft {
            title,
            description,
            start: self.start,
            end: self.end,
            location: activity.and_then(|a| a.location.clone()),
            activity_id: self.activity_id.clone(),
        }
    }

    /// View this proposal as a booked, tagged calendar event. Useful for
    /// re-analyzing a week as if the proposal had been accepted.
    pub fn as_scheduled_event(&self) -> ScheduledEvent {
        ScheduledEvent::new(self.id.clone(), self.activity_name.clone(), self.start, self.end)
            .with_activity(self.activity_id.clone())
    }
}

/// Post-proposal coverage for one activity: existing plus proposed sessions
/// against the weekly target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub scheduled: u32,
    pub target: u32,
    pub covered: bool,
}

/// A complete week proposal: the bookings plus the resulting coverage.
///
/// Ephemeral -- produced per request and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleProposal {
    pub week_start: DateTime<Utc>,
    pub week_end: DateTime<Utc>,
    pub proposals: Vec<ProposedEvent>,
    pub coverage: BTreeMap<String, CoverageSummary>,
}

pub(crate) fn generate(
    planner: &WeekPlanner,
    events: &[ScheduledEvent],
    reference: DateTime<Utc>,
) -> Result<ScheduleProposal, crate::error::CoreError> {
    let (week_start, week_end) = WeekPlanner::week_bounds(reference);
    debug!(%week_start, %week_end, "generating weekly schedule proposal");

    let analysis = planner.analyze_week(events, week_start);
    let mut available = planner.week_available_slots(events, week_start)?;

    // Deficit activities in configuration order, then a stable sort by
    // (priority rank ascending, deficit descending). The stable sort is what
    // makes equal-rank, equal-deficit activities keep configuration order.
    let mut deficits: Vec<&Activity> = planner
        .config()
        .activities
        .iter()
        .filter(|activity| {
            analysis
                .get(&activity.id)
                .is_some_and(|info| info.sessions_deficit > 0)
        })
        .collect();
    deficits.sort_by_key(|activity| {
        let info = &analysis[&activity.id];
        (info.tier.rank(), Reverse(info.sessions_deficit))
    });

    let mut proposals: Vec<ProposedEvent> = Vec::new();

    for activity in deficits {
        let info = &analysis[&activity.id];
        let min_duration = activity.min_duration() as i64;
        let mut needed = info.sessions_deficit;

        while needed > 0 {
            // Preference-filtered candidates, falling back to the full list
            // so a preference mismatch alone never blocks scheduling.
            let preferred: Vec<usize> = (0..available.len())
                .filter(|&index| slot_matches(&available[index], activity))
                .collect();
            let candidates = if preferred.is_empty() {
                (0..available.len()).collect()
            } else {
                preferred
            };

            // First fit: shrunken and zero-length slots fail the duration
            // check and are skipped naturally.
            let Some(index) = candidates
                .into_iter()
                .find(|&index| available[index].duration_minutes() >= min_duration)
            else {
                break;
            };

            let slot = &mut available[index];
            let booked = min_duration.min(slot.duration_minutes());
            let end = slot.start + Duration::minutes(booked);

            proposals.push(ProposedEvent {
                id: Uuid::new_v4().to_string(),
                activity_id: activity.id.clone(),
                activity_name: activity.name.clone(),
                category: activity.category,
                start: slot.start,
                end,
                tier: info.tier,
                rationale: format!(
                    "Filling deficit of {} sessions for {}",
                    info.sessions_deficit, activity.name
                ),
            });

            // Shrink in place; consumed time is never re-offered, the
            // remainder stays eligible for later activities.
            slot.start = end;
            needed -= 1;
        }

        if needed > 0 {
            debug!(
                activity_id = %activity.id,
                remaining = needed,
                "no qualifying slot left for activity"
            );
        }
    }

    // Final coverage: existing scheduled counts plus proposed bookings.
    let mut coverage = BTreeMap::new();
    for (activity_id, info) in &analysis {
        let proposed = proposals
            .iter()
            .filter(|proposal| &proposal.activity_id == activity_id)
            .count() as u32;
        let scheduled = info.scheduled_sessions + proposed;
        coverage.insert(
            activity_id.clone(),
            CoverageSummary {
                scheduled,
                target: info.target_sessions,
                covered: scheduled >= info.target_sessions,
            },
        );
    }

    info!(
        proposed = proposals.len(),
        covered = coverage.values().filter(|summary| summary.covered).count(),
        activities = coverage.len(),
        "schedule proposal generated"
    );

    Ok(ScheduleProposal {
        week_start,
        week_end,
        proposals,
        coverage,
    })
}
