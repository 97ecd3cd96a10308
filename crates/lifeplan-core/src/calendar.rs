//! Calendar collaborator boundary.
//!
//! The planner only ever reads calendar data: events come in through
//! [`EventSource::list_events`] and accepted proposals go back out as
//! [`EventDraft`]s for the caller to realize. Event creation, updates and
//! deletion live entirely on the collaborator side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::Result;

/// An event already on the calendar.
///
/// `activity_id` is the explicit tag carried by planner-created events; the
/// coverage analyzer matches on it before falling back to title heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub activity_id: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ScheduledEvent {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            activity_id: None,
            location: None,
            description: None,
        }
    }

    /// Tag this event with the activity it belongs to.
    pub fn with_activity(mut self, activity_id: impl Into<String>) -> Self {
        self.activity_id = Some(activity_id.into());
        self
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Check if this event overlaps a time range
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && self.end > start
    }
}

/// Read capability of the calendar collaborator.
///
/// Implementations are free to be network-bound; the planner consumes
/// already-fetched data and never blocks on calendar I/O itself.
pub trait EventSource {
    /// Events overlapping `[start, end)`.
    fn list_events(&self, start: DateTime<Utc>, end: DateTime<Utc>)
        -> Result<Vec<ScheduledEvent>>;
}

/// In-memory [`EventSource`] over a fixed event list.
pub struct StaticEvents {
    events: Vec<ScheduledEvent>,
}

impl StaticEvents {
    pub fn new(events: Vec<ScheduledEvent>) -> Self {
        Self { events }
    }
}

impl EventSource for StaticEvents {
    fn list_events(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ScheduledEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|event| event.overlaps(start, end))
            .cloned()
            .collect())
    }
}

/// Decode a JSON array of events, skipping malformed entries.
///
/// One bad upstream event must not block the rest of the week's analysis:
/// entries missing start/end, or with a non-positive duration, are dropped
/// with a warning and the remainder is returned.
pub fn events_from_json(json: &str) -> Result<Vec<ScheduledEvent>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let mut events = Vec::with_capacity(values.len());
    for value in values {
        match serde_json::from_value::<ScheduledEvent>(value) {
            Ok(event) if event.end > event.start => events.push(event),
            Ok(event) => {
                warn!(event_id = %event.id, "skipping calendar event with non-positive duration");
            }
            Err(error) => {
                warn!(%error, "skipping malformed calendar event");
            }
        }
    }
    Ok(events)
}

/// Read and decode an events file, skipping malformed entries.
pub fn events_from_file(path: &std::path::Path) -> Result<Vec<ScheduledEvent>> {
    let content = std::fs::read_to_string(path)?;
    events_from_json(&content)
}

/// A not-yet-committed calendar event rendered from an accepted proposal.
///
/// The caller turns drafts into real events via the calendar collaborator;
/// `activity_id` is the tag that later lets the coverage analyzer count the
/// booking without the title heuristic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub location: Option<String>,
    pub activity_id: String,
}
