//! Time slot value type.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::ScheduledEvent;
use crate::config::DayOfWeek;

/// A contiguous span of time, half-open: start inclusive, end exclusive.
///
/// Free slots are produced by the availability sweep; busy slots carry
/// provenance from the calendar event or synthesized block that occupies
/// them. The proposal pass shrinks free slots in place by advancing `start`
/// past each booked portion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub available: bool,
    #[serde(default)]
    pub event_id: Option<String>,
    #[serde(default)]
    pub event_title: Option<String>,
    #[serde(default)]
    pub activity_id: Option<String>,
}

impl TimeSlot {
    /// An unoccupied span.
    pub fn free(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start,
            end,
            available: true,
            event_id: None,
            event_title: None,
            activity_id: None,
        }
    }

    /// An occupied span with a label but no backing calendar event
    /// (synthesized work-hours, sleep, and commitment blocks).
    pub fn busy(start: DateTime<Utc>, end: DateTime<Utc>, title: impl Into<String>) -> Self {
        Self {
            start,
            end,
            available: false,
            event_id: None,
            event_title: Some(title.into()),
            activity_id: None,
        }
    }

    /// An occupied span backed by a calendar event.
    pub fn from_event(event: &ScheduledEvent) -> Self {
        Self {
            start: event.start,
            end: event.end,
            available: false,
            event_id: Some(event.id.clone()),
            event_title: Some(event.title.clone()),
            activity_id: event.activity_id.clone(),
        }
    }

    /// Whether this busy slot traces back to an activity-tagged event.
    pub fn is_activity_event(&self) -> bool {
        self.activity_id.is_some()
    }

    /// Get duration in minutes, truncated to whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Check if this slot overlaps with another.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if an instant falls within this slot.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Calendar day this slot starts on.
    pub fn day(&self) -> DayOfWeek {
        DayOfWeek::from_weekday(self.start.weekday())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn dt(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 20, hour, minute, 0).unwrap()
    }

    #[test]
    fn duration_in_whole_minutes() {
        let slot = TimeSlot::free(dt(9, 0), dt(10, 30));
        assert_eq!(slot.duration_minutes(), 90);
    }

    #[test]
    fn overlap_is_strict() {
        let slot = TimeSlot::free(dt(9, 0), dt(10, 0));
        let overlapping = TimeSlot::free(dt(9, 30), dt(10, 30));
        let adjacent = TimeSlot::free(dt(10, 0), dt(11, 0));

        assert!(slot.overlaps(&overlapping));
        assert!(!slot.overlaps(&adjacent));
    }

    #[test]
    fn contains_is_half_open() {
        let slot = TimeSlot::free(dt(9, 0), dt(10, 0));
        assert!(slot.contains(dt(9, 0)));
        assert!(slot.contains(dt(9, 59)));
        assert!(!slot.contains(dt(10, 0)));
    }

    #[test]
    fn event_provenance() {
        let event = ScheduledEvent::new("evt-1", "Yoga", dt(7, 0), dt(8, 0))
            .with_activity("exercise");
        let slot = TimeSlot::from_event(&event);
        assert!(!slot.available);
        assert!(slot.is_activity_event());
        assert_eq!(slot.event_id.as_deref(), Some("evt-1"));
        assert_eq!(slot.day(), DayOfWeek::Tuesday);
    }
}
