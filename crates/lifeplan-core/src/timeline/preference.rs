//! Slot filtering by activity preferences.
//!
//! A stable filter: slot order is preserved, nothing is re-sorted. A slot
//! survives when its calendar day is in the activity's day preference (or no
//! day preference is set) and its start hour falls in at least one preferred
//! time-of-day band (flexible matches everything).

use chrono::Timelike;

use crate::config::Activity;
use crate::timeline::slot::TimeSlot;

/// Whether a single slot satisfies an activity's day and time preferences.
pub fn slot_matches(slot: &TimeSlot, activity: &Activity) -> bool {
    if let Some(days) = &activity.days_preference {
        if !days.contains(&slot.day()) {
            return false;
        }
    }
    activity.time_preference.matches_hour(slot.start.hour())
}

/// Filter slots by an activity's preferences, preserving order.
pub fn filter_slots(slots: &[TimeSlot], activity: &Activity) -> Vec<TimeSlot> {
    slots
        .iter()
        .filter(|slot| slot_matches(slot, activity))
        .cloned()
        .collect()
}
