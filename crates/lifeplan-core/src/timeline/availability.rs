//! Free-slot detection between busy intervals.
//!
//! Inverts a set of busy intervals into the ordered sequence of free gaps
//! within a query range. Busy intervals are clipped to the range before the
//! sweep, so intervals reaching in from outside cannot pull the cursor
//! backwards; overlapping and contained intervals are absorbed by the
//! running cursor without an explicit merge pass.

use chrono::{DateTime, Datelike, Duration, Utc};

use crate::config::{Commitment, DayOfWeek, WeekTemplate};
use crate::error::ValidationError;
use crate::timeline::slot::TimeSlot;

/// Calculator for finding free slots in a schedule.
pub struct AvailabilityCalculator {
    /// Minimum free-slot duration to report (in minutes)
    min_slot_minutes: i64,
}

impl AvailabilityCalculator {
    /// Create a new calculator with default settings (15 min minimum).
    pub fn new() -> Self {
        Self {
            min_slot_minutes: 15,
        }
    }

    /// Set the minimum free-slot duration.
    pub fn with_min_slot(mut self, minutes: i64) -> Self {
        self.min_slot_minutes = minutes;
        self
    }

    /// Find free slots between busy intervals in `[range_start, range_end)`.
    ///
    /// The result is chronological and non-overlapping by construction; with
    /// no busy intervals it is the whole range (when it meets the minimum).
    ///
    /// # Errors
    /// Returns an error if `range_end <= range_start`.
    pub fn free_slots(
        &self,
        busy: &[TimeSlot],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>, ValidationError> {
        if range_end <= range_start {
            return Err(ValidationError::InvalidTimeRange {
                start: range_start,
                end: range_end,
            });
        }

        // Clip to the query range; intervals fully outside are dropped.
        let mut clipped: Vec<(DateTime<Utc>, DateTime<Utc>)> = busy
            .iter()
            .filter(|slot| slot.start < range_end && slot.end > range_start)
            .map(|slot| (slot.start.max(range_start), slot.end.min(range_end)))
            .collect();

        // Stable sort keeps equal-start intervals in input order.
        clipped.sort_by_key(|(start, _)| *start);

        let mut free = Vec::new();
        let mut current = range_start;

        for (start, end) in clipped {
            if start > current {
                let gap = TimeSlot::free(current, start);
                if gap.duration_minutes() >= self.min_slot_minutes {
                    free.push(gap);
                }
            }
            current = current.max(end);
        }

        if current < range_end {
            let gap = TimeSlot::free(current, range_end);
            if gap.duration_minutes() >= self.min_slot_minutes {
                free.push(gap);
            }
        }

        Ok(free)
    }
}

impl Default for AvailabilityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to find free slots with an explicit minimum.
pub fn find_free_slots(
    busy: &[TimeSlot],
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    min_minutes: i64,
) -> Result<Vec<TimeSlot>, ValidationError> {
    AvailabilityCalculator::new()
        .with_min_slot(min_minutes)
        .free_slots(busy, range_start, range_end)
}

fn at_minutes(day_start: DateTime<Utc>, minutes: u32) -> DateTime<Utc> {
    day_start + Duration::minutes(minutes as i64)
}

/// Busy blocks synthesized from the work and sleep templates for one week.
///
/// `week_start` must be a day boundary; one block per work day, and per day
/// a pre-wake block plus a post-bedtime block (or a single block when the
/// bedtime falls after midnight).
pub fn template_blocks(template: &WeekTemplate, week_start: DateTime<Utc>) -> Vec<TimeSlot> {
    let mut blocks = Vec::new();

    for offset in 0..7 {
        let day_start = week_start + Duration::days(offset);
        let day = DayOfWeek::from_weekday(day_start.weekday());

        if let Some(work) = &template.work {
            if work.days.contains(&day) {
                blocks.push(TimeSlot::busy(
                    at_minutes(day_start, work.start.minutes_from_midnight()),
                    at_minutes(day_start, work.end.minutes_from_midnight()),
                    "Work",
                ));
            }
        }

        if let Some(sleep) = &template.sleep {
            let bedtime = sleep.bedtime.minutes_from_midnight();
            let wake = sleep.wake.minutes_from_midnight();
            if bedtime <= wake {
                // Bedtime after midnight: one block within the day.
                blocks.push(TimeSlot::busy(
                    at_minutes(day_start, bedtime),
                    at_minutes(day_start, wake),
                    "Sleep",
                ));
            } else {
                blocks.push(TimeSlot::busy(day_start, at_minutes(day_start, wake), "Sleep"));
                blocks.push(TimeSlot::busy(
                    at_minutes(day_start, bedtime),
                    day_start + Duration::days(1),
                    "Sleep",
                ));
            }
        }
    }

    blocks
}

/// Busy blocks synthesized from fixed commitments for one week.
///
/// The travel buffer, when present, widens the block on both sides but is
/// clamped to the commitment's day.
pub fn commitment_blocks(commitments: &[Commitment], week_start: DateTime<Utc>) -> Vec<TimeSlot> {
    let mut blocks = Vec::new();

    for commitment in commitments {
        let Some((start_min, end_min)) = commitment.window_minutes() else {
            continue;
        };
        let travel = commitment.travel_minutes.unwrap_or(0);
        let start_min = start_min.saturating_sub(travel);
        let end_min = (end_min + travel).min(24 * 60);

        for day in commitment.active_days() {
            let day_start = week_start + Duration::days(day.offset_from_monday());
            blocks.push(TimeSlot::busy(
                at_minutes(day_start, start_min),
                at_minutes(day_start, end_min),
                commitment.name.clone(),
            ));
        }
    }

    blocks
}
