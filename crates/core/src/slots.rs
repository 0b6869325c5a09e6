//! # Slot generation
//!
//! Turns recurring availability windows into the concrete list of bookable
//! start times for one calendar date.
//!
//! 1. The date is mapped to its day of week (Sunday = 0).
//! 2. Active windows on that day are taken in the order given.
//! 3. Each window yields a start time every [`SLOT_MINUTES`] from its start,
//!    stopping before its end; a trailing remainder shorter than a slot is
//!    dropped.
//! 4. A slot is unavailable when a confirmed booking exists on that date at
//!    exactly that time. Pending, declined and cancelled bookings never block.
//!
//! Windows that overlap in storage would produce duplicate times; overlap is
//! rejected at write time, so this is not deduplicated here.

use chrono::NaiveDate;

use crate::{
    models::{
        availability::AvailabilityWindow,
        booking::{BookingRequest, BookingStatus},
        time_slot::TimeSlot,
    },
    time::{WallTime, day_of_week},
};

/// Length of one bookable slot.
pub const SLOT_MINUTES: u16 = 30;

/// Slot start times inside `[start, end)`.
pub fn slot_times(start: WallTime, end: WallTime) -> impl Iterator<Item = WallTime> {
    let (start, end) = (start.minutes(), end.minutes());
    (start..end)
        .step_by(usize::from(SLOT_MINUTES))
        .filter(move |m| m + SLOT_MINUTES <= end)
        .filter_map(WallTime::from_minutes)
}

/// Computes the slot list for `date`.
///
/// `windows` should already be in display order (see
/// [`crate::windows::sort_windows`]); `bookings` may contain bookings for any
/// date and status, only confirmed ones on `date` are considered.
pub fn generate_slots(
    date: NaiveDate,
    windows: &[AvailabilityWindow],
    bookings: &[BookingRequest],
) -> Vec<TimeSlot> {
    let weekday = day_of_week(date);

    let taken: Vec<WallTime> = bookings
        .iter()
        .filter(|b| b.requested_date == date && b.status == BookingStatus::Confirmed)
        .map(|b| b.requested_time)
        .collect();

    windows
        .iter()
        .filter(|w| w.day_of_week == weekday && w.is_active)
        .flat_map(|w| slot_times(w.start_time, w.end_time))
        .map(|time| TimeSlot {
            time,
            available: !taken.contains(&time),
        })
        .collect()
}
