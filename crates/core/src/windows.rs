//! # Availability windows
//!
//! Validation and overlap rules for recurring weekly availability. Windows are
//! half-open `[start, end)` intervals on one day of the week, so a window that
//! ends exactly when another begins does not overlap it.

use uuid::Uuid;

use crate::{
    errors::{ScheduleError, ScheduleResult},
    models::availability::{AvailabilityWindow, CreateWindowRequest, UpdateWindowRequest},
    time::WallTime,
};

pub const DAY_REQUIRED: &str = "Day of week is required";
pub const START_REQUIRED: &str = "Start time is required";
pub const END_REQUIRED: &str = "End time is required";
pub const DAY_OUT_OF_RANGE: &str = "Day of week must be between 0 (Sunday) and 6 (Saturday)";
pub const START_FORMAT: &str = "Start time must be in HH:MM format";
pub const END_FORMAT: &str = "End time must be in HH:MM format";
pub const START_AFTER_END: &str = "Start time must be before end time";
pub const OVERLAP: &str = "This time window overlaps with an existing window on the same day";

/// Fully validated fields of a window about to be created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    pub day_of_week: u8,
    pub start_time: WallTime,
    pub end_time: WallTime,
    pub is_active: bool,
}

/// Validated partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowPatch {
    pub day_of_week: Option<u8>,
    pub start_time: Option<WallTime>,
    pub end_time: Option<WallTime>,
    pub is_active: Option<bool>,
}

fn validation(msg: &str) -> ScheduleError {
    ScheduleError::Validation(msg.to_string())
}

fn parse_day(day: i64) -> ScheduleResult<u8> {
    u8::try_from(day)
        .ok()
        .filter(|d| *d <= 6)
        .ok_or_else(|| validation(DAY_OUT_OF_RANGE))
}

fn parse_time(raw: &str, msg: &str) -> ScheduleResult<WallTime> {
    WallTime::parse(raw).map_err(|_| validation(msg))
}

pub fn ensure_ordered(start: WallTime, end: WallTime) -> ScheduleResult<()> {
    if start >= end {
        return Err(validation(START_AFTER_END));
    }
    Ok(())
}

/// Checks a creation request: presence first, then range, format and ordering.
pub fn validate_new_window(req: &CreateWindowRequest) -> ScheduleResult<WindowSpec> {
    let day = req.day_of_week.ok_or_else(|| validation(DAY_REQUIRED))?;
    let start = req
        .start_time
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| validation(START_REQUIRED))?;
    let end = req
        .end_time
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| validation(END_REQUIRED))?;

    let day_of_week = parse_day(day)?;
    let start_time = parse_time(start, START_FORMAT)?;
    let end_time = parse_time(end, END_FORMAT)?;
    ensure_ordered(start_time, end_time)?;

    Ok(WindowSpec {
        day_of_week,
        start_time,
        end_time,
        is_active: req.is_active.unwrap_or(true),
    })
}

/// Checks the fields present in an update request in isolation.
///
/// Ordering across a stored and a patched bound is checked later by
/// [`WindowPatch::apply`], once the merged window is known.
pub fn validate_window_patch(req: &UpdateWindowRequest) -> ScheduleResult<WindowPatch> {
    let day_of_week = req.day_of_week.map(parse_day).transpose()?;
    let start_time = req
        .start_time
        .as_deref()
        .map(|s| parse_time(s, START_FORMAT))
        .transpose()?;
    let end_time = req
        .end_time
        .as_deref()
        .map(|s| parse_time(s, END_FORMAT))
        .transpose()?;

    if let (Some(start), Some(end)) = (start_time, end_time) {
        ensure_ordered(start, end)?;
    }

    Ok(WindowPatch {
        day_of_week,
        start_time,
        end_time,
        is_active: req.is_active,
    })
}

impl WindowPatch {
    /// Merges the patch onto `window` and re-checks ordering of the result.
    /// Timestamps are left to the caller.
    pub fn apply(&self, window: &AvailabilityWindow) -> ScheduleResult<AvailabilityWindow> {
        let merged = AvailabilityWindow {
            day_of_week: self.day_of_week.unwrap_or(window.day_of_week),
            start_time: self.start_time.unwrap_or(window.start_time),
            end_time: self.end_time.unwrap_or(window.end_time),
            is_active: self.is_active.unwrap_or(window.is_active),
            ..window.clone()
        };
        ensure_ordered(merged.start_time, merged.end_time)?;
        Ok(merged)
    }
}

/// Half-open interval intersection.
pub fn overlaps(start: WallTime, end: WallTime, other_start: WallTime, other_end: WallTime) -> bool {
    start < other_end && end > other_start
}

/// First stored window on `day_of_week` that intersects `[start, end)`.
///
/// Inactive windows count: pausing a window does not free its interval.
pub fn find_overlap<'a>(
    existing: &'a [AvailabilityWindow],
    day_of_week: u8,
    start: WallTime,
    end: WallTime,
    exclude: Option<Uuid>,
) -> Option<&'a AvailabilityWindow> {
    existing.iter().find(|w| {
        Some(w.id) != exclude
            && w.day_of_week == day_of_week
            && overlaps(start, end, w.start_time, w.end_time)
    })
}

/// Result of asking a store to write a window while keeping its day free of
/// overlaps. The check and the write happen in one step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowWrite {
    Saved(AvailabilityWindow),
    /// Update of an id that is not stored.
    NotFound,
    /// Another window on the same day intersects the written interval.
    Overlap,
}

/// Display and generation order: day of week, then start time.
pub fn sort_windows(windows: &mut [AvailabilityWindow]) {
    windows.sort_by_key(|w| (w.day_of_week, w.start_time));
}
