//! Per-requester sliding-window limiter for booking submissions.
//!
//! State lives in process memory only: a restart resets every quota.

use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_MAX_REQUESTS: usize = 3;

pub fn default_window() -> Duration {
    Duration::hours(24)
}

#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    entries: Mutex<HashMap<String, Vec<DateTime<Utc>>>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, default_window())
    }
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn max_requests(&self) -> usize {
        self.max_requests
    }

    /// Records an attempt for `email` now; `false` means the quota is spent.
    pub fn check(&self, email: &str) -> bool {
        self.check_at(email, Utc::now())
    }

    /// Same as [`check`](Self::check) with an explicit clock reading.
    ///
    /// A rejected attempt is not recorded, so retrying while blocked does not
    /// extend the block. Requesters with no attempt left inside the window are
    /// dropped on every call.
    pub fn check_at(&self, email: &str, now: DateTime<Utc>) -> bool {
        let key = normalize_key(email);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        let window = self.window;
        entries.retain(|_, timestamps| {
            timestamps.retain(|ts| now - *ts < window);
            !timestamps.is_empty()
        });

        if entries.get(&key).map_or(0, Vec::len) >= self.max_requests {
            return false;
        }
        entries.entry(key).or_default().push(now);
        true
    }

    /// Requesters that currently hold at least one counted attempt.
    pub fn tracked_requesters(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Gives back the attempt recorded for `email` at `at`, for a submission
    /// that was never stored.
    pub fn release_at(&self, email: &str, at: DateTime<Utc>) {
        let key = normalize_key(email);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(timestamps) = entries.get_mut(&key) {
            if let Some(pos) = timestamps.iter().rposition(|ts| *ts == at) {
                timestamps.remove(pos);
            }
            if timestamps.is_empty() {
                entries.remove(&key);
            }
        }
    }

    /// Attempts currently counted against `email`.
    pub fn recorded(&self, email: &str, now: DateTime<Utc>) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries
            .get(&normalize_key(email))
            .map(|ts| ts.iter().filter(|t| now - **t < self.window).count())
            .unwrap_or(0)
    }
}

pub fn normalize_key(email: &str) -> String {
    email.trim().to_lowercase()
}
