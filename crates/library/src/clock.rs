//! Time source for ids and borrow dates.

use chrono::{Local, Utc};

/// Supplies the current time to the library.
pub trait Clock {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;

    /// Today's date as shown in the borrow history, e.g. `3/14/2024`.
    fn today(&self) -> String;
}

/// The system clock, with dates in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }

    fn today(&self) -> String {
        Local::now().format("%-m/%-d/%Y").to_string()
    }
}

/// Hands out strictly increasing ids derived from the clock.
///
/// Two creations within the same millisecond get consecutive ids instead of
/// the same one.
#[derive(Debug, Clone, Default)]
pub(crate) struct IdSequence {
    last: u64,
}

impl IdSequence {
    /// Start after the largest id already in use.
    pub(crate) fn after(last: u64) -> Self {
        Self { last }
    }

    pub(crate) fn next(&mut self, now_millis: u64) -> u64 {
        let id = now_millis.max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}
