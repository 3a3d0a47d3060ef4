//! Mock clock backend for testing
//!
//! Holds a single instant that only moves when the test says so.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Local, Utc};

use crate::clock::Clock;

/// Clock that returns a controllable instant
///
/// Useful for probing future-timestamp rejection: stamp blocks at one
/// instant, then rewind the clock before validating.
#[derive(Debug)]
pub struct MockClock {
    now: RwLock<DateTime<Utc>>,
}

impl MockClock {
    /// Create a mock clock frozen at the given instant
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Create a mock clock frozen at the current wall-clock time
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    /// Move the clock to an absolute instant (forwards or backwards)
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.write().unwrap_or_else(|e| e.into_inner()) = now;
    }

    /// Move the clock by a relative amount (negative rewinds)
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now = *now + by;
    }

    fn current(&self) -> DateTime<Utc> {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MockClock {
    fn local_time(&self) -> DateTime<Local> {
        self.current().with_timezone(&Local)
    }

    fn utc_time(&self) -> DateTime<Utc> {
        self.current()
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
