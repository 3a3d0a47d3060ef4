//! Wall-clock backend

use chrono::{DateTime, Local, Utc};

use crate::clock::Clock;

/// Clock backed by the operating system's wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create a new system clock
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn local_time(&self) -> DateTime<Local> {
        Local::now()
    }

    fn utc_time(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn name(&self) -> &'static str {
        "system"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock::new();
        let first = clock.utc_time();
        let second = clock.utc_time();
        assert!(second >= first);
    }

    #[test]
    fn test_local_and_utc_agree() {
        let clock = SystemClock::new();
        let utc = clock.utc_time();
        let local = clock.local_time().with_timezone(&Utc);
        let drift = (local - utc).num_seconds().abs();
        assert!(drift < 5, "local and utc differ by {}s", drift);
    }
}
