//! System clock adapter

use chrono::{DateTime, Utc};
use pitchpoll_application::Clock;

/// Wall-clock time from the operating system
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
