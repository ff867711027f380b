use chrono::{DateTime, Utc};
use sweeper_core::Clock;

/// Wall clock, UTC.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
