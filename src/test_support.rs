//! Fixtures shared by unit tests.

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use std::sync::atomic::{AtomicI64, Ordering};

/// Clock that advances by one second on every reading.
#[derive(Debug, Default)]
pub struct SteppingClock {
    ticks: AtomicI64,
}

impl SteppingClock {
    /// Epoch of the first reading.
    pub fn origin() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0)
            .single()
            .unwrap_or_default()
    }

    /// Returns the time of the `tick`-th reading, counting from zero.
    pub fn at(tick: i64) -> DateTime<Utc> {
        Self::origin() + TimeDelta::seconds(tick)
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Self::at(self.ticks.fetch_add(1, Ordering::SeqCst))
    }
}
