//! Clock sources for "now".
//!
//! Predictions expect local standard time. On a device this comes from an
//! RTC set once and never shifted for daylight saving; on a desktop it is
//! derived from the system UTC clock and the station's fixed offset.

use crate::calendar::utc_to_local;
use chrono::{NaiveDateTime, Utc};

/// Anything that can report the current local standard time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// System clock shifted to a fixed standard-time offset.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    utc_offset_hours: f64,
}

impl SystemClock {
    pub fn new(utc_offset_hours: f64) -> Self {
        SystemClock { utc_offset_hours }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        utc_to_local(Utc::now(), self.utc_offset_hours)
    }
}

/// A clock frozen at one reading, for replaying a moment or for tests.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
