//! Wall-clock sources.
//!
//! Appointment rules depend on the current local hour, so time is always
//! read through a `Clock` and never straight from `chrono::Local`.

use chrono::{Local, NaiveDateTime};

use crate::traits::Clock;

/// Reads the host's local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
