use ::time::OffsetDateTime;
use log::warn;

use crate::time::{Date, InvalidDate};

/// Source of the current date, which ends up as the signature date.
pub trait Clock {
    fn today(&self) -> Result<Date, InvalidDate>;
}

/// Reads the date from the system clock in the local timezone.
///
/// Falls back to UTC if the local offset can not be determined.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Result<Date, InvalidDate> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|error| {
            warn!("failed to determine the local time, using UTC: {}", error);
            OffsetDateTime::now_utc()
        });

        Date::try_from(now.date())
    }
}

/// A clock that is stuck on a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(Date);

impl FixedClock {
    #[must_use]
    pub const fn new(date: Date) -> Self {
        Self(date)
    }
}

impl Clock for FixedClock {
    fn today(&self) -> Result<Date, InvalidDate> {
        Ok(self.0)
    }
}
