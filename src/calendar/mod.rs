//! Splits a date range into the weeks a timesheet is written for.

mod business_calendar;
mod week;

pub use business_calendar::*;
pub use week::*;
