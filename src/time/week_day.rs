use core::fmt;
use std::ops::Add;

use thiserror::Error;

/// A day of the week, numbered like ISO 8601 does it (`Monday` is `1`).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub enum WeekDay {
    Monday = 1,
    Tuesday = 2,
    Wednesday = 3,
    Thursday = 4,
    Friday = 5,
    Saturday = 6,
    Sunday = 7,
}

impl WeekDay {
    /// The days that have a row in a weekly timesheet.
    pub const WORKDAYS: [Self; 5] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
    ];

    const DAYS: [Self; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    #[must_use]
    pub const fn as_usize(&self) -> usize {
        *self as usize
    }

    /// The zero based position in the week, `Monday` is `0`.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.as_usize() - 1
    }

    /// Returns the weekday at the zero based `index`, wrapping around after `Sunday`.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::DAYS[index % 7]
    }

    #[must_use]
    pub const fn is_weekend(&self) -> bool {
        matches!(self, Self::Saturday | Self::Sunday)
    }

    #[must_use]
    pub(crate) const fn is_eq(&self, other: &Self) -> bool {
        self.as_usize() == other.as_usize()
    }

    #[must_use]
    pub(crate) const fn add_const(self, days: usize) -> Self {
        Self::from_index(self.index() + days % 7)
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }
}

impl Add<usize> for WeekDay {
    type Output = Self;

    fn add(self, rhs: usize) -> Self::Output {
        self.add_const(rhs)
    }
}

impl fmt::Display for WeekDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid week day number, expected a number between 1 and 7")]
pub struct InvalidWeekDayNumber;

impl TryFrom<usize> for WeekDay {
    type Error = InvalidWeekDayNumber;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            1..=7 => Ok(Self::from_index(value - 1)),
            _ => Err(InvalidWeekDayNumber),
        }
    }
}
