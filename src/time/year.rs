use derive_more::Display;

use crate::iter_const;
use crate::time::{Month, WeekDay};

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash, Display)]
#[display("{_0}")]
pub struct Year(usize);

/// The number of days from start_month..end_month in the `year`.
const fn days_for_months(year: Year, start_month: Month, end_month: usize) -> usize {
    let mut result = 0;

    iter_const!(for month in start_month.as_usize(),..end_month => {
        result += year.number_of_days_in_month(Month::new(month));
    });

    result
}

impl Year {
    /// Choose the date 0000/01/01 as a base date, because it does not make sense to got past this date.
    const BASE_DATE: (Self, Month, usize, WeekDay) =
        (Self(0), Month::January, 1, WeekDay::Saturday);

    #[must_use]
    pub const fn new(year: usize) -> Self {
        Self(year)
    }

    #[must_use]
    pub const fn as_usize(&self) -> usize {
        self.0
    }

    /// A year that is not a leap year is a common year.
    #[must_use]
    pub const fn is_common_year(&self) -> bool {
        self.as_usize() % 4 != 0 || (self.as_usize() % 100 == 0 && self.as_usize() % 400 != 0)
    }

    /// A leap year is a calendar year that contains an additional day added to February, so
    /// it has 29 days instead of the regular 28 days.
    #[must_use]
    pub const fn is_leap_year(&self) -> bool {
        !self.is_common_year()
    }

    #[must_use]
    pub const fn number_of_days_in_month(&self, month: Month) -> usize {
        match month {
            Month::January => 31,
            Month::February => {
                if self.is_leap_year() {
                    29
                } else {
                    28
                }
            }
            Month::March => 31,
            Month::April => 30,
            Month::May => 31,
            Month::June => 30,
            Month::July => 31,
            Month::August => 31,
            Month::September => 30,
            Month::October => 31,
            Month::November => 30,
            Month::December => 31,
        }
    }

    /// The days of the year that passed before the start of each month.
    ///
    /// `cumulative_days()[0]` is always `0` and `cumulative_days()[12]` is
    /// the number of days in the year.
    #[must_use]
    pub const fn cumulative_days(&self) -> [usize; 13] {
        let mut result = [0; 13];

        iter_const!(for month in 1,..13 => {
            result[month] = result[month - 1] + self.number_of_days_in_month(Month::new(month));
        });

        result
    }

    /// Calculate the weekday of this year and the specified month and day.
    ///
    /// # Note
    ///
    /// This function assumes that the day is valid.
    #[must_use]
    pub const fn week_day(&self, month: Month, day: usize) -> WeekDay {
        let (_, month_ref, day_ref, week_day_ref) = Self::BASE_DATE;

        let days = self.days_since_base_date()
            + days_for_months(*self, month_ref, month.as_usize())
            + (day - day_ref);

        week_day_ref.add_const(days)
    }

    /// The number of leap years in `0..self`.
    const fn leap_years_before(&self) -> usize {
        let year = self.as_usize();
        // the year 0 is a leap year, so every range starting at it
        // contains one more year divisible by 4 and 400
        (year + 3) / 4 - (year + 99) / 100 + (year + 399) / 400
    }

    pub(super) const fn days_since_base_date(&self) -> usize {
        self.as_usize() * 365 + self.leap_years_before()
    }

    pub(super) const fn from_days_since_base_date(days: usize) -> Self {
        // there are 146097 days in 400 years, which gives a close guess
        let mut year = Self::new(days * 400 / 146_097);

        while year.days_since_base_date() > days {
            year = year.prev();
        }

        while year.next().days_since_base_date() <= days {
            year = year.next();
        }

        year
    }

    /// Returns the number of days in this year.
    #[must_use]
    pub const fn days(&self) -> usize {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Returns the number of ISO 8601 weeks in this year, which is either 52 or 53.
    ///
    /// A year has 53 weeks if it starts on a thursday, or if it is a leap year
    /// that starts on a wednesday.
    #[must_use]
    pub const fn iso_weeks(&self) -> usize {
        let first_day = self.week_day(Month::January, 1);

        if first_day.is_eq(&WeekDay::Thursday)
            || (self.is_leap_year() && first_day.is_eq(&WeekDay::Wednesday))
        {
            53
        } else {
            52
        }
    }

    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }

    /// # Panics
    ///
    /// If called on the year `0`.
    #[must_use]
    pub const fn prev(&self) -> Self {
        Self(self.0 - 1)
    }
}

impl From<usize> for Year {
    fn from(value: usize) -> Self {
        Self::new(value)
    }
}
