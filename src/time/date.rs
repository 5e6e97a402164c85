use core::fmt;
use core::ops::{Add, Sub};
use core::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::time::{IsoWeek, Month, WeekDay, Year};
use crate::utils::StrExt;

#[macro_export]
macro_rules! date {
    ($year:literal : $month:literal : $day:literal) => {{
        const _YEAR: $crate::time::Year = $crate::time::Year::new($year);
        static_assertions::const_assert!($month >= 1 && $month <= 12);

        const _MONTH: $crate::time::Month = $crate::time::Month::new($month);

        // validate the day
        static_assertions::const_assert!($day != 0);
        static_assertions::const_assert!($day <= _YEAR.number_of_days_in_month(_MONTH));

        $crate::time::Date::new_unchecked(_YEAR, _MONTH, $day)
    }};
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Date {
    year: Year,
    month: Month,
    day: usize,
}

impl Date {
    /// The first year that can be used with [`Date::new`].
    pub const MIN_YEAR: usize = 1;
    /// The last year that can be used with [`Date::new`].
    pub const MAX_YEAR: usize = 9999;

    pub fn new(year: impl Into<Year>, month: Month, day: usize) -> Result<Self, InvalidDate> {
        let year = year.into();
        if !(Self::MIN_YEAR..=Self::MAX_YEAR).contains(&year.as_usize()) {
            return Err(InvalidDate::UnsupportedYear {
                year: i64::try_from(year.as_usize()).unwrap_or(i64::MAX),
            });
        }

        if year.number_of_days_in_month(month) < day || day == 0 {
            return Err(InvalidDate::InvalidDay { year, month, day });
        }

        Ok(Self { year, month, day })
    }

    /// Creates a date without checking that the day exists, use the `date!` macro instead.
    #[doc(hidden)]
    #[must_use]
    pub const fn new_unchecked(year: Year, month: Month, day: usize) -> Self {
        Self { year, month, day }
    }

    /// The `ordinal` must be in `1..=year.days()`.
    #[must_use]
    const fn from_ordinal(year: Year, ordinal: usize) -> Self {
        let cumulative_days = year.cumulative_days();

        // bounded by the 12 months of a year
        let mut current_month = Month::January;
        while !current_month.is_eq(&Month::December)
            && cumulative_days[current_month.as_usize()] < ordinal
        {
            current_month = current_month.next();
        }

        Self {
            year,
            month: current_month,
            day: ordinal - cumulative_days[current_month.as_usize() - 1],
        }
    }

    #[must_use]
    const fn from_days_since_base_date(days: usize) -> Self {
        let year = Year::from_days_since_base_date(days);
        // NOTE: +1 because the ordinal of the first day of the year is 1 and not 0
        Self::from_ordinal(year, days - year.days_since_base_date() + 1)
    }
}

impl Date {
    /// Replaces the placeholders `{year}`, `{month}`, `{day}` with the
    /// respective number. `{month:02}` and `{day:02}` are padded with zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weekly_timesheet::date;
    /// assert_eq!(date!(2019:01:07).formatted("{month}/{day}/{year}"), "1/7/2019");
    /// assert_eq!(date!(2019:01:07).formatted("{day:02}.{month:02}.{year}"), "07.01.2019");
    /// ```
    #[must_use]
    pub fn formatted(&self, f: &str) -> String {
        f.replace("{year}", &self.year().to_string())
            .replace("{month:02}", &format!("{:02}", self.month()))
            .replace("{day:02}", &format!("{:02}", self.day()))
            .replace("{month}", &self.month().to_string())
            .replace("{day}", &self.day().to_string())
    }
}

impl Date {
    #[must_use]
    pub const fn week_day(&self) -> WeekDay {
        self.year().week_day(self.month(), self.day())
    }

    #[must_use]
    pub const fn year(&self) -> Year {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> Month {
        self.month
    }

    #[must_use]
    pub const fn day(&self) -> usize {
        self.day
    }

    #[must_use]
    pub const fn is_weekend(&self) -> bool {
        self.week_day().is_weekend()
    }

    /// Returns the ISO 8601 week this date belongs to.
    ///
    /// The week belongs to the year that contains its thursday, so the first
    /// days of january might be in the last week of the previous year and the
    /// last days of december might be in the first week of the next year.
    #[must_use]
    pub const fn iso_week(&self) -> IsoWeek {
        // moves the day to the thursday of its week, then counts the weeks
        let week = (self.ordinal() + 10 - self.week_day().as_usize()) / 7;

        if week == 0 {
            let previous = self.year().prev();
            IsoWeek::new(previous, previous.iso_weeks())
        } else if week > self.year().iso_weeks() {
            IsoWeek::new(self.year().next(), 1)
        } else {
            IsoWeek::new(self.year(), week)
        }
    }

    /// The day of the year, starting with `1` for the first of january.
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        // -1 to get the index of the previous month
        // will not cause a panic, because the first month
        // (january) has the number 1
        self.year().cumulative_days()[self.month().as_usize() - 1] + self.day()
    }

    #[must_use]
    const fn days_since_base_date(&self) -> usize {
        // the ordinal of the first day of the year is 1, so 1 has to be
        // subtracted, otherwise 0000-01-01 would be one day after the base date
        self.year().days_since_base_date() + (self.ordinal() - 1)
    }

    #[must_use]
    pub const fn add_days(self, days: usize) -> Self {
        Self::from_days_since_base_date(self.days_since_base_date() + days)
    }

    /// # Panics
    ///
    /// If the result would be before `0000-01-01`.
    #[must_use]
    pub const fn sub_days(self, days: usize) -> Self {
        Self::from_days_since_base_date(self.days_since_base_date() - days)
    }

    /// Returns the next day.
    #[must_use]
    pub const fn next(self) -> Self {
        self.add_days(1)
    }

    /// Returns the number of days that have passed between `self` and `other`.
    ///
    /// `self + self.days_until(other) == other`
    ///
    /// # Panics
    ///
    /// This function assumes that `self` is before `other`.
    /// If this is not the case, it will panic.
    #[must_use]
    pub const fn days_until(&self, other: Self) -> usize {
        other.days_since_base_date() - self.days_since_base_date()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidDate {
    #[error("\"{input}\" is not valid date. Expected format: \"YYYY-MM-DD\" or \"M/D/YYYY\"")]
    ParseDateError { input: String },
    #[error("{day:02} is not a valid day for {year}-{month:02}")]
    InvalidDay {
        year: Year,
        month: Month,
        day: usize,
    },
    #[error("the year {year} is not supported")]
    UnsupportedYear { year: i64 },
}

impl Add<usize> for Date {
    type Output = Self;

    fn add(self, days: usize) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<usize> for Date {
    type Output = Self;

    fn sub(self, days: usize) -> Self::Output {
        self.sub_days(days)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.year.as_usize(),
            self.month.as_usize(),
            self.day
        )
    }
}

fn parse_or_err(input: &str, whole: &str) -> Result<usize, InvalidDate> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|_| InvalidDate::ParseDateError {
            input: whole.to_string(),
        })
}

impl FromStr for Date {
    type Err = InvalidDate;

    /// Parses either `YYYY-MM-DD` or the US style `M/D/YYYY`.
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let string = string.trim();

        let (year, month, day) = match (string.split_exact::<3>("-"), string.split_exact::<3>("/"))
        {
            ([Some(year), Some(month), Some(day)], _) => (year, month, day),
            (_, [Some(month), Some(day), Some(year)]) => (year, month, day),
            _ => {
                return Err(InvalidDate::ParseDateError {
                    input: string.to_string(),
                })
            }
        };

        let year = Year::new(parse_or_err(year, string)?);
        let month = Month::try_from(parse_or_err(month, string)?).map_err(|_| {
            InvalidDate::ParseDateError {
                input: string.to_string(),
            }
        })?;
        let day = parse_or_err(day, string)?;

        Self::new(year, month, day)
    }
}

impl TryFrom<String> for Date {
    type Error = <Self as FromStr>::Err;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(value.as_str())
    }
}

impl TryFrom<::time::Date> for Date {
    type Error = InvalidDate;

    fn try_from(date: ::time::Date) -> Result<Self, Self::Error> {
        let year = usize::try_from(date.year()).map_err(|_| InvalidDate::UnsupportedYear {
            year: i64::from(date.year()),
        })?;
        let month = Month::new(u8::from(date.month()) as usize);

        Self::new(year, month, date.day() as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::time::DateRange;

    #[test]
    fn test_date_to_string() {
        assert_eq!(
            Date::new(Year::new(2022), Month::January, 31).map(|d| d.to_string()),
            Ok("2022-01-31".to_string())
        );
        assert_eq!(date!(0999:12:01).to_string(), "0999-12-01");
    }

    #[must_use]
    fn sort_array<T: Ord, const N: usize>(mut array: [T; N]) -> [T; N] {
        array.sort();
        array
    }

    #[test]
    fn test_date_sorting() {
        assert_eq!(
            sort_array([date!(2022:01:03), date!(2022:01:02), date!(2022:01:01)]),
            [date!(2022:01:01), date!(2022:01:02), date!(2022:01:03)]
        );

        assert_eq!(
            sort_array([date!(2024:01:01), date!(2012:01:03), date!(2013:01:02)]),
            [date!(2012:01:03), date!(2013:01:02), date!(2024:01:01)]
        );

        assert_eq!(
            sort_array([date!(2000:01:01), date!(2000:04:01), date!(2000:03:01)]),
            [date!(2000:01:01), date!(2000:03:01), date!(2000:04:01)]
        );
    }

    #[test]
    fn test_new_rejects_invalid_days() {
        assert!(Date::new(2019, Month::February, 29).is_err());
        assert!(Date::new(2020, Month::February, 29).is_ok());
        assert!(Date::new(2019, Month::April, 31).is_err());
        assert!(Date::new(2019, Month::April, 0).is_err());
    }

    #[test]
    fn test_add_days() {
        assert_eq!(date!(2022:01:01).add_days(1), date!(2022:01:02));
        assert_eq!(date!(2022:01:01).add_days(30), date!(2022:01:31));
        assert_eq!(date!(2022:01:01).add_days(31), date!(2022:02:01));
        assert_eq!(date!(2022:01:01).add_days(58), date!(2022:02:28));
        assert_eq!(date!(2022:01:01).add_days(59), date!(2022:03:01));
        assert_eq!(date!(2020:02:28).add_days(1), date!(2020:02:29));

        assert_eq!(date!(2022:12:24).add_days(8), date!(2023:01:01));
        assert_eq!(date!(2022:12:24).add_days(8 + 365), date!(2024:01:01));
    }

    #[test]
    fn test_sub_days() {
        assert_eq!(date!(2022:01:01).sub_days(0), date!(2022:01:01));
        assert_eq!(date!(2024:01:01).sub_days(1), date!(2023:12:31));
        assert_eq!(date!(2024:01:01).sub_days(2), date!(2023:12:30));
        assert_eq!(date!(2024:01:01).sub_days(364), date!(2023:01:02));
        assert_eq!(date!(2024:01:01).sub_days(365), date!(2023:01:01));
        assert_eq!(date!(2024:01:01).sub_days(730), date!(2022:01:01));
        assert_eq!(date!(2024:03:01).sub_days(1), date!(2024:02:29));
    }

    #[test]
    fn test_add_sub_identity() {
        for a in DateRange::new(date!(2022:01:01), date!(2024:12:31)) {
            for b in (0..=999).step_by(7) {
                assert_eq!(a.add_days(b).sub_days(b), a);
                assert_eq!(a.sub_days(b).add_days(b), a);
                assert_eq!(a.days_until(a + b), b);
            }
        }
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(date!(2022:01:01).ordinal(), 1);
        assert_eq!(date!(2022:02:01).ordinal(), 32);
        assert_eq!(date!(2022:02:05).ordinal(), 36);
        assert_eq!(date!(2022:12:31).ordinal(), 365);
        assert_eq!(date!(2024:12:31).ordinal(), 366);
    }

    #[test]
    fn test_from_days_since_base_date() {
        for year in (2020..=2025).map(Year::new) {
            for month in Month::months() {
                for day in 1..=year.number_of_days_in_month(month) {
                    let date = Date::new(year, month, day).unwrap();

                    assert_eq!(
                        Date::from_days_since_base_date(date.days_since_base_date()),
                        date
                    );
                }
            }
        }
    }

    #[test]
    fn test_week_day() {
        assert_eq!(date!(2019:01:07).week_day(), WeekDay::Monday);
        assert_eq!(date!(2019:01:11).week_day(), WeekDay::Friday);
        assert_eq!(date!(2019:01:12).week_day(), WeekDay::Saturday);
        assert_eq!(date!(2025:12:29).week_day(), WeekDay::Monday);
        assert_eq!(date!(2026:10:16).week_day(), WeekDay::Friday);

        assert!(date!(2019:01:13).is_weekend());
        assert!(!date!(2019:01:14).is_weekend());
    }

    #[test]
    fn test_iso_week() {
        #[track_caller]
        fn assert_iso_week(date: Date, year: usize, week: usize) {
            assert_eq!(
                date.iso_week(),
                IsoWeek::new(Year::new(year), week),
                "iso week of {}",
                date
            );
        }

        assert_iso_week(date!(2019:01:01), 2019, 1);
        assert_iso_week(date!(2019:01:07), 2019, 2);
        assert_iso_week(date!(2019:12:30), 2020, 1);
        assert_iso_week(date!(2020:12:31), 2020, 53);
        assert_iso_week(date!(2021:01:01), 2020, 53);
        assert_iso_week(date!(2021:01:04), 2021, 1);
        assert_iso_week(date!(2022:01:02), 2021, 52);
        assert_iso_week(date!(2025:12:29), 2026, 1);
        assert_iso_week(date!(2026:01:02), 2026, 1);
        assert_iso_week(date!(2026:12:31), 2026, 53);
        assert_iso_week(date!(2026:10:16), 2026, 42);
    }

    #[test]
    fn test_iso_week_changes_on_mondays() {
        let mut previous = date!(1999:12:31);
        for date in DateRange::new(date!(2000:01:01), date!(2030:12:31)) {
            if date.week_day() == WeekDay::Monday {
                assert_ne!(previous.iso_week(), date.iso_week(), "{}", date);
            } else {
                assert_eq!(previous.iso_week(), date.iso_week(), "{}", date);
            }

            previous = date;
        }
    }

    #[test]
    fn test_formatted() {
        let date = date!(2019:01:07);

        assert_eq!(date.formatted("{month}/{day}/{year}"), "1/7/2019");
        assert_eq!(date.formatted("{year}-{month:02}-{day:02}"), "2019-01-07");
        assert_eq!(date!(2019:11:21).formatted("{month}/{day}/{year}"), "11/21/2019");
    }

    #[test]
    fn test_parse() {
        assert_eq!("2019-01-07".parse::<Date>(), Ok(date!(2019:01:07)));
        assert_eq!(" 2019-1-7 ".parse::<Date>(), Ok(date!(2019:01:07)));
        assert_eq!("1/7/2019".parse::<Date>(), Ok(date!(2019:01:07)));
        assert_eq!("12/31/2019".parse::<Date>(), Ok(date!(2019:12:31)));

        assert_eq!(
            "2019-02-30".parse::<Date>(),
            Err(InvalidDate::InvalidDay {
                year: Year::new(2019),
                month: Month::February,
                day: 30,
            })
        );

        assert_eq!(
            "99999999999999999-01-04".parse::<Date>(),
            Err(InvalidDate::UnsupportedYear {
                year: 99_999_999_999_999_999,
            })
        );
        assert_eq!(
            "1/8/10000".parse::<Date>(),
            Err(InvalidDate::UnsupportedYear { year: 10_000 })
        );
        assert_eq!(
            "0000-01-01".parse::<Date>(),
            Err(InvalidDate::UnsupportedYear { year: 0 })
        );
        assert_eq!("9999-12-31".parse::<Date>(), Ok(date!(9999:12:31)));
        assert_eq!("0001-01-01".parse::<Date>(), Ok(date!(0001:01:01)));

        for invalid in ["", "2019", "2019-01", "2019-13-01", "a/b/c", "2019-01-01-01"] {
            assert_eq!(
                invalid.parse::<Date>(),
                Err(InvalidDate::ParseDateError {
                    input: invalid.to_string()
                }),
                "{:?} should not parse",
                invalid
            );
        }
    }

    #[test]
    fn test_deserialize() {
        let dates: Vec<Date> =
            serde_json::from_str(r#"["2019-01-21", "2/18/2019"]"#).expect("dates should be valid");

        assert_eq!(dates, vec![date!(2019:01:21), date!(2019:02:18)]);
        assert!(serde_json::from_str::<Date>(r#""2019-02-29""#).is_err());
    }

    #[test]
    fn test_from_time_date() {
        let date = ::time::Date::from_calendar_date(2026, ::time::Month::October, 16).unwrap();

        assert_eq!(Date::try_from(date), Ok(date!(2026:10:16)));
    }
}
