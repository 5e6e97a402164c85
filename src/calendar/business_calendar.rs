use std::collections::BTreeSet;

use log::debug;

use crate::calendar::Week;
use crate::time::{Date, DateRange};

/// Knows which days are worked on: mondays to fridays that are not holidays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessCalendar {
    holidays: BTreeSet<Date>,
}

impl BusinessCalendar {
    #[must_use]
    pub fn new(holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn is_holiday(&self, date: Date) -> bool {
        self.holidays.contains(&date)
    }

    #[must_use]
    pub fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.is_holiday(date)
    }

    pub fn holidays(&self) -> impl Iterator<Item = Date> + '_ {
        self.holidays.iter().copied()
    }

    /// Returns all business days from `start` to `end` (inclusive) in ascending order.
    pub fn business_days(&self, start: Date, end: Date) -> impl Iterator<Item = Date> + '_ {
        DateRange::new(start, end).filter(move |date| self.is_business_day(*date))
    }

    /// Groups the business days from `start` to `end` (inclusive) by their ISO week.
    ///
    /// Every business day ends up in exactly one week, the weeks are ordered
    /// and none of them is empty. Because the weeks are determined by the
    /// ISO week of their days, a week might have fewer than five days, when
    /// the range starts or ends in the middle of a week or when there are
    /// holidays.
    #[must_use]
    pub fn weeks(&self, start: Date, end: Date) -> Vec<Week> {
        let mut weeks: Vec<Week> = Vec::new();

        for date in self.business_days(start, end) {
            let rejected = match weeks.last_mut() {
                Some(week) => week.try_push(date).err(),
                None => Some(date),
            };

            if let Some(date) = rejected {
                weeks.push(Week::new(date));
            }
        }

        debug!(
            "found {} weeks between {} and {}",
            weeks.len(),
            start,
            end
        );

        weeks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::date;

    fn week_days(weeks: &[Week]) -> Vec<Vec<Date>> {
        weeks.iter().map(|week| week.days().to_vec()).collect()
    }

    #[test]
    fn test_is_business_day() {
        let calendar = BusinessCalendar::new([date!(2019:01:21)]);

        assert!(calendar.is_business_day(date!(2019:01:18)));
        assert!(!calendar.is_business_day(date!(2019:01:19)));
        assert!(!calendar.is_business_day(date!(2019:01:20)));
        assert!(!calendar.is_business_day(date!(2019:01:21)));
        assert!(calendar.is_business_day(date!(2019:01:22)));
    }

    #[test]
    fn test_full_week() {
        let weeks = BusinessCalendar::default().weeks(date!(2019:01:07), date!(2019:01:11));

        assert_eq!(
            week_days(&weeks),
            vec![vec![
                date!(2019:01:07),
                date!(2019:01:08),
                date!(2019:01:09),
                date!(2019:01:10),
                date!(2019:01:11),
            ]]
        );
    }

    #[test]
    fn test_weekends_in_range_are_skipped() {
        let weeks = BusinessCalendar::default().weeks(date!(2019:01:05), date!(2019:01:13));

        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].first(), date!(2019:01:07));
        assert_eq!(weeks[0].last(), date!(2019:01:11));
    }

    #[test]
    fn test_start_mid_week() {
        let weeks = BusinessCalendar::default().weeks(date!(2019:01:09), date!(2019:01:11));

        assert_eq!(
            week_days(&weeks),
            vec![vec![date!(2019:01:09), date!(2019:01:10), date!(2019:01:11)]]
        );
    }

    #[test]
    fn test_two_full_weeks() {
        let weeks = BusinessCalendar::default().weeks(date!(2019:01:07), date!(2019:01:18));

        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].first(), date!(2019:01:07));
        assert_eq!(weeks[0].len(), 5);
        assert_eq!(weeks[1].first(), date!(2019:01:14));
        assert_eq!(weeks[1].len(), 5);
    }

    #[test]
    fn test_holiday_on_monday() {
        let calendar = BusinessCalendar::new([date!(2019:01:21)]);
        let weeks = calendar.weeks(date!(2019:01:21), date!(2019:01:25));

        assert_eq!(weeks.len(), 1);
        assert_eq!(weeks[0].first(), date!(2019:01:22));
        assert_eq!(weeks[0].len(), 4);
    }

    #[test]
    fn test_week_with_only_thursday_and_friday() {
        let calendar = BusinessCalendar::new([
            date!(2019:07:01),
            date!(2019:07:02),
            date!(2019:07:03),
        ]);
        let weeks = calendar.weeks(date!(2019:07:01), date!(2019:07:12));

        assert_eq!(
            week_days(&weeks)[0],
            vec![date!(2019:07:04), date!(2019:07:05)]
        );
        assert_eq!(weeks[1].len(), 5);
    }

    #[test]
    fn test_whole_week_of_holidays_is_skipped() {
        let calendar = BusinessCalendar::new(
            DateRange::new(date!(2019:12:23), date!(2019:12:27)).collect::<Vec<_>>(),
        );
        let weeks = calendar.weeks(date!(2019:12:16), date!(2020:01:03));

        assert_eq!(weeks.len(), 2);
        assert_eq!(weeks[0].first(), date!(2019:12:16));
        assert_eq!(weeks[1].first(), date!(2019:12:30));
    }

    #[test]
    fn test_week_across_new_year() {
        let weeks = BusinessCalendar::default().weeks(date!(2025:12:22), date!(2026:01:09));

        assert_eq!(
            weeks
                .iter()
                .map(|week| (week.first(), week.last()))
                .collect::<Vec<_>>(),
            vec![
                (date!(2025:12:22), date!(2025:12:26)),
                (date!(2025:12:29), date!(2026:01:02)),
                (date!(2026:01:05), date!(2026:01:09)),
            ]
        );
    }

    #[test]
    fn test_same_week_number_in_different_years_is_not_merged() {
        // both ranges end up in week 2, one year apart
        let weeks = BusinessCalendar::default().weeks(date!(2019:01:10), date!(2020:01:10));

        assert_eq!(weeks.first().map(Week::first), Some(date!(2019:01:10)));
        assert_eq!(weeks.last().map(Week::first), Some(date!(2020:01:06)));
        assert_eq!(weeks.len(), 53);
    }

    #[test]
    fn test_empty_ranges() {
        let calendar = BusinessCalendar::new([date!(2019:01:07)]);

        assert!(calendar.weeks(date!(2019:01:12), date!(2019:01:12)).is_empty());
        assert!(calendar.weeks(date!(2019:01:07), date!(2019:01:07)).is_empty());
        assert!(calendar.weeks(date!(2019:01:11), date!(2019:01:10)).is_empty());
    }

    #[test]
    fn test_every_business_day_in_exactly_one_week() {
        let calendar = BusinessCalendar::new([
            date!(2019:01:01),
            date!(2019:05:27),
            date!(2019:07:04),
            date!(2019:09:02),
            date!(2019:11:28),
            date!(2019:12:25),
        ]);
        let (start, end) = (date!(2019:01:01), date!(2020:02:29));

        let weeks = calendar.weeks(start, end);
        let flattened = weeks
            .iter()
            .flat_map(|week| week.days().iter().copied())
            .collect::<Vec<_>>();

        assert_eq!(
            flattened,
            calendar.business_days(start, end).collect::<Vec<_>>()
        );

        for pair in weeks.windows(2) {
            assert!(pair[0].last() < pair[1].first());
            assert!(pair[0].iso_week() < pair[1].iso_week());
        }

        for week in &weeks {
            assert!((1..=5).contains(&week.len()), "{:?}", week);
            assert!(week.iter().all(|date| date.iso_week() == week.iso_week()));
        }

        assert_eq!(weeks, calendar.weeks(start, end));
    }
}
