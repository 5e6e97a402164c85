use core::slice;

use crate::time::{Date, IsoWeek};

/// The business days of one ISO week, in ascending order.
///
/// A week always contains at least one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Week {
    iso_week: IsoWeek,
    days: Vec<Date>,
}

impl Week {
    #[must_use]
    pub(super) fn new(first: Date) -> Self {
        Self {
            iso_week: first.iso_week(),
            days: vec![first],
        }
    }

    /// Adds the `date` to the week if it is in the same ISO week and after the
    /// last day, otherwise the date is given back.
    pub(super) fn try_push(&mut self, date: Date) -> Result<(), Date> {
        if date.iso_week() != self.iso_week || date <= self.last() {
            return Err(date);
        }

        self.days.push(date);
        Ok(())
    }

    #[must_use]
    pub fn iso_week(&self) -> IsoWeek {
        self.iso_week
    }

    /// The earliest business day of the week.
    #[must_use]
    pub fn first(&self) -> Date {
        self.days[0]
    }

    /// The latest business day of the week.
    #[must_use]
    pub fn last(&self) -> Date {
        self.days[self.days.len() - 1]
    }

    /// The number of business days in the week, which is in `1..=5`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.len()
    }

    #[must_use]
    pub fn days(&self) -> &[Date] {
        &self.days
    }

    pub fn iter(&self) -> slice::Iter<'_, Date> {
        self.days.iter()
    }
}

impl<'a> IntoIterator for &'a Week {
    type Item = &'a Date;
    type IntoIter = slice::Iter<'a, Date>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::date;

    #[test]
    fn test_try_push() {
        let mut week = Week::new(date!(2019:01:08));

        assert_eq!(week.try_push(date!(2019:01:10)), Ok(()));
        assert_eq!(week.try_push(date!(2019:01:09)), Err(date!(2019:01:09)));
        assert_eq!(week.try_push(date!(2019:01:14)), Err(date!(2019:01:14)));
        assert_eq!(week.try_push(date!(2019:01:11)), Ok(()));

        assert_eq!(week.first(), date!(2019:01:08));
        assert_eq!(week.last(), date!(2019:01:11));
        assert_eq!(week.len(), 3);
        assert_eq!(
            week.days(),
            &[date!(2019:01:08), date!(2019:01:10), date!(2019:01:11)]
        );
    }

    #[test]
    fn test_single_day_week() {
        let week = Week::new(date!(2019:01:11));

        assert_eq!(week.first(), week.last());
        assert_eq!(week.len(), 1);
        assert_eq!(week.iso_week(), date!(2019:01:07).iso_week());
    }
}
