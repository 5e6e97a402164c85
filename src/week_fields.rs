use crate::calendar::Week;
use crate::time::{Date, WeekDay};

/// How dates are written into the timesheet.
pub const DATE_LABEL_FORMAT: &str = "{month}/{day}/{year}";

/// The hours that are worked on each business day, unless configured otherwise.
pub const DEFAULT_HOURS_PER_DAY: usize = 8;

/// Everything that has to be written into the timesheet of a single week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekFields {
    start_label: String,
    end_label: String,
    leading_blank_days: usize,
    trailing_blank_days: usize,
    total_hours: usize,
    signature_date: Date,
}

impl WeekFields {
    #[must_use]
    pub fn compute(week: &Week, signature_date: Date, hours_per_day: usize) -> Self {
        let first = week.first();
        let last = week.last();

        Self {
            start_label: first.formatted(DATE_LABEL_FORMAT),
            end_label: last.formatted(DATE_LABEL_FORMAT),
            leading_blank_days: first.week_day().index(),
            trailing_blank_days: WeekDay::Friday.index().saturating_sub(last.week_day().index()),
            total_hours: week.len() * hours_per_day,
            signature_date,
        }
    }

    #[must_use]
    pub fn start_label(&self) -> &str {
        &self.start_label
    }

    #[must_use]
    pub fn end_label(&self) -> &str {
        &self.end_label
    }

    /// The number of weekdays before the first business day of the week.
    #[must_use]
    pub fn leading_blank_days(&self) -> usize {
        self.leading_blank_days
    }

    /// The number of weekdays after the last business day until friday.
    #[must_use]
    pub fn trailing_blank_days(&self) -> usize {
        self.trailing_blank_days
    }

    /// The weekdays that are not worked on, because they are before the first
    /// or after the last business day of the week.
    ///
    /// Holidays between the first and the last day are not included.
    pub fn blank_week_days(&self) -> impl Iterator<Item = WeekDay> + '_ {
        let workdays = WeekDay::WORKDAYS.len();

        WeekDay::WORKDAYS
            .into_iter()
            .take(self.leading_blank_days)
            .chain(
                WeekDay::WORKDAYS
                    .into_iter()
                    .skip(workdays - self.trailing_blank_days),
            )
    }

    #[must_use]
    pub fn total_hours(&self) -> usize {
        self.total_hours
    }

    #[must_use]
    pub fn signature_date(&self) -> Date {
        self.signature_date
    }

    #[must_use]
    pub fn signature_label(&self) -> String {
        self.signature_date.formatted(DATE_LABEL_FORMAT)
    }
}
