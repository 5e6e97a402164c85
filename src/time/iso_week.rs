use derive_more::Display;

use crate::time::Year;

/// A week as defined by ISO 8601: weeks start on monday and the first week of
/// a year is the one containing its first thursday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("{year}-W{week:02}")]
pub struct IsoWeek {
    year: Year,
    week: usize,
}

impl IsoWeek {
    #[must_use]
    pub const fn new(year: Year, week: usize) -> Self {
        Self { year, week }
    }

    /// The year the week belongs to, which is not always the year of its days.
    #[must_use]
    pub const fn year(&self) -> Year {
        self.year
    }

    #[must_use]
    pub const fn week(&self) -> usize {
        self.week
    }
}
