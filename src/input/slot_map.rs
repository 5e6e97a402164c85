use derive_more::{Display, From};
use serde::Deserialize;

use crate::time::WeekDay;

/// Position of a cell in a table row. Negative values count from the end of
/// the row, so `-1` is the last cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, From)]
#[serde(transparent)]
#[display("{_0}")]
pub struct CellIndex(isize);

impl CellIndex {
    #[must_use]
    pub const fn new(index: isize) -> Self {
        Self(index)
    }

    /// Returns the position of the cell in a row with `len` cells or `None`
    /// if the row is too short.
    #[must_use]
    pub const fn resolve(&self, len: usize) -> Option<usize> {
        if self.0 >= 0 {
            let index = self.0 as usize;
            if index < len {
                Some(index)
            } else {
                None
            }
        } else {
            len.checked_sub(self.0.unsigned_abs())
        }
    }
}

/// Where the values of a week are located in the template.
///
/// Paragraphs and tables are counted from the start of the document body,
/// rows and cells from the start of their table or row. Everything starts at `0`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SlotMap {
    /// The paragraph with the `Week Start Date:` and `Week End Date:` labels.
    week_range_paragraph: usize,
    /// The table with one row per weekday.
    table: usize,
    /// The row of monday, the other weekdays follow directly after it.
    first_day_row: usize,
    /// Cells from here until the end of a day row are blanked on days that are not worked.
    first_hours_cell: usize,
    totals_row: usize,
    total_hours_cells: Vec<CellIndex>,
    signature_row: usize,
    signature_cell: CellIndex,
    /// Written into the cells of days that are not worked.
    placeholder: String,
}

impl Default for SlotMap {
    fn default() -> Self {
        Self {
            week_range_paragraph: 4,
            table: 1,
            first_day_row: 1,
            first_hours_cell: 2,
            totals_row: 8,
            total_hours_cells: vec![CellIndex::new(-1), CellIndex::new(-7)],
            signature_row: 10,
            signature_cell: CellIndex::new(5),
            placeholder: "--".to_string(),
        }
    }
}

impl SlotMap {
    #[must_use]
    pub fn week_range_paragraph(&self) -> usize {
        self.week_range_paragraph
    }

    #[must_use]
    pub fn table(&self) -> usize {
        self.table
    }

    #[must_use]
    pub fn day_row(&self, day: WeekDay) -> usize {
        self.first_day_row + day.index()
    }

    #[must_use]
    pub fn first_hours_cell(&self) -> usize {
        self.first_hours_cell
    }

    #[must_use]
    pub fn totals_row(&self) -> usize {
        self.totals_row
    }

    #[must_use]
    pub fn total_hours_cells(&self) -> &[CellIndex] {
        &self.total_hours_cells
    }

    #[must_use]
    pub fn signature_row(&self) -> usize {
        self.signature_row
    }

    #[must_use]
    pub fn signature_cell(&self) -> CellIndex {
        self.signature_cell
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }
}
