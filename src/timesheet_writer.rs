use log::{trace, warn};
use regex::Regex;
use thiserror::Error;

use crate::document::{Document, DocumentError};
use crate::input::{CellIndex, SlotMap};
use crate::week_fields::WeekFields;

const WEEK_RANGE_PATTERN: &str = r"(?i)(Duration: Week Start Date:)(.*)(Week End Date:)(.*)";

#[derive(Debug, Error)]
pub enum WriteError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("cell {index} does not exist in row {row} of table {table}, the row has {len} cells")]
    MissingCell {
        table: usize,
        row: usize,
        index: CellIndex,
        len: usize,
    },
}

/// Writes the values of a week into the slots of a timesheet document.
#[derive(Debug, Clone)]
pub struct TimesheetWriter<'a> {
    slots: &'a SlotMap,
    week_range: Regex,
}

impl<'a> TimesheetWriter<'a> {
    pub fn new(slots: &'a SlotMap) -> Result<Self, regex::Error> {
        Ok(Self {
            slots,
            week_range: Regex::new(WEEK_RANGE_PATTERN)?,
        })
    }

    pub fn write(&self, document: &mut dyn Document, fields: &WeekFields) -> Result<(), WriteError> {
        self.write_week_range(document, fields)?;
        self.blank_day_rows(document, fields)?;
        self.write_total_hours(document, fields)?;
        self.write_signature_date(document, fields)?;

        Ok(())
    }

    /// Replaces the dates after the `Week Start Date:` and `Week End Date:` labels.
    ///
    /// The paragraph is left as it is, if it does not contain both labels.
    pub fn write_week_range(
        &self,
        document: &mut dyn Document,
        fields: &WeekFields,
    ) -> Result<(), WriteError> {
        let paragraph = self.slots.week_range_paragraph();
        let text = document.paragraph_text(paragraph)?;

        let Some(captures) = self.week_range.captures(&text) else {
            warn!(
                "paragraph {} does not contain the week range labels: {:?}",
                paragraph, text
            );
            return Ok(());
        };

        let replacement = format!(
            "{} {} \t {} {}",
            &captures[1],
            fields.start_label(),
            &captures[3],
            fields.end_label()
        );
        trace!("week range: {:?}", replacement);

        document.set_paragraph_text(paragraph, &replacement)?;

        Ok(())
    }

    /// Fills the hour cells of the weekdays that are not worked with the placeholder.
    pub fn blank_day_rows(
        &self,
        document: &mut dyn Document,
        fields: &WeekFields,
    ) -> Result<(), WriteError> {
        let table = self.slots.table();

        for day in fields.blank_week_days() {
            let row = self.slots.day_row(day);
            trace!("blanking {} (row {})", day, row);

            for cell in self.slots.first_hours_cell()..document.cell_count(table, row)? {
                document.set_cell_text(table, row, cell, self.slots.placeholder())?;
            }
        }

        Ok(())
    }

    pub fn write_total_hours(
        &self,
        document: &mut dyn Document,
        fields: &WeekFields,
    ) -> Result<(), WriteError> {
        let total_hours = fields.total_hours().to_string();

        for &cell in self.slots.total_hours_cells() {
            self.write_cell(document, self.slots.totals_row(), cell, &total_hours)?;
        }

        Ok(())
    }

    pub fn write_signature_date(
        &self,
        document: &mut dyn Document,
        fields: &WeekFields,
    ) -> Result<(), WriteError> {
        self.write_cell(
            document,
            self.slots.signature_row(),
            self.slots.signature_cell(),
            &fields.signature_label(),
        )
    }

    fn write_cell(
        &self,
        document: &mut dyn Document,
        row: usize,
        cell: CellIndex,
        text: &str,
    ) -> Result<(), WriteError> {
        let table = self.slots.table();
        let len = document.cell_count(table, row)?;

        let index = cell.resolve(len).ok_or(WriteError::MissingCell {
            table,
            row,
            index: cell,
            len,
        })?;

        document.set_cell_text(table, row, index, text)?;

        Ok(())
    }
}
