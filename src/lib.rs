mod timesheet_writer;
mod utils;

pub mod calendar;
pub mod document;
pub mod input;
pub mod time;
pub mod week_fields;

pub use timesheet_writer::*;

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Context as _;
use log::{info, warn};

use crate::document::DocxDocument;
use crate::input::Config;
use crate::time::Clock;
use crate::week_fields::WeekFields;

/// Writes one timesheet for every business week in the configured range and
/// returns the paths of the written files in chronological order.
///
/// The first error aborts the run, the timesheets of the remaining weeks are
/// not generated.
pub fn generate_timesheets(config: &Config, clock: &dyn Clock) -> anyhow::Result<Vec<PathBuf>> {
    utils::create_dir_all(config.landing_dir()).with_context(|| {
        format!(
            "failed to create the landing directory {}",
            config.landing_dir().display()
        )
    })?;

    let weeks = config.weeks();
    if weeks.is_empty() {
        info!(
            "there are no business days between {} and {}",
            config.start_date(),
            config.end_date()
        );
        return Ok(Vec::new());
    }

    let writer = TimesheetWriter::new(config.slots())?;

    let mut written = Vec::with_capacity(weeks.len());
    let mut seen = HashSet::new();

    for week in &weeks {
        let output = config.output_path(week);
        info!("generating {} for {}", output.display(), week.iso_week());

        if !seen.insert(output.clone()) {
            warn!("{} has already been written and will be overwritten", output.display());
        }

        DocxDocument::copy_template(config.template(), &output).with_context(|| {
            format!(
                "failed to copy {} to {}",
                config.template().display(),
                output.display()
            )
        })?;

        let mut document = DocxDocument::open(&output)
            .with_context(|| format!("failed to open {}", output.display()))?;

        let signature_date = clock
            .today()
            .context("failed to determine the signature date")?;
        let fields = WeekFields::compute(week, signature_date, config.hours_per_day());

        writer
            .write(&mut document, &fields)
            .with_context(|| format!("failed to fill out {}", output.display()))?;

        document
            .save()
            .with_context(|| format!("failed to save {}", output.display()))?;

        written.push(output);
    }

    info!("generated {} timesheets", written.len());

    Ok(written)
}
