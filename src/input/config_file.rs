use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::input::SlotMap;
use crate::time::Date;
use crate::week_fields::DEFAULT_HOURS_PER_DAY;

#[must_use]
const fn default_hours_per_day() -> usize {
    DEFAULT_HOURS_PER_DAY
}

#[must_use]
fn default_file_prefix() -> String {
    "Procal_Tech_Weekly_Timesheet_".to_string()
}

/// The contents of the config file that is passed on the command line.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConfigFile {
    start_date: Date,
    end_date: Date,
    #[serde(default)]
    holidays: Vec<Date>,
    template_doc: PathBuf,
    landing_dir: PathBuf,
    #[serde(default = "default_hours_per_day")]
    hours_per_day: usize,
    #[serde(default = "default_file_prefix")]
    file_prefix: String,
    #[serde(default)]
    slots: SlotMap,
}

impl ConfigFile {
    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    #[must_use]
    pub fn holidays(&self) -> &[Date] {
        &self.holidays
    }

    #[must_use]
    pub fn template_doc(&self) -> &Path {
        &self.template_doc
    }

    #[must_use]
    pub fn landing_dir(&self) -> &Path {
        &self.landing_dir
    }

    #[must_use]
    pub fn hours_per_day(&self) -> usize {
        self.hours_per_day
    }

    #[must_use]
    pub fn file_prefix(&self) -> &str {
        &self.file_prefix
    }

    #[must_use]
    pub fn slots(&self) -> &SlotMap {
        &self.slots
    }
}
