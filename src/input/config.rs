use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::{debug, info};
use thiserror::Error;

use crate::calendar::{BusinessCalendar, Week};
use crate::input::{ConfigFile, SlotMap};
use crate::time::Date;
use crate::utils::{self, PathExt};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the start date {start} is after the end date {end}")]
    InvalidRange { start: Date, end: Date },
    #[error("hours_per_day must be at least 1")]
    NoWorkingHours,
    #[error("the file prefix \"{0}\" must not contain a path separator")]
    InvalidFilePrefix(String),
    #[error("failed to find the template \"{}\"", .path.display())]
    MissingTemplate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    start_date: Date,
    end_date: Date,
    calendar: BusinessCalendar,
    template: PathBuf,
    landing_dir: PathBuf,
    hours_per_day: usize,
    file_prefix: String,
    slots: SlotMap,
}

pub struct ConfigBuilder {
    file: ConfigFile,
    template: Option<PathBuf>,
    landing_dir: Option<PathBuf>,
}

impl ConfigBuilder {
    fn new(file: ConfigFile) -> Self {
        Self {
            file,
            template: None,
            landing_dir: None,
        }
    }

    /// Uses a different template than the one in the config file.
    pub fn template(&mut self, template: impl Into<PathBuf>) -> &mut Self {
        self.template = Some(template.into());
        self
    }

    /// Writes the timesheets into a different directory than the one in the config file.
    pub fn landing_dir(&mut self, landing_dir: impl Into<PathBuf>) -> &mut Self {
        self.landing_dir = Some(landing_dir.into());
        self
    }

    pub fn build(self) -> Result<Config, ConfigError> {
        let file = self.file;
        let (start_date, end_date) = (file.start_date(), file.end_date());

        if start_date > end_date {
            return Err(ConfigError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }

        if file.hours_per_day() == 0 {
            return Err(ConfigError::NoWorkingHours);
        }

        if file.file_prefix().contains(['/', '\\']) {
            return Err(ConfigError::InvalidFilePrefix(file.file_prefix().to_string()));
        }

        let template = self
            .template
            .unwrap_or_else(|| file.template_doc().to_path_buf());
        let template = dunce::canonicalize(&template)
            .map_err(|source| ConfigError::MissingTemplate {
                path: template,
                source,
            })?;
        debug!("template: {}", template.display());

        let landing_dir = self
            .landing_dir
            .unwrap_or_else(|| file.landing_dir().to_path_buf());

        Ok(Config {
            start_date,
            end_date,
            calendar: BusinessCalendar::new(file.holidays().iter().copied()),
            template,
            landing_dir,
            hours_per_day: file.hours_per_day(),
            file_prefix: file.file_prefix().to_string(),
            slots: file.slots().clone(),
        })
    }
}

impl Config {
    #[must_use]
    pub fn from_config_file(file: ConfigFile) -> ConfigBuilder {
        ConfigBuilder::new(file)
    }

    /// Reads the config from a json file, or a toml file if the path ends with `.toml`.
    pub fn try_from_file(path: impl AsRef<Path>) -> anyhow::Result<ConfigBuilder> {
        let path = path.as_ref();
        info!("loading config from {}", path.display());

        let reader = File::open(path)
            .with_context(|| format!("failed to open `{}`", path.display()))?;

        let file: ConfigFile = if path.has_extension("toml") {
            utils::toml_from_reader(reader)
        } else {
            serde_json::from_reader(BufReader::new(reader)).map_err(anyhow::Error::from)
        }
        .with_context(|| format!("failed to parse `{}`", path.display()))?;

        Ok(Self::from_config_file(file))
    }

    #[must_use]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    #[must_use]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    #[must_use]
    pub fn calendar(&self) -> &BusinessCalendar {
        &self.calendar
    }

    #[must_use]
    pub fn template(&self) -> &Path {
        &self.template
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
    pub fn slots(&self) -> &SlotMap {
        &self.slots
    }

    /// The business weeks in the configured date range.
    #[must_use]
    pub fn weeks(&self) -> Vec<Week> {
        self.calendar.weeks(self.start_date, self.end_date)
    }

    /// The name of the timesheet file for the `week`, for example
    /// `Procal_Tech_Weekly_Timesheet_Jan_7_11.docx`.
    #[must_use]
    pub fn file_name(&self, week: &Week) -> String {
        format!(
            "{}{}_{}_{}.docx",
            self.file_prefix,
            week.first().month().abbreviation(),
            week.first().day(),
            week.last().day()
        )
    }

    #[must_use]
    pub fn output_path(&self, week: &Week) -> PathBuf {
        self.landing_dir.join(self.file_name(week))
    }
}
