use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeSet, HashSet},
    path::Path,
};

use crate::error::CalendarError;

/// On-disk shape of the operator-maintained holiday table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidayCalendarFile {
    pub version: String,
    #[serde(default)]
    pub rest_days: Vec<Weekday>,
    #[serde(default)]
    pub normal: Vec<NaiveDate>,
    #[serde(default)]
    pub major: Vec<NaiveDate>,
}

/// Validated holiday table used by the accrual calculator.
///
/// Normal holidays always grant a bonus day. Major holidays (the lunar
/// holiday clusters) only grant one when they land on a business rest day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    version: String,
    pub(crate) rest_days: HashSet<Weekday>,
    pub(crate) normal: BTreeSet<NaiveDate>,
    pub(crate) major: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn new(
        version: impl Into<String>,
        rest_days: impl IntoIterator<Item = Weekday>,
        normal: impl IntoIterator<Item = NaiveDate>,
        major: impl IntoIterator<Item = NaiveDate>,
    ) -> Result<Self, CalendarError> {
        let calendar = Self {
            version: version.into(),
            rest_days: rest_days.into_iter().collect(),
            normal: normal.into_iter().collect(),
            major: major.into_iter().collect(),
        };
        calendar.validate()?;
        Ok(calendar)
    }

    /// A calendar with no holidays; every window earns zero bonus days.
    pub fn empty() -> Self {
        Self {
            version: "empty".to_string(),
            rest_days: HashSet::new(),
            normal: BTreeSet::new(),
            major: BTreeSet::new(),
        }
    }

    /// Loads a calendar file. The format follows the extension (toml, json, yaml).
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CalendarError> {
        let path = path.as_ref();
        let load_error = |source| CalendarError::Load {
            path: path.to_path_buf(),
            source,
        };

        let file: HolidayCalendarFile = ::config::Config::builder()
            .add_source(::config::File::from(path))
            .build()
            .map_err(load_error)?
            .try_deserialize()
            .map_err(load_error)?;

        Self::try_from(file)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Rest days ordered Monday first.
    pub fn rest_days(&self) -> Vec<Weekday> {
        let mut days: Vec<Weekday> = self.rest_days.iter().copied().collect();
        days.sort_by_key(Weekday::num_days_from_monday);
        days
    }

    pub fn normal_holidays(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.normal.iter().copied()
    }

    pub fn major_holidays(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.major.iter().copied()
    }

    pub fn is_rest_day(&self, weekday: Weekday) -> bool {
        self.rest_days.contains(&weekday)
    }

    /// First and last calendar year that the table lists any holiday for.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let first = self.normal.first().into_iter().chain(self.major.first()).min()?;
        let last = self.normal.last().into_iter().chain(self.major.last()).max()?;
        Some((first.year(), last.year()))
    }

    /// Whether `date` falls in a year the table was maintained for.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.year_span()
            .is_some_and(|(first, last)| (first..=last).contains(&date.year()))
    }

    fn validate(&self) -> Result<(), CalendarError> {
        if let Some(date) = self.normal.intersection(&self.major).next() {
            return Err(CalendarError::OverlappingHoliday { date: *date });
        }
        if !self.major.is_empty() && self.rest_days.is_empty() {
            return Err(CalendarError::NoRestDays);
        }
        Ok(())
    }
}

impl TryFrom<HolidayCalendarFile> for HolidayCalendar {
    type Error = CalendarError;

    fn try_from(value: HolidayCalendarFile) -> Result<Self, Self::Error> {
        Self::new(value.version, value.rest_days, value.normal, value.major)
    }
}

impl From<&HolidayCalendar> for HolidayCalendarFile {
    fn from(value: &HolidayCalendar) -> Self {
        Self {
            version: value.version.clone(),
            rest_days: value.rest_days(),
            normal: value.normal_holidays().collect(),
            major: value.major_holidays().collect(),
        }
    }
}
