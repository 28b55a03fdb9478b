use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";
const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;
const DAYS_PER_MONTH: f64 = 30.44;
const SERVICE_INTERVAL_YEARS: i32 = 2;

/// Shown in place of a next-schedule date when no install date is known.
pub const NO_SCHEDULE: &str = "-";

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let input = input.trim();
    if input.len() != 10 {
        return Err(Error::shape("date", format!("expected YYYY-MM-DD, got '{}'", input)));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| Error::shape("date", format!("expected YYYY-MM-DD, got '{}'", input)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Same month and day `years` later. 29 February rolls over to 1 March
/// when the target year is not a leap year.
pub fn add_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    let year = date.year().checked_add(years)?;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A `YYYY-MM` month token. Selects every date whose ISO string starts with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthToken {
    pub year: i32,
    pub month: u32,
}

impl MonthToken {
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let shape_err = || Error::shape("month", format!("expected YYYY-MM, got '{}'", input));

        if input.len() != 7 || input.as_bytes()[4] != b'-' {
            return Err(shape_err());
        }
        let first = NaiveDate::parse_from_str(&format!("{}-01", input), DATE_FORMAT)
            .map_err(|_| shape_err())?;

        Ok(Self {
            year: first.year(),
            month: first.month(),
        })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for MonthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        MonthToken::parse(s)
    }
}

/// Maintenance-lifecycle fields derived from an install date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lifecycle {
    pub life_in_days: i64,
    pub life_in_months: f64,
    pub next_schedule: String,
}

impl Lifecycle {
    pub fn empty() -> Self {
        Self {
            life_in_days: 0,
            life_in_months: 0.0,
            next_schedule: NO_SCHEDULE.to_string(),
        }
    }

    /// Lifecycle as of the current wall-clock instant.
    pub fn now(install_date: Option<NaiveDate>) -> Self {
        Self::calculate(install_date, Utc::now())
    }

    /// The install date counts from UTC midnight. Elapsed days are rounded up,
    /// months use a fixed 30.44-day average, and the next service is due two
    /// calendar years after install.
    pub fn calculate(install_date: Option<NaiveDate>, now: DateTime<Utc>) -> Self {
        let Some(install) = install_date else {
            return Self::empty();
        };

        let installed_at = install.and_time(NaiveTime::MIN).and_utc();
        let elapsed_ms = (now - installed_at).num_milliseconds().abs();
        let life_in_days = (elapsed_ms + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;

        let next_schedule = add_years(install, SERVICE_INTERVAL_YEARS)
            .map(format_date)
            .unwrap_or_else(|| NO_SCHEDULE.to_string());

        Self {
            life_in_days,
            life_in_months: round2(life_in_days as f64 / DAYS_PER_MONTH),
            next_schedule,
        }
    }
}
