//! Schedule configuration: which zone is "local" and which day starts a week.
//!
//! Tabulation reasons in local wall-clock time, so the zone is the one piece
//! of configuration every local-time computation needs. It is carried
//! explicitly in a [`ScheduleConfig`] rather than read from process state.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::local::LocalZone;

/// Which day begins a week schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStartDay {
    /// ISO 8601 standard.
    #[default]
    Monday,
    /// US/Canada convention.
    Sunday,
}

impl WeekStartDay {
    /// How many days `weekday` is from the week-start day.
    pub fn days_since_start(self, weekday: Weekday) -> i64 {
        match self {
            WeekStartDay::Monday => weekday.num_days_from_monday() as i64,
            WeekStartDay::Sunday => weekday.num_days_from_sunday() as i64,
        }
    }
}

impl FromStr for WeekStartDay {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStartDay::Monday),
            "sunday" | "sun" => Ok(WeekStartDay::Sunday),
            other => Err(ScheduleError::InvalidWeekStart(format!(
                "unknown day '{other}', expected monday or sunday"
            ))),
        }
    }
}

impl fmt::Display for WeekStartDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeekStartDay::Monday => f.write_str("monday"),
            WeekStartDay::Sunday => f.write_str("sunday"),
        }
    }
}

/// The zone new schedules are tabulated in when none is given.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Europe::London;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// The station's local timezone.
    pub timezone: Tz,
    pub week_start: WeekStartDay,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE,
            week_start: WeekStartDay::default(),
        }
    }
}

impl ScheduleConfig {
    /// Build a config from an IANA zone name.
    pub fn with_timezone_name(name: &str) -> Result<Self> {
        Ok(Self {
            timezone: parse_timezone(name)?,
            ..Self::default()
        })
    }

    pub fn local_zone(&self) -> LocalZone {
        LocalZone::new(self.timezone)
    }
}

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.trim()
        .parse::<Tz>()
        .map_err(|_| ScheduleError::InvalidTimezone(format!("'{}'", s)))
}

/// Parse an RFC 3339 timestamp, or an ISO 8601 date taken as local midnight
/// in `zone`.
pub fn parse_datetime(s: &str, zone: &LocalZone) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| zone.to_aware(midnight))
        .ok_or_else(|| {
            ScheduleError::InvalidDatetime(format!(
                "'{s}': expected an RFC 3339 timestamp or a YYYY-MM-DD date"
            ))
        })
}
