//! Term calendar: which administrative period a date falls in.
//!
//! Callers use terms to decide which range to ask for; tabulation itself
//! never looks at them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::schedule::{Schedule, ScheduleData};

/// A term, covering `[start_date, end_date)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Term {
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start_date <= at && at < self.end_date
    }
}

/// Terms ordered by start date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermCalendar {
    terms: Vec<Term>,
}

impl TermCalendar {
    pub fn new(mut terms: Vec<Term>) -> Self {
        terms.sort_by_key(|term| term.start_date);
        Self { terms }
    }

    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// The term containing `at`. A term's own end date is outside it.
    pub fn of(&self, at: DateTime<Utc>) -> Option<&Term> {
        self.terms.iter().find(|term| term.contains(at))
    }

    /// The latest term starting strictly before `at`.
    pub fn before(&self, at: DateTime<Utc>) -> Option<&Term> {
        self.terms.iter().rev().find(|term| term.start_date < at)
    }
}

/// Wrap `builder` so schedules starting outside every term build to an error
/// signifier instead.
pub fn in_term_only<F>(
    calendar: TermCalendar,
    builder: F,
) -> impl Fn(&Schedule) -> ScheduleData + Send + Sync + 'static
where
    F: Fn(&Schedule) -> ScheduleData + Send + Sync + 'static,
{
    move |schedule: &Schedule| match calendar.of(schedule.start()) {
        Some(_) => builder(schedule),
        None => ScheduleData::Unavailable(format!(
            "{} is not within any term",
            schedule.start().format("%Y-%m-%d")
        )),
    }
}
