//! Lazily evaluated schedules over a time range.
//!
//! A [`Schedule`] names a range `[start, start + range)` and knows how to
//! build its data, but does not do so until [`Schedule::data`] is first
//! called. The result is cached for the life of that schedule. Neighbouring
//! schedules from [`Schedule::previous`] and [`Schedule::next`] are fresh,
//! unevaluated instances sharing the same builder.

use std::fmt;
use std::sync::{Arc, OnceLock};

use chrono::{DateTime, Duration, Utc};
use log::debug;

use crate::error::{Result, ScheduleError};
use crate::filler::fill;
use crate::timeslot::Timeslot;

/// What a schedule evaluates to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleData {
    /// Gap-filled, ordered timeslots covering the schedule's range.
    Slots(Vec<Timeslot>),
    /// An error that happened upstream, to be shown to the user as-is.
    Unavailable(String),
}

impl ScheduleData {
    pub fn slots(&self) -> Option<&[Timeslot]> {
        match self {
            ScheduleData::Slots(slots) => Some(slots),
            ScheduleData::Unavailable(_) => None,
        }
    }
}

type Builder = Arc<dyn Fn(&Schedule) -> ScheduleData + Send + Sync>;

pub struct Schedule {
    start: DateTime<Utc>,
    range: Duration,
    builder: Builder,
    data: OnceLock<ScheduleData>,
}

impl Schedule {
    /// Create an unevaluated schedule. `range` should be non-negative.
    pub fn new<F>(start: DateTime<Utc>, range: Duration, builder: F) -> Self
    where
        F: Fn(&Schedule) -> ScheduleData + Send + Sync + 'static,
    {
        Self::with_builder(start, range, Arc::new(builder))
    }

    fn with_builder(start: DateTime<Utc>, range: Duration, builder: Builder) -> Self {
        Self {
            start,
            range,
            builder,
            data: OnceLock::new(),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn range(&self) -> Duration {
        self.range
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.start + self.range
    }

    /// The schedule's data, built on first access and cached afterwards.
    pub fn data(&self) -> &ScheduleData {
        self.data.get_or_init(|| {
            debug!("building schedule {} + {}", self.start, self.range);
            (self.builder)(self)
        })
    }

    pub fn is_evaluated(&self) -> bool {
        self.data.get().is_some()
    }

    /// The schedule one range earlier.
    pub fn previous(&self) -> Schedule {
        Self::with_builder(self.start - self.range, self.range, Arc::clone(&self.builder))
    }

    /// The schedule one range later.
    pub fn next(&self) -> Schedule {
        Self::with_builder(self.start + self.range, self.range, Arc::clone(&self.builder))
    }
}

impl fmt::Debug for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schedule")
            .field("start", &self.start)
            .field("range", &self.range)
            .field("data", &self.data.get())
            .finish_non_exhaustive()
    }
}

/// Where timeslots come from (normally a database query).
pub trait TimeslotSource {
    /// Timeslots overlapping `[start, end)`, ordered by start time and
    /// mutually non-overlapping. An `Err` is an error signifier for display.
    fn timeslots_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> std::result::Result<Vec<Timeslot>, String>;
}

/// A builder that loads slots from `source` and fills the gaps.
///
/// Source failures and invalid ranges are reported as
/// [`ScheduleData::Unavailable`].
pub fn filled_builder<S>(source: S) -> impl Fn(&Schedule) -> ScheduleData + Send + Sync + 'static
where
    S: TimeslotSource + Send + Sync + 'static,
{
    move |schedule: &Schedule| {
        let (start, end) = (schedule.start(), schedule.end());
        let slots = match source.timeslots_between(start, end) {
            Ok(slots) => slots,
            Err(message) => return ScheduleData::Unavailable(message),
        };
        match fill(slots, start, end) {
            Ok(filled) => ScheduleData::Slots(filled),
            Err(e) => ScheduleData::Unavailable(e.to_string()),
        }
    }
}

/// An in-memory [`TimeslotSource`].
#[derive(Debug, Clone, Default)]
pub struct VecSource {
    slots: Vec<Timeslot>,
}

impl VecSource {
    /// Sort `slots` by start time.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError::Inconsistent`] if any two slots overlap.
    pub fn new(mut slots: Vec<Timeslot>) -> Result<Self> {
        slots.sort_by_key(|slot| slot.start_time);
        if let Some(pair) = slots
            .windows(2)
            .find(|pair| pair[0].range_end() > pair[1].range_start())
        {
            return Err(ScheduleError::Inconsistent(format!(
                "'{}' ({}) overlaps '{}' ({})",
                pair[0].show.name, pair[0].start_time, pair[1].show.name, pair[1].start_time
            )));
        }
        Ok(Self { slots })
    }

    pub fn slots(&self) -> &[Timeslot] {
        &self.slots
    }
}

impl TimeslotSource for VecSource {
    fn timeslots_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> std::result::Result<Vec<Timeslot>, String> {
        Ok(self
            .slots
            .iter()
            .filter(|slot| slot.range_start() < end && slot.range_end() > start)
            .cloned()
            .collect())
    }
}
