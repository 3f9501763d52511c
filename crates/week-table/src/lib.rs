//! # week-table
//!
//! Weekly broadcast timetables from sparse timeslot data.
//!
//! Scheduled shows rarely cover every hour of the week. This crate fills the
//! empty airtime with synthetic filler slots so a schedule is gap-free, then
//! lays a filled week out as a table: one column per local day, one row per
//! local time of day at which anything starts, with each show spanning the
//! rows it covers. All day and row arithmetic is done in local wall-clock
//! time, so DST changes do not skew the grid.
//!
//! ## Modules
//!
//! - [`local`] — Absolute instants ↔ naive local time, local-time differences
//! - [`filler`] — Gap filling over a requested range
//! - [`split`] — Partition a filled sequence into local days and row offsets
//! - [`table`] — Build and populate the week table, and [`tabulate`] a schedule
//! - [`schedule`] — Lazily evaluated, cached schedule ranges and slot sources
//! - [`week`] — Week boundaries and week schedules
//! - [`term`] — Term calendar lookups
//! - [`timeslot`] — Shows, show types and timeslots
//! - [`config`] — Timezone and week-start configuration
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod filler;
pub mod local;
pub mod schedule;
pub mod split;
pub mod table;
pub mod term;
pub mod timeslot;
pub mod week;

pub use config::{ScheduleConfig, WeekStartDay};
pub use error::ScheduleError;
pub use filler::fill;
pub use local::LocalZone;
pub use schedule::{filled_builder, Schedule, ScheduleData, TimeslotSource, VecSource};
pub use split::{split_days, DayList, DaySplit, RowOffsets};
pub use table::{empty_table, populate_table, tabulate, Cell, Row, ScheduleTable, Tabulation};
pub use term::{in_term_only, Term, TermCalendar};
pub use timeslot::{Show, ShowType, Timeslot};
pub use week::{to_monday, to_week_start, week_schedule, week_start};
