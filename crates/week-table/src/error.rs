//! Error types for week-table operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A fill was requested over a range whose start is after its end.
    #[error("Invalid range: {0}")]
    InvalidRange(String),

    /// The fill/partition pipeline produced data the table cannot hold.
    #[error("Schedule inconsistency: {0}")]
    Inconsistent(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid week start: {0}")]
    InvalidWeekStart(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
