//! Week schedules: the range a weekly timetable is built over.

use chrono::{DateTime, Datelike, Duration, NaiveDateTime, NaiveTime, Utc};

use crate::config::{ScheduleConfig, WeekStartDay};
use crate::schedule::{Schedule, ScheduleData};

/// The same wall-clock time on the first day of `local`'s week.
pub fn to_week_start(local: NaiveDateTime, week_start: WeekStartDay) -> NaiveDateTime {
    local - Duration::days(week_start.days_since_start(local.weekday()))
}

/// [`to_week_start`] for Monday-based weeks.
pub fn to_monday(local: NaiveDateTime) -> NaiveDateTime {
    to_week_start(local, WeekStartDay::Monday)
}

/// Local midnight at the start of the week containing `at`, as an instant.
///
/// In a zone whose clocks go forward at midnight (`America/Santiago`, for
/// one) that midnight does not exist, and the week starts at the first wall
/// clock time of the day instead, usually 01:00. Tabulation then measures
/// every day of that week from 01:00.
pub fn week_start(at: DateTime<Utc>, config: &ScheduleConfig) -> DateTime<Utc> {
    let zone = config.local_zone();
    let first_day = to_week_start(zone.to_naive_local(at), config.week_start).date();
    zone.to_aware(first_day.and_time(NaiveTime::MIN))
}

/// The schedule for the week containing `at`.
///
/// Starts at local midnight on the week's first day and runs until local
/// midnight seven days later, so a week with a DST change is 167 or 169
/// hours long.
pub fn week_schedule<F>(at: DateTime<Utc>, config: &ScheduleConfig, builder: F) -> Schedule
where
    F: Fn(&Schedule) -> ScheduleData + Send + Sync + 'static,
{
    let zone = config.local_zone();
    let start = week_start(at, config);
    let end = zone.to_aware(zone.to_naive_local(start) + Duration::weeks(1));
    Schedule::new(start, end - start, builder)
}
