//! Conversion between absolute instants and naive local wall-clock time.
//!
//! Tabulation lays slots out by local time of day, so "18:00 to 19:00" is one
//! row even on a day where the clocks change at 02:00. Subtracting two naive
//! local times gives elapsed *local* time, which differs from elapsed absolute
//! time across a DST transition.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// The station's local timezone, used for every local-time computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalZone {
    tz: Tz,
}

impl LocalZone {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    /// Convert an instant to the local wall-clock time, dropping the zone.
    pub fn to_naive_local(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.tz).naive_local()
    }

    /// Interpret a naive wall-clock time as local time in this zone.
    ///
    /// Follows the `fold = 0` convention: an ambiguous time (fall-back overlap)
    /// resolves to its earlier instant, and a nonexistent time (spring-forward
    /// gap) is read with the offset in force before the jump, landing the
    /// same distance past the transition. A gap at midnight therefore maps
    /// midnight to the first wall-clock time after the jump.
    pub fn to_aware(&self, naive: NaiveDateTime) -> DateTime<Utc> {
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earlier, _) => earlier.with_timezone(&Utc),
            LocalResult::None => {
                let before = self
                    .tz
                    .offset_from_utc_datetime(&(naive - Duration::days(1)))
                    .fix();
                (naive - Duration::seconds(before.local_minus_utc() as i64)).and_utc()
            }
        }
    }

    /// Local-time difference `a - b`.
    pub fn local_diff(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> Duration {
        self.to_naive_local(a) - self.to_naive_local(b)
    }
}

impl From<Tz> for LocalZone {
    fn from(tz: Tz) -> Self {
        Self::new(tz)
    }
}
