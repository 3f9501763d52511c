//! Day partitioning of a gap-free slot sequence.
//!
//! Splits a filled schedule into one list per local calendar day and collects
//! the local times of day at which any slot starts. Those offsets become the
//! row boundaries shared by every day column of the table.

use std::collections::BTreeSet;

use chrono::{Duration, NaiveDateTime};
use log::{debug, warn};

use crate::error::{Result, ScheduleError};
use crate::local::LocalZone;
use crate::timeslot::Timeslot;

/// One local day of consecutive timeslots.
///
/// The first and last entries may straddle into the neighbouring days; a
/// straddling slot appears in both days' lists.
pub type DayList<'a> = Vec<&'a Timeslot>;

/// Offsets from the day start at which some slot begins, on any day.
///
/// Always contains [`Duration::zero`]. Sorted order gives the table's rows.
pub type RowOffsets = BTreeSet<Duration>;

/// The output of [`split_days`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySplit<'a> {
    pub days: Vec<DayList<'a>>,
    pub row_offsets: RowOffsets,
}

/// Split `data` into local days starting at `local_start`.
///
/// Day `n` covers local wall-clock time `[local_start + n days,
/// local_start + (n + 1) days)`. A slot that starts on a later day rotates
/// the current day out; if the last slot of the closing day runs past the
/// boundary it is carried into the next day as its first entry. Slots
/// running across several days are carried into each of them.
///
/// # Errors
///
/// Returns [`ScheduleError::Inconsistent`] if a day would be closed with no
/// slots at all, which means `data` was not gap-free.
pub fn split_days<'a>(
    zone: &LocalZone,
    local_start: NaiveDateTime,
    data: &'a [Timeslot],
) -> Result<DaySplit<'a>> {
    let mut days: Vec<DayList<'a>> = Vec::new();
    let mut day_list: DayList<'a> = Vec::new();
    let mut row_offsets = RowOffsets::from([Duration::zero()]);

    let mut day_start = local_start;
    let mut day_end = day_start + Duration::days(1);

    for slot in data {
        let local_slot_start = zone.to_naive_local(slot.start_time);

        while day_end <= local_slot_start {
            day_list = rotate_day(zone, day_end, day_list, &mut days)?;
            day_start = day_end;
            day_end += Duration::days(1);
        }

        day_list.push(slot);
        if local_slot_start > day_start {
            row_offsets.insert(local_slot_start - day_start);
        }
    }

    // The open day is kept even if its last slot runs on past the boundary.
    days.push(day_list);

    debug!(
        "split {} slots from {} into {} days with {} row boundaries",
        data.len(),
        local_start,
        days.len(),
        row_offsets.len()
    );
    Ok(DaySplit { days, row_offsets })
}

/// Close the day ending at `day_end` and return the opening list for the next.
fn rotate_day<'a>(
    zone: &LocalZone,
    day_end: NaiveDateTime,
    day_list: DayList<'a>,
    days: &mut Vec<DayList<'a>>,
) -> Result<DayList<'a>> {
    let Some(&last) = day_list.last() else {
        warn!("day ending {day_end} has no slots; is the schedule filled?");
        return Err(ScheduleError::Inconsistent(format!(
            "empty day list for the day ending {} after {} complete days; \
             the slot sequence is not gap-free",
            day_end,
            days.len()
        )));
    };

    days.push(day_list);

    if zone.to_naive_local(last.end_time()) > day_end {
        Ok(vec![last])
    } else {
        Ok(Vec::new())
    }
}
