//! Weekly schedule tables.
//!
//! A table is a row-major grid. Each row starts at a local time of day (the
//! row offsets found by [`split_days`]) and holds one cell per day column.
//! A slot is written once, at the row it starts on, together with the number
//! of rows it spans; the rows below it in that column stay `None`, meaning
//! "continues from above".

use chrono::{Duration, NaiveDateTime};
use log::{debug, warn};
use serde::Serialize;

use crate::error::{Result, ScheduleError};
use crate::local::LocalZone;
use crate::schedule::{Schedule, ScheduleData};
use crate::split::{split_days, DayList, RowOffsets};
use crate::timeslot::Timeslot;

/// A slot placed in the table, and how many rows it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Cell<'a> {
    pub slot: &'a Timeslot,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Row<'a> {
    /// Local start time of this row on the first day of the table. Add `n`
    /// days for column `n`.
    pub start: NaiveDateTime,
    /// One entry per day column.
    pub cells: Vec<Option<Cell<'a>>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ScheduleTable<'a> {
    pub rows: Vec<Row<'a>>,
}

impl<'a> ScheduleTable<'a> {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn n_columns(&self) -> usize {
        self.rows.first().map_or(0, |row| row.cells.len())
    }

    pub fn cell(&self, row: usize, day: usize) -> Option<&Cell<'a>> {
        self.rows.get(row)?.cells.get(day)?.as_ref()
    }

    /// The populated cells of one day column, top to bottom, with their rows.
    pub fn column(&self, day: usize) -> impl Iterator<Item = (usize, &Cell<'a>)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(move |(i, row)| Some((i, row.cells.get(day)?.as_ref()?)))
    }
}

/// Build a table with one row per offset and `n_columns` empty day cells.
pub fn empty_table<'a>(
    local_start: NaiveDateTime,
    row_offsets: &RowOffsets,
    n_columns: usize,
) -> ScheduleTable<'a> {
    let rows = row_offsets
        .iter()
        .map(|&offset| Row {
            start: local_start + offset,
            cells: vec![None; n_columns],
        })
        .collect();
    ScheduleTable { rows }
}

/// Place every day's slots into `table`, one column per day.
///
/// # Errors
///
/// Returns [`ScheduleError::Inconsistent`] if a slot ends between two row
/// boundaries, if a slot spans no rows (zero length, or lying wholly inside
/// a repeated fall-back hour), or if there are more days than the table has
/// columns.
pub fn populate_table<'a>(
    zone: &LocalZone,
    mut table: ScheduleTable<'a>,
    days: &[DayList<'a>],
) -> Result<ScheduleTable<'a>> {
    for (day, slots) in days.iter().enumerate() {
        let mut column = DayColumn::new(&mut table, day);
        populate_day(zone, &mut column, slots)?;
    }
    Ok(table)
}

/// One day column of a table under construction.
struct DayColumn<'t, 'a> {
    table: &'t mut ScheduleTable<'a>,
    day: usize,
    offset: Duration,
}

impl<'t, 'a> DayColumn<'t, 'a> {
    fn new(table: &'t mut ScheduleTable<'a>, day: usize) -> Self {
        Self {
            table,
            day,
            offset: Duration::days(day as i64),
        }
    }

    /// Local start time of `row` on this column's day, if the row exists.
    fn row_time(&self, row: usize) -> Option<NaiveDateTime> {
        self.table.rows.get(row).map(|r| r.start + self.offset)
    }

    fn place(&mut self, row: usize, slot: &'a Timeslot, rows: usize) -> Result<()> {
        let day = self.day;
        let cell = self
            .table
            .rows
            .get_mut(row)
            .and_then(|r| r.cells.get_mut(day))
            .ok_or_else(|| {
                ScheduleError::Inconsistent(format!(
                    "no cell at row {row}, day {day} for show '{}' starting {}",
                    slot.show.name, slot.start_time
                ))
            })?;
        *cell = Some(Cell { slot, rows });
        Ok(())
    }
}

fn populate_day<'a>(
    zone: &LocalZone,
    column: &mut DayColumn<'_, 'a>,
    slots: &[&'a Timeslot],
) -> Result<()> {
    let mut row = 0;
    for &slot in slots {
        let start_row = row;
        let local_end = zone.to_naive_local(slot.end_time());

        // Running off the bottom is normal for a slot crossing into the next day.
        loop {
            match column.row_time(row) {
                Some(time) if time < local_end => row += 1,
                Some(time) if time > local_end => {
                    let next = column
                        .row_time(row + 1)
                        .map_or_else(|| "END".to_string(), |t| t.to_string());
                    warn!(
                        "show '{}' ends at {} between row boundaries",
                        slot.show.name, local_end
                    );
                    return Err(ScheduleError::Inconsistent(format!(
                        "partitioning unsound, show exceeds row bounds \
                         (day {}, row {}, show '{}', row time {} > slot end {} < {})",
                        column.day, row, slot.show.name, time, local_end, next
                    )));
                }
                _ => break,
            }
        }

        if row == start_row {
            warn!(
                "show '{}' starting {} covers no rows on day {}",
                slot.show.name, slot.start_time, column.day
            );
            return Err(ScheduleError::Inconsistent(format!(
                "show '{}' starting {} spans no rows (day {}, row {}, local end {})",
                slot.show.name, slot.start_time, column.day, row, local_end
            )));
        }
        column.place(start_row, slot, row - start_row)?;
    }
    debug!("placed {} slots in day column {}", slots.len(), column.day);
    Ok(())
}

/// The result of tabulating a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tabulation<'a> {
    Table(ScheduleTable<'a>),
    /// An upstream error signifier, passed through untouched.
    Unavailable(&'a str),
}

/// Turn a schedule's filled data into a weekly table.
///
/// Forces evaluation of the schedule's data. An error signifier in the data
/// is passed through as [`Tabulation::Unavailable`] rather than raised.
///
/// # Errors
///
/// Returns [`ScheduleError::Inconsistent`] if the data is not gap-free or
/// does not partition cleanly into rows.
pub fn tabulate<'a>(zone: &LocalZone, schedule: &'a Schedule) -> Result<Tabulation<'a>> {
    let slots = match schedule.data() {
        ScheduleData::Unavailable(message) => return Ok(Tabulation::Unavailable(message)),
        ScheduleData::Slots(slots) => slots,
    };

    let local_start = zone.to_naive_local(schedule.start());
    let split = split_days(zone, local_start, slots)?;
    let table = empty_table(local_start, &split.row_offsets, split.days.len());
    populate_table(zone, table, &split.days).map(Tabulation::Table)
}
