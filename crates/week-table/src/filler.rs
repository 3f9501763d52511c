//! Gap filling: turn a sparse, ordered timeslot list into a gap-free one.
//!
//! Wherever nothing is scheduled inside the requested range, a synthetic
//! filler slot is inserted so that every adjacent pair in the result chains
//! exactly (`prev.range_end() == next.range_start()`).

use chrono::{DateTime, Utc};
use log::debug;

use crate::error::{Result, ScheduleError};
use crate::timeslot::Timeslot;

/// Fill the gaps in `timeslots` over `[start, end)`.
///
/// `timeslots` must be sorted by start time and mutually non-overlapping.
/// Every input slot is kept, unchanged and in order; filler slots only ever
/// cover genuinely empty time. A range boundary that falls inside an input
/// slot produces no filler on that side. A slot lying wholly before `start`
/// still moves the gap-filling cursor to its end, so the first filler chains
/// on from it.
///
/// An empty input yields exactly one filler slot spanning `[start, end)`.
///
/// # Errors
///
/// Returns [`ScheduleError::InvalidRange`] if `start` is after `end`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use week_table::filler::fill;
///
/// let start = Utc.with_ymd_and_hms(2026, 5, 4, 0, 0, 0).unwrap();
/// let end = Utc.with_ymd_and_hms(2026, 5, 4, 6, 0, 0).unwrap();
///
/// let filled = fill(Vec::new(), start, end).unwrap();
/// assert_eq!(filled.len(), 1);
/// assert!(filled[0].is_filler());
/// assert_eq!(filled[0].range_end(), end);
/// ```
pub fn fill<I>(timeslots: I, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Timeslot>>
where
    I: IntoIterator<Item = Timeslot>,
{
    if start > end {
        return Err(ScheduleError::InvalidRange(format!(
            "fill range starts at {start} but ends earlier, at {end}"
        )));
    }

    let timeslots = timeslots.into_iter();
    let mut filled = Vec::with_capacity(timeslots.size_hint().0 * 2 + 1);
    let mut gaps = 0usize;
    let mut cursor = start;

    for slot in timeslots {
        if cursor < slot.range_start() {
            filled.push(Timeslot::filler(cursor, slot.range_start()));
            gaps += 1;
        }
        cursor = slot.range_end();
        filled.push(slot);
    }

    if filled.is_empty() || cursor < end {
        filled.push(Timeslot::filler(cursor, end));
        gaps += 1;
    }

    debug!(
        "filled {} .. {}: {} slots, {} gaps",
        start,
        end,
        filled.len() - gaps,
        gaps
    );
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeslot::{Show, ShowType};
    use chrono::{Duration, TimeZone};

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 4, h, 0, 0).unwrap()
    }

    fn show_slot(id: u64, from: u32, to: u32) -> Timeslot {
        Timeslot::new(
            id,
            Show::new(id, format!("Show {id}"), ShowType::new("regular")),
            at(from),
            Duration::hours((to - from) as i64),
        )
    }

    fn assert_contiguous(filled: &[Timeslot]) {
        for pair in filled.windows(2) {
            assert_eq!(
                pair[0].range_end(),
                pair[1].range_start(),
                "gap left between {:?} and {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    #[test]
    fn empty_input_gives_one_filler_over_range() {
        let filled = fill(Vec::new(), at(0), at(6)).unwrap();
        assert_eq!(filled.len(), 1);
        assert!(filled[0].is_filler());
        assert_eq!(filled[0].range_start(), at(0));
        assert_eq!(filled[0].range_end(), at(6));
    }

    #[test]
    fn empty_input_over_empty_range_still_gives_one_filler() {
        let filled = fill(Vec::new(), at(3), at(3)).unwrap();
        assert_eq!(filled.len(), 1);
        assert_eq!(filled[0].duration, Duration::zero());
    }

    #[test]
    fn reversed_range_is_invalid() {
        let err = fill(Vec::new(), at(6), at(0)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRange(_)));
    }

    #[test]
    fn reversed_range_is_invalid_even_with_slots() {
        let err = fill(vec![show_slot(1, 2, 3)], at(6), at(0)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidRange(_)));
    }

    #[test]
    fn pads_both_ends_of_a_single_show() {
        let show = show_slot(1, 9, 10);
        let filled = fill(vec![show.clone()], at(8), at(11)).unwrap();

        assert_eq!(filled.len(), 3);
        assert!(filled[0].is_filler());
        assert_eq!((filled[0].range_start(), filled[0].range_end()), (at(8), at(9)));
        assert_eq!(filled[1], show);
        assert!(filled[2].is_filler());
        assert_eq!((filled[2].range_start(), filled[2].range_end()), (at(10), at(11)));
    }

    #[test]
    fn back_to_back_shows_need_no_filler() {
        let input = vec![show_slot(1, 9, 10), show_slot(2, 10, 11)];
        let filled = fill(input.clone(), at(9), at(11)).unwrap();
        assert_eq!(filled, input);
    }

    #[test]
    fn fills_between_shows() {
        let input = vec![show_slot(1, 9, 10), show_slot(2, 12, 13)];
        let filled = fill(input.clone(), at(9), at(13)).unwrap();

        assert_eq!(filled.len(), 3);
        assert_eq!(filled[0], input[0]);
        assert!(filled[1].is_filler());
        assert_eq!((filled[1].range_start(), filled[1].range_end()), (at(10), at(12)));
        assert_eq!(filled[2], input[1]);
        assert_contiguous(&filled);
    }

    #[test]
    fn boundary_inside_a_show_is_not_filled() {
        // The range starts at 10:00 but the first show already began at 09:00,
        // and ends at 12:00 while the last show runs until 13:00.
        let input = vec![show_slot(1, 9, 11), show_slot(2, 11, 13)];
        let filled = fill(input.clone(), at(10), at(12)).unwrap();
        assert_eq!(filled, input);
    }

    #[test]
    fn slot_ending_before_range_start_chains_into_first_filler() {
        let input = vec![show_slot(1, 5, 6), show_slot(2, 9, 10)];
        let filled = fill(input.clone(), at(8), at(11)).unwrap();

        assert_eq!(filled.len(), 4);
        assert_eq!(filled[0], input[0]);
        assert!(filled[1].is_filler());
        assert_eq!((filled[1].range_start(), filled[1].range_end()), (at(6), at(9)));
        assert_eq!(filled[2], input[1]);
        assert_eq!((filled[3].range_start(), filled[3].range_end()), (at(10), at(11)));
        assert_contiguous(&filled);
    }

    #[test]
    fn every_gap_gets_exactly_one_filler() {
        let input = vec![show_slot(1, 2, 3), show_slot(2, 5, 6), show_slot(3, 8, 9)];
        let filled = fill(input.clone(), at(0), at(12)).unwrap();

        assert_eq!(filled.len(), input.len() + 4);
        assert_eq!(filled.iter().filter(|s| s.is_filler()).count(), 4);
        let kept: Vec<_> = filled.iter().filter(|s| !s.is_filler()).cloned().collect();
        assert_eq!(kept, input);
        assert_contiguous(&filled);
        assert_eq!(filled.first().unwrap().range_start(), at(0));
        assert_eq!(filled.last().unwrap().range_end(), at(12));
    }
}
