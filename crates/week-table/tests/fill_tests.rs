//! Gap filling over whole timeslot lists.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use week_table::{fill, ScheduleError, Show, ShowType, Timeslot};

fn at(h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 4, h, 0, 0).unwrap()
}

fn show(id: u64, name: &str) -> Show {
    Show::new(id, name, ShowType::new("regular"))
}

fn slot(id: u64, name: &str, from: u32, to: u32) -> Timeslot {
    Timeslot::new(id, show(id, name), at(from), at(to) - at(from))
}

fn assert_gap_free(filled: &[Timeslot]) {
    for pair in filled.windows(2) {
        assert_eq!(
            pair[0].range_end(),
            pair[1].range_start(),
            "filler has left a gap between {} and {}",
            pair[0].show.name,
            pair[1].show.name
        );
    }
}

#[test]
fn empty_night_is_one_filler() {
    let filled = fill(Vec::new(), at(0), at(6)).unwrap();

    assert_eq!(filled.len(), 1);
    assert!(filled[0].is_filler());
    assert!(filled[0].range_start() <= at(0));
    assert!(filled[0].range_end() >= at(6));
}

#[test]
fn negative_fill_is_rejected() {
    let result = fill(Vec::new(), at(6), at(0));
    assert!(matches!(result, Err(ScheduleError::InvalidRange(_))));
}

#[test]
fn single_show_is_padded_on_both_sides() {
    let show_a = slot(1, "Show A", 9, 10);
    let filled = fill(vec![show_a.clone()], at(8), at(11)).unwrap();

    let summary: Vec<_> = filled
        .iter()
        .map(|s| (s.is_filler(), s.range_start(), s.range_end()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (true, at(8), at(9)),
            (false, at(9), at(10)),
            (true, at(10), at(11)),
        ]
    );
    assert_eq!(filled[1], show_a);
}

#[test]
fn back_to_back_shows_are_unchanged() {
    let input = vec![slot(1, "Show A", 9, 10), slot(2, "Show B", 10, 11)];
    let filled = fill(input.clone(), at(9), at(11)).unwrap();
    assert_eq!(filled, input);
}

#[test]
fn typical_day_fills_only_between_shows() {
    let input = vec![
        slot(1, "Breakfast", 7, 9),
        slot(2, "Mid-morning", 9, 11),
        slot(3, "Lunch", 12, 13),
        slot(4, "Drivetime", 16, 18),
        slot(5, "Late", 22, 23),
    ];
    let filled = fill(
        input.clone(),
        input[0].range_start(),
        input[4].range_end(),
    )
    .unwrap();

    assert_gap_free(&filled);
    assert_eq!(filled.first(), input.first(), "filled before first show");
    assert_eq!(filled.last(), input.last(), "filled after last show");
    assert_eq!(filled.len(), input.len() + 3);
    for slot in filled.iter().filter(|s| !input.contains(s)) {
        assert_eq!(slot.show_type_name().to_lowercase(), "filler");
    }
}

#[test]
fn typical_day_with_margins_is_pre_and_post_filled() {
    let input = vec![slot(1, "Breakfast", 7, 9), slot(2, "Drivetime", 16, 18)];
    let hour = Duration::hours(1);
    let filled = fill(
        input.clone(),
        input[0].range_start() - hour,
        input[1].range_end() + hour,
    )
    .unwrap();

    assert_gap_free(&filled);
    assert_ne!(filled.first(), input.first(), "did not fill before first show");
    assert_ne!(filled.last(), input.last(), "did not fill after last show");
    assert_eq!(filled.len(), 5);
}

/// Sorted, non-overlapping slots built from (gap, length) pairs in minutes.
fn arb_timeslots() -> impl Strategy<Value = Vec<Timeslot>> {
    prop::collection::vec((0i64..180, 1i64..240), 0..20).prop_map(|parts| {
        let mut cursor = at(0);
        parts
            .into_iter()
            .enumerate()
            .map(|(i, (gap, len))| {
                let start = cursor + Duration::minutes(gap);
                cursor = start + Duration::minutes(len);
                Timeslot::new(
                    i as u64,
                    show(i as u64, &format!("Show {i}")),
                    start,
                    Duration::minutes(len),
                )
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn fill_keeps_every_input_slot_in_order(
        slots in arb_timeslots(),
        lead in -120i64..120,
        tail in -120i64..120,
    ) {
        let start = slots.first().map_or(at(0), |s| s.range_start()) + Duration::minutes(lead);
        let end = slots.last().map_or(at(0), |s| s.range_end()) + Duration::minutes(tail);
        prop_assume!(start <= end);

        let filled = fill(slots.clone(), start, end).unwrap();

        prop_assert!(filled.len() >= slots.len());
        prop_assert!(filled.len() <= slots.len() * 2 + 1);
        let kept: Vec<_> = filled.iter().filter(|s| !s.is_filler()).cloned().collect();
        prop_assert_eq!(kept, slots);
    }

    #[test]
    fn fill_output_is_contiguous(
        slots in arb_timeslots(),
        lead in -120i64..120,
        tail in -120i64..120,
    ) {
        let start = slots.first().map_or(at(0), |s| s.range_start()) + Duration::minutes(lead);
        let end = slots.last().map_or(at(0), |s| s.range_end()) + Duration::minutes(tail);
        prop_assume!(start <= end);

        let filled = fill(slots, start, end).unwrap();

        for pair in filled.windows(2) {
            prop_assert_eq!(pair[0].range_end(), pair[1].range_start());
        }
        prop_assert!(filled.first().unwrap().range_start() <= start);
        prop_assert!(filled.last().unwrap().range_end() >= end);
    }

    #[test]
    fn fillers_never_cover_scheduled_time(slots in arb_timeslots()) {
        let start = at(0);
        let end = slots.last().map_or(at(1), |s| s.range_end().max(at(1)));

        let filled = fill(slots.clone(), start, end).unwrap();

        for filler in filled.iter().filter(|s| s.is_filler()) {
            prop_assert!(filler.duration > Duration::zero());
            for slot in &slots {
                let overlaps = filler.range_start() < slot.range_end()
                    && slot.range_start() < filler.range_end();
                prop_assert!(!overlaps, "filler overlaps {}", slot.show.name);
            }
        }
    }

    #[test]
    fn reversed_ranges_always_fail(slots in arb_timeslots(), back in 1i64..600) {
        let end = at(12);
        let start = end + Duration::minutes(back);
        let result = fill(slots, start, end);
        prop_assert!(matches!(result, Err(ScheduleError::InvalidRange(_))));
    }
}
