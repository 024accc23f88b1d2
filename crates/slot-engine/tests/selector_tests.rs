//! Tests for diversity selection.

use chrono::{Duration, TimeZone, Utc};
use slot_engine::scanner::CandidateSlot;
use slot_engine::selector::{select, DiverseSelection, EarliestSelection, SelectionStrategy};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn slot(day_index: i64, hour: u32, minute: u32) -> CandidateSlot {
    let start = Utc.with_ymd_and_hms(2026, 3, 16, hour, minute, 0).unwrap()
        + Duration::days(day_index);
    CandidateSlot {
        start,
        end: start + Duration::minutes(30),
        duration_minutes: 30,
        hour_of_day: hour,
        day_index,
    }
}

/// One slot per hour in `hours`, on consecutive days so order is preserved.
fn slots_with_hours(hours: &[u32]) -> Vec<CandidateSlot> {
    hours
        .iter()
        .enumerate()
        .map(|(i, &h)| slot(i as i64, h, 0))
        .collect()
}

/// 50 slots over 5 days: 09:00, 09:30, ..., 13:30 each day.
fn fifty_slots() -> Vec<CandidateSlot> {
    (0..50)
        .map(|i| {
            let day = i / 10;
            let within = i % 10;
            slot(day, 9 + (within / 2) as u32, 30 * (within % 2) as u32)
        })
        .collect()
}

// ── Pass-through and small counts ───────────────────────────────────────────

#[test]
fn fewer_slots_than_count_pass_through() {
    let slots = slots_with_hours(&[9, 10]);
    assert_eq!(select(&slots, 3), slots);
}

#[test]
fn exactly_count_slots_pass_through() {
    let slots = slots_with_hours(&[9, 9, 9]);
    assert_eq!(select(&slots, 3), slots);
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(select(&[], 3).is_empty());
}

#[test]
fn zero_count_gives_empty_output() {
    let slots = slots_with_hours(&[9, 10, 11]);
    assert!(select(&slots, 0).is_empty());
}

#[test]
fn count_one_is_earliest() {
    let slots = fifty_slots();
    assert_eq!(select(&slots, 1), vec![slots[0].clone()]);
}

#[test]
fn count_two_is_earliest_and_latest() {
    let slots = fifty_slots();
    assert_eq!(select(&slots, 2), vec![slots[0].clone(), slots[49].clone()]);
}

// ── Three slots ─────────────────────────────────────────────────────────────

#[test]
fn fifty_slots_pick_first_distinct_middle_and_last() {
    let slots = fifty_slots();
    let picked = select(&slots, 3);

    assert_eq!(picked.len(), 3);
    assert_eq!(picked[0], slots[0]);
    assert_eq!(picked[2], slots[49]);
    assert_ne!(picked[1].hour_of_day, slots[0].hour_of_day);
    assert_ne!(picked[1].hour_of_day, slots[49].hour_of_day);
    // Index 25 (day 2, 11:30) already has a distinct hour.
    assert_eq!(picked[1], slots[25]);
    assert!(picked[0].start < picked[1].start && picked[1].start < picked[2].start);
}

#[test]
fn middle_search_moves_outward_from_midpoint() {
    // mid = 3 shares hour 9 with the first slot; so do 2 and 4; 5 is the
    // first index at offset 2 and has a fresh hour.
    let slots = slots_with_hours(&[9, 10, 9, 9, 9, 12, 10]);
    assert_eq!(select(&slots, 3)[1], slots[5]);
}

#[test]
fn middle_search_tries_later_index_first() {
    // Both index 2 and index 4 are acceptable at offset 1; 4 wins.
    let slots = slots_with_hours(&[9, 9, 11, 9, 12, 9, 10]);
    assert_eq!(select(&slots, 3)[1], slots[4]);
}

#[test]
fn middle_falls_back_to_midpoint_when_hours_all_collide() {
    let slots = slots_with_hours(&[9, 9, 9, 9, 9, 9]);
    let picked = select(&slots, 3);
    assert_eq!(picked, vec![slots[0].clone(), slots[3].clone(), slots[5].clone()]);
}

#[test]
fn middle_never_collides_with_first_or_last_hour_when_avoidable() {
    // Only index 1 has a third hour.
    let slots = slots_with_hours(&[9, 14, 9, 10, 9, 10, 10]);
    let picked = select(&slots, 3);
    assert_eq!(picked[1], slots[1]);
}

#[test]
fn four_slots_choose_middle_of_even_list() {
    let slots = slots_with_hours(&[9, 10, 11, 12]);
    let picked = select(&slots, 3);
    assert_eq!(picked[1], slots[2]);
}

// ── Larger counts ───────────────────────────────────────────────────────────

#[test]
fn five_slots_are_evenly_spread_with_distinct_hours() {
    let slots = fifty_slots();
    let picked = select(&slots, 5);

    let expected: Vec<CandidateSlot> = [0, 12, 25, 37, 49]
        .iter()
        .map(|&i| slots[i].clone())
        .collect();
    assert_eq!(picked, expected);

    let hours: Vec<u32> = picked.iter().map(|s| s.hour_of_day).collect();
    assert_eq!(hours, vec![9, 10, 11, 12, 13]);
}

#[test]
fn large_count_stays_strictly_increasing() {
    let slots = slots_with_hours(&[9, 9, 9, 9, 9, 9, 9, 9, 9, 9]);
    let picked = select(&slots, 9);

    assert_eq!(picked.len(), 9);
    assert_eq!(picked[0], slots[0]);
    assert_eq!(picked[8], slots[9]);
    for pair in picked.windows(2) {
        assert!(pair[0].start < pair[1].start);
    }
}

// ── Strategies ──────────────────────────────────────────────────────────────

#[test]
fn earliest_strategy_takes_prefix() {
    let slots = fifty_slots();
    let picked = EarliestSelection.select(&slots, 3);
    assert_eq!(picked, slots[..3].to_vec());
}

#[test]
fn strategies_usable_as_trait_objects() {
    let slots = fifty_slots();
    let strategies: Vec<Box<dyn SelectionStrategy>> =
        vec![Box::new(DiverseSelection), Box::new(EarliestSelection)];

    for strategy in &strategies {
        let picked = strategy.select(&slots, 3);
        assert_eq!(picked.len(), 3);
        assert_eq!(picked[0], slots[0]);
    }
}
