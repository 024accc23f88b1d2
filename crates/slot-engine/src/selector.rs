//! Diversity selection -- pick a few slots that span the horizon.
//!
//! Offering three slots minutes apart, or three slots all at 09:00, reads like
//! a scheduling bug. [`DiverseSelection`] always keeps the earliest and latest
//! slot and fills the interior from evenly spaced positions, preferring slots
//! whose hour-of-day has not been used yet.

use std::collections::HashSet;

use crate::scanner::CandidateSlot;

/// A rule for choosing `count` slots out of an ordered free-slot list.
///
/// Implementations must return slots in chronological order and must return
/// the input unchanged when it has `count` or fewer entries.
pub trait SelectionStrategy {
    fn select(&self, slots: &[CandidateSlot], count: usize) -> Vec<CandidateSlot>;
}

/// Earliest, evenly spaced middles with distinct hours, latest.
///
/// For `count == 3` the middle slot is searched outward from index `len / 2`
/// (`mid, mid+1, mid-1, mid+2, ...`) for an hour differing from both ends,
/// falling back to the midpoint itself. Larger counts apply the same search
/// around each target index `k * len / (count - 1)`, restricted so the output
/// stays strictly increasing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiverseSelection;

/// The first `count` slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EarliestSelection;

impl SelectionStrategy for DiverseSelection {
    fn select(&self, slots: &[CandidateSlot], count: usize) -> Vec<CandidateSlot> {
        if slots.len() <= count {
            return slots.to_vec();
        }
        if count == 0 {
            return Vec::new();
        }

        let len = slots.len();
        let last = len - 1;
        if count == 1 {
            return vec![slots[0].clone()];
        }

        let mut used_hours: HashSet<u32> =
            HashSet::from([slots[0].hour_of_day, slots[last].hour_of_day]);
        let mut picked = Vec::with_capacity(count);
        picked.push(0);

        let interior = count - 2;
        for k in 1..=interior {
            let prev = picked[picked.len() - 1];
            // Leave room for the remaining interior picks before `last`.
            let lo = prev + 1;
            let hi = last - 1 - (interior - k);
            let target = (k * len / (count - 1)).clamp(lo, hi);

            let index = search_outward(target, lo, hi, |i| {
                !used_hours.contains(&slots[i].hour_of_day)
            })
            .unwrap_or(target);
            used_hours.insert(slots[index].hour_of_day);
            picked.push(index);
        }

        picked.push(last);
        picked.into_iter().map(|i| slots[i].clone()).collect()
    }
}

impl SelectionStrategy for EarliestSelection {
    fn select(&self, slots: &[CandidateSlot], count: usize) -> Vec<CandidateSlot> {
        slots.iter().take(count).cloned().collect()
    }
}

/// Select with [`DiverseSelection`].
pub fn select(slots: &[CandidateSlot], count: usize) -> Vec<CandidateSlot> {
    DiverseSelection.select(slots, count)
}

/// First index in `target, target+1, target-1, target+2, ...` within
/// `[lo, hi]` satisfying `accept`.
fn search_outward(
    target: usize,
    lo: usize,
    hi: usize,
    accept: impl Fn(usize) -> bool,
) -> Option<usize> {
    let mut offset = 0;
    loop {
        let above = target.checked_add(offset).filter(|&i| i <= hi);
        let below = target.checked_sub(offset).filter(|&i| i >= lo);
        if above.is_none() && below.is_none() {
            return None;
        }
        if let Some(i) = above.filter(|&i| accept(i)) {
            return Some(i);
        }
        if let Some(i) = below.filter(|&i| accept(i)) {
            return Some(i);
        }
        offset += 1;
    }
}
