//! Index arithmetic on the circle of carousel slots.

use alloc::collections::VecDeque;
use alloc::vec::Vec;

use crate::SelectorError;

/// Re-anchors `item` relative to `current`: the slot `item` occupies when `current` is in
/// front. Always in `[0, total)`; `current` itself maps to 0.
///
/// Returns 0 when `total == 0`.
pub fn index_to_position(current: usize, item: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let offset = item as i128 - current as i128;
    offset.rem_euclid(total as i128) as usize
}

/// Wraps a continuous position into `[0, total)`.
pub fn wrap_position(position: f64, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let wrapped = position.rem_euclid(total as f64);
    // rem_euclid can round up to `total` for tiny negative inputs.
    if wrapped >= total as f64 { 0.0 } else { wrapped }
}

/// Signed hop count from `from` to `to`, never more than half the circle in magnitude.
///
/// An exactly opposite target resolves to the positive (rightward) direction.
pub fn shortest_distance(from: usize, to: usize, total: usize) -> isize {
    let d = index_to_position(from, to, total);
    if 2 * d > total {
        d as isize - total as isize
    } else {
        d as isize
    }
}

/// Validates a host-supplied index value: it must be a whole number in `[0, total)`.
pub fn checked_index(value: f64, total: usize) -> Result<usize, SelectorError> {
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(SelectorError::NonIntegerIndex(value));
    }
    if value < 0.0 {
        return Err(SelectorError::NegativeIndex(value));
    }
    if value >= total as f64 {
        return Err(SelectorError::IndexOutOfRange {
            index: value as usize,
            count: total,
        });
    }
    Ok(value as usize)
}

/// A lazy walk around a slice starting at an arbitrary offset.
///
/// When bounded, the walk stops after one full lap (`items.len()` draws). Unbounded walks
/// never end unless the slice is empty. Cloning the iterator restarts from the clone point.
#[derive(Clone, Debug)]
pub struct Circular<'a, T> {
    items: &'a [T],
    next: usize,
    remaining: Option<usize>,
}

/// Wraps `items` in a [`Circular`] walk starting at `start` (taken modulo the length).
pub fn circularize<T>(items: &[T], start: usize, bounded: bool) -> Circular<'_, T> {
    let next = if items.is_empty() {
        0
    } else {
        start % items.len()
    };
    Circular {
        items,
        next,
        remaining: bounded.then_some(items.len()),
    }
}

impl<'a, T> Iterator for Circular<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.items.is_empty() {
            return None;
        }
        if let Some(remaining) = self.remaining.as_mut() {
            if *remaining == 0 {
                return None;
            }
            *remaining -= 1;
        }
        let item = &self.items[self.next];
        self.next = (self.next + 1) % self.items.len();
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match (self.items.is_empty(), self.remaining) {
            (true, _) => (0, Some(0)),
            (false, Some(n)) => (n, Some(n)),
            (false, None) => (usize::MAX, None),
        }
    }
}

/// Produces draw order for a carousel whose front item is `items[current]`.
///
/// Walking the circle from `current`: the front item, then `right_count` items on the right
/// arm, then the hidden arc, then `left_count` items on the left arm (gathered outward-to-inward
/// and flipped so both sides run nearest-first). The sides are interleaved right, left, right,
/// left..., any leftover appended, and the hidden items follow. The whole sequence is then
/// reversed: farthest items are drawn first and the front item is drawn last, on top.
pub fn collate<T>(items: &[T], current: usize, right_count: usize, left_count: usize) -> Vec<&T> {
    let mut walk = circularize(items, current, true);
    let Some(front) = walk.next() else {
        return Vec::new();
    };

    let hidden_count = items.len().saturating_sub(1 + right_count + left_count);
    let mut right: VecDeque<&T> = walk.by_ref().take(right_count).collect();
    let hidden: Vec<&T> = walk.by_ref().take(hidden_count).collect();
    let mut left: VecDeque<&T> = walk.by_ref().take(left_count).collect();
    left.make_contiguous().reverse();

    let mut out = Vec::with_capacity(items.len());
    out.push(front);
    while !left.is_empty() && !right.is_empty() {
        out.extend(right.pop_front());
        out.extend(left.pop_front());
    }
    out.extend(right);
    out.extend(left);
    out.extend(hidden);

    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_to_position_stays_in_range() {
        for total in 1..9usize {
            for current in 0..total {
                assert_eq!(index_to_position(current, current, total), 0);
                for item in 0..total {
                    assert!(index_to_position(current, item, total) < total);
                }
            }
        }
        assert_eq!(index_to_position(3, 1, 5), 3);
        assert_eq!(index_to_position(1, 3, 5), 2);
    }

    #[test]
    fn shortest_distance_prefers_rightward_on_ties() {
        assert_eq!(shortest_distance(0, 1, 5), 1);
        assert_eq!(shortest_distance(0, 4, 5), -1);
        assert_eq!(shortest_distance(0, 2, 4), 2);
        assert_eq!(shortest_distance(3, 1, 4), 2);
        assert_eq!(shortest_distance(2, 2, 4), 0);
        assert_eq!(shortest_distance(1, 4, 6), 3);
        assert_eq!(shortest_distance(4, 1, 6), 3);
    }

    #[test]
    fn checked_index_rejects_fractions_and_out_of_range() {
        assert_eq!(checked_index(2.0, 4), Ok(2));
        assert_eq!(
            checked_index(4.0, 4),
            Err(SelectorError::IndexOutOfRange { index: 4, count: 4 })
        );
        assert_eq!(checked_index(1.5, 4), Err(SelectorError::NonIntegerIndex(1.5)));
        assert_eq!(checked_index(-1.0, 4), Err(SelectorError::NegativeIndex(-1.0)));
        assert!(checked_index(f64::NAN, 4).is_err());
    }

    #[test]
    fn circularize_wraps_and_stops_when_bounded() {
        let xs = [10, 11, 12, 13];
        let walked: Vec<_> = circularize(&xs, 2, true).copied().collect();
        assert_eq!(walked, vec![12, 13, 10, 11]);

        let endless: Vec<_> = circularize(&xs, 5, false).take(6).copied().collect();
        assert_eq!(endless, vec![11, 12, 13, 10, 11, 12]);

        let empty: [u8; 0] = [];
        assert_eq!(circularize(&empty, 3, false).next(), None);
    }

    #[test]
    fn wrap_position_folds_negative_positions() {
        assert_eq!(wrap_position(-0.25, 4), 3.75);
        assert_eq!(wrap_position(4.5, 4), 0.5);
        assert_eq!(wrap_position(4.0, 4), 0.0);
    }

    #[test]
    fn collate_draws_front_last_and_hidden_first() {
        let xs = [0, 1, 2, 3, 4, 5, 6];
        let order: Vec<_> = collate(&xs, 0, 2, 2).into_iter().copied().collect();
        assert_eq!(order, vec![4, 3, 5, 2, 6, 1, 0]);

        let order: Vec<_> = collate(&xs[..5], 0, 2, 2).into_iter().copied().collect();
        assert_eq!(order, vec![3, 2, 4, 1, 0]);

        // Right arm one longer than the left: the leftover goes after the interleave.
        let order: Vec<_> = collate(&xs[..4], 1, 2, 1).into_iter().copied().collect();
        assert_eq!(order, vec![3, 0, 2, 1]);

        let empty: [u8; 0] = [];
        assert!(collate(&empty, 0, 1, 1).is_empty());
    }
}
