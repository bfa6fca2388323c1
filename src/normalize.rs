//
// Copyright (c) 2025 Nathan Fiedler
//

//! Removing wraparound so that every element sits in one contiguous run.
//!
//! The gap is first moved to the front, leaving one block of `size`
//! elements. If that block crosses the physical end it consists of a part
//! `A` at the end of the store and a part `B` at the start, separated by the
//! gap. When the gap is at least as long as either part the whole block can
//! slide over it. Otherwise the shorter part is parked in scratch storage
//! while the other one moves.

use crate::error::Bounds;
use crate::layout::{Layout, Order, wrap};
use crate::mutate::move_gap;
use crate::scratch::Scratch;
use crate::slot::Slot;
use crate::transfer::shift;

/// Rearrange the store so that the head is empty and the elements occupy
/// one run of slots that does not cross the physical end.
///
/// Normalizing a normalized layout changes nothing. Scratch storage is
/// borrowed only when the gap is shorter than both parts of the wrapped
/// block, and then only for the shorter part.
pub fn normalize<B: Bounds, S: Slot>(
    buf: &mut [S],
    layout: Layout,
    scratch: &mut Scratch<S>,
) -> Result<Layout, B::Error> {
    layout.check::<B>(buf.len())?;
    if layout.size == 0 {
        return Ok(Layout::new(layout.capacity));
    }
    let layout = move_gap::<B, S>(buf, layout, 0)?;
    let n = layout.capacity;
    let s = layout.size;
    let g = layout.gap();
    let start = layout.gap_end();
    if start + s <= n {
        return Ok(layout);
    }
    // A: logical 0..x at start..n, B: logical x..s at 0..y
    let x = n - start;
    let y = s - x;
    let index = if y <= g {
        shift(buf, start, start - y, s, Order::Forward);
        0
    } else if x <= g {
        shift(buf, start, 0, s, Order::Backward);
        wrap(s, n)
    } else if y <= x {
        let mut parked = scratch.take(y);
        buf[..y].swap_with_slice(&mut parked[..y]);
        shift(buf, start, 0, x, Order::Forward);
        buf[x..s].swap_with_slice(&mut parked[..y]);
        scratch.restore(parked);
        wrap(s, n)
    } else {
        let mut parked = scratch.take(x);
        buf[start..n].swap_with_slice(&mut parked[..x]);
        shift(buf, 0, x, y, Order::Backward);
        buf[..x].swap_with_slice(&mut parked[..x]);
        scratch.restore(parked);
        wrap(s, n)
    };
    let result = Layout { index, ..layout };
    debug_assert!(result.is_normalized(), "{result}");
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Checked, Unchecked, infallible};
    use crate::test_utils::{build, contents, every_layout, occupied, strings};

    #[test]
    fn test_normalize_every_layout() {
        for capacity in 0..=8 {
            for layout in every_layout(capacity) {
                let mut scratch = Scratch::new();
                let mut buf = strings(layout);
                let expected = contents(&buf, layout);
                let result = infallible(normalize::<Unchecked, _>(&mut buf, layout, &mut scratch));
                assert!(result.is_normalized(), "{layout} -> {result}");
                assert_eq!(contents(&buf, result), expected);
                assert_eq!(occupied(&buf), layout.size);
                // idempotent
                let again = infallible(normalize::<Unchecked, _>(&mut buf, result, &mut scratch));
                assert_eq!(again, result);
                assert_eq!(contents(&buf, again), expected);
            }
        }
    }

    #[test]
    fn test_normalize_slides_over_gap() {
        // ```
        // +---+---+---+---+---+---+---+---+
        // | 4 |   |   |   | 0 | 1 | 2 | 3 |
        // +---+---+---+---+---+---+---+---+
        // ```
        let layout = Layout {
            capacity: 8,
            size: 5,
            index: 1,
            head: 0,
        };
        let mut buf = build(layout, &[10u32, 11, 12, 13, 14]);
        let mut scratch = Scratch::new();
        let result = infallible(normalize::<Unchecked, _>(&mut buf, layout, &mut scratch));
        assert_eq!(result.index, 0);
        assert_eq!(&buf[3..], &[10, 11, 12, 13, 14]);
        assert_eq!(scratch.available(), 0);
    }

    #[test]
    fn test_normalize_borrows_minimal_scratch() {
        // ```
        // +---+---+---+---+---+---+---+---+
        // | 4 | 5 | 6 |   | 0 | 1 | 2 | 3 |
        // +---+---+---+---+---+---+---+---+
        // ```
        let layout = Layout {
            capacity: 8,
            size: 7,
            index: 3,
            head: 0,
        };
        let mut buf = strings(layout);
        let mut scratch = Scratch::new();
        let result = infallible(normalize::<Unchecked, _>(&mut buf, layout, &mut scratch));
        assert_eq!(
            result,
            Layout {
                capacity: 8,
                size: 7,
                index: 7,
                head: 0
            }
        );
        let slots: Vec<Option<&str>> = buf.iter().map(|s| s.as_deref()).collect();
        assert_eq!(
            slots,
            vec![
                Some("0"),
                Some("1"),
                Some("2"),
                Some("3"),
                Some("4"),
                Some("5"),
                Some("6"),
                None
            ]
        );
        // only the three elements at the front were parked
        assert_eq!(scratch.available(), 3);
    }

    #[test]
    fn test_normalize_full_store() {
        let layout = Layout {
            capacity: 5,
            size: 5,
            index: 3,
            head: 2,
        };
        let mut buf = strings(layout);
        let mut scratch = Scratch::new();
        let result = infallible(normalize::<Unchecked, _>(&mut buf, layout, &mut scratch));
        assert_eq!(result.index, 0);
        let slots: Vec<Option<&str>> = buf.iter().map(|s| s.as_deref()).collect();
        assert_eq!(
            slots,
            vec![Some("0"), Some("1"), Some("2"), Some("3"), Some("4")]
        );
    }

    #[test]
    fn test_normalize_checked_corrupt() {
        let layout = Layout {
            capacity: 8,
            size: 9,
            index: 3,
            head: 0,
        };
        let mut buf: Vec<Option<String>> = vec![None; 8];
        let mut scratch = Scratch::new();
        assert!(normalize::<Checked, _>(&mut buf, layout, &mut scratch).is_err());
    }
}
