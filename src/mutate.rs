//
// Copyright (c) 2025 Nathan Fiedler
//

//! Opening and closing the gap at an arbitrary logical position.
//!
//! The gap always separates the head from the tail, so moving it to logical
//! position `k` means relocating the `|k - head|` elements that lie between
//! the gap and `k`. Alternatively the gap can stay put while everything else
//! travels the other way around the ring, which moves `size - |k - head|`
//! elements and changes `index`. Whichever side is shorter is the one that
//! moves; on a tie the side that leaves `index` alone wins.

use crate::error::{Bounds, Error, Unchecked, infallible};
use crate::layout::{Layout, Order, wrap, wrap_back};
use crate::slot::{self, Slot};
use crate::transfer::shift;

/// Relocate the gap so that exactly `head` elements precede it.
///
/// Returns the new layout; the logical sequence is unchanged.
pub fn move_gap<B: Bounds, S>(
    buf: &mut [S],
    layout: Layout,
    head: usize,
) -> Result<Layout, B::Error> {
    layout.check::<B>(buf.len())?;
    B::check(head <= layout.size, || Error::BoundsViolation {
        start: head,
        length: 0,
        limit: layout.size,
    })?;
    Ok(relocate(buf, layout, head))
}

fn relocate<S>(buf: &mut [S], layout: Layout, k: usize) -> Layout {
    let Layout {
        capacity: n,
        size: s,
        index: i,
        head: h,
    } = layout;
    let g = layout.gap();
    let mut result = Layout { head: k, ..layout };
    if k < h {
        let d = h - k;
        if d <= s - d {
            // the end of the head joins the front of the tail
            let src = layout.physical_index(k);
            shift(buf, src, wrap(src + g, n), d, Order::Backward);
        } else {
            // the tail and the start of the head slide back over the gap
            let src = layout.gap_end();
            shift(buf, src, layout.gap_start(), s - d, Order::Forward);
            result.index = wrap_back(i, g, n);
        }
    } else if k > h {
        let d = k - h;
        if d <= s - d {
            // the front of the tail joins the end of the head
            shift(buf, layout.gap_end(), layout.gap_start(), d, Order::Forward);
        } else {
            // the rest of the tail and the whole head slide forward
            let src = wrap_back(layout.gap_start(), s - d, n);
            shift(buf, src, wrap(src + g, n), s - d, Order::Backward);
            result.index = wrap(i + g, n);
        }
    }
    debug_assert!(result.is_valid(), "{result}");
    result
}

/// Make room for `count` elements at logical position `at`.
///
/// The size grows by `count` and the head is extended to end just after the
/// new room, whose first physical slot is returned alongside the new layout.
/// In stores of `Option` the room holds vacant slots, while value-typed
/// stores leave whatever the slots last held. Filling it is up to the
/// caller, typically with [`write`](crate::write) over `at..at + count`.
pub fn open_gap<B: Bounds, S>(
    buf: &mut [S],
    layout: Layout,
    at: usize,
    count: usize,
) -> Result<(Layout, usize), B::Error> {
    layout.check::<B>(buf.len())?;
    B::check(at <= layout.size, || Error::BoundsViolation {
        start: at,
        length: count,
        limit: layout.size,
    })?;
    B::check(count <= layout.gap(), || Error::BoundsViolation {
        start: layout.size,
        length: count,
        limit: layout.capacity,
    })?;
    let moved = relocate(buf, layout, at);
    let slot = moved.gap_start();
    let result = Layout {
        size: moved.size + count,
        head: at + count,
        ..moved
    };
    debug_assert!(result.is_valid(), "{result}");
    Ok((result, slot))
}

/// Remove the logical range `at..at + len`, vacating its slots and closing
/// the hole by moving the shorter of the two sides around it.
pub fn close_gap<B: Bounds, S: Slot>(
    buf: &mut [S],
    layout: Layout,
    at: usize,
    len: usize,
) -> Result<Layout, B::Error> {
    layout.check::<B>(buf.len())?;
    B::check(at <= layout.size && len <= layout.size - at, || {
        Error::BoundsViolation {
            start: at,
            length: len,
            limit: layout.size,
        }
    })?;
    Ok(collapse(buf, layout, at, len))
}

/// Unchecked core of [`close_gap`].
pub(crate) fn collapse<S: Slot>(buf: &mut [S], layout: Layout, at: usize, len: usize) -> Layout {
    if len == 0 {
        return layout;
    }
    infallible(slot::clear::<Unchecked, S>(buf, layout, at, len));
    let Layout {
        capacity: n,
        size: s,
        index: i,
        head: h,
    } = layout;
    let end = at + len;
    let mut result = Layout {
        size: s - len,
        ..layout
    };
    if at <= h && h <= end {
        // the removed range borders the gap, which simply absorbs it
        result.head = at;
    } else if end < h {
        let after = h - end;
        let before = s - h + at;
        if after <= before {
            let src = layout.physical_index(end);
            shift(buf, src, layout.physical_index(at), after, Order::Forward);
        } else {
            let src = layout.gap_end();
            shift(buf, src, wrap(src + len, n), before, Order::Backward);
            result.index = wrap(i + len, n);
        }
        result.head = h - len;
    } else {
        let before = at - h;
        let after = s - end + h;
        if before <= after {
            let src = layout.gap_end();
            shift(buf, src, wrap(src + len, n), before, Order::Backward);
        } else {
            let src = layout.physical_index(end);
            shift(buf, src, wrap_back(src, len, n), after, Order::Forward);
            result.index = wrap_back(i, len, n);
        }
    }
    debug_assert!(result.is_valid(), "{result}");
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Checked;
    use crate::test_utils::{build, contents, every_layout, occupied, strings};

    fn names(values: std::ops::Range<usize>) -> Vec<Option<String>> {
        values.map(|v| Some(v.to_string())).collect()
    }

    /// Every slot outside of the logical range is vacant.
    fn assert_no_strays(buf: &[Option<String>], layout: Layout) {
        assert_eq!(occupied(buf), layout.size, "{layout}");
    }

    #[test]
    fn test_mutate_move_gap_every_layout() {
        for capacity in 0..=7 {
            for layout in every_layout(capacity) {
                for k in 0..=layout.size {
                    let mut buf = strings(layout);
                    let result = infallible(move_gap::<Unchecked, _>(&mut buf, layout, k));
                    assert!(result.is_valid(), "{layout} -> {result}");
                    assert_eq!(result.head, k);
                    assert_eq!(result.size, layout.size);
                    assert_eq!(contents(&buf, result), names(0..layout.size));
                    assert_no_strays(&buf, result);
                }
            }
        }
    }

    #[test]
    fn test_mutate_move_gap_shorter_side() {
        // moving the gap one step left only touches one element
        // ```
        // +---+---+---+---+---+---+---+---+
        // | 0 | 1 | 2 | 3 | 4 |   |   | 5 |
        // +---+---+---+---+---+---+---+---+
        // ```
        let layout = Layout {
            capacity: 8,
            size: 6,
            index: 0,
            head: 5,
        };
        let mut buf = build(layout, &[0u32, 1, 2, 3, 4, 5]);
        let result = infallible(move_gap::<Unchecked, _>(&mut buf, layout, 4));
        assert_eq!(result.index, 0);
        assert_eq!(buf, vec![0, 1, 2, 3, 0, 0, 4, 5]);
        // three elements either way, so index stays put
        let result = infallible(move_gap::<Unchecked, _>(&mut buf, result, 1));
        assert_eq!(result.head, 1);
        assert_eq!(result.index, 0);
        assert_eq!(buf, vec![0, 0, 0, 1, 2, 3, 4, 5]);
        // the long way round moves the other two
        let result = infallible(move_gap::<Unchecked, _>(&mut buf, result, 5));
        assert_eq!(result.index, 2);
        assert_eq!(contents(&buf, result), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_mutate_open_gap_every_layout() {
        for capacity in 0..=7 {
            for layout in every_layout(capacity) {
                for at in 0..=layout.size {
                    for count in 0..=layout.gap() {
                        let mut buf = strings(layout);
                        let (result, slot) =
                            infallible(open_gap::<Unchecked, _>(&mut buf, layout, at, count));
                        assert!(result.is_valid(), "{layout} -> {result}");
                        assert_eq!(result.size, layout.size + count);
                        if count > 0 {
                            assert_eq!(result.physical_index(at), slot);
                        }
                        for k in 0..count {
                            let physical = result.physical_index(at + k);
                            assert!(buf[physical].is_none());
                            buf[physical] = Some(format!("new{k}"));
                        }
                        let mut expected = names(0..at);
                        expected.extend((0..count).map(|k| Some(format!("new{k}"))));
                        expected.extend(names(at..layout.size));
                        assert_eq!(contents(&buf, result), expected);
                        assert_no_strays(&buf, result);
                    }
                }
            }
        }
    }

    #[test]
    fn test_mutate_open_gap_checked() {
        let layout = Layout {
            capacity: 4,
            size: 3,
            index: 1,
            head: 1,
        };
        let mut buf = build(layout, &[1u8, 2, 3]);
        let before = buf.clone();
        assert!(open_gap::<Checked, _>(&mut buf, layout, 4, 1).is_err());
        assert_eq!(
            open_gap::<Checked, _>(&mut buf, layout, 1, 2).unwrap_err(),
            Error::BoundsViolation {
                start: 3,
                length: 2,
                limit: 4
            }
        );
        assert_eq!(buf, before);
        let (result, _) = open_gap::<Checked, _>(&mut buf, layout, 3, 1).unwrap();
        assert_eq!(result.size, 4);
    }

    #[test]
    fn test_mutate_close_gap_every_layout() {
        for capacity in 0..=7 {
            for layout in every_layout(capacity) {
                for at in 0..=layout.size {
                    for len in 0..=(layout.size - at) {
                        let mut buf = strings(layout);
                        let result =
                            infallible(close_gap::<Unchecked, _>(&mut buf, layout, at, len));
                        assert!(result.is_valid(), "{layout} -> {result}");
                        assert_eq!(result.size, layout.size - len);
                        let mut expected = names(0..at);
                        expected.extend(names(at + len..layout.size));
                        assert_eq!(contents(&buf, result), expected);
                        assert_no_strays(&buf, result);
                    }
                }
            }
        }
    }

    #[test]
    fn test_mutate_close_gap_vacates_copy_options() {
        let layout = Layout::new(4);
        let mut buf: Vec<Option<u32>> = vec![None; 4];
        let (layout, slot) = open_gap::<Checked, _>(&mut buf, layout, 0, 1).unwrap();
        buf[slot] = Some(7);
        let layout = close_gap::<Checked, _>(&mut buf, layout, 0, 1).unwrap();
        assert_eq!(layout.size, 0);
        assert_eq!(occupied(&buf), 0);
        let (layout, slot) = open_gap::<Checked, _>(&mut buf, layout, 0, 1).unwrap();
        assert_eq!(layout.size, 1);
        assert_eq!(buf[slot], None);

        for capacity in 1..=7 {
            for layout in every_layout(capacity) {
                for at in 0..=layout.size {
                    for len in 0..=(layout.size - at) {
                        let values: Vec<Option<u32>> = (0..layout.size as u32).map(Some).collect();
                        let mut buf = build(layout, &values);
                        let result =
                            infallible(close_gap::<Unchecked, _>(&mut buf, layout, at, len));
                        assert_eq!(occupied(&buf), result.size, "{layout} close {at}+{len}");
                    }
                }
            }
        }
    }

    #[test]
    fn test_mutate_close_gap_straddling_moves_nothing() {
        // ```
        //   0   1   2   3   4   5   6   7   8   9  10  11  12  13  14  15
        // +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
        // |   |   |   |   | 4 | 5 | 6 | 7 | 8 | 9 | 0 | 1 | 2 | 3 |   |   |
        // +---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+---+
        // ```
        let layout = Layout {
            capacity: 16,
            size: 10,
            index: 10,
            head: 4,
        };
        let mut buf = build(layout, &[10u32, 11, 12, 13, 14, 15, 16, 17, 18, 19]);
        let result = infallible(close_gap::<Unchecked, _>(&mut buf, layout, 2, 4));
        assert_eq!(
            result,
            Layout {
                capacity: 16,
                size: 6,
                index: 10,
                head: 2
            }
        );
        assert_eq!(contents(&buf, result), vec![10, 11, 16, 17, 18, 19]);
    }

    #[test]
    fn test_mutate_close_gap_checked() {
        let layout = Layout {
            capacity: 4,
            size: 3,
            index: 0,
            head: 3,
        };
        let mut buf = strings(layout);
        assert_eq!(
            close_gap::<Checked, _>(&mut buf, layout, 2, 2).unwrap_err(),
            Error::BoundsViolation {
                start: 2,
                length: 2,
                limit: 3
            }
        );
        assert_eq!(occupied(&buf), 3);
        let corrupt = Layout { index: 9, ..layout };
        assert!(close_gap::<Checked, _>(&mut buf, corrupt, 0, 1).is_err());
        assert_eq!(occupied(&buf), 3);
    }

    #[test]
    fn test_mutate_random_operations() {
        let mut layout = Layout::new(32);
        let mut buf: Vec<Option<String>> = vec![None; 32];
        let mut model: Vec<String> = vec![];
        for _ in 0..2000 {
            let grow = model.is_empty() || (model.len() < 32 && rand::random_bool(0.55));
            if grow {
                let at = rand::random_range(0..=model.len());
                let value = ulid::Ulid::new().to_string();
                let (result, slot) =
                    infallible(open_gap::<Unchecked, _>(&mut buf, layout, at, 1));
                buf[slot] = Some(value.clone());
                model.insert(at, value);
                layout = result;
            } else {
                let at = rand::random_range(0..model.len());
                let len = rand::random_range(1..=(model.len() - at).min(4));
                layout = infallible(close_gap::<Unchecked, _>(&mut buf, layout, at, len));
                model.drain(at..at + len);
            }
            assert!(layout.is_valid());
            let actual: Vec<String> = contents(&buf, layout).into_iter().flatten().collect();
            assert_eq!(actual, model);
            assert_eq!(occupied(&buf), model.len());
        }
    }
}
