//
// Copyright (c) 2025 Nathan Fiedler
//

//! Sorting a logical range without normalizing the whole store when that
//! can be avoided.

use crate::error::{Bounds, Unchecked, infallible};
use crate::layout::{Layout, Runs};
use crate::normalize::normalize;
use crate::scratch::Scratch;
use crate::slot::Slot;
use crate::transfer::swap_disjoint;
use std::fmt;

/// How [`sort_range`] got hold of a contiguous slice to sort.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// The range already occupied a single run.
    InPlace,
    /// The range was moved into the gap, sorted there and moved back.
    Gap,
    /// The range was moved into scratch storage and back.
    Scratch,
    /// The store was normalized first, after which the range was one run.
    Relayout,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::InPlace => "in place",
            Strategy::Gap => "gap",
            Strategy::Scratch => "scratch",
            Strategy::Relayout => "relayout",
        };
        f.write_str(name)
    }
}

/// Sort the logical range `offset..offset + len` by handing a contiguous
/// slice holding exactly that range to `sorter`.
///
/// In order of preference the slice is: the range itself when it is one
/// run, a window of the gap, a cached scratch store (when that is cheaper
/// than normalizing or normalizing is not allowed), the range itself after
/// normalizing, or a fresh scratch store that is cached afterward. The
/// layout only changes when the store was normalized.
pub fn sort_range<B, S, F>(
    buf: &mut [S],
    layout: Layout,
    scratch: &mut Scratch<S>,
    offset: usize,
    len: usize,
    allow_relayout: bool,
    sorter: F,
) -> Result<(Layout, Strategy), B::Error>
where
    B: Bounds,
    S: Slot,
    F: FnOnce(&mut [S]),
{
    let runs = layout.checked_runs::<B>(buf.len(), offset, len)?;
    match runs.as_slice() {
        [] => {
            sorter(&mut []);
            return Ok((layout, Strategy::InPlace));
        }
        [run] => {
            sorter(&mut buf[run.range()]);
            return Ok((layout, Strategy::InPlace));
        }
        _ => (),
    }
    if let Some(window) = gap_window(layout, len) {
        for run in runs.as_slice() {
            swap_disjoint(buf, run.start, window + run.offset, run.len);
        }
        sorter(&mut buf[window..window + len]);
        for run in runs.as_slice() {
            swap_disjoint(buf, run.start, window + run.offset, run.len);
        }
        return Ok((layout, Strategy::Gap));
    }
    let cached = scratch.available() >= len;
    if allow_relayout && !(cached && 2 * len <= layout.size) {
        let result = infallible(normalize::<Unchecked, S>(buf, layout, scratch));
        let start = result.physical_index(offset);
        debug_assert_eq!(result.runs(offset, len).len(), 1);
        sorter(&mut buf[start..start + len]);
        return Ok((result, Strategy::Relayout));
    }
    let mut parked = scratch.take(len);
    exchange(buf, &runs, &mut parked);
    sorter(&mut parked[..len]);
    exchange(buf, &runs, &mut parked);
    scratch.restore(parked);
    Ok((layout, Strategy::Scratch))
}

/// First slot of a run of at least `len` gap slots, if there is one.
fn gap_window(layout: Layout, len: usize) -> Option<usize> {
    let start = layout.gap_start();
    let gap = layout.gap();
    let first = gap.min(layout.capacity - start);
    if first >= len {
        Some(start)
    } else if gap - first >= len {
        Some(0)
    } else {
        None
    }
}

fn exchange<S>(buf: &mut [S], runs: &Runs, parked: &mut [S]) {
    for run in runs.as_slice() {
        buf[run.range()].swap_with_slice(&mut parked[run.offset..run.offset + run.len]);
    }
}
