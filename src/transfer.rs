//
// Copyright (c) 2025 Nathan Fiedler
//

//! Bulk movement of elements between a cyclic array and the outside world, or
//! within the cyclic array itself.
//!
//! Every logical range is cut into at most three physically contiguous runs
//! (see [`Layout::runs`]) and each run is handed to a callback as a plain
//! slice, together with its position relative to the start of the range. The
//! callback decides what "copying" means: cloning into a flat slice, extending
//! a `Vec`, comparing against a needle, evaluating a predicate, and so on.
//!
//! The validation policy `B` selects between the checked and unchecked
//! flavors; a checked call validates every run before the first callback.

use crate::error::Bounds;
use crate::layout::{Layout, Order, Run, Runs, wrap};

/// Visit the runs holding the logical range `offset..offset + len`.
pub fn read<B, S, F>(
    buf: &[S],
    layout: Layout,
    offset: usize,
    len: usize,
    order: Order,
    mut f: F,
) -> Result<(), B::Error>
where
    B: Bounds,
    F: FnMut(&[S], usize),
{
    let runs = layout.checked_runs::<B>(buf.len(), offset, len)?;
    for run in runs.ordered(order) {
        f(&buf[run.range()], run.offset);
    }
    Ok(())
}

/// Visit, mutably, the runs holding the logical range `offset..offset + len`.
pub fn write<B, S, F>(
    buf: &mut [S],
    layout: Layout,
    offset: usize,
    len: usize,
    order: Order,
    mut f: F,
) -> Result<(), B::Error>
where
    B: Bounds,
    F: FnMut(&mut [S], usize),
{
    let runs = layout.checked_runs::<B>(buf.len(), offset, len)?;
    for run in runs.ordered(order) {
        f(&mut buf[run.range()], run.offset);
    }
    Ok(())
}

/// Visit the runs of a range in logical order until the callback reports
/// having handled fewer elements than it was given.
///
/// Returns the total number of elements the callback reported, which equals
/// `len` if no run came up short.
pub fn read_limited<B, S, F>(
    buf: &[S],
    layout: Layout,
    offset: usize,
    len: usize,
    mut f: F,
) -> Result<usize, B::Error>
where
    B: Bounds,
    F: FnMut(&[S], usize) -> usize,
{
    let runs = layout.checked_runs::<B>(buf.len(), offset, len)?;
    Ok(limited(&runs, |run| f(&buf[run.range()], run.offset)))
}

/// Mutable counterpart of [`read_limited`].
pub fn write_limited<B, S, F>(
    buf: &mut [S],
    layout: Layout,
    offset: usize,
    len: usize,
    mut f: F,
) -> Result<usize, B::Error>
where
    B: Bounds,
    F: FnMut(&mut [S], usize) -> usize,
{
    let runs = layout.checked_runs::<B>(buf.len(), offset, len)?;
    Ok(limited(&runs, |run| f(&mut buf[run.range()], run.offset)))
}

fn limited(runs: &Runs, mut f: impl FnMut(&Run) -> usize) -> usize {
    let mut total = 0;
    for run in runs.as_slice() {
        let done = f(run);
        total += done;
        if done < run.len {
            break;
        }
    }
    total
}

/// Clone the logical range starting at `offset` into `dst`, filling it.
pub fn copy_to_slice<B, S>(
    buf: &[S],
    layout: Layout,
    offset: usize,
    dst: &mut [S],
) -> Result<(), B::Error>
where
    B: Bounds,
    S: Clone,
{
    read::<B, _, _>(buf, layout, offset, dst.len(), Order::Forward, |run, at| {
        dst[at..at + run.len()].clone_from_slice(run)
    })
}

/// Overwrite the logical range starting at `offset` with clones of `src`.
pub fn copy_from_slice<B, S>(
    buf: &mut [S],
    layout: Layout,
    offset: usize,
    src: &[S],
) -> Result<(), B::Error>
where
    B: Bounds,
    S: Clone,
{
    write::<B, _, _>(buf, layout, offset, src.len(), Order::Forward, |run, at| {
        run.clone_from_slice(&src[at..at + run.len()])
    })
}

/// Append clones of the logical range `offset..offset + len` to `dst`.
pub fn extend_vec<B, S>(
    buf: &[S],
    layout: Layout,
    offset: usize,
    len: usize,
    dst: &mut Vec<S>,
) -> Result<(), B::Error>
where
    B: Bounds,
    S: Clone,
{
    let runs = layout.checked_runs::<B>(buf.len(), offset, len)?;
    dst.reserve(len);
    for run in runs.as_slice() {
        dst.extend_from_slice(&buf[run.range()]);
    }
    Ok(())
}

/// A physically contiguous piece shared by aligned ranges of two cyclic
/// arrays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pair {
    /// first slot in the source array
    pub source: usize,
    /// first slot in the target array
    pub target: usize,
    /// number of slots
    pub len: usize,
    /// position relative to the start of the ranges
    pub offset: usize,
}

/// Up to five pairs, which is what two sets of three runs can produce.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pairs {
    pairs: [Pair; 5],
    count: usize,
}

impl Pairs {
    /// Cut two equally long sets of runs at the union of their boundaries.
    pub fn zip(source: &Runs, target: &Runs) -> Self {
        let mut pairs = Pairs::default();
        let (a, b) = (source.as_slice(), target.as_slice());
        let (mut i, mut j) = (0, 0);
        let (mut used_a, mut used_b) = (0, 0);
        let mut offset = 0;
        while i < a.len() && j < b.len() {
            let len = (a[i].len - used_a).min(b[j].len - used_b);
            pairs.pairs[pairs.count] = Pair {
                source: a[i].start + used_a,
                target: b[j].start + used_b,
                len,
                offset,
            };
            pairs.count += 1;
            offset += len;
            used_a += len;
            used_b += len;
            if used_a == a[i].len {
                i += 1;
                used_a = 0;
            }
            if used_b == b[j].len {
                j += 1;
                used_b = 0;
            }
        }
        pairs
    }

    /// The pairs in logical order.
    pub fn as_slice(&self) -> &[Pair] {
        &self.pairs[..self.count]
    }
}

/// Visit aligned runs of two cyclic arrays: `len` elements starting at
/// `source_offset` in the source and at `target_offset` in the target.
#[allow(clippy::too_many_arguments)]
pub fn intersect<B, A, D, F>(
    source: &[A],
    source_layout: Layout,
    source_offset: usize,
    target: &mut [D],
    target_layout: Layout,
    target_offset: usize,
    len: usize,
    order: Order,
    mut f: F,
) -> Result<(), B::Error>
where
    B: Bounds,
    F: FnMut(&[A], &mut [D], usize),
{
    let a = source_layout.checked_runs::<B>(source.len(), source_offset, len)?;
    let b = target_layout.checked_runs::<B>(target.len(), target_offset, len)?;
    let pairs = Pairs::zip(&a, &b);
    let pairs = pairs.as_slice();
    let count = pairs.len();
    for k in 0..count {
        let pair = match order {
            Order::Forward => pairs[k],
            Order::Backward => pairs[count - 1 - k],
        };
        f(
            &source[pair.source..pair.source + pair.len],
            &mut target[pair.target..pair.target + pair.len],
            pair.offset,
        );
    }
    Ok(())
}

/// Visit aligned runs of two cyclic arrays in logical order until the
/// callback reports fewer elements than it was given; returns the total.
///
/// Structural equality is the canonical use: the callback counts the matching
/// prefix of each pair of runs.
#[allow(clippy::too_many_arguments)]
pub fn intersect_limited<B, A, D, F>(
    left: &[A],
    left_layout: Layout,
    left_offset: usize,
    right: &[D],
    right_layout: Layout,
    right_offset: usize,
    len: usize,
    mut f: F,
) -> Result<usize, B::Error>
where
    B: Bounds,
    F: FnMut(&[A], &[D], usize) -> usize,
{
    let a = left_layout.checked_runs::<B>(left.len(), left_offset, len)?;
    let b = right_layout.checked_runs::<B>(right.len(), right_offset, len)?;
    let mut total = 0;
    for pair in Pairs::zip(&a, &b).as_slice() {
        let done = f(
            &left[pair.source..pair.source + pair.len],
            &right[pair.target..pair.target + pair.len],
            pair.offset,
        );
        total += done;
        if done < pair.len {
            break;
        }
    }
    Ok(total)
}

/// Clone `len` elements from one cyclic array into another without passing
/// through a flat intermediate.
#[allow(clippy::too_many_arguments)]
pub fn copy_between<B, S>(
    source: &[S],
    source_layout: Layout,
    source_offset: usize,
    target: &mut [S],
    target_layout: Layout,
    target_offset: usize,
    len: usize,
) -> Result<(), B::Error>
where
    B: Bounds,
    S: Clone,
{
    intersect::<B, _, _, _>(
        source,
        source_layout,
        source_offset,
        target,
        target_layout,
        target_offset,
        len,
        Order::Forward,
        |from, to, _| to.clone_from_slice(from),
    )
}

/// Move `len` elements from ring position `source` to ring position `target`
/// within one buffer.
///
/// Either range may cross the physical end of the buffer and the two may
/// overlap, provided `len` plus the travel distance does not exceed the
/// capacity. Target slots outside of the source range must not hold elements:
/// their contents are exchanged into the vacated source slots, so nothing is
/// duplicated or dropped. `order` must be `Backward` when the elements travel
/// forward around the ring and `Forward` when they travel backward.
pub fn shift<S>(buf: &mut [S], source: usize, target: usize, len: usize, order: Order) {
    let capacity = buf.len();
    if len == 0 || source == target {
        return;
    }
    let mut cuts = [len, len];
    if source + len > capacity {
        cuts[0] = capacity - source;
    }
    if target + len > capacity {
        cuts[1] = capacity - target;
    }
    if cuts[0] > cuts[1] {
        cuts.swap(0, 1);
    }
    let bounds = [0, cuts[0], cuts[1], len];
    let pieces = match order {
        Order::Forward => [0, 1, 2],
        Order::Backward => [2, 1, 0],
    };
    for k in pieces {
        let (lo, hi) = (bounds[k], bounds[k + 1]);
        if lo < hi {
            move_linear(
                buf,
                wrap(source + lo, capacity),
                wrap(target + lo, capacity),
                hi - lo,
            );
        }
    }
}

/// Move a run that crosses neither end of the buffer.
fn move_linear<S>(buf: &mut [S], source: usize, target: usize, len: usize) {
    if source < target {
        if source + len <= target {
            swap_disjoint(buf, source, target, len);
        } else {
            buf[source..target + len].rotate_right(target - source);
        }
    } else if target < source {
        if target + len <= source {
            swap_disjoint(buf, target, source, len);
        } else {
            buf[target..source + len].rotate_left(source - target);
        }
    }
}

/// Exchange two non-overlapping runs of the same buffer.
pub(crate) fn swap_disjoint<S>(buf: &mut [S], a: usize, b: usize, len: usize) {
    let (low, high) = if a < b { (a, b) } else { (b, a) };
    let (left, right) = buf.split_at_mut(high);
    left[low..low + len].swap_with_slice(&mut right[..len]);
}
