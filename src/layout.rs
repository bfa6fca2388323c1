//
// Copyright (c) 2025 Nathan Fiedler
//

//! The layout tuple of a cyclic array and the arithmetic that maps logical
//! positions onto physical slots.
//!
//! Going around the ring from `index`, the slots hold the head (logical
//! elements `0..head`), then the gap (unused capacity), then the tail (logical
//! elements `head..size`), which ends exactly where the head begins. Exactly
//! one of the three regions may cross the physical end of the array.
//!
//! ```text
//!            index
//!              v
//! +---+---+---+---+---+---+---+---+
//! |   | 5 | 6 | 0 | 1 | 2 | 3 | 4 |    head: 0..5, gap: 1 slot, tail: 5..7
//! +---+---+---+---+---+---+---+---+
//! ```

use crate::error::{Bounds, Error, MAX_CAPACITY};
use std::fmt;
use std::ops::Range;

/// Physical state of a cyclic array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Layout {
    /// number of slots in the backing store
    pub capacity: usize,
    /// number of logical elements
    pub size: usize,
    /// physical slot of logical element 0
    pub index: usize,
    /// number of elements before the gap
    pub head: usize,
}

/// Which region of the ring crosses the physical end of the array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// `index + head >= capacity`
    HeadWraps,
    /// `size <= index + head < capacity`
    GapWraps,
    /// `index + head < size`
    TailWraps,
}

/// Order in which the runs of a range are visited.
///
/// Backward order matters when elements shift toward higher slots within the
/// same buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Order {
    #[default]
    Forward,
    Backward,
}

/// Reduce a value below `2 * capacity` into `[0, capacity)`.
#[inline]
pub(crate) fn wrap(value: usize, capacity: usize) -> usize {
    if value >= capacity {
        value - capacity
    } else {
        value
    }
}

/// Step `distance` slots backward from `slot` around a ring of `capacity`.
#[inline]
pub(crate) fn wrap_back(slot: usize, distance: usize, capacity: usize) -> usize {
    if slot >= distance {
        slot - distance
    } else {
        slot + capacity - distance
    }
}

impl Layout {
    /// Layout of an empty array with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            size: 0,
            index: 0,
            head: 0,
        }
    }

    /// Number of elements after the gap.
    #[inline]
    pub fn tail(&self) -> usize {
        self.size - self.head
    }

    /// Number of unused slots.
    #[inline]
    pub fn gap(&self) -> usize {
        self.capacity - self.size
    }

    /// Unwrapped position of the first gap slot, possibly past the capacity.
    #[inline]
    pub fn gap_offset(&self) -> usize {
        self.index + self.head
    }

    /// Classify which region crosses the physical boundary.
    pub fn shape(&self) -> Shape {
        let gap_offset = self.gap_offset();
        if gap_offset >= self.capacity {
            Shape::HeadWraps
        } else if gap_offset >= self.size {
            Shape::GapWraps
        } else {
            Shape::TailWraps
        }
    }

    /// Returns true if the tuple satisfies the structural invariants.
    pub fn is_valid(&self) -> bool {
        self.capacity <= MAX_CAPACITY
            && self.size <= self.capacity
            && self.head <= self.size
            && (self.index < self.capacity || (self.capacity == 0 && self.index == 0))
    }

    /// Map a logical position to its physical slot.
    ///
    /// No bounds checking is performed; the caller guarantees that
    /// `logical < size` (or `logical == size` to find the slot following the
    /// last element, which is only meaningful when the gap is empty).
    #[inline]
    pub fn physical_index(&self, logical: usize) -> usize {
        let slot = self.index + logical;
        let base = if logical < self.head {
            self.capacity
        } else {
            self.size
        };
        if slot >= base {
            slot - base
        } else {
            slot + self.capacity - base
        }
    }

    /// Physical slot where the gap begins.
    #[inline]
    pub fn gap_start(&self) -> usize {
        wrap(self.index + self.head, self.capacity)
    }

    /// Physical slot immediately after the gap, where the tail (or, if the
    /// tail is empty, the head) begins.
    #[inline]
    pub fn gap_end(&self) -> usize {
        wrap(self.gap_start() + self.gap(), self.capacity)
    }

    /// Returns true if the head is empty and the elements occupy one run of
    /// slots that does not cross the physical end of the array.
    pub fn is_normalized(&self) -> bool {
        self.head == 0 && self.gap_end() + self.size <= self.capacity
    }

    /// Split the logical range `offset..offset + len` into physically
    /// contiguous runs, in logical order.
    ///
    /// The range is cut where it crosses from head to tail and where a region
    /// crosses the physical end, which yields at most three runs. No bounds
    /// checking is performed.
    pub fn runs(&self, offset: usize, len: usize) -> Runs {
        let mut runs = Runs::default();
        let end = offset + len;
        if offset < self.head {
            let stop = end.min(self.head);
            runs.push_cyclic(self.physical_index(offset), stop - offset, 0, self.capacity);
        }
        if end > self.head {
            let start = offset.max(self.head);
            runs.push_cyclic(
                self.physical_index(start),
                end - start,
                start - offset,
                self.capacity,
            );
        }
        runs
    }

    /// Split a logical range into runs after validating, under policy `B`,
    /// the layout, the length of the backing store, the range, and every
    /// computed run.
    pub fn checked_runs<B: Bounds>(
        &self,
        slots: usize,
        offset: usize,
        len: usize,
    ) -> Result<Runs, B::Error> {
        self.check::<B>(slots)?;
        B::check(offset <= self.size && len <= self.size - offset, || {
            Error::BoundsViolation {
                start: offset,
                length: len,
                limit: self.size,
            }
        })?;
        let runs = self.runs(offset, len);
        for run in runs.as_slice() {
            B::check(
                run.start <= slots && run.len <= slots - run.start,
                || Error::BoundsViolation {
                    start: run.start,
                    length: run.len,
                    limit: slots,
                },
            )?;
        }
        Ok(runs)
    }

    /// Validate the tuple against a backing store of `slots` slots.
    pub fn check<B: Bounds>(&self, slots: usize) -> Result<(), B::Error> {
        B::check(slots == self.capacity && self.is_valid(), || {
            Error::BoundsViolation {
                start: self.index,
                length: self.size,
                limit: slots,
            }
        })
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Layout(capacity: {}, size: {}, index: {}, head: {})",
            self.capacity, self.size, self.index, self.head,
        )
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::HeadWraps => "head wraps",
            Shape::GapWraps => "gap wraps",
            Shape::TailWraps => "tail wraps",
        };
        f.write_str(name)
    }
}

/// A physically contiguous piece of a logical range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Run {
    /// first physical slot
    pub start: usize,
    /// number of slots
    pub len: usize,
    /// position of the first slot relative to the start of the logical range
    pub offset: usize,
}

impl Run {
    /// Physical slots covered by this run.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.len
    }
}

/// Up to three runs covering a logical range, in logical order.
#[derive(Clone, Copy, Debug, Default)]
pub struct Runs {
    runs: [Run; 3],
    count: usize,
}

impl Runs {
    fn push(&mut self, start: usize, len: usize, offset: usize) {
        self.runs[self.count] = Run { start, len, offset };
        self.count += 1;
    }

    fn push_cyclic(&mut self, start: usize, len: usize, offset: usize, capacity: usize) {
        if len == 0 {
            return;
        }
        let first = (capacity - start).min(len);
        self.push(start, first, offset);
        if first < len {
            self.push(0, len - first, offset + first);
        }
    }

    /// The runs in logical order.
    pub fn as_slice(&self) -> &[Run] {
        &self.runs[..self.count]
    }

    /// Number of runs.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if the range was empty.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Visit the runs in the requested order.
    pub fn ordered(&self, order: Order) -> impl Iterator<Item = Run> + '_ {
        let runs = self.as_slice();
        let count = runs.len();
        (0..count).map(move |k| match order {
            Order::Forward => runs[k],
            Order::Backward => runs[count - 1 - k],
        })
    }
}
