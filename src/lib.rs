//
// Copyright (c) 2025 Nathan Fiedler
//

//! A gap vector built on a single cyclic array.
//!
//! The backing store is treated as a ring. Its unused capacity forms one gap
//! that separates the elements into a head and a tail, and any of the three
//! regions may cross the physical end of the array. Inserting or removing at
//! a logical position moves the gap there by relocating whichever side is
//! shorter, so edits near either end, or near the previous edit, touch only
//! a few elements.
//!
//! The state of a store is the [`Layout`] tuple of capacity, size, the slot
//! of the first element, and the length of the head. Every engine operation
//! takes a backing store and a layout and returns the new layout, leaving
//! ownership of both with the caller; [`GapVector`] is the container that
//! drives them.
//!
//! # Memory Usage
//!
//! An empty vector holds no allocation. Growth doubles the capacity, so the
//! unused space is at most half of the store. Sorting and normalizing may
//! borrow a scratch store no larger than the range being sorted, which is
//! kept for reuse until [`GapVector::shrink_to_fit`] or [`GapVector::clear`].
//!
//! # Performance
//!
//! Element access is O(1) with one conditional to map a logical position to
//! its slot. Insertion and removal cost O(min(d, n - d)) element moves where
//! d is the distance the gap travels, and runs of removals selected by a
//! [`Bitmap`] are closed with one movement each.
//!
//! # Safety
//!
//! There is no `unsafe` code. Elements are moved by exchanging slots, and in
//! stores of `Option` every slot outside the elements holds `None`, so an
//! element is never duplicated or leaked.
//! Entry points parameterized by [`Checked`] validate every computed range
//! before touching a slot; those taking [`Unchecked`] rely on ordinary slice
//! bounds checks instead.

mod bitmap;
mod error;
mod grow;
mod layout;
mod mutate;
mod normalize;
mod options;
mod remove;
mod scratch;
mod slot;
mod sort;
mod transfer;
mod vector;

#[cfg(test)]
mod test_utils;

pub use bitmap::{Bitmap, SetRuns};
pub use error::{Bounds, Checked, Error, MAX_CAPACITY, Unchecked, infallible};
pub use grow::{Bias, grow, grow_into};
pub use layout::{Layout, Order, Run, Runs, Shape};
pub use mutate::{close_gap, move_gap, open_gap};
pub use normalize::normalize;
pub use options::Options;
pub use remove::remove_matching;
pub use scratch::Scratch;
pub use slot::{Slot, clear};
pub use sort::{Strategy, sort_range};
pub use transfer::{
    Pair, Pairs, copy_between, copy_from_slice, copy_to_slice, extend_vec, intersect,
    intersect_limited, read, read_limited, shift, write, write_limited,
};
pub use vector::{GapVector, GapVectorIntoIter, GapVectorIter};
