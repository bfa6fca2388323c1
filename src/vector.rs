//
// Copyright (c) 2025 Nathan Fiedler
//

//! Growable vector that keeps its elements in one cyclic array with a single
//! movable gap.

use crate::bitmap::Bitmap;
use crate::error::{Error, MAX_CAPACITY, Unchecked, infallible};
use crate::grow;
use crate::layout::{Layout, Order};
use crate::mutate::{close_gap, open_gap};
use crate::normalize::normalize;
use crate::options::Options;
use crate::remove::remove_matching;
use crate::scratch::Scratch;
use crate::slot::Slot;
use crate::sort::{Strategy, sort_range};
use crate::transfer::{copy_between, intersect_limited, read, read_limited, write};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Bound, Index, IndexMut, Range, RangeBounds};

/// Vector backed by a single cyclic array in which the unused capacity forms
/// a gap that travels to wherever the next insertion or removal happens.
///
/// Only the elements between the old and the new position of the gap move,
/// or the ones on the other side of the ring when there are fewer of those,
/// so inserting and removing near either end or near the previous edit is
/// cheap regardless of the length.
pub struct GapVector<T> {
    /// backing store, vacant slots hold `None`
    buffer: Box<[Option<T>]>,
    /// where the elements are within the buffer
    layout: Layout,
    /// auxiliary storage for sorting and normalizing
    scratch: Scratch<Option<T>>,
    options: Options,
}

/// Allocate a store of vacant slots, panicking like `Vec` does when the
/// capacity is out of reach.
fn allocate<T>(capacity: usize) -> Box<[Option<T>]> {
    match <Option<T>>::allocate(capacity) {
        Ok(buffer) => buffer,
        Err(err) => panic!("{err}"),
    }
}

/// Resolve a range against a length, panicking if it does not fit.
fn resolve(range: impl RangeBounds<usize>, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start + 1,
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end + 1,
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };
    if start > end {
        panic!("range start (is {start}) should be <= range end (is {end})");
    }
    if end > len {
        panic!("range end (is {end}) should be <= len (is {len})");
    }
    start..end
}

impl<T> GapVector<T> {
    /// Return an empty vector with zero capacity.
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Return an empty vector with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_options(Options {
            initial_capacity: capacity,
            ..Options::default()
        })
    }

    /// Return an empty vector configured by `options`.
    ///
    /// # Panics
    ///
    /// Panics if the initial capacity exceeds [`MAX_CAPACITY`].
    pub fn with_options(options: Options) -> Self {
        Self {
            buffer: allocate(options.initial_capacity),
            layout: Layout::new(options.initial_capacity),
            scratch: Scratch::new(),
            options,
        }
    }

    /// Move the elements into a store of exactly `capacity` slots.
    fn relocate(&mut self, capacity: usize) -> Result<(), Error> {
        let (layout, buffer) =
            grow::grow(&mut self.buffer, self.layout, capacity, self.options.bias)?;
        self.buffer = buffer;
        self.layout = layout;
        Ok(())
    }

    /// Ensure there is room for `additional` more elements, doubling the
    /// capacity (or starting at the configured minimum) when growing.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), Error> {
        let Some(required) = self.layout.size.checked_add(additional) else {
            return Err(Error::CapacityExceeded {
                requested: usize::MAX,
            });
        };
        if required <= self.layout.capacity {
            return Ok(());
        }
        let doubled = (self.layout.capacity * 2)
            .max(self.options.min_growth)
            .min(MAX_CAPACITY);
        self.relocate(doubled.max(required))
    }

    /// Ensure there is room for `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity exceeds [`MAX_CAPACITY`].
    pub fn reserve(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve(additional) {
            panic!("{err}");
        }
    }

    /// Reduce the capacity to the number of elements.
    pub fn shrink_to_fit(&mut self) {
        if self.layout.capacity > self.layout.size {
            if let Err(err) = self.relocate(self.layout.size) {
                panic!("{err}");
            }
        }
        self.scratch.release();
    }

    /// Inserts an element at position `index` within the vector, moving the
    /// gap there first.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Time complexity
    ///
    /// O(min(d, n - d)) where d is the distance between `index` and the
    /// previous position of the gap, plus amortized O(1) for growth.
    pub fn insert(&mut self, index: usize, value: T) {
        let len = self.layout.size;
        if index > len {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }
        self.reserve(1);
        let (layout, slot) = infallible(open_gap::<Unchecked, _>(
            &mut self.buffer,
            self.layout,
            index,
            1,
        ));
        self.buffer[slot] = Some(value);
        self.layout = layout;
    }

    /// Appends an element to the back of the vector.
    ///
    /// # Time complexity
    ///
    /// Amortized constant time when appending repeatedly.
    pub fn push(&mut self, value: T) {
        self.insert(self.layout.size, value);
    }

    /// Prepends an element to the front of the vector.
    ///
    /// # Time complexity
    ///
    /// Amortized constant time when prepending repeatedly.
    pub fn push_front(&mut self, value: T) {
        self.insert(0, value);
    }

    /// Appends an element if there is sufficient spare capacity, otherwise an
    /// error is returned with the element.
    pub fn push_within_capacity(&mut self, value: T) -> Result<(), T> {
        if self.layout.gap() == 0 {
            Err(value)
        } else {
            self.push(value);
            Ok(())
        }
    }

    /// Copies every element of `other` into this vector starting at position
    /// `index`, without an intermediate buffer.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_from(&mut self, index: usize, other: &GapVector<T>)
    where
        T: Clone,
    {
        let len = self.layout.size;
        if index > len {
            panic!("insertion index (is {index}) should be <= len (is {len})");
        }
        let count = other.layout.size;
        self.reserve(count);
        let (layout, _) = infallible(open_gap::<Unchecked, _>(
            &mut self.buffer,
            self.layout,
            index,
            count,
        ));
        infallible(copy_between::<Unchecked, _>(
            &other.buffer,
            other.layout,
            0,
            &mut self.buffer,
            layout,
            index,
            count,
        ));
        self.layout = layout;
    }

    /// Retrieve a reference to the element at the given offset.
    ///
    /// # Time complexity
    ///
    /// Constant time.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.layout.size {
            None
        } else {
            self.buffer[self.layout.physical_index(index)].as_ref()
        }
    }

    /// Returns a mutable reference to an element.
    ///
    /// # Time complexity
    ///
    /// Constant time.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.layout.size {
            None
        } else {
            self.buffer[self.layout.physical_index(index)].as_mut()
        }
    }

    /// Removes an element from position `index` within the vector, letting
    /// the gap absorb its slot.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.layout.size;
        if index >= len {
            panic!("removal index (is {index}) should be < len (is {len})");
        }
        let slot = self.layout.physical_index(index);
        let Some(value) = self.buffer[slot].take() else {
            panic!("vacant slot {slot} at index {index}");
        };
        self.layout = infallible(close_gap::<Unchecked, _>(
            &mut self.buffer,
            self.layout,
            index,
            1,
        ));
        value
    }

    /// Removes the last element from the vector and returns it, or `None` if
    /// the vector is empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.layout.size > 0 {
            Some(self.remove(self.layout.size - 1))
        } else {
            None
        }
    }

    /// Removes the first element from the vector and returns it, or `None` if
    /// the vector is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.layout.size > 0 {
            Some(self.remove(0))
        } else {
            None
        }
    }

    /// Removes and returns the last element from a vector if the predicate
    /// returns true, or `None` if the predicate returns `false` or the vector
    /// is empty (the predicate will not be called in that case).
    pub fn pop_if(&mut self, predicate: impl FnOnce(&mut T) -> bool) -> Option<T> {
        if self.layout.size == 0 {
            None
        } else if let Some(last) = self.get_mut(self.layout.size - 1) {
            if predicate(last) { self.pop() } else { None }
        } else {
            None
        }
    }

    /// Removes the elements in `range`, returning them in order.
    ///
    /// # Panics
    ///
    /// Panics if the range does not fit within the vector.
    pub fn remove_range(&mut self, range: impl RangeBounds<usize>) -> Vec<T> {
        let Range { start, end } = resolve(range, self.layout.size);
        let mut removed = Vec::with_capacity(end - start);
        infallible(write::<Unchecked, _, _>(
            &mut self.buffer,
            self.layout,
            start,
            end - start,
            Order::Forward,
            |run, _| removed.extend(run.iter_mut().filter_map(Option::take)),
        ));
        self.layout = infallible(close_gap::<Unchecked, _>(
            &mut self.buffer,
            self.layout,
            start,
            end - start,
        ));
        removed
    }

    /// Shortens the vector to `len` elements, dropping the rest. Has no effect
    /// if the vector is already shorter.
    pub fn truncate(&mut self, len: usize) {
        if len < self.layout.size {
            self.layout = infallible(close_gap::<Unchecked, _>(
                &mut self.buffer,
                self.layout,
                len,
                self.layout.size - len,
            ));
        }
    }

    /// Retains only the elements for which `keep` returns true, preserving
    /// their order.
    ///
    /// # Time complexity
    ///
    /// O(n) calls to `keep`, and one gap movement per run of rejected
    /// elements.
    pub fn retain(&mut self, mut keep: impl FnMut(&T) -> bool) {
        let len = self.layout.size;
        let mut rejects = Bitmap::new(len);
        infallible(read::<Unchecked, _, _>(
            &self.buffer,
            self.layout,
            0,
            len,
            Order::Forward,
            |run, at| {
                for (offset, slot) in run.iter().enumerate() {
                    if slot.as_ref().is_some_and(|value| !keep(value)) {
                        rejects.set(at + offset);
                    }
                }
            },
        ));
        let (layout, _) = infallible(remove_matching::<Unchecked, _>(
            &mut self.buffer,
            self.layout,
            0,
            &rejects,
        ));
        self.layout = layout;
    }

    /// Returns true if the vector contains an element equal to `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let len = self.layout.size;
        let scanned = infallible(read_limited::<Unchecked, _, _>(
            &self.buffer,
            self.layout,
            0,
            len,
            |run, _| {
                run.iter()
                    .take_while(|slot| slot.as_ref() != Some(value))
                    .count()
            },
        ));
        scanned < len
    }

    /// Sorts the vector.
    pub fn sort(&mut self)
    where
        T: Ord,
    {
        self.sort_by(T::cmp);
    }

    /// Sorts the vector with a comparator function.
    pub fn sort_by(&mut self, compare: impl FnMut(&T, &T) -> Ordering) {
        self.sort_range_by(.., compare);
    }

    /// Sorts the elements in `range` with a comparator function, leaving the
    /// rest of the vector untouched, and reports how the range was made
    /// contiguous for sorting.
    ///
    /// # Panics
    ///
    /// Panics if the range does not fit within the vector.
    pub fn sort_range_by(
        &mut self,
        range: impl RangeBounds<usize>,
        mut compare: impl FnMut(&T, &T) -> Ordering,
    ) -> Strategy {
        let Range { start, end } = resolve(range, self.layout.size);
        let (layout, strategy) = infallible(sort_range::<Unchecked, _, _>(
            &mut self.buffer,
            self.layout,
            &mut self.scratch,
            start,
            end - start,
            self.options.relayout_on_sort,
            |slots| {
                slots.sort_by(|a, b| match (a, b) {
                    (Some(a), Some(b)) => compare(a, b),
                    (a, b) => a.is_some().cmp(&b.is_some()),
                })
            },
        ));
        self.layout = layout;
        strategy
    }

    /// Rearrange the elements into one contiguous run of slots.
    pub fn normalize(&mut self) {
        self.layout = infallible(normalize::<Unchecked, _>(
            &mut self.buffer,
            self.layout,
            &mut self.scratch,
        ));
    }

    /// Where the elements currently sit within the backing store.
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Returns an iterator over the vector.
    ///
    /// The iterator yields all items from start to end.
    pub fn iter(&self) -> GapVectorIter<'_, T> {
        GapVectorIter {
            array: self,
            index: 0,
            back: self.layout.size,
        }
    }

    /// Return the number of elements in the vector.
    ///
    /// # Time complexity
    ///
    /// Constant time.
    pub fn len(&self) -> usize {
        self.layout.size
    }

    /// Returns the total number of elements the vector can hold without
    /// reallocating.
    ///
    /// # Time complexity
    ///
    /// Constant time.
    pub fn capacity(&self) -> usize {
        self.layout.capacity
    }

    /// Returns true if the vector has a length of 0.
    ///
    /// # Time complexity
    ///
    /// Constant time.
    pub fn is_empty(&self) -> bool {
        self.layout.size == 0
    }

    /// Clears the vector, removing all values and deallocating the backing
    /// store along with any cached scratch storage.
    ///
    /// # Time complexity
    ///
    /// O(n) if elements are droppable, otherwise O(1).
    pub fn clear(&mut self) {
        self.buffer = allocate(0);
        self.layout = Layout::new(0);
        self.scratch.release();
    }
}

impl<T> Default for GapVector<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for GapVector<T> {
    fn clone(&self) -> Self {
        Self {
            buffer: self.buffer.clone(),
            layout: self.layout,
            scratch: Scratch::new(),
            options: self.options,
        }
    }
}

impl<T> fmt::Display for GapVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GapVector(capacity: {}, len: {}, shape: {})",
            self.layout.capacity,
            self.layout.size,
            self.layout.shape(),
        )
    }
}

impl<T: fmt::Debug> fmt::Debug for GapVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for GapVector<T> {
    fn eq(&self, other: &Self) -> bool {
        let len = self.layout.size;
        if len != other.layout.size {
            return false;
        }
        let same = infallible(intersect_limited::<Unchecked, _, _, _>(
            &self.buffer,
            self.layout,
            0,
            &other.buffer,
            other.layout,
            0,
            len,
            |a, b, _| a.iter().zip(b).take_while(|(a, b)| a == b).count(),
        ));
        same == len
    }
}

impl<T: Eq> Eq for GapVector<T> {}

impl<T> Index<usize> for GapVector<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        let Some(item) = self.get(index) else {
            panic!("index out of bounds: {}", index);
        };
        item
    }
}

impl<T> IndexMut<usize> for GapVector<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        let Some(item) = self.get_mut(index) else {
            panic!("index out of bounds: {}", index);
        };
        item
    }
}

impl<A> FromIterator<A> for GapVector<A> {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        let mut arr: GapVector<A> = GapVector::new();
        arr.extend(iter);
        arr
    }
}

impl<A> Extend<A> for GapVector<A> {
    fn extend<T: IntoIterator<Item = A>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push(value);
        }
    }
}

/// Immutable vector iterator.
pub struct GapVectorIter<'a, T> {
    array: &'a GapVector<T>,
    index: usize,
    back: usize,
}

impl<'a, T> Iterator for GapVectorIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.back {
            let value = self.array.get(self.index);
            self.index += 1;
            value
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.index;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for GapVectorIter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.index < self.back {
            self.back -= 1;
            self.array.get(self.back)
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for GapVectorIter<'_, T> {}

impl<'a, T> IntoIterator for &'a GapVector<T> {
    type Item = &'a T;
    type IntoIter = GapVectorIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> IntoIterator for GapVector<T> {
    type Item = T;
    type IntoIter = GapVectorIntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        GapVectorIntoIter { array: self }
    }
}

/// An iterator that moves out of a gap vector.
pub struct GapVectorIntoIter<T> {
    array: GapVector<T>,
}

impl<T> Iterator for GapVectorIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.array.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.array.len();
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for GapVectorIntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.array.pop()
    }
}

impl<T> ExactSizeIterator for GapVectorIntoIter<T> {}
