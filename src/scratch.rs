//
// Copyright (c) 2025 Nathan Fiedler
//

//! Reusable auxiliary storage for the normalizer and the sort engine.
//!
//! [`Scratch`] owns at most one store of vacant slots. A borrower takes the
//! store out, uses as many slots as it needs, exchanges its elements back
//! out, and returns the store. Nothing is held across calls: the cache may
//! have been released or replaced in between, so every borrower asks again
//! and checks the size it gets.

use crate::slot::Slot;

/// Cached scratch store, empty until first needed.
#[derive(Debug)]
pub struct Scratch<S> {
    slots: Option<Vec<S>>,
}

impl<S> Default for Scratch<S> {
    fn default() -> Self {
        Self { slots: None }
    }
}

impl<S: Slot> Scratch<S> {
    /// Return an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of slots in the cached store, zero if nothing is cached.
    pub fn available(&self) -> usize {
        self.slots.as_ref().map_or(0, Vec::len)
    }

    /// Take a store of at least `len` vacant slots, reusing the cached one
    /// if it is large enough.
    ///
    /// Requests never exceed the capacity of an existing backing store, so
    /// a fresh allocation cannot run past [`MAX_CAPACITY`](crate::MAX_CAPACITY).
    pub fn take(&mut self, len: usize) -> Vec<S> {
        match self.slots.take() {
            Some(slots) if slots.len() >= len => slots,
            cached => {
                // keep the smaller store around for a later, smaller request
                self.slots = cached;
                std::iter::repeat_with(S::vacant).take(len).collect()
            }
        }
    }

    /// Take the cached store only if it holds at least `len` slots.
    pub fn take_cached(&mut self, len: usize) -> Option<Vec<S>> {
        match self.slots.take() {
            Some(slots) if slots.len() >= len => Some(slots),
            cached => {
                self.slots = cached;
                None
            }
        }
    }

    /// Return a store whose slots are all vacant again; the larger of it and
    /// any currently cached store is kept.
    pub fn restore(&mut self, slots: Vec<S>) {
        if slots.len() > self.available() {
            self.slots = Some(slots);
        }
    }

    /// Drop the cached store.
    pub fn release(&mut self) {
        self.slots = None;
    }
}
