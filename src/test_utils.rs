//
// Copyright (c) 2025 Nathan Fiedler
//

//! Helpers for arranging backing stores in arbitrary layouts.

use crate::layout::Layout;
use crate::slot::Slot;

/// Allocate a store for `layout` and place `values` at their logical
/// positions; every other slot is vacant.
pub fn build<S: Slot + Clone>(layout: Layout, values: &[S]) -> Vec<S> {
    assert_eq!(values.len(), layout.size);
    let mut buf: Vec<S> = std::iter::repeat_with(S::vacant)
        .take(layout.capacity)
        .collect();
    for (logical, value) in values.iter().enumerate() {
        buf[layout.physical_index(logical)] = value.clone();
    }
    buf
}

/// Collect the logical contents of a store.
pub fn contents<S: Clone>(buf: &[S], layout: Layout) -> Vec<S> {
    (0..layout.size)
        .map(|logical| buf[layout.physical_index(logical)].clone())
        .collect()
}

/// Every valid layout for the given capacity.
pub fn every_layout(capacity: usize) -> impl Iterator<Item = Layout> {
    (0..=capacity).flat_map(move |size| {
        (0..capacity.max(1)).flat_map(move |index| {
            (0..=size).map(move |head| Layout {
                capacity,
                size,
                index,
                head,
            })
        })
    })
}

/// Store of `Option<String>` in the given layout holding "0", "1", and so on.
pub fn strings(layout: Layout) -> Vec<Option<String>> {
    let values: Vec<Option<String>> = (0..layout.size).map(|v| Some(v.to_string())).collect();
    build(layout, &values)
}

/// Number of slots holding an element.
pub fn occupied<T>(buf: &[Option<T>]) -> usize {
    buf.iter().filter(|s| s.is_some()).count()
}
