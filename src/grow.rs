//
// Copyright (c) 2025 Nathan Fiedler
//

//! Moving the contents of a cyclic array into a new backing store.

use crate::error::{Checked, Error, MAX_CAPACITY, Unchecked, infallible};
use crate::layout::{Layout, Order, wrap};
use crate::slot::Slot;
use crate::transfer::write;

/// Placement of the elements within a new backing store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Bias {
    /// Elements start at slot 0 and the gap fills the end of the store, which
    /// suits workloads that mostly append.
    #[default]
    Left,
    /// Elements sit in the middle with the gap split across both ends, which
    /// suits workloads that append and prepend alike.
    Center,
}

/// Allocate a store of `capacity` slots and move every element into it.
///
/// The capacity may be smaller than the current one (when shrinking) but not
/// smaller than the number of elements. On return the old store holds only
/// vacant slots.
pub fn grow<S: Slot>(
    buf: &mut [S],
    layout: Layout,
    capacity: usize,
    bias: Bias,
) -> Result<(Layout, Box<[S]>), Error> {
    if capacity < layout.size {
        return Err(Error::BoundsViolation {
            start: 0,
            length: layout.size,
            limit: capacity,
        });
    }
    let mut target = S::allocate(capacity)?;
    let result = grow_into(buf, layout, &mut target, bias)?;
    Ok((result, target))
}

/// Move every element into `target`, a store of vacant slots supplied by the
/// caller, and return the layout describing it.
///
/// The tail is placed first and the head right after it, so that neither
/// crosses the physical end of the new store. Elements are exchanged with
/// the vacant slots of `target`, leaving the old store vacant.
pub fn grow_into<S>(
    buf: &mut [S],
    layout: Layout,
    target: &mut [S],
    bias: Bias,
) -> Result<Layout, Error> {
    layout.check::<Checked>(buf.len())?;
    let capacity = target.len();
    if capacity > MAX_CAPACITY {
        return Err(Error::CapacityExceeded {
            requested: capacity,
        });
    }
    if capacity < layout.size {
        return Err(Error::BoundsViolation {
            start: 0,
            length: layout.size,
            limit: capacity,
        });
    }
    let tail = layout.tail();
    let start = match bias {
        Bias::Left => 0,
        Bias::Center => (capacity - layout.size) / 2,
    };
    let index = start + tail;
    infallible(write::<Unchecked, _, _>(
        buf,
        layout,
        layout.head,
        tail,
        Order::Forward,
        |run, at| run.swap_with_slice(&mut target[start + at..start + at + run.len()]),
    ));
    infallible(write::<Unchecked, _, _>(
        buf,
        layout,
        0,
        layout.head,
        Order::Forward,
        |run, at| run.swap_with_slice(&mut target[index + at..index + at + run.len()]),
    ));
    let result = Layout {
        capacity,
        size: layout.size,
        index: wrap(index, capacity),
        head: layout.head,
    };
    debug_assert!(result.is_valid(), "{result}");
    Ok(result)
}
