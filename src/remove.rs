//
// Copyright (c) 2025 Nathan Fiedler
//

//! Removing many elements at once, one rotation per run of removals.

use crate::bitmap::Bitmap;
use crate::error::{Bounds, Error};
use crate::layout::Layout;
use crate::mutate::collapse;
use crate::slot::Slot;

/// Remove every element at logical position `offset + i` for which bit `i`
/// of `bits` is set.
///
/// Adjacent set bits are removed together by a single call to
/// [`close_gap`](crate::close_gap). Earlier removals shift the later
/// positions down, which is accounted for as the scan proceeds. Returns the
/// new layout and the number of elements removed, which is the number of set
/// bits. The relative order of the remaining elements is unchanged.
pub fn remove_matching<B: Bounds, S: Slot>(
    buf: &mut [S],
    layout: Layout,
    offset: usize,
    bits: &Bitmap,
) -> Result<(Layout, usize), B::Error> {
    layout.check::<B>(buf.len())?;
    B::check(
        offset <= layout.size && bits.len() <= layout.size - offset,
        || Error::BoundsViolation {
            start: offset,
            length: bits.len(),
            limit: layout.size,
        },
    )?;
    let mut layout = layout;
    let mut removed = 0;
    for (start, len) in bits.set_runs() {
        layout = collapse(buf, layout, offset + start - removed, len);
        removed += len;
    }
    Ok((layout, removed))
}
