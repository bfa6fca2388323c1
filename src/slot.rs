//
// Copyright (c) 2025 Nathan Fiedler
//

//! Element storage for the slots of a cyclic array.
//!
//! The engine never needs to know what an element is. It only needs to fill a
//! fresh backing store with placeholders and, for stores where an element is
//! distinguishable from a placeholder, to overwrite slots that no longer hold
//! a logical element.

use crate::error::{Bounds, Error, MAX_CAPACITY};
use crate::layout::Layout;

/// A slot in the backing store of a cyclic array.
pub trait Slot: Sized {
    /// Whether an element can be told apart from the placeholder, so that a
    /// vacated slot must be overwritten. Value types answer `false` and
    /// clearing is skipped.
    const RETAINS: bool;

    /// The placeholder held by unoccupied slots.
    fn vacant() -> Self;

    /// Allocate a backing store of `len` vacant slots.
    fn allocate(len: usize) -> Result<Box<[Self]>, Error> {
        if len > MAX_CAPACITY {
            return Err(Error::CapacityExceeded { requested: len });
        }
        Ok(std::iter::repeat_with(Self::vacant).take(len).collect())
    }

    /// Overwrite the given slots with the placeholder.
    #[inline]
    fn vacate(slots: &mut [Self]) {
        if Self::RETAINS {
            slots.fill_with(Self::vacant);
        }
    }
}

impl<T> Slot for Option<T> {
    const RETAINS: bool = true;

    #[inline]
    fn vacant() -> Self {
        None
    }
}

macro_rules! value_slots {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Slot for $ty {
                const RETAINS: bool = false;

                #[inline]
                fn vacant() -> Self {
                    <$ty>::default()
                }
            }
        )*
    };
}

value_slots!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char,
);

/// Vacate the slots holding the logical range `offset..offset + len`.
///
/// Does nothing for value-typed stores beyond validating the range.
pub fn clear<B: Bounds, S: Slot>(
    buf: &mut [S],
    layout: Layout,
    offset: usize,
    len: usize,
) -> Result<(), B::Error> {
    let runs = layout.checked_runs::<B>(buf.len(), offset, len)?;
    if S::RETAINS {
        for run in runs.as_slice() {
            S::vacate(&mut buf[run.range()]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Checked, Unchecked, infallible};

    #[test]
    fn test_slot_allocate() {
        let store = <Option<String>>::allocate(5).unwrap();
        assert_eq!(store.len(), 5);
        assert!(store.iter().all(Option::is_none));
        let store = u32::allocate(3).unwrap();
        assert_eq!(&*store, &[0, 0, 0]);
        let store = u8::allocate(0).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_slot_allocate_too_large() {
        let result = u8::allocate(MAX_CAPACITY + 1);
        assert_eq!(
            result.unwrap_err(),
            Error::CapacityExceeded {
                requested: MAX_CAPACITY + 1
            }
        );
    }

    #[test]
    fn test_slot_retains() {
        assert!(<Option<String> as Slot>::RETAINS);
        assert!(<Option<u32> as Slot>::RETAINS);
        assert!(!<u64 as Slot>::RETAINS);
    }

    #[test]
    fn test_slot_vacate_copy_options() {
        let mut slots = [Some(1u32), Some(2), None];
        <Option<u32>>::vacate(&mut slots);
        assert_eq!(slots, [None, None, None]);
    }

    #[test]
    fn test_slot_vacate_values_untouched() {
        let mut slots = [1u32, 2, 3];
        u32::vacate(&mut slots);
        assert_eq!(slots, [1, 2, 3]);
    }

    #[test]
    fn test_slot_clear_wrapped_range() {
        // logical 0..6 laid out as
        // ```
        // +---+---+---+---+---+---+---+---+
        // | d | e |   |   | f | a | b | c |
        // +---+---+---+---+---+---+---+---+
        // ```
        let layout = Layout {
            capacity: 8,
            size: 6,
            index: 5,
            head: 5,
        };
        let mut buf: Vec<Option<String>> = vec![
            Some("d".into()),
            Some("e".into()),
            None,
            None,
            Some("f".into()),
            Some("a".into()),
            Some("b".into()),
            Some("c".into()),
        ];
        infallible(clear::<Unchecked, _>(&mut buf, layout, 2, 3));
        let remaining: Vec<Option<&str>> = buf.iter().map(|s| s.as_deref()).collect();
        assert_eq!(
            remaining,
            vec![None, None, None, None, Some("f"), Some("a"), Some("b"), None]
        );
    }

    #[test]
    fn test_slot_clear_checked_out_of_range() {
        let layout = Layout {
            capacity: 4,
            size: 2,
            index: 0,
            head: 2,
        };
        let mut buf: Vec<Option<String>> = vec![Some("a".into()), Some("b".into()), None, None];
        assert!(clear::<Checked, _>(&mut buf, layout, 1, 2).is_err());
        // nothing was cleared
        assert!(buf[1].is_some());
    }
}
