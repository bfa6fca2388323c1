//
// Copyright (c) 2025 Nathan Fiedler
//

//! Error kinds raised by the cyclic array engine and the policy that decides
//! whether an entry point validates its computed ranges at all.

use std::convert::Infallible;
use thiserror::Error;

/// Largest capacity a backing store may have.
///
/// Bounded to the 31-bit range so that every intermediate sum the engine
/// computes (`index + head + gap` and friends, all below twice the capacity)
/// stays representable in 32 bits.
pub const MAX_CAPACITY: usize = i32::MAX as usize;

/// Structural errors detected by the checked entry points.
///
/// Both kinds indicate that the layout tuple handed to the engine has been
/// corrupted by its owner; the engine never produces an inconsistent layout
/// on its own.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A computed sub-range `[start, start + length)` does not fit below
    /// `limit`.
    #[error("range {start}+{length} falls outside of bound {limit}")]
    BoundsViolation {
        start: usize,
        length: usize,
        limit: usize,
    },
    /// The requested capacity cannot be allocated.
    #[error("requested capacity {requested} exceeds maximum of {max}", max = MAX_CAPACITY)]
    CapacityExceeded { requested: usize },
}

/// Validation policy for an engine entry point.
///
/// `Checked` inspects every computed run before any slot is touched and
/// reports violations as [`Error`]. `Unchecked` has an uninhabited error type
/// and its checks vanish after monomorphization; a corrupt layout then faults
/// through ordinary slice indexing.
pub trait Bounds {
    type Error;

    /// Report `violation` unless `valid` holds.
    fn check(valid: bool, violation: impl FnOnce() -> Error) -> Result<(), Self::Error>;
}

/// Validate all computed ranges and return [`Error`] on violation.
#[derive(Clone, Copy, Debug, Default)]
pub struct Checked;

/// Skip validation; the caller has already established consistency.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unchecked;

impl Bounds for Checked {
    type Error = Error;

    #[inline]
    fn check(valid: bool, violation: impl FnOnce() -> Error) -> Result<(), Error> {
        if valid { Ok(()) } else { Err(violation()) }
    }
}

impl Bounds for Unchecked {
    type Error = Infallible;

    #[inline(always)]
    fn check(_valid: bool, _violation: impl FnOnce() -> Error) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Unwrap the result of an unchecked entry point.
#[inline(always)]
pub fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}
