//
// Copyright (c) 2025 Nathan Fiedler
//

use crate::grow::Bias;

/// Configuration options for a [`GapVector`](crate::GapVector).
///
/// # Default
///
/// No initial allocation, growth by at least 4 slots, left-biased placement
/// after growth, and sorting allowed to normalize the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Number of slots allocated up front.
    ///
    /// # Default
    ///
    /// `0`
    pub initial_capacity: usize,

    /// Smallest capacity allocated when the vector grows from empty.
    ///
    /// Growth otherwise doubles the capacity.
    ///
    /// # Default
    ///
    /// `4`
    pub min_growth: usize,

    /// Where the elements are placed within a newly allocated store.
    ///
    /// [`Bias::Left`] favors appending while [`Bias::Center`] leaves room at
    /// both ends for vectors that are also prepended to.
    ///
    /// # Default
    ///
    /// [`Bias::Left`]
    pub bias: Bias,

    /// Whether sorting a range may rearrange the whole store when that is
    /// cheaper than copying the range out and back.
    ///
    /// # Default
    ///
    /// `true`
    pub relayout_on_sort: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            min_growth: 4,
            bias: Bias::Left,
            relayout_on_sort: true,
        }
    }
}
