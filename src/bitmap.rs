//
// Copyright (c) 2025 Nathan Fiedler
//

//! Growable bit set backed by `u64` words, with run-length scanning.

/// Computes the number of `u64` words needed to store `n` bits.
const fn words_for_bits(n: usize) -> usize {
    n.div_ceil(64)
}

/// A fixed number of flags, one per position, all clear initially.
///
/// Bit `i` lives in word `i / 64` at bit `i % 64`, so the lowest bit of the
/// first word is position 0. Bits past `len` are always clear.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitmap {
    words: Vec<u64>,
    len: usize,
}

impl Bitmap {
    /// Creates a bitmap of `len` clear bits.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0; words_for_bits(len)],
            len,
        }
    }

    /// Creates a bitmap whose bit `i` is `f(i)`.
    pub fn from_fn(len: usize, mut f: impl FnMut(usize) -> bool) -> Self {
        let mut bits = Self::new(len);
        for idx in 0..len {
            if f(idx) {
                bits.set(idx);
            }
        }
        bits
    }

    /// Creates a bitmap with exactly the given positions set.
    ///
    /// Panics if any position is `>= len`.
    pub fn from_indices(len: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut bits = Self::new(len);
        for idx in indices {
            bits.set(idx);
        }
        bits
    }

    /// Number of positions.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no positions at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns whether `idx` is set.
    ///
    /// Panics if `idx >= len`.
    #[inline]
    pub fn is_set(&self, idx: usize) -> bool {
        assert!(idx < self.len, "bit index out of bounds");
        (self.words[idx / 64] & (1u64 << (idx % 64))) != 0
    }

    /// Sets the bit at `idx`.
    ///
    /// Panics if `idx >= len`.
    #[inline]
    pub fn set(&mut self, idx: usize) {
        assert!(idx < self.len, "bit index out of bounds");
        self.words[idx / 64] |= 1u64 << (idx % 64);
    }

    /// Clears the bit at `idx`.
    ///
    /// Panics if `idx >= len`.
    #[inline]
    pub fn unset(&mut self, idx: usize) {
        assert!(idx < self.len, "bit index out of bounds");
        self.words[idx / 64] &= !(1u64 << (idx % 64));
    }

    /// Counts set bits.
    pub fn count(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Length of the run of bits equal to `value` that starts at `from`.
    ///
    /// Each step consumes the rest of a word at once: the word is shifted so
    /// that `from` is its lowest bit, inverted when looking for set bits, and
    /// the run is its count of trailing zeros. Only a run that reaches the end
    /// of the word continues into the next one.
    pub fn run_length(&self, from: usize, value: bool) -> usize {
        let mut at = from;
        while at < self.len {
            let shift = at % 64;
            let word = self.words[at / 64] >> shift;
            let probe = if value { !word } else { word };
            let remaining = 64 - shift;
            let run = (probe.trailing_zeros() as usize).min(remaining);
            at += run;
            if run < remaining {
                break;
            }
        }
        at.min(self.len).saturating_sub(from)
    }

    /// Iterate over the maximal runs of set bits as `(start, len)` pairs, in
    /// ascending order.
    pub fn set_runs(&self) -> SetRuns<'_> {
        SetRuns { bits: self, at: 0 }
    }
}

/// Iterator returned by [`Bitmap::set_runs`].
pub struct SetRuns<'a> {
    bits: &'a Bitmap,
    at: usize,
}

impl Iterator for SetRuns<'_> {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        self.at += self.bits.run_length(self.at, false);
        if self.at >= self.bits.len {
            return None;
        }
        let start = self.at;
        let len = self.bits.run_length(start, true);
        self.at += len;
        Some((start, len))
    }
}
