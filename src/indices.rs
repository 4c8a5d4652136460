//! Orders in which the ranks `0..n!` are visited.
//!
//! Every traversal is a finite, non-restartable iterator that yields each rank of `0..n!` exactly
//! once and only computes the next rank when asked for it.

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive, Zero};

use crate::bignum::factorial;

mod random;

pub use random::{IncrementSelection, RandomCycle, MAX_INCREMENT_DRAWS};

#[inline]
fn size_hint_of(remaining: &BigUint) -> (usize, Option<usize>) {
    match remaining.to_usize() {
        Some(len) => (len, Some(len)),
        None => (usize::MAX, None),
    }
}

/// Visits the ranks from `n! - 1` down to `0`.
///
/// This is what the [`Order::Ascending`][crate::perm::Order::Ascending] traversal uses. Note that
/// the ranks themselves are *decreasing*, so the permutations come out in reverse
/// lexicographical order. The name is kept for compatibility with existing callers.
#[derive(Clone, Debug)]
pub struct Ascending {
    next: Option<BigUint>,
}

impl Ascending {
    /// Returns the traversal for permutations of `n` elements.
    pub fn new(n: usize) -> Self {
        Self {
            next: Some(factorial(n) - 1u32),
        }
    }

    /// Returns the number of ranks not yet yielded.
    pub fn remaining(&self) -> BigUint {
        self.next
            .as_ref()
            .map_or_else(BigUint::zero, |next| next + 1u32)
    }
}

impl Iterator for Ascending {
    type Item = BigUint;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if !current.is_zero() {
            self.next = Some(&current - 1u32);
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        size_hint_of(&self.remaining())
    }
}

/// Visits the ranks from `0` up to `n! - 1`.
///
/// This is what the [`Order::Descending`][crate::perm::Order::Descending] traversal uses. The
/// ranks are *increasing*, so the permutations come out in lexicographical order.
#[derive(Clone, Debug)]
pub struct Descending {
    next: BigUint,
    end: BigUint,
}

impl Descending {
    /// Returns the traversal for permutations of `n` elements.
    pub fn new(n: usize) -> Self {
        Self {
            next: BigUint::zero(),
            end: factorial(n),
        }
    }

    /// Returns the number of ranks not yet yielded.
    pub fn remaining(&self) -> BigUint {
        &self.end - &self.next
    }
}

impl Iterator for Descending {
    type Item = BigUint;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let following = &self.next + BigUint::one();
        Some(std::mem::replace(&mut self.next, following))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        size_hint_of(&self.remaining())
    }
}

/// Any of the supported rank traversals.
#[derive(Clone, Debug)]
pub enum Indices {
    /// See [`Ascending`].
    Ascending(Ascending),
    /// See [`Descending`].
    Descending(Descending),
    /// See [`RandomCycle`].
    Random(RandomCycle),
}

impl Indices {
    /// Returns the number of ranks not yet yielded.
    pub fn remaining(&self) -> BigUint {
        match self {
            Indices::Ascending(inner) => inner.remaining(),
            Indices::Descending(inner) => inner.remaining(),
            Indices::Random(inner) => inner.remaining(),
        }
    }
}

impl Iterator for Indices {
    type Item = BigUint;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Indices::Ascending(inner) => inner.next(),
            Indices::Descending(inner) => inner.next(),
            Indices::Random(inner) => inner.next(),
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        size_hint_of(&self.remaining())
    }
}

impl From<Ascending> for Indices {
    fn from(inner: Ascending) -> Self {
        Indices::Ascending(inner)
    }
}

impl From<Descending> for Indices {
    fn from(inner: Descending) -> Self {
        Indices::Descending(inner)
    }
}

impl From<RandomCycle> for Indices {
    fn from(inner: RandomCycle) -> Self {
        Indices::Random(inner)
    }
}
