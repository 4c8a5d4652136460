//! Random traversal without replacement.
//!
//! Instead of shuffling all `n!` ranks, the traversal walks the additive cycle
//! `start, start + increment, start + 2 * increment, ...` modulo `n!`. When `increment` is coprime
//! to `n!` this cycle has length exactly `n!`, so every rank is visited once before the walk
//! returns to `start`. Only the modulus, the increment, the start and the current rank are
//! stored.
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand_core::RngCore;

use crate::{
    bignum::{factorial, gcd},
    error::{Error, Result},
    rand::Sample,
};

/// Number of candidates [`IncrementSelection::Rejection`] draws before settling for `1`.
///
/// The coprimes of `n!` have a density of roughly `0.56 / ln(n)`, so for all practical `n` the
/// fallback is never taken.
pub const MAX_INCREMENT_DRAWS: usize = 4096;

/// How the increment of a [`RandomCycle`] is chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum IncrementSelection {
    /// Draws uniform candidates from `1..n!` until one is coprime to `n!`.
    ///
    /// The result is uniform over the coprimes of `n!`. After [`MAX_INCREMENT_DRAWS`] failed
    /// draws, `1` is used.
    #[default]
    Rejection,
    /// Scans `1..n!` and replaces the current choice by the `k`-th coprime found with
    /// probability `1 / k`.
    ///
    /// Also uniform over the coprimes, but needs `n!` gcd computations, so this is only usable
    /// for very small `n`.
    Reservoir,
    /// Uses the given increment, which must be coprime to `n!`.
    Fixed(BigUint),
}

/// Visits the ranks `0..n!` in a random order, each exactly once.
///
/// This is what the [`Order::Random`][crate::perm::Order::Random] traversal uses.
#[derive(Clone, Debug)]
pub struct RandomCycle {
    modulus: BigUint,
    increment: BigUint,
    start: BigUint,
    next: Option<BigUint>,
    remaining: BigUint,
}

impl RandomCycle {
    /// Returns a random traversal for permutations of `n` elements.
    ///
    /// Uses [`IncrementSelection::Rejection`].
    pub fn new<R: RngCore + ?Sized>(n: usize, rng: &mut R) -> Self {
        let modulus = factorial(n);
        let increment = rejection_increment(&modulus, rng);
        Self::from_parts(n, modulus, increment, rng)
    }

    /// Returns a random traversal for permutations of `n` elements using the given increment
    /// selection.
    ///
    /// Fails when a [`IncrementSelection::Fixed`] increment is not coprime to `n!`.
    pub fn with_selection<R: RngCore + ?Sized>(
        n: usize,
        rng: &mut R,
        selection: IncrementSelection,
    ) -> Result<Self> {
        let modulus = factorial(n);
        let increment = match selection {
            IncrementSelection::Rejection => rejection_increment(&modulus, rng),
            IncrementSelection::Reservoir => reservoir_increment(&modulus, rng),
            IncrementSelection::Fixed(increment) => {
                if !gcd(&increment, &modulus).is_one() {
                    return Err(Error::IncrementNotCoprime {
                        increment: increment.to_string(),
                        modulus: modulus.to_string(),
                    });
                }
                increment % &modulus
            }
        };
        Ok(Self::from_parts(n, modulus, increment, rng))
    }

    fn from_parts<R: RngCore + ?Sized>(
        n: usize,
        modulus: BigUint,
        increment: BigUint,
        rng: &mut R,
    ) -> Self {
        let start = rng.next_below(&modulus);
        log::debug!(
            "random traversal of {n} elements over a {}-bit rank space, increment has {} bits",
            modulus.bits(),
            increment.bits()
        );
        Self {
            next: Some(start.clone()),
            remaining: modulus.clone(),
            modulus,
            increment,
            start,
        }
    }

    /// Returns the rank the traversal started at.
    pub fn start(&self) -> &BigUint {
        &self.start
    }

    /// Returns the step between consecutive ranks.
    pub fn increment(&self) -> &BigUint {
        &self.increment
    }

    /// Returns the number of ranks not yet yielded.
    pub fn remaining(&self) -> BigUint {
        self.remaining.clone()
    }
}

impl Iterator for RandomCycle {
    type Item = BigUint;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.remaining -= 1u32;

        let following = (&current + &self.increment) % &self.modulus;
        if following != self.start {
            self.next = Some(following);
        } else {
            debug_assert!(self.remaining.is_zero(), "cycle closed early");
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        super::size_hint_of(&self.remaining)
    }
}

fn rejection_increment<R: RngCore + ?Sized>(modulus: &BigUint, rng: &mut R) -> BigUint {
    // `1` is the only coprime below `2!`
    if *modulus <= BigUint::from(2u32) {
        return BigUint::one();
    }

    let span = modulus - 1u32;
    for _ in 0..MAX_INCREMENT_DRAWS {
        let candidate = rng.next_below(&span) + 1u32;
        if gcd(&candidate, modulus).is_one() {
            return candidate;
        }
        log::trace!("increment candidate {candidate} shares a factor with {modulus}");
    }

    log::warn!("no coprime increment found after {MAX_INCREMENT_DRAWS} draws, using 1");
    BigUint::one()
}

fn reservoir_increment<R: RngCore + ?Sized>(modulus: &BigUint, rng: &mut R) -> BigUint {
    let mut increment = BigUint::one();
    let mut seen = 0u64;
    let mut candidate = BigUint::one();
    while candidate < *modulus {
        if gcd(&candidate, modulus).is_one() {
            seen += 1;
            if rng.next_u64_below(seen) == 0 {
                increment = candidate.clone();
            }
        }
        candidate += 1u32;
    }
    increment
}
