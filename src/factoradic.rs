//! Factorial number system codec.
//!
//! A rank `i` in `0..n!` is written in the mixed radix `1, 2, ..., n`, giving one digit per
//! position. [`decode`] turns these digits into a permutation of `0..n` such that rank `i` is
//! the `i`-th permutation in lexicographical order.
use num_bigint::BigUint;
use num_traits::Zero;
use smallvec::SmallVec;

use crate::bignum::take_digit;

/// Digits of a rank in the factorial number system.
///
/// Digit `k` (0-based) is always below `k + 1`, so digit `0` is always `0`.
pub type Components = SmallVec<[usize; 16]>;

/// A permutation of `0..n` stored as its images.
pub type Images = SmallVec<[usize; 16]>;

/// Writes `rank` in the factorial number system with `n` digits.
///
/// The rank is divided by the increasing radices `1, 2, ..., n`; digit `k - 1` is the remainder
/// of the division by `k`. The result is only meaningful for `rank < n!`.
pub fn encode(rank: &BigUint, n: usize) -> Components {
    let mut rest = rank.clone();
    let components: Components = (1..=n).map(|radix| take_digit(&mut rest, radix)).collect();
    debug_assert!(rest.is_zero(), "rank out of range");
    components
}

/// Turns factorial number system digits into a permutation.
///
/// The labels `n - 1, n - 2, ..., 0` are inserted one at a time, label `n - 1 - k` at position
/// `components[k]` of the sequence built so far, shifting later entries right. The finished
/// sequence lists, for every value, the position that value ends up at, so the returned
/// permutation is its inverse.
pub fn decode(components: &[usize]) -> Images {
    let n = components.len();

    let mut positions = Images::with_capacity(n);
    for (k, &slot) in components.iter().enumerate() {
        debug_assert!(slot <= k, "component {k} out of range");
        positions.insert(slot, n - 1 - k);
    }

    let mut images: Images = smallvec::smallvec![0; n];
    for (value, &position) in positions.iter().enumerate() {
        images[position] = value;
    }
    images
}

/// Returns the permutation with the given lexicographical rank among all permutations of `0..n`.
#[inline]
pub fn unrank(rank: &BigUint, n: usize) -> Images {
    decode(&encode(rank, n))
}
