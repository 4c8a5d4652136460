//! Sampling random values.
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use rand_core::{RngCore, SeedableRng};
use smallvec::SmallVec;

use crate::bignum::Int;

/// A non-cryptographic pesudo-random number generator with a tiny state.
///
/// Currently implements the wyrand algorithm, but this may change in the future.
#[derive(Default, Clone)]
pub struct TinyRng {
    state: u64,
}

impl SeedableRng for TinyRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut new = Self {
            state: u64::from_le_bytes(seed),
        };
        new.next_u64();
        new
    }
}

impl RngCore for TinyRng {
    #[inline(always)]
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        // Based on https://github.com/lemire/testingRNG/blob/master/source/wyrand.h
        let state = self.state;
        self.state = self.state.wrapping_add(0xa0761d6478bd642f);
        let xored = state ^ 0xe7037ed1a0b428db;
        let wide_prod = (state as u128) * (xored as u128);
        (wide_prod as u64) ^ ((wide_prod >> 64) as u64)
    }

    #[inline(always)]
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    #[inline(always)]
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// `RngCore` extension trait to sample bounded integers without bias.
pub trait Sample: RngCore {
    /// Returns a random integer sampled uniformly from `0..bound`.
    ///
    /// Returns `0` when the range is empty.
    #[inline]
    fn next_u64_below(&mut self, bound: u64) -> u64 {
        // Based on
        // https://lemire.me/blog/2019/06/06/nearly-divisionless-random-integer-generation-on-various-systems/
        let s = bound;
        let mut x = self.next_u64();
        let mut m = (x as u128) * (s as u128);
        let mut l = m as u64;
        if l < s {
            let t = s.wrapping_neg() % s;
            while l < t {
                x = self.next_u64();
                m = (x as u128) * (s as u128);
                l = m as u64;
            }
        }

        (m >> 64) as u64
    }

    /// Returns a random integer sampled uniformly from `0..max`.
    ///
    /// Returns `0` when `max <= 0`. Values that fit into a `u64` use
    /// [`next_u64_below`][Self::next_u64_below]. Larger bounds draw exactly as many random bits
    /// as `max` has and reject draws `>= max`, so fewer than two draws are needed on average.
    fn next_below(&mut self, max: impl Int) -> BigUint {
        if max.is_negative() {
            return BigUint::zero();
        }
        let max = max.unsigned_abs();
        if let Some(small) = max.to_u64() {
            return BigUint::from(self.next_u64_below(small));
        }

        let bits = max.bits();
        let len = ((bits + 7) / 8) as usize;
        let mask = 0xffu8 >> (len as u64 * 8 - bits);
        let mut bytes: SmallVec<[u8; 64]> = SmallVec::from_elem(0, len);
        loop {
            self.fill_bytes(&mut bytes);
            if let Some(top) = bytes.last_mut() {
                *top &= mask;
            }
            let candidate = BigUint::from_bytes_le(&bytes);
            if candidate < max {
                return candidate;
            }
        }
    }
}

impl<T: RngCore + ?Sized> Sample for T {}

/// Returns a random integer sampled uniformly from `0..max`, or `0` when `max <= 0`.
///
/// See [`Sample::next_below`].
pub fn random_below<R: RngCore + ?Sized>(rng: &mut R, max: impl Int) -> BigUint {
    rng.next_below(max)
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;
    use num_traits::One;

    use super::*;

    #[test]
    fn degenerate_ranges() {
        let mut r = TinyRng::seed_from_u64(1);
        assert_eq!(random_below(&mut r, 0u32), BigUint::zero());
        assert_eq!(random_below(&mut r, -5i32), BigUint::zero());
        assert_eq!(random_below(&mut r, BigInt::from(-1) << 100), BigUint::zero());
        assert_eq!(random_below(&mut r, 1u32), BigUint::zero());
        assert_eq!(r.next_u64_below(0), 0);
    }

    #[test]
    fn small_range_hits_every_value() {
        let mut r = TinyRng::seed_from_u64(7);
        let mut counts = [0usize; 5];
        for _ in 0..5000 {
            let v = random_below(&mut r, 5u8).to_usize().unwrap();
            counts[v] += 1;
        }
        for &c in &counts {
            assert!((800..1200).contains(&c), "{counts:?}");
        }
    }

    #[test]
    fn big_range_stays_in_bounds() {
        let mut r = TinyRng::seed_from_u64(42);
        let max = (BigUint::one() << 70u32) + 3u32;
        let half = &max >> 1u32;
        let mut upper = 0;
        for _ in 0..2000 {
            let v = random_below(&mut r, &max);
            assert!(v < max);
            if v >= half {
                upper += 1;
            }
        }
        assert!((800..1200).contains(&upper), "{upper}");
    }

    #[test]
    fn byte_aligned_big_range() {
        // exactly 128 bits, so no masking happens on the top byte
        let mut r = TinyRng::seed_from_u64(3);
        let max = BigUint::from(u128::MAX);
        for _ in 0..100 {
            assert!(random_below(&mut r, &max) < max);
        }
    }

    #[test]
    fn seeded_rngs_repeat() {
        let mut a = TinyRng::seed_from_u64(99);
        let mut b = TinyRng::seed_from_u64(99);
        let max = crate::bignum::factorial(40);
        for _ in 0..10 {
            assert_eq!(random_below(&mut a, &max), random_below(&mut b, &max));
        }
    }
}
