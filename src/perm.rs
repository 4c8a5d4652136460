//! Lazy permutations of a borrowed sequence.

use std::{fmt, str::FromStr};

use num_bigint::BigUint;
use rand_core::RngCore;

use crate::{
    error::Error,
    factoradic::unrank,
    indices::{Ascending, Descending, Indices, RandomCycle},
};

/// Order in which [`Permutations`] visits the permutations of a sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Visits the ranks from `n! - 1` down to `0`, i.e. reverse lexicographical order.
    ///
    /// The name does not describe the produced order; it is kept so that the names accepted by
    /// [`FromStr`] stay stable. Use [`Order::Descending`] for lexicographical order.
    Ascending,
    /// Visits the ranks from `0` up to `n! - 1`, i.e. lexicographical order.
    Descending,
    /// Visits every permutation exactly once in a uniformly random order.
    Random,
}

impl Order {
    /// All orders, in declaration order.
    pub const ALL: [Order; 3] = [Order::Ascending, Order::Descending, Order::Random];

    /// Returns the lowercase name of this order.
    pub fn name(self) -> &'static str {
        match self {
            Order::Ascending => "ascending",
            Order::Descending => "descending",
            Order::Random => "random",
        }
    }

    /// Returns the rank traversal for permutations of `n` elements in this order.
    ///
    /// `rng` is only used by [`Order::Random`].
    pub fn indices<R: RngCore + ?Sized>(self, n: usize, rng: &mut R) -> Indices {
        match self {
            Order::Ascending => Ascending::new(n).into(),
            Order::Descending => Descending::new(n).into(),
            Order::Random => RandomCycle::new(n, rng).into(),
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Order {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Order::ALL
            .into_iter()
            .find(|order| order.name() == s)
            .ok_or_else(|| Error::UnknownOrder(s.to_owned()))
    }
}

/// Iterator over the permutations of a borrowed sequence.
///
/// Yields exactly `n!` permutations for a sequence of length `n`; for `n` in `{0, 1}` that is the
/// sequence itself. Each permutation is computed when it is requested, using `O(n)` memory, so
/// dropping the iterator early costs nothing for the permutations that were never requested.
#[derive(Clone, Debug)]
pub struct Permutations<'a, T> {
    items: &'a [T],
    indices: Indices,
}

impl<'a, T: Clone> Permutations<'a, T> {
    /// Returns the permutations of `items` in the given order.
    ///
    /// Random traversals draw every random value from the operating system's generator, so all
    /// `n!` starting permutations are reachable even for large `n`.
    #[cfg(feature = "getrandom")]
    pub fn new(items: &'a [T], order: Order) -> Self {
        Self::with_rng(items, order, &mut rand_core::OsRng)
    }

    /// Returns the permutations of `items` in the given order, drawing randomness from `rng`.
    pub fn with_rng<R: RngCore + ?Sized>(items: &'a [T], order: Order, rng: &mut R) -> Self {
        Self::with_indices(items, order.indices(items.len(), rng))
    }

    /// Returns the permutations of `items` in the order of the given rank traversal.
    ///
    /// The traversal has to be for permutations of `items.len()` elements.
    pub fn with_indices(items: &'a [T], indices: impl Into<Indices>) -> Self {
        let indices = indices.into();
        log::debug!(
            "permuting {} items, {} permutations to go",
            items.len(),
            indices.remaining()
        );
        Self { items, indices }
    }

    /// Returns the number of permutations not yet yielded.
    pub fn remaining(&self) -> BigUint {
        self.indices.remaining()
    }

    /// Writes the next permutation into `target`, reusing its allocation.
    ///
    /// Returns `false` and leaves `target` untouched once all permutations were yielded.
    pub fn next_into(&mut self, target: &mut Vec<T>) -> bool {
        let Some(rank) = self.indices.next() else {
            return false;
        };
        let images = unrank(&rank, self.items.len());
        target.clear();
        target.extend(images.iter().map(|&index| self.items[index].clone()));
        true
    }
}

impl<'a, T: Clone> Iterator for Permutations<'a, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let rank = self.indices.next()?;
        let images = unrank(&rank, self.items.len());
        Some(images.iter().map(|&index| self.items[index].clone()).collect())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

/// Returns the permutations of `items` in the given order.
///
/// Shorthand for [`Permutations::new`].
#[cfg(feature = "getrandom")]
pub fn permute<T: Clone>(items: &[T], order: Order) -> Permutations<'_, T> {
    Permutations::new(items, order)
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, collections::HashSet, rc::Rc};

    use rand_core::SeedableRng;

    use super::*;
    use crate::{
        bignum::factorial,
        indices::IncrementSelection,
        rand::TinyRng,
    };

    fn collect<T: Clone>(items: &[T], order: Order, seed: u64) -> Vec<Vec<T>> {
        Permutations::with_rng(items, order, &mut TinyRng::seed_from_u64(seed)).collect()
    }

    #[test]
    fn parse_and_display_orders() {
        for order in Order::ALL {
            assert_eq!(order.to_string().parse::<Order>(), Ok(order));
        }
        assert_eq!("random".parse::<Order>(), Ok(Order::Random));
        assert_eq!(
            "Random".parse::<Order>(),
            Err(Error::UnknownOrder("Random".into()))
        );
    }

    #[test]
    fn descending_is_lexicographical() {
        let perms = collect(&["a", "b", "c"], Order::Descending, 0);
        assert_eq!(
            perms,
            [
                ["a", "b", "c"],
                ["a", "c", "b"],
                ["b", "a", "c"],
                ["b", "c", "a"],
                ["c", "a", "b"],
                ["c", "b", "a"],
            ]
        );
    }

    #[test]
    fn ascending_is_reverse_lexicographical() {
        // "ascending" visits ranks from the top down, so this is the reverse of the above
        let mut perms = collect(&["a", "b", "c"], Order::Ascending, 0);
        assert_eq!(perms[0], ["c", "b", "a"]);
        perms.reverse();
        assert_eq!(perms, collect(&["a", "b", "c"], Order::Descending, 0));
    }

    #[test]
    fn every_order_covers_all_permutations() {
        let items: Vec<char> = "wxyz!".chars().collect();
        let expected: HashSet<Vec<char>> = collect(&items, Order::Descending, 0)
            .into_iter()
            .collect();
        assert_eq!(expected.len(), 120);

        for order in Order::ALL {
            let perms = collect(&items, order, 17);
            assert_eq!(perms.len(), 120, "{order}");
            let distinct: HashSet<Vec<char>> = perms.into_iter().collect();
            assert_eq!(distinct, expected, "{order}");
        }
    }

    #[test]
    fn random_never_repeats() {
        let mut rng = TinyRng::seed_from_u64(1234);
        for n in [4usize, 5] {
            let items: Vec<usize> = (0..n).collect();
            for _ in 0..10 {
                let mut seen = HashSet::new();
                for perm in Permutations::with_rng(&items, Order::Random, &mut rng) {
                    assert!(seen.insert(perm));
                }
                assert_eq!(BigUint::from(seen.len()), factorial(n));
            }
        }
    }

    #[test]
    fn random_first_permutation_is_uniform() {
        let mut rng = TinyRng::seed_from_u64(2024);
        let items = [0u8, 1, 2];
        let all = collect(&items, Order::Descending, 0);

        let trials = 6000;
        let mut counts = [0usize; 6];
        for _ in 0..trials {
            let first = Permutations::with_rng(&items, Order::Random, &mut rng)
                .next()
                .unwrap();
            let slot = all.iter().position(|p| *p == first).unwrap();
            counts[slot] += 1;
        }

        let expected = trials as f64 / 6.0;
        let chi_square: f64 = counts
            .iter()
            .map(|&c| (c as f64 - expected).powi(2) / expected)
            .sum();
        // 5 degrees of freedom, p = 0.001
        assert!(chi_square < 20.52, "{counts:?} chi^2 = {chi_square}");
    }

    #[test]
    fn trivial_sequences() {
        let empty: [u32; 0] = [];
        let single = ["x"];
        for order in Order::ALL {
            let perms = collect(&empty, order, 3);
            assert_eq!(perms, [Vec::<u32>::new()]);

            let perms = collect(&single, order, 3);
            assert_eq!(perms, [["x"]]);
        }
    }

    #[derive(Debug)]
    struct Counted {
        clones: Rc<Cell<usize>>,
    }

    impl Clone for Counted {
        fn clone(&self) -> Self {
            self.clones.set(self.clones.get() + 1);
            Self {
                clones: self.clones.clone(),
            }
        }
    }

    #[test]
    fn stopping_early_skips_remaining_work() {
        let clones = Rc::new(Cell::new(0));
        let items: Vec<Counted> = (0..6)
            .map(|_| Counted {
                clones: clones.clone(),
            })
            .collect();
        // `Rc::clone` above does not go through `Counted::clone`
        assert_eq!(clones.get(), 0);

        for order in Order::ALL {
            clones.set(0);
            let mut perms = Permutations::with_rng(&items, order, &mut TinyRng::seed_from_u64(9));
            let taken = perms.by_ref().take(4).count();
            assert_eq!(taken, 4);
            assert_eq!(clones.get(), 4 * 6, "{order}");
            assert_eq!(perms.remaining(), BigUint::from(720u32 - 4));
        }
    }

    #[test]
    fn deck_sized_traversals_are_lazy() {
        let deck: Vec<u8> = (0..52).collect();
        for order in Order::ALL {
            let perms: Vec<Vec<u8>> =
                Permutations::with_rng(&deck, order, &mut TinyRng::seed_from_u64(52))
                    .take(3)
                    .collect();
            assert_eq!(perms.len(), 3);
            for perm in &perms {
                let mut sorted = perm.clone();
                sorted.sort_unstable();
                assert_eq!(sorted, deck);
            }
        }

        let mut down = Permutations::with_rng(&deck, Order::Descending, &mut TinyRng::default());
        assert_eq!(down.next().unwrap(), deck);
        assert_eq!(down.size_hint(), (usize::MAX, None));
    }

    #[test]
    fn traversals_do_not_share_state() {
        let items = ['p', 'q', 'r', 's'];
        let mut rng = TinyRng::seed_from_u64(77);
        let mut a = Permutations::with_rng(&items, Order::Random, &mut rng);
        let mut b = Permutations::with_rng(&items, Order::Descending, &mut rng);
        let mut seen_a = HashSet::new();
        for _ in 0..24 {
            assert!(seen_a.insert(a.next().unwrap()));
            b.next().unwrap();
        }
        assert_eq!(a.next(), None);
        assert_eq!(b.next(), None);
    }

    #[test]
    fn next_into_reuses_buffer() {
        let items = [1, 2, 3];
        let mut perms = Permutations::with_rng(&items, Order::Descending, &mut TinyRng::default());
        let mut buf = Vec::with_capacity(3);
        let mut all = Vec::new();
        while perms.next_into(&mut buf) {
            all.push(buf.clone());
        }
        assert_eq!(all, collect(&items, Order::Descending, 0));
        assert_eq!(buf, [3, 2, 1]);
        assert!(!perms.next_into(&mut buf));
    }

    #[test]
    fn custom_indices() {
        let items = ["a", "b", "c"];
        let mut rng = TinyRng::seed_from_u64(4);
        let cycle = RandomCycle::with_selection(
            items.len(),
            &mut rng,
            IncrementSelection::Fixed(1u32.into()),
        )
        .unwrap();
        let start = cycle.start().clone();
        let perms: Vec<Vec<&str>> = Permutations::with_indices(&items, cycle).collect();

        let lexicographical = collect(&items, Order::Descending, 0);
        let offset = lexicographical
            .iter()
            .position(|p| *p == perms[0])
            .unwrap();
        assert_eq!(BigUint::from(offset), start);
        for (k, perm) in perms.iter().enumerate() {
            assert_eq!(*perm, lexicographical[(offset + k) % 6]);
        }
    }

    #[cfg(feature = "getrandom")]
    #[test]
    fn os_rng_random_traversal() {
        let deck: Vec<u8> = (0..52).collect();
        let mut perms = Permutations::with_rng(&deck, Order::Random, &mut rand_core::OsRng);
        let first = perms.next().unwrap();
        let mut sorted = first.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, deck);

        // two independent 52-card traversals start on the same shuffle with probability 1 / 52!
        let a = permute(&deck, Order::Random).next().unwrap();
        let b = permute(&deck, Order::Random).next().unwrap();
        assert_ne!(a, b);
        assert_ne!(a, first);
    }

    #[cfg(feature = "getrandom")]
    #[test]
    fn entropy_seeded_permute() {
        let items = [10, 20, 30, 40];
        for order in Order::ALL {
            let perms: HashSet<Vec<i32>> = permute(&items, order).collect();
            assert_eq!(perms.len(), 24);
        }
        assert_eq!(permute(&[] as &[i32], Order::Random).count(), 1);
    }
}
