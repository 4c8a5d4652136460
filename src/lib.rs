//! Lazy permutations of arbitrary-length sequences.
//!
//! Permutations are produced one at a time in ascending, descending or random order, without
//! materializing the `n!` permutations of an `n`-element sequence. A random traversal yields every
//! permutation exactly once.
//!
//! The core is a bijection between the ranks `0..n!` and the permutations of `0..n` (see
//! [`factoradic`]), driven by one of the rank traversals in [`indices`].
//!
//! ```
//! use lazyperm::perm::{Order, Permutations};
//! use lazyperm::rand::TinyRng;
//! use rand_core::SeedableRng;
//!
//! let items = ["a", "b", "c"];
//! let mut perms = Permutations::with_rng(&items, Order::Descending, &mut TinyRng::default());
//! assert_eq!(perms.next().unwrap(), ["a", "b", "c"]);
//! assert_eq!(perms.next().unwrap(), ["a", "c", "b"]);
//!
//! let mut rng = TinyRng::seed_from_u64(1);
//! let shuffles: Vec<Vec<&str>> = Permutations::with_rng(&items, Order::Random, &mut rng)
//!     .take(2)
//!     .collect();
//! assert_ne!(shuffles[0], shuffles[1]);
//! ```

#![warn(missing_docs)]

pub mod bignum;
pub mod error;
pub mod factoradic;
pub mod indices;
pub mod perm;
pub mod rand;

pub use error::{Error, Result};
#[cfg(feature = "getrandom")]
pub use perm::permute;
pub use perm::{Order, Permutations};
