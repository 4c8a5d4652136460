//! Error type shared by the fallible entry points.
use thiserror::Error;

/// Errors produced when setting up a permutation traversal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The name does not match any traversal order.
    #[error("unknown permutation order `{0}`, expected `ascending`, `descending` or `random`")]
    UnknownOrder(String),
    /// A sequence length was negative.
    #[error("sequence length must not be negative, got {0}")]
    NegativeLength(String),
    /// A sequence length does not fit into `usize`.
    #[error("sequence length {0} is too large")]
    LengthOverflow(String),
    /// A fixed increment shares a factor with the number of permutations.
    #[error("increment {increment} is not coprime to {modulus}")]
    IncrementNotCoprime {
        /// The rejected increment.
        increment: String,
        /// The number of permutations it was checked against.
        modulus: String,
    },
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;
