//! A sparse set of non-negative integers backed by a windowed, word-packed
//! bit vector.
//!
//! Members are stored as bits in a contiguous run of [`Word`]s. The run only
//! spans the words between the smallest and the largest member (the
//! *window*), so memory and the cost of whole-set operations follow the
//! populated range rather than the largest value ever inserted.
//!
//! ```
//! use wordset::Set;
//!
//! let a = Set::from_range(0..100);
//! let mut b = Set::from([0, 200]);
//! b.insert_range(50..150);
//!
//! let s = &a ^ &b;
//! assert_eq!(s, &(&a | &b) - &(&a & &b));
//! assert_eq!(s.to_string(), "{1..49, 100..149, 200}");
//! ```

mod error;
mod fmt;
mod iter;
mod ops;
#[cfg(feature = "serde")]
mod serde;
mod set;
mod window;
pub mod word;

#[cfg(test)]
mod tests_btree;

pub use error::{Error, Result};
pub use iter::{Iter, Runs};
pub use set::Set;

/// The unsigned machine word a set is packed into.
pub type Word = u64;

/// Number of bits in a [`Word`].
pub const BITS_PER_WORD: u32 = Word::BITS;

/// The largest integer a [`Set`] can hold.
pub const MAX_INT: usize = usize::MAX;

/// The smallest power of two strictly greater than `n`.
///
/// Returns 1 for `n == 0` and [`MAX_INT`] if the power of two is not
/// representable.
pub fn next_pow2(n: usize) -> usize {
    if n == 0 {
        return 1;
    }

    let k = (usize::BITS - 1 - n.leading_zeros()) + 1;
    if k < usize::BITS {
        1 << k
    } else {
        MAX_INT
    }
}

/// Allocation size for a buffer that held `had` slots and now needs `want`.
///
/// Small steps round up to the next power of two so that repeated growth
/// costs amortized O(1) per slot; a single jump past that is sized exactly.
pub fn grow_size(want: usize, had: usize) -> usize {
    want.max(next_pow2(had))
}
