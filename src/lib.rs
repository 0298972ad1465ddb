//! # flat-containers
//!
//! A sorted set stored in one contiguous vector, together with the search and
//! merge algorithms that make it fast to build in bulk.
//!
//! ## Overview
//!
//! - **Comparators** ([`compare`]): the strict weak ordering trait, [`Less`],
//!   [`Inverse`](compare::Inverse) and the predicate adapters the algorithms
//!   are written against.
//! - **Biased search** ([`search`]): partition-point searches that gallop from
//!   the front of a range (or from a hint), plus a sentinel-carrying search
//!   for series of non-decreasing queries.
//! - **Unbalanced union** ([`merge`]): a set-union merge that copies whole
//!   runs at a time and costs `O(r log(n / r))` comparisons for `r` runs.
//! - **Flat set** ([`flat_set`]): [`FlatSet`], a `Vec`-backed sorted set whose
//!   bulk insertion merges new elements into the buffer's own spare capacity.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`FlatSet`] as a sequence
//!
//! ## Example
//!
//! ```rust
//! use flat_containers::prelude::*;
//!
//! let mut set: FlatSet<i32> = [8, 2, 6].into();
//! set.extend([5, 2, 1]);
//! assert_eq!(set.as_slice(), &[1, 2, 5, 6, 8]);
//!
//! assert_eq!(erase_if(&mut set, |value| value % 2 == 0), 3);
//! assert_eq!(set.as_slice(), &[1, 5]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
// Note: Disabling redundant_closure_for_method_calls due to clippy 0.1.92 panic bug
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use flat_containers::prelude::*;
/// ```
pub mod prelude {
    pub use crate::compare::{Comparator, Inverse, Less};
    pub use crate::error::UnsortedInputError;
    pub use crate::flat_set::{FlatSet, erase_if};
}

pub mod compare;
pub mod error;
pub mod flat_set;
pub mod merge;
pub mod search;

pub use compare::{Comparator, Less};
pub use flat_set::{FlatSet, erase_if};
