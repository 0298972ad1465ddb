//! Biased partition-point searches.
//!
//! All searches in this module answer the same question as
//! [`slice::partition_point`]: given a range partitioned by a monotone
//! predicate (true on a prefix, false on the rest), where does the predicate
//! switch to false? They differ in *where they look first*.
//!
//! A classic binary search always pays `O(log n)` probes. The searches here are
//! biased toward the front of the range: a few linear probes, then galloping
//! (steps 1, 2, 4, 8, ...) bounded by a known-false position. The cost is
//! `O(log d)` where `d` is the distance from the start of the range to the
//! answer, never worse than `O(log n)`.
//!
//! - [`partition_point_biased`]: one-shot biased search.
//! - [`partition_point_hinted`]: probes a caller-supplied position first and
//!   searches outward from it.
//! - [`PartitionPoints`]: a stateful search for a series of queries whose
//!   answers never decrease; it carries a sentinel across calls.
//! - [`LowerBounds`]: [`PartitionPoints`] bound to a comparator.
//!
//! # Examples
//!
//! ```rust
//! use flat_containers::compare::Less;
//! use flat_containers::search::{lower_bound_biased, upper_bound_biased};
//!
//! let values = [1, 3, 3, 3, 7, 9];
//! assert_eq!(lower_bound_biased(&values, &3, &Less), 1);
//! assert_eq!(upper_bound_biased(&values, &3, &Less), 4);
//! ```

mod partition_points;

pub use partition_points::{LowerBounds, PartitionPoints};

use crate::compare::{Comparator, less_than, not_greater_than};

/// Number of leading elements checked one by one before galloping.
pub const LINEAR_PROBES: usize = 4;

/// Ranges of at most this length are searched linearly.
pub const LINEAR_SEARCH_THRESHOLD: usize = 5;

/// Returns the index of the first element for which `predicate` is false.
///
/// `slice` must be partitioned by `predicate`. Returns `slice.len()` when the
/// predicate holds everywhere and `0` when it holds nowhere.
///
/// # Complexity
///
/// `O(log d)` predicate calls, where `d` is the returned index.
///
/// # Examples
///
/// ```rust
/// use flat_containers::search::partition_point_biased;
///
/// let values = [2, 4, 6, 7, 9, 11, 13];
/// assert_eq!(partition_point_biased(&values, |value| value % 2 == 0), 3);
/// ```
#[inline]
pub fn partition_point_biased<T, P>(slice: &[T], mut predicate: P) -> usize
where
    P: FnMut(&T) -> bool,
{
    biased_by(slice.len(), |index| predicate(&slice[index]))
}

/// Like [`partition_point_biased`], but probes `hint` first.
///
/// When the predicate holds at `hint` the answer lies after it and a forward
/// biased search runs from `hint + 1`; otherwise a backward biased search runs
/// from `hint` toward the front. A hint past the end is clamped to
/// `slice.len()`. The result never depends on the hint, only the cost does.
///
/// # Examples
///
/// ```rust
/// use flat_containers::search::partition_point_hinted;
///
/// let values = [1, 2, 3, 4, 5, 6, 7, 8];
/// for hint in 0..=values.len() + 1 {
///     assert_eq!(partition_point_hinted(&values, hint, |value| *value < 6), 5);
/// }
/// ```
pub fn partition_point_hinted<T, P>(slice: &[T], hint: usize, mut predicate: P) -> usize
where
    P: FnMut(&T) -> bool,
{
    let hint = hint.min(slice.len());

    if hint < slice.len() && predicate(&slice[hint]) {
        let after = hint + 1;
        return after + biased_by(slice.len() - after, |index| predicate(&slice[after + index]));
    }

    // The predicate is false at `hint` (or `hint` is the end): walk backward
    // over the falses. On the reversed prefix they form the true-prefix of the
    // negated predicate.
    hint - biased_by(hint, |index| !predicate(&slice[hint - 1 - index]))
}

/// First position whose element is not ordered before `value`.
#[inline]
pub fn lower_bound_biased<T, C>(slice: &[T], value: &T, comparator: &C) -> usize
where
    C: Comparator<T> + ?Sized,
{
    partition_point_biased(slice, less_than(comparator, value))
}

/// First position whose element is ordered after `value`.
#[inline]
pub fn upper_bound_biased<T, C>(slice: &[T], value: &T, comparator: &C) -> usize
where
    C: Comparator<T> + ?Sized,
{
    partition_point_biased(slice, not_greater_than(comparator, value))
}

/// [`lower_bound_biased`] starting from `hint`.
#[inline]
pub fn lower_bound_hinted<T, C>(slice: &[T], hint: usize, value: &T, comparator: &C) -> usize
where
    C: Comparator<T> + ?Sized,
{
    partition_point_hinted(slice, hint, less_than(comparator, value))
}

/// [`upper_bound_biased`] starting from `hint`.
#[inline]
pub fn upper_bound_hinted<T, C>(slice: &[T], hint: usize, value: &T, comparator: &C) -> usize
where
    C: Comparator<T> + ?Sized,
{
    partition_point_hinted(slice, hint, not_greater_than(comparator, value))
}

/// Biased search over the index range `[0, len)`.
///
/// The searches are written against an index probe rather than a slice so that
/// the same code serves reversed views and storage that is being relocated.
pub(crate) fn biased_by<P>(len: usize, mut predicate: P) -> usize
where
    P: FnMut(usize) -> bool,
{
    if len <= LINEAR_SEARCH_THRESHOLD {
        return (0..len).find(|&index| !predicate(index)).unwrap_or(len);
    }

    let mut first = 0;
    while first < LINEAR_PROBES {
        if !predicate(first) {
            return first;
        }
        first += 1;
    }

    let middle = first + (len - first) / 2;
    if predicate(middle) {
        binary_by(middle + 1, len, predicate)
    } else {
        gallop_by(first, middle, predicate)
    }
}

/// Galloping search over `[first, last]`.
///
/// Precondition: the predicate is false at `last`, or `last` is the end of the
/// range. `last` itself is never probed.
pub(crate) fn gallop_by<P>(mut first: usize, last: usize, mut predicate: P) -> usize
where
    P: FnMut(usize) -> bool,
{
    debug_assert!(first <= last);

    for _ in 0..LINEAR_PROBES {
        if first == last || !predicate(first) {
            return first;
        }
        first += 1;
    }

    let mut step = 1;
    loop {
        let probe = first + step;
        if probe >= last {
            return binary_by(first, last, predicate);
        }
        if !predicate(probe) {
            return binary_by(first, probe, predicate);
        }
        first = probe + 1;
        step <<= 1;
    }
}

/// Standard logarithmic partition point over `[first, last)`.
pub(crate) fn binary_by<P>(mut first: usize, mut last: usize, mut predicate: P) -> usize
where
    P: FnMut(usize) -> bool,
{
    while first < last {
        let middle = first + (last - first) / 2;
        if predicate(middle) {
            first = middle + 1;
        } else {
            last = middle;
        }
    }
    first
}
