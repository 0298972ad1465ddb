//! Unbalanced set-union merges.
//!
//! The textbook union of two sorted ranges compares the two heads and advances
//! one element at a time. When one input is much larger than the other, or the
//! inputs interleave in long runs, almost all of those comparisons are wasted:
//! the answer is "keep taking from the same side".
//!
//! The unbalanced union instead alternates two biased searches. It takes the
//! head of the second range as a pivot, searches the first range for the end of
//! the run ordered before it and copies that whole run at once, then swaps
//! roles. Equivalent heads are collapsed by skipping the element of the second
//! range, so the element of the first range always wins.
//!
//! The same loop drives two back ends:
//!
//! - [`set_union_unbalanced_into`]: clones from two borrowed slices into a
//!   `Vec` with `extend_from_slice`, which is a flat `memcpy` for `Copy` types.
//! - the in-place bulk insertion in [`tail`], which relocates elements inside a
//!   single buffer, running back to front.
//!
//! # Examples
//!
//! ```rust
//! use flat_containers::compare::Less;
//! use flat_containers::merge::set_union_unbalanced;
//!
//! let existing = [1, 2, 3, 6, 7];
//! let incoming = [4, 6];
//! assert_eq!(set_union_unbalanced(&existing, &incoming, &Less), vec![1, 2, 3, 4, 6, 7]);
//! ```

pub(crate) mod tail;

use std::ops::Range;

use crate::compare::Comparator;
use crate::search::PartitionPoints;

/// Message used when a function requiring sorted, deduplicated input detects
/// a violation in a debug build.
pub(crate) const SORTED_INVARIANT_PANIC_MESSAGE: &str =
    "input must be strictly increasing under the comparator (sorted + deduplicated)";

/// Returns the sorted union of two sorted, duplicate-free slices.
///
/// See [`set_union_unbalanced_into`].
#[must_use]
pub fn set_union_unbalanced<T, C>(first: &[T], second: &[T], comparator: &C) -> Vec<T>
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    let mut out = Vec::with_capacity(first.len() + second.len());
    set_union_unbalanced_into(first, second, &mut out, comparator);
    out
}

/// Appends the sorted union of `first` and `second` to `out`.
///
/// Both inputs must be sorted by `comparator` and free of equivalent
/// neighbours. When an element of `first` is equivalent to one of `second`,
/// only the element of `first` is kept.
///
/// Returns the number of elements appended, which is at most
/// `first.len() + second.len()`.
///
/// # Panics
///
/// In debug builds, panics if either input is not strictly increasing.
///
/// # Complexity
///
/// `O(r log(n / r))` comparisons for `r` alternating runs over inputs of total
/// length `n`, plus `O(n)` for the clones.
pub fn set_union_unbalanced_into<T, C>(
    first: &[T],
    second: &[T],
    out: &mut Vec<T>,
    comparator: &C,
) -> usize
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    debug_assert!(
        is_strictly_sorted_by(first, comparator),
        "{}",
        SORTED_INVARIANT_PANIC_MESSAGE
    );
    debug_assert!(
        is_strictly_sorted_by(second, comparator),
        "{}",
        SORTED_INVARIANT_PANIC_MESSAGE
    );

    let start = out.len();
    out.reserve(first.len() + second.len());

    let mut sides = CloneSides {
        first,
        second,
        out,
        comparator,
    };
    let (first_rest, second_rest) = union_intersecting_parts(&mut sides);
    let out = sides.out;
    out.extend_from_slice(&first[first_rest..]);
    out.extend_from_slice(&second[second_rest..]);

    out.len() - start
}

/// Sorts `slice` and moves one representative of every equivalence class to
/// the front, returning the length of that unique prefix.
///
/// The sort is stable, so the representative is the first occurrence in the
/// input order. Elements after the returned length are the discarded
/// duplicates in unspecified order.
///
/// # Examples
///
/// ```rust
/// use flat_containers::compare::Less;
/// use flat_containers::merge::sort_and_unique;
///
/// let mut values = vec![3, 1, 3, 2, 1];
/// let unique = sort_and_unique(&mut values, &Less);
/// values.truncate(unique);
/// assert_eq!(values, vec![1, 2, 3]);
/// ```
pub fn sort_and_unique<T, C>(slice: &mut [T], comparator: &C) -> usize
where
    C: Comparator<T> + ?Sized,
{
    slice.sort_by(|left, right| crate::compare::ordering(comparator, left, right));
    unique_sorted(slice, comparator)
}

/// In-place form of [`sort_and_unique`] that never allocates.
///
/// The sort is unstable, so which member of an equivalence class survives is
/// unspecified.
pub(crate) fn sort_unstable_and_unique<T, C>(slice: &mut [T], comparator: &C) -> usize
where
    C: Comparator<T> + ?Sized,
{
    slice.sort_unstable_by(|left, right| crate::compare::ordering(comparator, left, right));
    unique_sorted(slice, comparator)
}

/// Moves the first element of every run of equivalent neighbours to the front
/// of a sorted slice and returns how many there are.
fn unique_sorted<T, C>(slice: &mut [T], comparator: &C) -> usize
where
    C: Comparator<T> + ?Sized,
{
    let mut unique = 0;
    for read in 0..slice.len() {
        // Sorted neighbours are equivalent exactly when the earlier one is not
        // ordered before the later one.
        if unique == 0 || comparator.less(&slice[unique - 1], &slice[read]) {
            slice.swap(unique, read);
            unique += 1;
        }
    }
    unique
}

/// Returns `true` if every element is ordered strictly before its successor.
pub(crate) fn is_strictly_sorted_by<T, C>(slice: &[T], comparator: &C) -> bool
where
    C: Comparator<T> + ?Sized,
{
    slice
        .windows(2)
        .all(|window| comparator.less(&window[0], &window[1]))
}

/// Two sorted inputs and an output, addressed by position.
///
/// Positions are logical: a back end may map them onto reversed or partially
/// relocated storage. `take_*` receive runs in increasing position order and
/// each position is consumed exactly once, by a take or by `drop_second`.
pub(crate) trait UnionSides {
    fn first_len(&self) -> usize;

    fn second_len(&self) -> usize;

    /// `first[first]` is ordered before `second[second]`.
    fn first_before(&self, first: usize, second: usize) -> bool;

    /// `second[second]` is ordered before `first[first]`.
    fn second_before(&self, second: usize, first: usize) -> bool;

    fn take_first(&mut self, run: Range<usize>);

    fn take_second(&mut self, run: Range<usize>);

    /// Discards `second[index]`, which is equivalent to the current head of
    /// the first input.
    fn drop_second(&mut self, index: usize);
}

/// Merges while both inputs are non-empty.
///
/// Returns the positions where each input stopped; at least one of them is at
/// its end. The caller decides what to do with the untouched remainder.
pub(crate) fn union_intersecting_parts<S: UnionSides>(sides: &mut S) -> (usize, usize) {
    let first_len = sides.first_len();
    let second_len = sides.second_len();
    let mut first_points = PartitionPoints::new(first_len);
    let mut second_points = PartitionPoints::new(second_len);
    let mut first = 0;
    let mut second = 0;

    while first < first_len && second < second_len {
        let run_end = first_points.next_by(|index| sides.first_before(index, second));
        if run_end > first {
            sides.take_first(first..run_end);
            first = run_end;
        }
        if first == first_len {
            break;
        }

        let run_end = second_points.next_by(|index| sides.second_before(index, first));
        if run_end > second {
            sides.take_second(second..run_end);
            second = run_end;
        }
        if second == second_len {
            break;
        }

        // Neither head is ordered before the other: they are equivalent.
        if !sides.first_before(first, second) {
            sides.drop_second(second);
            second_points.skip();
            second += 1;
        }
    }

    (first, second)
}

struct CloneSides<'a, T, C: ?Sized> {
    first: &'a [T],
    second: &'a [T],
    out: &'a mut Vec<T>,
    comparator: &'a C,
}

impl<T, C> UnionSides for CloneSides<'_, T, C>
where
    T: Clone,
    C: Comparator<T> + ?Sized,
{
    #[inline]
    fn first_len(&self) -> usize {
        self.first.len()
    }

    #[inline]
    fn second_len(&self) -> usize {
        self.second.len()
    }

    #[inline]
    fn first_before(&self, first: usize, second: usize) -> bool {
        self.comparator.less(&self.first[first], &self.second[second])
    }

    #[inline]
    fn second_before(&self, second: usize, first: usize) -> bool {
        self.comparator.less(&self.second[second], &self.first[first])
    }

    #[inline]
    fn take_first(&mut self, run: Range<usize>) {
        self.out.extend_from_slice(&self.first[run]);
    }

    #[inline]
    fn take_second(&mut self, run: Range<usize>) {
        self.out.extend_from_slice(&self.second[run]);
    }

    #[inline]
    fn drop_second(&mut self, _index: usize) {}
}
