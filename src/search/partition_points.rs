//! Sentinel-carrying searches for monotone query sequences.

use super::gallop_by;
use crate::compare::{Comparator, less_than};

/// A partition-point search that remembers where the previous query ended.
///
/// Built for a series of queries over the same range whose answers never
/// decrease, as happens while merging two sorted ranges: each search starts at
/// the previous answer instead of at the front of the range.
///
/// Besides the start of the unresolved range, the search keeps a *sentinel*: a
/// position halfway between the start and the end. Probing the sentinel first
/// tells whether the next answer lies in the near half (gallop from the start,
/// bounded by the sentinel) or beyond it (advance past the sentinel and halve
/// the remaining distance). The sentinel survives between calls, so a run of
/// short queries pays for the halving only once.
///
/// # Examples
///
/// ```rust
/// use flat_containers::search::PartitionPoints;
///
/// let values = [1, 2, 4, 8, 16, 32, 64, 128];
/// let mut points = PartitionPoints::new(values.len());
///
/// assert_eq!(points.next(&values, |value| *value < 3), 2);
/// assert_eq!(points.next(&values, |value| *value < 20), 5);
/// assert_eq!(points.next(&values, |value| *value < 1000), 8);
/// assert!(points.is_exhausted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPoints {
    first: usize,
    sentinel: usize,
    last: usize,
}

impl PartitionPoints {
    /// Creates a search over the index range `[0, len)`.
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self {
            first: 0,
            sentinel: len / 2,
            last: len,
        }
    }

    /// Start of the unresolved range (the previous answer).
    #[inline]
    pub const fn first(&self) -> usize {
        self.first
    }

    /// Returns `true` once the search has reached the end of the range.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        self.first == self.last
    }

    /// Searches `slice` for the partition point of `predicate`, starting at the
    /// previous answer.
    ///
    /// `slice` must be the range this search was created for, and the answer
    /// must not lie before the previous one.
    #[inline]
    pub fn next<T, P>(&mut self, slice: &[T], mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        debug_assert_eq!(slice.len(), self.last);
        self.next_by(|index| predicate(&slice[index]))
    }

    /// Index-probing form of [`next`](Self::next).
    ///
    /// `predicate` is only ever called with indices in `[first(), len)`.
    pub fn next_by<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(usize) -> bool,
    {
        if self.first == self.last {
            return self.last;
        }
        if !predicate(self.first) {
            return self.first;
        }
        self.first += 1;
        if self.sentinel < self.first {
            self.update_sentinel();
        }

        while self.sentinel < self.last && predicate(self.sentinel) {
            self.first = self.sentinel + 1;
            self.update_sentinel();
        }

        self.first = gallop_by(self.first, self.sentinel, predicate);
        self.first
    }

    /// Marks the element at [`first()`](Self::first) as consumed without
    /// searching.
    ///
    /// Used by the union merge when it drops a duplicate: the element must not
    /// be probed again.
    #[inline]
    pub fn skip(&mut self) {
        debug_assert!(self.first < self.last);
        self.first += 1;
    }

    fn update_sentinel(&mut self) {
        self.sentinel = self.first + (self.last - self.first) / 2;
    }
}

/// Successive lower-bound queries over one sorted slice.
///
/// Values passed to [`next`](Self::next) must be non-decreasing under the
/// comparator.
///
/// # Examples
///
/// ```rust
/// use flat_containers::compare::Less;
/// use flat_containers::search::LowerBounds;
///
/// let values = [10, 20, 30, 40, 50];
/// let mut bounds = LowerBounds::new(&values, &Less);
/// assert_eq!(bounds.next(&15), 1);
/// assert_eq!(bounds.next(&40), 3);
/// assert_eq!(bounds.next(&99), 5);
/// ```
#[derive(Debug)]
pub struct LowerBounds<'a, T, C: ?Sized> {
    slice: &'a [T],
    comparator: &'a C,
    points: PartitionPoints,
}

impl<'a, T, C> LowerBounds<'a, T, C>
where
    C: Comparator<T> + ?Sized,
{
    /// Creates a lower-bound search over `slice`.
    #[must_use]
    pub const fn new(slice: &'a [T], comparator: &'a C) -> Self {
        Self {
            slice,
            comparator,
            points: PartitionPoints::new(slice.len()),
        }
    }

    /// First position at or after the previous answer whose element is not
    /// ordered before `value`.
    #[inline]
    pub fn next(&mut self, value: &T) -> usize {
        self.points.next(self.slice, less_than(self.comparator, value))
    }
}
