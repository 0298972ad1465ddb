//! In-place bulk insertion into a sorted buffer.
//!
//! Incoming elements are staged at the end of the buffer, sorted and
//! deduplicated there, and then merged with the existing prefix *backward*
//! into the spare capacity, so no second buffer is ever allocated:
//!
//! ```text
//! staged:   [ existing (n) | staged (u) | spare (u) ]
//! moved:    [ existing (n) |  spare (u) | staged (u) ]
//! merging:  [ existing rest |   gap   | merged output | unread staged ]
//!                                      ^ write         ^ n + u
//! done:     [ existing rest | merged output ]
//! ```
//!
//! The merge is the unbalanced union of the parent module run on reversed views
//! with an inverted comparator. Every run it hands out is relocated with a
//! single forward `ptr::copy`, so the reverse traversal never degrades into an
//! element-by-element loop. Existing elements that are smaller than everything
//! incoming never move at all.
//!
//! If the comparator panics, the buffer is left sorted and duplicate-free: it
//! keeps every original element plus the incoming elements merged so far.
#![allow(unsafe_code)]

use std::ops::Range;
use std::ptr;

use super::{
    SORTED_INVARIANT_PANIC_MESSAGE, UnionSides, is_strictly_sorted_by, sort_unstable_and_unique,
    union_intersecting_parts,
};
use crate::compare::Comparator;

/// Inserts every element of `incoming` into the sorted, duplicate-free
/// `buffer`.
///
/// Incoming duplicates collapse to one of their members (which one is
/// unspecified), and an existing element always wins over an equivalent
/// incoming one. No memory outside the buffer's own allocation is used.
pub(crate) fn insert_range<T, C, I>(buffer: &mut Vec<T>, incoming: I, comparator: &C)
where
    C: Comparator<T> + ?Sized,
    I: IntoIterator<Item = T>,
{
    let original_len = buffer.len();
    let staging = Staging::new(buffer);
    staging.buffer.extend(incoming);

    let unique = sort_unstable_and_unique(&mut staging.buffer[original_len..], comparator);
    staging.buffer.truncate(original_len + unique);
    staging.merge(comparator);
}

/// Like [`insert_range`] for input that is already sorted and duplicate-free,
/// skipping the sort.
pub(crate) fn insert_sorted_unique<T, C>(buffer: &mut Vec<T>, mut incoming: Vec<T>, comparator: &C)
where
    C: Comparator<T> + ?Sized,
{
    debug_assert!(
        is_strictly_sorted_by(&incoming, comparator),
        "{}",
        SORTED_INVARIANT_PANIC_MESSAGE
    );

    let staging = Staging::new(buffer);
    staging.buffer.append(&mut incoming);
    staging.merge(comparator);
}

/// Owns the staged tail `[original_len, len)` until it has been merged.
///
/// Dropped while armed (an iterator, the sort or the comparator panicked), it
/// discards the staged tail so the buffer is back to its original, sorted
/// state.
struct Staging<'a, T> {
    buffer: &'a mut Vec<T>,
    original_len: usize,
    armed: bool,
}

impl<'a, T> Staging<'a, T> {
    fn new(buffer: &'a mut Vec<T>) -> Self {
        let original_len = buffer.len();
        Self {
            buffer,
            original_len,
            armed: true,
        }
    }

    fn merge<C>(mut self, comparator: &C)
    where
        C: Comparator<T> + ?Sized,
    {
        let original_len = self.original_len;
        let len = self.buffer.len();
        let staged_len = len - original_len;

        if staged_len == 0
            || original_len == 0
            || comparator.less(&self.buffer[original_len - 1], &self.buffer[original_len])
        {
            self.armed = false;
            return;
        }

        if comparator.less(&self.buffer[len - 1], &self.buffer[0]) {
            self.buffer.rotate_right(staged_len);
            self.armed = false;
            return;
        }

        self.buffer.reserve(staged_len);
        self.armed = false;
        TailMerge::new(self.buffer, original_len, comparator).run();
    }
}

impl<T> Drop for Staging<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            self.buffer.truncate(self.original_len);
        }
    }
}

/// Backward union of `existing = buffer[..existing_len]` and the staged
/// elements parked in the spare capacity at `[staged_start, staged_start +
/// staged_len)`.
///
/// While the merge runs, the vector's length is zero and this struct owns all
/// of the elements; `Drop` hands them back.
///
/// Logical positions count from the top: existing position `k` is
/// `existing_len - 1 - k` in memory, staged position `k` is
/// `staged_start + staged_len - 1 - k`.
struct TailMerge<'a, T, C: ?Sized> {
    buffer: &'a mut Vec<T>,
    base: *mut T,
    comparator: &'a C,
    existing_len: usize,
    staged_len: usize,
    staged_start: usize,
    existing_taken: usize,
    staged_taken: usize,
    /// Merged output occupies `[write, staged_start)`.
    write: usize,
}

impl<'a, T, C> TailMerge<'a, T, C>
where
    C: Comparator<T> + ?Sized,
{
    fn new(buffer: &'a mut Vec<T>, existing_len: usize, comparator: &'a C) -> Self {
        let staged_len = buffer.len() - existing_len;
        let staged_start = existing_len + staged_len;
        debug_assert!(buffer.capacity() >= staged_start + staged_len);

        // SAFETY: the length is zeroed before any element is moved so that no
        // element is dropped twice if a comparator panics; `Drop` restores it.
        // The staged elements are initialized, the destination lies entirely
        // in reserved spare capacity, and the two ranges do not overlap.
        let base = unsafe {
            buffer.set_len(0);
            let base = buffer.as_mut_ptr();
            ptr::copy_nonoverlapping(base.add(existing_len), base.add(staged_start), staged_len);
            base
        };

        Self {
            buffer,
            base,
            comparator,
            existing_len,
            staged_len,
            staged_start,
            existing_taken: 0,
            staged_taken: 0,
            write: staged_start,
        }
    }

    fn run(mut self) {
        let (_, staged_rest) = union_intersecting_parts(&mut self);
        if staged_rest < self.staged_len {
            self.take_second(staged_rest..self.staged_len);
        }
        // Unmerged existing elements are already in place; `Drop` closes the
        // gap above them.
    }

    #[inline]
    fn existing_at(&self, position: usize) -> usize {
        self.existing_len - 1 - position
    }

    #[inline]
    fn staged_at(&self, position: usize) -> usize {
        self.staged_start + self.staged_len - 1 - position
    }

    #[inline]
    fn element(&self, index: usize) -> &T {
        // SAFETY: callers only pass indices of elements that have not been
        // moved out yet: unread existing or unread staged positions.
        unsafe { &*self.base.add(index) }
    }
}

impl<T, C> UnionSides for TailMerge<'_, T, C>
where
    C: Comparator<T> + ?Sized,
{
    #[inline]
    fn first_len(&self) -> usize {
        self.existing_len
    }

    #[inline]
    fn second_len(&self) -> usize {
        self.staged_len
    }

    // Reversed views with an inverted comparator: "ordered before" on the
    // reversed view means "ordered after" in memory.
    #[inline]
    fn first_before(&self, first: usize, second: usize) -> bool {
        self.comparator.less(
            self.element(self.staged_at(second)),
            self.element(self.existing_at(first)),
        )
    }

    #[inline]
    fn second_before(&self, second: usize, first: usize) -> bool {
        self.comparator.less(
            self.element(self.existing_at(first)),
            self.element(self.staged_at(second)),
        )
    }

    fn take_first(&mut self, run: Range<usize>) {
        debug_assert_eq!(run.start, self.existing_taken);
        let count = run.len();
        let source = self.existing_len - run.end;
        let destination = self.write - count;
        // SAFETY: the run is unread and initialized. The destination starts at
        // or above the run itself (everything still unread sits below
        // `write`), so only the run may be overwritten, and `ptr::copy`
        // handles that overlap.
        unsafe {
            ptr::copy(self.base.add(source), self.base.add(destination), count);
        }
        self.write = destination;
        self.existing_taken = run.end;
    }

    fn take_second(&mut self, run: Range<usize>) {
        debug_assert_eq!(run.start, self.staged_taken);
        let count = run.len();
        let source = self.staged_start + self.staged_len - run.end;
        let destination = self.write - count;
        // SAFETY: the run is unread and initialized and lies at or above
        // `staged_start`, while the destination lies below `write <=
        // staged_start`.
        unsafe {
            ptr::copy_nonoverlapping(self.base.add(source), self.base.add(destination), count);
        }
        self.write = destination;
        self.staged_taken = run.end;
    }

    fn drop_second(&mut self, index: usize) {
        debug_assert_eq!(index, self.staged_taken);
        let position = self.staged_at(index);
        self.staged_taken = index + 1;
        // SAFETY: the element is unread and initialized; advancing
        // `staged_taken` first keeps `Drop` from touching it again.
        unsafe {
            ptr::drop_in_place(self.base.add(position));
        }
    }
}

impl<T, C: ?Sized> Drop for TailMerge<'_, T, C> {
    fn drop(&mut self) {
        let existing_rest = self.existing_len - self.existing_taken;
        let merged = self.staged_start - self.write;
        let staged_rest = self.staged_len - self.staged_taken;

        // SAFETY: `[0, existing_rest)` and `[write, staged_start)` hold the
        // live sorted elements; every element of the output is ordered after
        // every unmerged existing element, so closing the gap keeps the buffer
        // sorted. The unread staged elements sit at `[staged_start,
        // staged_start + staged_rest)`, beyond the new length, and are dropped
        // last so a panicking destructor cannot cause a double drop.
        unsafe {
            ptr::copy(
                self.base.add(self.write),
                self.base.add(existing_rest),
                merged,
            );
            self.buffer.set_len(existing_rest + merged);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.base.add(self.staged_start),
                staged_rest,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{Inverse, Less};
    use rstest::rstest;
    use std::cell::Cell;
    use std::collections::BTreeSet;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;

    fn reference(existing: &[i32], incoming: &[i32]) -> Vec<i32> {
        existing
            .iter()
            .chain(incoming)
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    #[rstest]
    #[case::nothing_incoming(vec![1, 2, 3], vec![])]
    #[case::into_empty(vec![], vec![3, 1, 2, 1])]
    #[case::append(vec![1, 2, 3], vec![6, 5, 4])]
    #[case::prepend(vec![7, 8, 9], vec![3, 1, 2])]
    #[case::all_present(vec![1, 2, 3, 4], vec![4, 2, 2, 1])]
    #[case::interleaved(vec![1, 3, 5, 7], vec![8, 6, 4, 2, 0])]
    #[case::overlapping(vec![1, 2, 3, 6, 7], vec![6, 4, 6])]
    #[case::single_existing(vec![5], vec![5, 4, 6])]
    fn test_insert_range_matches_reference(#[case] existing: Vec<i32>, #[case] incoming: Vec<i32>) {
        let expected = reference(&existing, &incoming);
        let mut buffer = existing;
        insert_range(&mut buffer, incoming, &Less);
        assert_eq!(buffer, expected);
    }

    #[rstest]
    fn test_skewed_insert_matches_reference() {
        let existing: Vec<i32> = (0..1000).map(|value| value * 3).collect();
        let incoming: Vec<i32> = (0..25).map(|value| value * 113 % 3000).collect();
        let expected = reference(&existing, &incoming);
        let mut buffer = existing;
        insert_range(&mut buffer, incoming, &Less);
        assert_eq!(buffer, expected);
    }

    #[rstest]
    fn test_insert_range_is_idempotent() {
        let incoming = vec![9, 2, 7, 2, 11];
        let mut buffer = vec![1, 5, 9];
        insert_range(&mut buffer, incoming.clone(), &Less);
        let once = buffer.clone();
        insert_range(&mut buffer, incoming, &Less);
        assert_eq!(buffer, once);
    }

    #[rstest]
    fn test_existing_element_wins_over_incoming() {
        let by_key = |left: &(i32, &str), right: &(i32, &str)| left.0 < right.0;
        let mut buffer = vec![(1, "old"), (3, "old"), (5, "old")];
        insert_range(
            &mut buffer,
            vec![(3, "new"), (2, "new"), (5, "new"), (2, "newer")],
            &by_key,
        );
        let keys: Vec<i32> = buffer.iter().map(|entry| entry.0).collect();
        assert_eq!(keys, vec![1, 2, 3, 5]);
        assert_eq!(buffer[0].1, "old");
        assert!(matches!(buffer[1].1, "new" | "newer"));
        assert_eq!(buffer[2].1, "old");
        assert_eq!(buffer[3].1, "old");
    }

    #[rstest]
    fn test_descending_buffer_with_inverse_comparator() {
        let mut buffer = vec![9, 6, 3];
        insert_range(&mut buffer, vec![4, 10, 6, 1], &Inverse(Less));
        assert_eq!(buffer, vec![10, 9, 6, 4, 3, 1]);
    }

    #[rstest]
    fn test_insert_sorted_unique_skips_the_sort() {
        let mut buffer = vec![2, 4, 6, 8];
        insert_sorted_unique(&mut buffer, vec![1, 4, 5, 9], &Less);
        assert_eq!(buffer, vec![1, 2, 4, 5, 6, 8, 9]);
    }

    #[rstest]
    fn test_move_only_elements_are_relocated() {
        #[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
        struct Token(Box<i32>);

        let mut buffer: Vec<Token> = [1, 4, 7]
            .into_iter()
            .map(|value| Token(Box::new(value)))
            .collect();
        insert_range(
            &mut buffer,
            [7, 2, 9, 4].into_iter().map(|value| Token(Box::new(value))),
            &Less,
        );
        let values: Vec<i32> = buffer.iter().map(|token| *token.0).collect();
        assert_eq!(values, vec![1, 2, 4, 7, 9]);
    }

    #[rstest]
    fn test_every_element_is_dropped_exactly_once() {
        struct Counted {
            key: i32,
            drops: Rc<Cell<usize>>,
        }
        impl Drop for Counted {
            fn drop(&mut self) {
                self.drops.set(self.drops.get() + 1);
            }
        }
        let drops = Rc::new(Cell::new(0));
        let make = |key| Counted {
            key,
            drops: Rc::clone(&drops),
        };
        let by_key = |left: &Counted, right: &Counted| left.key < right.key;

        let mut buffer: Vec<Counted> = (0..10).map(|key| make(key * 2)).collect();
        insert_range(&mut buffer, (0..10).map(|key| make(key * 3)), &by_key);

        let keys: Vec<i32> = buffer.iter().map(|element| element.key).collect();
        assert_eq!(keys, vec![0, 2, 3, 4, 6, 8, 9, 10, 12, 14, 15, 16, 18, 21, 24, 27]);
        // 0, 6, 12 and 18 arrived twice; the incoming copies were dropped.
        assert_eq!(drops.get(), 4);

        drop(buffer);
        assert_eq!(drops.get(), 20);
    }

    #[rstest]
    fn test_panicking_comparator_leaves_a_sorted_buffer() {
        // Only panics when comparing an existing (even) against an incoming
        // (odd) value in the middle of the range, i.e. halfway through the
        // backward merge.
        let flaky = |left: &i32, right: &i32| {
            let mixed = left % 2 != right % 2;
            let middle = (20..60).contains(left) && (20..60).contains(right);
            assert!(!(mixed && middle), "comparator gave up");
            left < right
        };

        let existing: Vec<i32> = (0..50).map(|value| value * 2).collect();
        let mut buffer = existing.clone();
        let result = catch_unwind(AssertUnwindSafe(|| {
            insert_range(&mut buffer, (0..50).map(|value| value * 2 + 1), &flaky);
        }));

        assert!(result.is_err());
        assert!(buffer.windows(2).all(|window| window[0] < window[1]));
        assert!(existing.iter().all(|value| buffer.contains(value)));
        assert!(buffer.contains(&99));
        assert!(buffer.len() < 100);
    }

    #[rstest]
    fn test_panic_at_any_comparison_drops_every_element_once() {
        struct Tracked {
            key: u32,
            drops: Rc<Cell<usize>>,
        }
        impl Drop for Tracked {
            fn drop(&mut self) {
                self.drops.set(self.drops.get() + 1);
            }
        }

        for panic_at in 0..400 {
            let drops = Rc::new(Cell::new(0));
            let calls = Cell::new(0usize);
            let make = |key| Tracked {
                key,
                drops: Rc::clone(&drops),
            };
            let flaky = |left: &Tracked, right: &Tracked| {
                let call = calls.get();
                calls.set(call + 1);
                assert!(call != panic_at, "comparator gave up at call {call}");
                left.key < right.key
            };

            let mut buffer: Vec<Tracked> = (0..60).map(|key| make(key * 2)).collect();
            let incoming: Vec<Tracked> = (0..60).map(|key| make(key * 37 % 120)).collect();
            let _ = catch_unwind(AssertUnwindSafe(|| {
                insert_range(&mut buffer, incoming, &flaky);
            }));

            assert!(
                buffer.windows(2).all(|window| window[0].key < window[1].key),
                "unsorted after a panic at call {panic_at}"
            );
            assert!(buffer.len() >= 60);
            drop(buffer);
            assert_eq!(drops.get(), 120, "panic at call {panic_at}");
        }
    }

    #[rstest]
    fn test_zero_sized_elements() {
        #[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
        struct Unit;
        let mut buffer = vec![Unit];
        insert_range(&mut buffer, [Unit, Unit, Unit], &Less);
        assert_eq!(buffer.len(), 1);
    }
}
