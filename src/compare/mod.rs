//! Comparators and small predicate adapters.
//!
//! Every algorithm in this crate is expressed in terms of a strict weak
//! ordering "is `left` ordered before `right`", the same shape as C++'s
//! `operator<`. The [`Comparator`] trait captures that relation, and the
//! adapters in this module build the derived relations the search and merge
//! layers need:
//!
//! - [`Inverse`] / [`inverse_fn`]: swaps the arguments of a relation, turning an
//!   ascending order into a descending one (used by the backward merge).
//! - [`not_fn`]: negates a binary predicate (used for deduplication, where
//!   "not less" over sorted neighbours means "equivalent").
//! - [`less_than`] / [`not_greater_than`]: bind a fixed value into a unary
//!   predicate suitable for a partition-point search.
//!
//! # Transparent comparison
//!
//! A comparator is *transparent* for a key type `Q` when it implements
//! `Comparator<Q>` in addition to `Comparator<T>`. [`Less`] implements
//! `Comparator<Q>` for every `Q: Ord`, so a `FlatSet<String>` can be searched
//! with a `&str` without allocating a `String`. Closure comparators only
//! implement `Comparator<T>` for the element type they were written for and
//! therefore require a full element for lookups.
//!
//! # Examples
//!
//! ```rust
//! use flat_containers::compare::{Comparator, Inverse, Less};
//!
//! assert!(Less.less(&1, &2));
//! assert!(Inverse(Less).less(&2, &1));
//!
//! let by_length = |left: &&str, right: &&str| left.len() < right.len();
//! assert!(by_length.less(&"a", &"abc"));
//! ```

use std::cmp::Ordering;

/// A strict weak ordering over `T`.
///
/// `less(left, right)` must be irreflexive and transitive, and equivalence
/// (`!less(a, b) && !less(b, a)`) must be transitive. Violating these rules is
/// a logic error: results are unspecified but memory safety is preserved.
pub trait Comparator<T: ?Sized> {
    /// Returns `true` if `left` is ordered strictly before `right`.
    fn less(&self, left: &T, right: &T) -> bool;
}

impl<T, F> Comparator<T> for F
where
    T: ?Sized,
    F: Fn(&T, &T) -> bool,
{
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        self(left, right)
    }
}

/// The natural `<` ordering.
///
/// `Less` is transparent: it compares any `Ord` type, so lookups may use a
/// borrowed key form of the element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Less;

impl<T: Ord + ?Sized> Comparator<T> for Less {
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        left < right
    }
}

/// A comparator with its arguments swapped.
///
/// `Inverse(Less)` orders elements descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Inverse<C>(pub C);

impl<T: ?Sized, C: Comparator<T>> Comparator<T> for Inverse<C> {
    #[inline]
    fn less(&self, left: &T, right: &T) -> bool {
        self.0.less(right, left)
    }
}

/// Wraps `comparator` in [`Inverse`].
#[inline]
pub const fn inverse_fn<C>(comparator: C) -> Inverse<C> {
    Inverse(comparator)
}

/// Negates a binary predicate.
///
/// # Examples
///
/// ```rust
/// use flat_containers::compare::{not_fn, Less, Comparator};
///
/// let mut not_less = not_fn(|left: &i32, right: &i32| Less.less(left, right));
/// assert!(not_less(&2, &2));
/// assert!(!not_less(&1, &2));
/// ```
#[inline]
pub fn not_fn<T: ?Sized, U: ?Sized>(
    mut predicate: impl FnMut(&T, &U) -> bool,
) -> impl FnMut(&T, &U) -> bool {
    move |left, right| !predicate(left, right)
}

/// Binds `value` into the unary predicate `element < value`.
///
/// A slice sorted by `comparator` is partitioned by this predicate; its
/// partition point is the lower bound of `value`.
#[inline]
pub fn less_than<'a, T: ?Sized, C: Comparator<T> + ?Sized>(
    comparator: &'a C,
    value: &'a T,
) -> impl FnMut(&T) -> bool + 'a {
    move |element| comparator.less(element, value)
}

/// Binds `value` into the unary predicate `!(value < element)`.
///
/// The partition point of this predicate is the upper bound of `value`.
#[inline]
pub fn not_greater_than<'a, T: ?Sized, C: Comparator<T> + ?Sized>(
    comparator: &'a C,
    value: &'a T,
) -> impl FnMut(&T) -> bool + 'a {
    move |element| !comparator.less(value, element)
}

/// Derives a total [`Ordering`] from a strict weak ordering.
///
/// Equivalent elements compare `Equal`, which makes the result usable with
/// `sort_by` and `binary_search_by`.
#[inline]
pub fn ordering<T: ?Sized, C: Comparator<T> + ?Sized>(
    comparator: &C,
    left: &T,
    right: &T,
) -> Ordering {
    if comparator.less(left, right) {
        Ordering::Less
    } else if comparator.less(right, left) {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// Returns `true` when neither element is ordered before the other.
#[inline]
pub fn equivalent<T: ?Sized, C: Comparator<T> + ?Sized>(
    comparator: &C,
    left: &T,
    right: &T,
) -> bool {
    !comparator.less(left, right) && !comparator.less(right, left)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::smaller(1, 2, true)]
    #[case::equal(2, 2, false)]
    #[case::greater(3, 2, false)]
    fn test_less_matches_operator(#[case] left: i32, #[case] right: i32, #[case] expected: bool) {
        assert_eq!(Less.less(&left, &right), expected);
    }

    #[rstest]
    fn test_less_is_transparent_over_borrowed_forms() {
        let owned = String::from("apple");
        assert!(Comparator::<str>::less(&Less, owned.as_str(), "banana"));
    }

    #[rstest]
    fn test_inverse_swaps_arguments() {
        let descending = inverse_fn(Less);
        assert!(descending.less(&5, &3));
        assert!(!descending.less(&3, &5));
        assert!(!descending.less(&4, &4));
    }

    #[rstest]
    fn test_double_inverse_is_identity() {
        let comparator = Inverse(Inverse(Less));
        for (left, right) in [(1, 2), (2, 1), (3, 3)] {
            assert_eq!(comparator.less(&left, &right), Less.less(&left, &right));
        }
    }

    #[rstest]
    fn test_closures_are_comparators() {
        let by_abs = |left: &i32, right: &i32| left.abs() < right.abs();
        assert!(by_abs.less(&1, &-2));
        assert!(!by_abs.less(&-2, &2));
    }

    #[rstest]
    fn test_closure_references_are_comparators() {
        let by_abs = |left: &i32, right: &i32| left.abs() < right.abs();
        let by_ref = &by_abs;
        assert!(Comparator::<i32>::less(&by_ref, &1, &-2));
    }

    #[rstest]
    fn test_not_fn_negates() {
        let mut not_less = not_fn(|left: &i32, right: &i32| left < right);
        assert!(!not_less(&1, &2));
        assert!(not_less(&2, &1));
        assert!(not_less(&2, &2));
    }

    #[rstest]
    fn test_bound_predicates_partition_a_sorted_slice() {
        let values = [1, 2, 2, 2, 5, 8];
        assert_eq!(values.partition_point(less_than(&Less, &2)), 1);
        assert_eq!(values.partition_point(not_greater_than(&Less, &2)), 4);
    }

    #[rstest]
    #[case::less(1, 2, Ordering::Less)]
    #[case::equal(2, 2, Ordering::Equal)]
    #[case::greater(3, 2, Ordering::Greater)]
    fn test_ordering_is_derived_from_less(
        #[case] left: i32,
        #[case] right: i32,
        #[case] expected: Ordering,
    ) {
        assert_eq!(ordering(&Less, &left, &right), expected);
    }

    #[rstest]
    fn test_equivalence_follows_the_comparator_not_equality() {
        let by_abs = |left: &i32, right: &i32| left.abs() < right.abs();
        assert!(equivalent(&by_abs, &-3, &3));
        assert!(!equivalent(&by_abs, &-3, &4));
    }
}
