//! A sorted set stored in a single contiguous vector.
//!
//! [`FlatSet`] keeps its elements sorted and free of equivalent neighbours in
//! a `Vec<T>`. Lookups are logarithmic searches over a slice, iteration is a
//! slice walk, and the whole set is one allocation. Single insertions and
//! removals shift the tail of the vector and are therefore linear; the
//! container is meant for sets that are built in bulk and read often.
//!
//! Bulk insertion ([`FlatSet::insert_range`], [`Extend`], [`FlatSet::append`])
//! does not insert one element at a time. The incoming elements are staged at
//! the end of the buffer and merged backward into place, which costs
//! `O(n + m log m)` for `m` new elements regardless of where they land.
//!
//! # Ordering
//!
//! The order is given by a [`Comparator`], [`Less`] by default. Any
//! `Fn(&T, &T) -> bool` closure is a comparator, and [`Inverse`] turns an
//! ascending order into a descending one.
//!
//! ```rust
//! use flat_containers::FlatSet;
//! use flat_containers::compare::{Inverse, Less};
//!
//! let ascending: FlatSet<i32> = [3, 1, 2, 3].into();
//! assert_eq!(ascending.as_slice(), &[1, 2, 3]);
//!
//! let descending = FlatSet::from_vec_with(vec![3, 1, 2, 3], Inverse(Less));
//! assert_eq!(descending.as_slice(), &[3, 2, 1]);
//! ```
//!
//! # Transparent lookup
//!
//! Lookups accept any `Q` the element borrows as, provided the comparator can
//! compare `Q` as well. With [`Less`] this means a `FlatSet<String>` can be
//! queried with a `&str`:
//!
//! ```rust
//! use flat_containers::FlatSet;
//!
//! let names: FlatSet<String> = ["carol", "alice", "bob"].map(String::from).into();
//! assert!(names.contains("bob"));
//! assert_eq!(names.find("carol"), Some(2));
//! ```
//!
//! [`Inverse`]: crate::compare::Inverse

use std::borrow::Borrow;
use std::collections::TryReserveError;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Bound, Index, Range, RangeBounds};

use crate::compare::{Comparator, Less};
use crate::error::UnsortedInputError;
use crate::merge::tail::{insert_range, insert_sorted_unique};
use crate::merge::{
    SORTED_INVARIANT_PANIC_MESSAGE, is_strictly_sorted_by, set_union_unbalanced,
    sort_and_unique,
};
use crate::search::{partition_point_biased, partition_point_hinted};

/// A sorted, duplicate-free set backed by a `Vec<T>`.
///
/// Two elements are duplicates when neither is ordered before the other by
/// the comparator `C`. The set never holds two duplicates; when an insertion
/// meets an element already present, the element already in the set is kept.
///
/// Positions returned by the set (from [`insert`](Self::insert),
/// [`find`](Self::find), [`lower_bound`](Self::lower_bound), and so on) are
/// indices into [`as_slice`](Self::as_slice) and stay meaningful until the
/// next mutation.
///
/// # Examples
///
/// ```rust
/// use flat_containers::FlatSet;
///
/// let mut set = FlatSet::new();
/// assert_eq!(set.insert(5), (0, true));
/// assert_eq!(set.insert(1), (0, true));
/// assert_eq!(set.insert(5), (1, false));
///
/// set.extend([9, 3, 1]);
/// assert_eq!(set.as_slice(), &[1, 3, 5, 9]);
///
/// assert_eq!(set.remove(&3), 1);
/// assert_eq!(set.remove(&3), 0);
/// assert_eq!(set.as_slice(), &[1, 5, 9]);
/// ```
#[derive(Clone)]
pub struct FlatSet<T, C = Less> {
    body: Vec<T>,
    comparator: C,
}

static_assertions::assert_impl_all!(FlatSet<i32>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(FlatSet<String>: Send, Sync, Clone, Default);
static_assertions::assert_not_impl_any!(FlatSet<std::rc::Rc<i32>>: Send, Sync);

// =============================================================================
// Construction
// =============================================================================

impl<T> FlatSet<T> {
    /// Creates an empty set ordered by [`Less`]. Does not allocate.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Less)
    }

    /// Creates an empty set ordered by [`Less`] with room for `capacity`
    /// elements.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparator(capacity, Less)
    }
}

impl<T, C> FlatSet<T, C> {
    /// Creates an empty set ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_containers::FlatSet;
    ///
    /// let by_len = |left: &&str, right: &&str| left.len() < right.len();
    /// let mut by_length = FlatSet::with_comparator(by_len);
    /// by_length.insert("ccc");
    /// by_length.insert("a");
    /// by_length.insert("b");
    /// assert_eq!(by_length.as_slice(), &["a", "ccc"]);
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            body: Vec::new(),
            comparator,
        }
    }

    /// Creates an empty set ordered by `comparator` with room for `capacity`
    /// elements.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        Self {
            body: Vec::with_capacity(capacity),
            comparator,
        }
    }
}

impl<T, C: Comparator<T>> FlatSet<T, C> {
    /// Builds a set from an arbitrary vector, taking ownership of its buffer.
    ///
    /// The vector is sorted (stably) and deduplicated, so the first
    /// occurrence of each equivalence class survives. The set keeps the
    /// vector's buffer; only the sort may use temporary scratch memory.
    #[must_use]
    pub fn from_vec_with(mut body: Vec<T>, comparator: C) -> Self {
        let unique = sort_and_unique(&mut body, &comparator);
        body.truncate(unique);
        Self { body, comparator }
    }

    /// Wraps a vector that is already sorted and duplicate-free.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `body` is not strictly increasing under
    /// `comparator`. In release builds the check is skipped and an unsorted
    /// vector leaves the set in an unspecified (but memory-safe) state.
    #[must_use]
    pub fn from_sorted_vec_with(body: Vec<T>, comparator: C) -> Self {
        debug_assert!(
            is_strictly_sorted_by(&body, &comparator),
            "{}",
            SORTED_INVARIANT_PANIC_MESSAGE
        );
        Self { body, comparator }
    }

    /// Wraps a vector after checking that it is sorted and duplicate-free.
    ///
    /// # Errors
    ///
    /// Returns [`UnsortedInputError`] naming the first element that is not
    /// ordered strictly after its predecessor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_containers::FlatSet;
    /// use flat_containers::compare::Less;
    ///
    /// assert!(FlatSet::try_from_sorted_vec_with(vec![1, 2, 4], Less).is_ok());
    ///
    /// let error = FlatSet::try_from_sorted_vec_with(vec![1, 2, 2], Less).unwrap_err();
    /// assert_eq!(error.index, 2);
    /// ```
    pub fn try_from_sorted_vec_with(
        body: Vec<T>,
        comparator: C,
    ) -> Result<Self, UnsortedInputError> {
        match body
            .windows(2)
            .position(|window| !comparator.less(&window[0], &window[1]))
        {
            Some(position) => Err(UnsortedInputError {
                index: position + 1,
            }),
            None => Ok(Self { body, comparator }),
        }
    }
}

impl<T, C: Comparator<T> + Default> FlatSet<T, C> {
    /// [`from_sorted_vec_with`](Self::from_sorted_vec_with) using the default
    /// comparator.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `body` is not strictly increasing.
    #[must_use]
    pub fn from_sorted_vec(body: Vec<T>) -> Self {
        Self::from_sorted_vec_with(body, C::default())
    }

    /// [`try_from_sorted_vec_with`](Self::try_from_sorted_vec_with) using the
    /// default comparator.
    ///
    /// # Errors
    ///
    /// Returns [`UnsortedInputError`] if `body` is not strictly increasing.
    pub fn try_from_sorted_vec(body: Vec<T>) -> Result<Self, UnsortedInputError> {
        Self::try_from_sorted_vec_with(body, C::default())
    }
}

// =============================================================================
// Capacity, size and access
// =============================================================================

impl<T, C> FlatSet<T, C> {
    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Number of elements the set can hold without reallocating.
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.body.capacity()
    }

    /// Reserves room for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity overflows `isize::MAX` bytes.
    pub fn reserve(&mut self, additional: usize) {
        self.body.reserve(additional);
    }

    /// Fallible form of [`reserve`](Self::reserve).
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if the capacity overflows or the
    /// allocation fails; the set is left unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        self.body.try_reserve(additional)
    }

    /// Shrinks the capacity as close to the length as the allocator allows.
    pub fn shrink_to_fit(&mut self) {
        self.body.shrink_to_fit();
    }

    /// Removes every element, keeping the allocation.
    pub fn clear(&mut self) {
        self.body.clear();
    }

    /// The elements in order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.body
    }

    /// Consumes the set and returns its sorted buffer.
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        self.body
    }

    /// Iterates over the elements in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.body.iter()
    }

    /// The smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.body.first()
    }

    /// The largest element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.body.last()
    }

    /// The comparator that orders the elements.
    #[must_use]
    pub const fn key_comp(&self) -> &C {
        &self.comparator
    }

    /// Same as [`key_comp`](Self::key_comp): in a set, keys are values.
    #[must_use]
    pub const fn value_comp(&self) -> &C {
        &self.comparator
    }

    /// Exchanges the contents and comparators of two sets.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }
}

// =============================================================================
// Insertion
// =============================================================================

impl<T, C: Comparator<T>> FlatSet<T, C> {
    /// Inserts `value` unless an equivalent element is present.
    ///
    /// Returns the position of the element equivalent to `value` after the
    /// call and whether `value` was inserted. When it was not, `value` is
    /// dropped and the existing element is kept.
    ///
    /// # Complexity
    ///
    /// `O(log n)` comparisons and `O(n)` moves.
    pub fn insert(&mut self, value: T) -> (usize, bool) {
        let position = partition_point_biased(&self.body, |element| {
            self.comparator.less(element, &value)
        });
        self.insert_at_lower_bound(position, value)
    }

    /// Inserts `value`, starting the search for its position at `hint`.
    ///
    /// Returns the position of the element equivalent to `value`. A good hint
    /// (the returned position, or a position close to it) makes the search
    /// constant time; a bad one only makes it slower. Hints past the end are
    /// treated as the end.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_containers::FlatSet;
    ///
    /// let mut set = FlatSet::new();
    /// let mut hint = 0;
    /// for value in 0..5 {
    ///     hint = set.insert_hint(hint + 1, value);
    /// }
    /// assert_eq!(set.as_slice(), &[0, 1, 2, 3, 4]);
    /// assert_eq!(set.insert_hint(0, 3), 3);
    /// ```
    pub fn insert_hint(&mut self, hint: usize, value: T) -> usize {
        let position = partition_point_hinted(&self.body, hint, |element| {
            self.comparator.less(element, &value)
        });
        self.insert_at_lower_bound(position, value).0
    }

    fn insert_at_lower_bound(&mut self, position: usize, value: T) -> (usize, bool) {
        if position == self.body.len() || self.comparator.less(&value, &self.body[position]) {
            self.body.insert(position, value);
            (position, true)
        } else {
            (position, false)
        }
    }

    /// Inserts every element produced by `values`.
    ///
    /// Elements equivalent to one already in the set, or to an earlier one in
    /// `values`, are dropped. The new elements are sorted among themselves and
    /// merged into the buffer in one backward pass.
    ///
    /// If the comparator panics, the set keeps all of its previous elements
    /// and is still sorted; some of the new elements may be missing.
    ///
    /// # Complexity
    ///
    /// `O(m log m)` to sort `m` new elements plus a merge that is linear in
    /// the moves and logarithmic in the comparisons per run.
    pub fn insert_range<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        insert_range(&mut self.body, values, &self.comparator);
    }

    /// Moves every element of `other` into this set.
    ///
    /// `other` is already sorted, so only the merge runs. Where the two sets
    /// hold equivalent elements, the one in `self` is kept. `other` must be
    /// ordered the same way as `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_containers::FlatSet;
    ///
    /// let mut set: FlatSet<i32> = [1, 4, 7].into();
    /// set.append([2, 4, 8].into());
    /// assert_eq!(set.as_slice(), &[1, 2, 4, 7, 8]);
    /// ```
    pub fn append(&mut self, other: Self) {
        insert_sorted_unique(&mut self.body, other.body, &self.comparator);
    }

    /// Returns the union of two sets as a new set, cloning the elements.
    ///
    /// Where the sets hold equivalent elements, the one in `self` is kept.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self
    where
        T: Clone,
        C: Clone,
    {
        Self {
            body: set_union_unbalanced(&self.body, &other.body, &self.comparator),
            comparator: self.comparator.clone(),
        }
    }
}

// =============================================================================
// Removal
// =============================================================================

impl<T, C> FlatSet<T, C> {
    /// Removes the element at `index` and returns the index of the element
    /// that followed it, which is `index` itself (equal to `len()` when the
    /// last element was removed).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn erase_at(&mut self, index: usize) -> usize {
        self.body.remove(index);
        index
    }

    /// Removes the elements in `range` and returns the index of the first
    /// survivor after the removed range.
    ///
    /// # Panics
    ///
    /// Panics if the range is out of bounds or decreasing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flat_containers::FlatSet;
    ///
    /// let mut set: FlatSet<i32> = (0..10).collect();
    /// assert_eq!(set.erase_range(2..5), 2);
    /// assert_eq!(set.as_slice(), &[0, 1, 5, 6, 7, 8, 9]);
    /// assert_eq!(set.erase_range(4..), 4);
    /// assert_eq!(set.len(), 4);
    /// ```
    pub fn erase_range<R>(&mut self, range: R) -> usize
    where
        R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        self.body.drain(range);
        start
    }

    /// Keeps only the elements for which `keep` returns `true`, in order.
    pub fn retain<F>(&mut self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        self.body.retain(keep);
    }
}

impl<T, C> FlatSet<T, C> {
    /// Removes the element equivalent to `key`, returning how many elements
    /// were removed (0 or 1).
    pub fn remove<Q>(&mut self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let range = self.equal_range(key);
        let removed = range.len();
        self.body.drain(range);
        removed
    }

    /// Removes and returns the element equivalent to `key`.
    pub fn take<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(key).map(|index| self.body.remove(index))
    }
}

/// Removes every element of `set` for which `predicate` returns `true`,
/// returning the number of elements removed.
///
/// Survivors keep their order, so the set stays sorted.
///
/// # Examples
///
/// ```rust
/// use flat_containers::{FlatSet, erase_if};
///
/// let mut set: FlatSet<i32> = (1..=10).collect();
/// assert_eq!(erase_if(&mut set, |value| value % 3 == 0), 3);
/// assert_eq!(set.as_slice(), &[1, 2, 4, 5, 7, 8, 10]);
/// ```
pub fn erase_if<T, C, P>(set: &mut FlatSet<T, C>, mut predicate: P) -> usize
where
    P: FnMut(&T) -> bool,
{
    let before = set.len();
    set.retain(|element| !predicate(element));
    before - set.len()
}

// =============================================================================
// Lookup
// =============================================================================

impl<T, C> FlatSet<T, C> {
    /// Position of the first element not ordered before `key`.
    pub fn lower_bound<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.body
            .partition_point(|element| self.comparator.less(element.borrow(), key))
    }

    /// Position of the first element ordered after `key`.
    pub fn upper_bound<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.body
            .partition_point(|element| !self.comparator.less(key, element.borrow()))
    }

    /// Positions of the elements equivalent to `key`: empty, or exactly one
    /// position wide.
    pub fn equal_range<Q>(&self, key: &Q) -> Range<usize>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let position = self.lower_bound(key);
        if position == self.body.len() || self.comparator.less(key, self.body[position].borrow()) {
            position..position
        } else {
            position..position + 1
        }
    }

    /// Position of the element equivalent to `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let range = self.equal_range(key);
        (!range.is_empty()).then_some(range.start)
    }

    /// The element equivalent to `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(key).map(|index| &self.body[index])
    }

    /// Returns `true` if an element equivalent to `key` is present.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.find(key).is_some()
    }

    /// Number of elements equivalent to `key` (0 or 1).
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        self.equal_range(key).len()
    }
}

// =============================================================================
// Standard trait implementations
// =============================================================================

impl<T, C: Default> Default for FlatSet<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T> + Default> From<Vec<T>> for FlatSet<T, C> {
    fn from(body: Vec<T>) -> Self {
        Self::from_vec_with(body, C::default())
    }
}

impl<T, C: Comparator<T> + Default, const N: usize> From<[T; N]> for FlatSet<T, C> {
    fn from(values: [T; N]) -> Self {
        Self::from_vec_with(Vec::from(values), C::default())
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for FlatSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec_with(iter.into_iter().collect(), C::default())
    }
}

impl<T, C: Comparator<T>> Extend<T> for FlatSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.insert_range(iter);
    }
}

impl<'a, T: Copy + 'a, C: Comparator<T>> Extend<&'a T> for FlatSet<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.insert_range(iter.into_iter().copied());
    }
}

impl<T, C> IntoIterator for FlatSet<T, C> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.body.into_iter()
    }
}

impl<'a, T, C> IntoIterator for &'a FlatSet<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.body.iter()
    }
}

impl<T, C> Index<usize> for FlatSet<T, C> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.body[index]
    }
}

impl<T, C> AsRef<[T]> for FlatSet<T, C> {
    fn as_ref(&self) -> &[T] {
        &self.body
    }
}

impl<T: fmt::Debug, C> fmt::Debug for FlatSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.body.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for FlatSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in &self.body {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

impl<T: PartialEq, C> PartialEq for FlatSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body
    }
}

impl<T: Eq, C> Eq for FlatSet<T, C> {}

impl<T: PartialOrd, C> PartialOrd for FlatSet<T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.body.partial_cmp(&other.body)
    }
}

impl<T: Ord, C> Ord for FlatSet<T, C> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.body.cmp(&other.body)
    }
}

impl<T: Hash, C> Hash for FlatSet<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.body.hash(state);
    }
}

// =============================================================================
// Serde
// =============================================================================

#[cfg(feature = "serde")]
impl<T, C> serde::Serialize for FlatSet<T, C>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut sequence = serializer.serialize_seq(Some(self.len()))?;
        for element in &self.body {
            sequence.serialize_element(element)?;
        }
        sequence.end()
    }
}

#[cfg(feature = "serde")]
struct FlatSetVisitor<T, C> {
    marker: std::marker::PhantomData<fn() -> FlatSet<T, C>>,
}

#[cfg(feature = "serde")]
impl<T, C> FlatSetVisitor<T, C> {
    const fn new() -> Self {
        Self {
            marker: std::marker::PhantomData,
        }
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::de::Visitor<'de> for FlatSetVisitor<T, C>
where
    T: serde::Deserialize<'de>,
    C: Comparator<T> + Default,
{
    type Value = FlatSet<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        // Cap the preallocation so a hostile length prefix cannot reserve
        // unbounded memory.
        let capacity = access.size_hint().unwrap_or(0).min(4096);
        let mut body = Vec::with_capacity(capacity);
        while let Some(element) = access.next_element()? {
            body.push(element);
        }
        Ok(FlatSet::from_vec_with(body, C::default()))
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for FlatSet<T, C>
where
    T: serde::Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(FlatSetVisitor::new())
    }
}
