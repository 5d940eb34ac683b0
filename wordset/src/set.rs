use std::hash::{Hash, Hasher};
use std::ops::{
    BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, RangeBounds, Sub, SubAssign,
};

use crate::iter::{Iter, Runs};
use crate::ops::{
    apply_masked, difference_with, inclusive_bounds, intersect_into, intersect_with,
    seek_backward, seek_forward, symmetric_difference_with, union_with,
};
use crate::window::Window;
use crate::word::{count, index_of, max_pos, min_pos, value_of};
use crate::{BITS_PER_WORD, Word};

/// Number of addressable words: one past the word holding `MAX_INT`.
const MAX_WORDS: usize = crate::MAX_INT / BITS_PER_WORD as usize + 1;

/// A set of non-negative integers stored as a windowed bit vector.
///
/// Bit `b` of the word at absolute index `k` stands for the integer
/// `k * BITS_PER_WORD + b`. Only the words between the smallest and the
/// largest member are kept populated, so the cost of `len`, iteration and
/// the set operators follows the populated range of the set.
///
/// The set may hold more allocated words than its window needs. [`clear`]
/// keeps them for reuse, while [`shrink_to_fit`] and [`Clone::clone`]
/// produce a set without spare capacity.
///
/// [`clear`]: Set::clear
/// [`shrink_to_fit`]: Set::shrink_to_fit
#[derive(Default)]
#[cfg_attr(feature = "allocative", derive(allocative::Allocative))]
pub struct Set {
    window: Window,
}

impl Set {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            window: Window::new(),
        }
    }

    /// Create an empty set with room for the integers `0..n` without
    /// reallocating.
    pub fn with_capacity(n: usize) -> Self {
        Self {
            window: Window::with_words(n.div_ceil(BITS_PER_WORD as usize)),
        }
    }

    /// Create a set holding every integer in `range`.
    ///
    /// `Set::from_range(0..100)` holds `0` through `99`.
    pub fn from_range(range: impl RangeBounds<usize>) -> Self {
        let mut set = Self::new();
        set.insert_range(range);
        set
    }

    /// Create a set from a run of words, the first of which is the word at
    /// absolute index `start`.
    ///
    /// Panics if the words extend past the word holding [`MAX_INT`](crate::MAX_INT).
    pub fn from_words(start: usize, words: Vec<Word>) -> Self {
        assert!(
            start
                .checked_add(words.len())
                .is_some_and(|end| end <= MAX_WORDS),
            "words {start}..+{} out of bounds",
            words.len()
        );

        Self {
            window: Window::from_words(start, words),
        }
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// The number of members.
    pub fn len(&self) -> usize {
        self.window.words().iter().map(|&w| count(w) as usize).sum()
    }

    /// Test whether `n` is a member.
    pub fn contains(&self, n: usize) -> bool {
        let (k, bit) = index_of(n);
        (self.window.word(k) >> bit) & 1 != 0
    }

    /// Insert `n`, returning `true` if it was not already a member.
    pub fn insert(&mut self, n: usize) -> bool {
        let (k, bit) = index_of(n);
        self.window.ensure_covers(k, k);

        let w = self.window.word_mut(k);
        let was_absent = *w & (1 << bit) == 0;
        *w |= 1 << bit;
        was_absent
    }

    /// Remove `n`, returning `true` if it was a member.
    pub fn remove(&mut self, n: usize) -> bool {
        let (k, bit) = index_of(n);
        if self.window.word(k) & (1 << bit) == 0 {
            return false;
        }

        let w = self.window.word_mut(k);
        *w &= !(1 << bit);
        if *w == 0 {
            self.window.trim();
        }
        true
    }

    /// Insert every integer in `range`.
    pub fn insert_range(&mut self, range: impl RangeBounds<usize>) {
        let Some((first, last)) = inclusive_bounds(range) else {
            return;
        };

        self.window.ensure_covers(index_of(first).0, index_of(last).0);
        apply_masked(&mut self.window, first, last, |w, mask| w | mask);
    }

    /// Remove every integer in `range`.
    pub fn remove_range(&mut self, range: impl RangeBounds<usize>) {
        let Some((first, last)) = inclusive_bounds(range) else {
            return;
        };
        if self.is_empty() {
            return;
        }

        // Only the part of the range inside the window can hold members.
        let first = first.max(value_of(self.window.start(), 0));
        let last = last.min(value_of(self.window.end() - 1, BITS_PER_WORD - 1));
        if first > last {
            return;
        }

        apply_masked(&mut self.window, first, last, |w, mask| w & !mask);
        self.window.trim();
    }

    /// Toggle membership of every integer in `range`.
    pub fn flip_range(&mut self, range: impl RangeBounds<usize>) {
        let Some((first, last)) = inclusive_bounds(range) else {
            return;
        };

        self.window.ensure_covers(index_of(first).0, index_of(last).0);
        apply_masked(&mut self.window, first, last, |w, mask| w ^ mask);
        self.window.trim();
    }

    /// The word at absolute index `k`: the members in
    /// `k * BITS_PER_WORD..(k + 1) * BITS_PER_WORD`, as bits.
    pub fn word(&self, k: usize) -> Word {
        self.window.word(k)
    }

    /// Replace the word at absolute index `k`.
    ///
    /// `set.set_word(0, 0b101)` makes `0` and `2` the only members below
    /// [`BITS_PER_WORD`].
    pub fn set_word(&mut self, k: usize, word: Word) {
        assert!(k < MAX_WORDS, "word index {k} out of bounds");
        self.window.set_word(k, word);
    }

    /// Remove all members, keeping the allocated words for reuse.
    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// Release the allocated words that lie outside the populated window.
    pub fn shrink_to_fit(&mut self) {
        self.window.shrink_to_fit();
    }

    /// The number of allocated words.
    pub fn capacity_words(&self) -> usize {
        self.window.capacity()
    }

    /// The number of heap-allocated bytes used by this set.
    pub fn heap_bytes(&self) -> usize {
        self.window.heap_bytes()
    }

    /// The smallest member, or `None` if empty.
    pub fn min(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let k = self.window.start();
        Some(value_of(k, min_pos(self.window.word(k))))
    }

    /// The largest member, or `None` if empty.
    pub fn max(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        let k = self.window.end() - 1;
        Some(value_of(k, max_pos(self.window.word(k))))
    }

    /// The smallest member greater than `n`.
    pub fn next_after(&self, n: usize) -> Option<usize> {
        seek_forward(&self.window, n.checked_add(1)?)
    }

    /// The largest member less than `n`.
    pub fn prev_before(&self, n: usize) -> Option<usize> {
        seek_backward(&self.window, n.checked_sub(1)?)
    }

    /// Remove and return the smallest member, or `None` if empty.
    pub fn pop_min(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        let k = self.window.start();
        let w = self.window.word_mut(k);
        let bit = min_pos(*w);
        *w &= *w - 1;
        if *w == 0 {
            self.window.trim();
        }
        Some(value_of(k, bit))
    }

    /// Remove and return the largest member, or `None` if empty.
    pub fn pop_max(&mut self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }

        let k = self.window.end() - 1;
        let w = self.window.word_mut(k);
        let bit = max_pos(*w);
        *w &= !(1 << bit);
        if *w == 0 {
            self.window.trim();
        }
        Some(value_of(k, bit))
    }

    /// Remove and return the smallest member.
    ///
    /// Panics if the set is empty.
    pub fn remove_min(&mut self) -> usize {
        match self.pop_min() {
            Some(n) => n,
            None => panic!("remove_min called on an empty set"),
        }
    }

    /// Remove and return the largest member.
    ///
    /// Panics if the set is empty.
    pub fn remove_max(&mut self) -> usize {
        match self.pop_max() {
            Some(n) => n,
            None => panic!("remove_max called on an empty set"),
        }
    }

    /// Iterate over the members in ascending order.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.window)
    }

    /// Call `visit` on every member in ascending order.
    ///
    /// The set is borrowed for the whole traversal, so `visit` cannot
    /// mutate it.
    pub fn each(&self, visit: impl FnMut(usize)) {
        self.iter().for_each(visit);
    }

    /// Iterate over the maximal runs of consecutive members.
    pub fn runs(&self) -> Runs<'_> {
        Runs::new(&self.window)
    }

    /// `self ∪ other`.
    pub fn union(&self, other: &Set) -> Set {
        let (mut result, other) = if self.window.words().len() >= other.window.words().len() {
            (self.clone(), other)
        } else {
            (other.clone(), self)
        };
        result.union_with(other);
        result
    }

    /// `self ∩ other`.
    pub fn intersection(&self, other: &Set) -> Set {
        let mut result = Set::new();
        result.set_intersection(self, other);
        result
    }

    /// `self ∖ other`.
    pub fn difference(&self, other: &Set) -> Set {
        let mut result = self.clone();
        result.difference_with(other);
        result
    }

    /// `self ∆ other`.
    pub fn symmetric_difference(&self, other: &Set) -> Set {
        let mut result = self.clone();
        result.symmetric_difference_with(other);
        result
    }

    /// `self = self ∪ other`.
    pub fn union_with(&mut self, other: &Set) {
        union_with(&mut self.window, &other.window);
    }

    /// `self = self ∩ other`.
    pub fn intersect_with(&mut self, other: &Set) {
        intersect_with(&mut self.window, &other.window);
    }

    /// `self = self ∖ other`.
    pub fn difference_with(&mut self, other: &Set) {
        difference_with(&mut self.window, &other.window);
    }

    /// `self = self ∆ other`.
    pub fn symmetric_difference_with(&mut self, other: &Set) {
        symmetric_difference_with(&mut self.window, &other.window);
    }

    /// `self = a ∪ b`, reusing the allocation of `self`.
    pub fn set_union(&mut self, a: &Set, b: &Set) {
        self.window.assign(&a.window);
        union_with(&mut self.window, &b.window);
    }

    /// `self = a ∩ b`, reusing the allocation of `self`.
    pub fn set_intersection(&mut self, a: &Set, b: &Set) {
        intersect_into(&mut self.window, &a.window, &b.window);
    }

    /// `self = a ∖ b`, reusing the allocation of `self`.
    pub fn set_difference(&mut self, a: &Set, b: &Set) {
        self.window.assign(&a.window);
        difference_with(&mut self.window, &b.window);
    }

    /// `self = a ∆ b`, reusing the allocation of `self`.
    pub fn set_symmetric_difference(&mut self, a: &Set, b: &Set) {
        self.window.assign(&a.window);
        symmetric_difference_with(&mut self.window, &b.window);
    }

    #[cfg(feature = "serde")]
    pub(crate) fn window(&self) -> &Window {
        &self.window
    }
}

impl Clone for Set {
    /// The clone holds only the populated window, without spare capacity.
    fn clone(&self) -> Self {
        Self {
            window: self.window.compact(),
        }
    }

    /// Reuses the allocation of `self` where it already covers `source`.
    fn clone_from(&mut self, source: &Self) {
        self.window.assign(&source.window);
    }
}

impl PartialEq for Set {
    fn eq(&self, other: &Self) -> bool {
        // Both windows are trimmed, so equal sets have identical windows.
        self.window.words() == other.window.words()
            && (self.is_empty() || self.window.start() == other.window.start())
    }
}

impl Eq for Set {}

impl Hash for Set {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if !self.is_empty() {
            self.window.start().hash(state);
        }
        self.window.words().hash(state);
    }
}

impl Extend<usize> for Set {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        for n in iter {
            self.insert(n);
        }
    }
}

impl<'a> Extend<&'a usize> for Set {
    fn extend<I: IntoIterator<Item = &'a usize>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl FromIterator<usize> for Set {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Set::new();
        set.extend(iter);
        set
    }
}

impl<const N: usize> From<[usize; N]> for Set {
    fn from(members: [usize; N]) -> Self {
        members.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Set {
    type Item = usize;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

impl BitOr for &Set {
    type Output = Set;

    fn bitor(self, rhs: Self) -> Set {
        self.union(rhs)
    }
}

impl BitAnd for &Set {
    type Output = Set;

    fn bitand(self, rhs: Self) -> Set {
        self.intersection(rhs)
    }
}

impl BitXor for &Set {
    type Output = Set;

    fn bitxor(self, rhs: Self) -> Set {
        self.symmetric_difference(rhs)
    }
}

impl Sub for &Set {
    type Output = Set;

    fn sub(self, rhs: Self) -> Set {
        self.difference(rhs)
    }
}

impl BitOrAssign<&Set> for Set {
    fn bitor_assign(&mut self, rhs: &Set) {
        self.union_with(rhs);
    }
}

impl BitAndAssign<&Set> for Set {
    fn bitand_assign(&mut self, rhs: &Set) {
        self.intersect_with(rhs);
    }
}

impl BitXorAssign<&Set> for Set {
    fn bitxor_assign(&mut self, rhs: &Set) {
        self.symmetric_difference_with(rhs);
    }
}

impl SubAssign<&Set> for Set {
    fn sub_assign(&mut self, rhs: &Set) {
        self.difference_with(rhs);
    }
}
