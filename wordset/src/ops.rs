use std::ops::{Bound, RangeBounds};

use crate::window::Window;
use crate::word::{index_of, mask_between, mask_from, mask_to, max_pos, min_pos, value_of};
use crate::{BITS_PER_WORD, Word};

/// Inclusive `(first, last)` bounds of `range`, or `None` if it is empty.
pub(crate) fn inclusive_bounds(range: impl RangeBounds<usize>) -> Option<(usize, usize)> {
    let first = match range.start_bound() {
        Bound::Included(&n) => n,
        Bound::Excluded(&n) => n.checked_add(1)?,
        Bound::Unbounded => 0,
    };
    let last = match range.end_bound() {
        Bound::Included(&n) => n,
        Bound::Excluded(&n) => n.checked_sub(1)?,
        Bound::Unbounded => crate::MAX_INT,
    };

    (first <= last).then_some((first, last))
}

/// Replace every word touched by the integers `first..=last` with
/// `apply(word, mask)`, where `mask` selects the bits inside the range.
///
/// Boundary words get partial masks; interior words get a full mask. All
/// touched words must lie inside the window.
pub(crate) fn apply_masked(
    window: &mut Window,
    first: usize,
    last: usize,
    apply: impl Fn(Word, Word) -> Word,
) {
    let (first_word, first_bit) = index_of(first);
    let (last_word, last_bit) = index_of(last);

    if first_word == last_word {
        let w = window.word_mut(first_word);
        *w = apply(*w, mask_between(first_bit, last_bit));
        return;
    }

    let len = last_word - first_word + 1;
    let words = window.span_mut(first_word, len);

    words[0] = apply(words[0], mask_from(first_bit));
    for w in &mut words[1..len - 1] {
        *w = apply(*w, Word::MAX);
    }
    words[len - 1] = apply(words[len - 1], mask_to(last_bit));
}

/// Overlap of two windows as an absolute word range, `None` if disjoint.
fn overlap(a: &Window, b: &Window) -> Option<(usize, usize)> {
    if a.is_empty() || b.is_empty() {
        return None;
    }
    let first = a.start().max(b.start());
    let end = a.end().min(b.end());
    (first < end).then_some((first, end))
}

/// The words of `w` in the absolute range `first..end`, which must lie
/// inside its window.
fn words_in(w: &Window, first: usize, end: usize) -> &[Word] {
    &w.words()[first - w.start()..end - w.start()]
}

/// `dst ∪= src`. The window grows to the union of both windows.
pub(crate) fn union_with(dst: &mut Window, src: &Window) {
    if src.is_empty() {
        return;
    }

    dst.ensure_covers(src.start(), src.end() - 1);
    let words = src.words();
    for (d, &s) in dst.span_mut(src.start(), words.len()).iter_mut().zip(words) {
        *d |= s;
    }
}

/// `dst ∆= src`. The window grows to the union of both windows, then trims
/// boundary words that cancelled out.
pub(crate) fn symmetric_difference_with(dst: &mut Window, src: &Window) {
    if src.is_empty() {
        return;
    }

    dst.ensure_covers(src.start(), src.end() - 1);
    let words = src.words();
    for (d, &s) in dst.span_mut(src.start(), words.len()).iter_mut().zip(words) {
        *d ^= s;
    }
    dst.trim();
}

/// `dst ∩= src`. Words outside the overlap of both windows are dropped
/// without being visited.
pub(crate) fn intersect_with(dst: &mut Window, src: &Window) {
    let Some((first, end)) = overlap(dst, src) else {
        dst.clear();
        return;
    };

    dst.restrict(first, end);
    let words = words_in(src, first, end);
    for (d, &s) in dst.span_mut(first, end - first).iter_mut().zip(words) {
        *d &= s;
    }
    dst.trim();
}

/// `dst ∖= src`. Only the overlap of both windows is visited.
pub(crate) fn difference_with(dst: &mut Window, src: &Window) {
    let Some((first, end)) = overlap(dst, src) else {
        return;
    };

    let words = words_in(src, first, end);
    for (d, &s) in dst.span_mut(first, end - first).iter_mut().zip(words) {
        *d &= !s;
    }
    dst.trim();
}

/// `dst = a ∩ b`, reusing `dst`'s allocation.
pub(crate) fn intersect_into(dst: &mut Window, a: &Window, b: &Window) {
    dst.clear();
    let Some((first, end)) = overlap(a, b) else {
        return;
    };

    dst.ensure_covers(first, end - 1);
    let (a, b) = (words_in(a, first, end), words_in(b, first, end));
    for ((d, &x), &y) in dst.span_mut(first, end - first).iter_mut().zip(a).zip(b) {
        *d = x & y;
    }
    dst.trim();
}

/// The smallest member `>= n`.
pub(crate) fn seek_forward(window: &Window, n: usize) -> Option<usize> {
    let (k, bit) = index_of(n);
    let bits = window.word(k) & mask_from(bit);
    if bits != 0 {
        return Some(value_of(k, min_pos(bits)));
    }

    let k = window.find_next_nonzero(k + 1)?;
    Some(value_of(k, min_pos(window.word(k))))
}

/// The largest member `<= n`.
pub(crate) fn seek_backward(window: &Window, n: usize) -> Option<usize> {
    let (k, bit) = index_of(n);
    let bits = window.word(k) & mask_to(bit);
    if bits != 0 {
        return Some(value_of(k, max_pos(bits)));
    }

    let k = window.find_prev_nonzero(k.checked_sub(1)?)?;
    Some(value_of(k, max_pos(window.word(k))))
}

/// The last member of the run that starts at member `n`.
///
/// Whole words of ones are skipped one word at a time.
pub(crate) fn run_end(window: &Window, n: usize) -> usize {
    let (mut k, bit) = index_of(n);
    let ones = (window.word(k) >> bit).trailing_ones();
    debug_assert!(ones > 0, "{n} is not a member");

    let mut end = n + ones as usize - 1;
    if bit + ones < BITS_PER_WORD {
        return end;
    }

    loop {
        k += 1;
        let ones = window.word(k).trailing_ones();
        if ones == 0 {
            return end;
        }
        end = value_of(k, ones - 1);
        if ones < BITS_PER_WORD {
            return end;
        }
    }
}
