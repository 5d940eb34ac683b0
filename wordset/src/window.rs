use tracing::trace;

use crate::grow_size;
use crate::Word;

/// Word storage of a [`Set`](crate::Set).
///
/// The allocation `buf` covers the absolute word indices
/// `base..base + buf.len()`. Only `buf[lo..hi]` (the window) may hold
/// non-zero words; every slot outside the window is zero. While the window
/// is non-empty its first and last words are non-zero once [`Window::trim`]
/// has run.
#[derive(Default)]
#[cfg_attr(feature = "allocative", derive(allocative::Allocative))]
pub(crate) struct Window {
    buf: Vec<Word>,
    base: usize,
    lo: usize,
    hi: usize,
}

impl Window {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// An empty window whose allocation already covers words `0..words`.
    pub(crate) fn with_words(words: usize) -> Self {
        Self {
            buf: vec![0; words],
            base: 0,
            lo: 0,
            hi: 0,
        }
    }

    /// Build a window from a word run starting at absolute word `start`.
    ///
    /// Leading and trailing zero words are trimmed.
    pub(crate) fn from_words(start: usize, words: Vec<Word>) -> Self {
        let hi = words.len();
        let mut window = Self {
            buf: words,
            base: start,
            lo: 0,
            hi,
        };
        window.trim();
        window
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.lo == self.hi
    }

    /// Absolute index of the first window word.
    #[inline]
    pub(crate) fn start(&self) -> usize {
        self.base + self.lo
    }

    /// Absolute index one past the last window word.
    #[inline]
    pub(crate) fn end(&self) -> usize {
        self.base + self.hi
    }

    #[inline]
    pub(crate) fn words(&self) -> &[Word] {
        &self.buf[self.lo..self.hi]
    }

    /// Number of allocated word slots.
    pub(crate) fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn heap_bytes(&self) -> usize {
        self.buf.capacity() * std::mem::size_of::<Word>()
    }

    /// The word at absolute index `k`, zero outside the window.
    #[inline]
    pub(crate) fn word(&self, k: usize) -> Word {
        if k < self.start() || k >= self.end() {
            return 0;
        }
        self.buf[k - self.base]
    }

    /// Mutable access to absolute word `k`.
    ///
    /// `k` must lie inside the window; call [`Window::ensure_covers`] first.
    #[inline]
    pub(crate) fn word_mut(&mut self, k: usize) -> &mut Word {
        debug_assert!(k >= self.start() && k < self.end());
        &mut self.buf[k - self.base]
    }

    /// Mutable access to `len` words starting at absolute index `k`.
    ///
    /// The words must lie inside the window.
    #[inline]
    pub(crate) fn span_mut(&mut self, k: usize, len: usize) -> &mut [Word] {
        debug_assert!(k >= self.start() && k + len <= self.end());
        let from = k - self.base;
        &mut self.buf[from..from + len]
    }

    /// Extend the window so that it includes absolute words `first..=last`.
    ///
    /// The words are moved within the current allocation when it is large
    /// enough, and reallocated otherwise. Newly included words are zero, so
    /// callers that do not set them must [`Window::trim`] afterwards.
    pub(crate) fn ensure_covers(&mut self, first: usize, last: usize) {
        debug_assert!(first <= last);

        let (first, last, downward) = if self.is_empty() {
            (first, last, false)
        } else {
            let start = self.start();
            (first.min(start), last.max(self.end() - 1), first < start)
        };

        let covered = first >= self.base && last < self.base + self.buf.len();
        if !covered {
            let span = last - first + 1;
            if self.is_empty() && span <= self.buf.len() {
                // The allocation is all zeroes; reuse it at the new position.
                self.base = first;
            } else if span <= self.buf.len() {
                self.slide(first, span, downward);
            } else {
                self.reallocate(first, span, downward);
            }
        }

        self.lo = first - self.base;
        self.hi = last + 1 - self.base;
    }

    /// Absolute index of the first slot of a `len`-slot allocation holding
    /// `span` words from `first`, with the spare slots on the side the
    /// window grows toward.
    fn placement(first: usize, span: usize, len: usize, downward: bool) -> usize {
        if downward {
            first - (len - span).min(first)
        } else {
            first
        }
    }

    /// Rebase the allocation so that it covers `span` words from `first`,
    /// moving the window words in place.
    fn slide(&mut self, first: usize, span: usize, downward: bool) {
        let new_base = Self::placement(first, span, self.buf.len(), downward);
        let (lo, hi) = (self.lo, self.hi);
        let to = self.start() - new_base;
        let moved = to..to + (hi - lo);

        self.buf.copy_within(lo..hi, to);

        // Zero the old window slots the moved words did not land on.
        let stale_hi = hi.min(moved.start);
        if lo < stale_hi {
            self.buf[lo..stale_hi].fill(0);
        }
        let stale_lo = lo.max(moved.end);
        if stale_lo < hi {
            self.buf[stale_lo..hi].fill(0);
        }

        trace!(
            words = self.buf.len(),
            old_base = self.base,
            base = new_base,
            "sliding set window"
        );

        self.base = new_base;
        self.lo = moved.start;
        self.hi = moved.end;
    }

    /// Move the window into a fresh allocation that covers `span` words from
    /// `first`.
    ///
    /// The allocation is sized with [`grow_size`] from the populated window,
    /// not from the old allocation, so capacity follows the population
    /// range.
    fn reallocate(&mut self, first: usize, span: usize, downward: bool) {
        let new_len = grow_size(span, self.hi - self.lo);
        let new_base = Self::placement(first, span, new_len, downward);

        let mut buf = vec![0; new_len];
        if !self.is_empty() {
            let offset = self.start() - new_base;
            buf[offset..offset + self.hi - self.lo].copy_from_slice(self.words());
        }

        trace!(
            old_words = self.buf.len(),
            new_words = new_len,
            base = new_base,
            "reallocating set window"
        );

        self.buf = buf;
        self.base = new_base;
    }

    /// Shrink the window until both boundary words are non-zero.
    pub(crate) fn trim(&mut self) {
        while self.lo < self.hi && self.buf[self.lo] == 0 {
            self.lo += 1;
        }
        while self.hi > self.lo && self.buf[self.hi - 1] == 0 {
            self.hi -= 1;
        }
        if self.lo == self.hi {
            self.lo = 0;
            self.hi = 0;
        }
    }

    /// Restrict the window to absolute words `first..end`, zeroing every
    /// word that falls outside. The window is not trimmed.
    pub(crate) fn restrict(&mut self, first: usize, end: usize) {
        if first >= end || first >= self.end() || end <= self.start() {
            self.clear();
            return;
        }

        let lo = first.max(self.start()) - self.base;
        let hi = end.min(self.end()) - self.base;
        self.buf[self.lo..lo].fill(0);
        self.buf[hi..self.hi].fill(0);
        self.lo = lo;
        self.hi = hi;
    }

    /// Zero the window, keeping the allocation.
    pub(crate) fn clear(&mut self) {
        let (lo, hi) = (self.lo, self.hi);
        self.buf[lo..hi].fill(0);
        self.lo = 0;
        self.hi = 0;
    }

    /// Release every allocated slot outside the window.
    pub(crate) fn shrink_to_fit(&mut self) {
        let before = self.buf.len();
        *self = self.compact();
        trace!(
            old_words = before,
            new_words = self.buf.len(),
            "shrunk set window"
        );
    }

    /// An equal window with no spare capacity.
    pub(crate) fn compact(&self) -> Self {
        if self.is_empty() {
            return Self::new();
        }
        Self {
            buf: self.words().to_vec(),
            base: self.start(),
            lo: 0,
            hi: self.hi - self.lo,
        }
    }

    /// Overwrite this window with the contents of `other`, reusing the
    /// allocation where it already covers `other`'s window.
    pub(crate) fn assign(&mut self, other: &Window) {
        self.clear();
        if other.is_empty() {
            return;
        }

        self.ensure_covers(other.start(), other.end() - 1);
        let lo = self.lo;
        self.buf[lo..lo + other.words().len()].copy_from_slice(other.words());
    }

    /// Assign absolute word `k`, growing or trimming the window as needed.
    pub(crate) fn set_word(&mut self, k: usize, value: Word) {
        if value == 0 {
            if k >= self.start() && k < self.end() {
                self.buf[k - self.base] = 0;
                self.trim();
            }
            return;
        }

        self.ensure_covers(k, k);
        self.buf[k - self.base] = value;
    }

    /// The first non-zero window word at absolute index `k` or later.
    pub(crate) fn find_next_nonzero(&self, k: usize) -> Option<usize> {
        if k >= self.end() {
            return None;
        }
        let from = k.max(self.start()) - self.base;
        self.buf[from..self.hi]
            .iter()
            .position(|&w| w != 0)
            .map(|i| self.base + from + i)
    }

    /// The last non-zero window word at absolute index `k` or earlier.
    pub(crate) fn find_prev_nonzero(&self, k: usize) -> Option<usize> {
        if self.is_empty() || k < self.start() {
            return None;
        }
        let to = k.min(self.end() - 1) - self.base;
        self.buf[self.lo..=to]
            .iter()
            .rposition(|&w| w != 0)
            .map(|i| self.base + self.lo + i)
    }
}
