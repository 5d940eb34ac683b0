use std::iter::FusedIterator;
use std::ops::RangeInclusive;

use crate::ops::{run_end, seek_forward};
use crate::window::Window;
use crate::word::{count, min_pos, value_of};
use crate::Word;

/// Iterator over the members of a [`Set`](crate::Set) in ascending order.
///
/// Empty words are skipped a word at a time, and each member costs one
/// lowest-bit lookup.
#[derive(Clone)]
pub struct Iter<'a> {
    window: &'a Window,
    /// Absolute index of the word being drained.
    word: usize,
    /// Members of `word` not yet yielded.
    bits: Word,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(window: &'a Window) -> Self {
        let word = window.start();
        Self {
            window,
            word,
            bits: window.word(word),
        }
    }
}

impl Iterator for Iter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.bits == 0 {
            self.word = self.window.find_next_nonzero(self.word + 1)?;
            self.bits = self.window.word(self.word);
        }

        let bit = min_pos(self.bits);
        self.bits &= self.bits - 1;
        Some(value_of(self.word, bit))
    }

    /// Lower bound only: the members left in the current word. Counting the
    /// rest of the window would cost a pass over it.
    fn size_hint(&self) -> (usize, Option<usize>) {
        (count(self.bits) as usize, None)
    }
}

impl FusedIterator for Iter<'_> {}

/// Iterator over the maximal runs of consecutive members of a
/// [`Set`](crate::Set), in ascending order.
///
/// A single member is a run of length one (`n..=n`).
#[derive(Clone)]
pub struct Runs<'a> {
    window: &'a Window,
    /// Where the search for the next run starts; `None` once past `MAX_INT`.
    from: Option<usize>,
}

impl<'a> Runs<'a> {
    pub(crate) fn new(window: &'a Window) -> Self {
        Self {
            window,
            from: Some(0),
        }
    }
}

impl Iterator for Runs<'_> {
    type Item = RangeInclusive<usize>;

    fn next(&mut self) -> Option<RangeInclusive<usize>> {
        let first = seek_forward(self.window, self.from?)?;
        let last = run_end(self.window, first);

        // `last + 1` is not a member.
        self.from = last.checked_add(2);
        Some(first..=last)
    }
}

impl FusedIterator for Runs<'_> {}
