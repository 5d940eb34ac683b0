use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::set::Set;
use crate::{BITS_PER_WORD, MAX_INT, Word};

/// Wire form of a set: the absolute index of its first window word and the
/// window words. Spare capacity is never serialized.
#[derive(Serialize)]
struct WordsRef<'a> {
    start: usize,
    words: &'a [Word],
}

#[derive(Deserialize)]
struct Words {
    start: usize,
    words: Vec<Word>,
}

impl Serialize for Set {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let window = self.window();
        let start = if window.is_empty() { 0 } else { window.start() };
        WordsRef {
            start,
            words: window.words(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Set {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Words { start, words } = Words::deserialize(deserializer)?;

        let max_words = MAX_INT / BITS_PER_WORD as usize + 1;
        if start
            .checked_add(words.len())
            .is_none_or(|end| end > max_words)
        {
            return Err(D::Error::custom(format!(
                "words {start}..+{} out of bounds",
                words.len()
            )));
        }

        Ok(Set::from_words(start, words))
    }
}
