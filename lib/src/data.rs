use crate::results::FilterError;
use std::collections::HashMap;
use std::io::BufRead;
use std::ops::Deref;
use std::result::Result;
use std::sync::Arc;

/// The number of letters in every word of a [`Dictionary`].
pub const WORD_LENGTH: usize = 5;

/// Contains all the candidate words for one language, along with how often each letter occurs
/// across them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<Arc<str>>,
    frequencies: LetterFrequencies,
}

impl Dictionary {
    /// Constructs a new `Dictionary` by reading words from the given reader.
    ///
    /// The reader should provide one word per line. Each line is trimmed, and only lines with
    /// exactly [`WORD_LENGTH`] characters are kept, converted to upper case. Other lines are
    /// dropped without error.
    ///
    /// ```
    /// use std::io::Cursor;
    /// use wordle_filter::Dictionary;
    ///
    /// let dictionary = Dictionary::from_reader(Cursor::new("crane\n slate \nno\n")).unwrap();
    ///
    /// assert_eq!(dictionary.len(), 2);
    /// assert_eq!(&*dictionary[0], "CRANE");
    /// ```
    pub fn from_reader<R: BufRead>(word_reader: R) -> Result<Self, FilterError> {
        let mut words = Vec::new();
        for maybe_line in word_reader.lines() {
            if let Some(word) = normalize_word(&maybe_line?) {
                words.push(word);
            }
        }
        Ok(Dictionary::from_words(words))
    }

    /// Constructs a new `Dictionary` from the given words, normalized the same way as
    /// [`Dictionary::from_reader()`].
    pub fn from_iterator<S, I>(words: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        Dictionary::from_words(
            words
                .into_iter()
                .filter_map(|word| normalize_word(word.as_ref()))
                .collect(),
        )
    }

    fn from_words(words: Vec<Arc<str>>) -> Self {
        let frequencies = LetterFrequencies::new(&words);
        Dictionary { words, frequencies }
    }

    /// Returns the number of words in the dictionary.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` iff the dictionary has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns the letter counts across every word in this dictionary.
    pub fn frequencies(&self) -> &LetterFrequencies {
        &self.frequencies
    }
}

impl Deref for Dictionary {
    type Target = [Arc<str>];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

fn normalize_word(line: &str) -> Option<Arc<str>> {
    let word = line.trim();
    if word.chars().count() != WORD_LENGTH {
        return None;
    }
    Some(Arc::from(word.to_uppercase().as_str()))
}

/// Counts how many times each letter occurs across a list of words.
///
/// Every occurrence is counted, so a word with a repeated letter contributes that letter more than
/// once.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LetterFrequencies {
    count_by_letter: HashMap<char, u64>,
}

impl LetterFrequencies {
    /// Creates a new letter counter based on the given word list.
    pub fn new<S>(words: &[S]) -> LetterFrequencies
    where
        S: AsRef<str>,
    {
        LetterFrequencies::from_iter(words)
    }

    /// Retrieves the number of times the given letter occurs in the counted words.
    pub fn count(&self, letter: char) -> u64 {
        *self.count_by_letter.get(&letter).unwrap_or(&0)
    }

    /// Returns the total number of letters that were counted.
    pub fn total(&self) -> u64 {
        self.count_by_letter.values().sum()
    }

    /// Returns the number of distinct letters that were counted.
    pub fn num_letters(&self) -> usize {
        self.count_by_letter.len()
    }
}

impl<S> FromIterator<S> for LetterFrequencies
where
    S: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = S>>(words: I) -> Self {
        let mut count_by_letter: HashMap<char, u64> = HashMap::new();
        for word in words {
            for letter in word.as_ref().chars() {
                *count_by_letter.entry(letter).or_insert(0) += 1;
            }
        }
        LetterFrequencies { count_by_letter }
    }
}
