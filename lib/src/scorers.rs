use crate::data::LetterFrequencies;
use rayon::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

/// A word along with its score. The higher the score, the better the guess.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ScoredWord {
    pub word: Arc<str>,
    pub score: u64,
}

/// Words ordered from best to worst guess.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ranking {
    /// Every ranked word, ordered by descending score. Words with equal scores keep the order in
    /// which they were given.
    pub scored: Vec<ScoredWord>,
    /// Every word that shares the highest score, in ranked order.
    pub top_words: Vec<Arc<str>>,
}

impl Ranking {
    /// Returns the highest score, if any words were ranked.
    pub fn top_score(&self) -> Option<u64> {
        self.scored.first().map(|scored| scored.score)
    }
}

/// Scores a word by the number of times each of its unique letters occurs in the whole
/// dictionary.
///
/// Repeated letters are only counted once, which favours guesses that test many common letters.
///
/// ```
/// use wordle_filter::{score_word, LetterFrequencies};
///
/// let frequencies = LetterFrequencies::new(&["SASSY", "ASSAY"]);
///
/// assert_eq!(score_word("SASSY", &frequencies), 5 + 3 + 2);
/// ```
pub fn score_word(word: &str, frequencies: &LetterFrequencies) -> u64 {
    let unique_letters: HashSet<char> = word.chars().collect();
    unique_letters
        .iter()
        .map(|letter| frequencies.count(*letter))
        .sum()
}

/// Scores every word with [`score_word()`] and sorts them from best to worst.
pub fn rank(words: &[Arc<str>], frequencies: &LetterFrequencies) -> Ranking {
    let mut scored: Vec<ScoredWord> = words
        .par_iter()
        .map(|word| ScoredWord {
            word: Arc::clone(word),
            score: score_word(word, frequencies),
        })
        .collect();
    // `sort_by` is stable, so ties stay in dictionary order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    let top_words = match scored.first() {
        Some(best) => scored
            .iter()
            .take_while(|scored_word| scored_word.score == best.score)
            .map(|scored_word| Arc::clone(&scored_word.word))
            .collect(),
        None => Vec::new(),
    };
    Ranking { scored, top_words }
}
