use crate::results::FilterError;
use crate::scorers::Ranking;
use std::collections::BTreeMap;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The language used when a request does not name one.
pub const DEFAULT_LANGUAGE: &str = "english";

/// The raw, unvalidated constraints of a single filter request, as sent by a client.
///
/// Use [`ConstraintSet::parse()`](crate::ConstraintSet::parse) to validate these before
/// filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FilterRequest {
    /// The language key of the dictionary to search, e.g. `"english"`.
    pub language: String,
    /// Letters known to be in the word. Repeated letters mean the word has at least that many.
    pub included: String,
    /// Letters with no occurrences beyond those already known to be included.
    pub excluded: String,
    /// Maps a stringified zero-based position to the letter known to be there.
    ///
    /// Blank values are ignored, so a client can send every slot including unknown ones.
    pub correct_positions: BTreeMap<String, String>,
    /// Maps a stringified zero-based position to letters known not to be there.
    ///
    /// Blank letters in a list are ignored, like blank `correct_positions` values.
    pub wrong_positions: BTreeMap<String, Vec<String>>,
}

impl Default for FilterRequest {
    fn default() -> Self {
        FilterRequest {
            language: DEFAULT_LANGUAGE.to_string(),
            included: String::new(),
            excluded: String::new(),
            correct_positions: BTreeMap::new(),
            wrong_positions: BTreeMap::new(),
        }
    }
}

/// The matching words for a [`FilterRequest`], best first.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilterResponse {
    /// The number of words that satisfied the constraints.
    pub count: usize,
    /// Every word that shares the highest score.
    pub top_words: Vec<Arc<str>>,
    /// Every matching word with its score, ordered by descending score.
    pub all_scored: Vec<(Arc<str>, u64)>,
}

impl From<Ranking> for FilterResponse {
    fn from(ranking: Ranking) -> Self {
        FilterResponse {
            count: ranking.scored.len(),
            top_words: ranking.top_words,
            all_scored: ranking
                .scored
                .into_iter()
                .map(|scored| (scored.word, scored.score))
                .collect(),
        }
    }
}

/// The body sent back instead of a [`FilterResponse`] when a request fails.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorResponse {
    pub error: String,
}

impl From<&FilterError> for ErrorResponse {
    fn from(error: &FilterError) -> Self {
        ErrorResponse {
            error: error.to_string(),
        }
    }
}
