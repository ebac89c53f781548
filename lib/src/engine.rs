use crate::data::Dictionary;
use crate::request::{FilterRequest, FilterResponse};
use crate::restrictions::ConstraintSet;
use crate::results::FilterError;
use crate::scorers::{rank, Ranking};
use crate::store::{DictionaryStore, WordSource};
use rayon::prelude::*;
use std::result::Result;
use std::sync::Arc;
use tracing::debug;

/// Gets the words that meet the given constraints, in their original order.
pub fn filter_words(constraints: &ConstraintSet, words: &[Arc<str>]) -> Vec<Arc<str>> {
    if constraints.is_empty() {
        return words.to_vec();
    }
    words
        .par_iter()
        .filter(|word| constraints.is_satisfied_by(word))
        .map(Arc::clone)
        .collect()
}

/// Filters the dictionary by the constraints, then ranks what is left by the dictionary's letter
/// frequencies.
pub fn filter_and_rank(constraints: &ConstraintSet, dictionary: &Dictionary) -> Ranking {
    let possible_words = filter_words(constraints, dictionary);
    rank(&possible_words, dictionary.frequencies())
}

/// Answers [`FilterRequest`]s using dictionaries from a shared [`DictionaryStore`].
///
/// ```
/// use wordle_filter::{FilterEngine, FilterRequest, MemoryWordSource};
///
/// let engine = FilterEngine::new(
///     MemoryWordSource::new().with_language("english", ["crane", "slate", "adieu"]));
/// let request = FilterRequest {
///     excluded: "s".to_string(),
///     ..FilterRequest::default()
/// };
///
/// let response = engine.filter(&request).unwrap();
///
/// assert_eq!(response.count, 2);
/// ```
pub struct FilterEngine<S> {
    store: DictionaryStore<S>,
}

impl<S: WordSource> FilterEngine<S> {
    pub fn new(source: S) -> FilterEngine<S> {
        FilterEngine::with_store(DictionaryStore::new(source))
    }

    pub fn with_store(store: DictionaryStore<S>) -> FilterEngine<S> {
        FilterEngine { store }
    }

    pub fn store(&self) -> &DictionaryStore<S> {
        &self.store
    }

    /// Finds and ranks the words in the requested language that satisfy the request's
    /// constraints.
    ///
    /// Fails without filtering anything if the language is unsupported or the constraints are
    /// malformed.
    pub fn filter(&self, request: &FilterRequest) -> Result<FilterResponse, FilterError> {
        let dictionary = self.store.get(&request.language)?;
        let constraints = ConstraintSet::parse(request)?;
        let ranking = filter_and_rank(&constraints, &dictionary);
        debug!(
            language = %request.language,
            count = ranking.scored.len(),
            top_score = ?ranking.top_score(),
            "filtered words"
        );
        Ok(FilterResponse::from(ranking))
    }
}
