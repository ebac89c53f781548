use crate::data::WORD_LENGTH;
use crate::request::FilterRequest;
use crate::results::FilterError;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::result::Result;

/// Defines letter restrictions that a word must adhere to.
///
/// All letters are stored upper case and all positions are valid indices into a word of
/// [`WORD_LENGTH`] letters. Construct one with [`ConstraintSet::parse()`] or the `with_*` builder
/// methods, which both enforce this.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintSet {
    /// The minimum number of times each letter must occur in the word.
    included_counts: HashMap<char, u8>,
    /// Letters that must not occur in the word, unless they are also in `included_counts`.
    excluded: HashSet<char>,
    /// Letters that must occur at specific positions.
    correct_positions: BTreeMap<usize, char>,
    /// Letters that must not occur at specific positions.
    wrong_positions: BTreeMap<usize, HashSet<char>>,
}

impl ConstraintSet {
    /// Creates a `ConstraintSet` that every word satisfies.
    pub fn new() -> ConstraintSet {
        ConstraintSet::default()
    }

    /// Validates the raw constraints of a request.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use wordle_filter::{ConstraintSet, FilterRequest};
    ///
    /// let request = FilterRequest {
    ///     included: "ee".to_string(),
    ///     correct_positions: BTreeMap::from([("0".to_string(), "c".to_string())]),
    ///     ..FilterRequest::default()
    /// };
    /// let constraints = ConstraintSet::parse(&request).unwrap();
    ///
    /// assert_eq!(constraints.min_count('E'), 2);
    /// assert!(constraints.is_satisfied_by("CREEP"));
    /// assert!(!constraints.is_satisfied_by("CRANE"));
    /// ```
    pub fn parse(request: &FilterRequest) -> Result<ConstraintSet, FilterError> {
        let mut constraints = ConstraintSet::new();
        for letter in significant_chars(&request.included) {
            constraints = constraints.with_included(letter)?;
        }
        for letter in significant_chars(&request.excluded) {
            constraints = constraints.with_excluded(letter)?;
        }
        for (position, letter) in &request.correct_positions {
            let position = parse_position(position)?;
            if let Some(letter) = parse_single_letter(letter)? {
                constraints = constraints.with_correct(position, letter)?;
            }
        }
        for (position, letters) in &request.wrong_positions {
            let position = parse_position(position)?;
            for letter in letters {
                if let Some(letter) = parse_single_letter(letter)? {
                    constraints = constraints.with_wrong(position, letter)?;
                }
            }
        }
        Ok(constraints)
    }

    /// Requires one more occurrence of the given letter.
    pub fn with_included(mut self, letter: char) -> Result<Self, FilterError> {
        let letter = normalize_letter(letter)?;
        let count = self.included_counts.entry(letter).or_insert(0);
        *count = count.checked_add(1).ok_or_else(|| {
            FilterError::MalformedConstraint(format!("too many copies of '{}' included", letter))
        })?;
        Ok(self)
    }

    /// Forbids the given letter, unless it is also included.
    pub fn with_excluded(mut self, letter: char) -> Result<Self, FilterError> {
        self.excluded.insert(normalize_letter(letter)?);
        Ok(self)
    }

    /// Requires the given letter at the given zero-based position.
    ///
    /// A later letter for the same position replaces the earlier one.
    pub fn with_correct(mut self, position: usize, letter: char) -> Result<Self, FilterError> {
        let letter = normalize_letter(letter)?;
        self.correct_positions
            .insert(check_position(position)?, letter);
        Ok(self)
    }

    /// Forbids the given letter at the given zero-based position.
    pub fn with_wrong(mut self, position: usize, letter: char) -> Result<Self, FilterError> {
        let letter = normalize_letter(letter)?;
        self.wrong_positions
            .entry(check_position(position)?)
            .or_default()
            .insert(letter);
        Ok(self)
    }

    /// Returns the minimum number of times the letter must occur in a matching word.
    pub fn min_count(&self, letter: char) -> u8 {
        *self.included_counts.get(&letter).unwrap_or(&0)
    }

    /// Returns `true` iff no word can be rejected by these constraints.
    pub fn is_empty(&self) -> bool {
        self.included_counts.is_empty()
            && self.excluded.is_empty()
            && self.correct_positions.is_empty()
            && self.wrong_positions.is_empty()
    }

    /// Returns `true` iff the given word satisfies these restrictions.
    ///
    /// The word is expected to be upper case, like the words of a
    /// [`Dictionary`](crate::Dictionary).
    pub fn is_satisfied_by(&self, word: &str) -> bool {
        self.correct_positions
            .iter()
            .all(|(position, letter)| word.chars().nth(*position) == Some(*letter))
            && self.wrong_positions.iter().all(|(position, letters)| {
                word.chars()
                    .nth(*position)
                    .map_or(true, |word_letter| !letters.contains(&word_letter))
            })
            // A letter can be both excluded and included when a guess repeated it: the excluded
            // copy only limits how many times it occurs.
            && !word.chars().any(|word_letter| {
                self.excluded.contains(&word_letter)
                    && !self.included_counts.contains_key(&word_letter)
            })
            && self.included_counts.iter().all(|(letter, min_count)| {
                word.chars().filter(|word_letter| word_letter == letter).count()
                    >= *min_count as usize
            })
    }
}

fn significant_chars(letters: &str) -> impl Iterator<Item = char> + '_ {
    letters.chars().filter(|letter| !letter.is_whitespace())
}

fn normalize_letter(letter: char) -> Result<char, FilterError> {
    let mut upper = letter.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(upper_letter), None) if letter.is_alphabetic() => Ok(upper_letter),
        _ => Err(FilterError::MalformedConstraint(format!(
            "'{}' is not a letter",
            letter
        ))),
    }
}

fn parse_single_letter(raw: &str) -> Result<Option<char>, FilterError> {
    let raw = raw.trim();
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(letter), None) => normalize_letter(letter).map(Some),
        _ => Err(FilterError::MalformedConstraint(format!(
            "expected a single letter, got \"{}\"",
            raw
        ))),
    }
}

fn parse_position(raw: &str) -> Result<usize, FilterError> {
    let position = raw.trim().parse::<usize>().map_err(|_| {
        FilterError::MalformedConstraint(format!("position \"{}\" is not an index", raw))
    })?;
    check_position(position)
}

fn check_position(position: usize) -> Result<usize, FilterError> {
    if position >= WORD_LENGTH {
        return Err(FilterError::MalformedConstraint(format!(
            "position {} is outside of a {}-letter word",
            position, WORD_LENGTH
        )));
    }
    Ok(position)
}
