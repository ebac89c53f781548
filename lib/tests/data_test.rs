#[macro_use]
extern crate assert_matches;

use wordle_filter::*;

use std::io::Cursor;
use std::result::Result;
use std::sync::Arc;

macro_rules! assert_arc_eq {
    ($arc_vec:expr, $non_arc_vec:expr) => {
        assert_eq!(
            $arc_vec as &[Arc<str>],
            $non_arc_vec
                .iter()
                .map(|thing| Arc::from(*thing))
                .collect::<Vec<Arc<_>>>()
        );
    };
}

#[test]
fn dictionary_from_reader_succeeds() -> Result<(), FilterError> {
    let mut cursor = Cursor::new(String::from("\n\ncrane\n slate\r\nAdieu  \n"));

    let dictionary = Dictionary::from_reader(&mut cursor)?;

    assert_eq!(dictionary.len(), 3);
    assert_arc_eq!(&dictionary, &["CRANE", "SLATE", "ADIEU"]);
    Ok(())
}

#[test]
fn dictionary_from_reader_drops_other_lengths() -> Result<(), FilterError> {
    let mut cursor = Cursor::new(String::from("a\nlongword\ncrane\nfour\ncranes\n"));

    let dictionary = Dictionary::from_reader(&mut cursor)?;

    assert_arc_eq!(&dictionary, &["CRANE"]);
    Ok(())
}

#[test]
fn dictionary_from_reader_empty_is_not_an_error() -> Result<(), FilterError> {
    let dictionary = Dictionary::from_reader(Cursor::new(""))?;

    assert!(dictionary.is_empty());
    assert_eq!(dictionary.frequencies().total(), 0);
    Ok(())
}

#[test]
fn dictionary_from_reader_propagates_invalid_utf8() {
    let cursor = Cursor::new(vec![b'c', b'r', 0xff, b'n', b'e', b'\n']);

    assert_matches!(Dictionary::from_reader(cursor), Err(FilterError::Io(_)));
}

#[test]
fn dictionary_from_iterator_succeeds() {
    let dictionary = Dictionary::from_iterator(vec!["", "crane", "Slate ", "toolong"]);

    assert_arc_eq!(&dictionary, &["CRANE", "SLATE"]);
}

#[test]
fn dictionary_keeps_duplicates_in_order() {
    let dictionary = Dictionary::from_iterator(vec![
        "slate".to_string(),
        "crane".to_string(),
        "slate".to_string(),
    ]);

    assert_arc_eq!(&dictionary, &["SLATE", "CRANE", "SLATE"]);
    assert_eq!(dictionary.frequencies().count('S'), 2);
}

#[test]
fn letter_frequencies_sum_to_letter_count() {
    let dictionary = Dictionary::from_iterator(vec!["crane", "slate", "adieu", "sassy"]);
    let frequencies = dictionary.frequencies();

    assert_eq!(frequencies.total(), 20);
    assert_eq!(frequencies.count('S'), 4);
    assert_eq!(frequencies.count('A'), 4);
    assert_eq!(frequencies.count('E'), 3);
    assert_eq!(frequencies.count('Y'), 1);
    assert_eq!(frequencies.count('Q'), 0);
}

#[test]
fn dictionary_checks_length_before_upper_casing() -> Result<(), FilterError> {
    // "ß" upper cases to "SS", which must not change which lines count as five letters.
    let mut cursor = Cursor::new(String::from("größe\nmaße\n"));

    let dictionary = Dictionary::from_reader(&mut cursor)?;

    assert_arc_eq!(&dictionary, &["GRÖSSE"]);
    Ok(())
}
