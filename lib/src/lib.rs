//! Filters a five-letter word list down to the words that are consistent with the feedback from
//! previous guesses, and ranks them by how common their letters are.

mod data;
mod engine;
mod request;
mod restrictions;
mod results;
mod scorers;
mod store;

pub use data::{Dictionary, LetterFrequencies, WORD_LENGTH};
pub use engine::*;
pub use request::*;
pub use restrictions::ConstraintSet;
pub use results::*;
pub use scorers::*;
pub use store::*;
