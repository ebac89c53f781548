use std::io;
use thiserror::Error;

/// Indicates that a filter request could not be answered.
#[derive(Debug, Error)]
pub enum FilterError {
    /// No word source exists for the requested language.
    #[error("Language '{0}' not supported.")]
    UnsupportedLanguage(String),
    /// The raw constraints do not have the expected shape, e.g. a position that is not an index
    /// into the word, or a "letter" that is not a single alphabetic character.
    #[error("Malformed constraint: {0}")]
    MalformedConstraint(String),
    /// The word source for a language exists but could not be read.
    #[error("Failed to read word source: {0}")]
    Io(#[from] io::Error),
}

impl FilterError {
    /// Returns `true` iff the error was caused by the request itself rather than by the server.
    ///
    /// Callers exposing the engine over HTTP answer these with a `400` status.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FilterError::UnsupportedLanguage(_) | FilterError::MalformedConstraint(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_language_message() {
        let error = FilterError::UnsupportedLanguage("klingon".to_string());

        assert_eq!(error.to_string(), "Language 'klingon' not supported.");
        assert!(error.is_client_error());
    }

    #[test]
    fn io_error_is_not_client_error() {
        let error = FilterError::from(io::Error::new(io::ErrorKind::Other, "disk on fire"));

        assert!(!error.is_client_error());
        assert_eq!(error.to_string(), "Failed to read word source: disk on fire");
    }
}
