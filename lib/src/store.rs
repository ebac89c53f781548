use crate::data::Dictionary;
use crate::results::FilterError;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::result::Result;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Provides the raw word list for a language.
pub trait WordSource {
    /// Loads the dictionary for the given normalized language key.
    ///
    /// Returns `Ok(None)` if there is no word list for this language at all, which is distinct
    /// from a word list that happens to contain no usable words.
    fn load(&self, language: &str) -> Result<Option<Dictionary>, FilterError>;
}

/// Reads word lists from `<dir>/<language>.txt`, one word per line.
#[derive(Clone, Debug)]
pub struct DirectoryWordSource {
    dir: PathBuf,
}

impl DirectoryWordSource {
    pub fn new(dir: impl Into<PathBuf>) -> DirectoryWordSource {
        DirectoryWordSource { dir: dir.into() }
    }
}

impl WordSource for DirectoryWordSource {
    fn load(&self, language: &str) -> Result<Option<Dictionary>, FilterError> {
        // Keys become file names, so anything that could leave `dir` has no source.
        if language.is_empty()
            || !language
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Ok(None);
        }
        let path = self.dir.join(format!("{}.txt", language));
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(error.into()),
        };
        debug!(path = %path.display(), "reading word list");
        Dictionary::from_reader(io::BufReader::new(file)).map(Some)
    }
}

/// Serves word lists held in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryWordSource {
    words_by_language: HashMap<String, Vec<String>>,
}

impl MemoryWordSource {
    pub fn new() -> MemoryWordSource {
        MemoryWordSource::default()
    }

    /// Adds (or replaces) the word list for a language.
    pub fn with_language<S, I>(mut self, language: &str, words: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        self.words_by_language.insert(
            normalize_language(language),
            words
                .into_iter()
                .map(|word| word.as_ref().to_string())
                .collect(),
        );
        self
    }
}

impl WordSource for MemoryWordSource {
    fn load(&self, language: &str) -> Result<Option<Dictionary>, FilterError> {
        Ok(self
            .words_by_language
            .get(language)
            .map(Dictionary::from_iterator))
    }
}

type Slot = Arc<OnceCell<Arc<Dictionary>>>;

/// Loads each language's [`Dictionary`] once and shares it between requests.
///
/// Every language gets its own slot. The map lock is only held to find, add or remove a slot,
/// so loading one language never blocks lookups of another. Concurrent first lookups of the same
/// language wait on its slot and load it only once. Unsupported languages are never cached.
pub struct DictionaryStore<S> {
    source: S,
    dictionaries: RwLock<HashMap<String, Slot>>,
}

impl<S: WordSource> DictionaryStore<S> {
    pub fn new(source: S) -> DictionaryStore<S> {
        DictionaryStore {
            source,
            dictionaries: RwLock::new(HashMap::new()),
        }
    }

    /// Retrieves the dictionary for the given language, loading it if needed.
    ///
    /// The language key is case-insensitive.
    pub fn get(&self, language: &str) -> Result<Arc<Dictionary>, FilterError> {
        let language = normalize_language(language);
        let slot = self.slot(&language);
        if let Some(dictionary) = slot.get() {
            debug!(%language, "dictionary cache hit");
            return Ok(Arc::clone(dictionary));
        }

        let result = slot
            .get_or_try_init(|| match self.source.load(&language)? {
                Some(dictionary) => {
                    info!(%language, num_words = dictionary.len(), "loaded dictionary");
                    Ok(Arc::new(dictionary))
                }
                None => {
                    warn!(%language, "no word list for language");
                    Err(FilterError::UnsupportedLanguage(language.clone()))
                }
            })
            .map(Arc::clone);
        if result.is_err() {
            self.remove_empty_slot(&language, &slot);
        }
        result
    }

    /// Returns `true` iff the language has already been loaded.
    pub fn is_cached(&self, language: &str) -> bool {
        self.read_map()
            .get(&normalize_language(language))
            .map_or(false, |slot| slot.get().is_some())
    }

    /// Lists the languages loaded so far, in sorted order.
    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self
            .read_map()
            .iter()
            .filter(|(_, slot)| slot.get().is_some())
            .map(|(language, _)| language.clone())
            .collect();
        languages.sort_unstable();
        languages
    }

    fn slot(&self, language: &str) -> Slot {
        if let Some(slot) = self.read_map().get(language) {
            return Arc::clone(slot);
        }
        Arc::clone(self.write_map().entry(language.to_string()).or_default())
    }

    fn remove_empty_slot(&self, language: &str, slot: &Slot) {
        let mut dictionaries = self.write_map();
        if let Some(existing) = dictionaries.get(language) {
            if Arc::ptr_eq(existing, slot) && existing.get().is_none() {
                dictionaries.remove(language);
            }
        }
    }

    // Slots are only ever added or removed whole, so a panic elsewhere cannot leave the map
    // inconsistent.
    fn read_map(&self) -> RwLockReadGuard<'_, HashMap<String, Slot>> {
        self.dictionaries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_map(&self) -> RwLockWriteGuard<'_, HashMap<String, Slot>> {
        self.dictionaries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn normalize_language(language: &str) -> String {
    language.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{mpsc, Mutex};

    struct CountingSource {
        inner: MemoryWordSource,
        num_loads: AtomicUsize,
    }

    impl WordSource for CountingSource {
        fn load(&self, language: &str) -> Result<Option<Dictionary>, FilterError> {
            self.num_loads.fetch_add(1, Ordering::SeqCst);
            self.inner.load(language)
        }
    }

    fn counting_store() -> DictionaryStore<CountingSource> {
        DictionaryStore::new(CountingSource {
            inner: MemoryWordSource::new().with_language("english", ["crane", "slate"]),
            num_loads: AtomicUsize::new(0),
        })
    }

    #[test]
    fn get_loads_once() -> Result<(), FilterError> {
        let store = counting_store();

        let first = store.get("english")?;
        let second = store.get("ENGLISH ")?;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.source.num_loads.load(Ordering::SeqCst), 1);
        assert_eq!(store.languages(), vec!["english".to_string()]);
        Ok(())
    }

    #[test]
    fn get_does_not_cache_unsupported_language() {
        let store = counting_store();

        assert_matches!(
            store.get("Klingon"),
            Err(FilterError::UnsupportedLanguage(language)) if language == "klingon"
        );
        assert_matches!(
            store.get("klingon"),
            Err(FilterError::UnsupportedLanguage(_))
        );

        assert!(!store.is_cached("klingon"));
        assert_eq!(store.source.num_loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn get_concurrently_loads_once() {
        let store = counting_store();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    assert_eq!(store.get("english").unwrap().len(), 2);
                });
            }
        });

        assert_eq!(store.source.num_loads.load(Ordering::SeqCst), 1);
    }

    struct BlockingSource {
        inner: MemoryWordSource,
        started: Mutex<mpsc::Sender<()>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl WordSource for BlockingSource {
        fn load(&self, language: &str) -> Result<Option<Dictionary>, FilterError> {
            if language == "slow" {
                self.started.lock().unwrap().send(()).unwrap();
                self.release.lock().unwrap().recv().unwrap();
            }
            self.inner.load(language)
        }
    }

    #[test]
    fn get_cached_language_while_another_loads() -> Result<(), FilterError> {
        let (started_sender, started_receiver) = mpsc::channel();
        let (release_sender, release_receiver) = mpsc::channel();
        let store = DictionaryStore::new(BlockingSource {
            inner: MemoryWordSource::new()
                .with_language("english", ["crane", "slate"])
                .with_language("slow", ["adieu"]),
            started: Mutex::new(started_sender),
            release: Mutex::new(release_receiver),
        });
        store.get("english")?;

        std::thread::scope(|scope| {
            let loading = scope.spawn(|| store.get("slow").map(|dictionary| dictionary.len()));
            started_receiver.recv().unwrap();

            // "slow" is mid-load here.
            assert_eq!(store.get("english").unwrap().len(), 2);
            assert!(!store.is_cached("slow"));
            assert_eq!(store.languages(), vec!["english".to_string()]);

            release_sender.send(()).unwrap();
            assert_eq!(loading.join().unwrap().unwrap(), 1);
        });

        assert!(store.is_cached("slow"));
        Ok(())
    }

    #[test]
    fn get_unsupported_language_leaves_no_slot() {
        let store = counting_store();

        assert!(store.get("klingon").is_err());

        assert!(store.read_map().get("klingon").is_none());
    }

    #[test]
    fn directory_source_rejects_path_like_keys() -> Result<(), FilterError> {
        let source = DirectoryWordSource::new(".");

        assert_matches!(source.load("../english"), Ok(None));
        assert_matches!(source.load("en/us"), Ok(None));
        assert_matches!(source.load(""), Ok(None));
        Ok(())
    }
}
