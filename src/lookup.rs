use crate::history::HistoryManager;
use crate::providers::{DictionaryReply, DictionarySource, WordEntry};
use crate::store::Store;
use std::error::Error;
use std::fmt;
use std::sync::Arc;

const CACHE_KEY_PREFIX: &str = "word_";

/// Where a returned entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Network,
    Cache,
}

#[derive(Debug)]
pub enum LookupOutcome {
    Found { entry: WordEntry, origin: Origin },
    /// The service explicitly reported no definitions. Terminal; the cache
    /// is not consulted, even if a stale record exists.
    NotFoundUpstream,
    /// The service was unreachable and no cached record exists.
    NoCacheAvailable,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LookupError {
    /// Empty or whitespace-only input, rejected before any I/O.
    EmptyInput,
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::EmptyInput => write!(f, "No word provided"),
        }
    }
}

impl Error for LookupError {}

/// Coordinates the network-first, cache-fallback lookup flow and records
/// each searched word in the history as a side effect.
pub struct Orchestrator {
    source: Box<dyn DictionarySource>,
    store: Arc<dyn Store>,
    history: Arc<HistoryManager>,
}

impl Orchestrator {
    pub fn new(
        source: Box<dyn DictionarySource>,
        store: Arc<dyn Store>,
        history: Arc<HistoryManager>,
    ) -> Self {
        Self {
            source,
            store,
            history,
        }
    }

    /// Cache key for a word: fixed prefix plus the trimmed, lower-cased form.
    pub fn cache_key(word: &str) -> String {
        format!("{}{}", CACHE_KEY_PREFIX, word.trim().to_lowercase())
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    /// Look up a word: network first, offline cache on transport failure.
    ///
    /// The history record and any cache write are completed before the
    /// outcome is returned.
    pub async fn lookup_word(&self, word: &str) -> Result<LookupOutcome, LookupError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(LookupError::EmptyInput);
        }

        self.history.record(word);
        let cache_key = Self::cache_key(word);

        match self.source.lookup(word).await {
            Ok(DictionaryReply::Found { raw_body, entry }) => {
                self.store.set(&cache_key, &raw_body);
                Ok(LookupOutcome::Found {
                    entry,
                    origin: Origin::Network,
                })
            }
            Ok(DictionaryReply::NoDefinitions) => Ok(LookupOutcome::NotFoundUpstream),
            Err(_) => self.lookup_cached(&cache_key),
        }
    }

    fn lookup_cached(&self, cache_key: &str) -> Result<LookupOutcome, LookupError> {
        let raw_body = match self.store.get(cache_key) {
            Some(raw_body) => raw_body,
            None => return Ok(LookupOutcome::NoCacheAvailable),
        };

        // A record that no longer parses is treated the same as an absent one
        match self.source.parse_cached(&raw_body) {
            Ok(entry) => Ok(LookupOutcome::Found {
                entry,
                origin: Origin::Cache,
            }),
            Err(_) => Ok(LookupOutcome::NoCacheAvailable),
        }
    }
}
