use crate::store::Store;
use std::sync::{Arc, Mutex};

const HISTORY_KEY: &str = "search_history";

/// Ordered, deduplicated list of previously searched words, persisted as a
/// JSON string array under a single store key.
pub struct HistoryManager {
    store: Arc<dyn Store>,
    words: Mutex<Vec<String>>,
}

impl HistoryManager {
    pub fn new(store: Arc<dyn Store>) -> Self {
        let words = store
            .get(HISTORY_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Self {
            store,
            words: Mutex::new(words),
        }
    }

    /// Append a word unless it is already present, then persist the full
    /// list. Idempotent under repeated identical input.
    pub fn record(&self, word: &str) {
        if let Ok(mut words) = self.words.lock() {
            if words.iter().any(|w| w == word) {
                return;
            }
            words.push(word.to_string());
            self.persist(&words);
        }
    }

    pub fn list(&self) -> Vec<String> {
        self.words.lock().map(|words| words.clone()).unwrap_or_default()
    }

    /// Empty the list and delete its persisted representation.
    pub fn clear(&self) {
        if let Ok(mut words) = self.words.lock() {
            words.clear();
        }
        self.store.remove(HISTORY_KEY);
    }

    fn persist(&self, words: &[String]) {
        if let Ok(raw) = serde_json::to_string(words) {
            self.store.set(HISTORY_KEY, &raw);
        }
    }
}
