use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Flat key-value string store with process-restart lifetime.
///
/// Storage failures must never reach the caller: a key that cannot be read
/// or written behaves as if it were absent.
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Store backed by a single JSON object file. The whole map is loaded at
/// open and rewritten on each mutation.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at its default location in the user data directory.
    pub fn open_default() -> Self {
        let path = dirs::data_dir()
            .map(|dir| dir.join("Wordbook").join("store.json"))
            .unwrap_or_else(|| PathBuf::from("wordbook_store.json"));

        Self::open(path)
    }

    pub fn open(path: PathBuf) -> Self {
        let entries = Self::read_entries(&path).unwrap_or_default();

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    fn read_entries(path: &Path) -> Option<HashMap<String, String>> {
        let content = fs::read_to_string(path).ok()?;
        // A corrupt file degrades to an empty store
        serde_json::from_str(&content).ok()
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return;
            }
        }

        if let Ok(content) = serde_json::to_string(entries) {
            if let Err(e) = fs::write(&self.path, content) {
                eprintln!("Store write error: {}", e);
            }
        }
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
            self.persist(&entries);
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            if entries.remove(key).is_some() {
                self.persist(&entries);
            }
        }
    }
}

/// In-memory store substitute for tests.
#[cfg(test)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

#[cfg(test)]
impl Store for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}
