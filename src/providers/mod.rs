use async_trait::async_trait;
use std::error::Error;
use std::fmt;

pub mod dictionary_api;
pub mod mymemory;
pub mod pixabay;

// Common lookup result structure for all dictionary sources
#[derive(Debug, Clone)]
pub struct WordEntry {
    pub word: String,
    pub phonetic_text: Option<String>,
    pub phonetic_audio: Option<String>,
    pub meanings: Vec<Meaning>,
}

#[derive(Debug, Clone)]
pub struct Meaning {
    pub part_of_speech: String,
    pub definition: String,
    pub example: Option<String>,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}

impl WordEntry {
    /// Synonyms across all meanings, in meaning order. Duplicates are kept.
    pub fn synonyms(&self) -> Vec<&str> {
        self.meanings
            .iter()
            .flat_map(|m| m.synonyms.iter().map(String::as_str))
            .collect()
    }

    /// Antonyms across all meanings, in meaning order. Duplicates are kept.
    pub fn antonyms(&self) -> Vec<&str> {
        self.meanings
            .iter()
            .flat_map(|m| m.antonyms.iter().map(String::as_str))
            .collect()
    }
}

/// Successful reply from a dictionary source.
#[derive(Debug, Clone)]
pub enum DictionaryReply {
    /// Definitions found. The raw response body is kept so it can be written
    /// to the offline cache unchanged.
    Found { raw_body: String, entry: WordEntry },
    /// The service itself reported that the word has no definitions.
    /// Distinct from a transport failure.
    NoDefinitions,
}

/// Transport-level failure talking to a remote source.
#[derive(Debug)]
pub enum SourceError {
    Network(String),
    Status(u16),
    Malformed(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Network(msg) => write!(f, "Network error: {}", msg),
            SourceError::Status(code) => write!(f, "HTTP error: {}", code),
            SourceError::Malformed(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl Error for SourceError {}

// Main dictionary source trait
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Look up a word. The word is sent as typed by the user; the upstream
    /// service is case-sensitive in practice.
    async fn lookup(&self, word: &str) -> Result<DictionaryReply, SourceError>;

    /// Re-parse a raw response body previously written to the offline cache.
    fn parse_cached(&self, raw_body: &str) -> Result<WordEntry, SourceError>;

    /// Get source name for display purposes
    fn name(&self) -> &str;
}

// Related-image search source trait
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Search images for a term. An empty list is a valid result, not an error.
    async fn search(&self, term: &str, count: usize) -> Result<Vec<String>, SourceError>;

    /// Get source name for display purposes
    fn name(&self) -> &str;
}

// Translation source trait
#[async_trait]
pub trait TranslationSource: Send + Sync {
    /// Translate text into the target language. Returns `Ok(None)` when the
    /// service responded but had no usable translation.
    async fn translate(&self, text: &str, target: &str)
        -> Result<Option<String>, SourceError>;

    /// Get source name for display purposes
    fn name(&self) -> &str;
}

/// Create dictionary source based on name
pub fn create_dictionary_source(
    source_name: &str,
) -> Result<Box<dyn DictionarySource>, Box<dyn Error>> {
    match source_name.to_lowercase().as_str() {
        "dictionaryapi" | "free-dictionary" => {
            Ok(Box::new(dictionary_api::FreeDictionarySource::new()))
        }
        _ => Err(format!("Unknown dictionary source: {}", source_name).into()),
    }
}

/// Create image search source based on name
pub fn create_image_source(
    source_name: &str,
    api_key: &str,
) -> Result<Box<dyn ImageSource>, Box<dyn Error>> {
    match source_name.to_lowercase().as_str() {
        "pixabay" => Ok(Box::new(pixabay::PixabaySource::new(api_key))),
        _ => Err(format!("Unknown image source: {}", source_name).into()),
    }
}

/// Create translation source based on name
pub fn create_translation_source(
    source_name: &str,
) -> Result<Box<dyn TranslationSource>, Box<dyn Error>> {
    match source_name.to_lowercase().as_str() {
        "mymemory" => Ok(Box::new(mymemory::MyMemorySource::new())),
        _ => Err(format!("Unknown translation source: {}", source_name).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meaning(pos: &str, syns: &[&str], ants: &[&str]) -> Meaning {
        Meaning {
            part_of_speech: pos.to_string(),
            definition: "def".to_string(),
            example: None,
            synonyms: syns.iter().map(|s| s.to_string()).collect(),
            antonyms: ants.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn synonyms_flatten_in_meaning_order_keeping_duplicates() {
        let entry = WordEntry {
            word: "fast".to_string(),
            phonetic_text: None,
            phonetic_audio: None,
            meanings: vec![
                meaning("adjective", &["quick", "rapid"], &["slow"]),
                meaning("adverb", &["quick", "swiftly"], &[]),
            ],
        };

        assert_eq!(entry.synonyms(), vec!["quick", "rapid", "quick", "swiftly"]);
        assert_eq!(entry.antonyms(), vec!["slow"]);
    }

    #[test]
    fn unknown_source_names_are_rejected() {
        assert!(create_dictionary_source("nope").is_err());
        assert!(create_image_source("nope", "key").is_err());
        assert!(create_translation_source("nope").is_err());
    }
}
