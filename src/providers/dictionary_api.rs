use super::{DictionaryReply, DictionarySource, Meaning, SourceError, WordEntry};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct FreeDictionarySource {
    client: Client,
}

// Wire format of the Free Dictionary API. The response is either an array of
// entries or a sentinel object with a title when the word is unknown.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiResponse {
    Entries(Vec<ApiEntry>),
    Sentinel(ApiSentinel),
}

#[derive(Debug, Deserialize)]
struct ApiSentinel {
    #[allow(dead_code)]
    title: String,
}

#[derive(Debug, Deserialize)]
struct ApiEntry {
    word: String,
    #[serde(default)]
    phonetics: Vec<ApiPhonetic>,
    #[serde(default)]
    meanings: Vec<ApiMeaning>,
}

#[derive(Debug, Deserialize)]
struct ApiPhonetic {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiMeaning {
    #[serde(rename = "partOfSpeech")]
    part_of_speech: String,
    #[serde(default)]
    definitions: Vec<ApiDefinition>,
    #[serde(default)]
    synonyms: Vec<String>,
    #[serde(default)]
    antonyms: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiDefinition {
    definition: String,
    #[serde(default)]
    example: Option<String>,
}

enum ParsedBody {
    Entry(WordEntry),
    NoDefinitions,
}

impl FreeDictionarySource {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client for dictionary lookup"),
        }
    }

    /// Parse a response body into a word entry or the not-found sentinel.
    fn parse_body(body: &str) -> Result<ParsedBody, SourceError> {
        let response: ApiResponse = serde_json::from_str(body)
            .map_err(|e| SourceError::Malformed(e.to_string()))?;

        let entries = match response {
            ApiResponse::Sentinel(_) => return Ok(ParsedBody::NoDefinitions),
            ApiResponse::Entries(entries) => entries,
        };

        // The first entry is the canonical one
        let entry = match entries.into_iter().next() {
            Some(entry) => entry,
            None => return Err(SourceError::Malformed("empty entry array".to_string())),
        };

        let meanings: Vec<Meaning> = entry
            .meanings
            .into_iter()
            .filter_map(|m| {
                let mut definitions = m.definitions.into_iter();
                definitions.next().map(|first| Meaning {
                    part_of_speech: m.part_of_speech,
                    definition: first.definition,
                    example: first.example.filter(|e| !e.is_empty()),
                    synonyms: m.synonyms,
                    antonyms: m.antonyms,
                })
            })
            .collect();

        if meanings.is_empty() {
            return Err(SourceError::Malformed(format!(
                "entry for '{}' has no meanings",
                entry.word
            )));
        }

        let phonetic = entry.phonetics.into_iter().next();
        let (phonetic_text, phonetic_audio) = match phonetic {
            Some(p) => (
                p.text.filter(|t| !t.is_empty()),
                p.audio.filter(|a| !a.is_empty()),
            ),
            None => (None, None),
        };

        Ok(ParsedBody::Entry(WordEntry {
            word: entry.word,
            phonetic_text,
            phonetic_audio,
            meanings,
        }))
    }
}

#[async_trait]
impl DictionarySource for FreeDictionarySource {
    async fn lookup(&self, word: &str) -> Result<DictionaryReply, SourceError> {
        let full_url = format!("{}/{}", API_URL, urlencoding::encode(word));

        let response = self
            .client
            .get(&full_url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        match Self::parse_body(&body)? {
            ParsedBody::NoDefinitions => Ok(DictionaryReply::NoDefinitions),
            ParsedBody::Entry(entry) => Ok(DictionaryReply::Found {
                raw_body: body,
                entry,
            }),
        }
    }

    fn parse_cached(&self, raw_body: &str) -> Result<WordEntry, SourceError> {
        match Self::parse_body(raw_body)? {
            ParsedBody::Entry(entry) => Ok(entry),
            ParsedBody::NoDefinitions => Err(SourceError::Malformed(
                "cached record holds no entries".to_string(),
            )),
        }
    }

    fn name(&self) -> &str {
        "Free Dictionary"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HELLO_BODY: &str = r#"[{
        "word": "hello",
        "phonetics": [{"text": "/həˈləʊ/", "audio": "https://api.dictionaryapi.dev/media/pronunciations/en/hello-uk.mp3"}],
        "meanings": [
            {
                "partOfSpeech": "noun",
                "definitions": [{"definition": "A greeting.", "example": "she was getting polite nods and hellos"}],
                "synonyms": ["greeting", "salutation"],
                "antonyms": ["farewell"]
            },
            {
                "partOfSpeech": "interjection",
                "definitions": [{"definition": "Used as a greeting."}],
                "synonyms": [],
                "antonyms": []
            }
        ]
    }]"#;

    const SENTINEL_BODY: &str = r#"{
        "title": "No Definitions Found",
        "message": "Sorry pal, we couldn't find definitions for the word you were looking for.",
        "resolution": "You can try the search again at later time or head to the web instead."
    }"#;

    #[test]
    fn parses_full_entry() {
        let source = FreeDictionarySource::new();
        let entry = source.parse_cached(HELLO_BODY).unwrap();

        assert_eq!(entry.word, "hello");
        assert_eq!(entry.phonetic_text.as_deref(), Some("/həˈləʊ/"));
        assert!(entry.phonetic_audio.as_deref().unwrap().ends_with(".mp3"));
        assert_eq!(entry.meanings.len(), 2);
        assert_eq!(entry.meanings[0].part_of_speech, "noun");
        assert_eq!(entry.meanings[0].definition, "A greeting.");
        assert_eq!(
            entry.meanings[0].example.as_deref(),
            Some("she was getting polite nods and hellos")
        );
        assert_eq!(entry.meanings[1].example, None);
        assert_eq!(entry.synonyms(), vec!["greeting", "salutation"]);
        assert_eq!(entry.antonyms(), vec!["farewell"]);
    }

    #[test]
    fn tolerates_missing_phonetics() {
        let body = r#"[{
            "word": "rare",
            "meanings": [{"partOfSpeech": "adjective", "definitions": [{"definition": "Uncommon."}]}]
        }]"#;

        let entry = FreeDictionarySource::new().parse_cached(body).unwrap();
        assert_eq!(entry.phonetic_text, None);
        assert_eq!(entry.phonetic_audio, None);
    }

    #[test]
    fn empty_audio_string_becomes_absent() {
        let body = r#"[{
            "word": "word",
            "phonetics": [{"text": "/wɜːd/", "audio": ""}],
            "meanings": [{"partOfSpeech": "noun", "definitions": [{"definition": "A unit of language."}]}]
        }]"#;

        let entry = FreeDictionarySource::new().parse_cached(body).unwrap();
        assert_eq!(entry.phonetic_text.as_deref(), Some("/wɜːd/"));
        assert_eq!(entry.phonetic_audio, None);
    }

    #[test]
    fn entry_without_meanings_is_malformed() {
        let body = r#"[{"word": "husk", "meanings": []}]"#;
        assert!(FreeDictionarySource::new().parse_cached(body).is_err());
    }

    #[test]
    fn sentinel_body_is_no_definitions() {
        match FreeDictionarySource::parse_body(SENTINEL_BODY).unwrap() {
            ParsedBody::NoDefinitions => {}
            ParsedBody::Entry(_) => panic!("sentinel parsed as an entry"),
        }
    }

    #[test]
    fn sentinel_in_cache_is_rejected() {
        assert!(FreeDictionarySource::new().parse_cached(SENTINEL_BODY).is_err());
    }

    #[test]
    fn garbage_body_is_malformed() {
        assert!(FreeDictionarySource::parse_body("not json at all").is_err());
    }
}
