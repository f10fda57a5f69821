use super::{SourceError, TranslationSource};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::form_urlencoded;

const API_URL: &str = "https://api.mymemory.translated.net/get";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";
const REQUEST_TIMEOUT_SECS: u64 = 10;

// Source side of the language pair. Lookups are English-only upstream, so
// translations always leave from English.
const SOURCE_LANG: &str = "en";

pub struct MyMemorySource {
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    #[serde(rename = "responseData", default)]
    response_data: Option<ResponseData>,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText", default)]
    translated_text: Option<String>,
}

impl MyMemorySource {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client for translation"),
        }
    }

    /// Extract the translated text, if the service produced any.
    fn extract_translation(body: &str) -> Result<Option<String>, SourceError> {
        let reply: ApiReply =
            serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;

        let translated = reply
            .response_data
            .and_then(|data| data.translated_text)
            .filter(|text| !text.trim().is_empty());

        Ok(translated)
    }
}

#[async_trait]
impl TranslationSource for MyMemorySource {
    async fn translate(
        &self,
        text: &str,
        target: &str,
    ) -> Result<Option<String>, SourceError> {
        let encoded_text = form_urlencoded::byte_serialize(text.as_bytes()).collect::<String>();
        let langpair = format!("{}|{}", SOURCE_LANG, target);
        let encoded_pair =
            form_urlencoded::byte_serialize(langpair.as_bytes()).collect::<String>();

        let full_url = format!("{}?q={}&langpair={}", API_URL, encoded_text, encoded_pair);

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

        Self::extract_translation(&body)
    }

    fn name(&self) -> &str {
        "MyMemory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_translated_text() {
        let body = r#"{"responseData": {"translatedText": "hola", "match": 1}}"#;
        assert_eq!(
            MyMemorySource::extract_translation(body).unwrap(),
            Some("hola".to_string())
        );
    }

    #[test]
    fn empty_translation_is_none() {
        let body = r#"{"responseData": {"translatedText": "  "}}"#;
        assert_eq!(MyMemorySource::extract_translation(body).unwrap(), None);
    }

    #[test]
    fn missing_response_data_is_none() {
        let body = r#"{"responseStatus": 403}"#;
        assert_eq!(MyMemorySource::extract_translation(body).unwrap(), None);
    }

    #[test]
    fn non_json_body_is_malformed() {
        assert!(MyMemorySource::extract_translation("<html>busy</html>").is_err());
    }
}
