use super::{ImageSource, SourceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const API_URL: &str = "https://pixabay.com/api/";
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct PixabaySource {
    client: Client,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    #[serde(default)]
    hits: Vec<ApiHit>,
}

#[derive(Debug, Deserialize)]
struct ApiHit {
    #[serde(rename = "webformatURL")]
    webformat_url: String,
}

impl PixabaySource {
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client for image search"),
            api_key: api_key.to_string(),
        }
    }

    fn extract_urls(body: &str) -> Result<Vec<String>, SourceError> {
        let reply: ApiReply =
            serde_json::from_str(body).map_err(|e| SourceError::Malformed(e.to_string()))?;

        Ok(reply.hits.into_iter().map(|hit| hit.webformat_url).collect())
    }
}

#[async_trait]
impl ImageSource for PixabaySource {
    async fn search(&self, term: &str, count: usize) -> Result<Vec<String>, SourceError> {
        let full_url = format!(
            "{}?key={}&q={}&image_type=photo&per_page={}",
            API_URL,
            self.api_key,
            urlencoding::encode(term),
            count
        );

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

        Self::extract_urls(&body)
    }

    fn name(&self) -> &str {
        "Pixabay"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_hit_urls_in_order() {
        let body = r#"{"total": 2, "hits": [
            {"id": 1, "webformatURL": "https://cdn.example/a.jpg"},
            {"id": 2, "webformatURL": "https://cdn.example/b.jpg"}
        ]}"#;

        let urls = PixabaySource::extract_urls(body).unwrap();
        assert_eq!(urls, vec!["https://cdn.example/a.jpg", "https://cdn.example/b.jpg"]);
    }

    #[test]
    fn zero_hits_is_an_empty_list_not_an_error() {
        let body = r#"{"total": 0, "hits": []}"#;
        assert_eq!(PixabaySource::extract_urls(body).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn missing_hits_field_is_empty() {
        assert_eq!(PixabaySource::extract_urls("{}").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn html_error_page_is_malformed() {
        assert!(PixabaySource::extract_urls("[ERROR 400] key is missing").is_err());
    }
}
