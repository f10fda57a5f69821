use reqwest::Client;
use rodio::{Decoder, OutputStreamBuilder, Sink};
use std::io::Cursor;
use std::time::Duration;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub enum PlaybackError {
    NetworkError(String),
    AudioError(String),
    NoAudio,
}

impl std::fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlaybackError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            PlaybackError::AudioError(msg) => write!(f, "Audio playback error: {}", msg),
            PlaybackError::NoAudio => write!(f, "No pronunciation audio for this entry"),
        }
    }
}

impl std::error::Error for PlaybackError {}

/// Plays a dictionary entry's recorded pronunciation file.
pub struct AudioPlayer {
    client: Client,
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to create HTTP client for audio playback"),
        }
    }

    async fn fetch_audio(&self, url: &str) -> Result<Vec<u8>, PlaybackError> {
        let response = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await
            .map_err(|e| PlaybackError::NetworkError(format!("Failed to fetch audio: {}", e)))?;

        if !response.status().is_success() {
            return Err(PlaybackError::NetworkError(format!(
                "Audio host returned status: {}",
                response.status()
            )));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| PlaybackError::NetworkError(format!("Failed to read audio data: {}", e)))?;

        Ok(audio_bytes.to_vec())
    }

    /// Fetch and play a pronunciation URL to completion.
    pub async fn play_url(&self, url: &str) -> Result<(), PlaybackError> {
        if url.trim().is_empty() {
            return Err(PlaybackError::NoAudio);
        }

        let audio_bytes = self.fetch_audio(url).await?;

        let builder = OutputStreamBuilder::from_default_device()
            .map_err(|e| PlaybackError::AudioError(format!("Failed to get default device: {}", e)))?;

        let stream_handle = builder
            .open_stream()
            .map_err(|e| PlaybackError::AudioError(format!("Failed to open stream: {}", e)))?;

        let sink = Sink::connect_new(stream_handle.mixer());

        let cursor = Cursor::new(audio_bytes);
        let source = Decoder::new(cursor)
            .map_err(|e| PlaybackError::AudioError(format!("Failed to decode audio: {}", e)))?;

        sink.append(source);
        sink.sleep_until_end();

        Ok(())
    }

    /// Play in a detached task so the prompt is not blocked.
    pub fn play_url_async(url: String) {
        tokio::spawn(async move {
            let player = AudioPlayer::new();
            if let Err(e) = player.play_url(&url).await {
                eprintln!("Playback error: {}", e);
            }
        });
    }
}
